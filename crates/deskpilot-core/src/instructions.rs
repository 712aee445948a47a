//! System prompt assembly.

use chrono::{DateTime, Utc};

/// Default instruction text when the config does not override it.
pub const DEFAULT_INSTRUCTIONS: &str = "\
## Context

Your goal is to help the user with their computer tasks. Make sure to follow \
their instructions and provide helpful responses.

Also, you need to make sure that any additional information is passed to the \
tools to make the life easier, e.g. passing the coordinates of the mouse \
click to the computer tool.

Use the previous conversations to provide context and help the user with \
their tasks, so for example if the user asks for a follow-up check if the \
previous conversations contain any relevant information that can be used to \
help the user.

## Remarks

- Before clicking or typing, make sure to move the mouse to the correct \
position, and the element is in focus!
- When you move the mouse, make sure to move it to the middle of the element \
that you are looking at, taking the screen resolution into account.
- Avoid using \"Page Up\" or \"Page Down\" keys, as they might not work as \
expected. Instead use scrolling with the correct amount and direction.
- When you are gonna do a \"sensitive\" action, make sure to speak it before, \
to make the user aware of what you are going to do.
- If clicking does not work, take a screenshot and use the cursor position \
action to re-localize the mouse.
- If you are unsure about the action that the user is asking, stop \
immediately and ask for clarification before proceeding.
- Be brief and concise in your intermediate responses, and make sure to \
provide the user with the necessary information to proceed.
- In the end of each conversation, make sure to speak any follow-up \
questions or actions that the user might need to know.";

/// Assemble the full system prompt for one step.
///
/// Instruction text, the current date, then the whole rendered transcript
/// under a heading, so past conversations are always in context.
pub fn build_system_prompt(instructions: &str, now: DateTime<Utc>, transcript: &str) -> String {
    format!(
        "{instructions}\n\n- Today is {}.\n\n\
         ## Previous Conversations\n\n\
         Use the context below coming from past conversations to help the \
         user with their tasks.\n\n\
         {transcript}",
        now.format("%a %b %d %Y")
    )
}
