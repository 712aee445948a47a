//! Append-only conversation transcript.

use chrono::{DateTime, SecondsFormat, Utc};

/// One unit of transcript content, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// A conversation began with the given prompt.
    ConversationStart {
        at: DateTime<Utc>,
        prompt: String,
    },
    /// Verbatim model text.
    Text(String),
    /// One-line summary of a tool invocation.
    ToolActivity(String),
    /// The conversation finished.
    ConversationEnd,
}

/// Ordered log of everything said and done across conversations.
///
/// Append-only and memory-resident for the process lifetime; the rendered
/// form grows without bound and is re-sent to the model on every run.
#[derive(Debug, Default)]
pub struct Transcript {
    fragments: Vec<Fragment>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one fragment. Fragments are never reordered or removed.
    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Number of fragments appended so far.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Concatenate all fragments into the context string sent to the model.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for fragment in &self.fragments {
            match fragment {
                Fragment::ConversationStart { at, prompt } => {
                    out.push_str(&format!(
                        "--------------\nNew conversation started with prompt at {} with prompt: \"{}\"\n***\n",
                        at.to_rfc3339_opts(SecondsFormat::Millis, true),
                        prompt
                    ));
                }
                Fragment::Text(text) => out.push_str(text),
                Fragment::ToolActivity(summary) => {
                    out.push_str(&format!("\n[{summary}]\n"));
                }
                Fragment::ConversationEnd => out.push_str("***\n"),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{Fragment, Transcript};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn render_wraps_conversations_in_markers() {
        let mut transcript = Transcript::new();
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        transcript.push(Fragment::ConversationStart {
            at,
            prompt: "open notes".to_string(),
        });
        transcript.push(Fragment::Text("Opening the notes app".to_string()));
        transcript.push(Fragment::ToolActivity("Opening app \"notes\"".to_string()));
        transcript.push(Fragment::ConversationEnd);

        assert_eq!(
            transcript.render(),
            "--------------\n\
             New conversation started with prompt at 2025-03-14T09:26:53.000Z with prompt: \"open notes\"\n\
             ***\n\
             Opening the notes app\n\
             [Opening app \"notes\"]\n\
             ***\n"
        );
    }

    #[test]
    fn fragments_accumulate_across_conversations() {
        let mut transcript = Transcript::new();
        for prompt in ["first", "second"] {
            transcript.push(Fragment::ConversationStart {
                at: Utc::now(),
                prompt: prompt.to_string(),
            });
            transcript.push(Fragment::ConversationEnd);
        }
        assert_eq!(transcript.len(), 4);

        let rendered = transcript.render();
        assert_eq!(rendered.matches("New conversation started").count(), 2);
        assert_eq!(rendered.contains("\"first\""), true);
        assert_eq!(rendered.contains("\"second\""), true);
    }
}
