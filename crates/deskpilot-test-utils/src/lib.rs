//! Test helpers shared across Deskpilot crates.

pub mod audio;
pub mod desktop;
pub mod embedder;
pub mod events;
pub mod memory;
pub mod model;
pub mod transcriber;

pub use audio::{ScriptedAudioDevice, ScriptedAudioSource};
pub use desktop::{RecordingActuator, RecordingSpeech, StaticAppCatalog};
pub use embedder::{FailingEmbedder, KeywordEmbedder};
pub use events::CollectingSink;
pub use memory::InMemoryVectorStore;
pub use model::{FailingModel, ScriptedModel};
pub use transcriber::{FailingTranscriber, FixedTranscriber};
