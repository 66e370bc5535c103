//! Text-generation providers, response cleanup and prompt construction.

pub mod anthropic;
pub mod fence;
pub mod gemini;
mod http;
pub mod json;
pub mod openai;
pub mod prompt;
pub mod router;

pub use fence::strip_fence;
pub use json::{PrSummary, parse_pr_summary};
pub use prompt::ArtifactKind;
pub use router::{Provider, ProviderHandle, TextGenerator, resolve, resolve_with};

/// Fixed sampling temperature for every backend; determinism over creativity.
pub const TEMPERATURE: f32 = 0.3;
