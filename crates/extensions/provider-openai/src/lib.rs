//! OpenAI-compatible chat completions provider for voxnav.

mod api;
mod provider;
mod stream;

pub use provider::OpenAIProvider;
