//! # voxnav Core
//!
//! Turns a spoken command plus a snapshot of on-screen text into one validated
//! action, executes it through simulated input, and reports the result.
//!
//! Stages, in pipeline order:
//! 1. [`UIElementExtractor`] - OCR fragments to a bounded [`UIElementSummary`]
//! 2. [`ActionRequestBuilder`] - command and summary to a model prompt
//! 3. [`parse_response`] - raw model text to an [`ActionDescriptor`] or [`ActionError`]
//! 4. [`ActionDispatcher`] - descriptor to one input side effect and an [`ExecutionOutcome`]
//! 5. [`ResultReporter`] - outcome to exactly one [`Notification`]
//!
//! [`CommandPipeline`] wires the stages to the collaborators.
//!
//! [`UIElementSummary`]: voxnav_protocols::UIElementSummary
//! [`ActionDescriptor`]: voxnav_protocols::ActionDescriptor
//! [`ActionError`]: voxnav_protocols::ActionError
//! [`ExecutionOutcome`]: voxnav_protocols::ExecutionOutcome
//! [`Notification`]: voxnav_protocols::Notification

pub mod direction;
pub mod dispatcher;
pub mod error;
pub mod extractor;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod reporter;

#[cfg(test)]
mod test_support;

pub use direction::{ScrollClassification, TabClassification, classify_scroll_direction, classify_tab_direction};
pub use dispatcher::ActionDispatcher;
pub use error::PipelineError;
pub use extractor::UIElementExtractor;
pub use parser::parse_response;
pub use pipeline::{Collaborators, CommandPipeline, CycleReport};
pub use prompt::ActionRequestBuilder;
pub use reporter::{CycleOutcome, ResultReporter};
