//! Error types for the collaborator interfaces.

mod capture;
mod input;
mod notify;
mod ocr;
mod provider;
mod speech;

pub use capture::*;
pub use input::*;
pub use notify::*;
pub use ocr::*;
pub use provider::*;
pub use speech::*;
