//! Per-command data model shared by the core and its collaborators.

mod action;
mod notification;
mod outcome;
mod screenshot;
mod ui;

pub use action::*;
pub use notification::*;
pub use outcome::*;
pub use screenshot::*;
pub use ui::*;
