//! Model prompt composition.

use voxnav_protocols::ActionRequest;

const INSTRUCTIONS: &str = "You are a browser automation assistant. Based on the following list of \
UI elements extracted from a browser screenshot and the user's command, determine the single \
action to perform. Return only a JSON object with the following keys:\n\
  - 'action': one of 'click', 'open', 'type', 'scroll', 'change'.\n\
  - 'target': the target element description, the URL to open, or the scroll direction ('up' or 'down').\n\
  - 'value': the text to type, or 'next' / 'previous' when changing tabs.\n\
  - 'position': an object with 'x' and 'y' coordinates (ideally the center of the UI element's \
bounding box) where the action should occur.\n\n\
If the command cannot be executed, return a JSON object with an 'error' key containing a short \
error message (under 100 characters).";

/// Builds the prompt sent to the language model.
///
/// Pure string composition: element truncation already happened upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionRequestBuilder;

impl ActionRequestBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, request: &ActionRequest) -> String {
        let elements: Vec<String> = request.ui_summary.iter().map(ToString::to_string).collect();

        format!(
            "{}\n\nUser Command: \"{}\"\n\nUI Elements:\n{}",
            INSTRUCTIONS,
            request.command_text,
            elements.join("\n")
        )
    }
}
