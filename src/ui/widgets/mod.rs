// src/ui/widgets/mod.rs

// Declare all of our widget modules here so the `ui` module can compose them.

pub mod footer;   // The dynamic footer bar with key hints and errors.
pub mod input;    // The file path input field.
pub mod log_view; // The toggleable log panel.
pub mod preview;  // The drop target / image preview pane.
pub mod results;  // The prediction result pane.
pub mod samples;  // The selectable sample image list.
