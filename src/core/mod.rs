// src/core/mod.rs

// The `core` module holds everything that works without a terminal: the wire
// types, the upload pipeline, and the widget state machine driving both.

/// Data structures shared across the application: the selected file, the
/// `/predict` wire types, and the upload error taxonomy.
pub mod models;

/// Decodes submitted bytes into a terminal-friendly thumbnail.
pub mod preview;

/// The pluggable seam that turns the opaque result payload into something
/// displayable.
pub mod render;

/// Discovery of the bundled sample images.
pub mod samples;

/// The multipart POST to the prediction endpoint, with its error mapping.
pub mod uploader;

/// The upload interaction's state machine and the `UiPort` it drives.
pub mod widget;
