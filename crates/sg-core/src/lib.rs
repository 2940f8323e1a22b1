/// Types, parsing and layout logic for signscii.
///
/// This crate holds the glyph library, the paginator and the renderer,
/// plus the configuration shared across the signscii workspace.

pub mod config;
pub mod error;
pub mod library;
pub mod paginate;
pub mod render;
pub mod sanitize;

pub use config::{OutputFormat, SignConfig};
pub use error::CoreError;
pub use library::{Glyph, Library};
pub use paginate::Page;
pub use render::{RenderOptions, RenderedPage, Renderer};
