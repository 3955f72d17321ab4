//! Print the text content of a Miro frame and the frames nested in it.
//!
//! # Crate Structure
//!
//! - [`api`] — paginated items client (re-export of `miroframe-api`)
//! - [`config`] — token/board/frame resolution from environment and arguments
//! - [`text`] — best-effort HTML-to-plain-text reduction
//! - [`walk`] — depth-limited frame traversal and rendering

pub mod config;
pub mod text;
pub mod walk;

/// Re-export API client types.
pub mod api {
    pub use miroframe_api::*;
}

pub use config::{Config, ConfigError};
pub use walk::{ChildFrame, FrameWalker, WalkError, WalkSummary, DEFAULT_DEPTH};
