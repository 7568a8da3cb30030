//! Contracts between the runtime loop and applications.
//!
//! The runtime owns the window and GPU; an [`App`] sees them only through the
//! per-frame [`FrameCtx`] and the shutdown hook.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
