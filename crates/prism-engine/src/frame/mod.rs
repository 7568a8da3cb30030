//! Frames-in-flight bookkeeping.
//!
//! Renderers keep one set of mutable GPU buffers per slot in a [`FramePipeline`]
//! so the CPU can record frame N+1 while the GPU still reads frame N. The
//! [`FrameGate`] bounds how far ahead the CPU may run.

mod gate;
mod pipeline;
mod ring;

pub use gate::{FrameGate, FramePermit};
pub use pipeline::{FramePipeline, FrameTicket};
pub use ring::FrameRing;

/// Ring depth used by the bundled renderers.
pub const DEFAULT_FRAMES_IN_FLIGHT: usize = 3;
