//! Prism engine crate.
//!
//! Transform math, the frames-in-flight pipeline, and the wgpu runtime and
//! renderers built on them.

pub mod math;
pub mod frame;
pub mod scene;

pub mod device;
pub mod window;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
