//! Screen-space quantities shared by the device layer and renderers.

mod viewport;

pub use viewport::Viewport;
