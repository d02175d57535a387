//! Cinder Runtime - Frame loop infrastructure
//!
//! Provides the building blocks the host application drives once per frame:
//! - `FrameClock`: wall-clock elapsed/delta tracking
//! - `RuntimeSystem`: trait for systems ticked by the frame loop

mod clock;
mod system;

pub use clock::FrameClock;
pub use system::RuntimeSystem;
