//! Runtime system trait

use crate::FrameClock;
use cinder_core::Result;

/// A system that can be ticked by the frame loop
///
/// `update` runs exactly once per displayed frame, after the clock has been
/// advanced. All work inside one update happens on the calling thread.
pub trait RuntimeSystem {
    /// Called once before the first frame
    fn initialize(&mut self) -> Result<()>;

    /// Called once per frame
    fn update(&mut self, clock: &FrameClock) -> Result<()>;

    /// Called when the system is being shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
