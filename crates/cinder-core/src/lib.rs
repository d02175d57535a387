//! Cinder Core - Foundational types for the Cinder particle simulator
//!
//! This crate provides the types that all other Cinder crates depend on:
//! - `Color` - Normalized RGBA colour with interpolation and 8-bit packing
//! - Error types and Result alias

mod error;
mod types;

pub use error::{CinderError, Result};
pub use types::Color;
