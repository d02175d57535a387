//! Renderer seam: what the simulation hands over each frame

use crate::camera::Camera;
use crate::compact::DrawBuffer;
use crate::preset::PresetConfig;
use cinder_core::{Color, Result};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Display options that do not affect the simulation
///
/// Each preset carries its own; selecting a preset applies them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Global opacity multiplier
    pub alpha: f32,
    /// Draw billboard outlines instead of soft sprites
    pub show_quads: bool,
    pub clear_color: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            show_quads: false,
            clear_color: Color::new(0.2, 0.2, 0.2, 1.0),
        }
    }
}

/// Everything one instanced draw needs
pub struct DrawFrame<'a> {
    /// Instances in back-to-front order
    pub buffer: &'a DrawBuffer,
    pub live_count: usize,
    pub capacity: usize,
    pub view_projection: Mat4,
    pub camera_right: Vec3,
    pub camera_up: Vec3,
    /// Source of the size and fuzz ramps
    pub preset: &'a PresetConfig,
    pub settings: &'a RenderSettings,
}

impl<'a> DrawFrame<'a> {
    pub fn new(
        buffer: &'a DrawBuffer,
        capacity: usize,
        camera: &Camera,
        preset: &'a PresetConfig,
        settings: &'a RenderSettings,
    ) -> Self {
        let (camera_right, camera_up) = camera.billboard_axes();
        Self {
            buffer,
            live_count: buffer.len(),
            capacity,
            view_projection: camera.view_projection(),
            camera_right,
            camera_up,
            preset,
            settings,
        }
    }
}

/// Consumes compacted particle data; one call per displayed frame
pub trait Renderer {
    fn draw(&mut self, frame: &DrawFrame<'_>) -> Result<()>;
}

/// Renderer that records frame statistics instead of drawing
#[derive(Debug, Default, Clone)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub instances_drawn: u64,
    pub peak_instances: usize,
    pub last_instances: usize,
    pub bytes_uploaded: u64,
}

impl Renderer for HeadlessRenderer {
    fn draw(&mut self, frame: &DrawFrame<'_>) -> Result<()> {
        let buffer = frame.buffer;
        self.frames += 1;
        self.instances_drawn += frame.live_count as u64;
        self.peak_instances = self.peak_instances.max(frame.live_count);
        self.last_instances = frame.live_count;
        self.bytes_uploaded += (buffer.position_bytes().len()
            + buffer.size_bytes().len()
            + buffer.color_bytes().len()
            + buffer.life_bytes().len()
            + buffer.initial_life_bytes().len()) as u64;
        Ok(())
    }
}
