//! Scene renderer seam.
//!
//! A backend owns one raster surface and draws textured boxes through an orthographic camera.
//! The session creates it once, feeds it every frame of every block, and destroys it once.

mod cpu;

pub use cpu::CpuBackend;

use glam::{Mat4, Vec3};

use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{RenderError, RenderResult};
use crate::scene::CameraSpec;
use crate::texture::FaceMaterial;

/// A positioned box with per-face materials ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterializedElement {
    pub size: Vec3,
    pub transform: Mat4,
    pub draw_order: u32,
    /// Materials in `FaceSide::ALL` order; `None` faces are not drawn.
    pub faces: [Option<FaceMaterial>; 6],
}

pub trait RenderBackend {
    /// Draw one frame from scratch.
    fn render_frame(
        &mut self,
        elements: &[MaterializedElement],
        camera: &CameraSpec,
    ) -> RenderResult<FrameRGBA>;

    /// Release the render surface. Called once when the owning session ends.
    fn destroy(&mut self) {}
}

impl<B: RenderBackend + ?Sized> RenderBackend for Box<B> {
    fn render_frame(
        &mut self,
        elements: &[MaterializedElement],
        camera: &CameraSpec,
    ) -> RenderResult<FrameRGBA> {
        (**self).render_frame(elements, camera)
    }

    fn destroy(&mut self) {
        (**self).destroy();
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    #[default]
    Cpu,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSettings {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Orthographic half-height at zoom 1, in world units.
    pub distance: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            distance: 20.0,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::validation(format!(
                "render size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.distance.is_finite() || self.distance <= 0.0 {
            return Err(RenderError::validation(format!(
                "view distance must be positive, got {}",
                self.distance
            )));
        }
        Ok(())
    }
}

/// Create a render context. Failure here is fatal for the whole session.
pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> RenderResult<Box<dyn RenderBackend>> {
    settings.validate()?;
    match kind {
        BackendKind::Cpu => Ok(Box::new(CpuBackend::new(*settings))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/mod.rs"]
mod tests;
