//! Transform pipeline: flattened model in, positioned geometry and a camera out.

mod build;

pub use build::{
    CAMERA_CALIBRATION_DEG, CAMERA_DISTANCE, RECENTER_OFFSET, build_scene, camera_for,
    element_instruction,
};

use std::fmt;

use glam::{Mat4, Vec3};

use crate::model::FaceSide;

/// Why a model produced no image. Not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// No `display.gui` transform anywhere in the chain.
    NoGui,
    /// No elements anywhere in the chain.
    NoElement,
    /// No texture variables anywhere in the chain.
    NoTexture,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::NoGui => "no gui",
            SkipReason::NoElement => "no element",
            SkipReason::NoTexture => "no texture",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Material binding for one face of a box, with the texture reference already resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceBinding {
    pub side: FaceSide,
    /// Literal texture id, e.g. `minecraft:block/stone`.
    pub texture: String,
    /// `[u0, v0, u1, v1]` in model units.
    pub uv: Option<[f32; 4]>,
    /// Clockwise rotation in degrees.
    pub rotation: i32,
}

/// One box to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryInstruction {
    /// Box extent per axis, centred on its local origin.
    pub size: Vec3,
    /// Local-to-world transform (recentering, then pivot rotation).
    pub transform: Mat4,
    /// Strictly increasing in element order, starting at 1.
    pub draw_order: u32,
    /// Face bindings in box order (`FaceSide::ALL`).
    pub faces: [Option<FaceBinding>; 6],
}

/// Orthographic camera placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSpec {
    /// Eye position in world space.
    pub position: Vec3,
    /// Unit view direction.
    pub direction: Vec3,
    /// Up hint for the view basis.
    pub up: Vec3,
    /// Zoom factor applied to the orthographic frustum.
    pub zoom: f32,
}

impl CameraSpec {
    /// World-to-view matrix (right-handed, looking down `-z`).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.direction, self.up)
    }
}

/// Everything a backend needs to draw one block, minus materials.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub block_name: String,
    pub elements: Vec<GeometryInstruction>,
    pub camera: CameraSpec,
}

/// Result of [`build_scene`].
#[derive(Clone, Debug, PartialEq)]
pub enum SceneOutcome {
    Ready(Scene),
    Skip(SkipReason),
}
