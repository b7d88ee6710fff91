use glam::{Vec2, Vec3};

use super::{MaterializedElement, RenderBackend, RenderSettings};
use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{RenderError, RenderResult};
use crate::model::FaceSide;
use crate::scene::CameraSpec;
use crate::texture::FaceMaterial;

/// Texels with alpha below this (0.2) are discarded.
const ALPHA_CUTOFF: u8 = 51;
const LIGHT_POSITION: Vec3 = Vec3::new(15.0, 20.0, -10.0);
const LIGHT_INTENSITY: f32 = 1.2;
const AMBIENT: f32 = 0.35;
const NEAR: f32 = 0.01;
const FAR: f32 = 20_000.0;
/// Barycentric slack so pixels on a shared triangle edge are never dropped by both sides.
const EDGE_EPSILON: f32 = 1e-4;
/// Coplanar fragments within this depth of an earlier one are treated as occluded.
const DEPTH_EPSILON: f32 = 1e-3;

/// Software rasterizer. Colour is accumulated premultiplied and written out straight.
pub struct CpuBackend {
    settings: RenderSettings,
    color: Vec<[f32; 4]>,
    depth: Vec<f32>,
    destroyed: bool,
}

impl CpuBackend {
    pub fn new(settings: RenderSettings) -> Self {
        let len = settings.width as usize * settings.height as usize;
        Self {
            settings,
            color: vec![[0.0; 4]; len],
            depth: vec![f32::INFINITY; len],
            destroyed: false,
        }
    }

    pub fn settings(&self) -> RenderSettings {
        self.settings
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn clear(&mut self) {
        self.color.fill([0.0; 4]);
        self.depth.fill(f32::INFINITY);
    }

    fn draw_face(&mut self, face: &ScreenFace<'_>) {
        let [a, b, c, d] = face.corners;
        let [ua, ub, uc, ud] = FACE_UVS;
        self.draw_triangle(face, [a, b, c], [ua, ub, uc]);
        self.draw_triangle(face, [a, c, d], [ua, uc, ud]);
    }

    fn draw_triangle(&mut self, face: &ScreenFace<'_>, p: [Vec3; 3], uv: [Vec2; 3]) {
        let area = edge(p[0], p[1], p[2].truncate());
        if area.abs() < 1e-9 {
            return;
        }
        let w = self.settings.width as i64;
        let h = self.settings.height as i64;
        let min_x = p.iter().map(|v| v.x).fold(f32::INFINITY, f32::min).floor() as i64;
        let max_x = p.iter().map(|v| v.x).fold(f32::NEG_INFINITY, f32::max).ceil() as i64;
        let min_y = p.iter().map(|v| v.y).fold(f32::INFINITY, f32::min).floor() as i64;
        let max_y = p.iter().map(|v| v.y).fold(f32::NEG_INFINITY, f32::max).ceil() as i64;

        for y in min_y.max(0)..max_y.min(h) {
            for x in min_x.max(0)..max_x.min(w) {
                let s = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(p[1], p[2], s) / area;
                let w1 = edge(p[2], p[0], s) / area;
                let w2 = edge(p[0], p[1], s) / area;
                if w0 < -EDGE_EPSILON || w1 < -EDGE_EPSILON || w2 < -EDGE_EPSILON {
                    continue;
                }
                let z = w0 * p[0].z + w1 * p[1].z + w2 * p[2].z;
                if !(NEAR..=FAR).contains(&z) {
                    continue;
                }
                let i = (y * w + x) as usize;
                if z >= self.depth[i] - DEPTH_EPSILON {
                    continue;
                }
                let t = uv[0] * w0 + uv[1] * w1 + uv[2] * w2;
                let texel = face.material.sample(t.x, t.y);
                if texel[3] < ALPHA_CUTOFF {
                    continue;
                }
                self.depth[i] = z;
                blend_over(&mut self.color[i], texel, face.shade);
            }
        }
    }

    fn to_frame(&self) -> RenderResult<FrameRGBA> {
        let mut data = Vec::with_capacity(self.color.len() * 4);
        for px in &self.color {
            let a = px[3];
            if a <= 0.0 {
                data.extend_from_slice(&[0, 0, 0, 0]);
                continue;
            }
            for c in &px[..3] {
                data.push(to_u8(c / a));
            }
            data.push(to_u8(a));
        }
        FrameRGBA::from_raw(self.settings.width, self.settings.height, data)
    }
}

impl RenderBackend for CpuBackend {
    fn render_frame(
        &mut self,
        elements: &[MaterializedElement],
        camera: &CameraSpec,
    ) -> RenderResult<FrameRGBA> {
        if self.destroyed {
            return Err(RenderError::backend("render context already destroyed"));
        }
        self.clear();

        let width = self.settings.width as f32;
        let height = self.settings.height as f32;
        let zoom = if camera.zoom > 0.0 { camera.zoom } else { 1.0 };
        let half_h = self.settings.distance / zoom;
        let half_w = half_h * width / height;
        let view = camera.view_matrix();
        let light = LIGHT_POSITION.normalize();

        let mut ordered: Vec<&MaterializedElement> = elements.iter().collect();
        ordered.sort_by_key(|e| e.draw_order);

        for element in ordered {
            let half = element.size * 0.5;
            for (side, material) in FaceSide::ALL.iter().zip(&element.faces) {
                let Some(material) = material else {
                    continue;
                };
                let normal = element
                    .transform
                    .transform_vector3(side_normal(*side))
                    .normalize_or_zero();
                if normal.dot(camera.direction) >= 0.0 {
                    continue;
                }
                let corners = face_corners(*side, half).map(|local| {
                    let world = element.transform.transform_point3(local);
                    let v = view.transform_point3(world);
                    Vec3::new(
                        (v.x / half_w * 0.5 + 0.5) * width,
                        (0.5 - v.y / half_h * 0.5) * height,
                        -v.z,
                    )
                });
                let shade = (AMBIENT + LIGHT_INTENSITY * normal.dot(light).max(0.0)).min(1.0);
                self.draw_face(&ScreenFace {
                    corners,
                    material,
                    shade,
                });
            }
        }

        self.to_frame()
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.color = Vec::new();
        self.depth = Vec::new();
        tracing::debug!("cpu render context destroyed");
    }
}

struct ScreenFace<'a> {
    /// Screen x, y and view depth, in top-left, top-right, bottom-right, bottom-left order.
    corners: [Vec3; 4],
    material: &'a FaceMaterial,
    shade: f32,
}

const FACE_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

fn side_normal(side: FaceSide) -> Vec3 {
    match side {
        FaceSide::East => Vec3::X,
        FaceSide::West => Vec3::NEG_X,
        FaceSide::Up => Vec3::Y,
        FaceSide::Down => Vec3::NEG_Y,
        FaceSide::South => Vec3::Z,
        FaceSide::North => Vec3::NEG_Z,
    }
}

/// Box face corners as seen from outside, texture top-left first.
#[rustfmt::skip]
fn face_corners(side: FaceSide, h: Vec3) -> [Vec3; 4] {
    let v = Vec3::new;
    match side {
        FaceSide::East => [v(h.x, h.y, h.z), v(h.x, h.y, -h.z), v(h.x, -h.y, -h.z), v(h.x, -h.y, h.z)],
        FaceSide::West => [v(-h.x, h.y, -h.z), v(-h.x, h.y, h.z), v(-h.x, -h.y, h.z), v(-h.x, -h.y, -h.z)],
        FaceSide::Up => [v(-h.x, h.y, -h.z), v(h.x, h.y, -h.z), v(h.x, h.y, h.z), v(-h.x, h.y, h.z)],
        FaceSide::Down => [v(-h.x, -h.y, h.z), v(h.x, -h.y, h.z), v(h.x, -h.y, -h.z), v(-h.x, -h.y, -h.z)],
        FaceSide::South => [v(-h.x, h.y, h.z), v(h.x, h.y, h.z), v(h.x, -h.y, h.z), v(-h.x, -h.y, h.z)],
        FaceSide::North => [v(h.x, h.y, -h.z), v(-h.x, h.y, -h.z), v(-h.x, -h.y, -h.z), v(h.x, -h.y, -h.z)],
    }
}

fn edge(a: Vec3, b: Vec3, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

fn blend_over(dst: &mut [f32; 4], texel: [u8; 4], shade: f32) {
    let a = f32::from(texel[3]) / 255.0;
    let inv = 1.0 - a;
    for c in 0..3 {
        let src = f32::from(texel[c]) / 255.0 * shade * a;
        dst[c] = src + dst[c] * inv;
    }
    dst[3] = a + dst[3] * inv;
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
