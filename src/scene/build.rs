use glam::{Mat4, Vec3};

use super::{CameraSpec, FaceBinding, GeometryInstruction, Scene, SceneOutcome, SkipReason};
use crate::foundation::math::{MODEL_UNITS, magnitude, size, vec3};
use crate::model::{Element, ElementRotation, FaceSide, FlattenedModel, Transform};

/// Added to the GUI rotation before placing the camera. Empirically matched to the in-game
/// inventory framing; treat as a calibration table, not a derivation.
pub const CAMERA_CALIBRATION_DEG: [f32; 3] = [15.0, 165.0, -45.0];

/// Radius of the camera placement sphere, in model units.
pub const CAMERA_DISTANCE: f32 = 16.0;

/// Model space spans `0..16`; rendering is centred on the origin.
pub const RECENTER_OFFSET: f32 = MODEL_UNITS / 2.0;

/// Turn a flattened model into draw instructions and a camera.
///
/// Skip checks run in order: GUI transform, elements, textures.
pub fn build_scene(model: &FlattenedModel) -> SceneOutcome {
    let Some(gui) = model.display.gui.as_ref() else {
        return SceneOutcome::Skip(SkipReason::NoGui);
    };
    if model.elements.is_empty() {
        return SceneOutcome::Skip(SkipReason::NoElement);
    }
    if model.textures.is_empty() {
        return SceneOutcome::Skip(SkipReason::NoTexture);
    }

    let elements = model
        .elements
        .iter()
        .enumerate()
        .map(|(i, element)| element_instruction(model, element, i as u32 + 1))
        .collect();

    SceneOutcome::Ready(Scene {
        block_name: model.block_name.clone(),
        elements,
        camera: camera_for(gui),
    })
}

/// Position one element and bind its faces.
pub fn element_instruction(
    model: &FlattenedModel,
    element: &Element,
    draw_order: u32,
) -> GeometryInstruction {
    let size = size(element.from, element.to);
    let center = (vec3(element.from) + vec3(element.to)) * 0.5 - Vec3::splat(RECENTER_OFFSET);

    let mut transform = Mat4::from_translation(center);
    if let Some(rotation) = element.rotation.as_ref() {
        if let Some(rotate) = axis_rotation(rotation) {
            let pivot = vec3(rotation.origin) - Vec3::splat(RECENTER_OFFSET);
            transform = Mat4::from_translation(pivot)
                * rotate
                * Mat4::from_translation(-pivot)
                * transform;
        }
    }

    tracing::debug!(
        block = %model.block_name,
        draw_order,
        ?size,
        ?center,
        "element"
    );

    let faces = std::array::from_fn(|i| {
        let side = FaceSide::ALL[i];
        let face = element.faces.as_ref()?.get(side)?;
        let Some(texture) = model.resolve_texture(&face.texture) else {
            tracing::debug!(
                block = %model.block_name,
                face = side.name(),
                reference = %face.texture,
                "face texture does not resolve"
            );
            return None;
        };
        Some(FaceBinding {
            side,
            texture,
            uv: face.uv,
            rotation: face.rotation.unwrap_or(0),
        })
    });

    GeometryInstruction {
        size,
        transform,
        draw_order,
        faces,
    }
}

/// Only `x` and `y` rotations are applied; anything else is left unrotated.
fn axis_rotation(rotation: &ElementRotation) -> Option<Mat4> {
    let angle = rotation.angle.to_radians();
    match rotation.axis.as_str() {
        "x" => Some(Mat4::from_rotation_x(angle)),
        "y" => Some(Mat4::from_rotation_y(angle)),
        other => {
            tracing::debug!(axis = other, "element rotation axis not applied");
            None
        }
    }
}

/// Camera placement for a GUI transform.
///
/// The eye sits at `sin(rotation + calibration) * CAMERA_DISTANCE` per axis, looks at the origin,
/// and is then shifted by the GUI translation without changing its direction.
pub fn camera_for(gui: &Transform) -> CameraSpec {
    let scale = magnitude(gui.scale());
    let zoom = if scale > f32::EPSILON {
        1.0 / scale
    } else {
        tracing::warn!("gui scale has zero length; using zoom 1");
        1.0
    };

    let angles = vec3(gui.rotation()) + vec3(CAMERA_CALIBRATION_DEG);
    let eye = Vec3::new(
        angles.x.to_radians().sin(),
        angles.y.to_radians().sin(),
        angles.z.to_radians().sin(),
    ) * CAMERA_DISTANCE;

    let direction = (-eye).try_normalize().unwrap_or(Vec3::NEG_Z);
    let up = if direction.cross(Vec3::Y).length_squared() > 1e-6 {
        Vec3::Y
    } else {
        Vec3::Z
    };

    CameraSpec {
        position: eye + vec3(gui.translation()),
        direction,
        up,
        zoom,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/build.rs"]
mod tests;
