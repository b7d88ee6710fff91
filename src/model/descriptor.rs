use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One block model JSON document, as stored in the archive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Parent model reference (`namespace:path`, namespace optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Texture variables: name to texture path or `#other` indirection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textures: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambientocclusion: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gui_light: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<Display>,
    /// Cuboids making up the shape. Replaced wholesale by children, never merged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<Element>>,
}

/// Per-context display transforms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Display {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gui: Option<Transform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground: Option<Transform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed: Option<Transform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Transform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thirdperson_righthand: Option<Transform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thirdperson_lefthand: Option<Transform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstperson_righthand: Option<Transform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstperson_lefthand: Option<Transform>,
}

/// Rotation (degrees), translation and scale of a display context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<[f32; 3]>,
}

impl Transform {
    pub fn rotation(&self) -> [f32; 3] {
        self.rotation.unwrap_or([0.0; 3])
    }

    pub fn translation(&self) -> [f32; 3] {
        self.translation.unwrap_or([0.0; 3])
    }

    pub fn scale(&self) -> [f32; 3] {
        self.scale.unwrap_or([1.0; 3])
    }
}

/// One cuboid of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub from: [f32; 3],
    pub to: [f32; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<ElementRotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shade: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faces: Option<Faces>,
}

/// Rotation of an element about `origin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRotation {
    #[serde(default)]
    pub angle: f32,
    /// `x`, `y` or `z`.
    #[serde(default)]
    pub axis: String,
    #[serde(default = "ElementRotation::default_origin")]
    pub origin: [f32; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rescale: Option<bool>,
}

impl ElementRotation {
    fn default_origin() -> [f32; 3] {
        [8.0; 3]
    }
}

/// Which side of an element a face sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceSide {
    East,
    West,
    Up,
    Down,
    South,
    North,
}

impl FaceSide {
    /// Box-face order: +x, -x, +y, -y, +z, -z.
    pub const ALL: [FaceSide; 6] = [
        FaceSide::East,
        FaceSide::West,
        FaceSide::Up,
        FaceSide::Down,
        FaceSide::South,
        FaceSide::North,
    ];

    pub fn index(self) -> usize {
        match self {
            FaceSide::East => 0,
            FaceSide::West => 1,
            FaceSide::Up => 2,
            FaceSide::Down => 3,
            FaceSide::South => 4,
            FaceSide::North => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FaceSide::East => "east",
            FaceSide::West => "west",
            FaceSide::Up => "up",
            FaceSide::Down => "down",
            FaceSide::South => "south",
            FaceSide::North => "north",
        }
    }
}

/// Up to six named faces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Faces {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub north: Option<Face>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub south: Option<Face>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub east: Option<Face>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub west: Option<Face>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up: Option<Face>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down: Option<Face>,
}

impl Faces {
    pub fn get(&self, side: FaceSide) -> Option<&Face> {
        match side {
            FaceSide::East => self.east.as_ref(),
            FaceSide::West => self.west.as_ref(),
            FaceSide::Up => self.up.as_ref(),
            FaceSide::Down => self.down.as_ref(),
            FaceSide::South => self.south.as_ref(),
            FaceSide::North => self.north.as_ref(),
        }
    }
}

/// Texture binding of one element face.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Literal texture path or `#variable`.
    #[serde(default)]
    pub texture: String,
    /// `[u0, v0, u1, v1]` in model units (0-16). Whole texture when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uv: Option<[f32; 4]>,
    /// Clockwise texture rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<i32>,
    /// Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cullface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tintindex: Option<i32>,
}

impl ModelDescriptor {
    /// Merge `self` (the child) over an already flattened `parent`.
    ///
    /// Scalars and arrays from the child win; texture variables and display transforms merge
    /// key-wise. The result carries no `parent` reference.
    pub fn merged_over(self, parent: ModelDescriptor) -> ModelDescriptor {
        ModelDescriptor {
            parent: None,
            textures: merge_maps(parent.textures, self.textures),
            ambientocclusion: self.ambientocclusion.or(parent.ambientocclusion),
            gui_light: self.gui_light.or(parent.gui_light),
            display: merge_with(parent.display, self.display, Display::merged_over),
            elements: self.elements.or(parent.elements),
        }
    }
}

impl Display {
    fn merged_over(self, parent: Display) -> Display {
        Display {
            gui: merge_with(parent.gui, self.gui, Transform::merged_over),
            ground: merge_with(parent.ground, self.ground, Transform::merged_over),
            fixed: merge_with(parent.fixed, self.fixed, Transform::merged_over),
            head: merge_with(parent.head, self.head, Transform::merged_over),
            thirdperson_righthand: merge_with(
                parent.thirdperson_righthand,
                self.thirdperson_righthand,
                Transform::merged_over,
            ),
            thirdperson_lefthand: merge_with(
                parent.thirdperson_lefthand,
                self.thirdperson_lefthand,
                Transform::merged_over,
            ),
            firstperson_righthand: merge_with(
                parent.firstperson_righthand,
                self.firstperson_righthand,
                Transform::merged_over,
            ),
            firstperson_lefthand: merge_with(
                parent.firstperson_lefthand,
                self.firstperson_lefthand,
                Transform::merged_over,
            ),
        }
    }
}

impl Transform {
    fn merged_over(self, parent: Transform) -> Transform {
        Transform {
            rotation: self.rotation.or(parent.rotation),
            translation: self.translation.or(parent.translation),
            scale: self.scale.or(parent.scale),
        }
    }
}

fn merge_with<T>(parent: Option<T>, child: Option<T>, merge: fn(T, T) -> T) -> Option<T> {
    match (parent, child) {
        (Some(p), Some(c)) => Some(merge(c, p)),
        (p, c) => c.or(p),
    }
}

fn merge_maps(
    parent: Option<BTreeMap<String, String>>,
    child: Option<BTreeMap<String, String>>,
) -> Option<BTreeMap<String, String>> {
    merge_with(parent, child, |mut child, mut parent| {
        parent.append(&mut child);
        parent
    })
}

#[cfg(test)]
#[path = "../../tests/unit/model/descriptor.rs"]
mod tests;
