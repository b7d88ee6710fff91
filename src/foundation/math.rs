use glam::Vec3;

/// Extent of a model cube along each axis, in model units.
pub(crate) const MODEL_UNITS: f32 = 16.0;

/// Convert a JSON `[x, y, z]` triple into a vector.
pub(crate) fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

/// Per-axis `to - from`.
pub(crate) fn size(from: [f32; 3], to: [f32; 3]) -> Vec3 {
    vec3(to) - vec3(from)
}

/// Euclidean length of a JSON triple.
pub(crate) fn magnitude(v: [f32; 3]) -> f32 {
    vec3(v).length()
}

/// Running CRC-32 (IEEE) over a chunk's type field followed by its payload.
pub(crate) fn chunk_crc(chunk_type: &[u8; 4], payload: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(payload);
    hasher.finalize()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
