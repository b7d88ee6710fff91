use glam::Mat4;
use image::{Rgba, RgbaImage};

use super::*;

const SIZE: u32 = 40;

fn backend() -> CpuBackend {
    CpuBackend::new(RenderSettings {
        width: SIZE,
        height: SIZE,
        distance: 20.0,
    })
}

fn solid(color: [u8; 4]) -> FaceMaterial {
    FaceMaterial {
        image: RgbaImage::from_pixel(16, 16, Rgba(color)),
    }
}

fn cube(size: f32, at: Vec3, draw_order: u32, color: [u8; 4]) -> MaterializedElement {
    MaterializedElement {
        size: Vec3::splat(size),
        transform: Mat4::from_translation(at),
        draw_order,
        faces: std::array::from_fn(|_| Some(solid(color))),
    }
}

fn front_camera() -> CameraSpec {
    CameraSpec {
        position: Vec3::new(0.0, 0.0, 32.0),
        direction: Vec3::NEG_Z,
        up: Vec3::Y,
        zoom: 1.0,
    }
}

fn top_camera() -> CameraSpec {
    CameraSpec {
        position: Vec3::new(0.0, 32.0, 0.0),
        direction: Vec3::NEG_Y,
        up: Vec3::NEG_Z,
        zoom: 1.0,
    }
}

#[test]
fn front_face_covers_projected_square() {
    let mut b = backend();
    let frame = b
        .render_frame(&[cube(16.0, Vec3::ZERO, 1, [255, 0, 0, 255])], &front_camera())
        .unwrap();

    // Half-extent 8 of 20 maps to pixels 12..28.
    assert_eq!(frame.pixel(20, 20).unwrap()[3], 255);
    assert_eq!(frame.pixel(12, 12).unwrap()[3], 255);
    assert_eq!(frame.pixel(27, 27).unwrap()[3], 255);
    assert_eq!(frame.pixel(5, 5).unwrap(), [0, 0, 0, 0]);
    assert_eq!(frame.pixel(30, 20).unwrap(), [0, 0, 0, 0]);
    assert_eq!(frame.covered_pixels(), 16 * 16);
}

#[test]
fn faces_away_from_light_get_ambient_only() {
    let mut b = backend();
    let frame = b
        .render_frame(&[cube(16.0, Vec3::ZERO, 1, [255, 0, 0, 255])], &front_camera())
        .unwrap();
    assert_eq!(frame.pixel(20, 20).unwrap(), [89, 0, 0, 255]);
}

#[test]
fn lit_top_face_is_full_brightness() {
    let mut b = backend();
    let frame = b
        .render_frame(&[cube(16.0, Vec3::ZERO, 1, [200, 100, 50, 255])], &top_camera())
        .unwrap();
    assert_eq!(frame.pixel(20, 20).unwrap(), [200, 100, 50, 255]);
}

#[test]
fn zoom_scales_the_frustum() {
    let mut b = backend();
    let mut camera = front_camera();
    camera.zoom = 2.0;
    let frame = b
        .render_frame(&[cube(16.0, Vec3::ZERO, 1, [255, 0, 0, 255])], &camera)
        .unwrap();
    assert_eq!(frame.covered_pixels(), 32 * 32);
}

#[test]
fn nearer_box_wins_regardless_of_draw_order() {
    let red = [255, 0, 0, 255];
    let blue = [0, 0, 255, 255];
    for (big, small) in [(1, 2), (2, 1)] {
        let mut b = backend();
        let frame = b
            .render_frame(
                &[
                    cube(16.0, Vec3::ZERO, big, red),
                    cube(4.0, Vec3::new(0.0, 0.0, 10.0), small, blue),
                ],
                &front_camera(),
            )
            .unwrap();
        let center = frame.pixel(20, 20).unwrap();
        assert_eq!(center[0], 0, "draw orders {big}/{small}");
        assert!(center[2] > 0);
        assert_eq!(frame.pixel(13, 13).unwrap()[0], 89);
    }
}

#[test]
fn low_alpha_texels_are_discarded() {
    let mut b = backend();
    let frame = b
        .render_frame(&[cube(16.0, Vec3::ZERO, 1, [255, 0, 0, 40])], &front_camera())
        .unwrap();
    assert_eq!(frame.covered_pixels(), 0);
}

#[test]
fn translucent_texels_keep_straight_colour() {
    let mut b = backend();
    let frame = b
        .render_frame(&[cube(16.0, Vec3::ZERO, 1, [255, 0, 0, 128])], &front_camera())
        .unwrap();
    assert_eq!(frame.pixel(20, 20).unwrap(), [89, 0, 0, 128]);
}

#[test]
fn missing_faces_are_not_drawn() {
    let mut element = cube(16.0, Vec3::ZERO, 1, [255, 0, 0, 255]);
    element.faces[FaceSide::South.index()] = None;
    let mut b = backend();
    let frame = b.render_frame(&[element], &front_camera()).unwrap();
    // Back faces stay culled, so nothing is visible.
    assert_eq!(frame.covered_pixels(), 0);
}

#[test]
fn frames_do_not_leak_between_renders() {
    let mut b = backend();
    b.render_frame(&[cube(16.0, Vec3::ZERO, 1, [255, 0, 0, 255])], &front_camera())
        .unwrap();
    let empty = b.render_frame(&[], &front_camera()).unwrap();
    assert_eq!(empty.covered_pixels(), 0);
}

#[test]
fn destroyed_context_refuses_to_render() {
    let mut b = backend();
    b.destroy();
    b.destroy();
    assert!(b.is_destroyed());
    let err = b.render_frame(&[], &front_camera()).unwrap_err();
    assert!(matches!(err, RenderError::Backend(_)));
}
