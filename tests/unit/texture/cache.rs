use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use super::*;
use crate::archive::MemoryArchive;

fn png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba(color));
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    out
}

#[test]
fn decode_round_trips_pixels() {
    let img = decode_texture(&png(2, 3, [1, 2, 3, 4])).unwrap();
    assert_eq!(img.dimensions(), (2, 3));
    assert_eq!(img.get_pixel(1, 2).0, [1, 2, 3, 4]);
}

#[test]
fn decode_rejects_garbage() {
    assert!(decode_texture(b"not an image").is_err());
}

#[test]
fn loads_once_and_caches() {
    let mut archive = MemoryArchive::new();
    archive.insert(
        "assets/minecraft/textures/block/stone.png",
        png(16, 16, [100, 100, 100, 255]),
    );
    let mut cache = TextureCache::new("minecraft");

    let first = cache.get_or_load(&mut archive, "block/stone").unwrap();
    let reads = archive.reads();
    let second = cache.get_or_load(&mut archive, "block/stone").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(archive.reads(), reads);
    assert_eq!(cache.len(), 1);
    assert!(!first.is_animated());
}

#[test]
fn namespaced_reference_uses_its_namespace() {
    let mut archive = MemoryArchive::new();
    archive.insert(
        "assets/mymod/textures/block/ore.png",
        png(16, 16, [0, 0, 255, 255]),
    );
    let mut cache = TextureCache::new("minecraft");
    let asset = cache.get_or_load(&mut archive, "mymod:block/ore").unwrap();
    assert_eq!(asset.image.get_pixel(0, 0).0, [0, 0, 255, 255]);
}

#[test]
fn missing_texture_is_texture_not_found() {
    let mut archive = MemoryArchive::new();
    let mut cache = TextureCache::new("minecraft");
    let err = cache
        .get_or_load(&mut archive, "block/missing")
        .unwrap_err();
    assert!(matches!(
        err,
        RenderError::TextureNotFound(ref p) if p == "assets/minecraft/textures/block/missing.png"
    ));
    assert!(cache.is_empty());
}

#[test]
fn mcmeta_marks_filmstrip_animated() {
    let mut archive = MemoryArchive::new();
    archive
        .insert(
            "assets/minecraft/textures/block/water_still.png",
            png(16, 64, [0, 0, 200, 180]),
        )
        .insert(
            "assets/minecraft/textures/block/water_still.png.mcmeta",
            r#"{"animation":{"frametime":2}}"#,
        );
    let mut cache = TextureCache::new("minecraft");
    let asset = cache
        .get_or_load(&mut archive, "minecraft:block/water_still")
        .unwrap();
    assert!(asset.is_animated());
    assert_eq!(asset.cycle_ticks(), Some(8));
}

#[test]
fn unreadable_mcmeta_is_ignored() {
    let mut archive = MemoryArchive::new();
    archive
        .insert(
            "assets/minecraft/textures/block/odd.png",
            png(16, 32, [1, 1, 1, 255]),
        )
        .insert(
            "assets/minecraft/textures/block/odd.png.mcmeta",
            "{ not json",
        );
    let mut cache = TextureCache::new("minecraft");
    let asset = cache.get_or_load(&mut archive, "block/odd").unwrap();
    assert!(asset.animation.is_none());
    assert!(!asset.is_animated());
}
