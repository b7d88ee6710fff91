use serde_json::json;

use super::*;
use crate::archive::MemoryArchive;

fn archive() -> MemoryArchive {
    let mut a = MemoryArchive::new();
    a.insert_json(
        "assets/minecraft/models/block/block.json",
        &json!({
            "gui_light": "side",
            "display": {
                "gui": { "rotation": [30, 225, 0], "translation": [0, 0, 0], "scale": [0.625, 0.625, 0.625] }
            }
        }),
    )
    .insert_json(
        "assets/minecraft/models/block/cube.json",
        &json!({
            "parent": "block/block",
            "elements": [{
                "from": [0, 0, 0], "to": [16, 16, 16],
                "faces": {
                    "down": { "texture": "#down" }, "up": { "texture": "#up" },
                    "north": { "texture": "#north" }, "south": { "texture": "#south" },
                    "west": { "texture": "#west" }, "east": { "texture": "#east" }
                }
            }]
        }),
    )
    .insert_json(
        "assets/minecraft/models/block/cube_all.json",
        &json!({
            "parent": "block/cube",
            "textures": {
                "particle": "#all", "down": "#all", "up": "#all",
                "north": "#all", "east": "#all", "south": "#all", "west": "#all"
            }
        }),
    )
    .insert_json(
        "assets/minecraft/models/block/stone.json",
        &json!({ "parent": "minecraft:block/cube_all", "textures": { "all": "minecraft:block/stone" } }),
    )
    .insert_json(
        "assets/minecraft/models/block/granite.json",
        &json!({ "parent": "block/cube_all", "textures": { "all": "block/granite" } }),
    )
    .insert_json(
        "assets/minecraft/models/block/loop_a.json",
        &json!({ "parent": "block/loop_b" }),
    )
    .insert_json(
        "assets/minecraft/models/block/loop_b.json",
        &json!({ "parent": "minecraft:loop_a" }),
    )
    .insert_json(
        "assets/minecraft/models/block/self_ref.json",
        &json!({ "parent": "block/self_ref" }),
    )
    .insert_json(
        "assets/minecraft/models/block/orphan.json",
        &json!({ "parent": "block/does_not_exist" }),
    );
    a
}

#[test]
fn resolve_merges_transitively() {
    let mut lib = ModelLibrary::new(archive());
    let m = lib.resolve("minecraft:stone").unwrap();

    assert_eq!(m.block_name, "minecraft:stone");
    assert_eq!(
        m.parents,
        vec![
            "block/block".to_string(),
            "block/cube".to_string(),
            "minecraft:block/cube_all".to_string(),
        ]
    );
    assert_eq!(m.elements.len(), 1);
    assert_eq!(m.gui_light.as_deref(), Some("side"));
    assert!(m.display.gui.is_some());
    assert_eq!(m.textures["all"], "minecraft:block/stone");
    assert_eq!(
        m.resolve_texture("#north").as_deref(),
        Some("minecraft:block/stone")
    );
}

#[test]
fn resolve_is_idempotent() {
    let mut lib = ModelLibrary::new(archive());
    let a = lib.resolve("stone").unwrap();
    let b = lib.resolve("stone").unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_vec(&a).unwrap(),
        serde_json::to_vec(&b).unwrap()
    );
}

#[test]
fn shared_ancestors_are_read_once() {
    let mut lib = ModelLibrary::new(archive());
    lib.resolve("stone").unwrap();
    let reads_after_first = lib.archive_mut().reads();
    assert_eq!(reads_after_first, 4);

    lib.resolve("granite").unwrap();
    assert_eq!(lib.archive_mut().reads(), reads_after_first + 1);
    assert_eq!(lib.cached_descriptors(), 5);
}

#[test]
fn missing_model_reports_path() {
    let mut lib = ModelLibrary::new(archive());
    let err = lib.resolve("minecraft:nope").unwrap_err();
    match err {
        RenderError::ModelNotFound(path) => {
            assert_eq!(path, "assets/minecraft/models/block/nope.json")
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = lib.resolve("orphan").unwrap_err();
    assert!(matches!(err, RenderError::ModelNotFound(p) if p.ends_with("does_not_exist.json")));
}

#[test]
fn parent_cycles_fail_cleanly() {
    let mut lib = ModelLibrary::new(archive());
    assert!(matches!(
        lib.resolve("loop_a").unwrap_err(),
        RenderError::ParentCycle(_)
    ));
    let err = lib.resolve("self_ref").unwrap_err();
    let RenderError::ParentCycle(chain) = err else {
        panic!("expected a parent cycle");
    };
    assert_eq!(
        chain,
        "minecraft:block/self_ref -> minecraft:block/self_ref"
    );
}

#[test]
fn block_names_lists_json_entries() {
    let mut lib = ModelLibrary::new(archive());
    let names = lib.block_names("minecraft").unwrap();
    assert_eq!(names.len(), 9);
    assert_eq!(names[0], "minecraft:block");
    assert!(names.contains(&"minecraft:stone".to_string()));
    assert!(lib.block_names("other").unwrap().is_empty());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let mut a = MemoryArchive::new();
    a.insert("assets/minecraft/models/block/bad.json", "{ nope");
    let mut lib = ModelLibrary::new(a);
    assert!(matches!(lib.resolve("bad").unwrap_err(), RenderError::Serde(_)));
}

#[test]
fn block_list_resolves_every_model_or_fails() {
    let mut a = MemoryArchive::new();
    a.insert_json(
        "assets/minecraft/models/block/base.json",
        &json!({ "textures": { "all": "block/stone" } }),
    )
    .insert_json(
        "assets/minecraft/models/block/child.json",
        &json!({ "parent": "block/base" }),
    );
    let mut lib = ModelLibrary::new(a);
    let models = lib.block_list("minecraft").unwrap();
    assert_eq!(models.len(), 2);
    assert_eq!(models[1].parents, vec!["block/base".to_string()]);

    let mut looping = ModelLibrary::new(archive());
    assert!(looping.block_list("minecraft").is_err());
}
