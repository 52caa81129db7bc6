// fbxbatch-core/tests/codec_round_trip_tests.rs
//
// Encoding then decoding a batch must give back the same batch: same output
// directory, same files and clips in the same order, identical numbers.

use fbxbatch_core::notifications::{NullNotifier, RecordingNotifier};
use fbxbatch_core::{
    BatchDescriptor, ClipDescriptor, CollisionType, FileEntry, decode, encode, try_decode,
};
use pretty_assertions::assert_eq;

fn all_exist(_: &str) -> bool {
    true
}

fn encode_to_string(batch: &BatchDescriptor) -> String {
    let mut out = Vec::new();
    encode(batch, &mut out, &all_exist, &NullNotifier).expect("encode into memory");
    String::from_utf8(out).expect("utf-8 document")
}

fn scenario_batch() -> BatchDescriptor {
    let mut batch = BatchDescriptor::new("C:/out/");
    batch
        .add_file(
            "model.fbx",
            FileEntry::new(CollisionType::Convex)
                .with_clip("Walk", ClipDescriptor::new(0.0, 30.0, 24.0)),
        )
        .unwrap();
    batch
}

#[test]
fn test_scenario_encodes_schema_and_decodes_back() {
    let batch = scenario_batch();
    let document = encode_to_string(&batch);

    assert_eq!(document.matches("<FbxFile>").count(), 1);
    assert_eq!(document.matches("<AnimClip>").count(), 1);
    assert!(document.contains("<Output>C:/out/</Output>"));
    assert!(document.contains("<Filename>model.fbx</Filename>"));
    assert!(document.contains("<CollisionGeneration>Convex</CollisionGeneration>"));
    assert!(document.contains("<Name>Walk</Name>"));
    assert!(document.contains("<Keyframes Begin=\"0\" End=\"30\" FPS=\"24\"/>"));

    let notifier = RecordingNotifier::new();
    let decoded = decode(document.as_bytes(), &notifier);
    assert_eq!(decoded, batch);
    assert!(notifier.is_empty());
}

#[test]
fn test_round_trip_preserves_order_and_values() {
    let mut batch = BatchDescriptor::new("D:\\exports\\characters\\");
    batch
        .add_file(
            "D:\\assets\\zombie.fbx",
            FileEntry::new(CollisionType::Concave)
                .with_clip("Walk", ClipDescriptor::new(0.5, 30.0, 29.97))
                .with_clip("Attack", ClipDescriptor::new(31.0, 62.25, 23.976))
                .with_clip("Idle", ClipDescriptor::new(-5.0, 1e-3, 0.0)),
        )
        .unwrap();
    batch
        .add_file("D:\\assets\\crate.fbx", FileEntry::new(CollisionType::None))
        .unwrap();
    batch
        .add_file(
            "D:\\assets\\barrel & lid.fbx",
            FileEntry::new(CollisionType::Unset)
                .with_clip("Open <fast>", ClipDescriptor::new(0.0, 1.0 / 3.0, 60.0)),
        )
        .unwrap();
    batch
        .add_file("D:\\assets\\tree.fbx", FileEntry::new(CollisionType::Other("Sphere".into())))
        .unwrap();

    let decoded = try_decode(encode_to_string(&batch).as_bytes()).expect("decodes");
    assert_eq!(decoded, batch);

    let paths: Vec<&str> = decoded.files.keys().map(String::as_str).collect();
    assert_eq!(
        paths,
        vec![
            "D:\\assets\\zombie.fbx",
            "D:\\assets\\crate.fbx",
            "D:\\assets\\barrel & lid.fbx",
            "D:\\assets\\tree.fbx",
        ]
    );
    let clips: Vec<&str> = decoded
        .file("D:\\assets\\zombie.fbx")
        .unwrap()
        .clips
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(clips, vec!["Walk", "Attack", "Idle"]);
}

#[test]
fn test_locale_sensitive_values_round_trip_exactly() {
    let mut batch = BatchDescriptor::new("out/");
    batch
        .add_file(
            "clip.fbx",
            FileEntry::new(CollisionType::None)
                .with_clip("Exact", ClipDescriptor::new(0.5, 30.0, 29.97)),
        )
        .unwrap();

    let document = encode_to_string(&batch);
    assert!(document.contains("Begin=\"0.5\" End=\"30\" FPS=\"29.97\""));
    assert!(!document.contains("0,5"));

    let decoded = try_decode(document.as_bytes()).unwrap();
    let clip = decoded.file("clip.fbx").unwrap().clip("Exact").unwrap();
    assert_eq!(clip.begin_frame.to_bits(), 0.5f64.to_bits());
    assert_eq!(clip.end_frame.to_bits(), 30.0f64.to_bits());
    assert_eq!(clip.fps.to_bits(), 29.97f64.to_bits());
}

#[test]
fn test_empty_batch_round_trips() {
    let batch = BatchDescriptor::default();
    let document = encode_to_string(&batch);
    assert!(document.contains("<Output></Output>"));
    assert_eq!(try_decode(document.as_bytes()).unwrap(), batch);
}

#[test]
fn test_whitespace_in_paths_is_kept() {
    let mut batch = BatchDescriptor::new(" out dir/ ");
    batch
        .add_file("  spaced name.fbx", FileEntry::new(CollisionType::Convex))
        .unwrap();

    assert_eq!(try_decode(encode_to_string(&batch).as_bytes()).unwrap(), batch);
}

#[test]
fn test_whitespace_only_values_round_trip() {
    let mut batch = BatchDescriptor::new("   ");
    batch
        .add_file(
            " ",
            FileEntry::new(CollisionType::None)
                .with_clip(" ", ClipDescriptor::new(0.0, 1.0, 24.0))
                .with_clip("\t", ClipDescriptor::new(1.0, 2.0, 24.0)),
        )
        .unwrap();
    batch
        .add_file("  ", FileEntry::new(CollisionType::Other(" ".into())))
        .unwrap();

    let decoded = try_decode(encode_to_string(&batch).as_bytes()).expect("decodes");
    assert_eq!(decoded, batch);
    assert_eq!(decoded.output_dir, "   ");

    let paths: Vec<&str> = decoded.files.keys().map(String::as_str).collect();
    assert_eq!(paths, vec![" ", "  "]);
    let clips: Vec<&str> = decoded.file(" ").unwrap().clips.keys().map(String::as_str).collect();
    assert_eq!(clips, vec![" ", "\t"]);
}

#[test]
fn test_spelled_out_collision_tags_round_trip() {
    let mut batch = BatchDescriptor::new("out/");
    batch
        .add_file("a.fbx", FileEntry::new(CollisionType::Other("Convex".into())))
        .unwrap();
    batch
        .add_file("b.fbx", FileEntry::new(CollisionType::Other(String::new())))
        .unwrap();

    let decoded = try_decode(encode_to_string(&batch).as_bytes()).expect("decodes");
    assert_eq!(decoded, batch);
    assert_eq!(decoded.file("a.fbx").unwrap().collision_type.as_tag(), "Convex");
    assert_eq!(decoded.file("b.fbx").unwrap().collision_type, CollisionType::Unset);
}
