//! Join engine against real scratch trees.

use std::path::Path;

use marks_core::split::{SplitOptions, split};
use marks_core::{Decision, DiscrepancyKind, Error, join};
use marks_schema::Mark;
use marks_test_utils::{ScriptedResolver, TestTree, entry, mark, marks_at, storage};
use pretty_assertions::assert_eq;

#[test]
fn test_join_numbers_marks_across_directories_in_walk_order() {
    let tree = TestTree::new();
    tree.write_storage(
        "B/local.audipomark",
        &storage("", vec![entry("b.mp3", 2, marks_at(&[10, 20]))]),
    );
    tree.write_storage(
        "A/local.audipomark",
        &storage("", vec![entry("a.mp3", 1, marks_at(&[30, 40]))]),
    );

    let report = join(tree.root(), &mut ScriptedResolver::silent()).unwrap();

    assert_eq!(report.output, tree.path("global.audipomark"));
    assert_eq!(report.files, 2);
    assert_eq!(report.marks, 4);
    assert_eq!(
        tree.read_storage("global.audipomark"),
        storage(
            "",
            vec![
                entry("A/a.mp3", 1, vec![mark(1, 30), mark(2, 40)]),
                entry("B/b.mp3", 2, vec![mark(3, 10), mark(4, 20)]),
            ]
        )
    );
}

#[test]
fn test_join_excludes_root_local_storage() {
    let tree = TestTree::new();
    tree.write_storage("local.audipomark", &storage("", vec![entry("root.mp3", 1, marks_at(&[0]))]));
    tree.write_storage(
        "Deep/Er/local.audipomark",
        &storage("", vec![entry("x.mp3", 1, marks_at(&[0]))]),
    );

    let report = join(tree.root(), &mut ScriptedResolver::silent()).unwrap();

    assert_eq!(report.sources, vec![tree.path("Deep/Er/local.audipomark")]);
    assert_eq!(
        tree.read_storage("global.audipomark").files,
        vec![entry("Deep/Er/x.mp3", 1, vec![mark(1, 0)])]
    );
}

#[test]
fn test_join_empty_tree_writes_empty_storage() {
    let tree = TestTree::new();

    let report = join(tree.root(), &mut ScriptedResolver::silent()).unwrap();

    assert_eq!(report.files, 0);
    assert_eq!(tree.read_storage("global.audipomark"), storage("", vec![]));
}

#[test]
fn test_join_overwrites_previous_export() {
    let tree = TestTree::new();
    tree.write_storage("global.audipomark", &storage("/old", vec![entry("old.mp3", 1, vec![])]));

    join(tree.root(), &mut ScriptedResolver::silent()).unwrap();

    assert_eq!(tree.read_storage("global.audipomark"), storage("", vec![]));
}

#[test]
fn test_join_invalid_local_storage_can_be_ignored() {
    let tree = TestTree::new();
    tree.write_text("A/local.audipomark", r#"{"files": []}"#);
    tree.write_storage(
        "B/local.audipomark",
        &storage("", vec![entry("b.mp3", 2, marks_at(&[10]))]),
    );

    let mut resolver = ScriptedResolver::new([Decision::Proceed]);
    let report = join(tree.root(), &mut resolver).unwrap();

    assert_eq!(resolver.remaining(), 0);
    assert_eq!(resolver.asked[0].kind(), DiscrepancyKind::InvalidStorage);
    assert_eq!(report.ignored, vec![tree.path("A/local.audipomark")]);
    assert_eq!(
        tree.read_storage("global.audipomark").files,
        vec![entry("B/b.mp3", 2, vec![mark(1, 10)])]
    );
}

#[test]
fn test_join_invalid_local_storage_abort() {
    let tree = TestTree::new();
    tree.write_text("A/local.audipomark", "not json");

    let result = join(tree.root(), &mut ScriptedResolver::new([Decision::Abort]));

    assert!(matches!(result, Err(Error::Aborted)));
    tree.assert_not_exists("global.audipomark");
}

#[test]
fn test_join_missing_directory() {
    let tree = TestTree::new();
    let missing = tree.path("nope");

    let err = join(&missing, &mut ScriptedResolver::silent()).unwrap_err();

    assert!(matches!(err, Error::DirectoryNotFound { path } if path == missing));
}

#[test]
fn test_split_then_join_preserves_entries() {
    let tree = TestTree::new();
    tree.write_audio("Sync/A/one.mp3", 10);
    tree.write_audio("Sync/A/two.mp3", 20);
    tree.write_audio("Sync/B/C/three.mp3", 30);

    let mut tagged = mark(9, 4000);
    tagged.tag = Some("chorus".into());
    let flat = storage(
        "/sdcard",
        vec![
            entry("/sdcard/Sync/A/one.mp3", 10, vec![mark(4, 100), tagged.clone()]),
            entry("/sdcard/Sync/A/two.mp3", 20, marks_at(&[0])),
            entry("/sdcard/Sync/B/C/three.mp3", 30, marks_at(&[0, 9000])),
        ],
    );
    tree.write_storage("Sync/export.audipomark", &flat);

    split(
        &tree.path("Sync/export.audipomark"),
        Path::new("Sync"),
        SplitOptions::default(),
        &mut ScriptedResolver::silent(),
    )
    .unwrap();
    join(&tree.path("Sync"), &mut ScriptedResolver::silent()).unwrap();

    let joined = tree.read_storage("Sync/global.audipomark");
    assert_eq!(
        joined.files,
        vec![
            entry("A/one.mp3", 10, vec![mark(1, 100), Mark { id: 2, ..tagged }]),
            entry("A/two.mp3", 20, vec![mark(3, 0)]),
            entry("B/C/three.mp3", 30, vec![mark(4, 0), mark(5, 9000)]),
        ]
    );
    assert_eq!(joined.mark_count(), flat.mark_count());
}
