//! Split engine against real scratch trees.

use std::path::Path;

use marks_core::join::join;
use marks_core::split::{SplitOptions, split};
use marks_core::{Decision, Discrepancy, DiscrepancyKind, Error};
use marks_test_utils::{ScriptedResolver, TestTree, entry, mark, marks_at, storage};
use pretty_assertions::assert_eq;

const INPUT: &str = "sync.audipomark";

fn run(tree: &TestTree, normalize: bool, resolver: &mut ScriptedResolver) -> marks_core::Result<marks_core::SplitReport> {
    split(
        &tree.path(INPUT),
        Path::new("Sync"),
        SplitOptions { normalize },
        resolver,
    )
}

#[test]
fn test_split_rebases_device_paths_into_working_dir() {
    let tree = TestTree::new();
    tree.write_audio("A/song.mp3", 1000);
    tree.write_storage(
        INPUT,
        &storage(
            "/sdcard",
            vec![entry("/sdcard/Sync/A/song.mp3", 1000, vec![mark(1, 500)])],
        ),
    );

    let mut resolver = ScriptedResolver::silent();
    let report = run(&tree, false, &mut resolver).unwrap();

    assert_eq!(report.written, vec![tree.path("A/local.audipomark")]);
    assert_eq!(
        tree.read_storage("A/local.audipomark"),
        storage("", vec![entry("song.mp3", 1000, vec![mark(1, 500)])])
    );
    assert!(resolver.asked.is_empty());
}

#[test]
fn test_split_renumbers_across_group_and_normalizes() {
    let tree = TestTree::new();
    tree.write_audio("A/one.mp3", 10);
    tree.write_audio("A/two.mp3", 20);
    tree.write_audio("B/three.mp3", 30);
    tree.write_storage(
        INPUT,
        &storage(
            "",
            vec![
                entry("A/one.mp3", 10, marks_at(&[0, 500, 1600])),
                entry("B/three.mp3", 30, marks_at(&[100])),
                entry("A/two.mp3", 20, marks_at(&[200, 5000])),
            ],
        ),
    );

    let report = run(&tree, true, &mut ScriptedResolver::silent()).unwrap();

    assert_eq!(
        report.written,
        vec![tree.path("A/local.audipomark"), tree.path("B/local.audipomark")]
    );
    assert_eq!(report.kept_files, 3);
    assert_eq!(report.marks, 5);
    assert_eq!(
        tree.read_storage("A/local.audipomark").files,
        vec![
            entry("one.mp3", 10, vec![mark(1, 0), mark(2, 1600)]),
            entry("two.mp3", 20, vec![mark(3, 200), mark(4, 5000)]),
        ]
    );
    assert_eq!(
        tree.read_storage("B/local.audipomark").files,
        vec![entry("three.mp3", 30, vec![mark(1, 100)])]
    );
}

#[test]
fn test_split_size_mismatch_skipped_consumes_no_ids() {
    let tree = TestTree::new();
    tree.write_audio("A/changed.mp3", 999);
    tree.write_audio("A/kept.mp3", 50);
    tree.write_storage(
        INPUT,
        &storage(
            "",
            vec![
                entry("A/changed.mp3", 1000, marks_at(&[0, 3000])),
                entry("A/kept.mp3", 50, marks_at(&[0, 3000])),
            ],
        ),
    );

    let mut resolver = ScriptedResolver::new([Decision::Skip]);
    let report = run(&tree, false, &mut resolver).unwrap();

    assert_eq!(
        resolver.asked,
        vec![Discrepancy::SizeMismatch {
            path: tree.path("A/changed.mp3"),
            expected: 1000,
            actual: 999,
        }]
    );
    assert_eq!(resolver.remaining(), 0);
    assert_eq!(report.skipped_files, 1);
    assert_eq!(
        tree.read_storage("A/local.audipomark").files,
        vec![entry("kept.mp3", 50, vec![mark(1, 0), mark(2, 3000)])]
    );
}

#[test]
fn test_split_size_mismatch_proceed_keeps_observed_size() {
    let tree = TestTree::new();
    tree.write_audio("A/changed.mp3", 999);
    tree.write_storage(
        INPUT,
        &storage("", vec![entry("A/changed.mp3", 1000, marks_at(&[0]))]),
    );

    run(&tree, false, &mut ScriptedResolver::new([Decision::Proceed])).unwrap();

    assert_eq!(
        tree.read_storage("A/local.audipomark").files,
        vec![entry("changed.mp3", 999, vec![mark(1, 0)])]
    );
}

#[test]
fn test_split_yes_to_all_is_per_kind() {
    let tree = TestTree::new();
    tree.write_audio("A/present.mp3", 10);
    tree.write_audio("A/grown.mp3", 11);
    tree.write_storage(
        INPUT,
        &storage(
            "",
            vec![
                entry("A/gone1.mp3", 10, marks_at(&[0])),
                entry("A/gone2.mp3", 10, marks_at(&[0])),
                entry("A/grown.mp3", 10, marks_at(&[0])),
                entry("A/present.mp3", 10, marks_at(&[0])),
            ],
        ),
    );

    let mut resolver = ScriptedResolver::new([Decision::SkipAll, Decision::Proceed]);
    let report = run(&tree, false, &mut resolver).unwrap();

    let kinds: Vec<_> = resolver.asked.iter().map(Discrepancy::kind).collect();
    assert_eq!(
        kinds,
        vec![DiscrepancyKind::FileUnavailable, DiscrepancyKind::SizeMismatch]
    );
    assert_eq!(resolver.remaining(), 0);
    assert_eq!(report.skipped_files, 2);
    assert_eq!(
        tree.read_storage("A/local.audipomark").files,
        vec![
            entry("grown.mp3", 11, vec![mark(1, 0)]),
            entry("present.mp3", 10, vec![mark(2, 0)]),
        ]
    );
}

#[test]
fn test_split_skips_directory_outside_working_dir() {
    let tree = TestTree::new();
    tree.write_audio("A/in.mp3", 10);
    tree.write_storage(
        INPUT,
        &storage(
            "/sdcard",
            vec![
                entry("/sdcard/Music/out.mp3", 10, marks_at(&[0])),
                entry("/sdcard/Sync/A/in.mp3", 10, marks_at(&[0])),
            ],
        ),
    );

    let mut resolver = ScriptedResolver::new([Decision::Proceed]);
    let report = run(&tree, false, &mut resolver).unwrap();

    assert_eq!(resolver.remaining(), 0);
    assert_eq!(resolver.asked[0].kind(), DiscrepancyKind::DirectoryOutsideRoot);
    assert_eq!(report.skipped_dirs, 1);
    assert_eq!(report.written, vec![tree.path("A/local.audipomark")]);
}

#[test]
fn test_split_refuses_working_dir_itself_and_round_trips_the_rest() {
    let tree = TestTree::new();
    tree.write_audio("top.mp3", 10);
    tree.write_audio("A/x.mp3", 20);
    tree.write_storage(
        INPUT,
        &storage(
            "",
            vec![
                entry("top.mp3", 10, marks_at(&[0])),
                entry("A/x.mp3", 20, marks_at(&[0, 4000])),
            ],
        ),
    );

    let mut resolver = ScriptedResolver::new([Decision::Proceed]);
    let report = run(&tree, false, &mut resolver).unwrap();

    assert_eq!(
        resolver.asked,
        vec![Discrepancy::DirectoryOutsideRoot {
            dir: tree.root().to_path_buf(),
            root: tree.root().to_path_buf(),
        }]
    );
    assert_eq!(resolver.remaining(), 0);
    assert_eq!(report.skipped_dirs, 1);
    assert_eq!(report.skipped_files, 1);
    assert_eq!(report.written, vec![tree.path("A/local.audipomark")]);
    tree.assert_not_exists("local.audipomark");

    let joined = join(tree.root(), &mut ScriptedResolver::silent()).unwrap();
    assert_eq!(joined.sources, vec![tree.path("A/local.audipomark")]);
    assert_eq!(
        tree.read_storage("global.audipomark").files,
        vec![entry("A/x.mp3", 20, vec![mark(1, 0), mark(2, 4000)])]
    );
}

#[test]
fn test_split_never_overwrites_input_named_like_local_storage() {
    let tree = TestTree::new();
    tree.write_audio("top.mp3", 10);
    let input = storage("", vec![entry("top.mp3", 10, marks_at(&[0]))]);
    tree.write_storage("local.audipomark", &input);

    let mut resolver = ScriptedResolver::new([Decision::Proceed]);
    let report = split(
        &tree.path("local.audipomark"),
        Path::new("Sync"),
        SplitOptions::default(),
        &mut resolver,
    )
    .unwrap();

    assert_eq!(resolver.asked[0].kind(), DiscrepancyKind::DirectoryOutsideRoot);
    assert!(report.written.is_empty());
    assert_eq!(tree.read_storage("local.audipomark"), input);
}

#[test]
fn test_split_missing_directory_writes_no_group() {
    let tree = TestTree::new();
    tree.write_storage(
        INPUT,
        &storage("", vec![entry("Missing/x.mp3", 10, marks_at(&[0]))]),
    );

    let mut resolver = ScriptedResolver::new([Decision::Proceed]);
    let report = run(&tree, false, &mut resolver).unwrap();

    assert_eq!(
        resolver.asked,
        vec![Discrepancy::DirectoryUnavailable {
            dir: tree.path("Missing"),
        }]
    );
    assert_eq!(resolver.remaining(), 0);
    assert!(report.written.is_empty());
    tree.assert_not_exists("Missing");
}

#[test]
fn test_split_group_without_survivors_is_not_written() {
    let tree = TestTree::new();
    tree.mkdir("A");
    tree.write_storage(INPUT, &storage("", vec![entry("A/gone.mp3", 10, marks_at(&[0]))]));

    let report = run(&tree, false, &mut ScriptedResolver::new([Decision::Proceed])).unwrap();

    assert!(report.written.is_empty());
    tree.assert_not_exists("A/local.audipomark");
}

#[test]
fn test_split_abort_writes_nothing() {
    let tree = TestTree::new();
    tree.write_audio("A/fine.mp3", 10);
    tree.mkdir("B");
    tree.write_storage(
        INPUT,
        &storage(
            "",
            vec![
                entry("A/fine.mp3", 10, marks_at(&[0])),
                entry("B/gone.mp3", 10, marks_at(&[0])),
            ],
        ),
    );

    let result = run(&tree, false, &mut ScriptedResolver::new([Decision::Abort]));

    assert!(matches!(result, Err(Error::Aborted)));
    tree.assert_not_exists("A/local.audipomark");
}

#[test]
fn test_split_invalid_input_is_fatal() {
    let tree = TestTree::new();
    tree.write_text(
        INPUT,
        r#"{"externalStorageDirectory": "", "files": [{"fileSize": 1, "filepath": "a.mp3", "marklist": [{"id": 1}]}]}"#,
    );

    let err = run(&tree, false, &mut ScriptedResolver::silent()).unwrap_err();

    match err {
        Error::Schema(schema) => {
            assert!(schema.is_invalid_document());
            let violation = &schema.violations()[0];
            assert_eq!(violation.path, "files.0.marklist.0");
            assert!(violation.message.contains("pos"));
        }
        other => panic!("expected a storage error, got {other:?}"),
    }
}
