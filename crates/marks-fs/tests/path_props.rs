use std::path::PathBuf;

use marks_fs::path::{clean, is_within, relative_to, to_slash};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[A-Za-z0-9 _-]{1,8}",
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
    ]
}

fn normal_segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Za-z0-9_-]{1,8}", 0..6)
}

proptest! {
    #[test]
    fn test_clean_is_idempotent(parts in prop::collection::vec(segment(), 0..10), rooted in any::<bool>()) {
        let mut path = if rooted { PathBuf::from("/") } else { PathBuf::new() };
        for part in &parts {
            path.push(part);
        }

        let once = clean(&path);
        prop_assert_eq!(clean(&once), once.clone());
        prop_assert!(!once.as_os_str().is_empty());
    }

    #[test]
    fn test_relative_to_inverts_join(base in normal_segments(), rel in normal_segments()) {
        let base: PathBuf = std::iter::once("/".to_string()).chain(base).collect();
        let rel: PathBuf = rel.iter().collect();
        let joined = base.join(&rel);

        prop_assert_eq!(relative_to(&joined, &base), rel);
        prop_assert!(is_within(&joined, &base));
    }

    #[test]
    fn test_to_slash_has_no_backslashes(parts in normal_segments()) {
        let path: PathBuf = parts.iter().collect();
        prop_assert!(!to_slash(&path).contains('\\'));
    }
}
