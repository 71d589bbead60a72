//! Saving and loading tree files on disk.

use std::fs;

use tempfile::TempDir;
use trellis::{Error, NodeColor, Tree, TreeConfig, TreeKind, Violation, load, load_with, save};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample(kind: TreeKind) -> Tree {
    let mut tree = Tree::new(kind);
    for key in [41, 20, 65, 11, 29, 50, 91, 32, 72, 99] {
        tree.insert(key).unwrap();
    }
    tree
}

#[test]
fn save_then_load_every_kind() {
    init_logging();
    let dir = TempDir::new().unwrap();

    for kind in TreeKind::ALL {
        let tree = sample(kind);
        let path = dir.path().join(format!("{kind}.tree"));

        save(&tree, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.kind(), kind);
        assert_eq!(loaded.level_order(), tree.level_order());
        assert_eq!(trellis::to_text(&loaded), trellis::to_text(&tree));
        assert!(loaded.is_well_formed());
    }
}

#[test]
fn loaded_tree_keeps_rebalancing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rb.tree");
    save(&sample(TreeKind::RedBlack), &path).unwrap();

    let mut tree = load(&path).unwrap();
    for key in [1, 2, 3, 4, 5] {
        tree.insert(key).unwrap();
        assert!(tree.is_well_formed());
    }
    for key in [41, 65, 99] {
        assert_eq!(tree.delete(key), Some(key));
        assert!(tree.is_well_formed());
    }
}

#[test]
fn hand_written_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hand.tree");
    fs::write(
        &path,
        "# three nodes\nRB\n0\t10\t1\t2\tblack # root\n1\t6\tnil\tnil\tred\n2\t20\tnil\tnil\tred\n",
    )
    .unwrap();

    let tree = load(&path).unwrap();
    let root = tree.get(tree.root().unwrap()).unwrap();
    assert_eq!(root.key(), 10);
    assert_eq!(root.color(), Some(NodeColor::Black));
    assert_eq!(tree.iter().collect::<Vec<_>>(), vec![6, 10, 20]);
}

#[test]
fn malformed_file_reports_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.tree");
    fs::write(&path, "AVL\n0 5 1 nil\n1 three nil nil\n").unwrap();

    match load(&path) {
        Err(Error::MalformedFile { line, token, .. }) => {
            assert_eq!(line, 3);
            assert_eq!(token, "three");
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn structurally_invalid_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("unbalanced.tree");
    fs::write(&path, "RB\n0 5 1 nil black\n1 3 nil nil black\n").unwrap();

    let err = load(&path).unwrap_err();
    assert!(matches!(
        err,
        Error::StructuralViolation {
            kind: TreeKind::RedBlack,
            violation: Violation::BlackHeight { key: 5, left: 2, right: 1 },
        }
    ));
    assert!(err.to_string().contains("black-height"));
}

#[test]
fn key_range_is_enforced_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wide.tree");
    save(&sample(TreeKind::Bst), &path).unwrap();

    assert!(load_with(&path, &TreeConfig::two_digit()).is_ok());
    assert!(matches!(
        load_with(&path, &TreeConfig::new().with_key_range(0..=50)),
        Err(Error::MalformedFile { token, .. }) if token == "65"
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();

    assert!(matches!(
        load(dir.path().join("absent.tree")),
        Err(Error::Io(_))
    ));
}
