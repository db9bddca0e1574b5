//! End-to-end tests driving the compiled `midden` binary against a real
//! temporary repository, the way the wider pack's CLI test suites do (e.g.
//! the `assert_cmd`-based suites in `examples/other_examples/`).

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn midden() -> Command {
    Command::cargo_bin("midden").unwrap()
}

#[test]
fn init_creates_skeleton() {
    let dir = tempfile::tempdir().unwrap();
    midden().arg("init").arg(dir.path()).assert().success();

    assert!(dir.path().join(".git/objects").is_dir());
    assert!(dir.path().join(".git/refs/tags").is_dir());
    assert_eq!(
        fs::read_to_string(dir.path().join(".git/HEAD")).unwrap(),
        "ref: refs/heads/master\n"
    );
}

#[test]
fn init_rejects_nonempty_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("stray"), b"x").unwrap();
    midden().arg("init").arg(dir.path()).assert().failure();
}

#[test]
fn hash_object_writes_known_blob_id() {
    let dir = tempfile::tempdir().unwrap();
    midden().arg("init").arg(dir.path()).assert().success();

    let file_path = dir.path().join("f");
    fs::write(&file_path, b"hello\n").unwrap();

    midden()
        .current_dir(dir.path())
        .args(["hash-object", "-w", "f"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ce013625030ba8dba906f756967f9e9ca394464a",
        ));

    assert!(dir
        .path()
        .join(".git/objects/ce/013625030ba8dba906f756967f9e9ca394464a")
        .exists());
}

#[test]
fn hash_object_without_write_does_not_touch_store() {
    let dir = tempfile::tempdir().unwrap();
    midden().arg("init").arg(dir.path()).assert().success();
    fs::write(dir.path().join("f"), b"hello\n").unwrap();

    midden()
        .current_dir(dir.path())
        .args(["hash-object", "f"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ce013625030ba8dba906f756967f9e9ca394464a",
        ));

    assert!(!dir
        .path()
        .join(".git/objects/ce/013625030ba8dba906f756967f9e9ca394464a")
        .exists());
}

#[test]
fn commit_then_cat_file_shows_tree_header() {
    let dir = tempfile::tempdir().unwrap();
    midden().arg("init").arg(dir.path()).assert().success();
    fs::write(dir.path().join("a.txt"), b"A\n").unwrap();

    let commit_output = midden()
        .current_dir(dir.path())
        .args(["commit", "-m", "m", "--author", "N <e@example.com>"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let commit_id = String::from_utf8(commit_output).unwrap().trim().to_string();

    let head = fs::read_to_string(dir.path().join(".git/HEAD")).unwrap();
    assert_eq!(head.trim(), commit_id);

    midden()
        .current_dir(dir.path())
        .args(["cat-file", "commit", &commit_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("tree "))
        .stdout(predicate::str::contains("author N <e@example.com>"));
}

#[test]
fn tag_writes_ref_and_object() {
    let dir = tempfile::tempdir().unwrap();
    midden().arg("init").arg(dir.path()).assert().success();
    fs::write(dir.path().join("a.txt"), b"A\n").unwrap();

    let commit_output = midden()
        .current_dir(dir.path())
        .args(["commit", "-m", "m", "--author", "N <e@example.com>"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let commit_id = String::from_utf8(commit_output).unwrap().trim().to_string();

    midden()
        .current_dir(dir.path())
        .args(["tag", "v1", &commit_id, "-m", "release", "--author", "N <e@example.com>"])
        .assert()
        .success();

    let ref_contents = fs::read_to_string(dir.path().join(".git/refs/tags/v1")).unwrap();
    assert_eq!(ref_contents.trim().len(), 40);
}

#[test]
fn checkout_clears_stray_files_before_writing_tree() {
    let dir = tempfile::tempdir().unwrap();
    midden().arg("init").arg(dir.path()).assert().success();
    fs::write(dir.path().join("a.txt"), b"A\n").unwrap();

    let commit_output = midden()
        .current_dir(dir.path())
        .args(["commit", "-m", "m", "--author", "N <e@example.com>"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let commit_id = String::from_utf8(commit_output).unwrap().trim().to_string();

    fs::remove_file(dir.path().join("a.txt")).unwrap();
    fs::write(dir.path().join("stray.txt"), b"gone").unwrap();

    midden()
        .current_dir(dir.path())
        .args(["checkout", &commit_id])
        .assert()
        .success();

    assert!(!dir.path().join("stray.txt").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("a.txt")).unwrap(),
        "A\n"
    );
}

#[test]
fn rev_parse_resolves_partial_id() {
    let dir = tempfile::tempdir().unwrap();
    midden().arg("init").arg(dir.path()).assert().success();
    fs::write(dir.path().join("f"), b"hello\n").unwrap();

    midden()
        .current_dir(dir.path())
        .args(["hash-object", "-w", "f"])
        .assert()
        .success();

    midden()
        .current_dir(dir.path())
        .args(["rev-parse", "ce0136"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ce013625030ba8dba906f756967f9e9ca394464a",
        ));
}

#[test]
fn rev_parse_rejects_short_names() {
    let dir = tempfile::tempdir().unwrap();
    midden().arg("init").arg(dir.path()).assert().success();

    midden()
        .current_dir(dir.path())
        .args(["rev-parse", "ab"])
        .assert()
        .failure();
}

#[test]
fn ls_tree_lists_entries() {
    let dir = tempfile::tempdir().unwrap();
    midden().arg("init").arg(dir.path()).assert().success();
    fs::write(dir.path().join("a.txt"), b"A\n").unwrap();

    let commit_output = midden()
        .current_dir(dir.path())
        .args(["commit", "-m", "m", "--author", "N <e@example.com>"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let commit_id = String::from_utf8(commit_output).unwrap().trim().to_string();

    let tree_hex = midden()
        .current_dir(dir.path())
        .args(["cat-file", "commit", &commit_id])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let tree_hex = String::from_utf8(tree_hex).unwrap();
    let tree_id = tree_hex
        .lines()
        .find_map(|l| l.strip_prefix("tree "))
        .unwrap()
        .to_string();

    midden()
        .current_dir(dir.path())
        .args(["ls-tree", "--name-only", &tree_id])
        .assert()
        .success()
        .stdout(predicate::str::diff("a.txt\n"));
}

#[test]
fn cat_file_rejects_mismatched_kind() {
    let dir = tempfile::tempdir().unwrap();
    midden().arg("init").arg(dir.path()).assert().success();
    fs::write(dir.path().join("f"), b"hello\n").unwrap();

    let id_output = midden()
        .current_dir(dir.path())
        .args(["hash-object", "-w", "f"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let id = String::from_utf8(id_output).unwrap().trim().to_string();

    midden()
        .current_dir(dir.path())
        .args(["cat-file", "tree", &id])
        .assert()
        .failure();
}

#[test]
fn write_tree_and_commit_tree_plumbing() {
    let dir = tempfile::tempdir().unwrap();
    midden().arg("init").arg(dir.path()).assert().success();
    fs::write(dir.path().join("a.txt"), b"A\n").unwrap();

    let tree_output = midden()
        .current_dir(dir.path())
        .arg("write-tree")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let tree_id = String::from_utf8(tree_output).unwrap().trim().to_string();

    midden()
        .current_dir(dir.path())
        .args(["commit-tree", "-m", "plumbing commit", &tree_id])
        .assert()
        .success();

    // write-tree/commit-tree must not move HEAD.
    let head = fs::read_to_string(dir.path().join(".git/HEAD")).unwrap();
    assert_eq!(head, "ref: refs/heads/master\n");
}
