//! The bridge between the object store and a filesystem working copy:
//! materializing a tree into files (`checkout`), and building a tree object
//! from a directory (used by `commit` and the `write-tree` plumbing
//! command).

use std::fs;
use std::path::Path;

use crate::error::{ObjectError, Result};
use crate::identity::{now_timestamp_and_offset, Identity};
use crate::kvlm::Kvlm;
use crate::object::Object;
use crate::repo::Repository;
use crate::resolve::resolve_head;
use crate::store::{self, ObjectId};
use crate::tree::{Tree, TreeEntry, MODE_FILE, MODE_TREE};

/// Loads `commit_or_tree_id`, following a commit's `tree` header if needed,
/// empties `dest_dir` of everything except `.git`, and writes the tree's
/// files and subdirectories into it.
pub fn materialize(repo: &Repository, commit_or_tree_id: &ObjectId, dest_dir: &Path) -> Result<()> {
    let tree_id = match store::read(repo, commit_or_tree_id)? {
        Object::Tree(_) => *commit_or_tree_id,
        commit @ Object::Commit(_) => {
            let hex = commit
                .commit_tree_hex()
                .ok_or_else(|| ObjectError::Corrupted(commit_or_tree_id.to_hex(), "missing tree header".into()))?;
            ObjectId::from_hex(&hex)
                .map_err(|_| ObjectError::Corrupted(commit_or_tree_id.to_hex(), "tree header is not hex".into()))?
        }
        other => {
            return Err(ObjectError::UnsupportedOperation(format!(
                "cannot checkout object of kind {:?}",
                other.kind()
            ))
            .into())
        }
    };

    clear_workspace(dest_dir)?;
    write_tree_entries(repo, &tree_id, dest_dir)
}

fn clear_workspace(dest_dir: &Path) -> Result<()> {
    if !dest_dir.exists() {
        fs::create_dir_all(dest_dir)?;
        return Ok(());
    }
    for entry in fs::read_dir(dest_dir)? {
        let entry = entry?;
        if entry.file_name() == ".git" {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

fn write_tree_entries(repo: &Repository, tree_id: &ObjectId, dest_dir: &Path) -> Result<()> {
    let tree = match store::read(repo, tree_id)? {
        Object::Tree(tree) => tree,
        other => {
            return Err(ObjectError::UnsupportedOperation(format!(
                "{} is not a tree",
                other.kind().tag()
            ))
            .into())
        }
    };

    for entry in &tree.entries {
        let name = std::str::from_utf8(&entry.name)
            .map_err(|_| ObjectError::MalformedTree("entry name is not UTF-8".into()))?;
        let target = dest_dir.join(name);
        if entry.is_tree() {
            fs::create_dir_all(&target)?;
            write_tree_entries(repo, &entry.id, &target)?;
        } else {
            match store::read(repo, &entry.id)? {
                Object::Blob(content) => fs::write(&target, content)?,
                other => {
                    return Err(ObjectError::UnsupportedOperation(format!(
                        "tree entry {} references a {}",
                        name,
                        other.kind().tag()
                    ))
                    .into())
                }
            }
        }
    }
    Ok(())
}

/// Walks `dir` one level at a time, writing a blob per regular file and
/// recursing per subdirectory, skipping any entry literally named `.git`.
/// Entries are emitted files-first, then directories, each group
/// name-sorted — see the "Tree ordering on write" resolution in
/// `SPEC_FULL.md`.
pub fn build_tree(repo: &Repository, dir: &Path) -> Result<ObjectId> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name() == ".git" {
            continue;
        }
        if entry.file_type()?.is_dir() {
            dirs.push(entry.file_name());
        } else {
            files.push(entry.file_name());
        }
    }
    files.sort();
    dirs.sort();

    let mut entries = Vec::with_capacity(files.len() + dirs.len());
    for file_name in files {
        let path = dir.join(&file_name);
        let content = fs::read(&path)?;
        let id = store::write(repo, &Object::Blob(content))?;
        entries.push(TreeEntry {
            mode: MODE_FILE.to_string(),
            name: file_name.as_encoded_bytes().to_vec(),
            id,
        });
    }
    for dir_name in dirs {
        let path = dir.join(&dir_name);
        let id = build_tree(repo, &path)?;
        entries.push(TreeEntry {
            mode: MODE_TREE.to_string(),
            name: dir_name.as_encoded_bytes().to_vec(),
            id,
        });
    }

    store::write(repo, &Object::Tree(Tree { entries }))
}

/// Builds a tree from `repo.workspace`, constructs a commit referencing it
/// (with `HEAD`'s current id as parent, if any), writes the commit, and
/// overwrites `HEAD` with the new commit's id. Matches the reference
/// implementation's behavior of moving `HEAD` to a bare commit id rather
/// than updating the branch ref it points through.
pub fn commit_workspace(repo: &Repository, message: &str, author: &Identity) -> Result<ObjectId> {
    let parent = resolve_head(repo)?;
    let tree_id = build_tree(repo, &repo.workspace)?;
    let commit_id = write_commit(repo, &tree_id, parent.as_ref(), message, author)?;
    fs::write(repo.git_path(&["HEAD"]), format!("{}\n", commit_id))?;
    Ok(commit_id)
}

/// Constructs a commit KVLM referencing `tree_id` (and `parent`, if given)
/// and writes it, without touching `HEAD`. Shared by [`commit_workspace`]
/// and the `commit-tree` plumbing command, which writes a commit from an
/// already-built tree and leaves `HEAD` alone — see
/// `examples/gausk-git-rs/src/commit.rs`'s `git_write_commit`.
pub fn write_commit(
    repo: &Repository,
    tree_id: &ObjectId,
    parent: Option<&ObjectId>,
    message: &str,
    author: &Identity,
) -> Result<ObjectId> {
    let (timestamp, timezone) = now_timestamp_and_offset();
    let identity_line = author.format_at(timestamp, &timezone);

    let mut kvlm = Kvlm::new(message.as_bytes().to_vec());
    kvlm.push(b"tree".to_vec(), tree_id.to_hex().into_bytes());
    if let Some(parent_id) = parent {
        kvlm.push(b"parent".to_vec(), parent_id.to_hex().into_bytes());
    }
    kvlm.push(b"author".to_vec(), identity_line.clone().into_bytes());
    kvlm.push(b"committer".to_vec(), identity_line.into_bytes());

    store::write(repo, &Object::Commit(kvlm))
}

/// Resolves `target_id`'s kind, constructs a tag object pointing at it, and
/// writes `refs/tags/<name>`.
pub fn tag_name(
    repo: &Repository,
    name: &str,
    target_id: &ObjectId,
    message: &str,
    author: &Identity,
) -> Result<ObjectId> {
    let target = store::read(repo, target_id)?;
    let (timestamp, timezone) = now_timestamp_and_offset();
    let identity_line = author.format_at(timestamp, &timezone);

    let mut kvlm = Kvlm::new(message.as_bytes().to_vec());
    kvlm.push(b"object".to_vec(), target_id.to_hex().into_bytes());
    kvlm.push(b"type".to_vec(), target.kind().tag().as_bytes().to_vec());
    kvlm.push(b"tag".to_vec(), name.as_bytes().to_vec());
    kvlm.push(b"tagger".to_vec(), identity_line.into_bytes());

    let tag_id = store::write(repo, &Object::Tag(kvlm))?;
    let ref_path = repo.ensure_path(&["refs", "tags", name])?;
    fs::write(ref_path, format!("{}\n", tag_id))?;
    Ok(tag_id)
}
