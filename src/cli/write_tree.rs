use anyhow::{Context, Result};

use midden::{worktree, Repository};

/// Plumbing: builds a tree object from the workspace root and prints its id,
/// without constructing a commit around it. See `examples/gausk-git-rs/src/write_tree.rs`.
pub fn run() -> Result<()> {
    let repo = Repository::open(".").context("not a git repository")?;
    let workspace = repo.workspace.clone();
    let id = worktree::build_tree(&repo, &workspace).context("failed to build tree")?;
    println!("{id}");
    Ok(())
}
