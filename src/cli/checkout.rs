use anyhow::{Context, Result};

use midden::{worktree, Repository};

pub fn run(commit: &str) -> Result<()> {
    let repo = Repository::open(".").context("not a git repository")?;
    let id = midden::resolve::resolve_revision(&repo, commit)
        .with_context(|| format!("cannot resolve '{commit}'"))?;
    let workspace = repo.workspace.clone();
    worktree::materialize(&repo, &id, &workspace)
        .with_context(|| format!("failed to check out {id}"))?;
    Ok(())
}
