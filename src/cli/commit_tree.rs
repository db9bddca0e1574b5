use anyhow::{bail, Context, Result};

use midden::identity::Identity;
use midden::{worktree, Repository};

const PLUMBING_AUTHOR: &str = "Example <example@example.com>";

/// Plumbing: writes a commit object from an already-built tree id, optional
/// parent, and message, without moving `HEAD`. See
/// `examples/gausk-git-rs/src/commit.rs`'s `git_write_commit`.
pub fn run(message: &str, parent: Option<&str>, tree: &str) -> Result<()> {
    let repo = Repository::open(".").context("not a git repository")?;
    let tree_id = midden::resolve::resolve_revision(&repo, tree)
        .with_context(|| format!("cannot resolve tree '{tree}'"))?;
    let parent_id = match parent {
        Some(rev) => Some(
            midden::resolve::resolve_revision(&repo, rev)
                .with_context(|| format!("cannot resolve parent '{rev}'"))?,
        ),
        None => None,
    };

    let Some(author) = Identity::parse(PLUMBING_AUTHOR) else {
        bail!("built-in plumbing author string is malformed");
    };
    let id = worktree::write_commit(&repo, &tree_id, parent_id.as_ref(), message, &author)
        .context("failed to write commit")?;
    println!("{id}");
    Ok(())
}
