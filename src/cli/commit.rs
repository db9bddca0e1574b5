use anyhow::{bail, Context, Result};

use midden::identity::Identity;
use midden::{worktree, Repository};

pub fn run(message: &str, author: &str) -> Result<()> {
    let repo = Repository::open(".").context("not a git repository")?;
    let Some(identity) = Identity::parse(author) else {
        bail!("author must look like 'Name <email>', got '{author}'");
    };
    let id = worktree::commit_workspace(&repo, message, &identity)
        .context("failed to commit workspace")?;
    println!("{id}");
    Ok(())
}
