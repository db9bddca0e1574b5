use anyhow::{bail, Context, Result};

use midden::identity::Identity;
use midden::{worktree, Repository};

pub fn run(tagname: &str, object: &str, message: &str, author: &str) -> Result<()> {
    let repo = Repository::open(".").context("not a git repository")?;
    let Some(identity) = Identity::parse(author) else {
        bail!("author must look like 'Name <email>', got '{author}'");
    };
    let target = midden::resolve::resolve_revision(&repo, object)
        .with_context(|| format!("cannot resolve '{object}'"))?;
    let id = worktree::tag_name(&repo, tagname, &target, message, &identity)
        .with_context(|| format!("failed to create tag '{tagname}'"))?;
    println!("{id}");
    Ok(())
}
