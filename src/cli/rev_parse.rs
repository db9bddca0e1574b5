use anyhow::{Context, Result};

use midden::Repository;

pub fn run(rev: &str) -> Result<()> {
    let repo = Repository::open(".").context("not a git repository")?;
    let id = midden::resolve::resolve_revision(&repo, rev)
        .with_context(|| format!("cannot resolve '{rev}'"))?;
    println!("{id}");
    Ok(())
}
