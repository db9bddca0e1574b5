use anyhow::{bail, Context, Result};

use midden::object::Object;
use midden::{store, Repository};

pub fn run(name_only: bool, object: &str) -> Result<()> {
    let repo = Repository::open(".").context("not a git repository")?;
    let id = midden::resolve::resolve_revision(&repo, object)
        .with_context(|| format!("cannot resolve '{object}'"))?;
    let tree = match store::read(&repo, &id)? {
        Object::Tree(tree) => tree,
        other => bail!("{id} is a {}, not a tree", other.kind().tag()),
    };

    for entry in &tree.entries {
        let name = String::from_utf8_lossy(&entry.name);
        if name_only {
            println!("{name}");
        } else {
            let kind = if entry.is_tree() { "tree" } else { "blob" };
            println!("{:0>6} {kind} {}\t{name}", entry.mode, entry.id);
        }
    }
    Ok(())
}
