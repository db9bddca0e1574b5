use std::collections::HashSet;

use anyhow::{Context, Result};

use midden::object::Object;
use midden::store::{self, ObjectId};
use midden::Repository;

/// Prints the commit DAG reachable from `commit` as a Graphviz digraph, the
/// way `examples/original_source/libwyag.py`'s `command_log` does. Rendering
/// is the CLI's job; the library only supplies `read`/`resolve`.
pub fn run(commit: &str) -> Result<()> {
    let repo = Repository::open(".").context("not a git repository")?;
    let start = midden::resolve::resolve_revision(&repo, commit)
        .with_context(|| format!("cannot resolve '{commit}'"))?;

    println!("digraph commitlog {{");
    println!("  rankdir=LR;");

    let mut visited: HashSet<ObjectId> = HashSet::new();
    let mut to_visit = vec![start];
    while let Some(id) = to_visit.pop() {
        if !visited.insert(id) {
            continue;
        }
        let commit = store::read(&repo, &id).with_context(|| format!("cannot read object {id}"))?;
        let Object::Commit(kvlm) = commit else {
            continue;
        };
        println!("  c_{id} [shape=rectangle, label=\"{id}\"];");

        let Some(parents) = kvlm.get(b"parent") else {
            continue;
        };
        for parent in parents {
            let parent_hex = String::from_utf8_lossy(parent).into_owned();
            println!("  c_{id} -> c_{parent_hex};");
            if let Ok(parent_id) = ObjectId::from_hex(&parent_hex) {
                to_visit.push(parent_id);
            }
        }
    }

    println!("}}");
    Ok(())
}
