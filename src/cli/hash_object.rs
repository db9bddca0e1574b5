use std::path::Path;

use anyhow::{bail, Context, Result};

use midden::error::ObjectError;
use midden::object::Object;
use midden::{store, Repository};

pub fn run(kind: &str, write: bool, path: &Path) -> Result<()> {
    if kind != "blob" {
        bail!(ObjectError::UnsupportedOperation(format!("hash-object -t {kind}")));
    }

    let content =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let object = Object::Blob(content);

    let id = if write {
        let repo = Repository::open(".").context("not a git repository")?;
        store::write(&repo, &object)?
    } else {
        store::hash(&object)
    };

    println!("{id}");
    Ok(())
}
