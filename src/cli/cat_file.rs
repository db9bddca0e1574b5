use std::io::{self, Write};

use anyhow::{bail, Context, Result};

use midden::object::Object;
use midden::{store, Repository};

pub fn run(kind: &str, object: &str) -> Result<()> {
    let repo = Repository::open(".").context("not a git repository")?;
    let id = midden::resolve::resolve_revision(&repo, object)
        .with_context(|| format!("cannot resolve '{object}'"))?;
    let obj = store::read(&repo, &id).with_context(|| format!("cannot read object {id}"))?;

    if obj.kind().tag() != kind {
        bail!("object {id} is a {}, not a {kind}", obj.kind().tag());
    }

    let payload = obj.encode();
    io::stdout()
        .write_all(&payload)
        .context("failed writing to stdout")?;
    if !matches!(obj, Object::Blob(_)) && payload.last() != Some(&b'\n') {
        println!();
    }
    Ok(())
}
