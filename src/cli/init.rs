use std::path::Path;

use anyhow::{Context, Result};

use midden::Repository;

pub fn run(path: &Path) -> Result<()> {
    Repository::init(path)
        .with_context(|| format!("failed to initialize repository at {}", path.display()))?;
    Ok(())
}
