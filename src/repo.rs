//! Repository layout: locating `.git` by walking up from a path, creating
//! the on-disk skeleton, and resolving paths inside it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RepositoryError, Result};

/// An open repository: a workspace root paired with its `.git` directory.
#[derive(Debug, Clone)]
pub struct Repository {
    pub workspace: PathBuf,
    pub git_dir: PathBuf,
}

impl Repository {
    /// Resolves `path` to a repository by checking `path/.git`, then each
    /// ancestor in turn, stopping at the filesystem root.
    pub fn open(path: impl AsRef<Path>) -> Result<Repository> {
        let start = fs::canonicalize(path.as_ref()).map_err(crate::error::Error::Io)?;
        let mut candidate = start.as_path();
        loop {
            let git_dir = candidate.join(".git");
            if git_dir.is_dir() {
                let repo = Repository {
                    workspace: candidate.to_path_buf(),
                    git_dir,
                };
                repo.check_format_version()?;
                return Ok(repo);
            }
            match candidate.parent() {
                Some(parent) => candidate = parent,
                None => {
                    return Err(RepositoryError::NotARepository(start).into());
                }
            }
        }
    }

    /// Creates a fresh repository at `path`, which must not exist or must be
    /// an empty directory.
    pub fn init(path: impl AsRef<Path>) -> Result<Repository> {
        let path = path.as_ref();
        if path.exists() {
            if !path.is_dir() {
                return Err(RepositoryError::NotADirectory(path.to_path_buf()).into());
            }
            if fs::read_dir(path)?.next().is_some() {
                return Err(RepositoryError::NotEmpty(path.to_path_buf()).into());
            }
        } else {
            fs::create_dir_all(path)?;
        }

        let git_dir = path.join(".git");
        fs::create_dir(&git_dir)?;
        let repo = Repository {
            workspace: path.to_path_buf(),
            git_dir,
        };

        for sub in ["objects", "refs/heads", "refs/tags", "branches"] {
            fs::create_dir_all(repo.git_path(&[sub]))?;
        }

        fs::write(repo.git_path(&["HEAD"]), "ref: refs/heads/master\n")?;
        fs::write(repo.git_path(&["description"]), DEFAULT_DESCRIPTION)?;
        fs::write(repo.git_path(&["config"]), DEFAULT_CONFIG)?;

        log::trace!("initialized repository at {}", repo.workspace.display());
        Ok(repo)
    }

    /// A path under `.git`, joining each of `subparts`. Does not create
    /// anything; see [`Repository::ensure_path`] for that.
    pub fn git_path(&self, subparts: &[&str]) -> PathBuf {
        let mut path = self.git_dir.clone();
        for part in subparts {
            path.push(part);
        }
        path
    }

    /// Like [`Repository::git_path`], but ensures the parent directory
    /// chain exists first. Fails if a non-directory sits where a directory
    /// is expected.
    pub fn ensure_path(&self, subparts: &[&str]) -> Result<PathBuf> {
        let path = self.git_path(subparts);
        if let Some(parent) = path.parent() {
            if parent.exists() && !parent.is_dir() {
                return Err(RepositoryError::NotADirectory(parent.to_path_buf()).into());
            }
            fs::create_dir_all(parent)?;
        }
        Ok(path)
    }

    fn check_format_version(&self) -> Result<()> {
        let config_path = self.git_path(&["config"]);
        let version = read_repository_format_version(&config_path)?;
        if version != 0 {
            return Err(RepositoryError::UnsupportedFormat(version).into());
        }
        Ok(())
    }
}

const DEFAULT_DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

const DEFAULT_CONFIG: &str = "[core]\n\trepositoryformatversion = 0\n\tfilemode = false\n\tbare = false\n";

/// Reads just the one field this core cares about: `core.repositoryformatversion`.
/// Hand-rolled rather than a general INI parser, since that's the entire
/// shape of config this store consults.
fn read_repository_format_version(config_path: &Path) -> Result<i64> {
    let contents = fs::read_to_string(config_path)?;
    let mut in_core_section = false;
    for line in contents.lines() {
        let line = line.trim();
        if line.starts_with('[') {
            in_core_section = line.trim_start_matches('[').trim_end_matches(']') == "core";
            continue;
        }
        if !in_core_section {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            if key.trim() == "repositoryformatversion" {
                return value
                    .trim()
                    .parse()
                    .map_err(|_| RepositoryError::UnsupportedFormat(-1).into());
            }
        }
    }
    // No explicit version recorded is treated the same as version 0: the
    // field is absent only in configs this core itself never wrote.
    Ok(0)
}
