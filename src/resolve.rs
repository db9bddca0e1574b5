//! Mapping a user-supplied revision name to a full object id.
//!
//! [`resolve`] handles full and partial hex ids, per `spec.md` §4.E: a
//! 40-character input is returned unchecked, anything shorter (4–40 hex
//! chars) is resolved by scanning the matching `objects/<xx>/` directory.
//! Unlike the reference implementation this was distilled from — which
//! returns the first directory-listing match even when more than one entry
//! matches a short prefix — this resolver collects every match and reports
//! [`crate::error::ResolveError::Ambiguous`] when there is more than one.
//!
//! [`resolve_head`] is the symbolic-ref-aware entry point `HEAD` needs:
//! `resolve` itself only ever understands hex names, by design.

use std::fs;

use crate::error::{Error, ResolveError, Result};
use crate::repo::Repository;
use crate::store::ObjectId;

/// Resolves a partial or full hex object name. Does not understand `HEAD`
/// or any other symbolic name — see [`resolve_head`] and [`resolve_revision`].
pub fn resolve(repo: &Repository, name: &str) -> Result<ObjectId> {
    if name.len() < 4 || name.len() > 40 || !name.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ResolveError::InvalidName(name.to_string()).into());
    }
    let name = name.to_lowercase();

    if name.len() == 40 {
        return ObjectId::from_hex(&name)
            .map_err(|_| ResolveError::InvalidName(name).into());
    }

    let prefix_dir = repo.git_path(&["objects", &name[..2]]);
    let entries = match fs::read_dir(&prefix_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ResolveError::NotFound(name).into());
        }
        Err(e) => return Err(Error::Io(e)),
    };

    let suffix = &name[2..];
    let mut matches = Vec::new();
    for entry in entries {
        let entry = entry?;
        if let Some(file_name) = entry.file_name().to_str() {
            if file_name.starts_with(suffix) {
                matches.push(format!("{}{}", &name[..2], file_name));
            }
        }
    }

    match matches.len() {
        0 => Err(ResolveError::NotFound(name).into()),
        1 => ObjectId::from_hex(&matches[0]).map_err(|_| ResolveError::NotFound(name).into()),
        n => Err(ResolveError::Ambiguous(name, n).into()),
    }
}

/// Reads `.git/HEAD`: follows a `ref: <path>` indirection one level, or
/// accepts a bare 40-hex-char id directly. Returns `Ok(None)` if `HEAD` (or
/// the ref it points at) doesn't exist or doesn't hold a resolvable id —
/// the case of a freshly initialized repository pointing at a branch that
/// has never been committed to.
pub fn resolve_head(repo: &Repository) -> Result<Option<ObjectId>> {
    let head_path = repo.git_path(&["HEAD"]);
    let contents = match fs::read_to_string(&head_path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::Io(e)),
    };
    let contents = contents.trim();

    let hex_candidate = if let Some(ref_path) = contents.strip_prefix("ref: ") {
        match fs::read_to_string(repo.git_path(&[ref_path.trim()])) {
            Ok(id_str) => id_str,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Io(e)),
        }
    } else {
        contents.to_string()
    };

    let hex_candidate = hex_candidate.trim();
    if hex_candidate.len() == 40 && hex_candidate.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(ObjectId::from_hex(hex_candidate).ok())
    } else {
        Ok(None)
    }
}

/// Resolves a revision name the way the CLI's commands need: `HEAD` goes
/// through [`resolve_head`], everything else through [`resolve`].
pub fn resolve_revision(repo: &Repository, rev: &str) -> Result<ObjectId> {
    if rev == "HEAD" {
        return resolve_head(repo)?.ok_or_else(|| ResolveError::NotFound(rev.to_string()).into());
    }
    resolve(repo, rev)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Object;
    use crate::store;

    #[test]
    fn rejects_short_names() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        assert!(matches!(
            resolve(&repo, "abc"),
            Err(Error::Resolve(ResolveError::InvalidName(_)))
        ));
    }

    #[test]
    fn full_name_passes_through_unchecked() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let id = resolve(&repo, "000000000000000000000000000000000000000a").unwrap();
        assert_eq!(id.to_hex(), "000000000000000000000000000000000000000a");
    }

    #[test]
    fn resolves_unique_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let id = store::write(&repo, &Object::Blob(b"hello\n".to_vec())).unwrap();
        let hex = id.to_hex();
        let resolved = resolve(&repo, &hex[..6]).unwrap();
        assert_eq!(resolved, id);
    }

    #[test]
    fn ambiguous_prefix_reports_candidate_count() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let id = store::write(&repo, &Object::Blob(b"hello\n".to_vec())).unwrap();
        let hex = id.to_hex();

        // Fabricate a second object sharing the same 2-char directory and a
        // matching suffix prefix, to force an ambiguous lookup.
        let dir_path = repo.git_path(&["objects", &hex[..2]]);
        std::fs::write(dir_path.join(format!("{}extra", &hex[2..3])), b"").unwrap();

        assert!(matches!(
            resolve(&repo, &hex[..3]),
            Err(Error::Resolve(ResolveError::Ambiguous(_, 2)))
        ));
    }

    #[test]
    fn head_resolves_through_symbolic_ref() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        assert_eq!(resolve_head(&repo).unwrap(), None);

        std::fs::write(
            repo.git_path(&["refs", "heads", "master"]),
            "000000000000000000000000000000000000000a\n",
        )
        .unwrap();
        let resolved = resolve_head(&repo).unwrap().unwrap();
        assert_eq!(resolved.to_hex(), "000000000000000000000000000000000000000a");
    }

    #[test]
    fn resolve_treats_head_as_plain_hex_and_fails() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        assert!(resolve(&repo, "HEAD").is_err());
    }
}
