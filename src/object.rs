//! The four object kinds and their codecs. The outer frame (written by
//! [`crate::store`]) carries the kind tag; this module only encodes and
//! decodes the payload for each kind.

use crate::error::ObjectError;
use crate::kvlm::Kvlm;
use crate::tree::Tree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
    Tag,
}

impl ObjectKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Tree => "tree",
            ObjectKind::Commit => "commit",
            ObjectKind::Tag => "tag",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "blob" => Some(ObjectKind::Blob),
            "tree" => Some(ObjectKind::Tree),
            "commit" => Some(ObjectKind::Commit),
            "tag" => Some(ObjectKind::Tag),
            _ => None,
        }
    }
}

/// A decoded object: a blob's bytes, a tree's entries, or a commit/tag's
/// KVLM. Commit and tag are byte-for-byte the same shape on the wire; only
/// the outer kind tag distinguishes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob(Vec<u8>),
    Tree(Tree),
    Commit(Kvlm),
    Tag(Kvlm),
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Blob(_) => ObjectKind::Blob,
            Object::Tree(_) => ObjectKind::Tree,
            Object::Commit(_) => ObjectKind::Commit,
            Object::Tag(_) => ObjectKind::Tag,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            Object::Blob(bytes) => bytes.clone(),
            Object::Tree(tree) => tree.encode(),
            Object::Commit(kvlm) | Object::Tag(kvlm) => kvlm.encode(),
        }
    }

    pub fn decode(kind: ObjectKind, payload: &[u8]) -> Result<Object, ObjectError> {
        Ok(match kind {
            ObjectKind::Blob => Object::Blob(payload.to_vec()),
            ObjectKind::Tree => Object::Tree(Tree::decode(payload)?),
            ObjectKind::Commit => Object::Commit(
                Kvlm::decode(payload).map_err(|e| ObjectError::Corrupted("commit".into(), e.to_string()))?,
            ),
            ObjectKind::Tag => Object::Tag(
                Kvlm::decode(payload).map_err(|e| ObjectError::Corrupted("tag".into(), e.to_string()))?,
            ),
        })
    }

    /// The tree referenced by a commit's `tree` header, as a hex string.
    /// Returns `None` for kinds other than `Commit`, or if the header is
    /// missing (which would itself violate invariant 3 of a well-formed
    /// store).
    pub fn commit_tree_hex(&self) -> Option<String> {
        match self {
            Object::Commit(kvlm) => kvlm
                .get_one(b"tree")
                .and_then(|v| std::str::from_utf8(v).ok())
                .map(str::to_string),
            _ => None,
        }
    }
}
