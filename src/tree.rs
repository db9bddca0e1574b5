//! The `tree` object payload: an ordered sequence of `(mode, name, id)`
//! entries, concatenated with no separators between entries.
//!
//! ```text
//! <mode_ascii_digits> SP <name_bytes> NUL <id_20_bytes>
//! ```

use crate::error::ObjectError;
use crate::store::ObjectId;

/// Mode string for a subtree entry.
pub const MODE_TREE: &str = "40000";
/// Mode string for a regular file entry, as produced by `BuildTree`.
pub const MODE_FILE: &str = "100644";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: String,
    pub name: Vec<u8>,
    pub id: ObjectId,
}

impl TreeEntry {
    pub fn is_tree(&self) -> bool {
        self.mode == MODE_TREE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    /// Scans the payload linearly. The terminating NUL for `name` must be
    /// found before the 20 id bytes that follow it.
    pub fn decode(data: &[u8]) -> Result<Tree, ObjectError> {
        let mut entries = Vec::new();
        let mut cursor = 0usize;
        while cursor < data.len() {
            let space = data[cursor..]
                .iter()
                .position(|&b| b == b' ')
                .map(|i| cursor + i)
                .ok_or_else(|| ObjectError::MalformedTree("missing mode separator".into()))?;
            let mode = std::str::from_utf8(&data[cursor..space])
                .map_err(|_| ObjectError::MalformedTree("mode is not ASCII".into()))?
                .to_string();

            let name_start = space + 1;
            let nul = data[name_start..]
                .iter()
                .position(|&b| b == 0)
                .map(|i| name_start + i)
                .ok_or_else(|| ObjectError::MalformedTree("missing name terminator".into()))?;
            let name = data[name_start..nul].to_vec();

            let id_start = nul + 1;
            let id_end = id_start + 20;
            if data.len() < id_end {
                return Err(ObjectError::MalformedTree("truncated object id".into()));
            }
            let id = ObjectId::from_bytes(&data[id_start..id_end]);
            entries.push(TreeEntry { mode, name, id });
            cursor = id_end;
        }
        Ok(Tree { entries })
    }

    /// Entries are emitted in storage order: whatever order is present in
    /// `self.entries`. The caller (`BuildTree`) decides that order.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for entry in &self.entries {
            out.extend_from_slice(entry.mode.as_bytes());
            out.push(b' ');
            out.extend_from_slice(&entry.name);
            out.push(0);
            out.extend_from_slice(entry.id.as_bytes());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_of(byte: u8) -> ObjectId {
        ObjectId::from_bytes(&[byte; 20])
    }

    #[test]
    fn round_trips_mixed_entries() {
        let tree = Tree {
            entries: vec![
                TreeEntry {
                    mode: MODE_FILE.to_string(),
                    name: b"a".to_vec(),
                    id: id_of(0xAA),
                },
                TreeEntry {
                    mode: MODE_TREE.to_string(),
                    name: b"sub".to_vec(),
                    id: id_of(0xBB),
                },
            ],
        };
        let encoded = tree.encode();
        let decoded = Tree::decode(&encoded).unwrap();
        assert_eq!(decoded, tree);
        assert_eq!(decoded.encode(), encoded);
    }

    #[test]
    fn empty_tree_round_trips() {
        let tree = Tree::default();
        assert_eq!(tree.encode(), Vec::<u8>::new());
        assert_eq!(Tree::decode(&[]).unwrap(), tree);
    }

    #[test]
    fn rejects_truncated_id() {
        let mut bytes = MODE_FILE.as_bytes().to_vec();
        bytes.push(b' ');
        bytes.extend_from_slice(b"a");
        bytes.push(0);
        bytes.extend_from_slice(&[0u8; 5]); // short of 20
        assert!(Tree::decode(&bytes).is_err());
    }

    #[test]
    fn rejects_missing_name_terminator() {
        let mut bytes = MODE_FILE.as_bytes().to_vec();
        bytes.push(b' ');
        bytes.extend_from_slice(b"noterminator");
        assert!(Tree::decode(&bytes).is_err());
    }
}
