//! Core primitives for a minimal, on-disk-compatible Git object store:
//! repository layout, the four object codecs, the KVLM codec used by
//! commits and tags, content-addressed storage, name resolution, and the
//! working-tree bridge. The CLI in `src/main.rs` is a thin consumer of this
//! library.

pub mod error;
pub mod identity;
pub mod kvlm;
pub mod object;
pub mod repo;
pub mod resolve;
pub mod store;
pub mod tree;
pub mod worktree;

pub use error::{Error, Result};
pub use object::{Object, ObjectKind};
pub use repo::Repository;
pub use store::ObjectId;
