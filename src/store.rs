//! Content-addressed object storage: zlib framing on disk, SHA-1 addressing,
//! the `objects/<xx>/<rest>` path scheme.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use sha1::{Digest, Sha1};

use crate::error::{Error, ObjectError, Result};
use crate::object::{Object, ObjectKind};
use crate::repo::Repository;

/// A 20-byte SHA-1 object id. Canonical external form is 40-char lowercase
/// hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 20]);

impl ObjectId {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buf = [0u8; 20];
        buf.copy_from_slice(&bytes[..20]);
        ObjectId(buf)
    }

    /// Parses a full 40-character lowercase hex id. Does not check that the
    /// id exists in any store.
    pub fn from_hex(hex_str: &str) -> std::result::Result<Self, hex::FromHexError> {
        let mut buf = [0u8; 20];
        hex::decode_to_slice(hex_str, &mut buf)?;
        Ok(ObjectId(buf))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

/// Writes an object into `repo`'s object store, returning its id.
///
/// The frame `"<kind> <len>\0<payload>"` is hashed while it is streamed
/// through the zlib encoder, so the digest and the compressed bytes are
/// produced in one pass. The compressed frame is written to a temporary file
/// first and renamed into place, so a crash mid-write never leaves a
/// half-written object at its final path.
pub fn write(repo: &Repository, object: &Object) -> Result<ObjectId> {
    let payload = object.encode();

    let mut tmp = tempfile::NamedTempFile::new_in(repo.git_path(&["objects"]))?;
    let id = {
        let encoder = ZlibEncoder::new(&mut tmp, Compression::default());
        let mut hasher = HashingWriter {
            inner: encoder,
            hasher: Sha1::new(),
        };
        hasher.write_all(frame_header(object, payload.len()).as_bytes())?;
        hasher.write_all(&payload)?;
        hasher.inner.finish()?;
        ObjectId(hasher.hasher.finalize().into())
    };

    let hex_id = id.to_hex();
    let dest_dir = repo.git_path(&["objects", &hex_id[..2]]);
    fs::create_dir_all(&dest_dir)?;
    tmp.persist(dest_dir.join(&hex_id[2..]))
        .map_err(|e| Error::Io(e.error))?;

    log::trace!("wrote object {} ({})", id, object.kind().tag());
    Ok(id)
}

/// Reads and decodes the object with the given id.
pub fn read(repo: &Repository, id: &ObjectId) -> Result<Object> {
    let path = path_for(repo, id);
    let file = File::open(&path)?;
    let mut decoder = flate2::read::ZlibDecoder::new(file);
    let mut frame = Vec::new();
    decoder
        .read_to_end(&mut frame)
        .map_err(|e| ObjectError::Corrupted(id.to_hex(), e.to_string()))?;

    let space = frame
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| ObjectError::Corrupted(id.to_hex(), "missing kind separator".into()))?;
    let kind_tag = std::str::from_utf8(&frame[..space])
        .map_err(|_| ObjectError::Corrupted(id.to_hex(), "kind is not ASCII".into()))?;

    let nul = frame[space + 1..]
        .iter()
        .position(|&b| b == 0)
        .map(|i| space + 1 + i)
        .ok_or_else(|| ObjectError::Corrupted(id.to_hex(), "missing header terminator".into()))?;
    let decimal_len: &str = std::str::from_utf8(&frame[space + 1..nul])
        .map_err(|_| ObjectError::Corrupted(id.to_hex(), "length is not ASCII".into()))?;
    let expected_len: usize = decimal_len
        .parse()
        .map_err(|_| ObjectError::Corrupted(id.to_hex(), "length is not a number".into()))?;

    let payload = &frame[nul + 1..];
    if payload.len() != expected_len {
        return Err(ObjectError::Corrupted(id.to_hex(), "length mismatch".into()).into());
    }

    let kind = ObjectKind::from_tag(kind_tag)
        .ok_or_else(|| ObjectError::UnknownKind(kind_tag.to_string()))?;
    Ok(Object::decode(kind, payload)?)
}

/// Computes an object's id without writing it to the store, for
/// `hash-object` without `-w`.
pub fn hash(object: &Object) -> ObjectId {
    let payload = object.encode();
    let mut hasher = Sha1::new();
    hasher.update(frame_header(object, payload.len()).as_bytes());
    hasher.update(&payload);
    ObjectId(hasher.finalize().into())
}

fn frame_header(object: &Object, payload_len: usize) -> String {
    format!("{} {}\0", object.kind().tag(), payload_len)
}

/// Whether an object with this id exists on disk. Does not decompress it.
pub fn exists(repo: &Repository, id: &ObjectId) -> bool {
    path_for(repo, id).exists()
}

pub fn path_for(repo: &Repository, id: &ObjectId) -> PathBuf {
    let hex_id = id.to_hex();
    repo.git_path(&["objects", &hex_id[..2], &hex_id[2..]])
}

struct HashingWriter<W> {
    inner: W,
    hasher: Sha1,
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
