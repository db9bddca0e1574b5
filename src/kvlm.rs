//! The key-value-list message (KVLM) codec shared by commit and tag
//! payloads: an ordered multimap of headers (keys may repeat, value order
//! preserved) plus a free-form trailer.
//!
//! Embedded newlines in a value are folded on the wire as `\n ` (a
//! continuation line beginning with a single space) and unfolded on read.

use crate::error::KvlmError;

/// An ordered key-value-list message: headers in insertion order (repeated
/// keys keep every value, in the order they were added) plus a trailer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Kvlm {
    headers: Vec<(Vec<u8>, Vec<Vec<u8>>)>,
    pub trailer: Vec<u8>,
}

impl Kvlm {
    pub fn new(trailer: impl Into<Vec<u8>>) -> Self {
        Kvlm {
            headers: Vec::new(),
            trailer: trailer.into(),
        }
    }

    /// Appends `value` under `key`, preserving any values already stored.
    pub fn push(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        let key = key.into();
        match self.headers.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value.into()),
            None => self.headers.push((key, vec![value.into()])),
        }
    }

    /// All values stored under `key`, in insertion order, or `None` if the
    /// key is absent.
    pub fn get(&self, key: &[u8]) -> Option<&[Vec<u8>]> {
        self.headers
            .iter()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, v)| v.as_slice())
    }

    /// The first value stored under `key`.
    pub fn get_one(&self, key: &[u8]) -> Option<&[u8]> {
        self.get(key).and_then(|values| values.first()).map(Vec::as_slice)
    }

    pub fn headers(&self) -> impl Iterator<Item = (&[u8], &[Vec<u8>])> {
        self.headers.iter().map(|(k, v)| (k.as_slice(), v.as_slice()))
    }

    /// Decodes a KVLM payload: `header*` terminated by a blank line, then an
    /// arbitrary trailer.
    ///
    /// The cursor walks the byte string looking for the next space and the
    /// next newline. When the newline comes first (or no space remains at
    /// all) the cursor has reached the blank separator line: everything
    /// after that single newline is the trailer. Otherwise the bytes up to
    /// the space are a key, and the value runs until a newline that is *not*
    /// followed by a space (a folded continuation).
    pub fn decode(data: &[u8]) -> Result<Kvlm, KvlmError> {
        let mut headers: Vec<(Vec<u8>, Vec<Vec<u8>>)> = Vec::new();
        let mut cursor = 0usize;
        loop {
            let space = find(data, b' ', cursor);
            let newline = find(data, b'\n', cursor);
            let at_blank_line = match (space, newline) {
                (None, _) => true,
                (Some(sp), Some(nl)) => nl < sp,
                (Some(_), None) => false,
            };
            if at_blank_line {
                let trailer = data
                    .get(cursor + 1..)
                    .map(|t| t.to_vec())
                    .unwrap_or_default();
                return Ok(Kvlm { headers, trailer });
            }
            let space = space.expect("space present on non-blank-line branch");
            let key = data[cursor..space].to_vec();

            let mut line_end = cursor;
            loop {
                let nl = find(data, b'\n', line_end + 1)
                    .ok_or_else(|| KvlmError::Malformed("unterminated header value".into()))?;
                if data.get(nl + 1) != Some(&b' ') {
                    line_end = nl;
                    break;
                }
                line_end = nl;
            }

            let raw_value = &data[space + 1..line_end];
            let value = unfold(raw_value);
            match headers.iter_mut().find(|(k, _)| *k == key) {
                Some((_, values)) => values.push(value),
                None => headers.push((key, vec![value])),
            }
            cursor = line_end + 1;
        }
    }

    /// Emits headers in insertion order (each repeated key on its own line),
    /// then a blank line, then the trailer verbatim.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (key, values) in &self.headers {
            for value in values {
                out.extend_from_slice(key);
                out.push(b' ');
                out.extend_from_slice(&fold(value));
                out.push(b'\n');
            }
        }
        out.push(b'\n');
        out.extend_from_slice(&self.trailer);
        out
    }
}

fn find(data: &[u8], byte: u8, start: usize) -> Option<usize> {
    data.get(start..)?.iter().position(|&b| b == byte).map(|i| start + i)
}

fn unfold(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'\n' && raw.get(i + 1) == Some(&b' ') {
            out.push(b'\n');
            i += 2;
        } else {
            out.push(raw[i]);
            i += 1;
        }
    }
    out
}

fn fold(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    for &b in value {
        out.push(b);
        if b == b'\n' {
            out.push(b' ');
        }
    }
    out
}
