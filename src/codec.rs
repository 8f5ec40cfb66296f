//! Item-list codec: an ordered slot list to and from one Base64 text blob.
//!
//! Layout before armoring: `[count: i32 BE]` then `count` records. A record is a
//! presence byte (`0` empty, `1` present) followed, when present, by
//! `[len: u32 BE]` and the JSON form of the [`ItemStack`].
//!
//! [`encode`] and [`decode`] never fail: any error collapses to the empty list,
//! so callers must treat "empty" and "broken" the same way. [`try_encode`] and
//! [`try_decode`] expose the same format with a distinguishable [`CodecError`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use thiserror::Error;

use crate::item::{ItemStack, Slot};

/// Why a blob could not be produced or read.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The text armor is not valid Base64.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The byte stream ended before the declared records were read.
    #[error("truncated stream: needed {needed} more bytes at offset {offset}")]
    Truncated {
        /// Read position where the stream ran out.
        offset: usize,
        /// Bytes still required.
        needed: usize,
    },

    /// The length prefix is negative.
    #[error("negative item count {0}")]
    NegativeCount(i32),

    /// A presence byte other than 0 or 1.
    #[error("bad record marker {marker} at offset {offset}")]
    BadMarker {
        /// Read position of the marker.
        offset: usize,
        /// Offending byte.
        marker: u8,
    },

    /// A record could not be (de)serialized.
    #[error("item record: {0}")]
    Record(#[from] serde_json::Error),

    /// More records than the prefix can express, or a record too large.
    #[error("item list too large to encode")]
    TooLarge,
}

/// What: Encode a slot list, failing loudly.
///
/// Inputs:
/// - `items`: Ordered slots, empty entries included
///
/// Output:
/// - Base64 blob, or the [`CodecError`] that prevented encoding
///
/// # Errors
/// - `TooLarge` when the list or one record exceeds the 32-bit prefixes
/// - `Record` when an item cannot be serialized
pub fn try_encode(items: &[Slot]) -> Result<String, CodecError> {
    let count = i32::try_from(items.len()).map_err(|_| CodecError::TooLarge)?;
    let mut bytes = Vec::with_capacity(4 + items.len() * 32);
    bytes.extend_from_slice(&count.to_be_bytes());
    for slot in items {
        match slot {
            None => bytes.push(0),
            Some(stack) => {
                let record = serde_json::to_vec(stack)?;
                let len = u32::try_from(record.len()).map_err(|_| CodecError::TooLarge)?;
                bytes.push(1);
                bytes.extend_from_slice(&len.to_be_bytes());
                bytes.extend_from_slice(&record);
            }
        }
    }
    Ok(BASE64.encode(bytes))
}

/// What: Decode a blob, failing loudly.
///
/// Inputs:
/// - `blob`: Text produced by [`try_encode`] / [`encode`]
///
/// Output:
/// - The slot list, or the [`CodecError`] describing the corruption
///
/// # Errors
/// - `Base64`, `Truncated`, `NegativeCount`, `BadMarker` or `Record` for corrupt input
///
/// Details:
/// - Reads exactly the declared number of records; trailing bytes are ignored.
pub fn try_decode(blob: &str) -> Result<Vec<Slot>, CodecError> {
    let bytes = BASE64.decode(blob.trim())?;
    let mut reader = Reader { bytes: &bytes, pos: 0 };
    let count = i32::from_be_bytes(reader.array::<4>()?);
    let count = usize::try_from(count).map_err(|_| CodecError::NegativeCount(count))?;
    let mut items = Vec::with_capacity(count.min(64));
    for _ in 0..count {
        let offset = reader.pos;
        match reader.array::<1>()?[0] {
            0 => items.push(None),
            1 => {
                let len = u32::from_be_bytes(reader.array::<4>()?) as usize;
                let record = reader.take(len)?;
                items.push(Some(serde_json::from_slice::<ItemStack>(record)?));
            }
            marker => return Err(CodecError::BadMarker { offset, marker }),
        }
    }
    Ok(items)
}

/// What: Encode a slot list, never failing.
///
/// Output:
/// - The blob for `items`, or the blob for an empty list if encoding failed
#[must_use]
pub fn encode(items: &[Slot]) -> String {
    try_encode(items).unwrap_or_else(|err| {
        tracing::warn!(error = %err, count = items.len(), "[Codec] encode failed; storing empty list");
        empty_blob()
    })
}

/// What: Decode a blob, never failing.
///
/// Output:
/// - The decoded slots, or an empty list for absent or corrupt input
#[must_use]
pub fn decode(blob: &str) -> Vec<Slot> {
    if blob.trim().is_empty() {
        return Vec::new();
    }
    try_decode(blob).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "[Codec] decode failed; treating as empty list");
        Vec::new()
    })
}

/// Blob of the empty list (`"AAAAAA=="`).
#[must_use]
pub fn empty_blob() -> String {
    BASE64.encode(0_i32.to_be_bytes())
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        let end = self.pos.checked_add(len).ok_or(CodecError::TooLarge)?;
        let Some(chunk) = self.bytes.get(self.pos..end) else {
            return Err(CodecError::Truncated {
                offset: self.pos,
                needed: end - self.bytes.len().min(end),
            });
        };
        self.pos = end;
        Ok(chunk)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0_u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemMeta;

    fn sample() -> Vec<Slot> {
        let mut meta = ItemMeta {
            display_name: Some("Trusty Pick".to_string()),
            lore: vec!["Mined the first diamond".to_string()],
            ..ItemMeta::default()
        };
        meta.tags.insert("enchant:efficiency".to_string(), "3".to_string());
        vec![
            Some(ItemStack::new("diamond_pickaxe", 1).with_meta(meta)),
            None,
            Some(ItemStack::new("cobblestone", 64)),
            Some(ItemStack::new("air", 1)),
            None,
        ]
    }

    #[test]
    /// What: Mixed slots, metadata and trailing empties survive a round trip.
    fn round_trip_preserves_order_and_gaps() {
        let items = sample();
        let blob = encode(&items);
        assert_eq!(decode(&blob), items);
        assert_eq!(try_decode(&blob).expect("valid blob"), items);
    }

    #[test]
    fn encoding_is_deterministic() {
        assert_eq!(encode(&sample()), encode(&sample()));
        assert_eq!(encode(&[]), "AAAAAA==");
        assert_eq!(empty_blob(), "AAAAAA==");
    }

    #[test]
    /// What: Corrupt input degrades to empty in the lossy API but is reported by the strict API.
    fn corrupt_blobs_collapse_to_empty() {
        assert!(decode("").is_empty());
        assert!(decode("not base64 at all!").is_empty());
        assert!(matches!(
            try_decode("not base64 at all!"),
            Err(CodecError::Base64(_))
        ));

        let full = encode(&sample());
        let bytes = BASE64.decode(&full).expect("valid base64");
        let cut = BASE64.encode(&bytes[..bytes.len() - 3]);
        assert!(decode(&cut).is_empty());
        assert!(matches!(try_decode(&cut), Err(CodecError::Truncated { .. })));

        let negative = BASE64.encode((-2_i32).to_be_bytes());
        assert!(matches!(
            try_decode(&negative),
            Err(CodecError::NegativeCount(-2))
        ));

        let mut bad_marker = 1_i32.to_be_bytes().to_vec();
        bad_marker.push(7);
        assert!(matches!(
            try_decode(&BASE64.encode(bad_marker)),
            Err(CodecError::BadMarker { marker: 7, .. })
        ));
    }
}
