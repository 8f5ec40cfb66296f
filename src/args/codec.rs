//! Codec subcommands: encode and decode item-list blobs.

use std::io::Read;

use satchel::codec;
use satchel::item::Slot;

use super::CliResult;

/// What: Read a JSON slot list (`null` for empty slots) from `input` and print its blob.
///
/// # Errors
/// - When the input cannot be read, is not a JSON slot list, or cannot be encoded
pub fn handle_encode(mut input: impl Read) -> CliResult {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    let items: Vec<Slot> = serde_json::from_str(&text)?;
    let blob = codec::try_encode(&items)?;
    tracing::debug!(slots = items.len(), "[Cli] Encoded item list");
    println!("{blob}");
    Ok(())
}

/// What: Print the slots stored in `blob` as pretty JSON.
///
/// # Errors
/// - When the blob is malformed
pub fn handle_decode(blob: &str) -> CliResult {
    let items = codec::try_decode(blob.trim())?;
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}
