//! Encoding of the item document. Defaults to JSON via serde_json.

use crate::error::{Error, Result};
use crate::model::Item;

/// Converts the item list to and from the bytes stored on disk.
pub trait Serializer: Send + Sync {
    /// Encode the whole item list.
    fn serialize(&self, items: &[Item]) -> Result<Vec<u8>>;

    /// Decode bytes back into an item list.
    fn deserialize(&self, bytes: &[u8]) -> Result<Vec<Item>>;
}

/// JSON array serializer with optional pretty-printing.
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    /// Compact JSON (single line).
    pub fn new() -> Self {
        Self::default()
    }

    /// Two-space indented JSON, easier to edit by hand.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Serializer for JsonSerializer {
    fn serialize(&self, items: &[Item]) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(items)
        } else {
            serde_json::to_vec(items)
        };
        bytes.map_err(Error::from)
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Vec<Item>> {
        serde_json::from_slice(bytes).map_err(Error::from)
    }
}
