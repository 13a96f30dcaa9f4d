//! JSON byte encoding for records.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CodecError, CodecResult};

/// Records with a JSON byte representation.
pub trait JsonModel: Serialize + DeserializeOwned + Default + Sized {
    /// Name used in codec error messages.
    const MODEL_NAME: &'static str;

    /// Encode to compact JSON bytes.
    fn to_json_bytes(&self) -> CodecResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CodecError::encode(Self::MODEL_NAME, e))
    }

    /// Encode to indented JSON text.
    fn to_json_pretty(&self) -> CodecResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CodecError::encode(Self::MODEL_NAME, e))
    }

    /// Decode a fresh record from JSON bytes.
    ///
    /// A top-level `null` decodes to the empty record. Repeated members are
    /// rejected as a data error.
    fn from_json_bytes(bytes: &[u8]) -> CodecResult<Self> {
        serde_json::from_slice::<Option<Self>>(bytes)
            .map(Option::unwrap_or_default)
            .map_err(|e| CodecError::decode(Self::MODEL_NAME, e))
    }

    fn from_json_str(s: &str) -> CodecResult<Self> {
        Self::from_json_bytes(s.as_bytes())
    }

    /// Replace `self` with the record decoded from `bytes`.
    ///
    /// On failure `self` is left exactly as it was.
    fn replace_from_json(&mut self, bytes: &[u8]) -> CodecResult<()> {
        let decoded = Self::from_json_bytes(bytes)?;
        *self = decoded;
        Ok(())
    }
}

/// Encode an optional record. `None` encodes to an empty byte sequence.
pub fn encode_optional<T: JsonModel>(value: Option<&T>) -> CodecResult<Vec<u8>> {
    match value {
        Some(v) => v.to_json_bytes(),
        None => Ok(Vec::new()),
    }
}
