//! Transaction arguments and their JSON-Cadence encoding.
//!
//! Ledger transactions take typed arguments. On the wire each argument is
//! a separate JSON document in the "JSON-Cadence" format:
//!
//! ```text
//! { "type": "String", "value": "alice" }
//! ```
//!
//! The login transaction only takes a `String`, so that is the only type
//! modelled here.
//!
//! `#[serde(tag = "type", content = "value")]` ("adjacently tagged") gives
//! exactly that shape for free.

use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// A single transaction argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CadenceValue {
    String(String),
}

impl From<&str> for CadenceValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// Encodes each argument as its own JSON-Cadence document.
///
/// # Errors
/// Returns [`LedgerError::Encode`] if serialization fails.
pub fn encode_arguments(
    arguments: &[CadenceValue],
) -> Result<Vec<Vec<u8>>, LedgerError> {
    arguments
        .iter()
        .map(|arg| serde_json::to_vec(arg).map_err(LedgerError::Encode))
        .collect()
}

/// Decodes one JSON-Cadence document.
///
/// # Errors
/// Returns [`LedgerError::Decode`] on malformed input or an unknown type tag.
pub fn decode_argument(data: &[u8]) -> Result<CadenceValue, LedgerError> {
    serde_json::from_slice(data).map_err(LedgerError::Decode)
}
