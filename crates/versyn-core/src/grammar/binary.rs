//! Compact binary form of a grammar, for embedding prebuilt descriptions.

use super::json::GrammarFormatError;
use super::types::Grammar;

impl Grammar {
    /// Deserialize grammar from binary format.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, GrammarFormatError> {
        postcard::from_bytes(bytes).map_err(GrammarFormatError::Binary)
    }

    /// Serialize grammar to binary format.
    pub fn to_binary(&self) -> Vec<u8> {
        postcard::to_allocvec(self).expect("grammar serialization is infallible")
    }
}
