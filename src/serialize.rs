//! Serializer Module
//!
//! Pluggable value encoding. The engine only needs encode/decode to
//! round-trip; the wire format is the serializer's business.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::BoxError;

// == Serializer Trait ==
/// Encodes a typed value to bytes and decodes bytes back to the value.
///
/// Implementations must be infallible to *call* but may fail on any
/// particular value; the engine treats encode failure as a failed `set`
/// and decode failure as a cache miss.
pub trait Serializer<T> {
    fn encode(&self, value: &T) -> Result<Vec<u8>, BoxError>;

    fn decode(&self, bytes: &[u8]) -> Result<T, BoxError>;
}

// == JSON Serializer ==
/// Default serializer backed by serde_json.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl<T> Serializer<T> for JsonSerializer
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &T) -> Result<Vec<u8>, BoxError> {
        Ok(serde_json::to_vec(value)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, BoxError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

// == Raw Serializer ==
/// Stores byte payloads verbatim, with no framing at all.
///
/// Useful when the caller already holds encoded data and the on-disk size
/// must equal the payload size exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSerializer;

impl Serializer<Vec<u8>> for RawSerializer {
    fn encode(&self, value: &Vec<u8>) -> Result<Vec<u8>, BoxError> {
        Ok(value.clone())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<u8>, BoxError> {
        Ok(bytes.to_vec())
    }
}
