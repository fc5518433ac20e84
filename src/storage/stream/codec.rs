//! Stream payload codec
//!
//! Layout of the `data` field:
//!
//! ```text
//! byte 0     codec version (currently 0x01)
//! bytes 1..  bincode 1.x default encoding of the message
//!            (little-endian fixed-width integers, u64 length prefixes)
//! ```
//!
//! Payloads with any other version byte are rejected.

use crate::utils::error::{RedisKitError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Version byte written by [`encode`]
pub const CODEC_VERSION: u8 = 0x01;

/// Encode a message for the `data` field
pub fn encode<T: Serialize + ?Sized>(message: &T) -> Result<Vec<u8>> {
    let size = bincode::serialized_size(message)? as usize;
    let mut buf = Vec::with_capacity(size + 1);
    buf.push(CODEC_VERSION);
    bincode::serialize_into(&mut buf, message)?;
    Ok(buf)
}

/// Decode a `data` field payload
pub fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T> {
    match payload.split_first() {
        None => Err(RedisKitError::codec("empty payload")),
        Some((&CODEC_VERSION, body)) => Ok(bincode::deserialize(body)?),
        Some((version, _)) => Err(RedisKitError::codec(format!(
            "unsupported codec version {:#04x}",
            version
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Order {
        order_id: u64,
        sku: String,
        tags: Vec<String>,
    }

    #[test]
    fn test_encode_layout() {
        let bytes = encode(&42u32).unwrap();
        assert_eq!(bytes, vec![CODEC_VERSION, 42, 0, 0, 0]);

        let bytes = encode("ab").unwrap();
        assert_eq!(bytes, vec![CODEC_VERSION, 2, 0, 0, 0, 0, 0, 0, 0, b'a', b'b']);
    }

    #[test]
    fn test_struct_roundtrip() {
        let order = Order {
            order_id: 42,
            sku: "A-1".to_string(),
            tags: vec!["rush".to_string()],
        };
        let decoded: Order = decode(&encode(&order).unwrap()).unwrap();
        assert_eq!(decoded, order);
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let mut bytes = encode(&7u8).unwrap();
        bytes[0] = 0x02;
        let err = decode::<u8>(&bytes).unwrap_err();
        assert!(err.is_codec_error());
        assert!(err.to_string().contains("0x02"));
    }

    #[test]
    fn test_decode_rejects_empty_and_truncated() {
        assert!(decode::<u64>(&[]).unwrap_err().is_codec_error());
        assert!(decode::<u64>(&[CODEC_VERSION, 1, 2]).unwrap_err().is_codec_error());
    }

    #[test]
    fn test_decode_rejects_mismatched_type() {
        let bytes = encode(&true).unwrap();
        assert!(decode::<Order>(&bytes).is_err());
    }
}
