//! JSON documents stored as S3 objects, versioned by ETag.

use aws_sdk_s3::Client;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;
use crate::objects::{self, WriteCondition};

/// A decoded document and the ETag it was read at.
pub struct Versioned<T> {
    pub value: T,
    pub etag: String,
}

/// Load the document at `key`, or `None` if there is none.
pub async fn load_state_opt<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<Option<Versioned<T>>, StorageError> {
    let Some(object) = objects::fetch(client, bucket, key).await? else {
        return Ok(None);
    };
    Ok(Some(Versioned {
        value: decode(&object.bytes)?,
        etag: object.etag,
    }))
}

/// Load the document at `key`; a missing object is [`StorageError::NotFound`].
pub async fn load_state<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<Versioned<T>, StorageError> {
    load_state_opt(client, bucket, key)
        .await?
        .ok_or_else(|| StorageError::NotFound {
            key: key.to_string(),
        })
}

/// Store `value` at `key` if `condition` holds. Returns the new ETag.
pub async fn save_state_conditional<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
    condition: &WriteCondition,
) -> Result<String, StorageError> {
    let bytes = encode(value)?;
    objects::put_conditional(client, bucket, key, bytes, "application/json", condition).await
}

/// The stored JSON form of a document. Every `f64` decodes to the exact bits
/// it was encoded from (serde_json `float_roundtrip`).
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StorageError> {
    Ok(serde_json::to_vec_pretty(value)?)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StorageError> {
    Ok(serde_json::from_slice(bytes)?)
}
