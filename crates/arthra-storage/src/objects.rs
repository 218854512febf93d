//! Raw object access. Everything above this module deals in JSON documents;
//! this module only moves bytes and ETags.

use aws_sdk_s3::Client;
use aws_smithy_types::byte_stream::ByteStream;

use crate::error::StorageError;

/// An object's body together with the ETag it was read at.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub etag: String,
}

/// Guard for a conditional PUT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteCondition {
    /// Overwrite only if the stored object still has this ETag.
    IfMatch(String),
    /// Create only if no object exists at the key yet.
    IfAbsent,
}

/// Read an object, or `None` if the key does not exist.
pub async fn fetch(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<Option<StoredObject>, StorageError> {
    let resp = match client.get_object().bucket(bucket).key(key).send().await {
        Ok(resp) => resp,
        Err(e) => {
            let err = e.into_service_error();
            if err.is_no_such_key() {
                return Ok(None);
            }
            return Err(StorageError::GetObject(err.to_string()));
        }
    };

    let etag = resp.e_tag().unwrap_or_default().to_string();
    let data = resp
        .body
        .collect()
        .await
        .map_err(|e| StorageError::GetObject(format!("{key}: {e}")))?;

    Ok(Some(StoredObject {
        bytes: data.into_bytes().to_vec(),
        etag,
    }))
}

/// Write `bytes` to `key` if `condition` still holds. Returns the new ETag.
pub async fn put_conditional(
    client: &Client,
    bucket: &str,
    key: &str,
    bytes: Vec<u8>,
    content_type: &str,
    condition: &WriteCondition,
) -> Result<String, StorageError> {
    let req = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type(content_type)
        .body(ByteStream::from(bytes));
    let req = match condition {
        WriteCondition::IfMatch(etag) => req.if_match(etag),
        WriteCondition::IfAbsent => req.if_none_match("*"),
    };

    match req.send().await {
        Ok(resp) => Ok(resp.e_tag().unwrap_or_default().to_string()),
        Err(e) => Err(classify_put_error(key, e.into_service_error().to_string())),
    }
}

/// 412 PreconditionFailed covers a stale If-Match and If-None-Match on an
/// existing key; 409 ConditionalRequestConflict covers two racing writes.
fn classify_put_error(key: &str, message: String) -> StorageError {
    if message.contains("PreconditionFailed") || message.contains("ConditionalRequestConflict") {
        StorageError::PreconditionFailed {
            key: key.to_string(),
        }
    } else {
        StorageError::PutObject(message)
    }
}

/// Every key under `prefix`, across all result pages.
pub async fn list_keys(
    client: &Client,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<String>, StorageError> {
    let mut pages = client
        .list_objects_v2()
        .bucket(bucket)
        .prefix(prefix)
        .into_paginator()
        .send();

    let mut keys = Vec::new();
    while let Some(page) = pages.next().await {
        let page = page.map_err(|e| StorageError::ListObjects(e.into_service_error().to_string()))?;
        keys.extend(page.contents().iter().filter_map(|o| o.key().map(str::to_string)));
    }
    Ok(keys)
}
