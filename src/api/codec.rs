//! Request body decoding

use serde_json::Deserializer;

use crate::error::{Error, Result};
use crate::types::RequestPayload;

/// Decode the first JSON value in `body` as a [`RequestPayload`].
///
/// Anything after that value is ignored. A bare `null` is an empty batch;
/// an empty body is an error.
pub fn decode(body: &[u8]) -> Result<RequestPayload> {
    let payload = Deserializer::from_slice(body)
        .into_iter::<Option<RequestPayload>>()
        .next()
        .ok_or_else(|| Error::Decode("empty body".into()))?
        .map_err(|e| Error::Decode(e.to_string()))?;
    Ok(payload.unwrap_or_default())
}
