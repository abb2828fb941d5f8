//! Response envelope decoding.
//!
//! The API answers with one of two shapes, depending on the endpoint:
//! a bare payload (`/v1` routes) or a `{"result": <payload>}` wrapper
//! (the JWT-authenticated `/v2` routes). The decoder sniffs the shape
//! structurally: if the body is an object carrying a `result` key that
//! decodes as the target type, the wrapper is peeled off; otherwise the
//! whole body is decoded directly.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;

/// Decodes a response body into `T`, unwrapping one `result` envelope
/// level when present.
pub(crate) fn decode_body<T: DeserializeOwned>(
    route: &'static str,
    body: &[u8],
) -> Result<T, Error> {
    let value: Value =
        serde_json::from_slice(body).map_err(|source| Error::Decode { route, source })?;
    if let Value::Object(map) = &value
        && let Some(inner) = map.get("result")
        && let Ok(decoded) = serde_json::from_value::<T>(inner.clone())
    {
        return Ok(decoded);
    }
    serde_json::from_value(value).map_err(|source| Error::Decode { route, source })
}
