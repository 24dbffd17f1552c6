use std::any::type_name;
use std::str::FromStr;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use errgate_core::families::{MessageNotReadableError, TypeMismatchError};
use http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_path_to_error::Segment;

use crate::FailureResponse;

/// JSON request body
///
/// Unlike `axum::Json`, a body that cannot be read or deserialized is
/// rejected with a [`MessageNotReadableError`] so it goes through the
/// error handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = FailureResponse;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(request, state)
            .await
            .map_err(|rejection| MessageNotReadableError::new(format!("Failed to read request body: {rejection}")))?;

        if bytes.is_empty() {
            return Err(MessageNotReadableError::new("Required request body is missing").into());
        }

        let mut deserializer = serde_json::Deserializer::from_slice(&bytes);
        let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
            MessageNotReadableError::from_json_error_at(err.inner(), field_path(err.path()), type_name::<T>())
        })?;
        deserializer
            .end()
            .map_err(|err| MessageNotReadableError::from_json_error(&err, type_name::<T>()))?;

        Ok(Self(value))
    }
}

/// Field names from the body root to the value that failed
fn field_path(path: &serde_path_to_error::Path) -> Vec<String> {
    path.iter()
        .filter_map(|segment| match segment {
            Segment::Map { key } => Some(key.clone()),
            Segment::Seq { index } => Some(index.to_string()),
            Segment::Enum { variant } => Some(variant.clone()),
            Segment::Unknown => None,
        })
        .collect()
}

/// Single path parameter parsed with [`FromStr`]
///
/// A value that does not parse is rejected with a [`TypeMismatchError`]
/// naming the parameter and the expected type.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathParam<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: FromStr,
    S: Send + Sync,
{
    type Rejection = FailureResponse;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let expected = Some(type_name::<T>().to_owned());

        let Ok(Path(params)) = Path::<Vec<(String, String)>>::from_request_parts(parts, state).await else {
            return Err(TypeMismatchError::new(Value::Null, expected).into());
        };

        let Some((name, raw)) = params.into_iter().next() else {
            return Err(TypeMismatchError::new(Value::Null, expected).into());
        };

        raw.parse()
            .map(Self)
            .map_err(|_| TypeMismatchError::new(raw, expected).with_property(name).into())
    }
}
