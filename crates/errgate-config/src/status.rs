use http::StatusCode;
use serde::{Deserialize, Deserializer};

/// An HTTP status code validated while the configuration is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HttpStatus(StatusCode);

impl HttpStatus {
    pub const fn new(status: StatusCode) -> Self {
        Self(status)
    }

    pub const fn as_status_code(self) -> StatusCode {
        self.0
    }
}

impl From<StatusCode> for HttpStatus {
    fn from(status: StatusCode) -> Self {
        Self(status)
    }
}

impl From<HttpStatus> for StatusCode {
    fn from(status: HttpStatus) -> Self {
        status.0
    }
}

impl<'de> Deserialize<'de> for HttpStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u16::deserialize(deserializer)?;
        StatusCode::from_u16(code)
            .map(Self)
            .map_err(|_| serde::de::Error::custom(format!("invalid HTTP status code: {code}")))
    }
}
