use http::StatusCode;

use crate::Failure;

/// Authentication and authorization failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum SecurityFailureKind {
    AccessDenied,
    AccountExpired,
    CredentialsExpired,
    CredentialsNotFound,
    AuthenticationService,
    BadCredentials,
    UsernameNotFound,
    InsufficientAuthentication,
    Locked,
    Disabled,
}

impl SecurityFailureKind {
    /// Stable type key of failures of this kind
    pub const fn type_key(self) -> &'static str {
        match self {
            Self::AccessDenied => "errgate::security::AccessDenied",
            Self::AccountExpired => "errgate::security::AccountExpired",
            Self::CredentialsExpired => "errgate::security::CredentialsExpired",
            Self::CredentialsNotFound => "errgate::security::CredentialsNotFound",
            Self::AuthenticationService => "errgate::security::AuthenticationService",
            Self::BadCredentials => "errgate::security::BadCredentials",
            Self::UsernameNotFound => "errgate::security::UsernameNotFound",
            Self::InsufficientAuthentication => "errgate::security::InsufficientAuthentication",
            Self::Locked => "errgate::security::Locked",
            Self::Disabled => "errgate::security::Disabled",
        }
    }

    /// Status the security mapper answers with, if the kind is in its table
    pub const fn default_status(self) -> Option<StatusCode> {
        match self {
            Self::AccessDenied => Some(StatusCode::FORBIDDEN),
            Self::AccountExpired | Self::BadCredentials | Self::UsernameNotFound | Self::Locked | Self::Disabled => {
                Some(StatusCode::BAD_REQUEST)
            }
            Self::CredentialsNotFound | Self::InsufficientAuthentication => Some(StatusCode::UNAUTHORIZED),
            Self::AuthenticationService => Some(StatusCode::INTERNAL_SERVER_ERROR),
            Self::CredentialsExpired => None,
        }
    }
}

/// An authentication or authorization check rejected the request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SecurityError {
    pub kind: SecurityFailureKind,
    pub message: String,
}

impl SecurityError {
    pub fn new(kind: SecurityFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl Failure for SecurityError {
    fn type_key(&self) -> &str {
        self.kind.type_key()
    }
}
