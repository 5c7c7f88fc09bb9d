//! Error taxonomy shared by the lookup clients.
//!
//! HTTP failures are classified per upstream service ([`Namespace`]) so that a
//! weather 404 can never be mistaken for a postal 404. Transport, decode and
//! cancellation failures are kept apart from classified errors.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// Upstream service an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Postal,
    Weather,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Postal => "postal",
            Namespace::Weather => "weather",
        }
    }

    fn api_name(&self) -> &'static str {
        match self {
            Namespace::Postal => "CEP API",
            Namespace::Weather => "Weather API",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic kind of a non-success HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    ServerError,
    Unexpected,
}

impl ErrorKind {
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::BadRequest,
            404 => ErrorKind::NotFound,
            500 | 502 | 503 | 504 => ErrorKind::ServerError,
            _ => ErrorKind::Unexpected,
        }
    }
}

/// A non-success HTTP status mapped into a namespace and kind.
///
/// Equality and [`ClassifiedError::is`] only consider namespace and kind; the
/// status code is kept for diagnostics.
#[derive(Debug, Clone, Copy, Eq)]
pub struct ClassifiedError {
    namespace: Namespace,
    kind: ErrorKind,
    status: u16,
}

impl ClassifiedError {
    pub const POSTAL_BAD_REQUEST: Self = Self::sentinel(Namespace::Postal, ErrorKind::BadRequest);
    pub const POSTAL_NOT_FOUND: Self = Self::sentinel(Namespace::Postal, ErrorKind::NotFound);
    pub const POSTAL_SERVER_ERROR: Self = Self::sentinel(Namespace::Postal, ErrorKind::ServerError);
    pub const POSTAL_UNEXPECTED: Self = Self::sentinel(Namespace::Postal, ErrorKind::Unexpected);

    pub const WEATHER_BAD_REQUEST: Self =
        Self::sentinel(Namespace::Weather, ErrorKind::BadRequest);
    pub const WEATHER_NOT_FOUND: Self = Self::sentinel(Namespace::Weather, ErrorKind::NotFound);
    pub const WEATHER_SERVER_ERROR: Self =
        Self::sentinel(Namespace::Weather, ErrorKind::ServerError);
    pub const WEATHER_UNEXPECTED: Self =
        Self::sentinel(Namespace::Weather, ErrorKind::Unexpected);

    const fn sentinel(namespace: Namespace, kind: ErrorKind) -> Self {
        Self { namespace, kind, status: 0 }
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Originating HTTP status code (0 for the sentinel constants).
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is(&self, namespace: Namespace, kind: ErrorKind) -> bool {
        self.namespace == namespace && self.kind == kind
    }
}

impl PartialEq for ClassifiedError {
    fn eq(&self, other: &Self) -> bool {
        self.is(other.namespace, other.kind)
    }
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api = self.namespace.api_name();
        match self.kind {
            ErrorKind::BadRequest => write!(f, "invalid request to {api}"),
            ErrorKind::NotFound => write!(f, "{api} returned not found"),
            ErrorKind::ServerError => write!(f, "{api} internal error"),
            ErrorKind::Unexpected => {
                write!(f, "unexpected error from {api}: status code {}", self.status)
            }
        }
    }
}

impl std::error::Error for ClassifiedError {}

/// Status classifier bound to one namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier(Namespace);

impl Classifier {
    pub const POSTAL: Self = Self(Namespace::Postal);
    pub const WEATHER: Self = Self(Namespace::Weather);

    pub fn namespace(&self) -> Namespace {
        self.0
    }

    pub fn classify(&self, status: u16) -> ClassifiedError {
        classify(self.0, status)
    }
}

pub fn classify(namespace: Namespace, status: u16) -> ClassifiedError {
    ClassifiedError { namespace, kind: ErrorKind::from_status(status), status }
}

/// Failure of a single lookup call.
#[derive(Debug, Error)]
pub enum LookupError {
    /// No response was obtained (connect, DNS, transport timeout, invalid URL).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The upstream answered 200 with a body that does not match the schema.
    #[error("failed to decode response body")]
    Decode(#[source] serde_json::Error),

    /// The upstream answered with a non-200 status.
    #[error(transparent)]
    Http(#[from] ClassifiedError),

    #[error("lookup cancelled")]
    Cancelled,

    #[error("lookup deadline exceeded")]
    DeadlineExceeded,
}

impl LookupError {
    /// True when the caller's request context stopped the call.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, LookupError::Cancelled | LookupError::DeadlineExceeded)
    }

    pub fn classified(&self) -> Option<&ClassifiedError> {
        match self {
            LookupError::Http(err) => Some(err),
            _ => None,
        }
    }
}

/// Failure while constructing a client from configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("CEP URL template '{0}' has no {{cep}} placeholder")]
    MissingPlaceholder(String),

    #[error("invalid base URL '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP transport")]
    Transport(#[from] reqwest::Error),
}

/// A Celsius reading whose other scales do not fit in a `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("temperature {0} °C is out of range")]
    OutOfRange(Decimal),
}
