//! Error types for the itinerary authoring library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all authoring operations.
#[derive(Error, Debug)]
pub enum AuthoringError {
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    Validation { field: String, reason: String },
    /// Itinerary content exceeds the serialized size ceiling
    #[error(
        "Itinerary content is {:.2} MB, which exceeds the {:.2} MB limit. \
         Remove some content or images before saving.",
        megabytes(.size_bytes),
        megabytes(.limit_bytes)
    )]
    ContentTooLarge { size_bytes: u64, limit_bytes: u64 },
    /// Cover image embedded as a data URI is too large to store inline
    #[error(
        "Cover image is {size_bytes} bytes, which exceeds the {limit_bytes} byte \
         limit for inline images. Upload it instead."
    )]
    CoverImageTooLarge { size_bytes: u64, limit_bytes: u64 },
    /// Itinerary not found for the given ID
    #[error("Itinerary with ID {id} not found")]
    ItineraryNotFound { id: u64 },
    /// Package not found for the given ID
    #[error("Package with ID {id} not found")]
    PackageNotFound { id: u64 },
    /// Day not found in the open itinerary
    #[error("Day with ID {id} not found in the open itinerary")]
    DayNotFound { id: u64 },
    /// Event not found in the open itinerary
    #[error("Event with ID {id} not found in the open itinerary")]
    EventNotFound { id: u64 },
    /// Library item not found
    #[error("Library item with ID {id} not found")]
    LibraryItemNotFound { id: u64 },
    /// Event already holds the maximum number of images
    #[error("An event can hold at most {limit} images")]
    TooManyImages { limit: usize },
    /// No published itinerary answers to the given share token
    #[error("No published itinerary found for share token '{token}'")]
    ShareUnavailable { token: String },
    /// The saved bearer token was rejected; the caller must sign in again
    #[error("Authentication token was rejected; sign in again")]
    Unauthorized,
    /// The server refused the request content (4xx other than auth)
    #[error("The server rejected the request (HTTP {status}). Check the itinerary content and try again.")]
    ContentRejected { status: u16 },
    /// The server failed while handling the request (5xx)
    #[error("Server error (HTTP {status}). Try again later.")]
    Backend { status: u16 },
    /// Failure reaching the server at all
    #[error("Network error: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },
    /// The server answered but the response body made no sense
    #[error("API error: {message}")]
    Api { message: String },
    /// The itinerary was persisted but its package write failed
    #[error(
        "Itinerary {itinerary_id} was saved, but its package could not be persisted: {source}. \
         Saving again will retry the package."
    )]
    PackagePersist {
        itinerary_id: u64,
        source: Box<AuthoringError>,
    },
    /// Authoring session state errors (no session open, stale file)
    #[error("Session error: {message}")]
    Session { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

fn megabytes(bytes: &u64) -> f64 {
    *bytes as f64 / (1024.0 * 1024.0)
}

/// Builder for creating input validation errors.
pub struct ValidationErrorBuilder {
    field: String,
}

impl ValidationErrorBuilder {
    /// Create a new validation error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> AuthoringError {
        AuthoringError::Validation {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl AuthoringError {
    /// Creates a builder for input validation errors.
    pub fn validation(field: impl Into<String>) -> ValidationErrorBuilder {
        ValidationErrorBuilder::new(field)
    }

    /// Creates a session state error.
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Creates a file system error for a path.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Wraps a package write failure that happened after the itinerary was
    /// already persisted, so callers can tell a partial save from a full one.
    pub fn package_persist(itinerary_id: u64, source: AuthoringError) -> Self {
        Self::PackagePersist {
            itinerary_id,
            source: Box::new(source),
        }
    }

    /// True when the error leaves the caller signed out.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Convenient Result type alias for authoring operations.
pub type Result<T> = std::result::Result<T, AuthoringError>;
