//! Error types and result definitions for merge resolution.
//!
//! Every failure in this crate is scoped to a single change event. The per-event
//! boundary in [`crate::merge::MergeResolver`] converts any [`MergeError`] into a
//! skipped resolution, so no error defined here ever terminates the event stream.

use std::borrow::Cow;
use std::error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Convenient result type for merge resolution using [`MergeError`] as the error type.
pub type MergeResult<T> = Result<T, MergeError>;

/// Specific categories of errors that can occur during merge resolution.
///
/// The kinds mirror the per-event failure taxonomy: metadata lookups, event shape and
/// destination naming. All of them are non-fatal to the stream.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    // Metadata lookup errors
    SchemaLookupFailed,
    PrimaryKeyLookupFailed,

    // Event shape errors
    MissingMetadataField,
    MalformedEvent,

    // Destination naming errors
    TemplateFieldMissing,
    InvalidDestinationTable,

    // Unknown / Uncategorized
    Unknown,
}

/// Main error type for merge resolution.
///
/// Carries the error kind, a static description, optional dynamic detail (row or
/// table context) and an optional source error, together with the callsite location
/// captured where the error was created.
#[derive(Debug, Clone)]
pub struct MergeError {
    kind: ErrorKind,
    description: Cow<'static, str>,
    detail: Option<Cow<'static, str>>,
    source: Option<Arc<dyn error::Error + Send + Sync>>,
    location: &'static Location<'static>,
}

impl MergeError {
    /// Creates a new [`MergeError`] with the given kind and static description.
    #[track_caller]
    pub fn new(kind: ErrorKind, description: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            description: description.into(),
            detail: None,
            source: None,
            location: Location::caller(),
        }
    }

    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the detailed error information if available.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the captured callsite location for this error.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Attaches dynamic detail to this error and returns the modified instance.
    pub fn with_detail(mut self, detail: impl Into<Cow<'static, str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attaches an originating [`error::Error`] to this error and returns the
    /// modified instance.
    ///
    /// The stored source is preserved across clones and exposed via
    /// [`error::Error::source`].
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }
}

impl PartialEq for MergeError {
    /// Two errors compare equal when they carry the same kind.
    ///
    /// Detail, source and location are dynamic per occurrence and intentionally
    /// excluded, which keeps assertions on error categories stable.
    fn eq(&self, other: &MergeError) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:?}] {} @ {}:{}:{}",
            self.kind,
            self.description,
            self.location.file(),
            self.location.line(),
            self.location.column()
        )?;

        if let Some(detail) = self.detail.as_deref() {
            write!(f, "\n  Detail: {detail}")?;
        }

        Ok(())
    }
}

impl error::Error for MergeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| source as &(dyn error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_exposes_kind_and_detail() {
        let error = MergeError::new(ErrorKind::MissingMetadataField, "Field is missing")
            .with_detail("field: _metadata_stream".to_string());

        assert_eq!(error.kind(), ErrorKind::MissingMetadataField);
        assert_eq!(error.detail(), Some("field: _metadata_stream"));
    }

    #[test]
    fn display_includes_description_location_and_detail() {
        let error = MergeError::new(ErrorKind::TemplateFieldMissing, "Field absent from row")
            .with_detail("field: schema_name");
        let rendered = error.to_string();

        assert!(rendered.contains("TemplateFieldMissing"));
        assert!(rendered.contains("Field absent from row"));
        assert!(rendered.contains("error.rs"));
        assert!(rendered.contains("Detail: field: schema_name"));
    }

    #[test]
    fn equality_considers_only_the_kind() {
        let a = MergeError::new(ErrorKind::SchemaLookupFailed, "Table not found");
        let b = MergeError::new(ErrorKind::SchemaLookupFailed, "Lookup timed out")
            .with_detail("other detail");

        assert_eq!(a, b);
        assert_ne!(a, MergeError::new(ErrorKind::MalformedEvent, "Table not found"));
    }

    #[test]
    fn source_is_exposed_through_the_error_trait() {
        use std::error::Error;

        let io = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        let error =
            MergeError::new(ErrorKind::SchemaLookupFailed, "Schema fetch failed").with_source(io);

        assert!(error.source().is_some());
    }
}
