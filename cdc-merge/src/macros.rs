//! Macros for merge resolution error handling.
//!
//! Provides convenience macros for creating and returning [`crate::error::MergeError`]
//! instances with reduced boilerplate for common error handling patterns.

/// Creates a [`crate::error::MergeError`] from error kind and description.
///
/// Accepts an optional dynamic detail expression and an optional source error.
/// The callsite location of the macro invocation is captured on the error.
#[macro_export]
macro_rules! merge_error {
    ($kind:expr, $desc:expr) => {
        $crate::error::MergeError::new($kind, $desc)
    };
    ($kind:expr, $desc:expr, source: $source:expr) => {
        $crate::error::MergeError::new($kind, $desc).with_source($source)
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        $crate::error::MergeError::new($kind, $desc).with_detail($detail.to_string())
    };
    ($kind:expr, $desc:expr, $detail:expr, source: $source:expr) => {
        $crate::error::MergeError::new($kind, $desc)
            .with_detail($detail.to_string())
            .with_source($source)
    };
}

/// Creates and returns a [`crate::error::MergeError`] from the current function.
///
/// Combines error creation with early return. Supports the same optional detail and
/// source arguments as [`merge_error!`].
#[macro_export]
macro_rules! bail {
    ($kind:expr, $desc:expr) => {
        return ::core::result::Result::Err($crate::merge_error!($kind, $desc))
    };
    ($kind:expr, $desc:expr, source: $source:expr) => {
        return ::core::result::Result::Err($crate::merge_error!($kind, $desc, source: $source))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        return ::core::result::Result::Err($crate::merge_error!($kind, $desc, $detail))
    };
    ($kind:expr, $desc:expr, $detail:expr, source: $source:expr) => {
        return ::core::result::Result::Err($crate::merge_error!(
            $kind,
            $desc,
            $detail,
            source: $source
        ))
    };
}
