//! Error types for the Magnum scene graph
//!
//! This module defines the error types used throughout the crate,
//! including structural invariant violations of transformations and
//! invalid operations on the object tree.

use std::fmt;

/// Result type for scene graph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Scene graph errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Matrix passed where a rigid transformation (rotation, reflection,
    /// translation) is required
    NotRigidTransformation(String),

    /// Matrix with a zero-length basis axis passed where it has to be
    /// decomposed into translation, rotation and scaling
    DegenerateTransformation(String),

    /// Dual number passed where a normalized one is required
    NotNormalized(String),

    /// Object or feature key doesn't refer to a live entry
    InvalidObject(String),

    /// Objects are not part of the same tree
    NotSameTree(String),

    /// Operation is only implemented on a scene root
    NotScene(String),

    /// Old and new parent belong to different scenes
    DifferentScenes(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotRigidTransformation(msg) => write!(f, "Not a rigid transformation: {}", msg),
            Error::DegenerateTransformation(msg) => write!(f, "Degenerate transformation: {}", msg),
            Error::NotNormalized(msg) => write!(f, "Not normalized: {}", msg),
            Error::InvalidObject(msg) => write!(f, "Invalid object: {}", msg),
            Error::NotSameTree(msg) => write!(f, "Objects not in the same tree: {}", msg),
            Error::NotScene(msg) => write!(f, "Not a scene: {}", msg),
            Error::DifferentScenes(msg) => write!(f, "Different scenes: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an error message with file:line information and build the matching
/// [`Error`] variant from it
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("magnum::SceneGraph", InvalidObject, "no object {:?}", key);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $kind:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::magnum::Error::$kind(message)
    }};
}

/// Log an error and return it from the enclosing function
///
/// # Example
///
/// ```ignore
/// engine_bail!("magnum::SceneGraph", NotScene, "transformations() called on a non-scene");
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $kind:ident, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $kind, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
