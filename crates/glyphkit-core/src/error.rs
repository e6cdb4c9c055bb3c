//! Error handling for GlyphKit
//!
//! Provides error types for all layers of the toolkit:
//! - Codec errors (matrix construction/encoding)
//! - Font errors (resolving and reading font resources)
//! - Model errors (the external sequence model boundary)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Codec error type
///
/// Represents errors raised while building feature matrices or
/// configuring the path/matrix codec. Decoding itself never fails;
/// malformed rows surface through [`crate::codec::DecodeOutcome`].
#[derive(Error, Debug, Clone)]
pub enum CodecError {
    /// Matrix rows have inconsistent widths
    #[error("Ragged matrix: row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        /// The offending row index.
        row: usize,
        /// The width established by the first row.
        expected: usize,
        /// The width actually found.
        found: usize,
    },

    /// Matrix is narrower than the four kind columns
    #[error("Matrix width {width} is below the {min} kind columns")]
    MatrixTooNarrow {
        /// The width actually found.
        width: usize,
        /// The minimum width (the kind columns).
        min: usize,
    },

    /// Coordinate columns do not form (x, y) pairs
    #[error("Matrix width {width} leaves an odd number of coordinate columns")]
    UnpairedCoordinates {
        /// The width actually found.
        width: usize,
    },

    /// A command carries more points than the configured capacity
    #[error("Command with {required} points exceeds codec capacity of {capacity}")]
    CapacityExceeded {
        /// Points the command needs.
        required: usize,
        /// Points the codec was configured for.
        capacity: usize,
    },

    /// Unknown wavelet name
    #[error("Unknown wavelet: {name}")]
    UnknownWavelet {
        /// The name that failed to parse.
        name: String,
    },
}

/// Font error type
///
/// Represents errors raised while resolving a font resource for glyph
/// outline extraction. Per-glyph draw failures are not errors; they
/// yield empty paths and a log line.
#[derive(Error, Debug)]
pub enum FontError {
    /// Font file could not be read
    #[error("Failed to read font file {path}: {source}")]
    FileUnreadable {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Font data did not parse as a font
    #[error("Invalid font data in {path}")]
    InvalidFontData {
        /// The path holding the rejected data.
        path: String,
    },

    /// No installed face matched the requested family
    #[error("No font face found for family '{family}'")]
    FaceNotFound {
        /// The family that was requested.
        family: String,
    },
}

/// Model error type
///
/// Represents failures at the external sequence model boundary. A model
/// failure is fatal for the batch that triggered it and nothing else;
/// no state is shared between requests.
#[derive(Error, Debug, Clone)]
pub enum ModelError {
    /// The model returned a different number of matrices than it was given
    #[error("Model returned {returned} matrices for a batch of {submitted}")]
    BatchSizeMismatch {
        /// Matrices submitted to the model.
        submitted: usize,
        /// Matrices the model returned.
        returned: usize,
    },

    /// The model backend reported a failure
    #[error("Sequence model failure: {message}")]
    Backend {
        /// The backend's error message.
        message: String,
    },
}

/// Main error type for GlyphKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Codec error
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Font error
    #[error(transparent)]
    Font(#[from] FontError),

    /// Model error
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a codec error
    pub fn is_codec_error(&self) -> bool {
        matches!(self, Error::Codec(_))
    }

    /// Check if this is a font error
    pub fn is_font_error(&self) -> bool {
        matches!(self, Error::Font(_))
    }

    /// Check if this is a model error
    pub fn is_model_error(&self) -> bool {
        matches!(self, Error::Model(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
