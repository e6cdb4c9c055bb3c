//! # GlyphKit Core
//!
//! Core types and algorithms for GlyphKit.
//! Provides the path model, the path/matrix codec, coordinate
//! normalization, and the wavelet-based path approximator.
//!
//! Everything in this crate is pure: no I/O, no shared mutable state.
//! Each glyph's path, feature matrix, and normalization parameters are
//! private to one conversion, so all operations are safe to run
//! concurrently across glyphs without synchronization.

pub mod codec;
pub mod error;
pub mod normalize;
pub mod path;
pub mod wavelet;

pub use codec::{DecodeOutcome, DropReason, DroppedRow, FeatureMatrix, MatrixCodec, KIND_COLUMNS};
pub use error::{CodecError, Error, FontError, ModelError, Result};
pub use normalize::{denormalize, normalize, NormParams};
pub use path::{CommandKind, GlyphPath, PathCommand, Point};
pub use wavelet::{approximate, Wavelet};
