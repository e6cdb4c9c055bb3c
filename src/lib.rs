//! # GlyphKit
//!
//! A glyph outline transcoding toolkit:
//! - Extract glyph outlines from fonts as ordered draw-command paths
//! - Encode paths as one-hot feature matrices for sequence models, and
//!   decode model output back into paths
//! - Normalize matrix coordinates into a unit frame and invert it
//! - Simplify paths directly in the signal domain with wavelet
//!   thresholding, no model required
//!
//! ## Architecture
//!
//! GlyphKit is organized as a workspace with multiple crates:
//!
//! 1. **glyphkit-core** - path model, matrix codec, normalization,
//!    wavelet approximator
//! 2. **glyphkit-font** - glyph outline extraction over `rusttype` and
//!    `fontdb`
//! 3. **glyphkit-model** - the sequence model boundary and the
//!    reconstruction pipeline
//! 4. **glyphkit** - this binary, which wires them together behind a
//!    command line

pub use glyphkit_core::{
    approximate, denormalize, normalize, CodecError, CommandKind, DecodeOutcome, Error,
    FeatureMatrix, FontError, GlyphPath, MatrixCodec, ModelError, NormParams, PathCommand, Point,
    Result, Wavelet,
};
pub use glyphkit_font::{extract_paths, find_system_font, list_font_families, load_font_file};
pub use glyphkit_model::{IdentityModel, ReconstructionPipeline, SequenceModel};

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr (stdout carries the JSON result)
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}

/// Build timestamp stamped by `build.rs`.
pub const BUILD_DATE: &str = env!("BUILD_DATE");
