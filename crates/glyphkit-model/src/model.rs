//! The external sequence model boundary

use glyphkit_core::{FeatureMatrix, ModelError};

/// A tokenizer/model that reconstructs batches of normalized feature
/// matrices.
///
/// The call is synchronous; a failure is fatal for the batch that
/// triggered it and nothing else. Implementations are free to return
/// matrices of different row counts and widths than they were given -
/// the sequence length is model-determined - but must return exactly
/// one matrix per input, in order.
pub trait SequenceModel {
    /// A short name for logs and error messages.
    fn name(&self) -> &str;

    /// Reconstruct a batch. `batch[i]` corresponds to `result[i]`.
    fn reconstruct(&self, batch: &[FeatureMatrix]) -> Result<Vec<FeatureMatrix>, ModelError>;
}

/// A model that returns every matrix unchanged.
///
/// Stands in for the real tokenizer when running offline, and anchors
/// the pipeline's round-trip tests: with this model the whole chain is
/// encode → normalize → denormalize → decode.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityModel;

impl SequenceModel for IdentityModel {
    fn name(&self) -> &str {
        "identity"
    }

    fn reconstruct(&self, batch: &[FeatureMatrix]) -> Result<Vec<FeatureMatrix>, ModelError> {
        Ok(batch.to_vec())
    }
}
