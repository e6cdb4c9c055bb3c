//! The per-character reconstruction pipeline

use std::collections::BTreeMap;

use glyphkit_core::{
    denormalize, normalize, Error, GlyphPath, MatrixCodec, ModelError, NormParams, Result,
};

use crate::model::SequenceModel;

/// Point capacity used for every matrix in a batch: always sized for
/// curves, so all matrices in a batch share one width and the model
/// sees a rectangular input.
pub const BATCH_POINT_CAPACITY: usize = 3;

/// Drives paths through encode → normalize → model → denormalize →
/// decode.
///
/// Each character's matrices and normalization parameters are private
/// to its slot in the batch; a model failure aborts the whole request
/// without touching anything outside it.
#[derive(Debug, Clone)]
pub struct ReconstructionPipeline<M> {
    codec: MatrixCodec,
    model: M,
}

impl<M: SequenceModel> ReconstructionPipeline<M> {
    pub fn new(model: M) -> Self {
        Self {
            codec: MatrixCodec::with_max_points(BATCH_POINT_CAPACITY),
            model,
        }
    }

    /// Reconstruct every path in the map through the model, keyed as
    /// given. Order of the batch follows the map's iteration order.
    pub fn reconstruct_paths(
        &self,
        paths: &BTreeMap<char, GlyphPath>,
    ) -> Result<BTreeMap<char, GlyphPath>> {
        let mut batch = Vec::with_capacity(paths.len());
        let mut params = Vec::with_capacity(paths.len());
        for path in paths.values() {
            let matrix = self.codec.encode(path)?;
            let (normalized, p) = normalize(&matrix);
            batch.push(normalized);
            params.push(p);
        }

        let reconstructed = self.model.reconstruct(&batch).map_err(|err| {
            tracing::error!(model = self.model.name(), %err, "sequence model failed");
            err
        })?;
        if reconstructed.len() != batch.len() {
            return Err(Error::Model(ModelError::BatchSizeMismatch {
                submitted: batch.len(),
                returned: reconstructed.len(),
            }));
        }

        let mut result = BTreeMap::new();
        for ((ch, matrix), p) in paths.keys().zip(reconstructed).zip(params) {
            let restored = denormalize(&matrix, &p);
            let outcome = self.codec.decode(&restored);
            if !outcome.is_lossless() {
                tracing::debug!(
                    character = %ch,
                    dropped = outcome.dropped.len(),
                    "decoder dropped rows for character"
                );
            }
            result.insert(*ch, outcome.path);
        }
        Ok(result)
    }

    /// Round-trip a single path. Convenience over a one-element batch.
    pub fn reconstruct_path(&self, path: &GlyphPath) -> Result<GlyphPath> {
        let matrix = self.codec.encode(path)?;
        let (normalized, p) = normalize(&matrix);
        let mut reconstructed = self.model.reconstruct(std::slice::from_ref(&normalized))?;
        if reconstructed.len() != 1 {
            return Err(Error::Model(ModelError::BatchSizeMismatch {
                submitted: 1,
                returned: reconstructed.len(),
            }));
        }
        let restored = denormalize(&reconstructed.remove(0), &p);
        Ok(self.codec.decode(&restored).path)
    }

    /// The normalization parameters the pipeline would use for a path,
    /// exposed for callers that talk to the model out-of-band.
    pub fn normalization_for(&self, path: &GlyphPath) -> Result<NormParams> {
        let matrix = self.codec.encode(path)?;
        Ok(normalize(&matrix).1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IdentityModel;
    use glyphkit_core::{FeatureMatrix, PathCommand, Point};

    struct FailingModel;

    impl SequenceModel for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }

        fn reconstruct(&self, _: &[FeatureMatrix]) -> std::result::Result<Vec<FeatureMatrix>, ModelError> {
            Err(ModelError::Backend {
                message: "connection refused".to_string(),
            })
        }
    }

    fn sample_paths() -> BTreeMap<char, GlyphPath> {
        let mut map = BTreeMap::new();
        map.insert(
            'a',
            GlyphPath::from(vec![
                PathCommand::MoveTo(Point::new(1.0, 1.0)),
                PathCommand::LineTo(Point::new(21.0, 1.0)),
                PathCommand::LineTo(Point::new(21.0, 11.0)),
                PathCommand::Close,
            ]),
        );
        map.insert(
            'b',
            GlyphPath::from(vec![
                PathCommand::MoveTo(Point::new(2.0, 3.0)),
                PathCommand::CurveTo(
                    Point::new(4.0, 9.0),
                    Point::new(8.0, 9.0),
                    Point::new(10.0, 3.0),
                ),
                PathCommand::Close,
            ]),
        );
        map
    }

    fn assert_paths_close(a: &GlyphPath, b: &GlyphPath, tolerance: f64) {
        assert_eq!(a.kinds(), b.kinds());
        for (ca, cb) in a.iter().zip(b.iter()) {
            for (p, q) in ca.points().iter().zip(cb.points().iter()) {
                assert!((p.x - q.x).abs() < tolerance, "{p:?} vs {q:?}");
                assert!((p.y - q.y).abs() < tolerance, "{p:?} vs {q:?}");
            }
        }
    }

    #[test]
    fn test_identity_model_roundtrip() {
        let pipeline = ReconstructionPipeline::new(IdentityModel);
        let paths = sample_paths();
        let result = pipeline.reconstruct_paths(&paths).unwrap();
        assert_eq!(result.len(), 2);
        for (ch, original) in &paths {
            assert_paths_close(original, &result[ch], 1e-9);
        }
    }

    #[test]
    fn test_model_failure_is_fatal_for_request() {
        let pipeline = ReconstructionPipeline::new(FailingModel);
        let err = pipeline.reconstruct_paths(&sample_paths()).unwrap_err();
        assert!(err.is_model_error());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_batch_matrices_share_one_width() {
        // Line-only and curve-bearing paths must not disagree on width
        // inside one batch; the fixed capacity guarantees it.
        let codec = glyphkit_core::MatrixCodec::with_max_points(BATCH_POINT_CAPACITY);
        let widths: Vec<usize> = sample_paths()
            .values()
            .map(|path| codec.encode(path).unwrap().width())
            .collect();
        assert_eq!(widths, vec![10, 10]);
    }

    #[test]
    fn test_single_path_roundtrip() {
        let pipeline = ReconstructionPipeline::new(IdentityModel);
        let path = sample_paths().remove(&'b').unwrap();
        let result = pipeline.reconstruct_path(&path).unwrap();
        assert_paths_close(&path, &result, 1e-9);
    }
}
