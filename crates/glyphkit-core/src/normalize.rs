//! Coordinate normalization for feature matrices
//!
//! Maps matrix coordinates into a unit-scale, origin-anchored frame
//! using a bounding-box-derived affine transform, and back. The
//! parameters must be retained alongside any normalized matrix sent to
//! the external model; denormalization is meaningless without them.
//!
//! A coordinate pair counts as "real" iff it is not exactly (0, 0).
//! This cannot distinguish a genuine (0, 0) point from padding - a
//! structural limitation of the zero-padded layout, shared with every
//! deployed consumer of these matrices, and deliberately not "fixed"
//! here. The mask is recomputed per pair, so a point like (0, c) is
//! still normalized on both axes.

use serde::{Deserialize, Serialize};

use crate::codec::{FeatureMatrix, KIND_COLUMNS};
use crate::path::Point;

/// The affine parameters produced by [`normalize`]: subtract `offset`,
/// divide by `scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormParams {
    pub offset: Point,
    pub scale: f64,
}

impl Default for NormParams {
    fn default() -> Self {
        Self {
            offset: Point::new(0.0, 0.0),
            scale: 1.0,
        }
    }
}

/// Normalize every real coordinate pair into the unit frame.
///
/// The bounding box is computed over all real pairs of the whole
/// matrix; `offset` is its minimum corner and `scale` the larger axis
/// extent (forced to 1 when the box is degenerate, so a single-point
/// path divides by 1 instead of 0). Padding cells stay zero. An empty
/// matrix, or one with no real pairs (close-only paths), is returned
/// unchanged with identity parameters.
pub fn normalize(matrix: &FeatureMatrix) -> (FeatureMatrix, NormParams) {
    let mut bounds: Option<(f64, f64, f64, f64)> = None;
    for row in 0..matrix.rows() {
        for slot in 0..matrix.point_slots() {
            if let Some((x, y)) = real_pair(matrix, row, slot) {
                let (min_x, min_y, max_x, max_y) =
                    bounds.unwrap_or((f64::MAX, f64::MAX, f64::MIN, f64::MIN));
                bounds = Some((min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y)));
            }
        }
    }

    let Some((min_x, min_y, max_x, max_y)) = bounds else {
        return (matrix.clone(), NormParams::default());
    };

    let mut scale = (max_x - min_x).max(max_y - min_y);
    if scale == 0.0 {
        scale = 1.0;
    }
    let params = NormParams {
        offset: Point::new(min_x, min_y),
        scale,
    };

    let mut normalized = matrix.clone();
    for row in 0..matrix.rows() {
        for slot in 0..matrix.point_slots() {
            if let Some((x, y)) = real_pair(matrix, row, slot) {
                let (xc, yc) = slot_columns(slot);
                normalized.set(row, xc, (x - params.offset.x) / params.scale);
                normalized.set(row, yc, (y - params.offset.y) / params.scale);
            }
        }
    }
    (normalized, params)
}

/// Invert [`normalize`]: `v * scale + offset` over every coordinate
/// cell of whatever layout the matrix has.
///
/// This is a pure affine map over the coordinate block; it does not
/// re-detect the real/padding mask, so padding zeros come back as
/// `offset` rather than zero. Decoding must not assume zero padding
/// survives this round trip - and it does not, since row kinds alone
/// determine which columns are read.
pub fn denormalize(matrix: &FeatureMatrix, params: &NormParams) -> FeatureMatrix {
    let mut result = matrix.clone();
    for row in 0..matrix.rows() {
        for slot in 0..matrix.point_slots() {
            let (xc, yc) = slot_columns(slot);
            result.set(row, xc, matrix.get(row, xc) * params.scale + params.offset.x);
            result.set(row, yc, matrix.get(row, yc) * params.scale + params.offset.y);
        }
    }
    result
}

fn slot_columns(slot: usize) -> (usize, usize) {
    (KIND_COLUMNS + 2 * slot, KIND_COLUMNS + 2 * slot + 1)
}

fn real_pair(matrix: &FeatureMatrix, row: usize, slot: usize) -> Option<(f64, f64)> {
    let (xc, yc) = slot_columns(slot);
    let x = matrix.get(row, xc);
    let y = matrix.get(row, yc);
    (x != 0.0 || y != 0.0).then_some((x, y))
}
