//! Path/matrix codec
//!
//! Encodes a [`GlyphPath`] into a dense feature matrix - one row per
//! command, four one-hot kind columns followed by flattened (x, y)
//! pairs, zero-padded to a common width - and decodes such a matrix
//! back into a path.
//!
//! The matrix width is `4 + 2 * max_pts`. By default `max_pts` is
//! derived from the path being encoded, so two glyphs may produce
//! matrices of different widths; a consumer batching several glyphs
//! either re-pads or builds the codec with [`MatrixCodec::with_max_points`]
//! so the capacity is chosen once for the whole batch.
//!
//! A padding zero is indistinguishable from a genuine coordinate of
//! exactly (0, 0). That is a structural property of the matrix layout,
//! shared with every consumer of it; see [`crate::normalize`].

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::CodecError;
use crate::path::{CommandKind, GlyphPath, PathCommand, Point};

/// Number of one-hot kind columns at the start of every row.
pub const KIND_COLUMNS: usize = 4;

/// A dense row-major numeric matrix: one row per path command.
///
/// Construction validates shape: at least the four kind columns, and an
/// even number of coordinate columns after them.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: usize,
    width: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    /// An all-zero matrix of the given shape.
    pub fn zeros(rows: usize, width: usize) -> Result<Self, CodecError> {
        Self::check_width(width)?;
        Ok(Self {
            rows,
            width,
            data: vec![0.0; rows * width],
        })
    }

    /// Build from nested rows, validating that all rows share one width.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, CodecError> {
        let width = rows.first().map_or(KIND_COLUMNS, Vec::len);
        Self::check_width(width)?;
        let mut data = Vec::with_capacity(rows.len() * width);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(CodecError::RaggedMatrix {
                    row: index,
                    expected: width,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            width,
            data,
        })
    }

    fn check_width(width: usize) -> Result<(), CodecError> {
        if width < KIND_COLUMNS {
            return Err(CodecError::MatrixTooNarrow {
                width,
                min: KIND_COLUMNS,
            });
        }
        if (width - KIND_COLUMNS) % 2 != 0 {
            return Err(CodecError::UnpairedCoordinates { width });
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Number of (x, y) slots per row.
    pub fn point_slots(&self) -> usize {
        (self.width - KIND_COLUMNS) / 2
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.width + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.width;
        &self.data[start..start + self.width]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.width)
    }
}

impl fmt::Display for FeatureMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}x{} feature matrix", self.rows, self.width)?;
        for row in self.iter_rows() {
            writeln!(f, "  {row:?}")?;
        }
        Ok(())
    }
}

impl Serialize for FeatureMatrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter_rows())
    }
}

impl<'de> Deserialize<'de> for FeatureMatrix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<Vec<f64>>::deserialize(deserializer)?;
        FeatureMatrix::from_rows(rows).map_err(D::Error::custom)
    }
}

/// Why a row was left out of a decoded path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The row's kind needs more coordinate columns than the matrix has.
    TruncatedPoints {
        /// Columns the kind needs beyond the one-hot block.
        required: usize,
        /// Coordinate columns actually present.
        available: usize,
    },
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::TruncatedPoints {
                required,
                available,
            } => write!(
                f,
                "needs {required} coordinate columns, matrix has {available}"
            ),
        }
    }
}

/// A row that was dropped while decoding, with its reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppedRow {
    pub row: usize,
    pub kind: CommandKind,
    pub reason: DropReason,
}

/// Result of decoding a feature matrix.
///
/// The path preserves the deployed pipeline's behavior - rows whose
/// kind cannot be satisfied by the matrix width are omitted - but the
/// omission is observable here instead of silent. Callers that treat
/// data loss as fatal can check [`DecodeOutcome::is_lossless`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOutcome {
    pub path: GlyphPath,
    pub dropped: Vec<DroppedRow>,
}

impl DecodeOutcome {
    pub fn is_lossless(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// The bidirectional path/matrix codec.
///
/// Stateless apart from its one piece of configuration: the point
/// capacity. `MatrixCodec::new()` derives the capacity from each path
/// it encodes; [`MatrixCodec::with_max_points`] fixes it, which is what
/// batch consumers use so every matrix in a batch shares one width.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixCodec {
    max_points: Option<usize>,
}

impl MatrixCodec {
    /// Codec that sizes each matrix for the path being encoded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec with a fixed point capacity, chosen once for a whole batch.
    pub fn with_max_points(max_points: usize) -> Self {
        Self {
            max_points: Some(max_points),
        }
    }

    /// Encode a path into a feature matrix.
    ///
    /// Each row is the command's one-hot kind followed by its points
    /// flattened in order, zero-padded to the matrix width. An empty
    /// path encodes to a 0-row matrix with only the kind columns (in
    /// derived mode there are no points to size the width).
    pub fn encode(&self, path: &GlyphPath) -> Result<FeatureMatrix, CodecError> {
        let capacity = self.max_points.unwrap_or_else(|| path.max_point_count());
        let width = KIND_COLUMNS + 2 * capacity;
        let mut matrix = FeatureMatrix::zeros(path.len(), width)?;

        for (row, command) in path.iter().enumerate() {
            let points = command.points();
            if points.len() > capacity {
                return Err(CodecError::CapacityExceeded {
                    required: points.len(),
                    capacity,
                });
            }
            matrix.set(row, command.kind().index(), 1.0);
            for (slot, point) in points.iter().enumerate() {
                matrix.set(row, KIND_COLUMNS + 2 * slot, point.x);
                matrix.set(row, KIND_COLUMNS + 2 * slot + 1, point.y);
            }
        }
        Ok(matrix)
    }

    /// Decode a feature matrix back into a path.
    ///
    /// The kind of each row is the stable argmax of the four kind
    /// columns (ties break to the lowest index), so matrices that have
    /// passed through a model and are no longer strictly one-hot still
    /// decode. Rows whose kind needs more coordinate columns than the
    /// matrix carries are dropped from the path and reported.
    pub fn decode(&self, matrix: &FeatureMatrix) -> DecodeOutcome {
        let mut path = GlyphPath::new();
        let mut dropped = Vec::new();

        for row in 0..matrix.rows() {
            let kind = row_kind(matrix.row(row));
            let available = matrix.width() - KIND_COLUMNS;
            let required = 2 * kind.point_count();
            if required > available {
                tracing::debug!(row, %kind, "dropping row: matrix too narrow for kind");
                dropped.push(DroppedRow {
                    row,
                    kind,
                    reason: DropReason::TruncatedPoints {
                        required,
                        available,
                    },
                });
                continue;
            }

            let point = |slot: usize| {
                Point::new(
                    matrix.get(row, KIND_COLUMNS + 2 * slot),
                    matrix.get(row, KIND_COLUMNS + 2 * slot + 1),
                )
            };
            let command = match kind {
                CommandKind::MoveTo => PathCommand::MoveTo(point(0)),
                CommandKind::LineTo => PathCommand::LineTo(point(0)),
                CommandKind::CurveTo => PathCommand::CurveTo(point(0), point(1), point(2)),
                CommandKind::Close => PathCommand::Close,
            };
            path.push(command);
        }

        DecodeOutcome { path, dropped }
    }
}

/// Stable argmax over the one-hot block: first strictly-greater value
/// wins, so ties resolve to the lowest index.
fn row_kind(row: &[f64]) -> CommandKind {
    let mut best = 0;
    for col in 1..KIND_COLUMNS {
        if row[col] > row[best] {
            best = col;
        }
    }
    match best {
        0 => CommandKind::MoveTo,
        1 => CommandKind::LineTo,
        2 => CommandKind::CurveTo,
        _ => CommandKind::Close,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_layout() {
        let path = GlyphPath::from(vec![
            PathCommand::MoveTo(Point::new(1.0, 2.0)),
            PathCommand::CurveTo(
                Point::new(3.0, 4.0),
                Point::new(5.0, 6.0),
                Point::new(7.0, 8.0),
            ),
        ]);
        let matrix = MatrixCodec::new().encode(&path).unwrap();
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.width(), 10);
        assert_eq!(matrix.row(0), &[1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(matrix.row(1), &[0.0, 0.0, 1.0, 0.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_fixed_capacity_width() {
        let path = GlyphPath::from(vec![PathCommand::LineTo(Point::new(1.0, 1.0))]);
        let matrix = MatrixCodec::with_max_points(3).encode(&path).unwrap();
        assert_eq!(matrix.width(), 10);
    }

    #[test]
    fn test_capacity_exceeded() {
        let path = GlyphPath::from(vec![PathCommand::CurveTo(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        )]);
        let err = MatrixCodec::with_max_points(1).encode(&path).unwrap_err();
        assert!(matches!(
            err,
            CodecError::CapacityExceeded {
                required: 3,
                capacity: 1
            }
        ));
    }

    #[test]
    fn test_argmax_tie_breaks_low() {
        let matrix = FeatureMatrix::from_rows(vec![vec![0.5, 0.5, 0.1, 0.1, 9.0, 9.0]]).unwrap();
        let outcome = MatrixCodec::new().decode(&matrix);
        assert_eq!(
            outcome.path.commands(),
            &[PathCommand::MoveTo(Point::new(9.0, 9.0))]
        );
    }

    #[test]
    fn test_curve_row_dropped_when_narrow() {
        // A curve kind in a 6-column matrix cannot carry three points.
        let matrix = FeatureMatrix::from_rows(vec![
            vec![0.0, 0.0, 1.0, 0.0, 5.0, 5.0],
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        ])
        .unwrap();
        let outcome = MatrixCodec::new().decode(&matrix);
        assert_eq!(outcome.path.commands(), &[PathCommand::Close]);
        assert_eq!(outcome.dropped.len(), 1);
        assert_eq!(outcome.dropped[0].row, 0);
        assert_eq!(outcome.dropped[0].kind, CommandKind::CurveTo);
        assert!(!outcome.is_lossless());
    }

    #[test]
    fn test_matrix_shape_validation() {
        assert!(matches!(
            FeatureMatrix::zeros(1, 3),
            Err(CodecError::MatrixTooNarrow { .. })
        ));
        assert!(matches!(
            FeatureMatrix::zeros(1, 5),
            Err(CodecError::UnpairedCoordinates { .. })
        ));
        assert!(matches!(
            FeatureMatrix::from_rows(vec![vec![1.0; 6], vec![1.0; 8]]),
            Err(CodecError::RaggedMatrix { row: 1, .. })
        ));
    }

    #[test]
    fn test_matrix_serde_roundtrip() {
        let matrix = FeatureMatrix::from_rows(vec![
            vec![1.0, 0.0, 0.0, 0.0, 2.0, 3.0],
            vec![0.0, 1.0, 0.0, 0.0, 4.0, 5.0],
        ])
        .unwrap();
        let json = serde_json::to_string(&matrix).unwrap();
        let back: FeatureMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, matrix);
    }
}
