//! Wavelet-based path approximation
//!
//! A lossy simplifier that operates directly on a path's coordinate
//! channels - never on the feature-matrix representation. The two
//! channels (one per axis) are decomposed with an orthonormal wavelet,
//! hard-thresholded so only the largest-magnitude fraction of
//! coefficients survives, and reconstructed. The command structure of
//! the path is preserved; only coordinates move.

mod transform;

pub use transform::{dwt, idwt, max_level, wavedec, waverec};

use std::str::FromStr;

use crate::error::CodecError;
use crate::path::{GlyphPath, PathCommand, Point};

// Orthonormal Daubechies scaling filters (reconstruction low-pass).
// The analysis pair is the reversal, the high-pass the alternating-sign
// mirror, the usual quadrature construction.
const HAAR: [f64; 2] = [std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2];

const DB2: [f64; 4] = [
    0.482_962_913_144_534_1,
    0.836_516_303_737_807_9,
    0.224_143_868_042_013_38,
    -0.129_409_522_551_260_37,
];

const DB4: [f64; 8] = [
    0.230_377_813_308_855_23,
    0.714_846_570_552_541_5,
    0.630_880_767_929_590_4,
    -0.027_983_769_416_983_85,
    -0.187_034_811_718_881_14,
    0.030_841_381_835_986_965,
    0.032_883_011_666_982_945,
    -0.010_597_401_784_997_278,
];

/// Supported wavelet families for [`approximate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wavelet {
    /// Haar (db1): 2-tap, blocky but never rings.
    Haar,
    /// Daubechies-2: 4-tap, the usual default for outline smoothing.
    #[default]
    Db2,
    /// Daubechies-4: 8-tap, smoother at the cost of support length.
    Db4,
}

impl Wavelet {
    pub fn name(self) -> &'static str {
        match self {
            Wavelet::Haar => "haar",
            Wavelet::Db2 => "db2",
            Wavelet::Db4 => "db4",
        }
    }

    fn scaling(self) -> &'static [f64] {
        match self {
            Wavelet::Haar => &HAAR,
            Wavelet::Db2 => &DB2,
            Wavelet::Db4 => &DB4,
        }
    }

    /// Filter length; also the minimum channel length the approximator
    /// will transform.
    pub fn filter_len(self) -> usize {
        self.scaling().len()
    }

    pub(crate) fn rec_lo(self) -> Vec<f64> {
        self.scaling().to_vec()
    }

    pub(crate) fn dec_lo(self) -> Vec<f64> {
        self.scaling().iter().rev().copied().collect()
    }

    pub(crate) fn rec_hi(self) -> Vec<f64> {
        let g = self.scaling();
        let f = g.len();
        (0..f)
            .map(|k| if k % 2 == 0 { g[f - 1 - k] } else { -g[f - 1 - k] })
            .collect()
    }

    pub(crate) fn dec_hi(self) -> Vec<f64> {
        self.rec_hi().into_iter().rev().collect()
    }
}

impl FromStr for Wavelet {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "haar" | "db1" => Ok(Wavelet::Haar),
            "db2" => Ok(Wavelet::Db2),
            "db4" => Ok(Wavelet::Db4),
            other => Err(CodecError::UnknownWavelet {
                name: other.to_string(),
            }),
        }
    }
}

/// Approximate a path by hard-thresholding its wavelet coefficients.
///
/// `keep_ratio` is the fraction of coefficients (by count, ranked by
/// magnitude) retained per channel: 1.0 reproduces the path up to
/// reconstruction error, 0.0 flattens it entirely. Paths whose channel
/// length is below the wavelet's support, or too short for even one
/// decomposition level, come back unchanged.
///
/// The output has the same command-kind sequence as the input; a
/// trailing command is dropped only if the reconstruction cannot supply
/// its full point arity.
pub fn approximate(path: &GlyphPath, keep_ratio: f64, wavelet: Wavelet) -> GlyphPath {
    let mut xs = Vec::with_capacity(path.total_point_count());
    let mut ys = Vec::with_capacity(path.total_point_count());
    for command in path {
        for point in command.points() {
            xs.push(point.x);
            ys.push(point.y);
        }
    }

    let len = xs.len();
    if len == 0 || len < wavelet.filter_len() {
        return path.clone();
    }
    let level = max_level(len, wavelet);
    if level == 0 {
        return path.clone();
    }

    let xs = smooth_channel(&xs, keep_ratio, wavelet, level);
    let ys = smooth_channel(&ys, keep_ratio, wavelet, level);

    rebuild(path, &xs, &ys)
}

fn smooth_channel(channel: &[f64], keep_ratio: f64, wavelet: Wavelet, level: usize) -> Vec<f64> {
    let mut bands = wavedec(channel, wavelet, level);

    let cutoff = threshold_cutoff(&bands, keep_ratio);
    for band in &mut bands {
        for value in band.iter_mut() {
            if value.abs() < cutoff {
                *value = 0.0;
            }
        }
    }

    let mut rebuilt = waverec(&bands, wavelet);
    rebuilt.truncate(channel.len());
    rebuilt
}

/// Scalar cutoff such that the top `keep_ratio` fraction of all
/// coefficients (by count) survives a `|value| < cutoff` zeroing. Ties
/// at the cutoff survive with it. Keeping everything means a cutoff
/// below any magnitude; keeping nothing, one above all of them.
fn threshold_cutoff(bands: &[Vec<f64>], keep_ratio: f64) -> f64 {
    let mut magnitudes: Vec<f64> = bands
        .iter()
        .flat_map(|band| band.iter().map(|v| v.abs()))
        .collect();
    let total = magnitudes.len();
    let keep = (keep_ratio.max(0.0) * total as f64).floor() as usize;

    if keep >= total {
        return 0.0;
    }
    if keep == 0 {
        return f64::INFINITY;
    }
    magnitudes.sort_by(|a, b| b.total_cmp(a));
    magnitudes[keep - 1]
}

/// Walk the original command sequence consuming reconstructed samples
/// at each command's arity. A command is dropped when the remaining
/// samples cannot cover its full arity, so no partial points are ever
/// emitted.
fn rebuild(path: &GlyphPath, xs: &[f64], ys: &[f64]) -> GlyphPath {
    let mut cursor = 0;
    let mut result = GlyphPath::new();
    for command in path {
        let arity = command.point_count();
        if cursor + arity > xs.len() {
            tracing::debug!(
                kind = %command.kind(),
                "dropping command: reconstructed channel exhausted"
            );
            continue;
        }
        let point = |offset: usize| Point::new(xs[cursor + offset], ys[cursor + offset]);
        let rebuilt = match command {
            PathCommand::MoveTo(_) => PathCommand::MoveTo(point(0)),
            PathCommand::LineTo(_) => PathCommand::LineTo(point(0)),
            PathCommand::CurveTo(..) => PathCommand::CurveTo(point(0), point(1), point(2)),
            PathCommand::Close => PathCommand::Close,
        };
        result.push(rebuilt);
        cursor += arity;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag(points: usize) -> GlyphPath {
        let mut path = GlyphPath::new();
        path.push(PathCommand::MoveTo(Point::new(0.0, 0.0)));
        for i in 1..points {
            let x = i as f64;
            let y = if i % 2 == 0 { 0.0 } else { 1.0 };
            path.push(PathCommand::LineTo(Point::new(x, y * 10.0)));
        }
        path
    }

    #[test]
    fn test_short_path_unchanged() {
        let path = zigzag(3);
        let result = approximate(&path, 0.5, Wavelet::Db4);
        assert_eq!(result, path);
    }

    #[test]
    fn test_empty_path_unchanged() {
        let path = GlyphPath::new();
        assert_eq!(approximate(&path, 0.5, Wavelet::Haar), path);
    }

    #[test]
    fn test_close_only_path_unchanged() {
        let path = GlyphPath::from(vec![PathCommand::Close, PathCommand::Close]);
        assert_eq!(approximate(&path, 0.5, Wavelet::Haar), path);
    }

    #[test]
    fn test_kind_sequence_preserved() {
        let path = zigzag(32);
        let result = approximate(&path, 0.3, Wavelet::Db2);
        assert_eq!(result.kinds(), path.kinds());
    }

    #[test]
    fn test_keep_none_flattens() {
        let path = zigzag(16);
        let result = approximate(&path, 0.0, Wavelet::Haar);
        for command in &result {
            for point in command.points() {
                assert_eq!(point.x, 0.0);
                assert_eq!(point.y, 0.0);
            }
        }
    }

    #[test]
    fn test_threshold_cutoff_edges() {
        let bands = vec![vec![3.0, -1.0], vec![0.5, -2.0]];
        assert_eq!(threshold_cutoff(&bands, 1.0), 0.0);
        assert_eq!(threshold_cutoff(&bands, 0.0), f64::INFINITY);
        assert_eq!(threshold_cutoff(&bands, 0.5), 2.0);
    }

    #[test]
    fn test_wavelet_parsing() {
        assert_eq!("haar".parse::<Wavelet>().unwrap(), Wavelet::Haar);
        assert_eq!("DB2".parse::<Wavelet>().unwrap(), Wavelet::Db2);
        assert!("sym5".parse::<Wavelet>().is_err());
    }
}
