//! Discrete wavelet transform primitives
//!
//! Single-level analysis/synthesis with symmetric half-sample boundary
//! extension, and the multi-level decomposition built on them. The
//! analysis keeps `floor((n + f - 1) / 2)` coefficients per band, which
//! is enough redundancy for the synthesis to reconstruct the input
//! exactly (up to float error); the reconstruction of an odd-length
//! signal overshoots by one sample and callers truncate.

use super::Wavelet;

/// Symmetric half-sample reflection: indices off either end fold back
/// without repeating the edge twice in a row beyond the mirror
/// (`x[-1] = x[0]`, `x[n] = x[n-1]`, period `2n`).
fn reflect(index: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let m = index.rem_euclid(period);
    if m < len as isize {
        m as usize
    } else {
        (period - 1 - m) as usize
    }
}

fn extended(signal: &[f64], pad: usize) -> Vec<f64> {
    let len = signal.len();
    (0..len + 2 * pad)
        .map(|k| signal[reflect(k as isize - pad as isize, len)])
        .collect()
}

/// One analysis step: returns the approximation and detail bands, each
/// of length `floor((n + f - 1) / 2)`.
pub fn dwt(signal: &[f64], wavelet: Wavelet) -> (Vec<f64>, Vec<f64>) {
    if signal.is_empty() {
        return (Vec::new(), Vec::new());
    }
    let dec_lo = wavelet.dec_lo();
    let dec_hi = wavelet.dec_hi();
    let f = dec_lo.len();
    let ext = extended(signal, f - 1);
    let out_len = (signal.len() + f - 1) / 2;

    let band = |filter: &[f64]| -> Vec<f64> {
        (0..out_len)
            .map(|i| {
                filter
                    .iter()
                    .enumerate()
                    .map(|(m, &tap)| tap * ext[2 * i + f - m])
                    .sum()
            })
            .collect()
    };
    (band(&dec_lo), band(&dec_hi))
}

/// One synthesis step: inverts [`dwt`]. Output length is
/// `2 * len - f + 2`, which is the input length or one more.
pub fn idwt(approx: &[f64], detail: &[f64], wavelet: Wavelet) -> Vec<f64> {
    debug_assert_eq!(approx.len(), detail.len());
    let rec_lo = wavelet.rec_lo();
    let rec_hi = wavelet.rec_hi();
    let f = rec_lo.len();
    let len = approx.len();
    let out_len = (2 * len + 2).saturating_sub(f);

    (0..out_len)
        .map(|p| {
            let t = p + f - 2;
            // Coefficient i contributes through filter tap t - 2i.
            let i_min = (t + 1).saturating_sub(f).div_ceil(2);
            let i_max = (t / 2).min(len.saturating_sub(1));
            (i_min..=i_max)
                .map(|i| {
                    let tap = t - 2 * i;
                    approx[i] * rec_lo[tap] + detail[i] * rec_hi[tap]
                })
                .sum()
        })
        .collect()
}

/// Maximum useful decomposition level for a signal length:
/// `floor(log2(len / (f - 1)))`, 0 when even one level would push the
/// approximation band below the filter support.
pub fn max_level(len: usize, wavelet: Wavelet) -> usize {
    let support = wavelet.filter_len() - 1;
    if support == 0 || len < support {
        return 0;
    }
    let mut ratio = len / support;
    let mut level = 0;
    while ratio > 1 {
        ratio /= 2;
        level += 1;
    }
    level
}

/// Multi-level decomposition: `[approx_L, detail_L, ..., detail_1]`.
pub fn wavedec(signal: &[f64], wavelet: Wavelet, level: usize) -> Vec<Vec<f64>> {
    let mut details = Vec::with_capacity(level);
    let mut approx = signal.to_vec();
    for _ in 0..level {
        let (a, d) = dwt(&approx, wavelet);
        details.push(d);
        approx = a;
    }
    let mut bands = Vec::with_capacity(level + 1);
    bands.push(approx);
    bands.extend(details.into_iter().rev());
    bands
}

/// Multi-level reconstruction, inverting [`wavedec`].
///
/// Each synthesis step may run one sample long; the extra sample is
/// trimmed against the next detail band, as in the analysis layout.
pub fn waverec(bands: &[Vec<f64>], wavelet: Wavelet) -> Vec<f64> {
    let mut approx = bands[0].clone();
    for detail in &bands[1..] {
        if approx.len() == detail.len() + 1 {
            approx.truncate(detail.len());
        }
        approx = idwt(&approx, detail, wavelet);
    }
    approx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64], tolerance: f64) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!(
                (a - e).abs() < tolerance,
                "expected {expected:?}, got {actual:?}"
            );
        }
    }

    #[test]
    fn test_reflect_indices() {
        assert_eq!(reflect(-1, 4), 0);
        assert_eq!(reflect(-2, 4), 1);
        assert_eq!(reflect(0, 4), 0);
        assert_eq!(reflect(3, 4), 3);
        assert_eq!(reflect(4, 4), 3);
        assert_eq!(reflect(5, 4), 2);
    }

    #[test]
    fn test_haar_two_samples() {
        let (a, d) = dwt(&[3.0, 1.0], Wavelet::Haar);
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert_close(&a, &[4.0 * s], 1e-12);
        assert_close(&d, &[2.0 * s], 1e-12);
        let rec = idwt(&a, &d, Wavelet::Haar);
        assert_close(&rec, &[3.0, 1.0], 1e-12);
    }

    #[test]
    fn test_haar_roundtrip_odd_length() {
        let x = [1.0, 4.0, 2.0];
        let (a, d) = dwt(&x, Wavelet::Haar);
        assert_eq!(a.len(), 2);
        let rec = idwt(&a, &d, Wavelet::Haar);
        assert_eq!(rec.len(), 4);
        assert_close(&rec[..3], &x, 1e-12);
    }

    #[test]
    fn test_db2_roundtrip() {
        let x: Vec<f64> = (0..11).map(|i| ((i * i) % 7) as f64 - 2.5).collect();
        let (a, d) = dwt(&x, Wavelet::Db2);
        assert_eq!(a.len(), 7);
        let rec = idwt(&a, &d, Wavelet::Db2);
        assert_close(&rec[..x.len()], &x, 1e-9);
    }

    #[test]
    fn test_db4_roundtrip() {
        let x: Vec<f64> = (0..25).map(|i| (i as f64 * 0.7).sin() * 3.0).collect();
        let (a, d) = dwt(&x, Wavelet::Db4);
        let rec = idwt(&a, &d, Wavelet::Db4);
        assert_close(&rec[..x.len()], &x, 1e-9);
    }

    #[test]
    fn test_max_level() {
        assert_eq!(max_level(8, Wavelet::Haar), 3);
        assert_eq!(max_level(7, Wavelet::Haar), 2);
        assert_eq!(max_level(1, Wavelet::Haar), 0);
        assert_eq!(max_level(6, Wavelet::Db2), 1);
        assert_eq!(max_level(12, Wavelet::Db2), 2);
        assert_eq!(max_level(6, Wavelet::Db4), 0);
    }

    #[test]
    fn test_multilevel_roundtrip() {
        let x: Vec<f64> = (0..40).map(|i| (i as f64 * 0.3).cos() * 10.0).collect();
        for wavelet in [Wavelet::Haar, Wavelet::Db2, Wavelet::Db4] {
            let level = max_level(x.len(), wavelet);
            assert!(level >= 1);
            let bands = wavedec(&x, wavelet, level);
            let rec = waverec(&bands, wavelet);
            assert!(rec.len() >= x.len());
            assert_close(&rec[..x.len()], &x, 1e-8);
        }
    }
}
