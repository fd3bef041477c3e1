//! Two-threshold Otsu search.
//!
//! The histogram bins are read as relative frequencies `p_i = h_i / Σh`.
//! Every cut pair `t1 < t2` splits the range into `[0, t1]`, `(t1, t2]` and
//! `(t2, 255]`; the pair with the largest between-class variance
//! `Σ w_k (μ_k - μ_T)²` wins. The search is exhaustive, O(256²).

use otsu_seg_core::{Histogram, BINS};
use serde::{Deserialize, Serialize};

/// Pair of cut points with `low < high`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualThresholds {
    pub low: u8,
    pub high: u8,
}

impl DualThresholds {
    pub fn new(low: u8, high: u8) -> Option<Self> {
        (low < high).then_some(Self { low, high })
    }

    /// True if `v` lies strictly between the two cuts.
    #[inline]
    pub fn contains_strict(&self, v: u8) -> bool {
        self.low < v && v < self.high
    }
}

fn frequencies(hist: &Histogram) -> Option<Vec<f64>> {
    let total = hist.sum();
    if !(total > 0.0) {
        return None;
    }
    Some(hist.bins().iter().map(|&v| v as f64 / total).collect())
}

/// Between-class variance of the split `[0, t1]`, `(t1, t2]`, `(t2, 255]`.
///
/// `None` when `t1 >= t2`, the histogram is empty or a class has no weight.
pub fn between_class_variance(hist: &Histogram, t1: u8, t2: u8) -> Option<f64> {
    if t1 >= t2 {
        return None;
    }
    let p = frequencies(hist)?;
    let (t1, t2) = (t1 as usize, t2 as usize);

    let mut w = [0f64; 3];
    let mut s = [0f64; 3];
    for (i, &pi) in p.iter().enumerate() {
        let k = if i <= t1 {
            0
        } else if i <= t2 {
            1
        } else {
            2
        };
        w[k] += pi;
        s[k] += i as f64 * pi;
    }
    if w.iter().any(|&wk| wk <= 0.0) {
        return None;
    }

    let mt = s.iter().sum::<f64>();
    Some(
        (0..3)
            .map(|k| {
                let d = s[k] / w[k] - mt;
                w[k] * d * d
            })
            .sum(),
    )
}

/// Exhaustively search the cut pair maximizing between-class variance.
///
/// Ties keep the lowest `t1`, then the lowest `t2`. Returns `None` when no
/// pair leaves all three classes populated.
pub fn solve_dual_otsu(hist: &Histogram) -> Option<DualThresholds> {
    let p = frequencies(hist)?;

    // Suffix sums over (t2, 255]; summed from the right so that a tail of
    // empty bins is exactly zero.
    let mut tail_w = [0f64; BINS + 1];
    let mut tail_s = [0f64; BINS + 1];
    for i in (0..BINS).rev() {
        tail_w[i] = tail_w[i + 1] + p[i];
        tail_s[i] = tail_s[i + 1] + i as f64 * p[i];
    }
    let mt = tail_s[0];

    let mut best_var = 0f64;
    let mut best = None;

    let mut w0 = 0f64;
    let mut s0 = 0f64;
    for t1 in 0..BINS {
        w0 += p[t1];
        s0 += t1 as f64 * p[t1];
        if w0 <= 0.0 {
            continue;
        }
        let m0 = s0 / w0;

        let mut w1 = 0f64;
        let mut s1 = 0f64;
        for t2 in (t1 + 1)..BINS {
            w1 += p[t2];
            s1 += t2 as f64 * p[t2];

            let w2 = tail_w[t2 + 1];
            if w2 <= 0.0 {
                break;
            }
            if w1 <= 0.0 {
                continue;
            }
            let m1 = s1 / w1;
            let m2 = tail_s[t2 + 1] / w2;

            let var = w0 * (m0 - mt) * (m0 - mt)
                + w1 * (m1 - mt) * (m1 - mt)
                + w2 * (m2 - mt) * (m2 - mt);
            if var > best_var {
                best_var = var;
                best = Some((t1, t2));
            }
        }
    }

    let (low, high) = best?;
    log::debug!("dual otsu: low={low} high={high} var={best_var:.3}");
    DualThresholds::new(low as u8, high as u8)
}
