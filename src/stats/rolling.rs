//! Trailing moving averages.

/// Trailing mean over `window` samples.
///
/// Position `i` averages `values[i + 1 - window ..= i]`. The first
/// `window - 1` positions, and any window containing a missing reading, are
/// `None`. A zero window yields all `None`.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    // running sum of value / window, so readings near f64::MAX cannot overflow
    let scale = window as f64;
    let mut mean = 0.0;
    let mut missing = 0usize;
    for (i, v) in values.iter().enumerate() {
        match v {
            Some(x) => mean += x / scale,
            None => missing += 1,
        }
        if i >= window {
            match values[i - window] {
                Some(x) => mean -= x / scale,
                None => missing -= 1,
            }
        }
        if i + 1 >= window && missing == 0 {
            out[i] = Some(mean);
        }
    }

    out
}
