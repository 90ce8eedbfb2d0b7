/// Standard deviation below which a window is treated as constant.
pub const CONSTANT_STD_THRESHOLD: f64 = 1e-7;

/// Arithmetic mean of a non-empty slice of finite values.
///
/// Finite for any finite input, even when the plain sum would overflow.
pub fn mean(data: &[f64]) -> f64 {
    let n = data.len() as f64;
    let sum: f64 = data.iter().sum();
    if sum.is_finite() {
        sum / n
    } else {
        data.iter().map(|x| x / n).sum()
    }
}

/// Mean and population standard deviation of a slice.
pub fn mean_std(data: &[f64]) -> (f64, f64) {
    let n = data.len() as f64;
    let mean = mean(data);
    let var = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    if var.is_finite() {
        return (mean, var.sqrt());
    }
    // Squared deviations overflow: work on halved values scaled by the
    // largest deviation.
    let half = mean / 2.0;
    let scale = data
        .iter()
        .map(|x| (x / 2.0 - half).abs())
        .fold(0.0, f64::max);
    let ratio = data
        .iter()
        .map(|x| ((x / 2.0 - half) / scale).powi(2))
        .sum::<f64>()
        / n;
    (mean, 2.0 * scale * ratio.sqrt())
}

/// Z-normalize `data` into `out`.
///
/// Writes all zeros if the standard deviation is below
/// [`CONSTANT_STD_THRESHOLD`] (constant window).
pub fn z_normalize_into(data: &[f64], out: &mut [f64]) {
    debug_assert_eq!(data.len(), out.len());
    let (mean, std) = mean_std(data);
    if std < CONSTANT_STD_THRESHOLD {
        out.fill(0.0);
    } else {
        for (o, &x) in out.iter_mut().zip(data) {
            let z = (x - mean) / std;
            *o = if z.is_finite() {
                z
            } else {
                (x / 2.0 - mean / 2.0) / (std / 2.0)
            };
        }
    }
}

/// Z-normalize a slice, returning a new vector.
pub fn z_normalize(data: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; data.len()];
    z_normalize_into(data, &mut out);
    out
}
