/// Piecewise-linear interpolation of `x` over the increasing points `xp`.
///
/// Outside the range the first/last `fp` value is returned. On repeated `xp`
/// values the right-most point of the run wins. Empty input gives NaN.
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let n = xp.len().min(fp.len());
    if n == 0 || x.is_nan() {
        return f64::NAN;
    }

    if x < xp[0] {
        return fp[0];
    }
    if x > xp[n - 1] {
        return fp[n - 1];
    }

    let j = xp[..n].partition_point(|&v| v <= x) - 1;
    if j == n - 1 || xp[j] == x {
        return fp[j];
    }

    let slope = (fp[j + 1] - fp[j]) / (xp[j + 1] - xp[j]);
    slope * (x - xp[j]) + fp[j]
}

pub fn round_float(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
