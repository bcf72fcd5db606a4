//! Lagged self-correlation of column series and rows.

use eca_data::{Autocorrelation, EcaError, Result, Row};

/// Pearson correlation of two equal-length series, NaN when either is constant.
fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }
    if var_a == 0.0 || var_b == 0.0 {
        return f64::NAN;
    }
    (cov / (var_a.sqrt() * var_b.sqrt())).clamp(-1.0, 1.0)
}

fn as_f64(series: &[bool]) -> Vec<f64> {
    series.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect()
}

/// Largest `max_lag` [`autocorrelation`] accepts.
pub const MAX_AUTOCORRELATION_LAG: usize = 1 << 20;

fn correlation_at(values: &[f64], lag: usize) -> Result<f64> {
    let len = values.len();
    if len.saturating_sub(lag) < 2 {
        return Err(EcaError::InsufficientData { lag, len });
    }
    if lag == 0 {
        let first = values[0];
        return Ok(if values.iter().all(|&v| v == first) {
            f64::NAN
        } else {
            1.0
        });
    }
    Ok(pearson(&values[..len - lag], &values[lag..]))
}

/// Correlation between `series[0..G-k]` and `series[k..G]`.
///
/// Needs at least two overlapping samples; otherwise
/// [`EcaError::InsufficientData`]. A constant overlap yields NaN. Lag 0 is
/// exactly 1.0 for any non-constant series.
pub fn lag_correlation(series: &[bool], lag: usize) -> Result<f64> {
    correlation_at(&as_f64(series), lag)
}

/// Correlation for lags `0..=max_lag` (index = lag).
///
/// Lags that lack data are stored as NaN; the rest of the series is still
/// computed. `max_lag == 0`, `max_lag` above [`MAX_AUTOCORRELATION_LAG`] or
/// an empty series is rejected.
pub fn autocorrelation(series: &[bool], max_lag: usize) -> Result<Autocorrelation> {
    if max_lag == 0 {
        return Err(EcaError::invalid_parameters("max_lag must be positive"));
    }
    if max_lag > MAX_AUTOCORRELATION_LAG {
        return Err(EcaError::invalid_parameters(format!(
            "max_lag must be at most {MAX_AUTOCORRELATION_LAG}, got {max_lag}"
        )));
    }
    if series.is_empty() {
        return Err(EcaError::invalid_parameters(
            "autocorrelation requires a non-empty column",
        ));
    }
    let values = as_f64(series);
    // Lags at or past the series length never have two overlapping samples.
    let computed = max_lag.min(values.len());
    let mut result = Vec::with_capacity(max_lag + 1);
    for lag in 0..=computed {
        match correlation_at(&values, lag) {
            Ok(v) => result.push(v),
            Err(e) if e.is_localized() => result.push(f64::NAN),
            Err(e) => return Err(e),
        }
    }
    result.resize(max_lag + 1, f64::NAN);
    let undefined = result.iter().filter(|v| v.is_nan()).count();
    if undefined > 0 {
        tracing::debug!(
            len = series.len(),
            max_lag = max_lag,
            undefined = undefined,
            "Autocorrelation lags undefined"
        );
    }
    Ok(Autocorrelation { values: result })
}

/// Mean-centred, non-wrapped correlation of a row with itself for lags
/// `0..=max_lag` (capped at `W-1`), normalised by lag 0. A constant row
/// yields all zeros.
#[must_use]
pub fn spatial_autocorrelation(row: &Row, max_lag: usize) -> Vec<f64> {
    let values: Vec<f64> = row.iter().map(|b| if b { 1.0 } else { 0.0 }).collect();
    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let centred: Vec<f64> = values.iter().map(|v| v - mean).collect();
    let lags = max_lag.min(n - 1);
    let mut result: Vec<f64> = (0..=lags)
        .map(|k| {
            centred[..n - k]
                .iter()
                .zip(&centred[k..])
                .map(|(a, b)| a * b)
                .sum()
        })
        .collect();
    let zero = result[0];
    if zero != 0.0 {
        for v in &mut result {
            *v /= zero;
        }
    }
    result
}
