use crate::error::{AppError, AppResult};

/// Score used when either vector has no direction
pub const ZERO_MAGNITUDE_SCORE: f64 = 0.0;

/// Cosine similarity of two equal-length vectors
///
/// A zero-magnitude vector (or any non-finite intermediate) yields
/// [`ZERO_MAGNITUDE_SCORE`], so the ranking never sees NaN or infinity.
/// Unequal lengths are a caller bug and fail with `InvalidArgument`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> AppResult<f64> {
    if a.len() != b.len() {
        return Err(AppError::InvalidArgument(format!(
            "vector length mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return Ok(ZERO_MAGNITUDE_SCORE);
    }

    let score = dot / denom;
    if score.is_finite() {
        Ok(score)
    } else {
        Ok(ZERO_MAGNITUDE_SCORE)
    }
}
