use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts a `usize` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `InvalidArgument` if the value exceeds `MAX_SAFE_U64_INT`.
///
/// ## Example
/// ```
/// use lumen::util::num::usize_to_f64_checked;
///
/// assert_eq!(usize_to_f64_checked(100, 0).unwrap(), 100.0);
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64_checked(value: usize, line: usize) -> EvalResult<f64> {
    let wide = value as u64;
    if wide > MAX_SAFE_U64_INT {
        return Err(RuntimeError::InvalidArgument { details: format!("{value} is too large to be represented as a number"),
                                                   line });
    }

    Ok(wide as f64)
}

/// Converts a number to a sequence index or count.
///
/// The value must be finite, non-negative and integral.
///
/// ## Errors
/// Returns `InvalidIndex` carrying the rejected number otherwise.
///
/// ## Example
/// ```
/// use lumen::{error::RuntimeError, util::num::f64_to_index};
///
/// assert_eq!(f64_to_index(3.0, 1).unwrap(), 3);
/// assert!(matches!(f64_to_index(1.5, 7),
///                  Err(RuntimeError::InvalidIndex { line: 7, .. })));
/// assert!(f64_to_index(-1.0, 1).is_err());
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn f64_to_index(value: f64, line: usize) -> EvalResult<usize> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > MAX_SAFE_U64_INT as f64
    {
        return Err(RuntimeError::InvalidIndex { found: value,
                                                line });
    }

    Ok(value as usize)
}
