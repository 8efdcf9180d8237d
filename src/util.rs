/// Numeric conversion helpers.
///
/// The language only has `f64` numbers while lists are indexed and measured
/// in `usize`. The helpers here convert between the two and report an error
/// instead of rounding or truncating.
pub mod num;
