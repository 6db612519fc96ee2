use num::cast;

/// Cast with loss of precision, explicitly clamping out of bounds values instead
/// of panicking (also shuts up clippy 📎)
pub(crate) fn usize_to_f64(x: usize) -> f64 {
    cast(x).unwrap_or(f64::INFINITY)
}

/// Exact for every value up to `2^53`, which covers all Pascal-row entries
/// this crate tabulates.
pub(crate) fn u64_to_f64(x: u64) -> f64 {
    cast(x).unwrap_or(f64::INFINITY)
}
