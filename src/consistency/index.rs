//! Random Index table and the CI / CR formulas.

/// Saaty's Random Index for `N = 1..=10` (index 0 is `N = 1`).
pub const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Random Index used for a matrix of size `n`.
///
/// Sizes above 10 are clamped to the last table entry (1.49). `n = 0` maps
/// to 0 like `n = 1`.
///
/// # Examples
///
/// ```
/// use u_ahp::consistency::random_index;
///
/// assert_eq!(random_index(3), 0.58);
/// assert_eq!(random_index(11), 1.49);
/// ```
pub fn random_index(n: usize) -> f64 {
    match n {
        0 => RANDOM_INDEX[0],
        n if n <= RANDOM_INDEX.len() => RANDOM_INDEX[n - 1],
        _ => RANDOM_INDEX[RANDOM_INDEX.len() - 1],
    }
}

/// Consistency Index `(λmax - n) / (n - 1)`, clamped at 0.
///
/// For a positive reciprocal matrix `λmax >= n`, so a negative value can
/// only come from rounding. Returns 0 for `n < 2`.
pub fn consistency_index(lambda_max: f64, n: usize) -> f64 {
    if n < 2 {
        return 0.0;
    }
    ((lambda_max - n as f64) / (n as f64 - 1.0)).max(0.0)
}

/// Consistency Ratio `CI / RI(n)`; 0 when `RI(n)` is 0 (`n <= 2`).
pub fn consistency_ratio(ci: f64, n: usize) -> f64 {
    let ri = random_index(n);
    if ri == 0.0 {
        0.0
    } else {
        ci / ri
    }
}
