// ─────────────────────────────────────────────────────────────────────
// Lorenz-96 Multiscale — Coupling Kernel
// ─────────────────────────────────────────────────────────────────────
//! Lorenz-96 advection term on a periodic 1-D lattice of length M:
//!
//!   L(u; c, b)_j = c·b·(u_{j+1} - u_{j-2})·u_{j-1} - c·u_j
//!
//! Indices wrap modulo M. With c = b = 1 this is the plain one-layer
//! advection-plus-damping term. Meaningful for M ≥ 3; smaller lattices
//! still evaluate (indices alias) but carry no physical meaning.

/// Allocation-free kernel: writes L(u; c, b) into `out`.
///
/// `out` and `u` must have the same length.
#[inline]
pub fn coupling_kernel_into(out: &mut [f64], u: &[f64], c: f64, b: f64) {
    let m = u.len();
    if m == 0 {
        return;
    }
    let cb = c * b;
    for (j, o) in out.iter_mut().enumerate().take(m) {
        let next = u[(j + 1) % m];
        let back2 = u[(j + 2 * m - 2) % m];
        let back1 = u[(j + m - 1) % m];
        *o = cb * (next - back2) * back1 - c * u[j];
    }
}

/// Accumulating kernel: adds L(u; c, b) onto `out`.
///
/// Lets an evaluator seed `out` with its other terms first and stay
/// allocation-free.
#[inline]
pub fn coupling_kernel_add(out: &mut [f64], u: &[f64], c: f64, b: f64) {
    let m = u.len();
    if m == 0 {
        return;
    }
    let cb = c * b;
    for (j, o) in out.iter_mut().enumerate().take(m) {
        let next = u[(j + 1) % m];
        let back2 = u[(j + 2 * m - 2) % m];
        let back1 = u[(j + m - 1) % m];
        *o += cb * (next - back2) * back1 - c * u[j];
    }
}

/// Pure kernel: returns L(u; c, b) as a new vector.
pub fn coupling_kernel(u: &[f64], c: f64, b: f64) -> Vec<f64> {
    let mut out = vec![0.0; u.len()];
    coupling_kernel_into(&mut out, u, c, b);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Index-by-index reference using signed modular arithmetic.
    fn reference(u: &[f64], c: f64, b: f64) -> Vec<f64> {
        let m = u.len() as isize;
        let at = |i: isize| u[i.rem_euclid(m) as usize];
        (0..m)
            .map(|j| c * b * (at(j + 1) - at(j - 2)) * at(j - 1) - c * at(j))
            .collect()
    }

    #[test]
    fn test_zero_c_gives_zero() {
        for m in 3..12 {
            let u: Vec<f64> = (0..m).map(|i| (i as f64 * 0.7).sin() + 2.0).collect();
            let out = coupling_kernel(&u, 0.0, 0.0);
            assert!(out.iter().all(|&v| v == 0.0), "M={m}: {out:?}");
        }
    }

    #[test]
    fn test_manual_circular_shift() {
        // u = [1, 2, 3, 4], c = b = 1
        let out = coupling_kernel(&[1.0, 2.0, 3.0, 4.0], 1.0, 1.0);
        assert_eq!(out, vec![-5.0, -3.0, 3.0, -7.0]);
    }

    #[test]
    fn test_matches_reference() {
        let u: Vec<f64> = (0..17).map(|i| (i as f64 * 1.3).cos() * 3.0).collect();
        let (c, b) = (10.0, 10.0);
        let out = coupling_kernel(&u, c, b);
        for (a, r) in out.iter().zip(reference(&u, c, b)) {
            assert!((a - r).abs() < 1e-12, "{a} != {r}");
        }
    }

    #[test]
    fn test_constant_state_is_pure_damping() {
        let u = vec![2.5; 8];
        let out = coupling_kernel(&u, 3.0, 7.0);
        assert!(out.iter().all(|&v| (v + 7.5).abs() < 1e-12));
    }

    #[test]
    fn test_into_matches_alloc() {
        let u = [0.3, -1.2, 4.0, 0.0, 2.2];
        let mut out = [0.0; 5];
        coupling_kernel_into(&mut out, &u, 2.0, 0.5);
        assert_eq!(out.to_vec(), coupling_kernel(&u, 2.0, 0.5));
    }

    #[test]
    fn test_add_accumulates() {
        let u = [1.0, 2.0, 3.0, 4.0];
        let mut out = [10.0, 0.0, -1.0, 0.5];
        coupling_kernel_add(&mut out, &u, 1.0, 1.0);
        assert_eq!(out, [5.0, -3.0, 2.0, -6.5]);
    }

    #[test]
    fn test_empty_lattice() {
        assert!(coupling_kernel(&[], 1.0, 1.0).is_empty());
    }
}
