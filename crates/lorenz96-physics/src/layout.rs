// ─────────────────────────────────────────────────────────────────────
// Lorenz-96 Multiscale — Two-Layer State Layout
// ─────────────────────────────────────────────────────────────────────
//! Packing of slow and fast variables into one flat state vector:
//!
//!   u = [ X_0 .. X_{K-1} | Y_{0,0} .. Y_{0,J-1} | Y_{1,0} .. | Y_{K-1,J-1} ]
//!
//! Y_{i,j} sits at `K + i·J + j`, i.e. the J fast variables coupled to
//! slow index i are contiguous. Reduction and broadcast depend on this.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use lorenz96_types::{L96Error, L96Result};

/// Serialised form of a layout: only K and J cross the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct LayoutDims {
    k: usize,
    j: usize,
}

/// Immutable two-layer model descriptor {K, J, N_J, N}.
///
/// N_J = K·J and N = K + K·J are always derived from K and J.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LayoutDims", into = "LayoutDims")]
pub struct TwoLayerLayout {
    k: usize,
    j: usize,
    n_j: usize,
    n: usize,
}

impl TwoLayerLayout {
    /// Build a descriptor for K slow variables with J fast variables each.
    ///
    /// Fails fast on K == 0 or J == 0, since every slice derived from the
    /// descriptor would otherwise be silently wrong.
    pub fn new(k: usize, j: usize) -> L96Result<Self> {
        if k < 1 {
            return Err(L96Error::InvalidDescriptor(format!(
                "K (slow variables) must be >= 1, got {k}"
            )));
        }
        if j < 1 {
            return Err(L96Error::InvalidDescriptor(format!(
                "J (fast variables per slow variable) must be >= 1, got {j}"
            )));
        }
        let n_j = k.checked_mul(j).ok_or_else(|| {
            L96Error::InvalidDescriptor(format!("K·J overflows usize (K={k}, J={j})"))
        })?;
        let n = k.checked_add(n_j).ok_or_else(|| {
            L96Error::InvalidDescriptor(format!("K + K·J overflows usize (K={k}, J={j})"))
        })?;
        Ok(Self { k, j, n_j, n })
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn j(&self) -> usize {
        self.j
    }

    /// Fast-variable count K·J.
    #[inline]
    pub fn n_j(&self) -> usize {
        self.n_j
    }

    /// Full state length K + K·J.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Indices of the slow block, `[0, K)`.
    #[inline]
    pub fn slow_range(&self) -> Range<usize> {
        0..self.k
    }

    /// Indices of the fast block, `[K, N)`.
    #[inline]
    pub fn fast_range(&self) -> Range<usize> {
        self.k..self.n
    }

    /// Indices of the J fast variables coupled to slow index `i`.
    #[inline]
    pub fn fast_range_of(&self, i: usize) -> Range<usize> {
        let start = self.k + i * self.j;
        start..start + self.j
    }

    /// Flat position of Y_{i,j}.
    #[inline]
    pub fn fast_index(&self, i: usize, j: usize) -> usize {
        self.k + i * self.j + j
    }

    /// Split a state into (X, Y).
    #[inline]
    pub fn split<'a>(&self, u: &'a [f64]) -> (&'a [f64], &'a [f64]) {
        let (x, y) = u.split_at(self.k);
        (x, &y[..self.n_j])
    }

    /// Split a mutable state (or derivative buffer) into (X, Y).
    #[inline]
    pub fn split_mut<'a>(&self, u: &'a mut [f64]) -> (&'a mut [f64], &'a mut [f64]) {
        let (x, y) = u.split_at_mut(self.k);
        (x, &mut y[..self.n_j])
    }

    /// The J fast values belonging to slow index `i`.
    #[inline]
    pub fn fast_of<'a>(&self, u: &'a [f64], i: usize) -> &'a [f64] {
        &u[self.fast_range_of(i)]
    }

    /// Per-slow-index reduction: `out[i] = Σ_j Y[i, j]`.
    ///
    /// `y` is the fast block (length K·J), `out` has length K.
    pub fn reduce_fast(&self, y: &[f64], out: &mut [f64]) {
        for (o, group) in out.iter_mut().zip(y.chunks_exact(self.j)) {
            *o = group.iter().sum();
        }
    }

    /// Broadcast: `out[i·J + j] = x[i]` for every fast slot of slow index i.
    pub fn broadcast_slow(&self, x: &[f64], out: &mut [f64]) {
        for (group, &xi) in out.chunks_exact_mut(self.j).zip(x.iter()) {
            group.fill(xi);
        }
    }
}

impl TryFrom<LayoutDims> for TwoLayerLayout {
    type Error = L96Error;

    fn try_from(d: LayoutDims) -> L96Result<Self> {
        Self::new(d.k, d.j)
    }
}

impl From<TwoLayerLayout> for LayoutDims {
    fn from(l: TwoLayerLayout) -> Self {
        Self { k: l.k, j: l.j }
    }
}
