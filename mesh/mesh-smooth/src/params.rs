//! Parameters for the smoothing passes.

/// Plain Laplacian smoothing: each iteration pulls every free vertex
/// `lambda` of the way toward the centroid of its neighbours.
#[derive(Debug, Clone, Copy)]
pub struct LaplacianParams {
    /// Number of relaxation iterations.
    pub iterations: usize,
    /// Pull strength per iteration, in `(0, 1]`.
    pub lambda: f64,
}

impl Default for LaplacianParams {
    fn default() -> Self {
        Self {
            iterations: 10,
            lambda: 0.5,
        }
    }
}

impl LaplacianParams {
    /// Params with explicit iteration count and pull strength.
    #[must_use]
    pub const fn new(iterations: usize, lambda: f64) -> Self {
        Self { iterations, lambda }
    }
}

/// Taubin lambda-mu smoothing. Each iteration runs a shrink step of strength
/// `lambda` followed by an inflate step of strength `mu` (negative), which
/// removes high-frequency noise with far less volume loss than plain
/// Laplacian smoothing.
#[derive(Debug, Clone, Copy)]
pub struct TaubinParams {
    /// Number of lambda-mu iteration pairs.
    pub iterations: usize,
    /// Shrink strength, positive.
    pub lambda: f64,
    /// Inflate strength, negative and slightly larger in magnitude than
    /// `lambda`.
    pub mu: f64,
}

impl Default for TaubinParams {
    fn default() -> Self {
        Self {
            iterations: 50,
            lambda: 0.5,
            mu: -0.53,
        }
    }
}

impl TaubinParams {
    /// Params with an explicit iteration count and default strengths.
    #[must_use]
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }
}

/// Humphrey's classes (HC) smoothing. After each Laplacian step the vertices
/// are pushed back toward a blend of their original (`alpha`) and previous
/// (`1 - alpha`) positions, with `beta` weighting the local versus averaged
/// push-back. Keeps the surface close to where it started while still
/// flattening noise.
#[derive(Debug, Clone, Copy)]
pub struct HumphreyParams {
    /// Number of smoothing iterations.
    pub iterations: usize,
    /// Weight of the original position in the push-back blend, in `[0, 1]`.
    pub alpha: f64,
    /// Weight of the local correction against the neighbour-averaged one,
    /// in `[0, 1]`.
    pub beta: f64,
}

impl Default for HumphreyParams {
    fn default() -> Self {
        Self {
            iterations: 30,
            alpha: 0.1,
            beta: 0.6,
        }
    }
}

impl HumphreyParams {
    /// Params with an explicit iteration count and default weights.
    #[must_use]
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }
}
