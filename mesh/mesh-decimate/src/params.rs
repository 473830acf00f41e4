//! Parameters for mesh decimation.

/// Parameters controlling edge-collapse decimation.
#[derive(Debug, Clone)]
pub struct DecimateParams {
    /// Number of faces to stop at. Decimation is a no-op when the input
    /// already has this many faces or fewer.
    pub target_faces: usize,

    /// Refuse to collapse boundary edges (edges with a single adjacent face).
    /// Closed surfaces have none, so this only matters for open input.
    pub lock_boundary: bool,

    /// Abandon a collapse whose quadric error exceeds this value. `None`
    /// places no limit.
    pub max_error: Option<f64>,
}

impl Default for DecimateParams {
    fn default() -> Self {
        Self {
            target_faces: 10_000,
            lock_boundary: true,
            max_error: None,
        }
    }
}

impl DecimateParams {
    /// Params targeting a specific face count.
    #[must_use]
    pub fn to_face_count(target_faces: usize) -> Self {
        Self {
            target_faces,
            ..Default::default()
        }
    }

    /// Set the maximum collapse error.
    #[must_use]
    pub const fn with_max_error(mut self, max_error: f64) -> Self {
        self.max_error = Some(max_error);
        self
    }

    /// Allow boundary edges to collapse.
    #[must_use]
    pub const fn allowing_boundary_collapse(mut self) -> Self {
        self.lock_boundary = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_locks_boundary() {
        let params = DecimateParams::default();
        assert!(params.lock_boundary);
        assert!(params.max_error.is_none());
    }

    #[test]
    fn builders_compose() {
        let params = DecimateParams::to_face_count(500)
            .with_max_error(0.25)
            .allowing_boundary_collapse();
        assert_eq!(params.target_faces, 500);
        assert_eq!(params.max_error, Some(0.25));
        assert!(!params.lock_boundary);
    }
}
