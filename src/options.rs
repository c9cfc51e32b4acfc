/// Seed used by [TriangulationOptions::default()]
pub const DEFAULT_SEED: u64 = 0x5e1d_e1_7a9e_201d;

/// Settings for a triangulation.
///
/// The segment insertion order is drawn from a [rand::rngs::StdRng] seeded with
/// [TriangulationOptions::seed], so the same polygon and seed always produce the same triangles.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TriangulationOptions {
    pub seed: u64,
    /// Check the trapezoidal map and query structure after every insertion, even in release builds.
    /// Debug builds always check.
    pub verify_structure: bool,
}

impl Default for TriangulationOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            verify_structure: false,
        }
    }
}

impl TriangulationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_verify_structure(mut self, verify_structure: bool) -> Self {
        self.verify_structure = verify_structure;
        self
    }

    pub(crate) fn should_verify(&self) -> bool {
        cfg!(debug_assertions) || self.verify_structure
    }
}
