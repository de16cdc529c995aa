use thiserror::Error;

/// Errors reported by the tessellation and contact-construction layers.
///
/// Structural problems fail fast at the point of detection; numerical
/// degeneracy of a candidate quadruple is absorbed by the engine (the
/// quadruple is excluded) and only surfaces through this type when a
/// caller invokes the tangent solver directly.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Fewer than 4 spheres were supplied, so no quadruple can ever form.
    #[error("triangulation requires at least 4 spheres, got {0}")]
    InsufficientInput(usize),

    /// A candidate tangency system has no numerically stable real solution.
    #[error("degenerate sphere configuration: {0}")]
    DegenerateConfiguration(&'static str),

    /// A sphere id outside the valid range was referenced.
    #[error("sphere id {id} out of range (valid range is 0..{len})")]
    InvalidIndex { id: usize, len: usize },

    /// A neighbor set does not match the sphere list it is applied to.
    #[error("incompatible input: {0}")]
    IncompatibleInput(String),
}
