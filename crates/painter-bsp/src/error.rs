//! Error type for fallible plane and builder construction.
//!
//! Tree construction and traversal never fail; only the explicit
//! constructors below can reject their input.

use thiserror::Error;

/// Errors reported when building planes or configuring a tree builder.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BspError {
    /// A plane was requested from a normal vector of zero length.
    #[error("plane normal has zero length")]
    DegenerateNormal,

    /// A plane was requested from three collinear or coincident points.
    #[error("triangle vertices are collinear and do not define a plane")]
    DegenerateTriangle,

    /// The classification tolerance is negative, NaN or infinite.
    #[error("classification epsilon must be finite and non-negative, got {0}")]
    InvalidEpsilon(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        assert_eq!(
            BspError::DegenerateNormal.to_string(),
            "plane normal has zero length"
        );
        assert!(BspError::InvalidEpsilon(-1.0).to_string().contains("-1"));
    }
}
