use thiserror::Error;

#[cfg(doc)]
use crate::Waypoint;

/// Reasons a [`Waypoint`] operation can be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WaypointError {
    /// The position vector has a different length than the waypoint's fixed dimension (or, for
    /// binary operations, than the other operand's).
    #[error("dimension mismatch: expected {expected} components, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A waypoint was divided by a scalar zero.
    #[error("attempted to divide a waypoint by zero")]
    DivideByZero,

    /// A waypoint was divided by NaN, or by a divisor small enough to make a finite component
    /// overflow to infinity.
    #[error("dividing the waypoint would produce non-finite components")]
    NonFiniteQuotient,
}
