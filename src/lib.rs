//! This library provides [`Waypoint`], the time-tagged pose sample that trajectory generation is
//! built from.
//!
//! A waypoint combines three things:
//!
//! - a position of arbitrary dimension (joint angles, cartesian coordinates, or anything else
//!   that lives in a vector space),
//! - an optional 3-D orientation, which reads as the identity rotation when it was never given,
//! - and a time (or, more generally, a parameter along the trajectory).
//!
//! The dimension of a waypoint is fixed the first time it receives a non-empty position, and
//! [`Waypoint::set`] refuses to change it afterwards. Waypoints support the usual vector-space
//! operations on their positions so that trajectory code can blend, offset, and scale them.
//!
//! # Examples
//!
//! Waypoints can be built from a plain vector, from a rigid displacement (an
//! [`Isometry3`](nalgebra::Isometry3), whose translation becomes the position), or from just an
//! orientation:
//!
//! ```
//! use nalgebra::{DVector, Isometry3, Translation3, UnitQuaternion};
//! use tgl::{Waypoint, WaypointError};
//! use uom::si::{f64::Time, time::second};
//!
//! let start = Waypoint::new(DVector::from_column_slice(&[0., 0., 0.]), Time::new::<second>(0.));
//! let end = Waypoint::from_displacement(
//!     Isometry3::from_parts(Translation3::new(2., 2., 2.), UnitQuaternion::identity()),
//!     Time::new::<second>(1.),
//! );
//!
//! // half-way there, both in space and in time
//! let halfway = start.lerp(&end, 0.5).expect("both are three-dimensional");
//! assert_eq!(halfway.as_slice(), &[1., 1., 1.]);
//! assert_eq!(halfway.time(), Time::new::<second>(0.5));
//!
//! // an orientation-only waypoint takes on whatever dimension it is first given
//! let mut heading = Waypoint::from_rotation(UnitQuaternion::identity(), Time::new::<second>(2.));
//! assert_eq!(heading.dimension(), 0);
//! heading.set(DVector::from_column_slice(&[4., 5.])).expect("dimension was still open");
//! assert_eq!(
//!     heading.set(DVector::from_column_slice(&[4., 5., 6.])),
//!     Err(WaypointError::DimensionMismatch { expected: 2, actual: 3 }),
//! );
//!
//! // dividing by zero is reported rather than producing infinities
//! assert_eq!(start.checked_div(0.), Err(WaypointError::DivideByZero));
//! ```

mod error;
mod waypoint;

pub(crate) type DVector = nalgebra::DVector<f64>;
pub(crate) type UnitQuaternion = nalgebra::UnitQuaternion<f64>;
pub(crate) type Isometry3 = nalgebra::Isometry3<f64>;

pub use error::WaypointError;
pub use waypoint::Waypoint;
