use crate::error::WaypointError;
use crate::{DVector, Isometry3, UnitQuaternion};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use uom::si::f64::Time;
use uom::si::time::second;
use uom::ConstZero;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A time-tagged pose sample: a position of arbitrary dimension, an optional orientation, and the
/// time (or trajectory parameter) at which the sample applies.
///
/// The dimension of a waypoint is the length of its position vector. It is fixed the first time a
/// non-empty position is assigned (at construction or through [`Waypoint::set`]) and can never
/// change afterwards. A waypoint whose position is still empty accepts a position of any length.
///
/// Waypoints form a vector space over their positions: they can be added, subtracted, negated,
/// and scaled. Orientations are never combined by these operations. Instead, the result of any
/// operator carries the time and orientation of its left-hand operand.
///
/// ```rust
/// use nalgebra::DVector;
/// use tgl::Waypoint;
/// use uom::si::{f64::Time, time::second};
///
/// let one = Waypoint::from_slice(&[1., 1., 1.], Time::new::<second>(0.));
/// let two = Waypoint::from_slice(&[2., 2., 2.], Time::new::<second>(0.));
///
/// assert_eq!(&one + &one, two);
/// assert_eq!(&two / 2., one);
///
/// // a waypoint will not change its dimension once it has one
/// let mut wpt = one.clone();
/// assert!(wpt.set(DVector::from_column_slice(&[2., 2.])).is_err());
/// assert_eq!(wpt, one);
/// ```
///
/// # Panics
///
/// Operator forms that combine two waypoints (`+`, `-`, `+=`, `-=`) panic if the operands have
/// different dimensions, and division (`/`, `/=`) panics if the divisor is zero, NaN, or makes a
/// finite component overflow. Use [`Waypoint::checked_add`], [`Waypoint::checked_sub`], and
/// [`Waypoint::checked_div`] to handle those cases as a [`WaypointError`] instead.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Waypoint {
    position: DVector,
    orientation: Option<UnitQuaternion>,
    time: Time,
}

impl Waypoint {
    /// Constructs a waypoint at `position` with no orientation.
    ///
    /// The length of `position` becomes the waypoint's dimension (unless it is empty).
    #[must_use]
    pub fn new(position: DVector, time: impl Into<Time>) -> Self {
        Self {
            position,
            orientation: None,
            time: time.into(),
        }
    }

    /// Constructs a waypoint from the components of `position` with no orientation.
    #[must_use]
    pub fn from_slice(position: &[f64], time: impl Into<Time>) -> Self {
        Self::new(DVector::from_column_slice(position), time)
    }

    /// Constructs a three-dimensional waypoint from a rigid displacement.
    ///
    /// The translation of `displacement` becomes the position and its rotation becomes the
    /// orientation.
    #[must_use]
    pub fn from_displacement(displacement: Isometry3, time: impl Into<Time>) -> Self {
        Self {
            position: DVector::from_column_slice(displacement.translation.vector.as_slice()),
            orientation: Some(displacement.rotation),
            time: time.into(),
        }
    }

    /// Constructs a waypoint that only carries an orientation.
    ///
    /// The position is left empty, so the dimension is fixed by the first call to
    /// [`Waypoint::set`].
    #[must_use]
    pub fn from_rotation(rotation: UnitQuaternion, time: impl Into<Time>) -> Self {
        Self {
            position: DVector::zeros(0),
            orientation: Some(rotation),
            time: time.into(),
        }
    }

    /// Replaces the position of this waypoint.
    ///
    /// If the waypoint has no dimension yet (ie, its position is empty), any length is accepted
    /// and becomes the dimension from then on. Otherwise `position` must have exactly as many
    /// components as the current position, or [`WaypointError::DimensionMismatch`] is returned
    /// and the waypoint is left untouched.
    pub fn set(&mut self, position: DVector) -> Result<(), WaypointError> {
        if self.is_empty() {
            if !position.is_empty() {
                tracing::trace!(dimension = position.len(), "fixing waypoint dimension");
            }
        } else if position.len() != self.dimension() {
            tracing::debug!(
                expected = self.dimension(),
                actual = position.len(),
                "rejecting waypoint position with mismatched dimension"
            );
            return Err(WaypointError::DimensionMismatch {
                expected: self.dimension(),
                actual: position.len(),
            });
        }

        self.position = position;
        Ok(())
    }

    /// Replaces the time of this waypoint.
    pub fn set_time(&mut self, time: impl Into<Time>) {
        self.time = time.into();
    }

    /// Replaces the orientation of this waypoint.
    pub fn set_rotation(&mut self, rotation: UnitQuaternion) {
        self.orientation = Some(rotation);
    }

    /// Returns the position of this waypoint.
    #[must_use]
    pub fn get(&self) -> &DVector {
        &self.position
    }

    /// Returns the components of the position of this waypoint.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        self.position.as_slice()
    }

    /// Returns the orientation of this waypoint.
    ///
    /// A waypoint that was never given an orientation reports the identity rotation.
    #[must_use]
    pub fn rotation(&self) -> UnitQuaternion {
        self.orientation.unwrap_or_else(UnitQuaternion::identity)
    }

    /// Returns the time of this waypoint.
    #[must_use]
    pub fn time(&self) -> Time {
        self.time
    }

    /// Returns the number of components in the position of this waypoint.
    ///
    /// This is 0 until a position is assigned.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.position.len()
    }

    /// Returns `true` if no position has been assigned yet, so the dimension is still open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    /// Adds the position of `rhs` to the position of `self`.
    ///
    /// The result has the time and orientation of `self`. Returns
    /// [`WaypointError::DimensionMismatch`] if the two waypoints have different dimensions.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, WaypointError> {
        self.check_same_dimension(rhs)?;
        Ok(self.with_position(&self.position + &rhs.position))
    }

    /// Subtracts the position of `rhs` from the position of `self`.
    ///
    /// The result has the time and orientation of `self`. Returns
    /// [`WaypointError::DimensionMismatch`] if the two waypoints have different dimensions.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, WaypointError> {
        self.check_same_dimension(rhs)?;
        Ok(self.with_position(&self.position - &rhs.position))
    }

    /// Divides every component of the position by `divisor`.
    ///
    /// Returns [`WaypointError::DivideByZero`] rather than producing infinite or NaN components.
    /// A NaN divisor, or one so small that a finite component overflows, is rejected with
    /// [`WaypointError::NonFiniteQuotient`]. Components that were already non-finite are divided
    /// as-is.
    pub fn checked_div(&self, divisor: f64) -> Result<Self, WaypointError> {
        if divisor == 0. {
            return Err(WaypointError::DivideByZero);
        }
        let position = &self.position / divisor;
        let overflowed = self
            .position
            .iter()
            .zip(position.iter())
            .any(|(x, q)| x.is_finite() && !q.is_finite());
        if divisor.is_nan() || overflowed {
            return Err(WaypointError::NonFiniteQuotient);
        }
        Ok(self.with_position(position))
    }

    /// Linearly interpolate between this waypoint and another one.
    ///
    /// Specifically, returns `self * (1.0 - t) + rhs * t` for the positions and times, while the
    /// orientations are blended with normalized quaternion interpolation. If only one of the
    /// waypoints has an orientation, the other is taken to be the identity rotation; if neither
    /// has one, neither does the result.
    ///
    /// The value for `t` is not restricted to the range [0, 1].
    pub fn lerp(&self, rhs: &Self, t: f64) -> Result<Self, WaypointError> {
        self.check_same_dimension(rhs)?;
        let orientation = match (self.orientation, rhs.orientation) {
            (None, None) => None,
            _ => {
                // q and -q are the same rotation; blend towards whichever is nearer so the
                // interpolated quaternion never passes through zero
                let from = self.rotation();
                let mut to = rhs.rotation();
                if from.coords.dot(&to.coords) < 0. {
                    to = UnitQuaternion::new_unchecked(-to.into_inner());
                }
                Some(from.nlerp(&to, t))
            }
        };
        Ok(Self {
            position: self.position.lerp(&rhs.position, t),
            orientation,
            time: self.time * (1. - t) + rhs.time * t,
        })
    }

    fn check_same_dimension(&self, rhs: &Self) -> Result<(), WaypointError> {
        if self.dimension() == rhs.dimension() {
            Ok(())
        } else {
            Err(WaypointError::DimensionMismatch {
                expected: self.dimension(),
                actual: rhs.dimension(),
            })
        }
    }

    fn with_position(&self, position: DVector) -> Self {
        Self {
            position,
            orientation: self.orientation,
            time: self.time,
        }
    }
}

impl Default for Waypoint {
    fn default() -> Self {
        Self::new(DVector::zeros(0), Time::ZERO)
    }
}

impl From<Isometry3> for Waypoint {
    fn from(displacement: Isometry3) -> Self {
        Self::from_displacement(displacement, Time::ZERO)
    }
}

impl From<UnitQuaternion> for Waypoint {
    fn from(rotation: UnitQuaternion) -> Self {
        Self::from_rotation(rotation, Time::ZERO)
    }
}

// an absent orientation compares equal to an explicit identity, since that's what it reads as
impl PartialEq<Self> for Waypoint {
    fn eq(&self, other: &Self) -> bool {
        self.position.eq(&other.position)
            && self.time.eq(&other.time)
            && self.rotation().eq(&other.rotation())
    }
}

impl Display for Waypoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.position.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        let q = self.rotation().into_inner();
        write!(
            f,
            "] at {} s, rotation (w: {}, i: {}, j: {}, k: {})",
            self.time.get::<second>(),
            q.w,
            q.i,
            q.j,
            q.k
        )
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Waypoint {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        // NOTE: nalgebra zips the components, so differing lengths must be caught up front.
        self.dimension() == other.dimension()
            && self.position.abs_diff_eq(&other.position, epsilon)
            && self
                .time
                .get::<second>()
                .abs_diff_eq(&other.time.get::<second>(), epsilon)
            && self.rotation().abs_diff_eq(&other.rotation(), epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Waypoint {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.dimension() == other.dimension()
            && self
                .position
                .relative_eq(&other.position, epsilon, max_relative)
            && self.time.get::<second>().relative_eq(
                &other.time.get::<second>(),
                epsilon,
                max_relative,
            )
            && self
                .rotation()
                .relative_eq(&other.rotation(), epsilon, max_relative)
    }
}

impl Neg for &Waypoint {
    type Output = Waypoint;

    fn neg(self) -> Self::Output {
        self.with_position(-&self.position)
    }
}

impl Neg for Waypoint {
    type Output = Self;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Add<&Waypoint> for &Waypoint {
    type Output = Waypoint;

    fn add(self, rhs: &Waypoint) -> Self::Output {
        self.checked_add(rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl Add<Self> for Waypoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl AddAssign<&Waypoint> for Waypoint {
    fn add_assign(&mut self, rhs: &Waypoint) {
        if let Err(e) = self.check_same_dimension(rhs) {
            panic!("{e}");
        }
        self.position += &rhs.position;
    }
}

impl Sub<&Waypoint> for &Waypoint {
    type Output = Waypoint;

    fn sub(self, rhs: &Waypoint) -> Self::Output {
        self.checked_sub(rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl Sub<Self> for Waypoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl SubAssign<&Waypoint> for Waypoint {
    fn sub_assign(&mut self, rhs: &Waypoint) {
        if let Err(e) = self.check_same_dimension(rhs) {
            panic!("{e}");
        }
        self.position -= &rhs.position;
    }
}

impl Mul<f64> for &Waypoint {
    type Output = Waypoint;

    fn mul(self, scalar: f64) -> Self::Output {
        self.with_position(&self.position * scalar)
    }
}

impl Mul<f64> for Waypoint {
    type Output = Self;

    fn mul(mut self, scalar: f64) -> Self::Output {
        self *= scalar;
        self
    }
}

impl Mul<&Waypoint> for f64 {
    type Output = Waypoint;

    fn mul(self, rhs: &Waypoint) -> Self::Output {
        rhs * self
    }
}

impl Mul<Waypoint> for f64 {
    type Output = Waypoint;

    fn mul(self, rhs: Waypoint) -> Self::Output {
        rhs * self
    }
}

impl MulAssign<f64> for Waypoint {
    fn mul_assign(&mut self, scalar: f64) {
        self.position *= scalar;
    }
}

impl Div<f64> for &Waypoint {
    type Output = Waypoint;

    fn div(self, divisor: f64) -> Self::Output {
        self.checked_div(divisor).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl Div<f64> for Waypoint {
    type Output = Self;

    fn div(mut self, divisor: f64) -> Self::Output {
        self /= divisor;
        self
    }
}

impl DivAssign<f64> for Waypoint {
    fn div_assign(&mut self, divisor: f64) {
        match self.checked_div(divisor) {
            Ok(quotient) => self.position = quotient.position,
            Err(e) => panic!("{e}"),
        }
    }
}
