//! 2D geometry types [`Point`], [`Size`], [`Rect`], and [`Margins`], generic
//! over the scalar [`Unit`] they are measured in.

use std::fmt::Debug;
use std::ops::{Add, Sub};

use arrayvec::ArrayVec;

/// A 2D point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point<T: Unit> {
    pub x: T,
    pub y: T,
}

impl<T: Unit> Point<T> {
    pub const ZERO: Self = Self {
        x: T::ZERO,
        y: T::ZERO,
    };

    #[must_use]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Unit, T1: Into<T>, T2: Into<T>> From<(T1, T2)> for Point<T> {
    fn from((x, y): (T1, T2)) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// A 2D extent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size<T: Unit> {
    pub width: T,
    pub height: T,
}

impl<T: Unit> Size<T> {
    pub const ZERO: Self = Self {
        width: T::ZERO,
        height: T::ZERO,
    };

    #[must_use]
    pub fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width > T::ZERO && self.height > T::ZERO)
    }
}

impl<T: Unit, T1: Into<T>, T2: Into<T>> From<(T1, T2)> for Size<T> {
    fn from((width, height): (T1, T2)) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
        }
    }
}

/// A 2D rectangle stored as an origin and an extent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect<T: Unit> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T: Unit> Rect<T> {
    pub const ZERO: Self = Self {
        x: T::ZERO,
        y: T::ZERO,
        width: T::ZERO,
        height: T::ZERO,
    };

    pub fn new(origin: impl Into<Point<T>>, size: impl Into<Size<T>>) -> Self {
        let origin = origin.into();
        let size = size.into();

        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    #[must_use]
    pub fn from_ltrb(left: T, top: T, right: T, bottom: T) -> Self {
        Self {
            x: left,
            y: top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }

    #[must_use]
    pub fn origin(&self) -> Point<T> {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> Size<T> {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn left(&self) -> T {
        self.x
    }

    #[must_use]
    pub fn top(&self) -> T {
        self.y
    }

    #[must_use]
    pub fn right(&self) -> T {
        self.x.saturating_add(self.width)
    }

    #[must_use]
    pub fn bottom(&self) -> T {
        self.y.saturating_add(self.height)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Half-open containment: the right and bottom edges are outside.
    #[must_use]
    pub fn contains(&self, point: Point<T>) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// The overlapping area of two rectangles, if it is non-empty.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let left = max(self.left(), other.left());
        let right = min(self.right(), other.right());
        let top = max(self.top(), other.top());
        let bottom = min(self.bottom(), other.bottom());

        if left >= right || top >= bottom {
            None
        } else {
            Some(Self::from_ltrb(left, top, right, bottom))
        }
    }

    /// The smallest rectangle containing both `self` and `other`. Empty
    /// rectangles do not contribute.
    #[must_use]
    pub fn bounding_union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }

        if other.is_empty() {
            return *self;
        }

        Self::from_ltrb(
            min(self.left(), other.left()),
            min(self.top(), other.top()),
            max(self.right(), other.right()),
            max(self.bottom(), other.bottom()),
        )
    }

    /// The parts of `self` that are not covered by `other`, as at most four
    /// disjoint rectangles.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> ArrayVec<Self, 4> {
        let mut parts = ArrayVec::new();

        let Some(overlap) = self.intersection(other) else {
            if !self.is_empty() {
                parts.push(*self);
            }
            return parts;
        };

        let candidates = [
            // above
            Self::from_ltrb(self.left(), self.top(), self.right(), overlap.top()),
            // below
            Self::from_ltrb(self.left(), overlap.bottom(), self.right(), self.bottom()),
            // left of
            Self::from_ltrb(self.left(), overlap.top(), overlap.left(), overlap.bottom()),
            // right of
            Self::from_ltrb(overlap.right(), overlap.top(), self.right(), overlap.bottom()),
        ];

        for part in candidates {
            if !part.is_empty() {
                parts.push(part);
            }
        }

        parts
    }
}

impl<T: Unit> From<Size<T>> for Rect<T> {
    fn from(size: Size<T>) -> Self {
        Self {
            x: T::ZERO,
            y: T::ZERO,
            width: size.width,
            height: size.height,
        }
    }
}

/// Insets on the four sides of a rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins<T: Unit> {
    pub left: T,
    pub top: T,
    pub right: T,
    pub bottom: T,
}

impl<T: Unit> Margins<T> {
    pub const ZERO: Self = Self {
        left: T::ZERO,
        top: T::ZERO,
        right: T::ZERO,
        bottom: T::ZERO,
    };

    #[must_use]
    pub fn new(left: T, top: T, right: T, bottom: T) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn uniform(value: T) -> Self {
        Self::new(value, value, value, value)
    }
}

/// A marker trait for the scalar types geometry can be measured in.
///
/// Edge arithmetic goes through `saturating_add` and `saturating_sub` so that
/// integer rectangles near the limits of their type clamp instead of
/// overflowing.
pub trait Unit:
    Copy + Debug + Default + PartialOrd + Add<Output = Self> + Sub<Output = Self>
{
    const ZERO: Self;

    #[must_use]
    fn saturating_add(self, rhs: Self) -> Self;

    #[must_use]
    fn saturating_sub(self, rhs: Self) -> Self;
}

macro_rules! impl_unit_int {
    ($($ty:ty),*) => {
        $(
            impl Unit for $ty {
                const ZERO: Self = 0;

                fn saturating_add(self, rhs: Self) -> Self {
                    <$ty>::saturating_add(self, rhs)
                }

                fn saturating_sub(self, rhs: Self) -> Self {
                    <$ty>::saturating_sub(self, rhs)
                }
            }
        )*
    };
}

macro_rules! impl_unit_float {
    ($($ty:ty),*) => {
        $(
            impl Unit for $ty {
                const ZERO: Self = 0.0;

                fn saturating_add(self, rhs: Self) -> Self {
                    self + rhs
                }

                fn saturating_sub(self, rhs: Self) -> Self {
                    self - rhs
                }
            }
        )*
    };
}

impl_unit_int!(i16, i32);
impl_unit_float!(f32, f64);

fn min<T: PartialOrd>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

fn max<T: PartialOrd>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}
