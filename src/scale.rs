//! Conversion between logical and device pixels.
//!
//! The scale factor counts device pixels per logical pixel, so converting to
//! device pixels multiplies and converting back divides.

use crate::{
    geometry::{Margins, Point, Rect, Size, Unit},
    region::Region,
};

/// Relative tolerance used when comparing scale factors.
pub const FACTOR_EPSILON: f64 = 1e-6;

/// Compares two factors with a tolerance relative to their magnitude.
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= FACTOR_EPSILON * 1f64.max(a.abs()).max(b.abs())
}

/// A value that can be multiplied or divided by a scale factor.
///
/// Integer implementations round to the nearest integer, away from zero on
/// ties.
pub trait Scalable: Sized {
    #[must_use]
    fn mul_factor(self, factor: f64) -> Self;

    #[must_use]
    fn div_factor(self, factor: f64) -> Self;
}

macro_rules! impl_scalable_int {
    ($($ty:ty),*) => {
        $(
            impl Scalable for $ty {
                fn mul_factor(self, factor: f64) -> Self {
                    (f64::from(self) * factor).round() as $ty
                }

                fn div_factor(self, factor: f64) -> Self {
                    (f64::from(self) / factor).round() as $ty
                }
            }
        )*
    };
}

impl_scalable_int!(i16, i32);

impl Scalable for f32 {
    fn mul_factor(self, factor: f64) -> Self {
        (f64::from(self) * factor) as f32
    }

    fn div_factor(self, factor: f64) -> Self {
        (f64::from(self) / factor) as f32
    }
}

impl Scalable for f64 {
    fn mul_factor(self, factor: f64) -> Self {
        self * factor
    }

    fn div_factor(self, factor: f64) -> Self {
        self / factor
    }
}

impl<T: Unit + Scalable> Scalable for Point<T> {
    fn mul_factor(self, factor: f64) -> Self {
        Point::new(self.x.mul_factor(factor), self.y.mul_factor(factor))
    }

    fn div_factor(self, factor: f64) -> Self {
        Point::new(self.x.div_factor(factor), self.y.div_factor(factor))
    }
}

impl<T: Unit + Scalable> Scalable for Size<T> {
    fn mul_factor(self, factor: f64) -> Self {
        Size::new(
            self.width.mul_factor(factor),
            self.height.mul_factor(factor),
        )
    }

    fn div_factor(self, factor: f64) -> Self {
        Size::new(
            self.width.div_factor(factor),
            self.height.div_factor(factor),
        )
    }
}

// Origin and size are scaled separately rather than corner to corner so that
// rounding never makes the extent depend on the position.
impl<T: Unit + Scalable> Scalable for Rect<T> {
    fn mul_factor(self, factor: f64) -> Self {
        Rect::new(
            self.origin().mul_factor(factor),
            self.size().mul_factor(factor),
        )
    }

    fn div_factor(self, factor: f64) -> Self {
        Rect::new(
            self.origin().div_factor(factor),
            self.size().div_factor(factor),
        )
    }
}

impl<T: Unit + Scalable> Scalable for Margins<T> {
    fn mul_factor(self, factor: f64) -> Self {
        Margins::new(
            self.left.mul_factor(factor),
            self.top.mul_factor(factor),
            self.right.mul_factor(factor),
            self.bottom.mul_factor(factor),
        )
    }

    fn div_factor(self, factor: f64) -> Self {
        Margins::new(
            self.left.div_factor(factor),
            self.top.div_factor(factor),
            self.right.div_factor(factor),
            self.bottom.div_factor(factor),
        )
    }
}

impl Scalable for Region {
    fn mul_factor(self, factor: f64) -> Self {
        self.rects().iter().map(|r| r.mul_factor(factor)).collect()
    }

    fn div_factor(self, factor: f64) -> Self {
        self.rects().iter().map(|r| r.div_factor(factor)).collect()
    }
}

impl<T: Scalable> Scalable for Vec<T> {
    fn mul_factor(self, factor: f64) -> Self {
        self.into_iter().map(|v| v.mul_factor(factor)).collect()
    }

    fn div_factor(self, factor: f64) -> Self {
        self.into_iter().map(|v| v.div_factor(factor)).collect()
    }
}

impl<A: Scalable, B: Scalable> Scalable for (A, B) {
    fn mul_factor(self, factor: f64) -> Self {
        (self.0.mul_factor(factor), self.1.mul_factor(factor))
    }

    fn div_factor(self, factor: f64) -> Self {
        (self.0.div_factor(factor), self.1.div_factor(factor))
    }
}

/// A resolved scale factor, ready to convert values in either direction.
///
/// When `is_scaled()` is false every conversion returns its input untouched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Converter {
    scaled: bool,
    factor: f64,
}

impl Converter {
    pub const IDENTITY: Self = Self {
        scaled: false,
        factor: 1.0,
    };

    /// A converter that is active whenever `factor` is not 1.0.
    #[must_use]
    pub fn new(factor: f64) -> Self {
        Self {
            scaled: !approx_eq(factor, 1.0),
            factor,
        }
    }

    /// A converter with an explicit activation flag, for sources that report
    /// "scaled" independently of the factor value.
    #[must_use]
    pub fn with_flag(scaled: bool, factor: f64) -> Self {
        Self { scaled, factor }
    }

    #[must_use]
    pub fn is_scaled(&self) -> bool {
        self.scaled
    }

    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Logical to device pixels.
    #[must_use]
    pub fn to_device_pixels<T: Scalable>(&self, value: T) -> T {
        if !self.scaled {
            return value;
        }

        value.mul_factor(self.factor)
    }

    /// Device to logical pixels.
    #[must_use]
    pub fn to_device_independent_pixels<T: Scalable>(&self, value: T) -> T {
        if !self.scaled {
            return value;
        }

        value.div_factor(self.factor)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACTORS: [f64; 5] = [0.5, 1.25, 1.5, 2.0, 3.0];

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * 1f64.max(a.abs())
    }

    #[test]
    fn approx() {
        assert!(approx_eq(1.0, 1.0));
        assert!(approx_eq(1.0, 1.0 + 1e-8));
        assert!(!approx_eq(1.0, 1.001));
        assert!(approx_eq(1000.0, 1000.0005));
    }

    #[test]
    fn integer_rounding() {
        assert_eq!(5i32.mul_factor(1.5), 8);
        assert_eq!((-5i32).mul_factor(1.5), -8);
        assert_eq!(7i32.div_factor(2.0), 4);
        assert_eq!(3i16.mul_factor(2.0), 6);
    }

    #[test]
    fn round_trip() {
        for f in FACTORS {
            let c = Converter::new(f);

            let p = Point::new(10.5, -3.25);
            let p2 = c.to_device_pixels(c.to_device_independent_pixels(p));
            assert!(close(p2.x, p.x) && close(p2.y, p.y), "{f}: {p2:?}");

            let s = Size::new(640.0, 480.0);
            let s2 = c.to_device_pixels(c.to_device_independent_pixels(s));
            assert!(close(s2.width, s.width) && close(s2.height, s.height));

            let r = Rect::<f64>::new((1.0, 2.0), (3.0, 4.0));
            let r2 = c.to_device_pixels(c.to_device_independent_pixels(r));
            assert!(close(r2.x, r.x) && close(r2.y, r.y));
            assert!(close(r2.width, r.width) && close(r2.height, r.height));

            let m = Margins::new(1.0, 2.0, 3.0, 4.0);
            let m2 = c.to_device_pixels(c.to_device_independent_pixels(m));
            assert!(close(m2.left, m.left) && close(m2.top, m.top));
            assert!(close(m2.right, m.right) && close(m2.bottom, m.bottom));
        }
    }

    #[test]
    fn direction() {
        let c = Converter::new(2.0);
        assert_eq!(c.to_device_pixels(Point::<i32>::new(3, 4)), Point::new(6, 8));
        assert_eq!(
            c.to_device_independent_pixels(Size::<i32>::new(6, 8)),
            Size::new(3, 4)
        );
        assert_eq!(
            c.to_device_pixels(Margins::<i32>::new(1, 2, 3, 4)),
            Margins::new(2, 4, 6, 8)
        );
    }

    #[test]
    fn rect_scales_origin_and_size_separately() {
        let c = Converter::new(2.0);
        let rect = Rect::<i32>::new((1, 1), (1, 1));

        let scaled = c.to_device_independent_pixels(rect);
        assert_eq!(
            scaled,
            Rect::new(
                c.to_device_independent_pixels(rect.origin()),
                c.to_device_independent_pixels(rect.size()),
            )
        );

        // corner to corner would give a zero-width rectangle here
        assert_eq!(scaled, Rect::new((1, 1), (1, 1)));
        let corner = c.to_device_independent_pixels(Point::new(rect.right(), rect.bottom()));
        assert_eq!(corner.x - scaled.x, 0);
    }

    #[test]
    fn identity_when_not_scaled() {
        let c = Converter::IDENTITY;

        let odd: f64 = 0.1 + 0.2;
        assert_eq!(c.to_device_pixels(odd).to_bits(), odd.to_bits());
        assert_eq!(
            c.to_device_independent_pixels(f64::NAN).to_bits(),
            f64::NAN.to_bits()
        );

        let values = vec![odd, -0.0, 1e300];
        let out = c.to_device_pixels(values.clone());
        assert!(out.iter().zip(&values).all(|(a, b)| a.to_bits() == b.to_bits()));

        let pair = (odd, 7i32);
        let out = c.to_device_independent_pixels(pair);
        assert_eq!(out.0.to_bits(), odd.to_bits());
        assert_eq!(out.1, 7);

        let region: Region = [Rect::new((0, 0), (3, 3)), Rect::new((1, 1), (3, 3))]
            .into_iter()
            .collect();
        assert_eq!(c.to_device_pixels(region.clone()), region);
    }

    #[test]
    fn unit_factor_flagged_scaled_still_converts() {
        let c = Converter::with_flag(true, 1.0);
        assert!(c.is_scaled());
        assert_eq!(c.to_device_pixels(3i32), 3);
        assert!(!Converter::new(1.0).is_scaled());
    }

    #[test]
    fn sequences_and_pairs() {
        let c = Converter::new(2.0);
        assert_eq!(c.to_device_pixels(vec![1i32, 2, 3]), vec![2, 4, 6]);
        assert_eq!(
            c.to_device_independent_pixels((Point::new(4.0, 2.0), 8i32)),
            (Point::new(2.0, 1.0), 4)
        );
        assert_eq!(
            c.to_device_pixels(vec![(1.5f32, Size::<i32>::new(1, 1))]),
            vec![(3.0, Size::new(2, 2))]
        );
    }

    #[test]
    fn region_near_integer_limits() {
        let c = Converter::new(2.0);
        let region: Region = [
            Rect::new((1_200_000_000, 0), (10, 10)),
            Rect::new((1_200_000_020, 0), (10, 10)),
        ]
        .into_iter()
        .collect();

        let device = c.to_device_pixels(region);
        assert!(!device.is_empty());
        assert!(device.rects().iter().all(|r| r.right() == i32::MAX));
        assert_eq!(device.bounding_rect().right(), i32::MAX);
    }

    #[test]
    fn region_conversion() {
        let c = Converter::new(2.0);
        let region: Region = [Rect::new((0, 0), (2, 2)), Rect::new((2, 0), (2, 2))]
            .into_iter()
            .collect();

        let device = c.to_device_pixels(region.clone());
        assert_eq!(device.area(), region.area() * 4);
        assert_eq!(device.bounding_rect(), Rect::new((0, 0), (8, 4)));

        let back = c.to_device_independent_pixels(device);
        assert_eq!(back.area(), region.area());
    }
}
