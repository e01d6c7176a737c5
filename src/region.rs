//! Integer regions built from disjoint rectangles.

use crate::geometry::{Point, Rect};

/// An area made of non-overlapping integer rectangles.
///
/// Rectangles are kept disjoint on insertion, so the area of a region is the
/// sum of the areas of its rectangles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Region {
    rects: Vec<Rect<i32>>,
}

impl Region {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_rect(rect: Rect<i32>) -> Self {
        let mut region = Self::new();
        region.add_rect(rect);
        region
    }

    #[must_use]
    pub fn rects(&self) -> &[Rect<i32>] {
        &self.rects
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    #[must_use]
    pub fn bounding_rect(&self) -> Rect<i32> {
        self.rects
            .iter()
            .fold(Rect::ZERO, |acc, rect| acc.bounding_union(rect))
    }

    #[must_use]
    pub fn area(&self) -> i64 {
        self.rects
            .iter()
            .map(|r| i64::from(r.width) * i64::from(r.height))
            .sum()
    }

    #[must_use]
    pub fn contains(&self, point: Point<i32>) -> bool {
        self.rects.iter().any(|r| r.contains(point))
    }

    /// Adds `rect` to the region. Only the parts not already covered are
    /// stored. Empty rectangles are ignored.
    pub fn add_rect(&mut self, rect: Rect<i32>) {
        if rect.is_empty() {
            return;
        }

        let mut pending = vec![rect];
        for existing in &self.rects {
            pending = pending
                .iter()
                .flat_map(|piece| piece.subtract(existing))
                .collect();

            if pending.is_empty() {
                return;
            }
        }

        self.rects.extend(pending);
    }

    #[must_use]
    pub fn union(&self, other: &Region) -> Region {
        let mut result = self.clone();
        for rect in &other.rects {
            result.add_rect(*rect);
        }
        result
    }
}

impl From<Rect<i32>> for Region {
    fn from(rect: Rect<i32>) -> Self {
        Self::from_rect(rect)
    }
}

impl FromIterator<Rect<i32>> for Region {
    fn from_iter<I: IntoIterator<Item = Rect<i32>>>(iter: I) -> Self {
        let mut region = Self::new();
        for rect in iter {
            region.add_rect(rect);
        }
        region
    }
}

impl std::ops::AddAssign<Rect<i32>> for Region {
    fn add_assign(&mut self, rect: Rect<i32>) {
        self.add_rect(rect);
    }
}
