use glam::Vec3;

use crate::{Error, Result};

/// Axis aligned bounds of a point set.
///
/// Constructed through [`BoundingBox::from_points`] the box always satisfies
/// `min <= max` on every axis. An empty point set has no bounds and is
/// reported as [`Error::NoGeometryData`] instead of leaking the infinite
/// sentinels used during the reduction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub const fn with_min_max(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn with_position_and_size(position: Vec3, size: Vec3) -> Self {
        Self {
            min: position,
            max: position + size,
        }
    }

    /// Reduces `points` into their bounds, visiting every point once.
    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut min = Vec3::INFINITY;
        let mut max = Vec3::NEG_INFINITY;
        let mut count = 0usize;

        for point in points {
            min = min.min(point);
            max = max.max(point);
            count += 1;
        }

        if count == 0 {
            return Err(Error::NoGeometryData);
        }

        log::debug!("Computed bounds of {count} points: {min} .. {max}");

        Ok(Self { min, max })
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} .. {}]", self.min, self.max)
    }
}

pub fn compute_bounds(points: &[Vec3]) -> Result<BoundingBox> {
    BoundingBox::from_points(points.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_bounds() {
        let points = [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-1.0, 5.0, 0.0),
            Vec3::new(4.0, -2.0, 9.0),
        ];

        let bounds = compute_bounds(&points).unwrap();

        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(4.0, 5.0, 9.0));
    }

    #[test]
    fn test_order_independent() {
        let points = [
            Vec3::new(4.0, -2.0, 9.0),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-1.0, 5.0, 0.0),
        ];
        let mut reversed = points;
        reversed.reverse();

        assert_eq!(
            compute_bounds(&points).unwrap(),
            compute_bounds(&reversed).unwrap()
        );
    }

    #[test]
    fn test_single_point() {
        let point = Vec3::new(7.0, -3.0, 0.5);
        let bounds = compute_bounds(&[point]).unwrap();

        assert_eq!(bounds.min, point);
        assert_eq!(bounds.max, point);
        assert_eq!(bounds.size(), Vec3::ZERO);
    }

    #[test]
    fn test_empty_points() {
        assert!(matches!(compute_bounds(&[]), Err(Error::NoGeometryData)));
    }

    #[test]
    fn test_union_and_contains() {
        let a = BoundingBox::with_min_max(Vec3::ZERO, Vec3::ONE);
        let b = BoundingBox::with_position_and_size(Vec3::splat(2.0), Vec3::ONE);
        let merged = a.union(&b);

        assert_eq!(merged.min, Vec3::ZERO);
        assert_eq!(merged.max, Vec3::splat(3.0));
        assert!(merged.contains(Vec3::splat(1.5)));
        assert!(!a.contains(Vec3::splat(1.5)));
    }

    #[test]
    fn test_display() {
        let bounds = BoundingBox::with_min_max(Vec3::ZERO, Vec3::ONE);
        assert_eq!(format!("{bounds}"), "[[0, 0, 0] .. [1, 1, 1]]");
    }
}
