//! Axis-aligned rectangles used for hit testing and drawing

use glam::Vec2;

/// Rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Creates a rectangle centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size / 2.0, size)
    }

    /// Smallest rectangle containing every point; `None` when empty
    pub fn bounding(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self::new(min, max - min))
    }

    pub fn min(&self) -> Vec2 {
        self.origin
    }

    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    /// Get the center point of the rectangle
    pub fn center(&self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    /// Check if a point is inside this rectangle (edges included)
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.origin.x && point.x <= max.x && point.y >= self.origin.y && point.y <= max.y
    }

    /// Returns true if the two rectangles share any point
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.origin.x <= b_max.x
            && other.origin.x <= a_max.x
            && self.origin.y <= b_max.y
            && other.origin.y <= a_max.y
    }

    /// Grows the rectangle by `amount` on every side
    pub fn inflate(&self, amount: f32) -> Self {
        Self::new(self.origin - Vec2::splat(amount), self.size + Vec2::splat(amount * 2.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_includes_edges() {
        let rect = Rect::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0));
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(30.0, 20.0)));
        assert!(!rect.contains(Vec2::new(30.1, 15.0)));
        assert_eq!(rect.center(), Vec2::new(20.0, 15.0));
    }

    #[test]
    fn test_bounding_box_of_points() {
        let rect = Rect::bounding(&[
            Vec2::new(3.0, -1.0),
            Vec2::new(-2.0, 4.0),
            Vec2::new(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(rect.origin, Vec2::new(-2.0, -1.0));
        assert_eq!(rect.size, Vec2::new(5.0, 5.0));
        assert!(Rect::bounding(&[]).is_none());
    }

    #[test]
    fn test_inflate_and_intersect() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::new(Vec2::splat(12.0), Vec2::splat(4.0));
        assert!(!a.intersects(&b));
        assert!(a.inflate(2.0).intersects(&b));
        assert_eq!(a.inflate(2.0).size, Vec2::splat(14.0));
    }
}
