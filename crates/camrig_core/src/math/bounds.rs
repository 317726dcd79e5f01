//! Axis-aligned 2D bounds

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned 2D bounding box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for Bounds2 {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds2 {
    /// Create an empty bounding box (merging anything into it yields that thing)
    pub fn empty() -> Self {
        Self {
            min: Vec2::splat(f32::INFINITY),
            max: Vec2::splat(f32::NEG_INFINITY),
        }
    }

    /// Create from min and max points
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Degenerate bounds covering a single point
    pub fn point(point: Vec2) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Create from center and half-extents
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Create from center and full size
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self::from_center_half_extents(center, size * 0.5)
    }

    /// Check if the bounding box is empty
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Get the center point
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Get the size (width, height)
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Get half-extents
    pub fn half_extents(&self) -> Vec2 {
        self.size() * 0.5
    }

    /// Offset by a delta
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Grow the total size by `amount` on both axes (each side moves by half of it)
    pub fn expanded(&self, amount: f32) -> Self {
        let half = Vec2::splat(amount * 0.5);
        Self {
            min: self.min - half,
            max: self.max + half,
        }
    }

    /// Expand to include a point
    pub fn expand_to_include(&mut self, point: Vec2) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Merge with another bounding box
    pub fn encapsulate(&mut self, other: &Bounds2) {
        if other.is_empty() {
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Smallest box containing both
    pub fn union(&self, other: &Bounds2) -> Self {
        let mut merged = *self;
        merged.encapsulate(other);
        merged
    }

    /// Check if a point is inside
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if `other` lies fully inside, allowing `epsilon` of slop on every edge
    pub fn contains_bounds(&self, other: &Bounds2, epsilon: f32) -> bool {
        other.min.x >= self.min.x - epsilon
            && other.min.y >= self.min.y - epsilon
            && other.max.x <= self.max.x + epsilon
            && other.max.y <= self.max.y + epsilon
    }

    /// Check if this box intersects another
    pub fn intersects(&self, other: &Bounds2) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_basics() {
        let bounds = Bounds2::new(Vec2::new(-1.0, -2.0), Vec2::new(3.0, 2.0));

        assert!(bounds.contains_point(Vec2::ZERO));
        assert!(!bounds.contains_point(Vec2::new(4.0, 0.0)));
        assert_eq!(bounds.center(), Vec2::new(1.0, 0.0));
        assert_eq!(bounds.size(), Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_empty_encapsulate() {
        let mut bounds = Bounds2::empty();
        assert!(bounds.is_empty());

        bounds.encapsulate(&Bounds2::point(Vec2::new(-5.0, 0.0)));
        bounds.encapsulate(&Bounds2::point(Vec2::new(5.0, 0.0)));

        assert!(!bounds.is_empty());
        assert_eq!(bounds.size(), Vec2::new(10.0, 0.0));
        assert_eq!(bounds.center(), Vec2::ZERO);
    }

    #[test]
    fn test_expanded_grows_total_size() {
        let bounds = Bounds2::from_center_size(Vec2::ZERO, Vec2::new(2.0, 2.0)).expanded(1.0);
        assert_eq!(bounds.size(), Vec2::new(3.0, 3.0));
        assert_eq!(bounds.center(), Vec2::ZERO);
    }

    #[test]
    fn test_contains_bounds() {
        let outer = Bounds2::new(Vec2::splat(-10.0), Vec2::splat(10.0));
        let inner = Bounds2::new(Vec2::splat(-2.0), Vec2::splat(2.0));
        assert!(outer.contains_bounds(&inner, 0.0));
        assert!(!inner.contains_bounds(&outer, 0.0));
        assert!(inner.intersects(&outer));
    }
}
