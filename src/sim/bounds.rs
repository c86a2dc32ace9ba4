//! Containing frame for the bouncing box

use glam::{BVec2, Vec2};

/// Axis-aligned frame the box bounces inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::NDC
    }
}

impl Bounds {
    /// Normalized device coordinates, [-1, 1] on both axes
    pub const NDC: Self = Self {
        min: Vec2::NEG_ONE,
        max: Vec2::ONE,
    };

    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Whether a box with this half-extent can move inside the frame at all
    pub fn fits(&self, half_extent: Vec2) -> bool {
        half_extent.is_finite()
            && half_extent.cmpgt(Vec2::ZERO).all()
            && (half_extent * 2.0).cmplt(self.size()).all()
    }

    /// Per-axis edge contact for a box centered at `center`.
    ///
    /// An axis is in contact when either side of the box is strictly past
    /// the corresponding edge. Touching an edge exactly is not a contact.
    pub fn edge_contact(&self, center: Vec2, half_extent: Vec2) -> BVec2 {
        let past_max = (center + half_extent).cmpgt(self.max);
        let past_min = (center - half_extent).cmplt(self.min);
        past_max | past_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_is_default() {
        assert_eq!(Bounds::default(), Bounds::NDC);
        assert_eq!(Bounds::NDC.size(), Vec2::splat(2.0));
    }

    #[test]
    fn test_edge_contact_per_axis() {
        let half = Vec2::splat(0.1);
        assert_eq!(
            Bounds::NDC.edge_contact(Vec2::new(0.95, 0.0), half),
            BVec2::new(true, false)
        );
        assert_eq!(
            Bounds::NDC.edge_contact(Vec2::new(0.0, -0.95), half),
            BVec2::new(false, true)
        );
        assert_eq!(
            Bounds::NDC.edge_contact(Vec2::new(-0.95, 0.95), half),
            BVec2::new(true, true)
        );
        assert!(!Bounds::NDC.edge_contact(Vec2::ZERO, half).any());
    }

    #[test]
    fn test_touching_edge_is_not_contact() {
        let half = Vec2::splat(0.5);
        assert!(!Bounds::NDC.edge_contact(Vec2::new(0.5, -0.5), half).any());
    }

    #[test]
    fn test_fits() {
        assert!(Bounds::NDC.fits(Vec2::splat(0.2)));
        assert!(!Bounds::NDC.fits(Vec2::new(1.0, 0.2)));
        assert!(!Bounds::NDC.fits(Vec2::new(0.2, 0.0)));
        assert!(!Bounds::NDC.fits(Vec2::new(-0.2, 0.2)));
        assert!(!Bounds::NDC.fits(Vec2::new(f32::NAN, 0.2)));

        let wide = Bounds::new(Vec2::new(-4.0, -1.0), Vec2::new(4.0, 1.0));
        assert!(wide.fits(Vec2::new(3.0, 0.5)));
    }
}
