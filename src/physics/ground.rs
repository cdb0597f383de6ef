use avian3d::prelude::*;
use bevy::prelude::*;

/// Extra lift applied to the probe origin so the cast starts clear of the body's base
pub const PROBE_ORIGIN_MARGIN: f32 = 0.1;

/// Result of a ground probe. A miss keeps every field zeroed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroundHit {
    pub hit: bool,
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}

impl GroundHit {
    pub fn miss() -> Self {
        Self::default()
    }

    pub fn new(point: Vec3, normal: Vec3, distance: f32) -> Self {
        Self {
            hit: true,
            point,
            normal,
            distance,
        }
    }
}

/// Shape and reach of the downward sphere cast used to find ground
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProbe {
    pub radius: f32,
    /// Offset from the body's base to the cast origin
    pub origin_offset: Vec3,
    pub max_distance: f32,
}

impl GroundProbe {
    /// Sizes the probe from the body's collision radius. The sphere is half the
    /// capsule radius so walls brushing the capsule side are not picked up.
    pub fn for_body(collider_radius: f32, grounded_distance: f32) -> Self {
        let radius = collider_radius * 0.5;
        let origin_offset = Vec3::Y * radius + Vec3::Y * PROBE_ORIGIN_MARGIN;
        Self {
            radius,
            origin_offset,
            max_distance: grounded_distance + origin_offset.length(),
        }
    }
}

/// How the latest probe classifies the surface under the body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroundContact {
    pub grounded: bool,
    pub steep: bool,
}

/// Angle in radians between world up and a surface normal.
/// A zero normal (no hit) reads as flat rather than NaN.
pub fn surface_angle(normal: Vec3) -> f32 {
    if normal.length_squared() <= f32::EPSILON {
        return 0.0;
    }
    Vec3::Y.angle_between(normal)
}

/// Classifies a probe result against the maximum standable slope
pub fn classify_ground(hit: &GroundHit, max_slope_angle: f32) -> GroundContact {
    let steep = hit.hit && surface_angle(hit.normal) >= max_slope_angle;
    GroundContact {
        grounded: hit.hit && !steep,
        steep,
    }
}

/// Casts the probe sphere down from `base` (the bottom of the body)
pub fn probe_ground(
    spatial_query: &SpatialQuery,
    probe: &GroundProbe,
    base: Vec3,
    filter: &SpatialQueryFilter,
) -> GroundHit {
    let cast_shape = Collider::sphere(probe.radius);
    let config = ShapeCastConfig {
        max_distance: probe.max_distance,
        ..default()
    };

    spatial_query
        .cast_shape(
            &cast_shape,
            base + probe.origin_offset,
            Quat::IDENTITY,
            Dir3::NEG_Y,
            &config,
            filter,
        )
        .map(|hit| GroundHit::new(hit.point1, hit.normal1, hit.distance))
        .unwrap_or_else(GroundHit::miss)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_at(angle: f32) -> Vec3 {
        Vec3::new(angle.sin(), angle.cos(), 0.0)
    }

    #[test]
    fn probe_is_sized_from_collider_radius() {
        let probe = GroundProbe::for_body(0.5, 0.01);
        assert_eq!(probe.radius, 0.25);
        assert!((probe.origin_offset.y - 0.35).abs() < 1e-6);
        assert!((probe.max_distance - 0.36).abs() < 1e-6);
    }

    #[test]
    fn zero_normal_is_flat() {
        assert_eq!(surface_angle(Vec3::ZERO), 0.0);
        assert!(surface_angle(Vec3::Y).abs() < 1e-6);
    }

    #[test]
    fn miss_is_neither_grounded_nor_steep() {
        // Even a zero slope limit must not flag a miss as steep
        let contact = classify_ground(&GroundHit::miss(), 0.0);
        assert_eq!(contact, GroundContact::default());
    }

    #[test]
    fn classification_follows_slope_threshold() {
        let max = 45f32.to_radians();
        for degrees in (0..=90).step_by(5) {
            let angle = (degrees as f32).to_radians();
            let hit = GroundHit::new(Vec3::ZERO, normal_at(angle), 0.05);
            let contact = classify_ground(&hit, max);
            let expected_steep = surface_angle(hit.normal) >= max;
            assert_eq!(contact.steep, expected_steep, "at {degrees}°");
            assert_eq!(contact.grounded, !expected_steep, "at {degrees}°");
            assert!(!(contact.grounded && contact.steep));
        }
    }

    #[test]
    fn threshold_angle_counts_as_steep() {
        let max = 30f32.to_radians();
        let hit = GroundHit::new(Vec3::ZERO, normal_at(max + 1e-4), 0.0);
        assert!(classify_ground(&hit, max).steep);
        let hit = GroundHit::new(Vec3::ZERO, normal_at(max - 1e-3), 0.0);
        assert!(classify_ground(&hit, max).grounded);
    }
}
