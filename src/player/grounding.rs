//! Ground-contact probes. Pure queries against the collision world; a miss is
//! a normal negative result, never an error.
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Sideways lean of the four diagonal probes, relative to one unit of drop.
const DIAGONAL_LEAN: f32 = 0.35;

/// Probe directions: straight down plus four diagonals, so contact on the
/// curved flank of the ball (ramp edges, wall seams) still counts as grounded.
pub fn probe_directions() -> [Vec3; 5] {
    [
        Vec3::NEG_Y,
        Vec3::new(DIAGONAL_LEAN, -1.0, 0.0).normalize(),
        Vec3::new(-DIAGONAL_LEAN, -1.0, 0.0).normalize(),
        Vec3::new(0.0, -1.0, DIAGONAL_LEAN).normalize(),
        Vec3::new(0.0, -1.0, -DIAGONAL_LEAN).normalize(),
    ]
}

/// True if any of the five short probes hits a non-sensor surface within
/// `probe_near` (collider radius + margin).
pub fn is_grounded(ctx: &RapierContext, origin: Vec3, probe_near: f32, exclude: Entity) -> bool {
    let filter = QueryFilter::default()
        .exclude_sensors()
        .exclude_collider(exclude);
    probe_directions()
        .iter()
        .any(|dir| ctx.cast_ray(origin, *dir, probe_near, true, filter).is_some())
}

/// Single straight-down probe with the larger threshold; predicts an imminent
/// landing for the late-jump buffer.
pub fn is_almost_grounded(
    ctx: &RapierContext,
    origin: Vec3,
    probe_far: f32,
    exclude: Entity,
) -> bool {
    let filter = QueryFilter::default()
        .exclude_sensors()
        .exclude_collider(exclude);
    ctx.cast_ray(origin, Vec3::NEG_Y, probe_far, true, filter)
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probes_are_unit_length_and_downward() {
        for dir in probe_directions() {
            assert!((dir.length() - 1.0).abs() < 1e-5);
            assert!(dir.y < 0.0);
        }
    }

    #[test]
    fn first_probe_is_straight_down() {
        assert_eq!(probe_directions()[0], Vec3::NEG_Y);
    }
}
