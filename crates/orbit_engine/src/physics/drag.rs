//! Iterative penetration resolution for dragged objects
//!
//! While the user drags a selected body, the candidate position under the
//! cursor may interpenetrate existing geometry. A single contact query
//! cannot guarantee global non-penetration against multiple simultaneous
//! overlaps, so the resolver applies a greedy local correction: nudge the
//! candidate along the deepest contact's separation normal, re-query, and
//! repeat. The iteration cap bounds per-frame cost; if a pathological
//! configuration (wedged between two bodies) is still penetrating at the
//! cap, the last candidate is accepted as-is. Responsiveness wins over
//! perfect non-penetration.
//!
//! The resolver is a pure function over candidate positions: nothing in the
//! simulation moves until the caller commits the returned position.

use crate::foundation::math::Vec3;
use crate::physics::query::ContactPoint;

/// Iteration bound for penetration correction
pub const MAX_ITERATIONS: usize = 10;

/// Extra clearance added on top of the reported depth each nudge
pub const SEPARATION_EPSILON: f32 = 0.01;

/// Resolve a candidate position against penetrating contacts.
///
/// `contact_at` reports the deepest contact the dragged body would have at a
/// hypothetical position, without mutating anything. Positive depth means
/// interpenetration; zero or negative depth needs no correction (the raw
/// query reports the deepest contact regardless of sign).
///
/// Returns the corrected position after at most `max_iterations` nudges of
/// `depth + SEPARATION_EPSILON` along the separation normal.
pub fn resolve_position<F>(candidate: Vec3, mut contact_at: F, max_iterations: usize) -> Vec3
where
    F: FnMut(Vec3) -> Option<ContactPoint>,
{
    let mut position = candidate;

    for _ in 0..max_iterations {
        let Some(deepest) = contact_at(position) else {
            break;
        };
        if deepest.depth <= 0.0 {
            break;
        }
        position += deepest.normal * (deepest.depth + SEPARATION_EPSILON);
    }

    position
}

/// Candidate position for a pointer-move drag: the object slides along the
/// new pick ray at constant distance from the camera.
pub fn drag_target(camera_position: Vec3, ray_direction: Vec3, distance: f32) -> Vec3 {
    camera_position + ray_direction * distance
}

/// Distance scaling for a scroll drag: the wheel pushes or pulls the object
/// along the ray.
pub fn scroll_distance(distance: f32, scroll_delta: f32) -> f32 {
    distance * (1.0 + scroll_delta * 0.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plane_contact(position: Vec3, plane_y: f32) -> Option<ContactPoint> {
        // A horizontal plane at `plane_y`; anything below penetrates
        Some(ContactPoint {
            position: Vec3::new(position.x, plane_y, position.z),
            normal: Vec3::new(0.0, 1.0, 0.0),
            depth: plane_y - position.y,
            entity: None,
        })
    }

    #[test]
    fn test_single_penetration_resolves_in_one_iteration() {
        let candidate = Vec3::new(2.0, -3.0, 1.0);
        let mut calls = 0;

        let resolved = resolve_position(
            candidate,
            |p| {
                calls += 1;
                plane_contact(p, 0.0)
            },
            MAX_ITERATIONS,
        );

        // One correcting nudge, then one query that sees no penetration
        assert_eq!(calls, 2);
        assert!(resolved.y > 0.0);
        assert_relative_eq!(resolved.y, SEPARATION_EPSILON, epsilon = 1e-5);
        assert_relative_eq!(resolved.x, candidate.x);
        assert_relative_eq!(resolved.z, candidate.z);
    }

    #[test]
    fn test_non_penetrating_candidate_is_untouched() {
        let candidate = Vec3::new(0.0, 5.0, 0.0);
        let resolved = resolve_position(candidate, |p| plane_contact(p, 0.0), MAX_ITERATIONS);
        assert_relative_eq!(resolved, candidate);
    }

    #[test]
    fn test_no_contact_is_untouched() {
        let candidate = Vec3::new(1.0, 2.0, 3.0);
        let resolved = resolve_position(candidate, |_| None, MAX_ITERATIONS);
        assert_relative_eq!(resolved, candidate);
    }

    #[test]
    fn test_wedged_configuration_terminates_at_cap() {
        // Two opposing walls that always claim penetration: every nudge gets
        // pushed straight back, so the loop can only end at the cap
        let mut calls = 0;
        let mut flip = 1.0;

        let resolved = resolve_position(
            Vec3::zeros(),
            |p| {
                calls += 1;
                flip = -flip;
                Some(ContactPoint {
                    position: p,
                    normal: Vec3::new(flip, 0.0, 0.0),
                    depth: 0.5,
                    entity: None,
                })
            },
            MAX_ITERATIONS,
        );

        assert_eq!(calls, MAX_ITERATIONS);
        assert!(resolved.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_scroll_scales_distance() {
        assert_relative_eq!(scroll_distance(20.0, 1.0), 22.0);
        assert_relative_eq!(scroll_distance(20.0, -2.0), 16.0);
        assert_relative_eq!(scroll_distance(20.0, 0.0), 20.0);
    }

    #[test]
    fn test_drag_target_keeps_camera_distance() {
        let camera = Vec3::new(0.0, 10.0, 0.0);
        let dir = Vec3::new(0.0, 0.0, -1.0);
        let target = drag_target(camera, dir, 15.0);
        assert_relative_eq!((target - camera).magnitude(), 15.0, epsilon = 1e-5);
    }
}
