//! Collision detection and response against a moving polygon
//!
//! The tricky part of a spinning container: the wall at the contact point is
//! itself moving, so the bounce is computed on the ball's velocity relative
//! to the wall (ω × r at the contact point), then transformed back out of the
//! wall's frame. Treating the walls as stationary gives visibly wrong bounces
//! as soon as the container spins.

use glam::Vec2;

use super::ball::Ball;
use super::container::RotatingContainer;
use super::geometry::{Edge, edges};
use crate::consts::{MAX_RESOLVE_PASSES, PENETRATION_SLOP};

/// A ball overlapping one edge of the container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Index of the edge's first vertex
    pub edge_index: usize,
    /// Closest point on the edge to the ball center
    pub point: Vec2,
    /// Unit normal pointing from the wall toward the ball (into the container)
    pub normal: Vec2,
    /// Overlap to remove along `normal`
    pub penetration: f32,
    /// Velocity of the wall material at `point`
    pub wall_velocity: Vec2,
}

/// Outcome of one `resolve` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Detection passes run (bounded by `MAX_RESOLVE_PASSES`)
    pub passes: u32,
    /// Contacts corrected
    pub contacts: u32,
    /// True when the last scan found no remaining overlap
    pub settled: bool,
}

/// Check a single edge for overlap with the ball
///
/// A ball whose center has crossed to the outside of the edge line is still
/// reported, with the normal forced inward so correction brings it back in.
pub fn edge_contact(ball: &Ball, edge: &Edge, container: &RotatingContainer) -> Option<Contact> {
    let closest = edge.closest_point(ball.pos);
    let offset = ball.pos - closest;
    let dist = offset.length();
    let inward = edge.inward_normal(container.center());

    let escaped = (ball.pos - edge.a).dot(inward) < 0.0;
    let (normal, penetration) = if escaped {
        (inward, ball.radius + dist)
    } else if dist > 0.0 {
        (offset / dist, ball.radius - dist)
    } else {
        // Center exactly on the edge: fall back to the edge perpendicular
        (inward, ball.radius)
    };

    if penetration <= PENETRATION_SLOP {
        return None;
    }

    Some(Contact {
        edge_index: edge.index,
        point: closest,
        normal,
        penetration,
        wall_velocity: container.wall_velocity_at(closest),
    })
}

/// First overlapping edge in vertex order, if any
pub fn detect_contact(
    ball: &Ball,
    vertices: &[Vec2],
    container: &RotatingContainer,
) -> Option<Contact> {
    edges(vertices).find_map(|edge| edge_contact(ball, &edge, container))
}

/// Reflect `vel` in the frame of a wall moving at `wall_vel`
///
/// Returns `None` when the ball is already separating from the wall.
pub fn bounce_velocity(vel: Vec2, normal: Vec2, wall_vel: Vec2, restitution: f32) -> Option<Vec2> {
    let rel = vel - wall_vel;
    let approach = rel.dot(normal);
    if approach >= 0.0 {
        return None;
    }
    let rel_after = rel - (1.0 + restitution) * approach * normal;
    Some(rel_after + wall_vel)
}

/// Push the ball out of the wall, then bounce it if it is moving into the wall
///
/// Returns whether the velocity changed.
pub fn apply_contact(ball: &mut Ball, contact: &Contact, restitution: f32) -> bool {
    ball.pos += contact.normal * contact.penetration;

    match bounce_velocity(ball.vel, contact.normal, contact.wall_velocity, restitution) {
        Some(vel) => {
            ball.vel = vel;
            true
        }
        None => false,
    }
}

/// Resolve every overlap between the ball and the container walls
///
/// One contact is handled per pass, then the edges are rescanned, so a
/// correction that pushes the ball into a neighbouring edge is caught on the
/// next pass. The pass count is bounded; whatever overlap remains carries
/// into the next tick.
pub fn resolve(
    ball: &mut Ball,
    vertices: &[Vec2],
    container: &RotatingContainer,
    restitution: f32,
) -> Resolution {
    let mut resolution = Resolution::default();

    while resolution.passes < MAX_RESOLVE_PASSES {
        resolution.passes += 1;
        let Some(contact) = detect_contact(ball, vertices, container) else {
            resolution.settled = true;
            return resolution;
        };

        let bounced = apply_contact(ball, &contact, restitution);
        resolution.contacts += 1;
        log::trace!(
            "contact edge={} depth={:.3} wall_vel={:?} bounced={}",
            contact.edge_index,
            contact.penetration,
            contact.wall_velocity,
            bounced
        );
    }

    resolution.settled = detect_contact(ball, vertices, container).is_none();
    if !resolution.settled {
        log::debug!(
            "residual penetration after {} passes at pos={:?}",
            resolution.passes,
            ball.pos
        );
    }
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_4;

    /// Axis-aligned square with corners at (±100, ±100); edge 0 is y = 100
    fn square(omega: f32) -> RotatingContainer {
        RotatingContainer::new(Vec2::ZERO, 100.0 * 2.0_f32.sqrt(), 4, FRAC_PI_4, omega).unwrap()
    }

    #[test]
    fn test_no_contact_leaves_ball_untouched() {
        let container = square(1.5);
        let verts = container.vertices();
        let mut ball = Ball::new(Vec2::new(10.0, -20.0), Vec2::new(30.0, 40.0), 10.0);
        let before = ball;

        let res = resolve(&mut ball, &verts, &container, 0.9);
        assert_eq!(ball, before);
        assert_eq!(res.contacts, 0);
        assert_eq!(res.passes, 1);
        assert!(res.settled);
    }

    #[test]
    fn test_floor_bounce_static_wall() {
        let container = square(0.0);
        let verts = container.vertices();
        let mut ball = Ball::new(Vec2::new(0.0, 95.0), Vec2::new(0.0, 200.0), 10.0);

        let res = resolve(&mut ball, &verts, &container, 0.5);
        assert_eq!(res.contacts, 1);
        assert!(res.settled);
        assert!((ball.pos - Vec2::new(0.0, 90.0)).length() < 1e-3);
        assert!((ball.vel - Vec2::new(0.0, -100.0)).length() < 1e-3);
    }

    #[test]
    fn test_separating_ball_is_only_repositioned() {
        let container = square(0.0);
        let verts = container.vertices();
        let mut ball = Ball::new(Vec2::new(0.0, 95.0), Vec2::new(20.0, -50.0), 10.0);

        resolve(&mut ball, &verts, &container, 0.5);
        assert!((ball.pos.y - 90.0).abs() < 1e-3);
        assert_eq!(ball.vel, Vec2::new(20.0, -50.0));
    }

    #[test]
    fn test_elastic_bounce_preserves_speed() {
        let container = square(0.0);
        let verts = container.vertices();
        let mut ball = Ball::new(Vec2::new(95.0, 0.0), Vec2::new(120.0, 160.0), 10.0);

        resolve(&mut ball, &verts, &container, 1.0);
        assert!((ball.vel.length() - 200.0).abs() < 1e-3);
        assert!((ball.vel - Vec2::new(-120.0, 160.0)).length() < 1e-2);
    }

    #[test]
    fn test_rotating_wall_pushes_resting_ball() {
        // Clockwise spin moves the floor at x = 60 upward (into the ball) at |ω|·60
        let omega = -2.0;
        let container = square(omega);
        let verts = container.vertices();
        let mut ball = Ball::new(Vec2::new(60.0, 92.0), Vec2::ZERO, 10.0);

        let contact = detect_contact(&ball, &verts, &container).unwrap();
        let wall_normal_speed = contact.wall_velocity.dot(contact.normal);
        assert!((wall_normal_speed - 120.0).abs() < 1e-2);

        resolve(&mut ball, &verts, &container, 1.0);
        // Elastic bounce off a wall approaching at u leaves the ball moving at 2u
        assert!((ball.vel.dot(contact.normal) - 240.0).abs() < 1e-1);
        assert!(ball.vel.x.abs() < 1e-1);

        // The same ball against a stationary floor gains nothing
        let still = square(0.0);
        let mut resting = Ball::new(Vec2::new(60.0, 92.0), Vec2::ZERO, 10.0);
        resolve(&mut resting, &still.vertices(), &still, 1.0);
        assert_eq!(resting.vel, Vec2::ZERO);
    }

    #[test]
    fn test_inelastic_rotating_wall_matches_wall_speed() {
        let container = square(-2.0);
        let verts = container.vertices();
        let mut ball = Ball::new(Vec2::new(60.0, 92.0), Vec2::ZERO, 10.0);

        resolve(&mut ball, &verts, &container, 0.0);
        // e = 0 leaves the ball moving with the wall along the normal
        assert!((ball.vel.y - (-120.0)).abs() < 1e-1);
    }

    #[test]
    fn test_center_on_edge_uses_inward_perpendicular() {
        let container = RotatingContainer::new(Vec2::ZERO, 150.0, 4, 0.0, 0.0).unwrap();
        let edge = Edge {
            index: 0,
            a: Vec2::new(100.0, 100.0),
            b: Vec2::new(-100.0, 100.0),
        };
        let ball = Ball::new(Vec2::new(0.0, 100.0), Vec2::new(0.0, 10.0), 10.0);

        let contact = edge_contact(&ball, &edge, &container).unwrap();
        assert_eq!(contact.normal, Vec2::new(0.0, -1.0));
        assert!((contact.penetration - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_escaped_ball_is_pulled_back_inside() {
        let container = square(0.0);
        let verts = container.vertices();
        let mut ball = Ball::new(Vec2::new(0.0, 110.0), Vec2::new(0.0, 30.0), 10.0);

        let contact = detect_contact(&ball, &verts, &container).unwrap();
        assert!(contact.normal.dot(Vec2::new(0.0, -1.0)) > 0.999);
        assert!((contact.penetration - 20.0).abs() < 1e-3);

        resolve(&mut ball, &verts, &container, 0.8);
        assert!((ball.pos.y - 90.0).abs() < 1e-2);
        assert!(ball.vel.y < 0.0);
    }

    #[test]
    fn test_corner_needs_two_passes() {
        let container = square(0.0);
        let verts = container.vertices();
        let mut ball = Ball::new(Vec2::new(92.0, 93.0), Vec2::ZERO, 10.0);

        let res = resolve(&mut ball, &verts, &container, 0.9);
        assert_eq!(res.contacts, 2);
        assert_eq!(res.passes, 3);
        assert!(res.settled);
        assert!((ball.pos - Vec2::new(90.0, 90.0)).length() < 1e-2);
    }

    #[test]
    fn test_wedged_ball_terminates() {
        // Ball wider than the square's inradius cannot be separated
        let container = square(0.0);
        let verts = container.vertices();
        let mut ball = Ball::new(Vec2::ZERO, Vec2::ZERO, 150.0);

        let res = resolve(&mut ball, &verts, &container, 0.9);
        assert_eq!(res.passes, MAX_RESOLVE_PASSES);
        assert_eq!(res.contacts, MAX_RESOLVE_PASSES);
        assert!(!res.settled);
        assert!(ball.pos.is_finite());
    }

    proptest! {
        #[test]
        fn prop_bounce_never_gains_energy_in_wall_frame(
            omega in -5.0f32..5.0,
            vx in -500.0f32..500.0,
            vy in -500.0f32..500.0,
            x in -90.0f32..90.0,
            depth in 0.1f32..5.0,
            restitution in 0.0f32..0.99,
        ) {
            let container = square(omega);
            let verts = container.vertices();
            let mut ball = Ball::new(Vec2::new(x, 90.0 + depth), Vec2::new(vx, vy), 10.0);

            let contact = detect_contact(&ball, &verts, &container).unwrap();
            let before = ball.relative_kinetic_energy(contact.wall_velocity);
            apply_contact(&mut ball, &contact, restitution);
            let after = ball.relative_kinetic_energy(contact.wall_velocity);

            prop_assert!(after <= before * (1.0 + 1e-4) + 1e-3);
        }
    }
}
