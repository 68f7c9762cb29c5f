//! Lifecycle of spawned fragments.
//!
//! The host engine owns real physics; this module models the contract every
//! spawned fragment follows so it can be driven (and tested) by an explicit
//! clock:
//!
//! - mass from the fragment's bounding-box volume, with a floor,
//! - an initial linear velocity and a random spin,
//! - a bounded lifetime with a fade over its final stretch,
//! - an optional radial explosion impulse.
//!
//! Motion is integrated ballistically under a constant gravity vector; there
//! are no collisions.

use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::{DebrisConfig, FractureRng, OutputMesh};

/// Where a fragment is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentState {
    /// Created, not ticked yet.
    Spawned,
    /// Alive and fully opaque.
    Aging,
    /// Alive, opacity falling toward zero.
    Fading,
    /// Lifetime over; the host should drop it.
    Removed,
}

/// One spawned fragment: its mesh, rigid-body state and lifetime clock.
///
/// The mesh stays in the broken object's local space; `position` and
/// `orientation` place that local space in the world.
#[derive(Debug, Clone)]
pub struct FragmentBody {
    mesh: OutputMesh,
    pub position: Point3<f32>,
    pub orientation: UnitQuaternion<f32>,
    pub velocity: Vector3<f32>,
    pub angular_velocity: Vector3<f32>,
    mass: f32,
    age: f32,
    lifetime: f32,
    fade_start: f32,
    gravity: Vector3<f32>,
    state: FragmentState,
}

impl FragmentBody {
    /// Places `mesh` at `origin` with identity orientation and an initial linear and angular velocity.
    ///
    /// Mass is the bounds volume times `config.mass_scale`, floored at `config.min_mass`.
    pub fn new(
        mesh: OutputMesh,
        origin: Point3<f32>,
        velocity: Vector3<f32>,
        angular_velocity: Vector3<f32>,
        config: &DebrisConfig,
    ) -> Self {
        let mass = (mesh.bounds.volume() * config.mass_scale).max(config.min_mass);
        let lifetime = config.lifetime.max(0.0);
        Self {
            mesh,
            position: origin,
            orientation: UnitQuaternion::identity(),
            velocity,
            angular_velocity,
            mass,
            age: 0.0,
            lifetime,
            fade_start: lifetime * config.fade_start_fraction.clamp(0.0, 1.0),
            gravity: Vector3::from(config.gravity),
            state: FragmentState::Spawned,
        }
    }

    /// The fragment geometry in the broken object's local space.
    #[inline]
    pub fn mesh(&self) -> &OutputMesh {
        &self.mesh
    }

    /// Mass used to scale explosion impulses.
    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Seconds ticked so far.
    #[inline]
    pub fn age(&self) -> f32 {
        self.age
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> FragmentState {
        self.state
    }

    /// True once the lifetime has run out.
    #[inline]
    pub fn is_removed(&self) -> bool {
        self.state == FragmentState::Removed
    }

    /// World-space center of the fragment's bounds.
    pub fn center(&self) -> Point3<f32> {
        self.position + self.orientation * self.mesh.bounds.center.coords
    }

    /// 1 until the fade begins, then linear down to 0 at the end of the lifetime.
    pub fn opacity(&self) -> f32 {
        match self.state {
            FragmentState::Spawned | FragmentState::Aging => 1.0,
            FragmentState::Removed => 0.0,
            FragmentState::Fading => {
                let span = self.lifetime - self.fade_start;
                if span <= 0.0 {
                    0.0
                } else {
                    (1.0 - (self.age - self.fade_start) / span).clamp(0.0, 1.0)
                }
            }
        }
    }

    /// Advances the clock and the motion by `dt` seconds.
    ///
    /// The fragment translates with `velocity` and spins about its own
    /// center; negative steps are treated as zero.
    pub fn tick(&mut self, dt: f32) {
        if self.state == FragmentState::Removed {
            return;
        }

        let dt = dt.max(0.0);
        self.age += dt;
        self.velocity += self.gravity * dt;

        let center = self.center() + self.velocity * dt;
        self.orientation = UnitQuaternion::from_scaled_axis(self.angular_velocity * dt) * self.orientation;
        self.position = center - self.orientation * self.mesh.bounds.center.coords;

        self.state = if self.age >= self.lifetime {
            FragmentState::Removed
        } else if self.age >= self.fade_start {
            FragmentState::Fading
        } else {
            FragmentState::Aging
        };
    }

    /// Pushes the fragment away from `origin`.
    ///
    /// The impulse is `force * clamp01(1 - distance / radius)` along the
    /// direction from `origin` to the fragment's center. A fragment sitting
    /// exactly on the origin is not pushed.
    pub fn apply_explosion_force(&mut self, origin: Point3<f32>, force: f32, radius: f32) {
        let offset = self.center() - origin;
        let distance = offset.norm();
        let Some(direction) = offset.try_normalize(f32::EPSILON) else {
            return;
        };
        let falloff = if radius > 0.0 {
            (1.0 - distance / radius).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.velocity += direction * (force * falloff / self.mass);
    }
}

/// Wraps each mesh in a body at `origin`.
///
/// Each body inherits `inherited_velocity` plus a random perturbation inside
/// `config.velocity_jitter`, and spins with a random angular velocity inside
/// `config.max_angular_speed`.
pub fn spawn_fragments<R: FractureRng + ?Sized>(
    meshes: Vec<OutputMesh>,
    origin: Point3<f32>,
    inherited_velocity: Vector3<f32>,
    rng: &mut R,
    config: &DebrisConfig,
) -> Vec<FragmentBody> {
    meshes
        .into_iter()
        .map(|mesh| {
            let velocity = inherited_velocity + rng.next_inside_sphere(config.velocity_jitter);
            let spin = rng.next_inside_sphere(config.max_angular_speed);
            FragmentBody::new(mesh, origin, velocity, spin, config)
        })
        .collect()
}

/// The live fragments of any number of broken objects.
#[derive(Debug, Clone, Default)]
pub struct DebrisField {
    bodies: Vec<FragmentBody>,
}

impl DebrisField {
    /// An empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds freshly spawned bodies.
    pub fn spawn(&mut self, bodies: impl IntoIterator<Item = FragmentBody>) {
        self.bodies.extend(bodies);
    }

    /// Applies an explosion to every live fragment.
    pub fn explode(&mut self, origin: Point3<f32>, force: f32, radius: f32) {
        for body in &mut self.bodies {
            body.apply_explosion_force(origin, force, radius);
        }
    }

    /// Advances every fragment and drops the ones whose lifetime ended.
    ///
    /// Returns how many were dropped.
    pub fn tick(&mut self, dt: f32) -> usize {
        for body in &mut self.bodies {
            body.tick(dt);
        }
        let before = self.bodies.len();
        self.bodies.retain(|b| !b.is_removed());
        let removed = before - self.bodies.len();
        if removed > 0 {
            log::trace!("Removed {} expired fragments", removed);
        }
        removed
    }

    /// Drops every fragment at once.
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    /// Number of live fragments.
    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// True when no fragment is alive.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Iterates over the live fragments.
    pub fn iter(&self) -> impl Iterator<Item = &FragmentBody> {
        self.bodies.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::unit_cube;
    use crate::{MeshFragment, test_support::ScriptedRng};
    use approx::assert_relative_eq;

    fn still_config() -> DebrisConfig {
        DebrisConfig {
            lifetime: 10.0,
            gravity: [0.0, 0.0, 0.0],
            ..DebrisConfig::default()
        }
    }

    fn cube_mesh() -> OutputMesh {
        OutputMesh::from_fragment(MeshFragment::from_source(&unit_cube())).unwrap()
    }

    fn make_body(config: &DebrisConfig) -> FragmentBody {
        FragmentBody::new(cube_mesh(), Point3::origin(), Vector3::zeros(), Vector3::zeros(), config)
    }

    #[test]
    fn mass_follows_bounds_volume() {
        let config = DebrisConfig {
            mass_scale: 3.0,
            ..still_config()
        };
        assert_relative_eq!(make_body(&config).mass(), 3.0);
    }

    #[test]
    fn mass_has_a_floor() {
        let config = DebrisConfig {
            mass_scale: 0.001,
            ..still_config()
        };
        assert_relative_eq!(make_body(&config).mass(), 0.1);
    }

    #[test]
    fn lifecycle_walks_through_states() {
        let mut body = make_body(&still_config());
        assert_eq!(body.state(), FragmentState::Spawned);
        assert_eq!(body.opacity(), 1.0);

        body.tick(1.0);
        assert_eq!(body.state(), FragmentState::Aging);

        body.tick(7.0);
        assert_eq!(body.state(), FragmentState::Fading);
        assert_relative_eq!(body.opacity(), 1.0, epsilon = 1e-6);

        body.tick(1.0);
        assert_eq!(body.state(), FragmentState::Fading);
        assert_relative_eq!(body.opacity(), 0.5, epsilon = 1e-5);

        body.tick(1.0);
        assert_eq!(body.state(), FragmentState::Removed);
        assert_eq!(body.opacity(), 0.0);
    }

    #[test]
    fn removed_bodies_stop_moving() {
        let mut body = FragmentBody::new(
            cube_mesh(),
            Point3::origin(),
            Vector3::x(),
            Vector3::zeros(),
            &DebrisConfig {
                lifetime: 1.0,
                ..still_config()
            },
        );
        body.tick(1.0);
        assert!(body.is_removed());
        let position = body.position;
        body.tick(1.0);
        assert_eq!(body.position, position);
    }

    #[test]
    fn ballistic_motion_under_gravity() {
        let config = DebrisConfig {
            gravity: [0.0, -10.0, 0.0],
            ..still_config()
        };
        let mut body = FragmentBody::new(
            cube_mesh(),
            Point3::origin(),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::zeros(),
            &config,
        );
        body.tick(0.5);
        assert_relative_eq!(body.velocity, Vector3::new(1.0, -5.0, 0.0));
        assert_relative_eq!(body.position, Point3::new(0.5, -2.5, 0.0));
    }

    #[test]
    fn spin_rotates_orientation() {
        let mut body = FragmentBody::new(
            cube_mesh(),
            Point3::origin(),
            Vector3::zeros(),
            Vector3::new(0.0, std::f32::consts::PI, 0.0),
            &still_config(),
        );
        body.tick(0.5);
        assert_relative_eq!(body.orientation.angle(), std::f32::consts::FRAC_PI_2, epsilon = 1e-5);
    }

    fn offset_cube_mesh(offset: Vector3<f32>) -> OutputMesh {
        let mut cube = unit_cube();
        for v in &mut cube.vertices {
            *v += offset;
        }
        OutputMesh::from_fragment(MeshFragment::from_source(&cube)).unwrap()
    }

    #[test]
    fn off_origin_fragment_spins_in_place() {
        let mut body = FragmentBody::new(
            offset_cube_mesh(Vector3::new(2.0, 0.0, 0.0)),
            Point3::origin(),
            Vector3::zeros(),
            Vector3::new(0.0, 5.0, 0.0),
            &still_config(),
        );
        assert_relative_eq!(body.center(), Point3::new(2.0, 0.0, 0.0), epsilon = 1e-6);

        for _ in 0..10 {
            body.tick(0.05);
        }
        assert_relative_eq!(body.orientation.angle(), 2.5, epsilon = 1e-4);
        assert_relative_eq!(body.center(), Point3::new(2.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn off_origin_fragment_center_follows_velocity() {
        let mut body = FragmentBody::new(
            offset_cube_mesh(Vector3::new(0.0, 0.0, -3.0)),
            Point3::origin(),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 1.0),
            &still_config(),
        );
        body.tick(0.5);
        assert_relative_eq!(body.center(), Point3::new(0.5, 0.0, -3.0), epsilon = 1e-5);
    }

    #[test]
    fn negative_step_changes_nothing() {
        let mut body = FragmentBody::new(
            offset_cube_mesh(Vector3::new(1.0, 0.0, 0.0)),
            Point3::origin(),
            Vector3::x(),
            Vector3::y(),
            &DebrisConfig {
                gravity: [0.0, -10.0, 0.0],
                ..still_config()
            },
        );
        body.tick(-1.0);
        assert_eq!(body.age(), 0.0);
        assert_eq!(body.velocity, Vector3::x());
        assert_relative_eq!(body.center(), Point3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(body.orientation.angle(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn explosion_falls_off_with_distance() {
        let config = DebrisConfig {
            mass_scale: 1.0,
            ..still_config()
        };
        let mut near = make_body(&config);
        let mut far = make_body(&config);
        let mut outside = make_body(&config);

        near.apply_explosion_force(Point3::new(-1.0, 0.0, 0.0), 10.0, 4.0);
        far.apply_explosion_force(Point3::new(-3.0, 0.0, 0.0), 10.0, 4.0);
        outside.apply_explosion_force(Point3::new(-5.0, 0.0, 0.0), 10.0, 4.0);

        // Unit cube: mass 1, center at origin.
        assert_relative_eq!(near.velocity, Vector3::new(7.5, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(far.velocity, Vector3::new(2.5, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(outside.velocity, Vector3::zeros());
    }

    #[test]
    fn explosion_at_center_does_nothing() {
        let mut body = make_body(&still_config());
        body.apply_explosion_force(Point3::origin(), 10.0, 4.0);
        assert_eq!(body.velocity, Vector3::zeros());
    }

    #[test]
    fn spawn_adds_jitter_to_inherited_velocity() {
        let mut rng = ScriptedRng::new(0.5, Vector3::x(), Vector3::new(0.0, 0.25, 0.0));
        let bodies = spawn_fragments(
            vec![cube_mesh(), cube_mesh()],
            Point3::new(0.0, 2.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            &mut rng,
            &still_config(),
        );

        assert_eq!(bodies.len(), 2);
        for body in &bodies {
            assert_relative_eq!(body.velocity, Vector3::new(1.0, 0.25, 0.0));
            assert_relative_eq!(body.angular_velocity, Vector3::new(0.0, 0.25, 0.0));
            assert_relative_eq!(body.center(), Point3::new(0.0, 2.0, 0.0));
        }
    }

    #[test]
    fn field_drops_expired_bodies() {
        let short = DebrisConfig {
            lifetime: 1.0,
            ..still_config()
        };
        let mut field = DebrisField::new();
        field.spawn([make_body(&short), make_body(&still_config())]);
        assert_eq!(field.len(), 2);

        assert_eq!(field.tick(0.5), 0);
        assert_eq!(field.tick(0.5), 1);
        assert_eq!(field.len(), 1);

        field.clear();
        assert!(field.is_empty());
    }
}
