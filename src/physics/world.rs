//! 2D physics simulation using rapier2d

use glam::Vec2;
use rapier2d::prelude::*;

/// Handle to a rigid body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub rapier2d::dynamics::RigidBodyHandle);

/// Handle to a collider in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle(pub rapier2d::geometry::ColliderHandle);

/// Convert a glam vector to a rapier vector
fn to_rapier(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

/// Convert a rapier vector to a glam vector
fn to_glam(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Surface and mass properties for a collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderProps {
    /// Bounciness, 0.0 is fully inelastic
    pub restitution: f32,
    /// Coulomb friction coefficient
    pub friction: f32,
    /// Mass density
    pub density: f32,
}

impl Default for ColliderProps {
    fn default() -> Self {
        Self {
            restitution: 0.0,
            friction: 0.5,
            density: 1.0,
        }
    }
}

/// Result of a ray cast
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// The collider that was hit
    pub collider: ColliderHandle,
    /// World-space point of intersection
    pub point: Vec2,
    /// Distance from the ray origin, in units of the ray direction
    pub toi: f32,
}

/// Physics world manager
///
/// Owns the full rapier2d pipeline state and exposes the small surface the
/// rest of the crate needs: body/collider creation, pose and velocity
/// accessors, force accumulation and reset, and ray-cast queries that see
/// fixed and dynamic colliders alike.
pub struct PhysicsWorld {
    /// Gravity vector
    pub gravity: Vec2,
    /// Physics pipeline
    pipeline: PhysicsPipeline,
    /// Island manager
    island_manager: IslandManager,
    /// Broad phase
    broad_phase: DefaultBroadPhase,
    /// Narrow phase
    narrow_phase: NarrowPhase,
    /// Rigid body set
    bodies: RigidBodySet,
    /// Collider set
    colliders: ColliderSet,
    /// Impulse joint set
    impulse_joints: ImpulseJointSet,
    /// Multibody joint set
    multibody_joints: MultibodyJointSet,
    /// CCD solver
    ccd_solver: CCDSolver,
    /// Query pipeline for ray casting
    query_pipeline: QueryPipeline,
    /// Integration parameters
    integration_parameters: IntegrationParameters,
}

impl PhysicsWorld {
    /// Create a new physics world with default gravity
    pub fn new() -> Self {
        Self::with_gravity(Vec2::new(0.0, -9.81))
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vec2) -> Self {
        Self {
            gravity,
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            integration_parameters: IntegrationParameters::default(),
        }
    }

    /// Step the physics simulation
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;

        self.pipeline.step(
            &to_rapier(self.gravity),
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Create a fixed rigid body (doesn't move)
    pub fn create_fixed_body(&mut self, translation: Vec2) -> BodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(to_rapier(translation))
            .build();

        BodyHandle(self.bodies.insert(body))
    }

    /// Create a dynamic rigid body (affected by forces and gravity)
    pub fn create_dynamic_body(&mut self, translation: Vec2) -> BodyHandle {
        self.create_dynamic_body_with_damping(translation, 0.0)
    }

    /// Create a dynamic rigid body with angular damping
    pub fn create_dynamic_body_with_damping(
        &mut self,
        translation: Vec2,
        angular_damping: f32,
    ) -> BodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(to_rapier(translation))
            .angular_damping(angular_damping)
            .build();

        BodyHandle(self.bodies.insert(body))
    }

    /// Attach a cuboid collider to a rigid body
    pub fn attach_cuboid(
        &mut self,
        body: BodyHandle,
        half_extents: Vec2,
        props: ColliderProps,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .restitution(props.restitution)
            .friction(props.friction)
            .density(props.density)
            .build();

        let handle = self
            .colliders
            .insert_with_parent(collider, body.0, &mut self.bodies);
        self.refresh_queries();

        ColliderHandle(handle)
    }

    /// Attach a ball collider to a rigid body
    pub fn attach_ball(
        &mut self,
        body: BodyHandle,
        radius: f32,
        props: ColliderProps,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::ball(radius)
            .restitution(props.restitution)
            .friction(props.friction)
            .density(props.density)
            .build();

        let handle = self
            .colliders
            .insert_with_parent(collider, body.0, &mut self.bodies);
        self.refresh_queries();

        ColliderHandle(handle)
    }

    /// Get the translation of a rigid body
    pub fn translation(&self, body: BodyHandle) -> Option<Vec2> {
        self.bodies.get(body.0).map(|rb| to_glam(rb.translation()))
    }

    /// Set the translation of a rigid body
    pub fn set_translation(&mut self, body: BodyHandle, translation: Vec2, wake_up: bool) {
        if let Some(rb) = self.bodies.get_mut(body.0) {
            rb.set_translation(to_rapier(translation), wake_up);
        }
    }

    /// Get the linear velocity of a body
    pub fn linvel(&self, body: BodyHandle) -> Option<Vec2> {
        self.bodies.get(body.0).map(|rb| to_glam(rb.linvel()))
    }

    /// Set the linear velocity of a body
    pub fn set_linvel(&mut self, body: BodyHandle, velocity: Vec2, wake_up: bool) {
        if let Some(rb) = self.bodies.get_mut(body.0) {
            rb.set_linvel(to_rapier(velocity), wake_up);
        }
    }

    /// Add to the forces accumulated on a body for the next step
    pub fn add_force(&mut self, body: BodyHandle, force: Vec2, wake_up: bool) {
        if let Some(rb) = self.bodies.get_mut(body.0) {
            rb.add_force(to_rapier(force), wake_up);
        }
    }

    /// Clear all forces accumulated on a body
    pub fn reset_forces(&mut self, body: BodyHandle, wake_up: bool) {
        if let Some(rb) = self.bodies.get_mut(body.0) {
            rb.reset_forces(wake_up);
        }
    }

    /// Get the forces currently accumulated on a body
    pub fn user_force(&self, body: BodyHandle) -> Option<Vec2> {
        self.bodies.get(body.0).map(|rb| to_glam(&rb.user_force()))
    }

    /// Cast a ray and return the first hit within `max_toi`
    ///
    /// Fixed and dynamic colliders are both candidates. With `solid` set, a
    /// ray starting inside a shape reports a hit at distance zero.
    pub fn cast_ray(&self, origin: Vec2, dir: Vec2, max_toi: f32, solid: bool) -> Option<RayHit> {
        let ray = Ray::new(point![origin.x, origin.y], to_rapier(dir));

        self.query_pipeline
            .cast_ray(
                &self.bodies,
                &self.colliders,
                &ray,
                max_toi,
                solid,
                QueryFilter::default(),
            )
            .map(|(handle, toi)| {
                let point = ray.point_at(toi);
                RayHit {
                    collider: ColliderHandle(handle),
                    point: Vec2::new(point.x, point.y),
                    toi,
                }
            })
    }

    /// Number of rigid bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of colliders in the world
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    // The query pipeline is normally refreshed by `step`; refreshing after
    // structural changes keeps ray casts valid before the first step.
    fn refresh_queries(&mut self) {
        self.query_pipeline.update(&self.colliders);
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_dynamic_body_falls_under_gravity() {
        let mut world = PhysicsWorld::new();
        let body = world.create_dynamic_body(Vec2::new(0.0, 10.0));
        world.attach_ball(body, 0.5, ColliderProps::default());

        for _ in 0..30 {
            world.step(DT);
        }

        let velocity = world.linvel(body).unwrap();
        let position = world.translation(body).unwrap();
        assert!(velocity.y < 0.0);
        assert!(position.y < 10.0);
    }

    #[test]
    fn test_fixed_body_ignores_gravity() {
        let mut world = PhysicsWorld::new();
        let body = world.create_fixed_body(Vec2::new(3.0, 4.0));
        world.attach_cuboid(body, Vec2::new(1.0, 1.0), ColliderProps::default());

        for _ in 0..30 {
            world.step(DT);
        }

        assert_eq!(world.translation(body).unwrap(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_cast_ray_hits_fixed_collider_before_first_step() {
        let mut world = PhysicsWorld::new();
        let ground = world.create_fixed_body(Vec2::ZERO);
        world.attach_cuboid(ground, Vec2::new(40.0, 0.1), ColliderProps::default());

        let hit = world
            .cast_ray(Vec2::new(0.0, 5.0), Vec2::new(0.0, -1.0), 10.0, true)
            .expect("ray should hit the ground slab");

        assert!((hit.point.y - 0.1).abs() < 1e-3);
        assert!((hit.toi - 4.9).abs() < 1e-3);
    }

    #[test]
    fn test_cast_ray_respects_max_toi() {
        let mut world = PhysicsWorld::new();
        let ground = world.create_fixed_body(Vec2::ZERO);
        world.attach_cuboid(ground, Vec2::new(40.0, 0.1), ColliderProps::default());

        let hit = world.cast_ray(Vec2::new(0.0, 5.0), Vec2::new(0.0, -1.0), 1.0, true);
        assert!(hit.is_none());
    }

    #[test]
    fn test_solid_ray_from_inside_hits_at_zero() {
        let mut world = PhysicsWorld::new();
        let ground = world.create_fixed_body(Vec2::ZERO);
        world.attach_cuboid(ground, Vec2::new(40.0, 0.1), ColliderProps::default());

        let hit = world
            .cast_ray(Vec2::new(0.0, 0.05), Vec2::new(0.0, -1.0), 0.01, true)
            .expect("solid ray starting inside should hit");
        assert_eq!(hit.toi, 0.0);
    }

    #[test]
    fn test_add_force_accumulates_until_reset() {
        let mut world = PhysicsWorld::new();
        let body = world.create_dynamic_body(Vec2::ZERO);
        world.attach_ball(body, 1.0, ColliderProps::default());

        world.add_force(body, Vec2::new(500.0, 0.0), true);
        world.add_force(body, Vec2::new(100.0, 0.0), true);
        assert_eq!(world.user_force(body).unwrap(), Vec2::new(600.0, 0.0));

        world.reset_forces(body, true);
        assert_eq!(world.user_force(body).unwrap(), Vec2::ZERO);

        // Reset is idempotent
        world.reset_forces(body, true);
        assert_eq!(world.user_force(body).unwrap(), Vec2::ZERO);
    }

    #[test]
    fn test_set_linvel_roundtrip() {
        let mut world = PhysicsWorld::new();
        let body = world.create_dynamic_body(Vec2::ZERO);

        world.set_linvel(body, Vec2::new(3.0, -2.0), true);
        assert_eq!(world.linvel(body).unwrap(), Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_accessors_on_foreign_handle_return_none() {
        let mut populated = PhysicsWorld::new();
        let body = populated.create_dynamic_body(Vec2::ZERO);

        let empty = PhysicsWorld::new();
        assert!(empty.translation(body).is_none());
        assert!(empty.linvel(body).is_none());
        assert!(empty.user_force(body).is_none());
    }

    #[test]
    fn test_counts() {
        let mut world = PhysicsWorld::new();
        assert_eq!(world.body_count(), 0);

        let a = world.create_fixed_body(Vec2::ZERO);
        world.attach_cuboid(a, Vec2::new(1.0, 1.0), ColliderProps::default());
        let b = world.create_dynamic_body(Vec2::new(0.0, 5.0));
        world.attach_ball(b, 0.5, ColliderProps::default());

        assert_eq!(world.body_count(), 2);
        assert_eq!(world.collider_count(), 2);
    }
}
