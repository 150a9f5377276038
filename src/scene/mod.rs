//! Scene descriptions
//!
//! Serializable body and collider descriptions that can be saved and loaded
//! in RON (Rusty Object Notation) or JSON format, and spawned into a
//! [`PhysicsWorld`].

use std::fs;
use std::path::Path;

use glam::Vec2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::physics::{BodyHandle, ColliderProps, PhysicsWorld};

fn default_friction() -> f32 {
    0.5
}

fn default_density() -> f32 {
    1.0
}

fn default_version() -> u32 {
    1
}

/// How a body participates in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Immovable
    Fixed,
    /// Affected by forces and gravity
    Dynamic,
}

/// Collider geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeDesc {
    /// Axis-aligned box given by half extents
    Cuboid { half_extents: Vec2 },
    /// Circle given by radius
    Ball { radius: f32 },
}

/// A body with one collider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDesc {
    /// Optional body name, unique within a scene if present
    pub name: Option<String>,
    /// Fixed or dynamic
    pub kind: BodyKind,
    /// Initial translation
    pub translation: Vec2,
    /// Collider geometry
    pub shape: ShapeDesc,
    /// Angular damping applied to the body
    #[serde(default)]
    pub angular_damping: f32,
    /// Collider restitution
    #[serde(default)]
    pub restitution: f32,
    /// Collider friction
    #[serde(default = "default_friction")]
    pub friction: f32,
    /// Collider density
    #[serde(default = "default_density")]
    pub density: f32,
}

impl BodyDesc {
    /// Describe a fixed body
    #[must_use]
    pub fn fixed(translation: Vec2, shape: ShapeDesc) -> Self {
        Self {
            name: None,
            kind: BodyKind::Fixed,
            translation,
            shape,
            angular_damping: 0.0,
            restitution: 0.0,
            friction: default_friction(),
            density: default_density(),
        }
    }

    /// Describe a dynamic body
    #[must_use]
    pub fn dynamic(translation: Vec2, shape: ShapeDesc) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            ..Self::fixed(translation, shape)
        }
    }

    /// Set the body name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set angular damping
    #[must_use]
    pub fn with_angular_damping(mut self, angular_damping: f32) -> Self {
        self.angular_damping = angular_damping;
        self
    }

    /// Set collider restitution
    #[must_use]
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set collider friction
    #[must_use]
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    fn collider_props(&self) -> ColliderProps {
        ColliderProps {
            restitution: self.restitution,
            friction: self.friction,
            density: self.density,
        }
    }
}

/// A serializable scene containing bodies and the world gravity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name
    pub name: String,
    /// Scene version for compatibility
    #[serde(default = "default_version")]
    pub version: u32,
    /// World gravity
    pub gravity: Vec2,
    /// All bodies in the scene
    pub bodies: Vec<BodyDesc>,
}

impl Scene {
    /// Create a new empty scene with default gravity
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: 1,
            gravity: Vec2::new(0.0, -9.81),
            bodies: Vec::new(),
        }
    }

    /// Add a body to the scene
    pub fn add_body(&mut self, body: BodyDesc) -> usize {
        let index = self.bodies.len();
        self.bodies.push(body);
        index
    }

    /// Save the scene to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SceneError::SerializeError(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| SceneError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load a scene from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let content = fs::read_to_string(path).map_err(|e| SceneError::IoError(e.to_string()))?;
        let scene: Scene =
            ron::from_str(&content).map_err(|e| SceneError::DeserializeError(e.to_string()))?;
        Ok(scene)
    }

    /// Save the scene to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let json_string = serde_json::to_string_pretty(self)
            .map_err(|e| SceneError::SerializeError(e.to_string()))?;
        fs::write(path, json_string).map_err(|e| SceneError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load a scene from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let content = fs::read_to_string(path).map_err(|e| SceneError::IoError(e.to_string()))?;
        let scene: Scene = serde_json::from_str(&content)
            .map_err(|e| SceneError::DeserializeError(e.to_string()))?;
        Ok(scene)
    }

    /// Spawn every body of the scene into `world`
    ///
    /// The world's gravity is set to the scene's gravity. Returns the created
    /// handles, addressable by body name where one was given.
    pub fn spawn(&self, world: &mut PhysicsWorld) -> SpawnedScene {
        world.gravity = self.gravity;

        let mut spawned = SpawnedScene::default();
        for desc in &self.bodies {
            let body = match desc.kind {
                BodyKind::Fixed => world.create_fixed_body(desc.translation),
                BodyKind::Dynamic => {
                    world.create_dynamic_body_with_damping(desc.translation, desc.angular_damping)
                }
            };

            match desc.shape {
                ShapeDesc::Cuboid { half_extents } => {
                    world.attach_cuboid(body, half_extents, desc.collider_props());
                }
                ShapeDesc::Ball { radius } => {
                    world.attach_ball(body, radius, desc.collider_props());
                }
            }

            if let Some(name) = &desc.name {
                spawned.by_name.insert(name.clone(), body);
            }
            spawned.handles.push(body);
        }

        spawned
    }

    /// Get the number of bodies
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Check if the scene is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Handles created by spawning a scene
#[derive(Debug, Default)]
pub struct SpawnedScene {
    /// All created body handles, in scene order
    pub handles: Vec<BodyHandle>,
    /// Handles addressable by body name
    by_name: FxHashMap<String, BodyHandle>,
}

impl SpawnedScene {
    /// Look up a spawned body by name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<BodyHandle> {
        self.by_name.get(name).copied()
    }

    /// Number of spawned bodies
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Check if nothing was spawned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Built-in demo scene: a walled platform with one controllable ball
///
/// Three fixed slabs form the floor and side walls. The ball starts high up
/// on the right, bouncy, nearly frictionless and heavily angular-damped.
#[must_use]
pub fn ball_arena() -> Scene {
    let mut scene = Scene::new("ball-arena");
    let ground_size = 40.0;

    scene.add_body(
        BodyDesc::fixed(
            Vec2::ZERO,
            ShapeDesc::Cuboid {
                half_extents: Vec2::new(ground_size, 0.1),
            },
        )
        .with_name("ground"),
    );
    scene.add_body(
        BodyDesc::fixed(
            Vec2::new(-ground_size, ground_size),
            ShapeDesc::Cuboid {
                half_extents: Vec2::new(0.1, ground_size),
            },
        )
        .with_name("left-wall"),
    );
    scene.add_body(
        BodyDesc::fixed(
            Vec2::new(ground_size, ground_size),
            ShapeDesc::Cuboid {
                half_extents: Vec2::new(0.1, ground_size),
            },
        )
        .with_name("right-wall"),
    );

    scene.add_body(
        BodyDesc::dynamic(Vec2::new(20.0, 20.0), ShapeDesc::Ball { radius: 2.0 })
            .with_name("ball")
            .with_angular_damping(100.0)
            .with_restitution(0.6)
            .with_friction(0.0001),
    );

    scene
}

/// Errors that can occur during scene operations
#[derive(Debug, Clone)]
pub enum SceneError {
    /// IO error
    IoError(String),
    /// Serialization error
    SerializeError(String),
    /// Deserialization error
    DeserializeError(String),
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialization error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialization error: {e}"),
        }
    }
}

impl std::error::Error for SceneError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_serialization_ron() {
        let scene = ball_arena();

        let ron_str =
            ron::ser::to_string_pretty(&scene, ron::ser::PrettyConfig::default()).unwrap();
        assert!(ron_str.contains("ball"));

        let loaded: Scene = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded.name, "ball-arena");
        assert_eq!(loaded.body_count(), 4);
        assert_eq!(loaded.bodies[3].name, Some("ball".to_string()));
    }

    #[test]
    fn test_scene_serialization_json() {
        let mut scene = Scene::new("json-test");
        scene.add_body(
            BodyDesc::dynamic(Vec2::new(1.0, 2.0), ShapeDesc::Ball { radius: 0.5 })
                .with_name("marble"),
        );

        let json_str = serde_json::to_string(&scene).unwrap();
        let loaded: Scene = serde_json::from_str(&json_str).unwrap();

        assert_eq!(loaded.name, "json-test");
        assert_eq!(loaded.bodies[0].kind, BodyKind::Dynamic);
        assert_eq!(loaded.bodies[0].translation, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_scene_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arena.ron");

        let scene = ball_arena();
        scene.save_ron(&path).unwrap();
        let loaded = Scene::load_ron(&path).unwrap();

        assert_eq!(loaded.body_count(), scene.body_count());
        assert_eq!(loaded.gravity, scene.gravity);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = Scene::load_ron("/nonexistent/arena.ron");
        assert!(matches!(result, Err(SceneError::IoError(_))));
    }

    #[test]
    fn test_serde_defaults_fill_optional_fields() {
        // Friction and density fall back to their defaults when omitted
        let ron_str = r#"(
            name: "minimal",
            gravity: (0.0, -9.81),
            bodies: [(
                name: None,
                kind: Fixed,
                translation: (0.0, 0.0),
                shape: Cuboid(half_extents: (1.0, 1.0)),
            )],
        )"#;

        let scene: Scene = ron::from_str(ron_str).unwrap();
        assert_eq!(scene.version, 1);
        assert_eq!(scene.bodies[0].friction, 0.5);
        assert_eq!(scene.bodies[0].density, 1.0);
        assert_eq!(scene.bodies[0].restitution, 0.0);
    }

    #[test]
    fn test_spawn_creates_bodies_and_name_lookup() {
        let mut world = PhysicsWorld::with_gravity(Vec2::ZERO);
        let scene = ball_arena();

        let spawned = scene.spawn(&mut world);

        assert_eq!(spawned.len(), 4);
        assert_eq!(world.body_count(), 4);
        assert_eq!(world.collider_count(), 4);
        assert_eq!(world.gravity, Vec2::new(0.0, -9.81));

        let ball = spawned.find("ball").unwrap();
        assert_eq!(world.translation(ball).unwrap(), Vec2::new(20.0, 20.0));
        assert!(spawned.find("no-such-body").is_none());
    }

    #[test]
    fn test_spawned_ball_responds_to_gravity_while_walls_hold() {
        let mut world = PhysicsWorld::new();
        let spawned = ball_arena().spawn(&mut world);
        let ball = spawned.find("ball").unwrap();
        let wall = spawned.find("left-wall").unwrap();

        for _ in 0..30 {
            world.step(1.0 / 60.0);
        }

        assert!(world.translation(ball).unwrap().y < 20.0);
        assert_eq!(
            world.translation(wall).unwrap(),
            Vec2::new(-40.0, 40.0)
        );
    }
}
