//! A 2D physics playground built in Rust
//!
//! This crate provides:
//! - A frame-driven application shell built on winit
//! - Input state tracking with rebindable key-to-action mapping
//! - 2D physics simulation with rapier2d
//! - A keyboard-driven ball controller with ground-contact probing
//! - Serializable scene descriptions in RON or JSON

pub mod camera;
pub mod control;
pub mod core;
pub mod input;
pub mod physics;
pub mod scene;

// Re-exports for convenience
pub use glam;
pub use rapier2d;
pub use winit;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::camera::Camera2d;
    pub use crate::control::{
        BallController, ControlCommand, ControlConfig, ControlInput, GroundState,
    };
    pub use crate::core::{App, AppConfig, AppContext, Demo, SimStats, Time};
    pub use crate::input::{Input, InputAction, InputMapper};
    pub use crate::physics::{BodyHandle, ColliderProps, PhysicsWorld, RayHit};
    pub use crate::scene::{BodyDesc, BodyKind, Scene, SceneError, ShapeDesc, SpawnedScene};
    pub use glam::{Mat4, Vec2};
    pub use winit::keyboard::KeyCode;
}
