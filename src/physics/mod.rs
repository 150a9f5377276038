//! Physics simulation module
//!
//! Built on top of rapier2d

mod world;

pub use world::{BodyHandle, ColliderHandle, ColliderProps, PhysicsWorld, RayHit};
