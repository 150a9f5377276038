//! Ball control
//!
//! A per-frame controller for a single dynamic ball. Ground contact is
//! re-derived every frame from a short downward ray probe, horizontal drive
//! forces respect a soft speed cap, and jumping overwrites vertical velocity
//! while grounded. Each frame produces one deterministic [`ControlCommand`]
//! that is applied atomically.

use glam::Vec2;

use crate::input::{Input, InputAction, InputMapper};
use crate::physics::{BodyHandle, PhysicsWorld};

/// Ground contact classification for the current frame
///
/// Derived fresh on every control step, never stored across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundState {
    /// The downward probe reported a hit
    Grounded,
    /// The downward probe reported nothing
    Airborne,
}

impl GroundState {
    /// Whether the body had ground contact this frame
    #[must_use]
    pub fn is_grounded(self) -> bool {
        matches!(self, Self::Grounded)
    }
}

/// Snapshot of the control-relevant input for one frame
///
/// An explicit value, captured once per frame; the controller never reads
/// key state directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlInput {
    /// Drive left is held
    pub left: bool,
    /// Drive right is held
    pub right: bool,
    /// Jump is held
    pub jump: bool,
}

impl ControlInput {
    /// Capture the current action state from the input tracker and mapper
    #[must_use]
    pub fn capture(input: &Input, mapper: &InputMapper) -> Self {
        Self {
            left: mapper.action_pressed(InputAction::MoveLeft, input),
            right: mapper.action_pressed(InputAction::MoveRight, input),
            jump: mapper.action_pressed(InputAction::Jump, input),
        }
    }
}

/// Tuning for the ball controller
///
/// The probe origin sits `body_radius + probe_gap` below the body center and
/// extends `probe_range` further down. Contact detection relies on the probe
/// staying near zero length; widening it reports ground where there is none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlConfig {
    /// Horizontal drive force magnitude
    pub move_force: f32,
    /// Horizontal speed at which the drive force is withheld
    pub max_speed: f32,
    /// Vertical velocity asserted when jumping
    pub jump_speed: f32,
    /// Radius of the controlled ball
    pub body_radius: f32,
    /// Gap between the ball surface and the probe origin
    pub probe_gap: f32,
    /// Maximum probe travel distance
    pub probe_range: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            move_force: 500.0,
            max_speed: 15.0,
            jump_speed: 15.0,
            body_radius: 2.0,
            probe_gap: 0.01,
            probe_range: 0.01,
        }
    }
}

/// One frame's worth of control mutations
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlCommand {
    /// Horizontal drive force to add this frame
    pub force: Option<Vec2>,
    /// Vertical velocity to assert this frame; horizontal is left untouched
    pub vertical_velocity: Option<f32>,
}

impl ControlCommand {
    /// Apply this command to `body`
    ///
    /// Accumulated forces are cleared first, every frame, even when the rest
    /// of the command is empty. Each mutation wakes the body.
    pub fn apply(&self, world: &mut PhysicsWorld, body: BodyHandle) {
        world.reset_forces(body, true);

        if let Some(force) = self.force {
            world.add_force(body, force, true);
        }

        if let Some(vy) = self.vertical_velocity
            && let Some(linvel) = world.linvel(body)
        {
            world.set_linvel(body, Vec2::new(linvel.x, vy), true);
        }
    }
}

/// Per-frame controller for a single dynamic ball
///
/// Exposes a single [`step`](Self::step) entry point; the host frame loop
/// owns scheduling and calls it once per frame.
#[derive(Debug)]
pub struct BallController {
    /// The controlled body
    body: BodyHandle,
    /// Tuning parameters
    config: ControlConfig,
}

impl BallController {
    /// Create a controller with the default tuning
    #[must_use]
    pub fn new(body: BodyHandle) -> Self {
        Self::with_config(body, ControlConfig::default())
    }

    /// Create a controller with custom tuning
    #[must_use]
    pub fn with_config(body: BodyHandle, config: ControlConfig) -> Self {
        Self { body, config }
    }

    /// The controlled body
    #[must_use]
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// The active tuning
    #[must_use]
    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Classify ground contact by probing straight down from just below the
    /// ball surface
    #[must_use]
    pub fn classify(&self, world: &PhysicsWorld) -> GroundState {
        let Some(center) = world.translation(self.body) else {
            return GroundState::Airborne;
        };

        let origin = Vec2::new(
            center.x,
            center.y - (self.config.body_radius + self.config.probe_gap),
        );
        match world.cast_ray(origin, Vec2::new(0.0, -1.0), self.config.probe_range, true) {
            Some(_) => GroundState::Grounded,
            None => GroundState::Airborne,
        }
    }

    /// Decide this frame's command from the ground classification, the input
    /// snapshot and the current linear velocity
    ///
    /// Pure: no world access. Left wins when both horizontal actions are
    /// held. The drive force is withheld once the speed cap is reached in
    /// the driven direction, but a faster body is never actively slowed.
    /// Jump asserts the vertical velocity on every grounded frame the action
    /// is held, not just on the press.
    #[must_use]
    pub fn decide(
        &self,
        ground: GroundState,
        input: &ControlInput,
        linvel: Vec2,
    ) -> ControlCommand {
        let cfg = &self.config;
        let mut command = ControlCommand::default();

        if input.left {
            if linvel.x > -cfg.max_speed {
                command.force = Some(Vec2::new(-cfg.move_force, 0.0));
            }
        } else if input.right && linvel.x < cfg.max_speed {
            command.force = Some(Vec2::new(cfg.move_force, 0.0));
        }

        if ground.is_grounded() && input.jump {
            command.vertical_velocity = Some(cfg.jump_speed);
        }

        command
    }

    /// Run one control step: classify, decide, apply
    ///
    /// Returns the frame's ground classification for observers.
    pub fn step(&self, world: &mut PhysicsWorld, input: &ControlInput) -> GroundState {
        let ground = self.classify(world);
        let linvel = world.linvel(self.body).unwrap_or(Vec2::ZERO);
        let command = self.decide(ground, input, linvel);
        command.apply(world, self.body);
        ground
    }
}
