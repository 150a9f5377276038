//! Demonstration scene: a keyboard-driven ball on a walled platform

use tumble::prelude::*;
use tumble::scene::ball_arena;

/// Demo driving one dynamic ball with the keyboard
struct BallDemo {
    physics: PhysicsWorld,
    camera: Camera2d,
    mapper: InputMapper,
    controller: Option<BallController>,
    spawn_point: Vec2,
}

impl BallDemo {
    fn new() -> Self {
        Self {
            physics: PhysicsWorld::new(),
            camera: Camera2d::new(),
            mapper: InputMapper::with_defaults(),
            controller: None,
            spawn_point: Vec2::ZERO,
        }
    }
}

impl Demo for BallDemo {
    fn init(&mut self, _ctx: &mut AppContext) {
        log::info!("Setting up the ball arena");

        let scene = ball_arena();
        let spawned = scene.spawn(&mut self.physics);
        let ball = spawned
            .find("ball")
            .expect("ball arena always contains a ball");

        self.spawn_point = self.physics.translation(ball).unwrap_or(Vec2::ZERO);
        self.controller = Some(BallController::new(ball));
        self.camera.look_at(Vec2::new(0.0, -1.0), 10.0);

        log::info!(
            "Ball arena ready: {} bodies, {} colliders",
            self.physics.body_count(),
            self.physics.collider_count()
        );
    }

    fn update(&mut self, ctx: &mut AppContext) {
        if self.mapper.action_pressed(InputAction::Quit, &ctx.input) {
            ctx.quit();
            return;
        }

        let Some(controller) = &self.controller else {
            return;
        };
        let ball = controller.body();

        if self.mapper.action_just_pressed(InputAction::Reset, &ctx.input) {
            self.physics.set_translation(ball, self.spawn_point, true);
            self.physics.set_linvel(ball, Vec2::ZERO, true);
            log::debug!("ball respawned at {}", self.spawn_point);
        }

        // Control step first, then integrate its mutations
        let input = ControlInput::capture(&ctx.input, &self.mapper);
        controller.step(&mut self.physics, &input);

        let dt = ctx.time.delta_seconds().min(0.1);
        self.physics.step(dt);
        ctx.stats.record_step(dt);

        // Scroll wheel zooms the camera
        let scroll = ctx.input.scroll_delta();
        if scroll.y != 0.0 {
            self.camera.zoom_by(1.1_f32.powf(scroll.y));
        }

        if ctx.time.frame_count() % 120 == 0
            && let Some(position) = self.physics.translation(ball)
        {
            log::debug!(
                "{} | ball at ({:.2}, {:.2})",
                ctx.stats.format_stats(),
                position.x,
                position.y
            );
        }
    }

    fn shutdown(&mut self, ctx: &mut AppContext) {
        log::info!(
            "Shutting down after {} frames ({:.1}s simulated)",
            ctx.time.frame_count(),
            ctx.stats.simulated_time()
        );
    }
}

fn main() {
    let config = AppConfig::default()
        .with_title("Tumble Playground")
        .with_size(1280, 720);

    let demo = BallDemo::new();
    let app = App::new(config, demo);

    if let Err(e) = app.run() {
        eprintln!("Application error: {}", e);
    }
}
