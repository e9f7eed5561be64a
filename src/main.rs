//! Vantage - headless camera rig demo
//!
//! Builds a small physics scene, replays a scripted input track through the
//! free-roam and follow rigs on a fixed tick and logs the resulting poses.

use anyhow::{Context, Result};
use glam::{Vec2, Vec3};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use vantage_core::{GameTime, TimeConfig};
use vantage_physics::{CameraProbe, PhysicsWorld, TargetHandle};
use vantage_rig::{ButtonState, FollowConfig, FollowRig, RigInput, RtsConfig, RtsRig};

/// Fixed simulation step
const TICK: f32 = 1.0 / 60.0;
/// Number of ticks to simulate
const TICKS: u64 = 240;
/// Log both rigs every this many ticks
const LOG_INTERVAL: u64 = 30;
/// Tick on which the followed object is removed from the scene
const TARGET_REMOVED_AT: u64 = 210;

const SCREEN: Vec2 = Vec2::new(1280.0, 720.0);

/// Everything the demo simulates
struct Demo {
    time: GameTime,
    world: PhysicsWorld,
    target: Option<TargetHandle>,
    free_roam: RtsRig,
    follow: FollowRig,
}

impl Demo {
    fn new() -> Result<Self> {
        let mut world = PhysicsWorld::new();
        world.add_ground(0.0);
        world.add_wall(Vec3::new(4.0, 3.0, 0.5), Vec3::new(0.0, 3.0, 4.0));
        let target = world.add_target(0.5, Vec3::new(0.0, 0.5, 0.0));
        world.step();

        let free_roam = RtsRig::new(RtsConfig::default(), Vec3::ZERO)
            .context("Invalid free-roam rig configuration")?;

        let follow_config = FollowConfig {
            lock_orbit: false,
            double_collision_check: true,
            lerp_follow_target: true,
            ..Default::default()
        };
        let follow =
            FollowRig::new(follow_config, target).context("Invalid follow rig configuration")?;

        Ok(Self {
            time: GameTime::new(TimeConfig::default()),
            world,
            target: Some(target),
            free_roam,
            follow,
        })
    }

    fn update(&mut self, tick: u64) {
        self.time.update(TICK);
        let dt = self.time.dt();

        if let Some(target) = self.target {
            if tick == TARGET_REMOVED_AT {
                info!(tick, "removing follow target");
                self.world.remove_target(target);
                self.target = None;
            } else {
                // Walk the target back and forth in front of the wall
                let t = self.time.total_time as f32;
                let position = Vec3::new(2.5 * (t * 0.8).sin(), 0.5, 1.5 * (t * 0.5).sin());
                self.world.move_target(target, position);
            }
        }
        self.world.step();

        let input = scripted_input(tick);
        self.free_roam.update(&input, dt);

        let mut probe = CameraProbe::new(&self.world);
        if let Some(target) = self.target {
            probe = probe.excluding(target);
        }
        self.follow.update(&input, &self.world, Some(&probe), dt);
    }

    fn log(&self, tick: u64) {
        let pivot = self.free_roam.pivot().position;
        let camera = self.free_roam.camera().position;
        info!(
            tick,
            pivot = %format_vec(pivot),
            camera = %format_vec(camera),
            zoom = self.free_roam.zoom_distance(),
            speed = self.free_roam.velocity().length(),
            "free-roam rig"
        );

        let follow = self.follow.transform().position;
        info!(
            tick,
            camera = %format_vec(follow),
            desired = self.follow.desired_distance(),
            applied = self.follow.applied_distance(),
            has_target = self.follow.has_target(),
            "follow rig"
        );
    }
}

fn format_vec(v: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}

/// Input for one tick of the demo script
fn scripted_input(tick: u64) -> RigInput {
    let mut input = RigInput {
        pointer_position: SCREEN * 0.5,
        screen_size: SCREEN,
        ..Default::default()
    };

    match tick {
        // Pan forward, then let the rig coast to rest
        0..=39 => input.move_axis = Vec2::new(0.0, 1.0),
        40..=59 => {}
        // Drag the ground to the left
        60 => input.right = ButtonState::PRESSED,
        61..=89 => {
            input.right = ButtonState::HELD;
            input.pointer_delta = Vec2::new(-6.0, 1.0);
        }
        // Zoom out a few steps
        90..=99 => {
            if tick % 3 == 0 {
                input.scroll = 1.0;
            }
        }
        // Rest the pointer on the right edge
        100..=139 => input.pointer_position = Vec2::new(SCREEN.x - 2.0, SCREEN.y * 0.5),
        // Turn right with the look axis, orbiting the follow camera
        140..=199 => input.look_axis = Vec2::new(1.0, 0.0),
        // Zoom back in
        _ => {
            if tick % 4 == 0 {
                input.scroll = -1.0;
            }
        }
    }

    input
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting vantage rig demo...");

    let mut demo = Demo::new()?;
    for tick in 0..TICKS {
        demo.update(tick);
        if tick % LOG_INTERVAL == 0 || tick + 1 == TICKS {
            demo.log(tick);
        }
    }

    info!(
        frames = demo.time.frame_count,
        seconds = demo.time.total_time,
        "demo finished"
    );
    Ok(())
}
