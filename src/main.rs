//! Glassdrift - headless driver
//!
//! Loads configuration, composes the standard scene and runs the frame loop
//! with a scripted pointer sweep, logging poses as the shapes drift.

use glassdrift::config::AppConfig;
use glassdrift::scene::SceneBuilder;
use glassdrift::systems::SimulationSystem;
use glassdrift_core::World;

/// Pose error below which the scene counts as back at rest
const SETTLE_TOLERANCE: f32 = 1e-2;

fn main() {
    // Config first so it can pick the log level; report failures once logging is up
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting Glassdrift");

    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    let mut world = match SceneBuilder::standard(&config) {
        Ok(world) => world,
        Err(e) => {
            log::warn!("{}. Falling back to default spring tuning.", e);
            let fallback = AppConfig {
                spring: Default::default(),
                ..config.clone()
            };
            match SceneBuilder::standard(&fallback) {
                Ok(world) => world,
                Err(e) => {
                    log::error!("Could not compose scene: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    log::info!("Render setup: {}", config.rendering);

    for (_key, entity) in world.iter_with_keys() {
        let mesh = entity.geometry().to_mesh();
        log::info!(
            "{} ({}): {} vertices, {} triangles",
            entity.name().unwrap_or("unnamed"),
            entity.geometry().kind(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
    }

    let mut system = SimulationSystem::from_config(&config.simulation);
    let log_every = u64::from(config.debug.log_every);

    for _ in 0..config.simulation.frames {
        let result = system.update(&mut world);
        if log_every > 0 && result.frame % log_every == 0 {
            log_poses(&world, result.frame);
        }
    }

    system.stop_sweep();
    let mut settle_frames = 0;
    while !world.is_settled(SETTLE_TOLERANCE) && settle_frames < 1200 {
        system.update(&mut world);
        settle_frames += 1;
    }
    log::info!(
        "Settled after {} extra frames (settled: {})",
        settle_frames,
        world.is_settled(SETTLE_TOLERANCE)
    );
    log_poses(&world, system.frame());
}

fn log_poses(world: &World, frame: u64) {
    for (key, entity) in world.iter_with_keys() {
        if let Some((position, orientation)) = world.pose(key) {
            log::debug!(
                "frame {} {}: position ({:.3}, {:.3}, {:.3}) orientation ({:.3}, {:.3}, {:.3}, {:.3}) hovered {}",
                frame,
                entity.name().unwrap_or("unnamed"),
                position.x,
                position.y,
                position.z,
                orientation.x,
                orientation.y,
                orientation.z,
                orientation.w,
                entity.hover().is_hovered()
            );
        }
    }
}
