//! Scene bridge demo
//!
//! Replays a script of simulator events (entity creation, sensor
//! attachment, removal) against an in-memory scene and prints the resulting
//! node tree.
//!
//! ```text
//! bridge_demo [script.toml|script.ron] [config.toml|config.ron]
//! ```
//!
//! Without arguments the bundled garage script runs with meshes resolved
//! from this crate's `assets/` directory.

use scene_bridge::core::{BridgeConfig, Config, ConfigError};
use scene_bridge::description::{Light, Link, Model, Visual};
use scene_bridge::foundation::logging;
use scene_bridge::render::MemoryScene;
use scene_bridge::scene::{EntityId, SceneManager};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const GARAGE_SCRIPT: &str = include_str!("../scripts/garage.toml");
const ASSET_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");

/// One simulator event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Command {
    Model { id: EntityId, parent: EntityId, model: Model },
    Link { id: EntityId, parent: EntityId, link: Link },
    Visual { id: EntityId, parent: EntityId, visual: Visual },
    Light { id: EntityId, parent: EntityId, light: Light },
    /// Registers a renderer sensor, then attaches it as entity `id`
    Sensor {
        id: EntityId,
        sensor_id: u64,
        name: String,
        parent: EntityId,
    },
    Remove { id: EntityId },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Script {
    commands: Vec<Command>,
}

impl Config for Script {}

#[derive(Error, Debug)]
enum DemoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid bundled script: {0}")]
    BundledScript(#[from] toml::de::Error),
}

/// Outcome counts of a replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ReplaySummary {
    applied: usize,
    rejected: usize,
}

fn replay(bridge: &mut SceneManager<MemoryScene>, commands: &[Command]) -> ReplaySummary {
    let mut summary = ReplaySummary::default();

    for command in commands {
        // The bridge logs its own failures
        let applied = match command {
            Command::Model { id, parent, model } => bridge.create_model(*id, model, *parent).is_ok(),
            Command::Link { id, parent, link } => bridge.create_link(*id, link, *parent).is_ok(),
            Command::Visual { id, parent, visual } => bridge.create_visual(*id, visual, *parent).is_ok(),
            Command::Light { id, parent, light } => bridge.create_light(*id, light, *parent).is_ok(),
            Command::Sensor {
                id,
                sensor_id,
                name,
                parent,
            } => {
                bridge.scene_mut().register_sensor(*sensor_id, name);
                bridge.attach_sensor(*id, *sensor_id, *parent).is_ok()
            }
            Command::Remove { id } => match bridge.remove_entity(*id) {
                Some(kind) => {
                    log::info!("Removed {kind} [{id}]");
                    true
                }
                None => {
                    log::warn!("Nothing registered under [{id}]");
                    false
                }
            },
        };

        if applied {
            summary.applied += 1;
        } else {
            summary.rejected += 1;
        }
    }

    summary
}

fn default_config() -> BridgeConfig {
    BridgeConfig::new()
        .with_resource_path(ASSET_DIR)
        .with_log_filter("info")
}

fn main() -> Result<(), DemoError> {
    let mut args = std::env::args().skip(1);
    let script_path = args.next();
    let config = match args.next() {
        Some(path) => BridgeConfig::load_from_file(path)?,
        None => default_config(),
    };

    logging::init_with_filter(config.log_filter.as_deref());

    let script = match &script_path {
        Some(path) => Script::load_from_file(path)?,
        None => toml::from_str(GARAGE_SCRIPT)?,
    };
    log::info!(
        "Replaying {} commands from {}",
        script.commands.len(),
        script_path.as_deref().unwrap_or("bundled garage script")
    );

    let mut bridge = SceneManager::with_config(MemoryScene::new(), &config);
    let summary = replay(&mut bridge, &script.commands);

    print!("{}", bridge.scene().describe_tree());
    println!(
        "{} applied, {} rejected, {} registered entities",
        summary.applied,
        summary.rejected,
        bridge.entities().total_len()
    );

    Ok(())
}
