//! quest-sim: load quest definitions and replay a scripted session.
//!
//! Usage: quest-sim <script.json> [config.toml]
//!
//! The script is a JSON array of steps, e.g.
//! `[{"action":"accept","quest_id":"intro"},
//!   {"action":"event","event":{"type":"dialogue_seen","dialogue_id":"hello"}}]`.
//! Every notification is printed to stdout as one JSON line.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use quest_tracker::quest::{ChannelObserver, Reward};
use quest_tracker::{ObjectiveRouter, Quest, QuestConfig, QuestEvent, QuestManager};

/// One step of a simulated session
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ScriptStep {
    Accept { quest_id: String },
    Complete { quest_id: String },
    Fail { quest_id: String },
    Event { event: QuestEvent },
}

fn main() {
    if let Err(e) = run() {
        // Tracing may not be initialized yet
        eprintln!("quest-sim: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = std::env::args().skip(1);
    let script_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| "usage: quest-sim <script.json> [config.toml]".to_string())?;
    let config_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("quests.toml"));

    let loaded = QuestConfig::read(&config_path)?;
    let config_missing = loaded.is_none();
    let config = loaded.unwrap_or_default();

    // Initialize logging before anything else reports
    let directive = config
        .log_filter
        .parse::<tracing_subscriber::filter::Directive>()
        .map_err(|e| format!("Invalid log_filter '{}': {}", config.log_filter, e))?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();

    if config_missing {
        warn!("Config file {:?} not found, using defaults", config_path);
    }

    let mut manager = QuestManager::new();
    manager
        .load_from_directory(&config.definitions_dir)
        .map_err(|e| e.to_string())?;
    manager
        .validate_prerequisites(config.strict_prerequisites)
        .map_err(|e| e.to_string())?;

    let (observer, mut notifications) = ChannelObserver::new();
    manager.subscribe(observer);
    manager.set_reward_distributor(|quest: &Quest, rewards: &[Reward]| {
        for reward in rewards {
            info!("Granting {} x{} for '{}'", reward.reward_id, reward.amount, quest.id());
        }
    });

    let steps = load_script(&script_path)?;
    info!("Replaying {} step(s) from {:?}", steps.len(), script_path);

    for step in &steps {
        // Rejections are already logged by the manager; keep replaying
        let _ = match step {
            ScriptStep::Accept { quest_id } => manager.accept(quest_id),
            ScriptStep::Complete { quest_id } => manager.complete(quest_id),
            ScriptStep::Fail { quest_id } => manager.fail(quest_id),
            ScriptStep::Event { event } => ObjectiveRouter::new(&mut manager).dispatch(event).map(|_| ()),
        };

        while let Ok(notification) = notifications.try_recv() {
            let line = serde_json::to_string(&notification).map_err(|e| e.to_string())?;
            println!("{}", line);
        }
    }

    let summary: BTreeMap<&str, String> = manager
        .quests()
        .map(|q| {
            let pct = (q.completion_percentage() * 100.0).round();
            (q.id(), format!("{} ({}%)", q.status(), pct))
        })
        .collect();
    info!("Final quest states: {:?}", summary);

    manager.shutdown();
    Ok(())
}

fn load_script(path: &Path) -> Result<Vec<ScriptStep>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
    serde_json::from_str(&content).map_err(|e| format!("Failed to parse {:?}: {}", path, e))
}
