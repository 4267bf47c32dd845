//! Quest and objective tracking.
//!
//! Quests are defined in TOML, registered with a [`QuestManager`], and
//! progressed by gameplay events routed through an [`ObjectiveRouter`].

pub mod config;
pub mod quest;

pub use config::QuestConfig;
pub use quest::{
    ObjectiveRouter, Quest, QuestError, QuestEvent, QuestManager, QuestNotification,
    QuestStatus,
};
