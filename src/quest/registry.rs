//! Quest Registry
//!
//! Owns every known quest, tracks which are active and completed, and runs
//! the accept / complete / fail transitions with their notifications.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::definition::RawQuestFile;
use super::error::{DefinitionError, QuestError};
use super::events::{QuestEvent, QuestNotification, QuestObserver, RewardDistributor};
use super::objective::ObjectiveOutcome;
use super::state::{Quest, QuestStatus};

/// Registry and state manager for all quests in a session
pub struct QuestManager {
    /// Quests in registration order
    quests: Vec<Quest>,
    /// quest_id -> position in `quests`
    index: HashMap<String, usize>,
    /// Active quest IDs, in acceptance order
    active: Vec<String>,
    /// Completed quest IDs, in completion order
    completed: Vec<String>,
    observers: Vec<Box<dyn QuestObserver>>,
    rewards: Option<Box<dyn RewardDistributor>>,
}

impl QuestManager {
    pub fn new() -> Self {
        Self {
            quests: Vec::new(),
            index: HashMap::new(),
            active: Vec::new(),
            completed: Vec::new(),
            observers: Vec::new(),
            rewards: None,
        }
    }

    /// Add an observer; it receives every notification from now on
    pub fn subscribe(&mut self, observer: impl QuestObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Attach the collaborator that hands out rewards on completion
    pub fn set_reward_distributor(&mut self, distributor: impl RewardDistributor + 'static) {
        self.rewards = Some(Box::new(distributor));
    }

    /// Register a quest definition
    pub fn register(&mut self, quest: Quest) -> Result<(), QuestError> {
        if self.index.contains_key(quest.id()) {
            let err = QuestError::DuplicateId(quest.id().to_string());
            warn!("Rejected quest registration: {}", err);
            return Err(err);
        }
        if let Err(err) = quest.validate() {
            warn!("Rejected quest registration: {}", err);
            return Err(err);
        }

        info!("Registered quest: {} ({})", quest.name(), quest.id());
        self.index.insert(quest.id().to_string(), self.quests.len());
        self.quests.push(quest);
        Ok(())
    }

    /// Load every quest TOML file under `dir`, returning how many registered.
    ///
    /// Files are visited in sorted path order. A file that fails to read,
    /// parse, or register is logged and skipped.
    pub fn load_from_directory(&mut self, dir: &Path) -> Result<usize, DefinitionError> {
        info!("Loading quests from {:?}", dir);

        if !dir.exists() {
            warn!("Quest directory does not exist: {:?}", dir);
            return Ok(0);
        }

        let mut paths = Vec::new();
        collect_toml_files(dir, &mut paths)?;
        paths.sort();

        let mut count = 0;
        for path in paths {
            match self.load_file(&path) {
                Ok(()) => count += 1,
                Err(e) => warn!("Failed to load quest {:?}: {}", path, e),
            }
        }

        info!("Loaded {} quest definitions", count);
        Ok(count)
    }

    /// Load and register a single quest file
    pub fn load_file(&mut self, path: &Path) -> Result<(), DefinitionError> {
        let content = std::fs::read_to_string(path).map_err(|source| DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let raw = RawQuestFile::from_toml(&content).map_err(|source| DefinitionError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Bad kinds and structural errors surface as DefinitionError::Invalid
        let quest = Quest::from_raw(&raw.quest)?;
        self.register(quest)?;
        Ok(())
    }

    /// Check that every prerequisite names a registered quest.
    ///
    /// Dangling references are always logged; with `strict` the first one
    /// is returned as an error.
    pub fn validate_prerequisites(&self, strict: bool) -> Result<(), QuestError> {
        let mut first_error = None;

        for quest in &self.quests {
            for prerequisite in quest.prerequisites() {
                if !self.index.contains_key(prerequisite) {
                    warn!(
                        "Quest '{}' references non-existent prerequisite '{}'",
                        quest.id(),
                        prerequisite
                    );
                    first_error.get_or_insert_with(|| QuestError::InvalidDefinition {
                        quest_id: quest.id().to_string(),
                        reason: format!("unknown prerequisite '{}'", prerequisite),
                    });
                }
            }
        }

        match first_error {
            Some(err) if strict => Err(err),
            _ => Ok(()),
        }
    }

    /// Get a quest by ID
    pub fn quest(&self, quest_id: &str) -> Option<&Quest> {
        self.index.get(quest_id).map(|&i| &self.quests[i])
    }

    /// All quests in registration order
    pub fn quests(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter()
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    /// Status of a quest. Unknown IDs report NotStarted.
    pub fn status_of(&self, quest_id: &str) -> QuestStatus {
        self.quest(quest_id)
            .map(Quest::status)
            .unwrap_or(QuestStatus::NotStarted)
    }

    /// Active quests, in acceptance order
    pub fn active(&self) -> Vec<&Quest> {
        self.active.iter().filter_map(|id| self.quest(id)).collect()
    }

    /// Completed quests, in completion order
    pub fn completed(&self) -> Vec<&Quest> {
        self.completed.iter().filter_map(|id| self.quest(id)).collect()
    }

    /// Quests that could be accepted right now
    pub fn available(&self) -> Vec<&Quest> {
        self.quests
            .iter()
            .filter(|q| q.status() == QuestStatus::NotStarted)
            .filter(|q| q.can_start(|id| self.status_of(id)))
            .collect()
    }

    /// NotStarted -> Active. Emits Accepted then Updated.
    pub fn accept(&mut self, quest_id: &str) -> Result<(), QuestError> {
        self.try_accept(quest_id).inspect_err(|e| {
            warn!("Rejected accept of quest '{}': {}", quest_id, e);
        })
    }

    /// Active -> Completed. Emits Completed then Updated, then distributes
    /// rewards.
    pub fn complete(&mut self, quest_id: &str) -> Result<(), QuestError> {
        self.try_complete(quest_id).inspect_err(|e| {
            warn!("Rejected completion of quest '{}': {}", quest_id, e);
        })
    }

    /// Active -> Failed. Emits Failed then Updated.
    pub fn fail(&mut self, quest_id: &str) -> Result<(), QuestError> {
        self.try_fail(quest_id).inspect_err(|e| {
            warn!("Rejected failure of quest '{}': {}", quest_id, e);
        })
    }

    /// Add progress to one objective of an active quest, completing the
    /// quest if that satisfies its policy.
    pub fn progress_objective(
        &mut self,
        quest_id: &str,
        objective_id: &str,
        amount: u32,
    ) -> Result<ObjectiveOutcome, QuestError> {
        let result = self.index_of(quest_id).and_then(|idx| {
            let outcome = self.quests[idx].progress_objective(objective_id, amount)?;
            self.record_objective_change(idx, objective_id, outcome);
            self.complete_if_satisfied(idx);
            Ok(outcome)
        });
        result.inspect_err(|e| warn!("Rejected objective progress: {}", e))
    }

    /// Complete one objective of an active quest, completing the quest if
    /// that satisfies its policy.
    pub fn complete_objective(
        &mut self,
        quest_id: &str,
        objective_id: &str,
    ) -> Result<ObjectiveOutcome, QuestError> {
        let result = self.index_of(quest_id).and_then(|idx| {
            let outcome = self.quests[idx].complete_objective(objective_id)?;
            self.record_objective_change(idx, objective_id, outcome);
            self.complete_if_satisfied(idx);
            Ok(outcome)
        });
        result.inspect_err(|e| warn!("Rejected objective completion: {}", e))
    }

    /// Detach observers and the reward distributor at the end of a session
    pub fn shutdown(&mut self) {
        info!(
            "Quest manager shutting down: {} quests, {} active, {} completed",
            self.quests.len(),
            self.active.len(),
            self.completed.len()
        );
        self.observers.clear();
        self.rewards = None;
    }

    /// Positions of active quests, in registration order
    pub(crate) fn active_indices(&self) -> Vec<usize> {
        self.quests
            .iter()
            .enumerate()
            .filter(|(_, q)| q.status() == QuestStatus::Active)
            .map(|(i, _)| i)
            .collect()
    }

    /// Apply an event to one quest and auto-complete it if satisfied.
    /// Returns how many objectives changed.
    pub(crate) fn apply_event_to(
        &mut self,
        idx: usize,
        event: &QuestEvent,
    ) -> Result<usize, QuestError> {
        let changes = self.quests[idx].apply_event(event)?;
        for change in &changes {
            self.record_objective_change(idx, &change.objective_id, change.outcome);
        }
        if !changes.is_empty() {
            self.complete_if_satisfied(idx);
        }
        Ok(changes.len())
    }

    fn try_accept(&mut self, quest_id: &str) -> Result<(), QuestError> {
        let idx = self.index_of(quest_id)?;

        let prerequisites: HashMap<String, QuestStatus> = self.quests[idx]
            .prerequisites()
            .iter()
            .map(|p| (p.clone(), self.status_of(p)))
            .collect();
        self.quests[idx].start(|id| prerequisites.get(id).copied().unwrap_or_default())?;

        self.active.push(quest_id.to_string());
        info!("Quest accepted: {} ({})", self.quests[idx].name(), quest_id);

        self.emit(idx, QuestNotification::Accepted { quest_id: quest_id.to_string() });
        self.emit(idx, QuestNotification::Updated { quest_id: quest_id.to_string() });
        Ok(())
    }

    fn try_complete(&mut self, quest_id: &str) -> Result<(), QuestError> {
        let idx = self.index_of(quest_id)?;

        let status = self.quests[idx].status();
        if status != QuestStatus::Active {
            return Err(QuestError::InvalidTransition {
                quest_id: quest_id.to_string(),
                from: status,
                action: "complete",
            });
        }

        if self.quests[idx].complete()? {
            self.finish_completion(idx);
        }
        Ok(())
    }

    fn try_fail(&mut self, quest_id: &str) -> Result<(), QuestError> {
        let idx = self.index_of(quest_id)?;
        self.quests[idx].fail()?;

        self.active.retain(|id| id != quest_id);
        info!("Quest failed: {} ({})", self.quests[idx].name(), quest_id);

        self.emit(idx, QuestNotification::Failed { quest_id: quest_id.to_string() });
        self.emit(idx, QuestNotification::Updated { quest_id: quest_id.to_string() });
        Ok(())
    }

    fn complete_if_satisfied(&mut self, idx: usize) {
        if !self.quests[idx].check_completion() {
            return;
        }
        if let Ok(true) = self.quests[idx].complete() {
            self.finish_completion(idx);
        }
    }

    /// Bookkeeping after a quest entered Completed
    fn finish_completion(&mut self, idx: usize) {
        let quest_id = self.quests[idx].id().to_string();
        self.active.retain(|id| id != &quest_id);
        self.completed.push(quest_id.clone());
        info!("Quest completed: {} ({})", self.quests[idx].name(), quest_id);

        self.emit(idx, QuestNotification::Completed { quest_id: quest_id.clone() });
        self.emit(idx, QuestNotification::Updated { quest_id: quest_id.clone() });

        if !self.quests[idx].mark_rewards_granted() {
            return;
        }
        let quest = &self.quests[idx];
        match self.rewards.as_mut() {
            Some(distributor) => distributor.distribute(quest, quest.rewards()),
            None => debug!("No reward distributor attached, skipping rewards for '{}'", quest_id),
        }
    }

    fn record_objective_change(&mut self, idx: usize, objective_id: &str, outcome: ObjectiveOutcome) {
        let quest_id = self.quests[idx].id().to_string();
        let target = self.quests[idx]
            .objective(objective_id)
            .map(|o| format!("{} '{}'", o.kind().as_str(), o.kind().target()))
            .unwrap_or_default();
        match outcome {
            ObjectiveOutcome::Unchanged => {}
            ObjectiveOutcome::Progressed { current, required, completed } => {
                debug!(
                    "Objective {}/{} ({}) progressed to {}/{}",
                    quest_id, objective_id, target, current, required
                );
                self.emit(
                    idx,
                    QuestNotification::ObjectiveUpdated {
                        quest_id: quest_id.clone(),
                        objective_id: objective_id.to_string(),
                        current,
                        required,
                    },
                );
                if completed {
                    self.emit(
                        idx,
                        QuestNotification::ObjectiveCompleted {
                            quest_id,
                            objective_id: objective_id.to_string(),
                        },
                    );
                }
            }
            ObjectiveOutcome::Completed => {
                debug!("Objective {}/{} ({}) completed", quest_id, objective_id, target);
                self.emit(
                    idx,
                    QuestNotification::ObjectiveCompleted {
                        quest_id,
                        objective_id: objective_id.to_string(),
                    },
                );
            }
        }
    }

    fn emit(&mut self, idx: usize, notification: QuestNotification) {
        let quest = &self.quests[idx];
        for observer in &mut self.observers {
            observer.on_notification(&notification, quest);
        }
    }

    fn index_of(&self, quest_id: &str) -> Result<usize, QuestError> {
        self.index
            .get(quest_id)
            .copied()
            .ok_or_else(|| QuestError::NotFound(quest_id.to_string()))
    }
}

impl Default for QuestManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursively collect quest files (non-async, teacher-style directory walk)
fn collect_toml_files(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<(), DefinitionError> {
    let io_err = |source| DefinitionError::Io {
        path: dir.to_path_buf(),
        source,
    };

    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();

        if path.is_dir() {
            collect_toml_files(&path, paths)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::definition::{ObjectiveKind, Reward};
    use crate::quest::events::ChannelObserver;
    use crate::quest::objective::Objective;
    use std::cell::Cell;
    use std::rc::Rc;
    use tempfile::TempDir;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn dialogue_quest(id: &str, dialogue_id: &str) -> Quest {
        Quest::new(id, id.to_uppercase(), "").with_objective(Objective::new(
            "talk",
            ObjectiveKind::Dialogue { dialogue_id: dialogue_id.into() },
            1,
            "Talk",
        ))
    }

    fn observed() -> (QuestManager, UnboundedReceiver<QuestNotification>) {
        let mut manager = QuestManager::new();
        let (observer, rx) = ChannelObserver::new();
        manager.subscribe(observer);
        (manager, rx)
    }

    fn drain(rx: &mut UnboundedReceiver<QuestNotification>) -> Vec<QuestNotification> {
        let mut out = Vec::new();
        while let Ok(n) = rx.try_recv() {
            out.push(n);
        }
        out
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut manager = QuestManager::new();
        manager.register(dialogue_quest("a", "intro")).unwrap();

        let err = manager.register(dialogue_quest("a", "other")).unwrap_err();
        assert_eq!(err, QuestError::DuplicateId("a".into()));
        assert_eq!(manager.len(), 1);
        assert!(matches!(
            manager.quest("a").unwrap().objectives()[0].kind(),
            ObjectiveKind::Dialogue { dialogue_id } if dialogue_id == "intro"
        ));
    }

    #[test]
    fn test_accept_emits_accepted_then_updated() {
        let (mut manager, mut rx) = observed();
        manager.register(dialogue_quest("a", "intro")).unwrap();

        manager.accept("a").unwrap();
        assert_eq!(manager.status_of("a"), QuestStatus::Active);
        assert_eq!(manager.active().len(), 1);
        assert_eq!(
            drain(&mut rx),
            vec![
                QuestNotification::Accepted { quest_id: "a".into() },
                QuestNotification::Updated { quest_id: "a".into() },
            ]
        );

        // Accepting again is reported and changes nothing
        assert!(manager.accept("a").unwrap_err().is_invalid_transition());
        assert!(drain(&mut rx).is_empty());
        assert_eq!(manager.active().len(), 1);
    }

    #[test]
    fn test_unknown_quest() {
        let mut manager = QuestManager::new();
        assert_eq!(manager.status_of("nonexistent"), QuestStatus::NotStarted);
        assert_eq!(manager.accept("nonexistent"), Err(QuestError::NotFound("nonexistent".into())));
        assert_eq!(manager.complete("nonexistent"), Err(QuestError::NotFound("nonexistent".into())));
        assert_eq!(manager.fail("nonexistent"), Err(QuestError::NotFound("nonexistent".into())));
    }

    #[test]
    fn test_prerequisite_chain() {
        let mut manager = QuestManager::new();
        manager.register(dialogue_quest("a", "intro")).unwrap();
        manager
            .register(dialogue_quest("b", "follow_up").with_prerequisite("a"))
            .unwrap();

        assert_eq!(
            manager.available().iter().map(|q| q.id()).collect::<Vec<_>>(),
            vec!["a"]
        );

        let err = manager.accept("b").unwrap_err();
        assert!(err.is_invalid_transition());
        assert_eq!(manager.status_of("b"), QuestStatus::NotStarted);

        manager.accept("a").unwrap();
        assert!(manager.accept("b").unwrap_err().is_invalid_transition());

        manager.complete_objective("a", "talk").unwrap();
        assert_eq!(manager.status_of("a"), QuestStatus::Completed);

        manager.accept("b").unwrap();
        assert_eq!(manager.status_of("b"), QuestStatus::Active);
    }

    #[test]
    fn test_complete_requires_policy() {
        let (mut manager, mut rx) = observed();
        let quest = Quest::new("q", "Q", "")
            .with_objective(Objective::new(
                "coins",
                ObjectiveKind::CollectItem { item_id: "coin".into() },
                3,
                "Coins",
            ));
        manager.register(quest).unwrap();
        manager.accept("q").unwrap();
        drain(&mut rx);

        assert_eq!(manager.complete("q"), Err(QuestError::PolicyNotSatisfied("q".into())));
        assert_eq!(manager.status_of("q"), QuestStatus::Active);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_auto_completion_and_single_reward() {
        let (mut manager, mut rx) = observed();
        let payouts = Rc::new(Cell::new(0));
        let counter = Rc::clone(&payouts);
        manager.set_reward_distributor(move |quest: &Quest, rewards: &[Reward]| {
            assert_eq!(quest.id(), "q");
            assert_eq!(rewards, [Reward::new("gold", 10)]);
            counter.set(counter.get() + 1);
        });

        let quest = Quest::new("q", "Q", "")
            .with_objective(Objective::new(
                "coins",
                ObjectiveKind::CollectItem { item_id: "coin".into() },
                2,
                "Coins",
            ))
            .with_reward(Reward::new("gold", 10));
        manager.register(quest).unwrap();
        manager.accept("q").unwrap();
        drain(&mut rx);
        assert!(!manager.quest("q").unwrap().rewards_granted());

        manager.progress_objective("q", "coins", 1).unwrap();
        manager.progress_objective("q", "coins", 5).unwrap();

        assert_eq!(manager.status_of("q"), QuestStatus::Completed);
        assert_eq!(payouts.get(), 1);
        assert!(manager.quest("q").unwrap().rewards_granted());
        assert_eq!(
            drain(&mut rx),
            vec![
                QuestNotification::ObjectiveUpdated {
                    quest_id: "q".into(),
                    objective_id: "coins".into(),
                    current: 1,
                    required: 2,
                },
                QuestNotification::ObjectiveUpdated {
                    quest_id: "q".into(),
                    objective_id: "coins".into(),
                    current: 2,
                    required: 2,
                },
                QuestNotification::ObjectiveCompleted {
                    quest_id: "q".into(),
                    objective_id: "coins".into(),
                },
                QuestNotification::Completed { quest_id: "q".into() },
                QuestNotification::Updated { quest_id: "q".into() },
            ]
        );

        // Explicit completion afterwards is a reported no-op
        assert!(manager.complete("q").unwrap_err().is_invalid_transition());
        assert!(manager.complete("q").is_err());
        assert_eq!(payouts.get(), 1);
        assert!(drain(&mut rx).is_empty());
        assert_eq!(manager.completed().len(), 1);
        assert!(manager.active().is_empty());
    }

    #[test]
    fn test_fail_moves_out_of_active() {
        let (mut manager, mut rx) = observed();
        manager.register(dialogue_quest("a", "intro")).unwrap();

        assert!(manager.fail("a").unwrap_err().is_invalid_transition());

        manager.accept("a").unwrap();
        drain(&mut rx);
        manager.fail("a").unwrap();

        assert_eq!(manager.status_of("a"), QuestStatus::Failed);
        assert!(manager.active().is_empty());
        assert!(manager.completed().is_empty());
        assert_eq!(
            drain(&mut rx),
            vec![
                QuestNotification::Failed { quest_id: "a".into() },
                QuestNotification::Updated { quest_id: "a".into() },
            ]
        );

        // Terminal
        assert!(manager.accept("a").is_err());
        assert!(manager.complete_objective("a", "talk").is_err());
    }

    #[test]
    fn test_rejected_progress_leaves_state_unchanged() {
        let mut manager = QuestManager::new();
        manager.register(dialogue_quest("a", "intro")).unwrap();

        // Not active yet
        assert!(manager.complete_objective("a", "talk").is_err());
        assert!(!manager.quest("a").unwrap().objectives()[0].is_completed());

        manager.accept("a").unwrap();
        assert_eq!(
            manager.complete_objective("a", "missing"),
            Err(QuestError::ObjectiveNotFound { quest_id: "a".into(), objective_id: "missing".into() })
        );
        assert_eq!(manager.status_of("a"), QuestStatus::Active);
    }

    #[test]
    fn test_validate_prerequisites() {
        let mut manager = QuestManager::new();
        manager
            .register(dialogue_quest("b", "x").with_prerequisite("ghost"))
            .unwrap();

        assert!(manager.validate_prerequisites(false).is_ok());
        assert!(manager.validate_prerequisites(true).is_err());
    }

    #[test]
    fn test_shutdown_detaches_observers() {
        let (mut manager, mut rx) = observed();
        manager.register(dialogue_quest("a", "intro")).unwrap();
        manager.shutdown();

        manager.accept("a").unwrap();
        assert!(drain(&mut rx).is_empty());
    }

    fn quest_toml(id: &str, prerequisites: &str) -> String {
        format!(
            r#"
[quest]
id = "{id}"
name = "Quest {id}"
description = "A test quest"
prerequisites = [{prerequisites}]

[[quest.objectives]]
id = "kill_slimes"
type = "defeat_enemy"
target = "slime"
count = 3
description = "Defeat 3 slimes"

[[quest.rewards]]
id = "exp"
amount = 50
"#
        )
    }

    #[test]
    fn test_load_from_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("chapter_one");
        std::fs::create_dir_all(&nested).unwrap();

        std::fs::write(temp_dir.path().join("a.toml"), quest_toml("first", "")).unwrap();
        std::fs::write(nested.join("b.toml"), quest_toml("second", r#""first""#)).unwrap();
        // Duplicate id, skipped
        std::fs::write(nested.join("c.toml"), quest_toml("first", "")).unwrap();
        // Broken file, skipped
        std::fs::write(temp_dir.path().join("broken.toml"), "[quest\nid=").unwrap();
        // Not a quest file
        std::fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let mut manager = QuestManager::new();
        let count = manager.load_from_directory(temp_dir.path()).unwrap();

        assert_eq!(count, 2);
        let second = manager.quest("second").unwrap();
        assert_eq!(second.prerequisites(), ["first".to_string()]);
        assert_eq!(second.rewards(), [Reward::new("exp", 50)]);
        assert_eq!(second.objectives()[0].required_amount(), 3);
        assert!(manager.validate_prerequisites(true).is_ok());
    }

    #[test]
    fn test_load_file_separates_parse_and_definition_errors() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = QuestManager::new();

        let malformed = temp_dir.path().join("malformed.toml");
        std::fs::write(&malformed, "[quest\nid=").unwrap();
        let err = manager.load_file(&malformed).unwrap_err();
        assert!(matches!(err, DefinitionError::Parse { .. }));

        let unknown_kind = temp_dir.path().join("unknown_kind.toml");
        std::fs::write(
            &unknown_kind,
            "[quest]\nid = \"dance\"\nname = \"Dance\"\n\n[[quest.objectives]]\nid = \"o\"\ntype = \"dance\"\ntarget = \"floor\"\n",
        )
        .unwrap();
        let err = manager.load_file(&unknown_kind).unwrap_err();
        assert!(matches!(
            err,
            DefinitionError::Invalid(QuestError::InvalidDefinition { ref quest_id, .. }) if quest_id == "dance"
        ));

        let counted_dialogue = temp_dir.path().join("counted_dialogue.toml");
        std::fs::write(
            &counted_dialogue,
            "[quest]\nid = \"chat\"\nname = \"Chat\"\n\n[[quest.objectives]]\nid = \"o\"\ntype = \"dialogue\"\ntarget = \"hello\"\ncount = 2\n",
        )
        .unwrap();
        let err = manager.load_file(&counted_dialogue).unwrap_err();
        assert!(matches!(err, DefinitionError::Invalid(QuestError::InvalidDefinition { .. })));

        assert!(manager.is_empty());
    }

    #[test]
    fn test_load_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = QuestManager::new();
        let count = manager
            .load_from_directory(&temp_dir.path().join("missing"))
            .unwrap();
        assert_eq!(count, 0);
    }
}
