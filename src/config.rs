// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fermentation Troubleshooting Game ("The Cellar") - Game Configuration

use serde::{Deserialize, Serialize};

use crate::catalog::{ActionCatalog, ScenarioCatalog};
use crate::event_log::FieldSanitizer;
use crate::history::{BASELINE_BATCHES, BATCH_LIMIT, MAX_BATCHES};
use crate::types::{ActionId, ScenarioId};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field}: scenario {id} is not in the catalog")]
    UnknownScenario { field: &'static str, id: ScenarioId },

    #[error("{field}: scenario {id} has no active causes")]
    NothingToFix { field: &'static str, id: ScenarioId },

    #[error("tutorial_action {action} does not remediate a cause of scenario {scenario}")]
    TutorialActionIneffective { action: ActionId, scenario: ScenarioId },

    #[error("affirmative_keyword must not be empty")]
    EmptyKeyword,

    #[error("baseline_batches ({baseline}) leaves no room for the start batch within max_batches ({max})")]
    HistoryTooShort { baseline: usize, max: usize },

    #[error("max_batches ({max}) exceeds the limit of {limit}")]
    HistoryTooLong { max: usize, limit: usize },

    #[error("separator and replacement must differ (both {0:?})")]
    SeparatorReplacementEqual(char),
}

/// Tunables of a session. Every field has a default, so a partial JSON
/// document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Scenario the real game starts in once the tutorial is done.
    pub starting_scenario: ScenarioId,
    /// Problem scenario shown in tutorial step 3.
    pub tutorial_scenario: ScenarioId,
    /// The only action that finishes tutorial step 3.
    pub tutorial_action: ActionId,
    /// Substring (case-insensitive) required in the step 2 assessment.
    pub affirmative_keyword: String,
    pub max_batches: usize,
    pub baseline_batches: usize,
    pub field_separator: char,
    pub separator_replacement: char,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_scenario: ScenarioId(6),
            tutorial_scenario: ScenarioId(5),
            tutorial_action: ActionId::Sterilize,
            affirmative_keyword: "good".to_string(),
            max_batches: MAX_BATCHES,
            baseline_batches: BASELINE_BATCHES,
            field_separator: ',',
            separator_replacement: ';',
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn sanitizer(&self) -> FieldSanitizer {
        FieldSanitizer {
            separator: self.field_separator,
            replacement: self.separator_replacement,
        }
    }

    /// Check the config against the catalogs it will be used with.
    pub fn validate(&self, scenarios: &ScenarioCatalog, actions: &ActionCatalog) -> Result<(), ConfigError> {
        for (field, id) in [
            ("starting_scenario", self.starting_scenario),
            ("tutorial_scenario", self.tutorial_scenario),
        ] {
            let scenario = scenarios
                .get(id)
                .ok_or(ConfigError::UnknownScenario { field, id })?;
            if scenario.is_all_good() {
                return Err(ConfigError::NothingToFix { field, id });
            }
        }

        let tutorial = scenarios
            .get(self.tutorial_scenario)
            .ok_or(ConfigError::UnknownScenario {
                field: "tutorial_scenario",
                id: self.tutorial_scenario,
            })?;
        let effective = actions
            .get(self.tutorial_action)
            .is_some_and(|a| tutorial.causes.contains(a.fixes));
        if !effective {
            return Err(ConfigError::TutorialActionIneffective {
                action: self.tutorial_action,
                scenario: self.tutorial_scenario,
            });
        }

        if self.affirmative_keyword.trim().is_empty() {
            return Err(ConfigError::EmptyKeyword);
        }
        if self.max_batches > BATCH_LIMIT {
            return Err(ConfigError::HistoryTooLong {
                max: self.max_batches,
                limit: BATCH_LIMIT,
            });
        }
        if self.baseline_batches >= self.max_batches {
            return Err(ConfigError::HistoryTooShort {
                baseline: self.baseline_batches,
                max: self.max_batches,
            });
        }
        if self.field_separator == self.separator_replacement {
            return Err(ConfigError::SeparatorReplacementEqual(self.field_separator));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogs() -> (ScenarioCatalog, ActionCatalog) {
        (ScenarioCatalog::standard().unwrap(), ActionCatalog::standard().unwrap())
    }

    #[test]
    fn default_config_is_valid() {
        let (scenarios, actions) = catalogs();
        assert!(GameConfig::default().validate(&scenarios, &actions).is_ok());
    }

    #[test]
    fn partial_json_overrides_named_fields() {
        let config = GameConfig::from_json(r#"{"starting_scenario": 16, "max_batches": 10}"#).unwrap();
        assert_eq!(config.starting_scenario, ScenarioId(16));
        assert_eq!(config.max_batches, 10);
        assert_eq!(config.tutorial_action, ActionId::Sterilize);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(GameConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn starting_in_all_good_is_rejected() {
        let (scenarios, actions) = catalogs();
        let config = GameConfig { starting_scenario: ScenarioId(1), ..GameConfig::default() };
        assert!(matches!(
            config.validate(&scenarios, &actions),
            Err(ConfigError::NothingToFix { field: "starting_scenario", .. })
        ));
    }

    #[test]
    fn unknown_scenario_is_rejected() {
        let (scenarios, actions) = catalogs();
        let config = GameConfig { tutorial_scenario: ScenarioId(99), ..GameConfig::default() };
        assert!(matches!(
            config.validate(&scenarios, &actions),
            Err(ConfigError::UnknownScenario { id: ScenarioId(99), .. })
        ));
    }

    #[test]
    fn tutorial_action_must_fix_tutorial_scenario() {
        let (scenarios, actions) = catalogs();
        let config = GameConfig { tutorial_action: ActionId::FixTemp, ..GameConfig::default() };
        assert!(matches!(
            config.validate(&scenarios, &actions),
            Err(ConfigError::TutorialActionIneffective { .. })
        ));
    }

    #[test]
    fn history_must_fit_seed() {
        let (scenarios, actions) = catalogs();
        let config = GameConfig { max_batches: 2, ..GameConfig::default() };
        assert!(matches!(
            config.validate(&scenarios, &actions),
            Err(ConfigError::HistoryTooShort { baseline: 2, max: 2 })
        ));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn huge_baseline_is_rejected_not_overflowed() {
        let (scenarios, actions) = catalogs();
        let config = GameConfig::from_json(r#"{"baseline_batches": 18446744073709551615}"#).unwrap();
        assert!(matches!(
            config.validate(&scenarios, &actions),
            Err(ConfigError::HistoryTooShort { baseline: usize::MAX, max: MAX_BATCHES })
        ));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn huge_history_is_rejected() {
        let (scenarios, actions) = catalogs();
        let config = GameConfig::from_json(r#"{"max_batches": 18446744073709551615}"#).unwrap();
        assert!(matches!(
            config.validate(&scenarios, &actions),
            Err(ConfigError::HistoryTooLong { max: usize::MAX, limit: BATCH_LIMIT })
        ));

        let at_limit = GameConfig { max_batches: BATCH_LIMIT, ..GameConfig::default() };
        assert!(at_limit.validate(&scenarios, &actions).is_ok());
    }
}
