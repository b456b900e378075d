// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fermentation Troubleshooting Game ("The Cellar") - Scenario Transition Engine
//
// The next scenario is derived from cause-set arithmetic instead of a hand
// authored transition table: an action that remediates an active cause moves
// to the scenario with exactly that cause removed, any other action leaves the
// scenario unchanged.

use crate::catalog::{Action, ActionCatalog, ScenarioCatalog};
use crate::types::*;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("scenario {0} is not in the catalog")]
    UnknownScenario(ScenarioId),

    #[error("action {0} is not in the catalog")]
    UnknownAction(ActionId),

    /// The catalog does not cover a cause subset. A defect in the data, never
    /// something the player can fix.
    #[error("catalog integrity violated: no scenario for cause set {remaining} (from scenario {from} via {action})")]
    CatalogIntegrity {
        from: ScenarioId,
        action: ActionId,
        remaining: CauseSet,
    },
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of applying one action to one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The action removed an active cause.
    Remediated { next: ScenarioId, fixed: Cause },
    /// The action targets a cause the scenario does not exhibit.
    NoEffect,
}

impl Transition {
    pub fn next_or(&self, current: ScenarioId) -> ScenarioId {
        match self {
            Self::Remediated { next, .. } => *next,
            Self::NoEffect => current,
        }
    }
}

/// Read-only view over both catalogs.
#[derive(Debug, Clone, Copy)]
pub struct TransitionEngine<'a> {
    scenarios: &'a ScenarioCatalog,
    actions: &'a ActionCatalog,
}

impl<'a> TransitionEngine<'a> {
    pub fn new(scenarios: &'a ScenarioCatalog, actions: &'a ActionCatalog) -> Self {
        Self { scenarios, actions }
    }

    /// Apply `action` to `current` and describe what happened.
    pub fn apply(&self, current: ScenarioId, action: ActionId) -> Result<Transition, TransitionError> {
        let scenario = self
            .scenarios
            .get(current)
            .ok_or(TransitionError::UnknownScenario(current))?;
        let cause = self
            .actions
            .get(action)
            .ok_or(TransitionError::UnknownAction(action))?
            .fixes;

        if !scenario.causes.contains(cause) {
            return Ok(Transition::NoEffect);
        }

        let remaining = scenario.causes.without(cause);
        // by_causes is total for a validated catalog; a mismatch means the
        // index itself is corrupt.
        let next = self.scenarios.by_causes(remaining);
        if next.causes != remaining {
            return Err(TransitionError::CatalogIntegrity {
                from: current,
                action,
                remaining,
            });
        }
        Ok(Transition::Remediated { next: next.id, fixed: cause })
    }

    /// Next scenario id after taking `action` in `current`.
    pub fn next_scenario(&self, current: ScenarioId, action: ActionId) -> Result<ScenarioId, TransitionError> {
        Ok(self.apply(current, action)?.next_or(current))
    }

    /// Actions that remediate one of the scenario's active causes, in catalog
    /// order. Empty for the all-good scenario.
    pub fn recommended_actions(&self, current: ScenarioId) -> Result<Vec<&'a Action>, TransitionError> {
        let scenario = self
            .scenarios
            .get(current)
            .ok_or(TransitionError::UnknownScenario(current))?;
        Ok(self
            .actions
            .iter()
            .filter(|a| scenario.causes.contains(a.fixes))
            .collect())
    }

    /// Fewest rounds needed to reach the all-good scenario: one per active cause.
    pub fn minimum_rounds(&self, current: ScenarioId) -> Result<usize, TransitionError> {
        self.scenarios
            .get(current)
            .map(|s| s.causes.len())
            .ok_or(TransitionError::UnknownScenario(current))
    }
}

/// Free-function form of [`TransitionEngine::next_scenario`].
pub fn next_scenario(
    scenarios: &ScenarioCatalog,
    actions: &ActionCatalog,
    current: ScenarioId,
    action: ActionId,
) -> Result<ScenarioId, TransitionError> {
    TransitionEngine::new(scenarios, actions).next_scenario(current, action)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogs() -> (ScenarioCatalog, ActionCatalog) {
        (
            ScenarioCatalog::standard().expect("test: scenarios"),
            ActionCatalog::standard().expect("test: actions"),
        )
    }

    #[test]
    fn remediating_action_removes_exactly_one_cause() {
        let (scenarios, actions) = catalogs();
        let engine = TransitionEngine::new(&scenarios, &actions);
        for scenario in scenarios.iter() {
            for action in actions.iter() {
                if !scenario.causes.contains(action.fixes) {
                    continue;
                }
                let next = engine.next_scenario(scenario.id, action.id).unwrap();
                let expected = scenario.causes.without(action.fixes);
                assert_eq!(
                    scenarios.get(next).map(|s| s.causes),
                    Some(expected),
                    "{} via {}",
                    scenario.name,
                    action.id
                );
            }
        }
    }

    #[test]
    fn unrelated_action_is_a_no_op() {
        let (scenarios, actions) = catalogs();
        let engine = TransitionEngine::new(&scenarios, &actions);
        for scenario in scenarios.iter() {
            for action in actions.iter().filter(|a| !scenario.causes.contains(a.fixes)) {
                assert_eq!(engine.next_scenario(scenario.id, action.id), Ok(scenario.id));
                assert_eq!(engine.apply(scenario.id, action.id), Ok(Transition::NoEffect));
            }
        }
    }

    #[test]
    fn all_good_is_absorbing() {
        let (scenarios, actions) = catalogs();
        let good = scenarios.all_good().id;
        for action in ActionId::ALL {
            assert_eq!(next_scenario(&scenarios, &actions, good, action), Ok(good));
        }
    }

    #[test]
    fn temp_and_yeast_walkthrough() {
        let (scenarios, actions) = catalogs();
        let engine = TransitionEngine::new(&scenarios, &actions);
        let after_temp = engine.next_scenario(ScenarioId(6), ActionId::FixTemp).unwrap();
        assert_eq!(after_temp, ScenarioId(3));
        assert_eq!(scenarios.get(after_temp).unwrap().name, "3: Yeast Health Issue");
        let after_yeast = engine.next_scenario(after_temp, ActionId::PitchYeast).unwrap();
        assert_eq!(after_yeast, ScenarioId(1));
    }

    #[test]
    fn fixing_temp_from_all_together_reaches_scenario_eleven() {
        let (scenarios, actions) = catalogs();
        let engine = TransitionEngine::new(&scenarios, &actions);
        assert_eq!(
            engine.apply(ScenarioId(16), ActionId::FixTemp),
            Ok(Transition::Remediated { next: ScenarioId(11), fixed: Cause::C1 })
        );
    }

    #[test]
    fn unknown_scenario_is_reported() {
        let (scenarios, actions) = catalogs();
        assert_eq!(
            next_scenario(&scenarios, &actions, ScenarioId(99), ActionId::FixTemp),
            Err(TransitionError::UnknownScenario(ScenarioId(99)))
        );
    }

    #[test]
    fn recommendations_follow_active_causes() {
        let (scenarios, actions) = catalogs();
        let engine = TransitionEngine::new(&scenarios, &actions);
        let recs: Vec<ActionId> = engine
            .recommended_actions(ScenarioId(8))
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(recs, vec![ActionId::FixTemp, ActionId::Sterilize]);
        assert!(engine.recommended_actions(ScenarioId(1)).unwrap().is_empty());
        assert_eq!(engine.minimum_rounds(ScenarioId(16)), Ok(4));
    }
}
