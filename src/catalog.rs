// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fermentation Troubleshooting Game ("The Cellar") - Scenario & Action Catalogs
//
// Both catalogs are fixed at startup and never mutated. The scenario catalog is
// indexed by cause-set mask so every lookup the transition engine performs is
// a direct array access, and construction refuses any table that does not map
// each of the 16 cause subsets to exactly one scenario.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::*;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Raised when a catalog table violates its structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("scenario id {0} appears more than once")]
    DuplicateScenarioId(ScenarioId),

    #[error("cause set {causes} is claimed by scenarios {first} and {second}")]
    DuplicateCauseSet {
        causes: CauseSet,
        first: ScenarioId,
        second: ScenarioId,
    },

    #[error("no scenario has cause set {0}")]
    MissingCauseSet(CauseSet),

    #[error("cause {0} has no remediating action")]
    MissingAction(Cause),

    #[error("cause {cause} is remediated by both {first} and {second}")]
    DuplicateAction {
        cause: Cause,
        first: ActionId,
        second: ActionId,
    },

    #[error("action {0} appears more than once")]
    DuplicateActionId(ActionId),
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub name: String,
    pub causes: CauseSet,
    pub readings: SensorReadings,
}

impl Scenario {
    pub fn new(id: u32, name: &str, causes: &[Cause], readings: [Decimal; 4]) -> Self {
        let [sg, wort_temp, co2_activity, ph] = readings;
        Self {
            id: ScenarioId(id),
            name: name.to_string(),
            causes: CauseSet::from_causes(causes),
            readings: SensorReadings { sg, wort_temp, co2_activity, ph },
        }
    }

    pub fn is_all_good(&self) -> bool {
        self.causes.is_empty()
    }
}

/// Immutable scenario table, keyed by id and by cause set.
#[derive(Debug, Clone)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
    by_id: HashMap<ScenarioId, usize>,
    by_causes: [usize; CauseSet::SUBSET_COUNT],
}

impl ScenarioCatalog {
    /// Build a catalog, checking id uniqueness and that the table is a
    /// bijection between the 16 cause subsets and the scenarios.
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(scenarios.len());
        let mut slots: [Option<usize>; CauseSet::SUBSET_COUNT] = [None; CauseSet::SUBSET_COUNT];

        for (idx, scenario) in scenarios.iter().enumerate() {
            if by_id.insert(scenario.id, idx).is_some() {
                return Err(CatalogError::DuplicateScenarioId(scenario.id));
            }
            let slot = &mut slots[scenario.causes.mask() as usize];
            if let Some(prev) = *slot {
                return Err(CatalogError::DuplicateCauseSet {
                    causes: scenario.causes,
                    first: scenarios[prev].id,
                    second: scenario.id,
                });
            }
            *slot = Some(idx);
        }

        let mut by_causes = [0usize; CauseSet::SUBSET_COUNT];
        for causes in CauseSet::all_subsets() {
            let mask = causes.mask() as usize;
            by_causes[mask] = slots[mask].ok_or(CatalogError::MissingCauseSet(causes))?;
        }

        Ok(Self { scenarios, by_id, by_causes })
    }

    /// The shipped fermentation catalog.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(standard_scenarios())
    }

    pub fn get(&self, id: ScenarioId) -> Option<&Scenario> {
        self.by_id.get(&id).map(|&idx| &self.scenarios[idx])
    }

    /// Total over all cause subsets once the catalog has been built.
    pub fn by_causes(&self, causes: CauseSet) -> &Scenario {
        &self.scenarios[self.by_causes[causes.mask() as usize]]
    }

    /// The unique scenario with no active causes.
    pub fn all_good(&self) -> &Scenario {
        self.by_causes(CauseSet::EMPTY)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    pub text: String,
    pub fixes: Cause,
}

/// Immutable action table: exactly one action per cause.
#[derive(Debug, Clone)]
pub struct ActionCatalog {
    actions: Vec<Action>,
}

impl ActionCatalog {
    pub fn new(actions: Vec<Action>) -> Result<Self, CatalogError> {
        let mut seen_ids: Vec<ActionId> = Vec::with_capacity(actions.len());
        let mut fixers: [Option<ActionId>; 4] = [None; 4];

        for action in &actions {
            if seen_ids.contains(&action.id) {
                return Err(CatalogError::DuplicateActionId(action.id));
            }
            seen_ids.push(action.id);

            let slot = &mut fixers[action.fixes as usize];
            if let Some(first) = *slot {
                return Err(CatalogError::DuplicateAction {
                    cause: action.fixes,
                    first,
                    second: action.id,
                });
            }
            *slot = Some(action.id);
        }

        if let Some(cause) = Cause::ALL.into_iter().find(|c| fixers[*c as usize].is_none()) {
            return Err(CatalogError::MissingAction(cause));
        }

        Ok(Self { actions })
    }

    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(standard_actions())
    }

    pub fn get(&self, id: ActionId) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// The action remediating `cause`. Total once the catalog has been built.
    pub fn fixing(&self, cause: Cause) -> Option<&Action> {
        self.actions.iter().find(|a| a.fixes == cause)
    }

    /// Actions in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Shipped data
// ---------------------------------------------------------------------------

fn standard_scenarios() -> Vec<Scenario> {
    use Cause::*;
    vec![
        Scenario::new(1, "1: All Good", &[], [dec!(1.025), dec!(20), dec!(20), dec!(4.5)]),
        Scenario::new(2, "2: Temp Control Fail", &[C1], [dec!(1.018), dec!(25.5), dec!(40), dec!(4.6)]),
        Scenario::new(3, "3: Yeast Health Issue", &[C2], [dec!(1.045), dec!(19.0), dec!(3), dec!(5.0)]),
        Scenario::new(4, "4: Oxygen Exposure", &[C3], [dec!(1.018), dec!(21.0), dec!(35), dec!(4.4)]),
        Scenario::new(5, "5: Sanitation Fail", &[C4], [dec!(1.008), dec!(19.5), dec!(7), dec!(3.2)]),
        Scenario::new(6, "6: Temp & Yeast", &[C1, C2], [dec!(1.050), dec!(25.5), dec!(1), dec!(5.0)]),
        Scenario::new(7, "7: Temp & Oxygen", &[C1, C3], [dec!(1.022), dec!(25.5), dec!(45), dec!(4.7)]),
        Scenario::new(8, "8: Temp & Sanitation", &[C1, C4], [dec!(1.002), dec!(26.0), dec!(20), dec!(2.8)]),
        Scenario::new(9, "9: Yeast & Oxygen", &[C2, C3], [dec!(1.048), dec!(19.0), dec!(2), dec!(5.1)]),
        Scenario::new(10, "10: Yeast & Sanitation", &[C2, C4], [dec!(1.010), dec!(19.5), dec!(4), dec!(3.5)]),
        Scenario::new(11, "11: Yeast, Oxygen, Sanitation", &[C2, C3, C4], [dec!(1.012), dec!(19.5), dec!(3), dec!(3.3)]),
        Scenario::new(12, "12: Oxygen & Sanitation", &[C3, C4], [dec!(1.005), dec!(19.5), dec!(10), dec!(3.0)]),
        Scenario::new(13, "13: Temp, Yeast, Oxygen", &[C1, C2, C3], [dec!(1.048), dec!(25.5), dec!(1), dec!(5.1)]),
        Scenario::new(14, "14: Temp, Yeast, Sanitation", &[C1, C2, C4], [dec!(1.008), dec!(26.0), dec!(5), dec!(3.0)]),
        Scenario::new(15, "15: Temp, Oxygen, Sanitation", &[C1, C3, C4], [dec!(1.001), dec!(26.5), dec!(15), dec!(2.7)]),
        Scenario::new(16, "16: All Together", &[C1, C2, C3, C4], [dec!(1.040), dec!(26.0), dec!(2), dec!(3.5)]),
    ]
}

fn standard_actions() -> Vec<Action> {
    let action = |id, text: &str, fixes| Action { id, text: text.to_string(), fixes };
    vec![
        action(ActionId::FixTemp, "Fix Temperature Controller", Cause::C1),
        action(ActionId::PitchYeast, "Pitch New/Healthy Yeast", Cause::C2),
        action(ActionId::ManageOxygen, "Improve Oxygen Management", Cause::C3),
        action(ActionId::Sterilize, "Sterilize Equipment", Cause::C4),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_is_total() {
        let catalog = ScenarioCatalog::standard().expect("test: shipped catalog must validate");
        assert_eq!(catalog.len(), 16);
        for causes in CauseSet::all_subsets() {
            assert_eq!(catalog.by_causes(causes).causes, causes);
        }
    }

    #[test]
    fn all_good_is_scenario_one() {
        let catalog = ScenarioCatalog::standard().unwrap();
        let good = catalog.all_good();
        assert_eq!(good.id, ScenarioId(1));
        assert!(good.is_all_good());
        assert_eq!(good.readings.sg, dec!(1.025));
    }

    #[test]
    fn missing_cause_set_is_rejected() {
        // The historical table had no {C2, C3, C4} scenario.
        let scenarios: Vec<Scenario> = standard_scenarios()
            .into_iter()
            .filter(|s| s.id != ScenarioId(11))
            .collect();
        let missing = CauseSet::from_causes(&[Cause::C2, Cause::C3, Cause::C4]);
        assert_eq!(
            ScenarioCatalog::new(scenarios).err(),
            Some(CatalogError::MissingCauseSet(missing))
        );
    }

    #[test]
    fn duplicate_cause_set_is_rejected() {
        let mut scenarios = standard_scenarios();
        scenarios.push(Scenario::new(17, "17: Second Temp Fail", &[Cause::C1], [dec!(1); 4]));
        let err = ScenarioCatalog::new(scenarios).unwrap_err();
        assert!(
            matches!(err, CatalogError::DuplicateCauseSet { second: ScenarioId(17), .. }),
            "expected DuplicateCauseSet, got: {err}"
        );
    }

    #[test]
    fn duplicate_scenario_id_is_rejected() {
        let mut scenarios = standard_scenarios();
        scenarios[1].id = ScenarioId(1);
        assert_eq!(
            ScenarioCatalog::new(scenarios).err(),
            Some(CatalogError::DuplicateScenarioId(ScenarioId(1)))
        );
    }

    #[test]
    fn action_catalog_covers_every_cause_once() {
        let actions = ActionCatalog::standard().unwrap();
        assert_eq!(actions.len(), Cause::ALL.len());
        for cause in Cause::ALL {
            assert_eq!(actions.fixing(cause).map(|a| a.fixes), Some(cause));
        }
        assert_eq!(
            actions.get(ActionId::Sterilize).map(|a| a.text.as_str()),
            Some("Sterilize Equipment")
        );
    }

    #[test]
    fn action_catalog_rejects_double_fix() {
        let mut actions = standard_actions();
        actions[1].fixes = Cause::C1;
        assert_eq!(
            ActionCatalog::new(actions).err(),
            Some(CatalogError::DuplicateAction {
                cause: Cause::C1,
                first: ActionId::FixTemp,
                second: ActionId::PitchYeast,
            })
        );
    }

    #[test]
    fn action_catalog_rejects_uncovered_cause() {
        let actions: Vec<Action> = standard_actions()
            .into_iter()
            .filter(|a| a.fixes != Cause::C3)
            .collect();
        assert_eq!(
            ActionCatalog::new(actions).err(),
            Some(CatalogError::MissingAction(Cause::C3))
        );
    }
}
