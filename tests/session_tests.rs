#[cfg(test)]
mod tests {
    use ferment_engine::*;

    fn finish_tutorial(session: &mut GameSession) {
        session.advance().unwrap();
        session.set_assessment("All good").unwrap();
        session.advance().unwrap();
        session.set_assessment("pH is crashing").unwrap();
        session.select_action(ActionId::Sterilize).unwrap();
        session.toggle_ai_panel().unwrap();
        session.advance().unwrap();
        assert_eq!(session.state(), GameState::Game);
    }

    fn submit(session: &mut GameSession, assessment: &str, action: ActionId, score: u8) -> Result<GameState, SessionError> {
        session.set_assessment(assessment)?;
        session.select_action(action)?;
        session.set_difficulty(score)?;
        session.advance()
    }

    // ========== End-to-End ==========

    #[test]
    fn test_full_playthrough_from_tutorial() {
        let mut session = GameSession::with_defaults("User_1").unwrap();
        finish_tutorial(&mut session);

        submit(&mut session, "too hot, yeast stuck", ActionId::FixTemp, 3).unwrap();
        assert_eq!(session.current_scenario().unwrap().id, ScenarioId(3));

        submit(&mut session, "yeast never started", ActionId::PitchYeast, 2).unwrap();
        assert!(session.is_finished());

        let log = session.log();
        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0].round, 1);
        assert_eq!(log.records()[1].round, 2);
        assert!(log.records().iter().all(|r| r.performance_score == Some(2)));
        assert_eq!(session.completion().unwrap().rounds, 2);
    }

    #[test]
    fn test_tutorial_logs_nothing() {
        let mut session = GameSession::with_defaults("User_2").unwrap();
        finish_tutorial(&mut session);
        assert!(session.log().is_empty());
        assert_eq!(session.history().len(), 3);
        assert_eq!(session.round_number(), 1);
    }

    #[test]
    fn test_worst_case_needs_four_rounds() {
        let config = GameConfig { starting_scenario: ScenarioId(16), ..GameConfig::default() };
        let mut session = GameSession::new("User_3", config).unwrap();
        finish_tutorial(&mut session);

        for action in [ActionId::Sterilize, ActionId::ManageOxygen, ActionId::PitchYeast, ActionId::FixTemp] {
            submit(&mut session, "fixing one thing", action, 5).unwrap();
        }
        assert!(session.is_finished());
        assert_eq!(session.completion().unwrap().rounds, 4);

        let visited: Vec<ScenarioId> = session.log().records().iter().map(|r| r.next_scenario_id).collect();
        assert_eq!(visited, vec![ScenarioId(13), ScenarioId(6), ScenarioId(2), ScenarioId(1)]);
    }

    #[test]
    fn test_history_caps_at_max_batches() {
        let mut session = GameSession::with_defaults("User_4").unwrap();
        finish_tutorial(&mut session);

        // Sterilize never helps scenario 6.
        for _ in 0..10 {
            submit(&mut session, "not sure", ActionId::Sterilize, 7).unwrap();
        }
        assert_eq!(session.history().len(), 8);
        assert_eq!(session.log().len(), 10);
        assert_eq!(session.log().last().unwrap().batch, 8);
        assert_eq!(session.round_number(), 11);
        assert!(!session.is_finished());
    }

    // ========== Export ==========

    #[test]
    fn test_commas_never_break_columns() {
        let mut session = GameSession::with_defaults("User,5").unwrap();
        finish_tutorial(&mut session);
        submit(&mut session, "hot, stuck, flat", ActionId::FixTemp, 4).unwrap();
        submit(&mut session, "yeast, maybe", ActionId::PitchYeast, 4).unwrap();

        let csv = session.export_csv().unwrap();
        let rows: Vec<&str> = csv.split("\r\n").filter(|r| !r.is_empty()).collect();
        let columns = rows[0].split(',').count();
        assert_eq!(columns, 15);
        for row in &rows {
            assert_eq!(row.split(',').count(), columns, "row shifted: {}", row);
        }
        assert!(rows[1].starts_with("User;5,1,3,6,"));
        assert!(rows[1].contains("hot; stuck; flat"));
    }

    #[test]
    fn test_multiline_assessment_stays_on_one_row() {
        let mut session = GameSession::with_defaults("User_7").unwrap();
        finish_tutorial(&mut session);
        submit(&mut session, "SG stuck\r\ntemp high\nyeast?", ActionId::FixTemp, 4).unwrap();

        let csv = session.export_csv().unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains(",SG stuck  temp high yeast?,"));
    }

    #[test]
    fn test_export_before_first_round_is_empty() {
        let session = GameSession::with_defaults("User_6").unwrap();
        assert_eq!(session.export_csv(), Err(ExportError::EmptyLog));
    }

    // ========== Setup ==========

    #[test]
    fn test_oversized_history_is_rejected_at_setup() {
        let config = GameConfig::from_json(r#"{"max_batches": 1000000000}"#).unwrap();
        assert!(matches!(
            GameSession::new("User_8", config),
            Err(SetupError::Config(ConfigError::HistoryTooLong { max: 1_000_000_000, limit: BATCH_LIMIT }))
        ));
    }

    // ========== Catalog ==========

    #[test]
    fn test_catalog_rejects_missing_cause_set() {
        let scenarios: Vec<Scenario> = ScenarioCatalog::standard()
            .unwrap()
            .iter()
            .filter(|s| s.id != ScenarioId(11))
            .cloned()
            .collect();
        assert_eq!(ScenarioCatalog::new(scenarios).unwrap_err(), CatalogError::MissingCauseSet(
            CauseSet::from_causes(&[Cause::C2, Cause::C3, Cause::C4])
        ));
    }

    #[test]
    fn test_every_scenario_reaches_all_good() {
        let scenarios = ScenarioCatalog::standard().unwrap();
        let actions = ActionCatalog::standard().unwrap();
        let engine = TransitionEngine::new(&scenarios, &actions);

        for scenario in scenarios.iter() {
            let mut current = scenario.id;
            let mut steps = 0;
            while let Some(action) = engine.recommended_actions(current).unwrap().first() {
                current = engine.next_scenario(current, action.id).unwrap();
                steps += 1;
            }
            assert_eq!(current, scenarios.all_good().id);
            assert_eq!(steps, scenario.causes.len());
        }
    }
}

// ========== Seeded Random Playthroughs ==========

#[cfg(all(test, not(target_arch = "wasm32")))]
mod random_playthroughs {
    use ferment_engine::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    /// Random policy that picks a recommended action with probability
    /// `skill`, otherwise any action.
    fn play_to_end(seed: u64, start: u32, skill: f64) -> GameSession {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let config = GameConfig { starting_scenario: ScenarioId(start), ..GameConfig::default() };
        let mut session = GameSession::new(format!("User_{}", seed), config).unwrap();

        session.advance().unwrap();
        session.set_assessment("all good").unwrap();
        session.advance().unwrap();
        session.set_assessment("sour").unwrap();
        session.select_action(ActionId::Sterilize).unwrap();
        session.toggle_ai_panel().unwrap();
        session.advance().unwrap();

        let mut guard = 0;
        while !session.is_finished() {
            guard += 1;
            assert!(guard < 500, "seed {} never finished", seed);

            let current = session.current_scenario().unwrap().id;
            let recommended: Vec<ActionId> = TransitionEngine::new(session.scenarios(), session.actions())
                .recommended_actions(current)
                .unwrap()
                .iter()
                .map(|a| a.id)
                .collect();
            let action = if rng.gen_bool(skill) {
                recommended[rng.gen_range(0..recommended.len())]
            } else {
                ActionId::ALL[rng.gen_range(0..ActionId::ALL.len())]
            };

            session.set_assessment("checking").unwrap();
            session.select_action(action).unwrap();
            if rng.gen_bool(0.5) {
                session.toggle_ai_panel().unwrap();
            }
            session.set_difficulty(rng.gen_range(1..=7)).unwrap();
            session.advance().unwrap();

            let lengths: Vec<usize> = SensorChannel::ALL
                .iter()
                .map(|c| session.history().channel(*c).len())
                .collect();
            assert!(lengths.iter().all(|l| *l == lengths[0]));
            assert!(lengths[0] <= 8);
        }
        session
    }

    #[test]
    fn test_random_policies_terminate() {
        for seed in 0..200u64 {
            let start = 2 + (seed % 15) as u32;
            let session = play_to_end(seed, start, 0.4);
            let rounds = session.completion().unwrap().rounds;
            assert_eq!(rounds as usize, session.log().len());
            assert!(session.log().records().iter().all(|r| r.performance_score == Some(rounds)));
        }
    }

    #[test]
    fn test_perfect_policy_is_minimal() {
        let scenarios = ScenarioCatalog::standard().unwrap();
        let actions = ActionCatalog::standard().unwrap();
        let engine = TransitionEngine::new(&scenarios, &actions);
        for start in 2..=16u32 {
            let session = play_to_end(u64::from(start), start, 1.0);
            assert_eq!(
                session.completion().unwrap().rounds as usize,
                engine.minimum_rounds(ScenarioId(start)).unwrap()
            );
        }
    }

    #[test]
    fn test_logged_transitions_follow_cause_arithmetic() {
        let session = play_to_end(7, 16, 0.3);
        for record in session.log().records() {
            let expected = next_scenario(
                session.scenarios(),
                session.actions(),
                record.current_scenario_id,
                record.user_action,
            )
            .unwrap();
            assert_eq!(record.next_scenario_id, expected);
        }
    }
}
