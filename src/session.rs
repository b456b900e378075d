// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fermentation Troubleshooting Game ("The Cellar") - Session Core
//
// `GameSession` owns every piece of mutable state: tutorial/game mode, the
// active scenario, sensor history, the event log and the player's pending
// input. Each call validates first and mutates second, so a rejected call
// leaves the session exactly as it was.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::advisor::{Advisor, AdvisorPanel, StaticAdvisor};
use crate::catalog::{ActionCatalog, CatalogError, Scenario, ScenarioCatalog};
use crate::config::{ConfigError, GameConfig};
use crate::dashboard::DashboardView;
use crate::event_log::{EventLog, RoundRecord};
use crate::export::{self, CsvExporter, ExportError};
use crate::history::SensorHistory;
use crate::transition::{Transition, TransitionEngine, TransitionError};
use crate::types::*;

pub const TUTORIAL_COMPLETE_NOTICE: &str = "Tutorial complete! The real challenge begins now.";

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Input the player has to correct before the session can move on. The
/// `Display` text is shown to the player verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("Please look at the graphs (all lines stable and normal) and write \"All good\" in the text box to continue.")]
    NotAllGood,

    #[error("Please write your assessment first. Look at the graphs - what do you think is wrong?")]
    MissingAssessment,

    #[error("Please select an action based on your assessment.")]
    MissingAction,

    #[error("Great! You've made your choice. Now click \"See AI Analysis & Recommendation\" to check your work.")]
    AiNotChecked,

    #[error("Your selected action is incorrect. Look at the AI recommendation and select \"{expected}\" to continue.")]
    WrongTutorialAction { expected: String },

    #[error("Please write an assessment, select an action, and rate the difficulty.")]
    IncompleteRound,

    #[error("The AI analysis is not part of this step.")]
    AiPanelUnavailable,

    #[error("Write an assessment and select an action before checking the AI analysis.")]
    AiPanelLocked,

    #[error("Open the AI analysis before copying from it.")]
    AiPanelHidden,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Gate(#[from] GateError),

    /// Catalog or transition defect. Never caused by player input.
    #[error("transition failed: {0}")]
    Transition(#[from] TransitionError),

    #[error("difficulty must be between 1 and 7, got {0}")]
    InvalidDifficulty(u8),

    #[error("{operation} is not available in state {state}")]
    WrongState { operation: &'static str, state: GameState },

    #[error("the game is over; input is frozen")]
    Finished,

    #[error("feedback was already submitted")]
    FeedbackSubmitted,
}

/// Failures while building a session.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ─── Session State Types ─────────────────────────────────────────────────────

/// What the player has entered during the current state. Cleared on every
/// state entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingInput {
    pub assessment: String,
    pub action: Option<ActionId>,
    pub difficulty: Option<DifficultyScore>,
    pub ai_panel_visible: bool,
    /// Sticky for the round: hiding the panel again does not reset it.
    pub ai_panel_opened: bool,
    /// Assessment as it stood when the panel was last revealed.
    pub assessment_at_reveal: Option<String>,
}

impl PendingInput {
    pub fn has_assessment(&self) -> bool {
        !self.assessment.trim().is_empty()
    }

    /// The AI panel may be revealed once both an assessment and an action exist.
    pub fn ai_panel_unlocked(&self) -> bool {
        self.has_assessment() && self.action.is_some()
    }

    /// Whether the assessment was edited after the AI panel was revealed.
    pub fn text_changed(&self) -> bool {
        self.assessment_at_reveal
            .as_deref()
            .is_some_and(|before| before != self.assessment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionSummary {
    pub user_id: String,
    pub rounds: u32,
    pub final_scenario: ScenarioId,
    pub message: String,
    /// From the end of the tutorial to the winning round.
    pub total_time_seconds: Decimal,
    pub tutorial_duration_seconds: Decimal,
    pub feedback: Option<Feedback>,
}

/// Optional free-text comment left on the completion screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub user_id: String,
    pub total_time_seconds: Decimal,
    pub tutorial_duration_seconds: Decimal,
    pub feedback_text: String,
}

/// Notifications for the host, drained with [`GameSession::drain_events`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SessionEvent {
    StateEntered { state: GameState },
    AiContentRefreshed { scenario: Option<ScenarioId> },
    SelectionReset,
    Notice { text: String },
    RoundLogged { round: u32, next: ScenarioId },
    GameCompleted { rounds: u32 },
    FeedbackReceived,
}

/// Serializable snapshot of the session for the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub state: GameState,
    pub title: String,
    pub progress_label: &'static str,
    pub round: u32,
    pub current_scenario: Option<ScenarioId>,
    pub pending: PendingInput,
    pub ai_panel_unlocked: bool,
    pub finished: bool,
}

/// Epoch-millisecond user id, as generated when the host supplies none.
pub fn user_id_from_millis(millis: u64) -> String {
    format!("User_{}", millis)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn generate_user_id() -> String {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    user_id_from_millis(millis)
}

// ─── GameSession ─────────────────────────────────────────────────────────────

pub struct GameSession<A: Advisor = StaticAdvisor> {
    scenarios: ScenarioCatalog,
    actions: ActionCatalog,
    advisor: A,
    config: GameConfig,

    user_id: String,
    state: GameState,
    current_scenario: Option<ScenarioId>,
    round_number: u32,

    history: SensorHistory,
    log: EventLog,
    pending: PendingInput,
    ai_panel: Option<AdvisorPanel>,

    completion: Option<CompletionSummary>,
    events: Vec<SessionEvent>,

    /// Latest host time seen; never moves backwards.
    clock: Millis,
    tutorial_started: Option<Millis>,
    tutorial_duration: Decimal,
    game_started: Option<Millis>,
    round_started: Option<Millis>,
}

impl GameSession<StaticAdvisor> {
    /// Session over the shipped catalogs and advisor text.
    pub fn new(user_id: impl Into<String>, config: GameConfig) -> Result<Self, SetupError> {
        Self::with_parts(
            user_id,
            config,
            ScenarioCatalog::standard()?,
            ActionCatalog::standard()?,
            StaticAdvisor::new(),
        )
    }

    pub fn with_defaults(user_id: impl Into<String>) -> Result<Self, SetupError> {
        Self::new(user_id, GameConfig::default())
    }
}

impl<A: Advisor> GameSession<A> {
    pub fn with_parts(
        user_id: impl Into<String>,
        config: GameConfig,
        scenarios: ScenarioCatalog,
        actions: ActionCatalog,
        advisor: A,
    ) -> Result<Self, SetupError> {
        config.validate(&scenarios, &actions)?;
        let user_id = user_id.into();
        log::info!(
            "[CATALOG] {} scenarios, {} actions loaded for {}",
            scenarios.len(),
            actions.len(),
            user_id
        );

        let mut session = Self {
            history: SensorHistory::with_capacity(config.max_batches),
            scenarios,
            actions,
            advisor,
            config,
            user_id,
            state: GameState::default(),
            current_scenario: None,
            round_number: 0,
            log: EventLog::new(),
            pending: PendingInput::default(),
            ai_panel: None,
            completion: None,
            events: Vec::new(),
            clock: Millis::default(),
            tutorial_started: None,
            tutorial_duration: Decimal::ZERO,
            game_started: None,
            round_started: None,
        };
        session.enter_state(GameState::default());
        Ok(session)
    }

    /// Record the host's current time. Durations are measured between the
    /// readings in effect when each transition runs.
    pub fn set_clock(&mut self, now: Millis) {
        self.clock = self.clock.max(now);
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    /// The progress button: run whichever transition the current state offers.
    pub fn advance(&mut self) -> Result<GameState, SessionError> {
        match self.state {
            GameState::Tutorial(TutorialStep::Welcome) => self.continue_tutorial()?,
            GameState::Tutorial(TutorialStep::AllGood) => self.check_tutorial_step2()?,
            GameState::Tutorial(TutorialStep::Sanitation) => self.check_tutorial_step3()?,
            GameState::Game => self.start_next_batch()?,
        }
        Ok(self.state)
    }

    /// TUTORIAL.1 → TUTORIAL.2, unconditionally.
    pub fn continue_tutorial(&mut self) -> Result<(), SessionError> {
        self.require_state("continue_tutorial", GameState::Tutorial(TutorialStep::Welcome))?;
        let good = self.scenarios.all_good().id;
        self.load_scenario(good)?;
        self.tutorial_started = Some(self.clock);
        log::info!("[TUTORIAL] step 2: {}", self.user_id);
        self.enter_state(GameState::Tutorial(TutorialStep::AllGood));
        Ok(())
    }

    /// TUTORIAL.2 → TUTORIAL.3 once the assessment calls the batch good.
    pub fn check_tutorial_step2(&mut self) -> Result<(), SessionError> {
        self.require_state("check_tutorial_step2", GameState::Tutorial(TutorialStep::AllGood))?;
        if !self.is_affirmative(&self.pending.assessment) {
            return Err(GateError::NotAllGood.into());
        }
        self.load_scenario(self.config.tutorial_scenario)?;
        log::info!("[TUTORIAL] step 3: {}", self.user_id);
        self.enter_state(GameState::Tutorial(TutorialStep::Sanitation));
        Ok(())
    }

    /// TUTORIAL.3 → GAME. Checks run in order and the first failure wins.
    pub fn check_tutorial_step3(&mut self) -> Result<(), SessionError> {
        self.require_state("check_tutorial_step3", GameState::Tutorial(TutorialStep::Sanitation))?;
        let pending = &self.pending;
        if !pending.has_assessment() {
            return Err(GateError::MissingAssessment.into());
        }
        let Some(action) = pending.action else {
            return Err(GateError::MissingAction.into());
        };
        if !pending.ai_panel_opened {
            return Err(GateError::AiNotChecked.into());
        }
        if action != self.config.tutorial_action {
            let expected = self
                .actions
                .get(self.config.tutorial_action)
                .map(|a| a.text.clone())
                .unwrap_or_else(|| self.config.tutorial_action.to_string());
            return Err(GateError::WrongTutorialAction { expected }.into());
        }

        self.load_scenario(self.config.starting_scenario)?;
        self.round_number = 1;
        self.tutorial_duration = self.clock.seconds_since(self.tutorial_started.unwrap_or(self.clock));
        self.game_started = Some(self.clock);
        self.round_started = Some(self.clock);
        log::info!(
            "[TUTORIAL] complete in {}s, game starts in scenario {} for {}",
            self.tutorial_duration,
            self.config.starting_scenario,
            self.user_id
        );
        self.events.push(SessionEvent::Notice {
            text: TUTORIAL_COMPLETE_NOTICE.to_string(),
        });
        self.enter_state(GameState::Game);
        Ok(())
    }

    /// Play one round: log it, move to the next scenario, extend the history,
    /// and either finish the game or start the next round.
    pub fn start_next_batch(&mut self) -> Result<(), SessionError> {
        self.require_state("start_next_batch", GameState::Game)?;
        let (action, difficulty) = match (&self.pending.action, &self.pending.difficulty) {
            (Some(action), Some(difficulty)) if self.pending.has_assessment() => (*action, *difficulty),
            _ => return Err(GateError::IncompleteRound.into()),
        };
        let current = self.active_scenario()?.id;

        let transition = TransitionEngine::new(&self.scenarios, &self.actions)
            .apply(current, action)
            .map_err(|e| self.fatal(e))?;
        let next = transition.next_or(current);
        let record = self.build_record(current, action, difficulty, next)?;

        match transition {
            Transition::Remediated { fixed, .. } => {
                log::info!("[ROUND] {} round {}: {} fixed {}, now {}", self.user_id, self.round_number, action, fixed, next)
            }
            Transition::NoEffect => {
                log::info!("[ROUND] {} round {}: {} had no effect on {}", self.user_id, self.round_number, action, current)
            }
        }

        let next_scenario = self
            .scenarios
            .get(next)
            .ok_or_else(|| self.fatal(TransitionError::UnknownScenario(next)))?;
        let solved = next_scenario.is_all_good();

        self.log.append(record);
        self.round_started = Some(self.clock);
        self.events.push(SessionEvent::RoundLogged { round: self.round_number, next });
        self.current_scenario = Some(next);
        if let Some(scenario) = self.scenarios.get(next) {
            self.history.append(scenario);
        }

        if solved {
            self.finish();
        } else {
            self.round_number += 1;
            self.enter_state(GameState::Game);
        }
        Ok(())
    }

    // ── Player Input ─────────────────────────────────────────────────────────

    /// Replace the assessment text. Emptying it hides the AI panel.
    pub fn set_assessment(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        self.require_active()?;
        self.pending.assessment = text.into();
        self.relock_ai_panel();
        Ok(())
    }

    pub fn select_action(&mut self, action: ActionId) -> Result<(), SessionError> {
        self.require_active()?;
        if !self.state.offers_ai_panel() {
            return Err(SessionError::WrongState { operation: "select_action", state: self.state });
        }
        self.pending.action = Some(action);
        Ok(())
    }

    /// Deselect the action. Hides the AI panel.
    pub fn clear_action(&mut self) -> Result<(), SessionError> {
        self.require_active()?;
        self.pending.action = None;
        self.relock_ai_panel();
        Ok(())
    }

    pub fn set_difficulty(&mut self, score: u8) -> Result<(), SessionError> {
        self.require_active()?;
        if self.state != GameState::Game {
            return Err(SessionError::WrongState { operation: "set_difficulty", state: self.state });
        }
        let score = DifficultyScore::new(score).ok_or(SessionError::InvalidDifficulty(score))?;
        self.pending.difficulty = Some(score);
        Ok(())
    }

    /// Show or hide the AI panel. Returns whether it is visible afterwards.
    pub fn toggle_ai_panel(&mut self) -> Result<bool, SessionError> {
        self.require_active()?;
        if !self.state.offers_ai_panel() || self.ai_panel.is_none() {
            return Err(GateError::AiPanelUnavailable.into());
        }
        if !self.pending.ai_panel_unlocked() {
            return Err(GateError::AiPanelLocked.into());
        }
        self.pending.ai_panel_visible = !self.pending.ai_panel_visible;
        if self.pending.ai_panel_visible {
            self.pending.ai_panel_opened = true;
            self.pending.assessment_at_reveal = Some(self.pending.assessment.clone());
        }
        Ok(self.pending.ai_panel_visible)
    }

    /// Overwrite the assessment with the text of one AI panel block.
    pub fn copy_ai_text(&mut self, variant: AdvisorVariant) -> Result<String, SessionError> {
        self.require_active()?;
        if !self.pending.ai_panel_visible {
            return Err(GateError::AiPanelHidden.into());
        }
        let text = self
            .ai_panel
            .as_ref()
            .map(|panel| panel.copy_text(variant))
            .ok_or(GateError::AiPanelUnavailable)?;
        self.pending.assessment = text.clone();
        Ok(text)
    }

    /// Attach the player's closing comment to the completion summary. Only
    /// available once the game is over, and only once.
    pub fn submit_feedback(&mut self, text: &str) -> Result<&Feedback, SessionError> {
        match &self.completion {
            None => {
                return Err(SessionError::WrongState { operation: "submit_feedback", state: self.state });
            }
            Some(summary) if summary.feedback.is_some() => return Err(SessionError::FeedbackSubmitted),
            Some(_) => {}
        }
        let feedback_text = self.config.sanitizer().clean(text.trim());
        log::info!("[GAME] {} left {} characters of feedback", self.user_id, feedback_text.len());
        self.events.push(SessionEvent::FeedbackReceived);

        let state = self.state;
        let summary = self
            .completion
            .as_mut()
            .ok_or(SessionError::WrongState { operation: "submit_feedback", state })?;
        let feedback = Feedback {
            user_id: summary.user_id.clone(),
            total_time_seconds: summary.total_time_seconds,
            tutorial_duration_seconds: summary.tutorial_duration_seconds,
            feedback_text,
        };
        let feedback: &Feedback = summary.feedback.insert(feedback);
        Ok(feedback)
    }

    // ── Views ────────────────────────────────────────────────────────────────

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn current_scenario(&self) -> Option<&Scenario> {
        self.current_scenario.and_then(|id| self.scenarios.get(id))
    }

    pub fn pending(&self) -> &PendingInput {
        &self.pending
    }

    pub fn history(&self) -> &SensorHistory {
        &self.history
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scenarios(&self) -> &ScenarioCatalog {
        &self.scenarios
    }

    pub fn actions(&self) -> &ActionCatalog {
        &self.actions
    }

    pub fn is_finished(&self) -> bool {
        self.completion.is_some()
    }

    pub fn completion(&self) -> Option<&CompletionSummary> {
        self.completion.as_ref()
    }

    /// AI panel content for the current scenario, regardless of visibility.
    pub fn advisor_panel(&self) -> Option<&AdvisorPanel> {
        self.ai_panel.as_ref()
    }

    pub fn title(&self) -> String {
        match self.state {
            GameState::Tutorial(TutorialStep::Welcome) => "Welcome to the Fermentation Game!".to_string(),
            GameState::Tutorial(TutorialStep::AllGood) => "Tutorial: Write assessment and move forward".to_string(),
            GameState::Tutorial(TutorialStep::Sanitation) => "Tutorial: Assess, Act, then Check AI".to_string(),
            GameState::Game => format!("Round {}: Sensor Dashboard", self.round_number),
        }
    }

    /// Label of the progress button in the current state.
    pub fn progress_label(&self) -> &'static str {
        match self.state {
            GameState::Tutorial(TutorialStep::Welcome) => "Continue to Tutorial",
            GameState::Tutorial(TutorialStep::AllGood) => "Continue",
            GameState::Tutorial(TutorialStep::Sanitation) => "Check & Finish Tutorial",
            GameState::Game => "Start Next Round",
        }
    }

    /// Graph data. `None` until a scenario is active.
    pub fn dashboard(&self) -> Option<DashboardView> {
        self.current_scenario?;
        Some(DashboardView::build(self.title(), &self.history))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            title: self.title(),
            progress_label: self.progress_label(),
            round: self.round_number,
            current_scenario: self.current_scenario,
            pending: self.pending.clone(),
            ai_panel_unlocked: self.state.offers_ai_panel() && self.pending.ai_panel_unlocked(),
            finished: self.is_finished(),
        }
    }

    pub fn export_csv(&self) -> Result<String, ExportError> {
        CsvExporter::new(self.config.field_separator).export(&self.log)
    }

    pub fn export_filename(&self) -> String {
        export::export_filename(&self.user_id)
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Internals ────────────────────────────────────────────────────────────

    fn require_active(&self) -> Result<(), SessionError> {
        if self.completion.is_some() {
            return Err(SessionError::Finished);
        }
        Ok(())
    }

    fn require_state(&self, operation: &'static str, expected: GameState) -> Result<(), SessionError> {
        self.require_active()?;
        if self.state != expected {
            return Err(SessionError::WrongState { operation, state: self.state });
        }
        Ok(())
    }

    /// Case-insensitive substring match on the configured keyword, so
    /// "I think it's all good" passes and "looks fine" does not.
    fn is_affirmative(&self, text: &str) -> bool {
        text.trim()
            .to_lowercase()
            .contains(&self.config.affirmative_keyword.trim().to_lowercase())
    }

    fn active_scenario(&self) -> Result<&Scenario, SessionError> {
        let id = self.current_scenario.ok_or(SessionError::WrongState {
            operation: "start_next_batch",
            state: self.state,
        })?;
        self.scenarios
            .get(id)
            .ok_or_else(|| self.fatal(TransitionError::UnknownScenario(id)))
    }

    fn fatal(&self, err: TransitionError) -> SessionError {
        log::error!("[GAME] {} halted in {}: {}", self.user_id, self.state, err);
        SessionError::Transition(err)
    }

    /// Make `id` the active scenario and reseed the history from it.
    fn load_scenario(&mut self, id: ScenarioId) -> Result<(), SessionError> {
        let scenario = self
            .scenarios
            .get(id)
            .ok_or_else(|| self.fatal(TransitionError::UnknownScenario(id)))?;
        self.history
            .seed(self.scenarios.all_good(), scenario, self.config.baseline_batches);
        self.current_scenario = Some(id);
        Ok(())
    }

    fn build_record(
        &self,
        current: ScenarioId,
        action: ActionId,
        difficulty: DifficultyScore,
        next: ScenarioId,
    ) -> Result<RoundRecord, SessionError> {
        let scenario = self.active_scenario()?;
        let clean = self.config.sanitizer();
        Ok(RoundRecord {
            user_id: clean.clean(&self.user_id),
            round: self.round_number,
            batch: self.history.len() as u32,
            current_scenario_id: current,
            current_scenario_name: clean.clean(&scenario.name),
            user_assessment_text: clean.clean(&self.pending.assessment),
            ai_text: clean.clean(self.advisor.analysis(current).unwrap_or_default()),
            ai_checked: self.pending.ai_panel_opened,
            text_changed: self.pending.text_changed(),
            user_action: action,
            seq_score: difficulty,
            next_scenario_id: next,
            tutorial_duration_seconds: self.tutorial_duration,
            round_duration_seconds: self.clock.seconds_since(self.round_started.unwrap_or(self.clock)),
            performance_score: None,
        })
    }

    fn relock_ai_panel(&mut self) {
        if !self.pending.ai_panel_unlocked() {
            self.pending.ai_panel_visible = false;
        }
    }

    /// Clear pending input and refresh AI content for the current scenario.
    fn enter_state(&mut self, state: GameState) {
        self.state = state;
        self.pending = PendingInput::default();
        self.ai_panel = self
            .current_scenario
            .and_then(|id| self.scenarios.get(id))
            .map(|scenario| self.advisor.panel(scenario, &self.actions));

        self.events.push(SessionEvent::StateEntered { state });
        self.events.push(SessionEvent::AiContentRefreshed { scenario: self.current_scenario });
        self.events.push(SessionEvent::SelectionReset);
        log::debug!("[GAME] {} entered {}", self.user_id, state);
    }

    fn finish(&mut self) {
        let rounds = self.round_number;
        self.log.stamp_performance(rounds);
        let final_scenario = self.current_scenario.unwrap_or(self.scenarios.all_good().id);
        self.completion = Some(CompletionSummary {
            user_id: self.user_id.clone(),
            rounds,
            final_scenario,
            message: format!("You fixed all the issues in {} rounds.", rounds),
            total_time_seconds: self.clock.seconds_since(self.game_started.unwrap_or(self.clock)),
            tutorial_duration_seconds: self.tutorial_duration,
            feedback: None,
        });
        self.pending.ai_panel_visible = false;
        self.events.push(SessionEvent::GameCompleted { rounds });
        log::info!("[GAME] {} completed in {} rounds", self.user_id, rounds);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
