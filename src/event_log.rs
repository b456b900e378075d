// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fermentation Troubleshooting Game ("The Cellar") - Event Log

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ActionId, DifficultyScore, ScenarioId};

// ─── Field Sanitizer ─────────────────────────────────────────────────────────

/// Replaces the export separator inside free text before a record is logged,
/// and flattens line breaks to spaces.
///
/// The export format never quotes or escapes, so a separator surviving into a
/// logged field would shift every column after it, and a line break would
/// split the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSanitizer {
    pub separator: char,
    pub replacement: char,
}

impl Default for FieldSanitizer {
    fn default() -> Self {
        Self { separator: ',', replacement: ';' }
    }
}

impl FieldSanitizer {
    pub fn clean(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '\r' | '\n' => ' ',
                c if c == self.separator => self.replacement,
                c => c,
            })
            .collect()
    }
}

// ─── RoundRecord ─────────────────────────────────────────────────────────────

/// One completed round. Field names match the exported CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub round: u32,
    pub batch: u32,
    #[serde(rename = "currentScenarioID")]
    pub current_scenario_id: ScenarioId,
    #[serde(rename = "currentScenarioName")]
    pub current_scenario_name: String,
    #[serde(rename = "userAssessmentText")]
    pub user_assessment_text: String,
    #[serde(rename = "aiText")]
    pub ai_text: String,
    #[serde(rename = "aiChecked")]
    pub ai_checked: bool,
    /// Assessment edited after the AI panel was last revealed.
    #[serde(rename = "textChanged")]
    pub text_changed: bool,
    #[serde(rename = "userAction")]
    pub user_action: ActionId,
    #[serde(rename = "seqScore")]
    pub seq_score: DifficultyScore,
    #[serde(rename = "nextScenarioID")]
    pub next_scenario_id: ScenarioId,
    #[serde(rename = "tutorialDurationSeconds")]
    pub tutorial_duration_seconds: Decimal,
    #[serde(rename = "roundDurationSeconds")]
    pub round_duration_seconds: Decimal,
    /// Rounds the player needed in total; stamped on every record at game end.
    #[serde(rename = "performanceScore", default, skip_serializing_if = "Option::is_none")]
    pub performance_score: Option<u32>,
}

impl RoundRecord {
    /// `(name, value)` pairs in column order. `performanceScore` is present
    /// only once the record has been stamped.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("userID", self.user_id.clone()),
            ("round", self.round.to_string()),
            ("batch", self.batch.to_string()),
            ("currentScenarioID", self.current_scenario_id.to_string()),
            ("currentScenarioName", self.current_scenario_name.clone()),
            ("userAssessmentText", self.user_assessment_text.clone()),
            ("aiText", self.ai_text.clone()),
            ("aiChecked", self.ai_checked.to_string()),
            ("textChanged", self.text_changed.to_string()),
            ("userAction", self.user_action.to_string()),
            ("seqScore", self.seq_score.value().to_string()),
            ("nextScenarioID", self.next_scenario_id.to_string()),
            ("tutorialDurationSeconds", self.tutorial_duration_seconds.to_string()),
            ("roundDurationSeconds", self.round_duration_seconds.to_string()),
        ];
        if let Some(score) = self.performance_score {
            fields.push(("performanceScore", score.to_string()));
        }
        fields
    }
}

// ─── EventLog ────────────────────────────────────────────────────────────────

/// Append-only sequence of round records for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    records: Vec<RoundRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: RoundRecord) {
        log::info!(
            "[ROUND] logged user:{} round:{} scenario:{} action:{} next:{}",
            record.user_id,
            record.round,
            record.current_scenario_id,
            record.user_action,
            record.next_scenario_id
        );
        self.records.push(record);
    }

    /// Stamp the final performance score on every record logged so far.
    pub fn stamp_performance(&mut self, score: u32) {
        for record in &mut self.records {
            record.performance_score = Some(score);
        }
    }

    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&RoundRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pretty JSON of the whole log, as shown in the on-screen log preview.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.records)
    }
}

#[cfg(test)]
pub(crate) fn sample_record(round: u32) -> RoundRecord {
    RoundRecord {
        user_id: "User_1700000000000".to_string(),
        round,
        batch: 2 + round,
        current_scenario_id: ScenarioId(6),
        current_scenario_name: "6: Temp & Yeast".to_string(),
        user_assessment_text: "temp too high".to_string(),
        ai_text: "Extremely slow or no SG drop".to_string(),
        ai_checked: false,
        text_changed: false,
        user_action: ActionId::FixTemp,
        seq_score: DifficultyScore::new(3).expect("test: valid score"),
        next_scenario_id: ScenarioId(3),
        tutorial_duration_seconds: rust_decimal_macros::dec!(41.5),
        round_duration_seconds: rust_decimal_macros::dec!(12.25),
        performance_score: None,
    }
}
