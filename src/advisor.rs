// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fermentation Troubleshooting Game ("The Cellar") - AI Advisor Content
//
// The "AI" panel is a static lookup keyed by scenario id. Block A carries the
// real analysis and the actions that remediate the active causes; block B is
// a constant placebo used for comparison.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{ActionCatalog, Scenario};
use crate::types::{AdvisorVariant, ScenarioId};

pub const NOISE_TEXT: &str = "Noise";
pub const NO_ANALYSIS_TEXT: &str = "No detailed assessment available.";
pub const NO_ACTION_TEXT: &str = "No corrective action needed.";

/// Content of both panel blocks for one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorPanel {
    pub scenario_id: ScenarioId,
    pub analysis: String,
    /// Display text of each recommended action, one per active cause.
    pub recommendations: Vec<String>,
    /// Recommendations joined for copying, or the no-action text.
    pub recommendation_text: String,
    pub noise_analysis: String,
    pub noise_recommendation: String,
}

impl AdvisorPanel {
    /// Text placed in the assessment box by the copy button of a block.
    pub fn copy_text(&self, variant: AdvisorVariant) -> String {
        let (analysis, recommendation) = match variant {
            AdvisorVariant::Real => (&self.analysis, &self.recommendation_text),
            AdvisorVariant::Noise => (&self.noise_analysis, &self.noise_recommendation),
        };
        format!("{}\n\nRecommended Action: {}", analysis, recommendation)
            .trim()
            .to_string()
    }
}

/// Source of AI panel content. Read-only and keyed by scenario.
pub trait Advisor {
    /// Raw analysis text for a scenario, if one was written.
    fn analysis(&self, id: ScenarioId) -> Option<&str>;

    fn noise(&self) -> &str {
        NOISE_TEXT
    }

    fn panel(&self, scenario: &Scenario, actions: &ActionCatalog) -> AdvisorPanel {
        let recommendations: Vec<String> = scenario
            .causes
            .iter()
            .filter_map(|cause| actions.fixing(cause))
            .map(|a| a.text.clone())
            .collect();
        let recommendation_text = if recommendations.is_empty() {
            NO_ACTION_TEXT.to_string()
        } else {
            recommendations.join("; ")
        };
        AdvisorPanel {
            scenario_id: scenario.id,
            analysis: self.analysis(scenario.id).unwrap_or(NO_ANALYSIS_TEXT).to_string(),
            recommendations,
            recommendation_text,
            noise_analysis: self.noise().to_string(),
            noise_recommendation: self.noise().to_string(),
        }
    }
}

/// The shipped lookup table.
#[derive(Debug, Clone)]
pub struct StaticAdvisor {
    assessments: HashMap<ScenarioId, &'static str>,
}

impl Default for StaticAdvisor {
    fn default() -> Self {
        let assessments = ASSESSMENTS
            .iter()
            .map(|&(id, text)| (ScenarioId(id), text))
            .collect();
        Self { assessments }
    }
}

impl StaticAdvisor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Advisor for StaticAdvisor {
    fn analysis(&self, id: ScenarioId) -> Option<&str> {
        self.assessments.get(&id).copied()
    }
}

const ASSESSMENTS: &[(u32, &str)] = &[
    (1, "All sensors report normal readings within their ideal fermentation ranges. The process appears stable and healthy."),
    (2, "Wort Temp: High (25.5°C). CO2: Very High. SG: Dropping normally. High temp accelerates fermentation but produces off-flavors."),
    (3, "SG: High (1.045). CO2: Very Low. Wort Temp: Low side. Hints at unhealthy yeast that's failing to start fermentation."),
    (4, "CO2: Active. SG: Dropping. But Wort Temp is slightly high and pH is dropping faster than expected? Check for Oxygen ingress."),
    (5, "pH: Significant, continuous drop, reaching unusually low levels (souring). SG: Dropped too low, indicating over-attenuation, likely by a non-yeast microbe. CO2: Low activity, suggesting the primary yeast culture is struggling or outcompeted. This pattern strongly indicates a sanitation failure and bacterial contamination."),
    (6, "Extremely slow or no SG drop, indicating fermentation is stuck. CO2 activity is almost zero. Wort temp is too high, which stresses the yeast. This combination points to a failure in both temperature control and a severely underperforming or unhealthy yeast pitch."),
    (7, "Wort Temp: High. CO2: Very High. Fast fermentation, but likely oxidizing due to agitation or leaks."),
    (8, "Wort Temp: High. pH: Very Low (Acidic). SG: Very Low. High temp encouraged bacterial growth (Lactobacillus?)."),
    (9, "SG: High (stuck). pH: High (no acid production). Yeast isn't working, and oxygen might be stalling it."),
    (10, "SG: Slow drop. pH: Low. Sanitation failed, and the weak yeast couldn't outcompete the bacteria."),
    (11, "SG: Slow drop. CO2: Barely active. pH: Low. Wort Temp is fine, but weak yeast, oxygen ingress and bacteria are all at work."),
    (12, "pH: Very Low. CO2: Moderate. Oxygen leak might be fueling acetobacter or other aerobic bacteria."),
    (13, "SG: High. Temp: High. Yeast won't start despite the heat. Oxygen might be confusing the yeast phase."),
    (14, "Total collapse. High Temp + Bad Yeast + bacteria taking over. pH is crashing."),
    (15, "High Temp + Oxygen + Bacteria. This is making vinegar, not beer."),
    (16, "All systems failing. High Temp, Bad Yeast, Oxygen leak, and Infection. Dump it."),
];
