// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fermentation Troubleshooting Game ("The Cellar") - Type Definitions

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

// ─── Cause ───────────────────────────────────────────────────────────────────

/// Root cause tag. A scenario exhibits any subset of these.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Cause {
    C1 = 0, // temperature control
    C2 = 1, // yeast health
    C3 = 2, // oxygen exposure
    C4 = 3, // sanitation
}

impl Cause {
    pub const ALL: [Cause; 4] = [Cause::C1, Cause::C2, Cause::C3, Cause::C4];

    pub fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", *self as u8 + 1)
    }
}

// ─── CauseSet ────────────────────────────────────────────────────────────────

/// Subset of the cause universe, stored as a 4-bit mask.
///
/// The mask is the canonical key of the scenario catalog: two cause sets are
/// equal exactly when they contain the same members, regardless of the order
/// they were listed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Cause>", from = "Vec<Cause>")]
pub struct CauseSet(u8);

impl CauseSet {
    pub const EMPTY: CauseSet = CauseSet(0);
    pub const FULL: CauseSet = CauseSet(0b1111);
    /// Number of distinct cause subsets, the empty set included.
    pub const SUBSET_COUNT: usize = 16;

    pub fn from_causes(causes: &[Cause]) -> Self {
        Self(causes.iter().fold(0, |mask, c| mask | c.bit()))
    }

    /// Build from a raw mask. Bits above the four-cause universe are rejected.
    pub fn from_mask(mask: u8) -> Option<Self> {
        (mask <= Self::FULL.0).then_some(Self(mask))
    }

    pub fn mask(&self) -> u8 {
        self.0
    }

    pub fn contains(&self, cause: Cause) -> bool {
        self.0 & cause.bit() != 0
    }

    pub fn without(&self, cause: Cause) -> Self {
        Self(self.0 & !cause.bit())
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Members in canonical order (C1 first).
    pub fn iter(&self) -> impl Iterator<Item = Cause> + '_ {
        Cause::ALL.into_iter().filter(move |c| self.contains(*c))
    }

    /// Every subset of the universe, empty set first.
    pub fn all_subsets() -> impl Iterator<Item = CauseSet> {
        (0..Self::SUBSET_COUNT as u8).map(CauseSet)
    }
}

impl From<Vec<Cause>> for CauseSet {
    fn from(causes: Vec<Cause>) -> Self {
        Self::from_causes(&causes)
    }
}

impl From<CauseSet> for Vec<Cause> {
    fn from(set: CauseSet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Display for CauseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, cause) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cause)?;
        }
        write!(f, "}}")
    }
}

// ─── ScenarioId ──────────────────────────────────────────────────────────────

/// Opaque scenario key. Numeric only because the shipped catalog is numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(pub u32);

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── ActionId ────────────────────────────────────────────────────────────────

/// Player-selectable corrective action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    FixTemp,
    PitchYeast,
    ManageOxygen,
    Sterilize,
}

impl ActionId {
    pub const ALL: [ActionId; 4] = [
        ActionId::FixTemp,
        ActionId::PitchYeast,
        ActionId::ManageOxygen,
        ActionId::Sterilize,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FixTemp => "fix_temp",
            Self::PitchYeast => "pitch_yeast",
            Self::ManageOxygen => "manage_oxygen",
            Self::Sterilize => "sterilize",
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action id: {0}")]
pub struct UnknownActionId(pub String);

impl FromStr for ActionId {
    type Err = UnknownActionId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownActionId(s.to_string()))
    }
}

// ─── Sensor Channels ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SensorChannel {
    #[serde(rename = "sg")]
    Sg,
    #[serde(rename = "wortTemp")]
    WortTemp,
    #[serde(rename = "co2Activity")]
    Co2Activity,
    #[serde(rename = "ph")]
    Ph,
}

impl SensorChannel {
    pub const ALL: [SensorChannel; 4] = [
        SensorChannel::Sg,
        SensorChannel::WortTemp,
        SensorChannel::Co2Activity,
        SensorChannel::Ph,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Sg => "sg",
            Self::WortTemp => "wortTemp",
            Self::Co2Activity => "co2Activity",
            Self::Ph => "ph",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sg => "SG",
            Self::WortTemp => "Wort Temp",
            Self::Co2Activity => "CO2 Activity",
            Self::Ph => "pH",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::Sg | Self::Ph => "",
            Self::WortTemp => "°C",
            Self::Co2Activity => "b/min",
        }
    }

    /// Display bounds of the graph axis (min, max).
    pub fn bounds(&self) -> (Decimal, Decimal) {
        match self {
            Self::Sg => (dec!(0.990), dec!(1.060)),
            Self::WortTemp => (dec!(10), dec!(30)),
            Self::Co2Activity => (dec!(0), dec!(50)),
            Self::Ph => (dec!(3.0), dec!(6.0)),
        }
    }

    /// Healthy fermentation band (low, high), inclusive.
    pub fn normal_band(&self) -> (Decimal, Decimal) {
        match self {
            Self::Sg => (dec!(1.020), dec!(1.035)),
            Self::WortTemp => (dec!(19.5), dec!(20.5)),
            Self::Co2Activity => (dec!(15), dec!(25)),
            Self::Ph => (dec!(4.4), dec!(4.6)),
        }
    }

    /// Decimal places used when a reading is shown.
    pub fn precision(&self) -> u32 {
        match self {
            Self::Sg => 3,
            Self::Ph => 2,
            Self::WortTemp | Self::Co2Activity => 1,
        }
    }

    pub fn line_color(&self) -> &'static str {
        match self {
            Self::Sg => "#E63946",
            Self::WortTemp => "#457B9D",
            Self::Co2Activity => "#A8DADC",
            Self::Ph => "#1D3557",
        }
    }

    pub fn is_normal(&self, reading: Decimal) -> bool {
        let (low, high) = self.normal_band();
        reading >= low && reading <= high
    }

    /// Reading rounded to the channel's display precision, e.g. `1.025`, `25.5`.
    pub fn format_reading(&self, reading: Decimal) -> String {
        let precision = self.precision();
        format!("{:.*}", precision as usize, reading.round_dp(precision))
    }
}

// ─── SensorReadings ──────────────────────────────────────────────────────────

/// One batch worth of readings, one value per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReadings {
    pub sg: Decimal,
    pub wort_temp: Decimal,
    pub co2_activity: Decimal,
    pub ph: Decimal,
}

// ─── DifficultyScore ─────────────────────────────────────────────────────────

/// Self-reported task difficulty, 1 (very easy) to 7 (very difficult).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DifficultyScore(u8);

impl DifficultyScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;

    pub fn new(score: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&score).then_some(Self(score))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DifficultyScore {
    type Error = String;

    fn try_from(score: u8) -> Result<Self, Self::Error> {
        Self::new(score).ok_or_else(|| {
            format!(
                "difficulty must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                score
            )
        })
    }
}

impl From<DifficultyScore> for u8 {
    fn from(score: DifficultyScore) -> Self {
        score.0
    }
}

// ─── GameState ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum TutorialStep {
    Welcome = 1,
    AllGood = 2,
    Sanitation = 3,
}

impl TutorialStep {
    pub fn number(&self) -> u8 {
        *self as u8
    }
}

/// Session mode. Transitions only move forward:
/// `TUTORIAL.1 → TUTORIAL.2 → TUTORIAL.3 → GAME`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", content = "step", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    Tutorial(TutorialStep),
    Game,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::Tutorial(TutorialStep::Welcome)
    }
}

impl GameState {
    pub fn is_tutorial(&self) -> bool {
        matches!(self, Self::Tutorial(_))
    }

    /// Whether the AI panel and action buttons are part of this state.
    pub fn offers_ai_panel(&self) -> bool {
        matches!(self, Self::Tutorial(TutorialStep::Sanitation) | Self::Game)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tutorial(step) => write!(f, "TUTORIAL.{}", step.number()),
            Self::Game => write!(f, "GAME"),
        }
    }
}

// ─── Advisor Variant ─────────────────────────────────────────────────────────

/// Which AI panel block a copy request targets: the real analysis (A) or the
/// placebo comparison text (B).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AdvisorVariant {
    Real,
    Noise,
}

// ─── Host Clock ──────────────────────────────────────────────────────────────

/// Wall-clock reading supplied by the host, in epoch milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millis(pub u64);

impl Millis {
    /// From a JS `Date.now()` value. NaN and negatives read as zero.
    pub fn from_f64(millis: f64) -> Self {
        if millis.is_finite() && millis > 0.0 {
            Millis(millis as u64)
        } else {
            Millis(0)
        }
    }

    /// Seconds elapsed since `earlier`, to two decimals. Zero if the clock
    /// went backwards.
    pub fn seconds_since(self, earlier: Millis) -> Decimal {
        (Decimal::from(self.0.saturating_sub(earlier.0)) / dec!(1000)).round_dp(2)
    }
}
