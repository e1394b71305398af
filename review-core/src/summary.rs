//! View-model for the deviation / risk summary modal.
//!
//! Three classifications live side by side here and are never reconciled:
//! the project's own `risk_level`, the band derived from the weighted score,
//! and the per-clause bar tier derived from each clause score.

use crate::model::{ClauseDeviation, RiskLevel};
use serde::{Deserialize, Serialize};

pub const MEDIUM_BAND_FLOOR: f64 = 1.0;
pub const HIGH_BAND_FLOOR: f64 = 3.0;
pub const MEDIUM_TIER_SCORE: f64 = 3.0;
pub const HIGH_TIER_SCORE: f64 = 6.0;

pub fn format_deviation_count(n: usize) -> String {
    match n {
        0 => "No deviations".to_string(),
        1 => "1 deviation".to_string(),
        n => format!("{n} deviations"),
    }
}

/// Display band for a project's weighted score.
pub fn risk_band(total_weighted_score: f64) -> &'static str {
    if total_weighted_score < MEDIUM_BAND_FLOOR {
        "Low: 0–1"
    } else if total_weighted_score < HIGH_BAND_FLOOR {
        "Medium: 1–3"
    } else {
        "High: 3+"
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTier {
    Low,
    Medium,
    High,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_TIER_SCORE {
            ScoreTier::High
        } else if score >= MEDIUM_TIER_SCORE {
            ScoreTier::Medium
        } else {
            ScoreTier::Low
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreTier::Low => "bar-low",
            ScoreTier::Medium => "bar-medium",
            ScoreTier::High => "bar-high",
        }
    }
}

/// Sum of clause scores, floored at 1 so an empty list never divides by zero.
pub fn total_score(deviations: &[ClauseDeviation]) -> f64 {
    deviations.iter().map(|d| d.score).sum::<f64>().max(1.0)
}

pub fn bar_width_percent(score: f64, total_score: f64) -> f64 {
    (score / total_score * 100.0).min(100.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct DistributionRow {
    pub clause: String,
    pub score: f64,
    pub width_percent: f64,
    pub tier: ScoreTier,
}

impl DistributionRow {
    pub fn width_style(&self) -> String {
        format!("width: {:.2}%", self.width_percent)
    }
}

/// Filter chips above the deviation list. They narrow the rows shown in the
/// modal only; bar widths stay normalised against every clause.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChipFilter {
    #[default]
    All,
    Level(RiskLevel),
}

impl ChipFilter {
    pub const CHIPS: [ChipFilter; 4] = [
        ChipFilter::All,
        ChipFilter::Level(RiskLevel::High),
        ChipFilter::Level(RiskLevel::Medium),
        ChipFilter::Level(RiskLevel::Low),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChipFilter::All => "All",
            ChipFilter::Level(level) => level.as_str(),
        }
    }

    pub fn accepts(&self, deviation: &ClauseDeviation) -> bool {
        match self {
            ChipFilter::All => true,
            ChipFilter::Level(level) => deviation.risk_level == *level,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RiskSummary {
    pub risk_level: RiskLevel,
    pub total_weighted_score: f64,
    pub risk_band: &'static str,
    pub total_score: f64,
    pub distribution: Vec<DistributionRow>,
    pub deviations: Vec<ClauseDeviation>,
    pub count_label: String,
}

impl RiskSummary {
    pub fn build(
        deviations: &[ClauseDeviation],
        risk_level: RiskLevel,
        total_weighted_score: f64,
        chip: ChipFilter,
    ) -> Self {
        let total = total_score(deviations);
        let distribution = deviations
            .iter()
            .map(|d| DistributionRow {
                clause: d.clause.clone(),
                score: d.score,
                width_percent: bar_width_percent(d.score, total),
                tier: ScoreTier::from_score(d.score),
            })
            .collect();
        let shown: Vec<ClauseDeviation> = deviations
            .iter()
            .filter(|d| chip.accepts(d))
            .cloned()
            .collect();
        let count_label = format_deviation_count(shown.len());
        Self {
            risk_level,
            total_weighted_score,
            risk_band: risk_band(total_weighted_score),
            total_score: total,
            distribution,
            deviations: shown,
            count_label,
        }
    }
}
