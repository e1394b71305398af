use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk classification attached to a project or a single clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// CSS modifier used by the badge markup.
    pub fn css_class(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(RiskLevel::Low),
            "medium" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseDeviation {
    pub clause: String,
    pub baseline_text: String,
    pub supplier_text: String,
    pub deviation_summary: String,
    pub risk_level: RiskLevel,
    pub recommendation: String,
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub title: String,
    pub url: String,
}

/// One supplier-vs-baseline comparison run.
///
/// `risk_level` and `total_weighted_score` come from the analysis engine and
/// are never derived from `deviations` here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub username: String,
    pub project_name: String,
    pub created_at: String,
    pub updated_at: String,
    pub risk_level: RiskLevel,
    pub total_weighted_score: f64,
    pub supplier_doc: DocumentRef,
    pub baseline_doc: DocumentRef,
    #[serde(default)]
    pub deviations: Vec<ClauseDeviation>,
}

impl Project {
    pub fn document(&self, side: DocumentSide) -> &DocumentRef {
        match side {
            DocumentSide::Supplier => &self.supplier_doc,
            DocumentSide::Baseline => &self.baseline_doc,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentSide {
    Supplier,
    Baseline,
}

impl DocumentSide {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentSide::Supplier => "Supplier Document",
            DocumentSide::Baseline => "Baseline Document",
        }
    }
}
