//! Read-only access to comparison projects.
//!
//! The dashboard never reaches for module-level data: a [`ProjectSource`] is
//! handed to the table controller when it is built. [`SampleProjects`] stands in
//! until the analysis backend exposes its own listing.

use crate::fetch::DocumentFetcher;
use crate::model::{ClauseDeviation, DocumentRef, Project, RiskLevel};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid project json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate project id '{0}'")]
    DuplicateId(String),
    #[error("project '{project}' clause '{clause}' has invalid score {score}")]
    InvalidScore {
        project: String,
        clause: String,
        score: f64,
    },
    #[error("project source unavailable: {0}")]
    Unavailable(String),
}

pub trait ProjectSource {
    fn projects(&self) -> Result<Vec<Project>, SourceError>;
}

/// Checks the invariants every source must uphold before rows reach the table.
pub fn validate_projects(projects: &[Project]) -> Result<(), SourceError> {
    let mut seen = BTreeSet::new();
    for project in projects {
        if !seen.insert(project.id.as_str()) {
            return Err(SourceError::DuplicateId(project.id.clone()));
        }
        for deviation in &project.deviations {
            if !deviation.score.is_finite() || deviation.score < 0.0 {
                return Err(SourceError::InvalidScore {
                    project: project.id.clone(),
                    clause: deviation.clause.clone(),
                    score: deviation.score,
                });
            }
        }
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SampleProjects;

impl ProjectSource for SampleProjects {
    fn projects(&self) -> Result<Vec<Project>, SourceError> {
        let projects = sample_projects();
        validate_projects(&projects)?;
        Ok(projects)
    }
}

/// Projects delivered as a JSON array, e.g. the body of `GET /api/projects`.
#[derive(Clone, Debug)]
pub struct JsonProjects {
    raw: String,
}

impl JsonProjects {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

impl ProjectSource for JsonProjects {
    fn projects(&self) -> Result<Vec<Project>, SourceError> {
        let projects: Vec<Project> = serde_json::from_str(&self.raw)?;
        validate_projects(&projects)?;
        Ok(projects)
    }
}

pub const PROJECTS_URL: &str = "/api/projects";

/// Pulls the project listing over HTTP. Validation happens later, when the
/// table reads the returned source.
pub async fn fetch_projects(
    fetcher: &impl DocumentFetcher,
    url: &str,
) -> Result<JsonProjects, SourceError> {
    let bytes = fetcher
        .fetch(url)
        .await
        .map_err(|e| SourceError::Unavailable(e.to_string()))?;
    let raw = String::from_utf8(bytes).map_err(|e| SourceError::Unavailable(e.to_string()))?;
    tracing::debug!(%url, size = raw.len(), "fetched project listing");
    Ok(JsonProjects::new(raw))
}

fn deviation(
    clause: &str,
    baseline_text: &str,
    supplier_text: &str,
    deviation_summary: &str,
    risk_level: RiskLevel,
    recommendation: &str,
    score: f64,
) -> ClauseDeviation {
    ClauseDeviation {
        clause: clause.into(),
        baseline_text: baseline_text.into(),
        supplier_text: supplier_text.into(),
        deviation_summary: deviation_summary.into(),
        risk_level,
        recommendation: recommendation.into(),
        score,
    }
}

fn doc(title: &str, file: &str) -> DocumentRef {
    DocumentRef {
        title: title.into(),
        url: format!("/documents/{file}"),
    }
}

pub fn sample_projects() -> Vec<Project> {
    vec![
        Project {
            id: "1".into(),
            username: "john.doe".into(),
            project_name: "Cloud Hosting Services Agreement".into(),
            created_at: "2024-03-12T09:15:00Z".into(),
            updated_at: "2024-03-18T16:40:00Z".into(),
            risk_level: RiskLevel::Medium,
            total_weighted_score: 2.5,
            supplier_doc: doc("Supplier Cloud Hosting Agreement", "cloud-hosting-supplier.docx"),
            baseline_doc: doc("Standard Cloud Hosting Terms", "cloud-hosting-baseline.docx"),
            deviations: vec![
                deviation(
                    "Security",
                    "Supplier shall maintain ISO 27001 certification and notify Customer of any security incident within 24 hours.",
                    "Supplier will use commercially reasonable security measures and notify Customer of material incidents without undue delay.",
                    "Certification requirement removed and breach notification window left undefined.",
                    RiskLevel::High,
                    "Reinstate ISO 27001 certification and a fixed 24-hour notification window.",
                    6.0,
                ),
                deviation(
                    "Limitation of Liability",
                    "Liability is capped at 24 months of fees, excluding data protection breaches.",
                    "Liability is capped at 12 months of fees for all claims.",
                    "Cap halved and the data protection carve-out dropped.",
                    RiskLevel::Medium,
                    "Negotiate the cap back to 24 months and restore the carve-out.",
                    3.0,
                ),
                deviation(
                    "Termination",
                    "Customer may terminate for convenience on 30 days' notice.",
                    "Either party may terminate for convenience on 90 days' notice.",
                    "Notice period tripled for termination for convenience.",
                    RiskLevel::Medium,
                    "Accept 60 days as a compromise.",
                    3.0,
                ),
                deviation(
                    "Payment Terms",
                    "Invoices are payable within 45 days of receipt.",
                    "Invoices are payable within 30 days of receipt.",
                    "Payment window shortened by 15 days.",
                    RiskLevel::Low,
                    "Acceptable; align with finance payment runs.",
                    1.0,
                ),
            ],
        },
        Project {
            id: "2".into(),
            username: "jane.smith".into(),
            project_name: "Data Processing Addendum".into(),
            created_at: "2024-04-02T11:05:00Z".into(),
            updated_at: "2024-04-09T08:20:00Z".into(),
            risk_level: RiskLevel::High,
            total_weighted_score: 4.2,
            supplier_doc: doc("Supplier Data Processing Addendum", "dpa-supplier.docx"),
            baseline_doc: doc("Standard Data Processing Addendum", "dpa-baseline.docx"),
            deviations: vec![
                deviation(
                    "Sub-processors",
                    "Supplier shall obtain prior written consent before engaging any sub-processor.",
                    "Supplier may engage sub-processors and will publish a list on its website.",
                    "Prior consent replaced with passive publication.",
                    RiskLevel::High,
                    "Require prior notice with a right to object.",
                    7.0,
                ),
                deviation(
                    "Data Location",
                    "Personal data shall be stored and processed within the EEA.",
                    "Personal data may be processed in any country where Supplier operates.",
                    "Data residency restriction removed.",
                    RiskLevel::High,
                    "Restore EEA residency or require standard contractual clauses.",
                    6.5,
                ),
                deviation(
                    "Audit Rights",
                    "Customer may audit Supplier once per year on 30 days' notice.",
                    "Customer may review Supplier's third-party audit reports on request.",
                    "On-site audit right replaced by report review.",
                    RiskLevel::Medium,
                    "Keep report review but retain an on-site audit after any breach.",
                    3.5,
                ),
            ],
        },
        Project {
            id: "3".into(),
            username: "john.doe".into(),
            project_name: "Office Supplies Framework".into(),
            created_at: "2024-02-20T14:30:00Z".into(),
            updated_at: "2024-02-21T10:00:00Z".into(),
            risk_level: RiskLevel::Low,
            total_weighted_score: 0.6,
            supplier_doc: doc("Supplier Framework Agreement", "office-supplies-supplier.docx"),
            baseline_doc: doc("Standard Framework Agreement", "office-supplies-baseline.docx"),
            deviations: vec![deviation(
                "Delivery",
                "Orders shall be delivered within 3 business days.",
                "Orders shall be delivered within 5 business days.",
                "Delivery window extended by 2 business days.",
                RiskLevel::Low,
                "Acceptable for non-critical supplies.",
                0.5,
            )],
        },
    ]
}
