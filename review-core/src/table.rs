//! Filter, sort and pagination state for the project table.
//!
//! [`ProjectTable`] owns the project list plus every piece of table UI state.
//! Setters that can shrink the filtered result re-clamp the current page
//! before returning, so callers never observe a page index past the end.

use crate::model::{Project, RiskLevel};
use crate::source::{ProjectSource, SourceError};
use crate::time::parse_timestamp;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 20];
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    CreatedAt,
    UpdatedAt,
    TotalWeightedScore,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::CreatedAt => "Created",
            SortKey::UpdatedAt => "Updated",
            SortKey::TotalWeightedScore => "Weighted Score",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    /// Same column flips direction; a new column starts descending.
    pub fn toggled(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                key,
                direction: SortDirection::Desc,
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFilter {
    #[default]
    All,
    Only(RiskLevel),
}

impl RiskFilter {
    pub fn parse(value: &str) -> Self {
        RiskLevel::parse(value).map_or(RiskFilter::All, RiskFilter::Only)
    }

    pub fn value(&self) -> &'static str {
        match self {
            RiskFilter::All => "All",
            RiskFilter::Only(level) => level.as_str(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserFilter {
    #[default]
    All,
    Only(String),
}

impl UserFilter {
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == "All" {
            UserFilter::All
        } else {
            UserFilter::Only(value.to_string())
        }
    }

    pub fn value(&self) -> &str {
        match self {
            UserFilter::All => "All",
            UserFilter::Only(user) => user,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filters {
    pub search: String,
    pub risk: RiskFilter,
    pub user: UserFilter,
}

impl Filters {
    pub fn matches(&self, project: &Project) -> bool {
        let search = self.search.to_lowercase();
        let search_ok = search.is_empty()
            || project.username.to_lowercase().contains(&search)
            || project.project_name.to_lowercase().contains(&search);
        let risk_ok = match &self.risk {
            RiskFilter::All => true,
            RiskFilter::Only(level) => project.risk_level == *level,
        };
        let user_ok = match &self.user {
            UserFilter::All => true,
            UserFilter::Only(user) => project.username == *user,
        };
        search_ok && risk_ok && user_ok
    }
}

/// Orders two projects by the given sort spec.
///
/// Dates that fail to parse compare as equal to everything, as do NaN scores.
/// Mixed with valid values that is not a total order, so rows are ordered by
/// [`stable_sort_by`] rather than `slice::sort_by`.
pub fn compare_projects(a: &Project, b: &Project, sort: SortSpec) -> Ordering {
    let ordering = match sort.key {
        SortKey::CreatedAt => compare_dates(&a.created_at, &b.created_at),
        SortKey::UpdatedAt => compare_dates(&a.updated_at, &b.updated_at),
        SortKey::TotalWeightedScore => a
            .total_weighted_score
            .partial_cmp(&b.total_weighted_score)
            .unwrap_or(Ordering::Equal),
    };
    match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

fn compare_dates(a: &str, b: &str) -> Ordering {
    match (parse_timestamp(a), parse_timestamp(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => Ordering::Equal,
    }
}

/// Stable insertion sort that only moves an element past a neighbour the
/// comparator reports as `Greater`. Never panics on an inconsistent ordering;
/// for a total order it matches `slice::sort_by`.
pub fn stable_sort_by<T>(rows: &mut [T], mut compare: impl FnMut(&T, &T) -> Ordering) {
    for i in 1..rows.len() {
        let mut j = i;
        while j > 0 && compare(&rows[j - 1], &rows[j]) == Ordering::Greater {
            rows.swap(j - 1, j);
            j -= 1;
        }
    }
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.min(page_count.saturating_sub(1))
}

/// One rendered page of the table.
#[derive(Clone, Debug, PartialEq)]
pub struct PageView {
    pub rows: Vec<Project>,
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
    /// 1-based inclusive range of the rows shown; `(0, 0)` when empty.
    pub first_row: usize,
    pub last_row: usize,
}

impl PageView {
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.page_count
    }

    pub fn range_label(&self) -> String {
        if self.total == 0 {
            "No results".to_string()
        } else {
            format!("Showing {}–{} of {}", self.first_row, self.last_row, self.total)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectTable {
    projects: Vec<Project>,
    filters: Filters,
    sort: SortSpec,
    page_size: usize,
    page: usize,
    selected: Option<String>,
}

impl ProjectTable {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            filters: Filters::default(),
            sort: SortSpec::default(),
            page_size: DEFAULT_PAGE_SIZE,
            page: 0,
            selected: None,
        }
    }

    pub fn from_source(source: &dyn ProjectSource) -> Result<Self, SourceError> {
        let projects = source.projects()?;
        tracing::debug!(count = projects.len(), "loaded projects");
        Ok(Self::new(projects))
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filters.search = term.into();
        self.clamp();
    }

    pub fn set_risk_filter(&mut self, risk: RiskFilter) {
        self.filters.risk = risk;
        self.clamp();
    }

    pub fn set_user_filter(&mut self, user: UserFilter) {
        self.filters.user = user;
        self.clamp();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.clamp();
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.clamp();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = self.sort.toggled(key);
        tracing::debug!(sort = ?self.sort, "sort changed");
    }

    pub fn select(&mut self, id: &str) {
        self.selected = Some(id.to_string());
    }

    /// Resolves the selection by id, defaulting to the first project.
    pub fn selected(&self) -> Option<&Project> {
        self.selected
            .as_deref()
            .and_then(|id| self.find(id))
            .or_else(|| self.projects.first())
    }

    pub fn find(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn usernames(&self) -> Vec<String> {
        self.projects
            .iter()
            .map(|p| p.username.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn filtered_sorted(&self) -> Vec<&Project> {
        let mut rows: Vec<&Project> = self
            .projects
            .iter()
            .filter(|p| self.filters.matches(p))
            .collect();
        stable_sort_by(&mut rows, |a, b| compare_projects(a, b, self.sort));
        rows
    }

    pub fn page_count(&self) -> usize {
        page_count(self.filtered_sorted().len(), self.page_size)
    }

    pub fn page_view(&self) -> PageView {
        let rows = self.filtered_sorted();
        let total = rows.len();
        let count = page_count(total, self.page_size);
        let page = clamp_page(self.page, count);
        let start = page * self.page_size;
        let visible: Vec<Project> = rows
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();
        let (first_row, last_row) = if visible.is_empty() {
            (0, 0)
        } else {
            (start + 1, start + visible.len())
        };
        PageView {
            rows: visible,
            page,
            page_count: count,
            total,
            first_row,
            last_row,
        }
    }

    fn clamp(&mut self) {
        let clamped = clamp_page(self.page, self.page_count());
        if clamped != self.page {
            tracing::debug!(from = self.page, to = clamped, "page index clamped");
            self.page = clamped;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{sample_projects, SampleProjects};

    fn table() -> ProjectTable {
        ProjectTable::from_source(&SampleProjects).expect("sample table")
    }

    fn ids(view: &PageView) -> Vec<&str> {
        view.rows.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn default_sort_is_created_descending() {
        let view = table().page_view();
        assert_eq!(ids(&view), vec!["2", "1", "3"]);
        assert_eq!(view.page_count, 1);
        assert_eq!(view.range_label(), "Showing 1–3 of 3");
    }

    #[test]
    fn high_risk_filter_returns_project_two() {
        let mut t = table();
        t.set_risk_filter(RiskFilter::Only(RiskLevel::High));
        assert_eq!(ids(&t.page_view()), vec!["2"]);

        t.set_search("data");
        assert_eq!(ids(&t.page_view()), vec!["2"]);
    }

    #[test]
    fn search_matches_username_or_project_name_case_insensitively() {
        let mut t = table();
        t.set_search("JOHN");
        let view = t.page_view();
        let mut found = ids(&view);
        found.sort();
        assert_eq!(found, vec!["1", "3"]);

        t.set_search("addendum");
        assert_eq!(ids(&t.page_view()), vec!["2"]);
    }

    #[test]
    fn filters_are_conjunctive() {
        let mut t = table();
        t.set_user_filter(UserFilter::Only("john.doe".into()));
        t.set_risk_filter(RiskFilter::Only(RiskLevel::Low));
        assert_eq!(ids(&t.page_view()), vec!["3"]);

        t.set_search("cloud");
        let view = t.page_view();
        assert!(view.rows.is_empty());
        assert_eq!(view.page_count, 1);
        assert_eq!(view.range_label(), "No results");
    }

    #[test]
    fn toggle_sort_flips_active_column_and_resets_new_column() {
        let mut t = table();
        t.toggle_sort(SortKey::CreatedAt);
        assert_eq!(
            t.sort(),
            SortSpec { key: SortKey::CreatedAt, direction: SortDirection::Asc }
        );
        assert_eq!(ids(&t.page_view()), vec!["3", "1", "2"]);

        t.toggle_sort(SortKey::TotalWeightedScore);
        assert_eq!(
            t.sort(),
            SortSpec { key: SortKey::TotalWeightedScore, direction: SortDirection::Desc }
        );
        assert_eq!(ids(&t.page_view()), vec!["2", "1", "3"]);
    }

    #[test]
    fn invalid_dates_compare_equal() {
        let mut projects = sample_projects();
        projects[0].updated_at = "not a date".into();
        let sort = SortSpec { key: SortKey::UpdatedAt, direction: SortDirection::Asc };
        assert_eq!(compare_projects(&projects[0], &projects[1], sort), Ordering::Equal);
        assert_eq!(compare_projects(&projects[1], &projects[0], sort), Ordering::Equal);
    }

    #[test]
    fn mixed_invalid_dates_and_nan_scores_sort_without_panicking() {
        let mut projects = Vec::new();
        for n in 0..40 {
            let mut p = sample_projects()[n % 3].clone();
            p.id = n.to_string();
            if n % 3 == 0 {
                p.created_at = "bogus".into();
            } else {
                p.created_at = format!("2024-01-{:02}T08:00:00Z", (n * 7) % 28 + 1);
            }
            if n % 4 == 0 {
                p.updated_at = "".into();
            }
            if n % 5 == 0 {
                p.total_weighted_score = f64::NAN;
            }
            projects.push(p);
        }
        let mut t = ProjectTable::new(projects);
        t.set_page_size(20);
        for key in [SortKey::CreatedAt, SortKey::UpdatedAt, SortKey::TotalWeightedScore] {
            for _ in 0..2 {
                t.toggle_sort(key);
                let mut seen: Vec<String> =
                    t.filtered_sorted().iter().map(|p| p.id.clone()).collect();
                seen.sort();
                seen.dedup();
                assert_eq!(seen.len(), 40);
                let view = t.page_view();
                assert_eq!(view.rows.len(), 20);
                assert_eq!(view.page_count, 2);
            }
        }
    }

    #[test]
    fn stable_sort_keeps_equal_rows_in_input_order() {
        let mut rows = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (0, 'e')];
        stable_sort_by(&mut rows, |a, b| a.0.cmp(&b.0));
        assert_eq!(rows, vec![(0, 'e'), (1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn whitespace_search_is_a_literal_term() {
        let mut t = table();
        t.set_search("  ");
        assert!(t.page_view().rows.is_empty());
        t.set_search(" ");
        assert_eq!(t.page_view().total, 3);
        t.set_search("");
        assert_eq!(t.page_view().total, 3);
    }

    #[test]
    fn page_index_is_clamped_when_results_shrink() {
        let mut projects = sample_projects();
        for n in 4..=12 {
            let mut extra = projects[2].clone();
            extra.id = n.to_string();
            extra.username = format!("user{n}");
            projects.push(extra);
        }
        let mut t = ProjectTable::new(projects);
        t.set_page_size(5);
        assert_eq!(t.page_count(), 3);
        t.set_page(2);
        assert_eq!(t.page(), 2);

        t.set_user_filter(UserFilter::Only("john.doe".into()));
        assert_eq!(t.page_count(), 1);
        assert_eq!(t.page(), 0);
    }

    #[test]
    fn page_size_change_clamps_and_navigation_stays_in_range() {
        let mut projects = sample_projects();
        projects.extend(sample_projects().into_iter().map(|mut p| {
            p.id = format!("{}b", p.id);
            p
        }));
        let mut t = ProjectTable::new(projects);
        t.set_page_size(2);
        t.next_page();
        t.next_page();
        t.next_page();
        assert_eq!(t.page(), 2);
        let view = t.page_view();
        assert_eq!(view.rows.len(), 2);
        assert!(!view.has_next());
        assert!(view.has_prev());

        t.set_page_size(20);
        assert_eq!(t.page(), 0);
        t.prev_page();
        assert_eq!(t.page(), 0);
    }

    #[test]
    fn selection_defaults_to_first_project() {
        let mut t = table();
        assert_eq!(t.selected().map(|p| p.id.as_str()), Some("1"));
        t.select("3");
        assert_eq!(t.selected().map(|p| p.id.as_str()), Some("3"));
        t.select("missing");
        assert_eq!(t.selected().map(|p| p.id.as_str()), Some("1"));
    }

    #[test]
    fn usernames_are_distinct_and_sorted() {
        assert_eq!(table().usernames(), vec!["jane.smith", "john.doe"]);
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let mut t = table();
        t.set_page_size(0);
        assert_eq!(t.page_size(), 1);
        assert_eq!(t.page_count(), 3);
    }

    #[test]
    fn filter_values_parse_from_select_options() {
        assert_eq!(RiskFilter::parse("All"), RiskFilter::All);
        assert_eq!(RiskFilter::parse("Medium"), RiskFilter::Only(RiskLevel::Medium));
        assert_eq!(UserFilter::parse("All"), UserFilter::All);
        assert_eq!(UserFilter::parse("jane.smith").value(), "jane.smith");
    }
}
