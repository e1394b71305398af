use proptest::prelude::*;
use review_core::model::{DocumentRef, Project, RiskLevel};
use review_core::summary::format_deviation_count;
use review_core::table::{page_count, ProjectTable, RiskFilter, SortKey, UserFilter};

fn risk_level() -> impl Strategy<Value = RiskLevel> {
    prop_oneof![
        Just(RiskLevel::Low),
        Just(RiskLevel::Medium),
        Just(RiskLevel::High),
    ]
}

fn project(id: usize) -> impl Strategy<Value = Project> {
    (
        "(alice|bob|carol)",
        "[A-Za-z ]{1,20}",
        1u32..=28,
        risk_level(),
        0.0f64..10.0,
    )
        .prop_map(move |(username, name, day, risk_level, score)| Project {
            id: id.to_string(),
            username,
            project_name: name,
            created_at: format!("2024-05-{day:02}T10:00:00Z"),
            updated_at: if day % 5 == 0 {
                "unknown".to_string()
            } else {
                format!("2024-06-{day:02}T10:00:00Z")
            },
            risk_level,
            total_weighted_score: score,
            supplier_doc: DocumentRef {
                title: "Supplier".into(),
                url: format!("/documents/{id}-supplier.docx"),
            },
            baseline_doc: DocumentRef {
                title: "Baseline".into(),
                url: format!("/documents/{id}-baseline.docx"),
            },
            deviations: Vec::new(),
        })
}

fn projects() -> impl Strategy<Value = Vec<Project>> {
    (0usize..40).prop_flat_map(|n| (0..n).map(project).collect::<Vec<_>>())
}

fn timestamp() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u32..=12, 1u32..=28).prop_map(|(m, d)| format!("2024-{m:02}-{d:02}T10:00:00Z")),
        Just("bogus".to_string()),
        Just(String::new()),
        Just("2024-13-45".to_string()),
    ]
}

fn score() -> impl Strategy<Value = f64> {
    prop_oneof![4 => 0.0f64..10.0, 1 => Just(f64::NAN)]
}

/// Rows where roughly half of the dates fail to parse.
fn messy_projects() -> impl Strategy<Value = Vec<Project>> {
    prop::collection::vec((project(0), timestamp(), timestamp(), score()), 0..150).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (mut p, created_at, updated_at, score))| {
                p.id = i.to_string();
                p.created_at = created_at;
                p.updated_at = updated_at;
                p.total_weighted_score = score;
                p
            })
            .collect()
    })
}

fn risk_filter() -> impl Strategy<Value = RiskFilter> {
    prop_oneof![Just(RiskFilter::All), risk_level().prop_map(RiskFilter::Only)]
}

fn user_filter() -> impl Strategy<Value = UserFilter> {
    prop_oneof![
        Just(UserFilter::All),
        "(alice|bob|carol|dave)".prop_map(UserFilter::Only),
    ]
}

fn sort_key() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::CreatedAt),
        Just(SortKey::UpdatedAt),
        Just(SortKey::TotalWeightedScore),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn deviation_count_label_matches_count(n in 0usize..10_000) {
        let label = format_deviation_count(n);
        match n {
            0 => prop_assert_eq!(label, "No deviations"),
            1 => prop_assert_eq!(label, "1 deviation"),
            n => prop_assert_eq!(label, format!("{n} deviations")),
        }
    }

    #[test]
    fn page_never_exceeds_page_size(
        projects in projects(),
        search in "(|a|o|xyz)",
        risk in risk_filter(),
        user in user_filter(),
        key in sort_key(),
        page_size in 1usize..12,
        page in 0usize..10,
    ) {
        let mut table = ProjectTable::new(projects);
        table.set_page_size(page_size);
        table.set_page(page);
        table.toggle_sort(key);
        table.set_search(search);
        table.set_risk_filter(risk);
        table.set_user_filter(user);

        let filtered = table.filtered_sorted().len();
        let view = table.page_view();
        prop_assert!(view.rows.len() <= page_size);
        prop_assert_eq!(view.page_count, page_count(filtered, page_size));
        prop_assert_eq!(view.page_count, std::cmp::max(1, filtered.div_ceil(page_size)));
        prop_assert!(table.page() < view.page_count);
        prop_assert_eq!(table.page(), view.page);
    }

    #[test]
    fn shrinking_filters_reclamp_to_last_page(
        projects in projects(),
        page_size in 1usize..6,
        user in "(alice|bob|carol|dave)",
    ) {
        let mut table = ProjectTable::new(projects);
        table.set_page_size(page_size);
        table.set_page(usize::MAX);
        let before = table.page_count();
        prop_assert_eq!(table.page(), before - 1);

        table.set_user_filter(UserFilter::Only(user));
        let after = table.page_count();
        prop_assert!(table.page() <= after - 1);
        if after < before {
            prop_assert_eq!(table.page(), after - 1);
        }
    }

    #[test]
    fn unparseable_dates_never_break_paging(
        projects in messy_projects(),
        key in sort_key(),
        flip in any::<bool>(),
        page_size in 1usize..25,
        page in 0usize..10,
    ) {
        let total = projects.len();
        let mut table = ProjectTable::new(projects);
        table.set_page_size(page_size);
        table.set_page(page);
        table.toggle_sort(key);
        if flip {
            table.toggle_sort(key);
        }

        let view = table.page_view();
        prop_assert_eq!(view.total, total);
        prop_assert!(view.rows.len() <= page_size);
        prop_assert_eq!(view.page_count, page_count(total, page_size));

        let mut ids: Vec<usize> = table
            .filtered_sorted()
            .iter()
            .map(|p| p.id.parse().expect("numeric id"))
            .collect();
        ids.sort_unstable();
        prop_assert_eq!(ids, (0..total).collect::<Vec<_>>());
    }

    #[test]
    fn sort_toggle_semantics(first in sort_key(), second in sort_key()) {
        let mut table = ProjectTable::new(Vec::new());
        table.toggle_sort(first);
        let after_first = table.sort();
        table.toggle_sort(first);
        prop_assert_eq!(table.sort().key, after_first.key);
        prop_assert_eq!(table.sort().direction, after_first.direction.flipped());

        if second != first {
            table.toggle_sort(second);
            prop_assert_eq!(table.sort().key, second);
            prop_assert_eq!(table.sort().direction, review_core::table::SortDirection::Desc);
        }
    }
}
