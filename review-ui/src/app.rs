use crate::bridge::BrowserFetcher;
use crate::modals::{DocumentViewerModal, RiskSummaryModal};
use leptos::*;
use review_core::dashboard::Dashboard;
use review_core::model::{DocumentSide, Project};
use review_core::source::{fetch_projects, PROJECTS_URL};
use review_core::summary::format_deviation_count;
use review_core::table::{ProjectTable, RiskFilter, SortKey, UserFilter, PAGE_SIZE_OPTIONS};
use review_core::time::format_timestamp;
use wasm_bindgen_futures::spawn_local;

const COLUMN_COUNT: usize = 9;

#[component]
pub fn App() -> impl IntoView {
    let dashboard = create_rw_signal(Dashboard::new(ProjectTable::new(Vec::new())));
    let loading = create_rw_signal(true);
    let error = create_rw_signal(None::<String>);

    spawn_local(async move {
        let loaded = fetch_projects(&BrowserFetcher, PROJECTS_URL)
            .await
            .and_then(|source| Dashboard::load(&source));
        match loaded {
            Ok(d) => {
                logging::log!("loaded {} projects", d.table.projects().len());
                dashboard.set(d);
            }
            Err(e) => {
                logging::error!("failed to load projects: {e}");
                error.set(Some(e.to_string()));
            }
        }
        loading.set(false);
    });

    view! {
      <div class="dashboard">
        <h1>"Contract Comparison Projects"</h1>
        <Filters dashboard=dashboard/>
        <Show when=move || loading.get() fallback=|| ()>
          <p class="loading">"Loading projects…"</p>
        </Show>
        <ProjectTableView dashboard=dashboard/>
        <Pagination dashboard=dashboard/>
        <DocumentViewerModal dashboard=dashboard side=DocumentSide::Supplier/>
        <DocumentViewerModal dashboard=dashboard side=DocumentSide::Baseline/>
        <RiskSummaryModal dashboard=dashboard/>
        <Show when=move || error.get().is_some() fallback=|| ()>
          <pre class="error">{move || error.get().unwrap_or_default()}</pre>
        </Show>
      </div>
    }
}

#[component]
fn Filters(dashboard: RwSignal<Dashboard>) -> impl IntoView {
    let usernames = create_memo(move |_| dashboard.with(|d| d.table.usernames()));
    let users = move || {
        usernames
            .get()
            .into_iter()
            .map(|user| {
                let name = user.clone();
                let selected = move || dashboard.with(|d| d.table.filters().user.value() == name);
                view! { <option value={user.clone()} selected=selected>{user}</option> }
            })
            .collect_view()
    };

    view! {
      <div class="filters">
        <input
          type="search"
          placeholder="Search user or project"
          prop:value=move || dashboard.with(|d| d.table.filters().search.clone())
          on:input=move |ev| {
              let term = event_target_value(&ev);
              dashboard.update(|d| d.table.set_search(term));
          }
        />
        <select on:change=move |ev| {
            let risk = RiskFilter::parse(&event_target_value(&ev));
            dashboard.update(|d| d.table.set_risk_filter(risk));
        }>
          {["All", "High", "Medium", "Low"]
              .into_iter()
              .map(|value| {
                  let selected = move || dashboard.with(|d| d.table.filters().risk.value() == value);
                  view! { <option value=value selected=selected>{value}</option> }
              })
              .collect_view()}
        </select>
        <select on:change=move |ev| {
            let user = UserFilter::parse(&event_target_value(&ev));
            dashboard.update(|d| d.table.set_user_filter(user));
        }>
          <option value="All">"All users"</option>
          {users}
        </select>
      </div>
    }
}

#[component]
fn SortHeader(dashboard: RwSignal<Dashboard>, sort_key: SortKey) -> impl IntoView {
    let indicator = move || {
        dashboard.with(|d| {
            let sort = d.table.sort();
            if sort.key == sort_key {
                sort.direction.arrow()
            } else {
                ""
            }
        })
    };

    view! {
      <th class="sortable" on:click=move |_| dashboard.update(|d| d.table.toggle_sort(sort_key))>
        {sort_key.label()} " " {indicator}
      </th>
    }
}

#[component]
fn ProjectTableView(dashboard: RwSignal<Dashboard>) -> impl IntoView {
    let page = create_memo(move |_| dashboard.with(|d| d.table.page_view()));

    let rows = move || {
        let rows = page.get().rows;
        if rows.is_empty() {
            view! {
              <tr>
                <td colspan={COLUMN_COUNT.to_string()} class="empty">"No matching projects"</td>
              </tr>
            }
            .into_view()
        } else {
            rows.into_iter()
                .map(|project| view! { <ProjectRow dashboard=dashboard project=project/> })
                .collect_view()
        }
    };

    view! {
      <table class="projects">
        <thead>
          <tr>
            <th>"Project"</th>
            <th>"User"</th>
            <th>"Risk"</th>
            <SortHeader dashboard=dashboard sort_key=SortKey::TotalWeightedScore/>
            <th>"Deviations"</th>
            <SortHeader dashboard=dashboard sort_key=SortKey::CreatedAt/>
            <SortHeader dashboard=dashboard sort_key=SortKey::UpdatedAt/>
            <th>"Documents"</th>
            <th>"Actions"</th>
          </tr>
        </thead>
        <tbody>{rows}</tbody>
      </table>
    }
}

#[component]
fn ProjectRow(dashboard: RwSignal<Dashboard>, project: Project) -> impl IntoView {
    let id = project.id.clone();
    let is_selected = {
        let id = id.clone();
        move || dashboard.with(|d| d.selected().is_some_and(|p| p.id == id))
    };
    let select = {
        let id = id.clone();
        move |_: ev::MouseEvent| dashboard.update(|d| d.select_row(&id))
    };
    let open_doc = move |side: DocumentSide| {
        let id = id.clone();
        move |ev: ev::MouseEvent| {
            ev.prevent_default();
            ev.stop_propagation();
            dashboard.update(|d| d.open_document(&id, side));
        }
    };
    let open_summary = {
        let id = project.id.clone();
        move |ev: ev::MouseEvent| {
            ev.stop_propagation();
            dashboard.update(|d| d.open_risk_summary(&id));
        }
    };

    view! {
      <tr class="project-row" class:selected=is_selected on:click=select>
        <td>{project.project_name.clone()}</td>
        <td>{project.username.clone()}</td>
        <td>
          <span class=format!("badge {}", project.risk_level.css_class())>
            {project.risk_level.as_str()}
          </span>
        </td>
        <td>{format!("{:.1}", project.total_weighted_score)}</td>
        <td>{format_deviation_count(project.deviations.len())}</td>
        <td>{format_timestamp(&project.created_at)}</td>
        <td>{format_timestamp(&project.updated_at)}</td>
        <td class="documents">
          <a href="#" on:click={open_doc(DocumentSide::Supplier)}>{project.supplier_doc.title.clone()}</a>
          <a href="#" on:click={open_doc(DocumentSide::Baseline)}>{project.baseline_doc.title.clone()}</a>
        </td>
        <td>
          <button on:click=open_summary>"View Risk Summary"</button>
        </td>
      </tr>
    }
}

#[component]
fn Pagination(dashboard: RwSignal<Dashboard>) -> impl IntoView {
    let page = create_memo(move |_| dashboard.with(|d| d.table.page_view()));

    view! {
      <div class="pagination">
        <span class="meta">{move || page.with(|p| p.range_label())}</span>
        <button
          disabled=move || !page.with(|p| p.has_prev())
          on:click=move |_| dashboard.update(|d| d.table.prev_page())
        >
          "Previous"
        </button>
        <span>{move || page.with(|p| format!("Page {} of {}", p.page + 1, p.page_count))}</span>
        <button
          disabled=move || !page.with(|p| p.has_next())
          on:click=move |_| dashboard.update(|d| d.table.next_page())
        >
          "Next"
        </button>
        <select on:change=move |ev| {
            if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                dashboard.update(|d| d.table.set_page_size(size));
            }
        }>
          {PAGE_SIZE_OPTIONS
              .into_iter()
              .map(|size| {
                  let selected = move || dashboard.with(|d| d.table.page_size() == size);
                  view! { <option value={size.to_string()} selected=selected>{format!("{size} / page")}</option> }
              })
              .collect_view()}
        </select>
      </div>
    }
}
