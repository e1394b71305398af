use crate::bridge::BrowserFetcher;
use leptos::logging::warn;
use leptos::*;
use review_core::dashboard::Dashboard;
use review_core::model::DocumentSide;
use review_core::render::Block;
use review_core::summary::ChipFilter;
use review_core::viewer::{fetch_and_render, Applied, DocumentViewer, ViewerState, FALLBACK_NOTICE};
use wasm_bindgen_futures::spawn_local;

fn render_block(block: &Block) -> View {
    match block {
        Block::Heading { level: 1, text } => view! { <h1>{text.clone()}</h1> }.into_view(),
        Block::Heading { level: 2, text } => view! { <h2>{text.clone()}</h2> }.into_view(),
        Block::Heading { text, .. } => view! { <h3>{text.clone()}</h3> }.into_view(),
        Block::Paragraph(text) => view! { <p>{text.clone()}</p> }.into_view(),
    }
}

#[component]
pub fn DocumentViewerModal(dashboard: RwSignal<Dashboard>, side: DocumentSide) -> impl IntoView {
    let viewer = create_rw_signal(DocumentViewer::new());

    // Url to show while this side's modal is open.
    let target = create_memo(move |_| {
        dashboard.with(|d| {
            d.modals()
                .document(side)
                .then(|| d.document_url(side).unwrap_or_default())
        })
    });

    create_effect(move |_| {
        let Some(url) = target.get() else {
            viewer.update(DocumentViewer::close);
            return;
        };
        let Some(ticket) = viewer.try_update(|v| v.open(&url)).flatten() else {
            return;
        };
        spawn_local(async move {
            let result = fetch_and_render(&BrowserFetcher, &url).await;
            let applied = viewer.try_update(|v| v.complete(ticket, result));
            if applied == Some(Applied::Fallback) {
                warn!("preview failed for {url}");
            }
        });
    });

    let title = move || {
        dashboard.with(|d| {
            d.selected()
                .map(|p| p.document(side).title.clone())
                .unwrap_or_default()
        })
    };

    let content = move || {
        viewer.with(|v| match v.state() {
            ViewerState::Closed => ().into_view(),
            ViewerState::Loading { .. } => {
                view! { <p class="loading">"Loading document…"</p> }.into_view()
            }
            ViewerState::Rendered { document, .. } => {
                document.blocks.iter().map(render_block).collect_view()
            }
            ViewerState::Fallback { .. } => {
                view! { <p class="fallback">{FALLBACK_NOTICE}</p> }.into_view()
            }
        })
    };

    view! {
      <Show when=move || target.with(Option::is_some) fallback=|| ()>
        <div class="modal-backdrop">
          <div class="modal document-modal">
            <header class="modal-header">
              <h3>{side.label()} ": " {title}</h3>
              <button class="close" on:click=move |_| dashboard.update(|d| d.close_document(side))>
                "×"
              </button>
            </header>
            <div class="document-content">{content}</div>
          </div>
        </div>
      </Show>
    }
}

#[component]
pub fn RiskSummaryModal(dashboard: RwSignal<Dashboard>) -> impl IntoView {
    let open = move || dashboard.with(|d| d.modals().risk_summary);
    let summary = create_memo(move |_| dashboard.with(|d| d.risk_summary()));
    let project_name = move || {
        dashboard.with(|d| d.selected().map(|p| p.project_name.clone()).unwrap_or_default())
    };

    let header = move || {
        summary.get().map(|s| {
            view! {
              <div class="summary-header">
                <span class=format!("badge {}", s.risk_level.css_class())>
                  {format!("{} Risk", s.risk_level)}
                </span>
                <span class="score">{format!("Weighted score: {:.1}", s.total_weighted_score)}</span>
                <span class="band">{s.risk_band}</span>
              </div>
            }
        })
    };

    let chips = move || {
        ChipFilter::CHIPS
            .into_iter()
            .map(|chip| {
                let active = move || dashboard.with(|d| d.chip() == chip);
                view! {
                  <button class="chip" class:active=active on:click=move |_| dashboard.update(|d| d.set_chip(chip))>
                    {chip.label()}
                  </button>
                }
            })
            .collect_view()
    };

    let distribution = move || {
        summary
            .get()
            .map(|s| s.distribution)
            .unwrap_or_default()
            .into_iter()
            .map(|row| {
                view! {
                  <div class="distribution-row">
                    <span class="clause">{row.clause.clone()}</span>
                    <div class="bar-track">
                      <div class=format!("bar {}", row.tier.css_class()) style={row.width_style()}></div>
                    </div>
                    <span class="score">{format!("{:.1}", row.score)}</span>
                  </div>
                }
            })
            .collect_view()
    };

    let deviations = move || {
        summary
            .get()
            .map(|s| s.deviations)
            .unwrap_or_default()
            .into_iter()
            .map(|d| {
                view! {
                  <article class="deviation">
                    <header>
                      <b>{d.clause.clone()}</b>
                      " "
                      <span class=format!("badge {}", d.risk_level.css_class())>{d.risk_level.as_str()}</span>
                      <span class="meta">{format!("score {:.1}", d.score)}</span>
                    </header>
                    <div class="texts">
                      <div><h4>"Baseline"</h4><p>{d.baseline_text.clone()}</p></div>
                      <div><h4>"Supplier"</h4><p>{d.supplier_text.clone()}</p></div>
                    </div>
                    <p><b>"Deviation: "</b>{d.deviation_summary.clone()}</p>
                    <p><b>"Recommendation: "</b>{d.recommendation.clone()}</p>
                  </article>
                }
            })
            .collect_view()
    };

    view! {
      <Show when=open fallback=|| ()>
        <div class="modal-backdrop">
          <div class="modal summary-modal">
            <header class="modal-header">
              <h3>"Risk Summary: " {project_name}</h3>
              <button class="close" on:click=move |_| dashboard.update(|d| d.close_risk_summary())>
                "×"
              </button>
            </header>
            {header}
            <h4>"Risk Distribution"</h4>
            <div class="distribution">{distribution}</div>
            <div class="chips">{chips}</div>
            <p class="meta">{move || summary.get().map(|s| s.count_label).unwrap_or_default()}</p>
            <div class="deviations">{deviations}</div>
          </div>
        </div>
      </Show>
    }
}
