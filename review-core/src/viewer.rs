//! Document viewer lifecycle.
//!
//! ```text
//! Closed --open(url)--> Loading --complete--> Rendered | Fallback
//!   ^                                                    |
//!   +------------------------ close ---------------------+
//! ```
//!
//! Each `open` hands out a [`LoadTicket`]. A result is only applied when its
//! ticket is still current, so a response that lands after the viewer was
//! closed or re-opened is dropped instead of rendered.

use crate::fetch::{DocumentFetcher, FetchError};
use crate::render::{render_docx, RenderError, RenderedDocument};
use thiserror::Error;

pub const FALLBACK_NOTICE: &str = "Unable to preview this document.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewerState {
    Closed,
    Loading { url: String },
    Rendered { url: String, document: RenderedDocument },
    Fallback { url: String, reason: String },
}

impl ViewerState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ViewerState::Closed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    Rendered,
    Fallback,
    Stale,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentViewer {
    state: ViewerState,
    generation: u64,
}

impl Default for DocumentViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentViewer {
    pub fn new() -> Self {
        Self {
            state: ViewerState::Closed,
            generation: 0,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Starts a load. Returns `None` when there is nothing to fetch; the
    /// viewer then shows the fallback notice straight away.
    pub fn open(&mut self, url: &str) -> Option<LoadTicket> {
        self.generation += 1;
        let url = url.trim();
        if url.is_empty() {
            tracing::warn!("document viewer opened without a url");
            self.state = ViewerState::Fallback {
                url: String::new(),
                reason: FetchError::MissingUrl.to_string(),
            };
            return None;
        }
        tracing::debug!(url, generation = self.generation, "loading document");
        self.state = ViewerState::Loading { url: url.to_string() };
        Some(LoadTicket {
            generation: self.generation,
        })
    }

    /// Always succeeds, whatever is in flight.
    pub fn close(&mut self) {
        self.generation += 1;
        self.state = ViewerState::Closed;
    }

    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<RenderedDocument, LoadError>,
    ) -> Applied {
        let url = match &self.state {
            ViewerState::Loading { url } if ticket.generation == self.generation => url.clone(),
            _ => {
                tracing::debug!(
                    ticket = ticket.generation,
                    current = self.generation,
                    "discarding stale document load"
                );
                return Applied::Stale;
            }
        };
        match result {
            Ok(document) => {
                self.state = ViewerState::Rendered { url, document };
                Applied::Rendered
            }
            Err(err) => {
                tracing::warn!(%url, error = %err, "document preview failed");
                self.state = ViewerState::Fallback {
                    url,
                    reason: err.to_string(),
                };
                Applied::Fallback
            }
        }
    }
}

/// Fetches and renders the document for `url`; never panics or bubbles an
/// error, failures come back as [`LoadError`].
pub async fn fetch_and_render<F: DocumentFetcher>(
    fetcher: &F,
    url: &str,
) -> Result<RenderedDocument, LoadError> {
    let bytes = fetcher.fetch(url).await?;
    Ok(render_docx(&bytes)?)
}

/// Drives a full load for an already-opened viewer.
pub async fn load_document<F: DocumentFetcher>(
    viewer: &mut DocumentViewer,
    fetcher: &F,
    ticket: LoadTicket,
    url: &str,
) -> Applied {
    let result = fetch_and_render(fetcher, url).await;
    viewer.complete(ticket, result)
}
