//! Browser `fetch` behind the core [`DocumentFetcher`] seam.

use js_sys::Uint8Array;
use review_core::fetch::{check_status, DocumentFetcher, FetchError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserFetcher;

impl DocumentFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = request(url).await.map_err(FetchError::Network)?;
        check_status(response.status())?;
        read_body(&response).await.map_err(FetchError::Body)
    }
}

async fn request(url: &str) -> Result<Response, String> {
    let window = web_sys::window().ok_or_else(|| "window not available".to_string())?;

    let opts = RequestInit::new();
    opts.set_method("GET");

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| format!("invalid request: {e:?}"))?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("fetch rejected: {e:?}"))?;
    value
        .dyn_into::<Response>()
        .map_err(|_| "fetch did not return a Response".to_string())
}

async fn read_body(response: &Response) -> Result<Vec<u8>, String> {
    let promise = response
        .array_buffer()
        .map_err(|e| format!("body unavailable: {e:?}"))?;
    let buffer = JsFuture::from(promise)
        .await
        .map_err(|e| format!("body read failed: {e:?}"))?;
    Ok(Uint8Array::new(&buffer).to_vec())
}
