use axum::{
    extract::{Path, State},
    http::{header, uri::Authority, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Extension,
};
use shopmap_core::UrlEntry;
use shopmap_sitemap::{
    parse_page_index, plan, render_index, render_urlset, select_page, SitemapPlan,
};
use shopmap_storefront::{generate_sitemap_urls, FetchContext};

use super::{map_render_error, ApiError, AppState};
use crate::middleware::RequestId;

/// Browser/CDN cache lifetime for served sitemap documents.
const SITEMAP_CACHE_CONTROL: &str = "max-age=86400";
const SITEMAP_ROOT: &str = "/sitemap.xml";

/// `GET /sitemap.xml`: a single `urlset` when the merged list fits one chunk,
/// otherwise a `sitemapindex` pointing at `/sitemap/{n}.xml`.
pub(super) async fn sitemap_root(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, ApiError> {
    let base_url = request_base_url(&state, &headers, &uri);
    let entries = collect_entries(&state, &base_url).await;
    if entries.is_empty() {
        return Ok(no_data());
    }

    let xml = match plan(entries.len(), state.settings.chunk_size, &base_url) {
        SitemapPlan::Single => render_urlset(&entries),
        SitemapPlan::Index(sitemap_urls) => {
            tracing::debug!(chunks = sitemap_urls.len(), "serving sitemap index");
            render_index(&sitemap_urls)
        }
    }
    .map_err(|e| map_render_error(req_id.0, &e))?;
    Ok(xml_document(xml))
}

/// `GET /sitemap/{n}.xml`: the `n`-th chunk of the merged list. Anything that
/// does not name an existing chunk redirects to `/sitemap.xml`.
pub(super) async fn sitemap_chunk(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(file): Path<String>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, ApiError> {
    let Some(page_index) = parse_page_index(&file) else {
        tracing::debug!(file = %file, "malformed sitemap chunk name");
        return Ok(redirect_to_root());
    };

    let base_url = request_base_url(&state, &headers, &uri);
    let entries = collect_entries(&state, &base_url).await;
    if entries.is_empty() {
        return Ok(no_data());
    }

    match select_page(&entries, state.settings.chunk_size, page_index) {
        Some(page) => render_urlset(page.entries)
            .map(xml_document)
            .map_err(|e| map_render_error(req_id.0, &e)),
        None => {
            tracing::debug!(
                page_index,
                total = entries.len(),
                "sitemap chunk out of range"
            );
            Ok(redirect_to_root())
        }
    }
}

async fn collect_entries(state: &AppState, base_url: &str) -> Vec<UrlEntry> {
    let ctx = FetchContext {
        settings: &state.settings,
        language: &state.language,
        base_url,
    };
    generate_sitemap_urls(state.source.as_ref(), &ctx).await
}

/// Origin for generated URLs: the configured public base URL, or the request's
/// own scheme and host.
fn request_base_url(state: &AppState, headers: &HeaderMap, uri: &Uri) -> String {
    if let Some(base) = &state.public_base_url {
        return base.to_string();
    }

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map_or("http", |proto| {
            if proto.eq_ignore_ascii_case("https") {
                "https"
            } else {
                if !proto.eq_ignore_ascii_case("http") {
                    tracing::debug!(proto, "ignoring unsupported X-Forwarded-Proto");
                }
                "http"
            }
        });

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .and_then(valid_host)
        .or_else(|| uri.authority().map(Authority::as_str).and_then(valid_host))
        .unwrap_or("localhost");

    format!("{scheme}://{host}")
}

/// Accepts `host[:port]` (or a bracketed IPv6 literal) and nothing else:
/// no userinfo, no path, no markup.
fn valid_host(raw: &str) -> Option<&str> {
    let plain = raw
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b':' | b'[' | b']'));
    if plain && raw.parse::<Authority>().is_ok() {
        Some(raw)
    } else {
        tracing::debug!(host = raw, "ignoring malformed request host");
        None
    }
}

fn xml_document(xml: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/xml"),
            (header::CACHE_CONTROL, SITEMAP_CACHE_CONTROL),
        ],
        xml,
    )
        .into_response()
}

fn no_data() -> Response {
    tracing::info!("no sitemap entries returned by the storefront");
    (StatusCode::NOT_FOUND, "No data found").into_response()
}

fn redirect_to_root() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, SITEMAP_ROOT)]).into_response()
}
