//! Badge endpoint: `GET /?site=...&style=...&label=...`.
//!
//! Every response is an SVG with caching disabled at every layer, since each
//! one reflects a fresh, non-idempotent increment. Bad input still yields a
//! badge, never an error status.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tokio::time::Instant;

use hitbadge_core::badge::{render_badge, Count, StyleId};

use crate::app_state::AppState;
use crate::counter::Increment;

/// Count text shown when the request names no site.
pub const NO_SITE: &str = "No Site";

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";
pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

// --------------------
// Query parsing
// --------------------
#[derive(Debug, Default, Deserialize)]
pub struct BadgeQuery {
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

/// Strip one pair of surrounding double quotes (`"flat-yellow"` -> `flat-yellow`).
pub fn strip_quotes(raw: &str) -> &str {
    let s = raw.strip_prefix('"').unwrap_or(raw);
    s.strip_suffix('"').unwrap_or(s)
}

fn param(v: &Option<String>) -> &str {
    v.as_deref().map(strip_quotes).unwrap_or("")
}

// --------------------
// Entry
// --------------------
pub async fn badge(
    State(app): State<AppState>,
    query: Result<Query<BadgeQuery>, QueryRejection>,
) -> Response {
    let q = match query {
        Ok(Query(q)) => q,
        Err(e) => {
            tracing::debug!(error = %e, "unparseable badge query, using defaults");
            BadgeQuery::default()
        }
    };

    let cfg = &app.cfg().badge;
    let site = param(&q.site);
    let label = match param(&q.label) {
        "" => cfg.default_label.as_str(),
        l => l,
    };

    if site.is_empty() {
        tracing::debug!("badge request without site");
        app.metrics().increments.inc(&[("outcome", Increment::Skipped.as_str())]);
        let style = match param(&q.style) {
            "" => cfg.missing_site_style.as_str(),
            s => s,
        };
        return svg_response(render(&app, label, Count::Text(NO_SITE), style));
    }

    let style = param(&q.style);
    let outcome = app.counter().increment_outcome(site).await;
    app.metrics().increments.inc(&[("outcome", outcome.as_str())]);
    tracing::debug!(site = %site, outcome = outcome.as_str(), count = outcome.count(), "visit counted");

    svg_response(render(&app, label, Count::Number(outcome.count()), style))
}

fn render(app: &AppState, label: &str, count: Count<'_>, style: &str) -> String {
    let metrics = app.metrics();
    let resolved = StyleId::parse(style).unwrap_or(StyleId::Classic).as_str();
    metrics.requests.inc(&[("style", resolved)]);

    let started = Instant::now();
    let rendered = render_badge(Some(label), count, style);
    metrics.render_duration.observe(&[], started.elapsed());
    if rendered.is_fallback() {
        metrics.render_fallbacks.inc(&[]);
    }
    rendered.into_svg()
}

pub fn svg_response(svg: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, SVG_CONTENT_TYPE),
            (header::CACHE_CONTROL, NO_CACHE),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        svg,
    )
        .into_response()
}
