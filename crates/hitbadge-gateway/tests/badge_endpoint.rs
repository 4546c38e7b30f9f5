//! Badge endpoint: headers, missing-site handling, and counting.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
};

use hitbadge_gateway::app_state::AppState;
use hitbadge_gateway::config::{self, BadgeServiceConfig};
use hitbadge_gateway::counter::{MemoryStore, VisitorStore};
use hitbadge_gateway::ops;
use hitbadge_gateway::transport::http::{badge, strip_quotes, BadgeQuery};

fn setup(cfg: BadgeServiceConfig) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (AppState::with_store(cfg, store.clone()), store)
}

fn query(site: Option<&str>, style: Option<&str>, label: Option<&str>) -> BadgeQuery {
    BadgeQuery {
        site: site.map(String::from),
        style: style.map(String::from),
        label: label.map(String::from),
    }
}

async fn get(app: &AppState, q: BadgeQuery) -> (Response, String) {
    let resp = badge(State(app.clone()), Ok(Query(q))).await;
    let (parts, body) = resp.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    (Response::from_parts(parts, axum::body::Body::empty()), text)
}

fn header_of<'a>(resp: &'a Response, name: header::HeaderName) -> &'a str {
    resp.headers().get(name).unwrap().to_str().unwrap()
}

#[tokio::test]
async fn counts_and_disables_caching() {
    let (app, store) = setup(BadgeServiceConfig::default());

    let (resp, svg) = get(&app, query(Some("blog"), None, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header_of(&resp, header::CONTENT_TYPE), "image/svg+xml");
    assert_eq!(header_of(&resp, header::CACHE_CONTROL), "no-cache, no-store, must-revalidate");
    assert_eq!(header_of(&resp, header::PRAGMA), "no-cache");
    assert_eq!(header_of(&resp, header::EXPIRES), "0");
    assert!(svg.contains(r#"aria-label="Visitors: 1""#));

    let (_, svg) = get(&app, query(Some("blog"), None, None)).await;
    assert!(svg.contains(r#"aria-label="Visitors: 2""#));
    assert_eq!(store.get("blog").await.unwrap().unwrap().visits, Some(2));
}

#[tokio::test]
async fn missing_site_renders_no_site_without_counting() {
    let (app, store) = setup(BadgeServiceConfig::default());

    let (resp, svg) = get(&app, query(None, None, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header_of(&resp, header::EXPIRES), "0");
    assert!(svg.contains(r#"aria-label="Visitors: No Site""#));
    // flat-red when no style was requested
    assert!(svg.contains(r##"fill="#e05d44""##));
    assert!(store.is_empty());

    let (_, svg) = get(&app, query(Some("\"\""), Some("pill-blue"), None)).await;
    assert!(svg.contains("No Site"));
    assert!(svg.contains(r#"rx="10""#));
    assert!(store.is_empty());
}

#[tokio::test]
async fn quoted_params_are_unwrapped() {
    let (app, store) = setup(BadgeServiceConfig::default());

    let (_, svg) = get(
        &app,
        query(Some("\"docs\""), Some("\"flat-yellow\""), Some("\"Readers\"")),
    )
    .await;
    assert!(svg.contains(r#"aria-label="Readers: 1""#));
    assert!(svg.contains(r##"fill="#dfb317""##));
    assert!(store.get("docs").await.unwrap().is_some());
}

#[test]
fn strip_quotes_only_touches_the_ends() {
    assert_eq!(strip_quotes("\"a\""), "a");
    assert_eq!(strip_quotes("\"a"), "a");
    assert_eq!(strip_quotes("a\"b"), "a\"b");
    assert_eq!(strip_quotes("\"\""), "");
    assert_eq!(strip_quotes("plain"), "plain");
}

#[tokio::test]
async fn unknown_style_and_empty_label_use_defaults() {
    let cfg = config::load_from_str("version: 1\nbadge:\n  default_label: \"Hits\"\n").unwrap();
    let (app, _) = setup(cfg);

    let (_, svg) = get(&app, query(Some("x"), Some("neon"), Some(""))).await;
    assert!(svg.contains(r#"aria-label="Hits: 1""#));
    // classic shadow gradient
    assert!(svg.contains("linearGradient"));
}

#[tokio::test]
async fn bad_label_still_returns_an_svg() {
    let (app, store) = setup(BadgeServiceConfig::default());

    let (resp, svg) = get(&app, query(Some("site"), None, Some("a\u{7}b"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header_of(&resp, header::CONTENT_TYPE), "image/svg+xml");
    assert!(svg.contains(r#"aria-label="Error: SVG""#));
    // The visit was still counted before rendering failed.
    assert_eq!(store.get("site").await.unwrap().unwrap().visits, Some(1));
    assert_eq!(app.metrics().render_fallbacks.get(&[]), 1);
}

#[tokio::test]
async fn metrics_track_outcomes() {
    let (app, _) = setup(BadgeServiceConfig::default());
    get(&app, query(Some("m"), Some("flat-green"), None)).await;
    get(&app, query(Some("m"), Some("nope"), None)).await;
    get(&app, query(None, None, None)).await;

    let m = app.metrics();
    assert_eq!(m.increments.get(&[("outcome", "ok")]), 2);
    assert_eq!(m.increments.get(&[("outcome", "skipped")]), 1);
    assert_eq!(m.requests.get(&[("style", "flat-green")]), 1);
    assert_eq!(m.requests.get(&[("style", "classic")]), 1);
    assert_eq!(m.requests.get(&[("style", "flat-red")]), 1);

    let resp = ops::metrics(State(app.clone())).await;
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("hitbadge_increments_total{outcome=\"ok\"} 2"));
    assert!(text.contains("hitbadge_increments_total{outcome=\"skipped\"} 1"));
    assert!(text.contains("# TYPE hitbadge_render_duration_micros histogram"));
}
