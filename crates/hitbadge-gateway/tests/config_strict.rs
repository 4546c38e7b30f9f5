#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hitbadge_gateway::config::{self, StoreKind};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:3000"
store:
  kind: sqlite
  pathh: "visits.db" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:3000");
    assert_eq!(cfg.store.kind, StoreKind::Memory);
    assert_eq!(cfg.badge.default_label, "Visitors");
    assert_eq!(cfg.badge.missing_site_style, "flat-red");
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:8081"
store:
  kind: sqlite
  path: "/var/lib/hitbadge/visits.db"
  busy_timeout_ms: 250
badge:
  default_label: "Views"
  missing_site_style: "flat-yellow"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.store.kind, StoreKind::Sqlite);
    assert_eq!(cfg.store.path, "/var/lib/hitbadge/visits.db");
    assert_eq!(cfg.store.busy_timeout_ms, 250);
    assert_eq!(cfg.badge.default_label, "Views");
}

#[test]
fn wrong_version_is_rejected() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn unknown_missing_site_style_is_rejected() {
    let bad = "version: 1\nbadge:\n  missing_site_style: \"neon\"\n";
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn sqlite_requires_path_and_sane_timeout() {
    let no_path = "version: 1\nstore:\n  kind: sqlite\n  path: \"\"\n";
    assert!(config::load_from_str(no_path).is_err());

    let zero_timeout = "version: 1\nstore:\n  busy_timeout_ms: 0\n";
    assert!(config::load_from_str(zero_timeout).is_err());
}
