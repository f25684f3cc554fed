//! Contract tests shared by every backend.

use config_backends::{open, Backend, BackendExt, ConfigError, FileBackend};

mod common;

use common::Sources;

#[test]
fn test_reference_scenario() {
    let sources = Sources::new();
    let a = sources.write("a.ini", "[sec]\nkey=value1\n");
    let b = sources.write("b.ini", "[sec]\nkey=value2\n");

    let backend = open(&a).unwrap();
    assert_eq!(backend.get_string("sec.key").as_deref(), Some("value1"));
    assert_eq!(backend.get_string("sec"), None);
    assert_eq!(backend.get_string("sec.missing"), None);

    backend.set_prefix(&b).unwrap();
    assert_eq!(backend.get_string("sec.key").as_deref(), Some("value2"));
    assert_eq!(backend.locator(), b);
}

#[test]
fn test_ini_round_trip() {
    let sources = Sources::new();
    let content = "\
name = demo
[server]
host = 0.0.0.0
port = 8080
banner = hello = world
[db]
url = postgres://user:pw@localhost/app
pool =
";
    let locator = sources.write("round.cfg", content);
    let backend = open(&locator).unwrap();

    let expected = [
        ("name", "demo"),
        ("server.host", "0.0.0.0"),
        ("server.port", "8080"),
        ("server.banner", "hello = world"),
        ("db.url", "postgres://user:pw@localhost/app"),
        ("db.pool", ""),
    ];
    for (path, value) in expected {
        assert_eq!(backend.get_string(path).as_deref(), Some(value), "path {}", path);
    }
    assert_eq!(backend.snapshot().leaves('.').len(), expected.len());
}

#[test]
fn test_unresolvable_paths_are_absent() {
    let sources = Sources::new();
    let backend = open(&sources.write("a.ini", "top=1\n[sec]\nkey=v\n")).unwrap();

    for path in ["", ".", "sec.", ".sec", "sec..key", "sec.key.deeper", "top.x", "nosuch"] {
        assert_eq!(backend.get_string(path), None, "path {:?}", path);
    }
}

#[test]
fn test_put_on_file_backend_is_unsupported() {
    let sources = Sources::new();
    let backend = open(&sources.write("a.ini", "[sec]\nkey=v\n")).unwrap();

    for path in ["sec.key", "sec", "missing", ""] {
        let err = backend.put_string(path, "x").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedOperation { .. }), "{:?}", err);
    }
}

#[test]
fn test_set_prefix_replaces_contents() {
    let sources = Sources::new();
    let old = sources.write("old.ini", "[only_old]\nk=1\n[shared]\nk=old\n");
    let new = sources.write("new.toml", "[only_new]\nk = 2\n[shared]\nk = \"new\"\n");

    let backend = open(&old).unwrap();
    backend.set_prefix(&new).unwrap();

    assert_eq!(backend.get_string("only_old.k"), None);
    assert_eq!(backend.get_string("only_new.k").as_deref(), Some("2"));
    assert_eq!(backend.get_string("shared.k").as_deref(), Some("new"));
}

#[test]
fn test_failed_set_prefix_keeps_previous_tree() {
    let sources = Sources::new();
    let good = sources.write("good.ini", "[sec]\nkey=kept\n");
    let broken = sources.write("broken.ini", "[sec]\nkey\n");

    let backend = open(&good).unwrap();
    let failures = [
        String::new(),
        sources.locator("missing.ini"),
        sources.write("other.yaml", "sec: {}\n"),
        broken,
        "memory:elsewhere".to_string(),
    ];
    for locator in &failures {
        assert!(backend.set_prefix(locator).is_err(), "locator {:?}", locator);
        assert_eq!(backend.get_string("sec.key").as_deref(), Some("kept"));
        assert_eq!(backend.locator(), good);
    }
}

#[test]
fn test_locator_errors_are_distinct() {
    let sources = Sources::new();

    assert!(matches!(open(""), Err(ConfigError::InvalidLocator { .. })));
    assert!(matches!(FileBackend::load(""), Err(ConfigError::InvalidLocator { .. })));

    let yaml = sources.write("app.yaml", "a: 1\n");
    assert!(matches!(open(&yaml), Err(ConfigError::UnsupportedFormat { .. })));
    // suffix checked before the file is touched
    let absent = sources.locator("absent.xml");
    assert!(matches!(open(&absent), Err(ConfigError::UnsupportedFormat { .. })));
}

#[test]
fn test_parse_error_carries_source_and_line() {
    let sources = Sources::new();
    let locator = sources.write("bad.ini", "[sec]\nkey=v\n[unterminated\n");

    match open(&locator) {
        Err(ConfigError::Parse { source_id, line, message }) => {
            assert!(source_id.ends_with("bad.ini"));
            assert_eq!(line, Some(3));
            assert_eq!(message, "unmatched '['");
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_ini_header_with_trailing_comment_loads() {
    let sources = Sources::default();
    let locator = sources.write("c.ini", "[sec] ; main section\nkey=v\n");

    let backend = open(&locator).unwrap();
    assert_eq!(backend.get_string("sec.key").as_deref(), Some("v"));
}

#[test]
fn test_json_and_toml_keep_key_order() {
    let sources = Sources::new();
    let json = open(&sources.write("o.json", r#"{"zeta": "1", "alpha": "2"}"#)).unwrap();
    let toml = open(&sources.write("o.toml", "[zeta]\nk = 1\n[alpha]\nk = 2\n")).unwrap();

    let paths = |tree: std::sync::Arc<config_backends::ConfigTree>| -> Vec<String> {
        tree.leaves('.').into_iter().map(|(path, _)| path).collect()
    };
    assert_eq!(paths(json.snapshot()), vec!["zeta", "alpha"]);
    assert_eq!(paths(toml.snapshot()), vec!["zeta.k", "alpha.k"]);
}

#[test]
fn test_each_default_format_loads() {
    let sources = Sources::new();
    let locators = [
        sources.write("a.ini", "[server]\nport=8080\n"),
        sources.write("a.cfg", "[server]\nport=8080\n"),
        sources.write("a.toml", "[server]\nport = 8080\n"),
        sources.write("a.json", r#"{"server": {"port": 8080}}"#),
    ];
    for locator in &locators {
        let backend = open(locator).unwrap();
        assert_eq!(backend.get_parsed::<u16>("server.port").unwrap(), Some(8080));
    }
}

#[test]
fn test_bare_path_locator() {
    let sources = Sources::new();
    sources.write("plain.ini", "[sec]\nkey=v\n");
    let bare = sources.path().join("plain.ini").display().to_string();

    let backend = open(&bare).unwrap();
    assert_eq!(backend.get_string("sec.key").as_deref(), Some("v"));
}

#[test]
fn test_memory_backend_contract() {
    let backend = open("memory:contract").unwrap();
    assert_eq!(backend.get_string("a.b"), None);

    backend.put_string("a.b", "1").unwrap();
    assert_eq!(backend.get_string("a.b").as_deref(), Some("1"));
    assert_eq!(backend.get_string("a"), None);

    backend.set_prefix("memory:fresh").unwrap();
    assert_eq!(backend.get_string("a.b"), None);
}
