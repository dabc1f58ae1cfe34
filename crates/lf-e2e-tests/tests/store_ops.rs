//! E2E tests for store housekeeping: wholesale reload, show, save.

mod helpers;

use helpers::TestHarness;
use lf_engine::LogError;

/// Each load replaces the store; nothing is appended.
#[test]
fn e2e_reload_overwrites() {
    let h = TestHarness::with_access_log();
    h.write_log("small.log", &["1 2 3"]);

    h.run(&["load", "access.log"]).unwrap();
    assert_eq!(h.read_store().len(), 5);

    h.run(&["load", "small.log"]).unwrap();
    assert_eq!(h.read_store().len(), 1);
}

/// Files are concatenated in the order given on the command line.
#[test]
fn e2e_load_multiple_in_order() {
    let h = TestHarness::new();
    h.write_log("b.log", &["b1", "b2"]);
    h.write_log("a.log", &["a1"]);

    h.run(&["load", "b.log", "a.log"]).unwrap();
    let firsts: Vec<String> = h
        .read_store()
        .iter()
        .map(|r| r.get(1).unwrap().to_string())
        .collect();
    assert_eq!(firsts, vec!["b1", "b2", "a1"]);
}

/// `load .` picks up every matching file in the data dir, sorted by name.
#[test]
fn e2e_load_dot_uses_whole_directory() {
    let h = TestHarness::new();
    h.write_log("b.log", &["b1"]);
    h.write_log("a.log", &["a1"]);
    h.write_log("c.txt", &["c1"]);

    h.run(&["load", "."]).unwrap();
    let firsts: Vec<String> = h
        .read_store()
        .iter()
        .map(|r| r.get(1).unwrap().to_string())
        .collect();
    assert_eq!(firsts, vec!["a1", "b1"]);
}

/// `load .` never reads the store back in as a log.
#[test]
fn e2e_load_dot_skips_store() {
    let mut h = TestHarness::new();
    h.config.extension = "json".into();
    h.write_log("events.json", &["1 a", "2 b"]);

    h.run(&["load", "."]).unwrap();
    assert_eq!(h.read_store().len(), 2);

    // The store now exists with a matching extension; reloading must not pick it up.
    let text = h.run_text(&["load", "."]);
    assert_eq!(text, "File successfully loaded (2 records from 1 file(s))");
    assert_eq!(h.read_store().len(), 2);

    h.config.extension = String::new();
    h.run(&["load", "."]).unwrap();
    assert_eq!(h.read_store().len(), 2);
}

/// `show` lists the data directory, including the store.
#[test]
fn e2e_show_lists_directory() {
    let h = TestHarness::with_access_log();
    h.run(&["load", "access.log"]).unwrap();
    assert_eq!(h.run_text(&["show"]), "access.log\ndb.json");
}

/// `save` copies the store byte-for-byte.
#[test]
fn e2e_save_copies_store() {
    let h = TestHarness::with_access_log();
    h.run(&["load", "access.log"]).unwrap();

    let text = h.run_text(&["save", "backup.json"]);
    assert!(text.starts_with("The file was saved successfully"));
    assert_eq!(
        std::fs::read(h.path().join("backup.json")).unwrap(),
        std::fs::read(h.store().path()).unwrap()
    );
}

/// Saving with no store yet reports it as missing.
#[test]
fn e2e_save_without_store() {
    let h = TestHarness::new();
    assert!(matches!(
        h.run(&["save", "backup.json"]),
        Err(LogError::NotFound(_))
    ));
}

/// Saving onto the store's own name is refused and leaves it intact.
#[test]
fn e2e_save_onto_store_is_rejected() {
    let h = TestHarness::with_access_log();
    h.run(&["load", "access.log"]).unwrap();
    let before = std::fs::read(h.store().path()).unwrap();

    assert!(matches!(
        h.run(&["save", "db.json"]),
        Err(LogError::InvalidArgument(_))
    ));
    assert_eq!(std::fs::read(h.store().path()).unwrap(), before);
    assert_eq!(h.query_data(&["total-bytes"])["total"], 49370);
}

/// `save` only writes inside the data directory.
#[test]
fn e2e_save_outside_data_dir_is_rejected() {
    let h = TestHarness::with_access_log();
    h.run(&["load", "access.log"]).unwrap();
    let outside = tempfile::tempdir().unwrap();
    let absolute = outside.path().join("stolen.json").display().to_string();

    for name in [absolute.as_str(), "../escaped.json", "nested/copy.json"] {
        assert!(
            matches!(h.run(&["save", name]), Err(LogError::InvalidArgument(_))),
            "expected rejection for {name:?}"
        );
    }
    assert!(!outside.path().join("stolen.json").exists());
    assert_eq!(h.run_text(&["show"]), "access.log\ndb.json");
}

/// The config file drives delimiter, quote and store name.
#[test]
fn e2e_custom_config() {
    let mut h = TestHarness::new();
    let toml = format!(
        "data_dir = {:?}\nstore_file = \"records.json\"\ndelimiter = \",\"\nquote = '\"'\nextension = \"csv\"\n",
        h.path().display().to_string()
    );
    let config_path = h.path().join("logfield.toml");
    std::fs::write(&config_path, toml).unwrap();
    h.config = lf_cli::config::LogfieldConfig::from_file(&config_path).unwrap();

    h.write_log("events.csv", &["1,\"a,b\",,x", "3,y"]);
    h.run(&["load", "events.csv"]).unwrap();

    let records = h.read_store();
    assert_eq!(records[0].get(2), Some("a,b"));
    assert_eq!(records[0].get(3), Some("x"));
    assert!(h.path().join("records.json").exists());
    assert!((h.query_data(&["events-per-second"])["rate"].as_f64().unwrap() - 1.0).abs() < 1e-12);
}
