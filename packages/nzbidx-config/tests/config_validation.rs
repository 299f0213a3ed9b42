use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use nzbidx_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let table = root
		.as_table_mut()
		.and_then(|root| root.get_mut(section))
		.and_then(Value::as_table_mut)
		.expect("Sample config must include the requested section.");

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("nzbidx_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> nzbidx_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = nzbidx_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

#[test]
fn sample_config_loads_and_normalizes() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");

	assert_eq!(cfg.store.url, "http://localhost:9200");
	assert_eq!(cfg.store.index, "nzb");
	assert!(cfg.service.base_url.is_none());
	assert_eq!(cfg.search.page_size, 200);
	assert_eq!(cfg.feed.default_max, 50);
}

#[test]
fn optional_sections_fall_back_to_defaults() {
	let payload = r#"
[service]
http_bind = "127.0.0.1:2333"
log_level = "info"
html_dir = "./www"

[store]
url = "http://localhost:9200"
index = "nzb"
timeout_ms = 1000
"#;
	let cfg: Config = toml::from_str(payload).expect("Failed to parse minimal config.");

	assert_eq!(cfg.search.page_size, 200);
	assert_eq!(cfg.search.complete_threshold, 0.9);
	assert_eq!(cfg.feed.max_items, 500);
	assert_eq!(cfg.feed.language, "en-us");
	assert!(nzbidx_config::validate(&cfg).is_ok());
}

#[test]
fn store_url_must_be_http() {
	let payload = sample_with("store", "url", Value::String("localhost:9200".to_string()));
	let err = load_payload(payload).expect_err("Expected store.url validation error.");

	assert!(
		err.to_string().contains("store.url must start with http:// or https://."),
		"Unexpected error: {err}"
	);
}

#[test]
fn complete_threshold_must_be_a_ratio() {
	let payload = sample_with("search", "complete_threshold", Value::Float(1.5));
	let err = load_payload(payload).expect_err("Expected threshold validation error.");

	assert!(
		err.to_string().contains("search.complete_threshold must be in the range 0.0-1.0."),
		"Unexpected error: {err}"
	);
}

#[test]
fn page_size_must_be_positive() {
	let payload = sample_with("search", "page_size", Value::Integer(0));
	let err = load_payload(payload).expect_err("Expected page size validation error.");

	assert!(matches!(err, Error::Validation { .. }), "Unexpected error: {err}");
}

#[test]
fn feed_default_cannot_exceed_cap() {
	let payload = sample_with("feed", "default_max", Value::Integer(501));
	let err = load_payload(payload).expect_err("Expected feed validation error.");

	assert!(
		err.to_string().contains("feed.default_max must be less than or equal to feed.max_items."),
		"Unexpected error: {err}"
	);
}

#[test]
fn missing_file_reports_read_error() {
	let path = env::temp_dir().join("nzbidx_config_test_missing.toml");
	let err = nzbidx_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err}");
	assert!(err.to_string().starts_with("Failed to read nzbidx config at"));
}

#[test]
fn broken_toml_reports_parse_error() {
	let err = load_payload("[service\nhttp_bind = ".to_string()).expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }), "Unexpected error: {err}");
	assert!(err.to_string().starts_with("Failed to parse nzbidx config at"));
}
