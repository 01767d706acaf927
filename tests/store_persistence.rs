use authctl::config::{Attrs, Config, ConfigSource};
use authctl::context::ContextManager;
use authctl::target::{Scheme, normalize_with};
use serde_yaml::Value;
use std::fs;

fn populated() -> Config {
    let mut config = Config::default();
    for host in ["zeta.example.com", "alpha.example.com"] {
        config.set_current_target(normalize_with(host, Scheme::Https).unwrap());
    }
    config
        .merge_context_attrs(
            "admin",
            Attrs::from([("access_token".to_owned(), Value::from("secret"))]),
        )
        .unwrap();
    ContextManager::new(&mut config).select_context("admin").unwrap();
    config
}

#[test]
fn saved_store_loads_back_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let source = ConfigSource::File(dir.path().join("nested").join("config.yml"));
    let config = populated();

    source.save(&config).unwrap();
    let loaded = source.load().unwrap();

    assert_eq!(loaded, config);
    let order: Vec<_> = loaded.targets().map(|(id, _)| id.to_string()).collect();
    assert_eq!(
        order,
        vec!["https://zeta.example.com", "https://alpha.example.com"]
    );
    assert_eq!(loaded.current_context(), Some("admin"));
}

#[test]
fn false_markers_are_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yml");
    let source = ConfigSource::File(path.clone());

    source.save(&populated()).unwrap();
    let text = fs::read_to_string(&path).unwrap();

    assert_eq!(text.matches("current: true").count(), 2);
    assert!(!text.contains("current: false"));
}

#[cfg(unix)]
#[test]
fn saved_store_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yml");
    ConfigSource::File(path.clone()).save(&populated()).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn inline_store_is_never_written() {
    let source = ConfigSource::from_arg("{}");
    let mut config = source.load().unwrap();
    config.set_current_target(normalize_with("a.com", Scheme::Https).unwrap());

    source.save(&config).unwrap();
    assert!(source.load().unwrap().is_empty());
}

#[test]
fn marker_keys_in_merged_attrs_survive_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let source = ConfigSource::File(dir.path().join("config.yml"));
    let mut config = populated();
    let zeta = normalize_with("zeta.example.com", Scheme::Https).unwrap();
    let alpha = normalize_with("alpha.example.com", Scheme::Https).unwrap();

    let markers = Attrs::from([
        ("current".to_owned(), Value::Bool(true)),
        ("contexts".to_owned(), Value::from("scalar")),
    ]);
    config.merge_target_attrs(&alpha, markers.clone());
    config.merge_target_attrs(&zeta, markers.clone());
    config.merge_context_attrs("admin", markers.clone()).unwrap();
    config.merge_context_attrs("guest", markers).unwrap();

    source.save(&config).unwrap();
    let loaded = source.load().unwrap();

    assert_eq!(loaded, config);
    assert_eq!(loaded.targets().filter(|(_, e)| e.current).count(), 1);
    assert_eq!(loaded.current_target(), Some(&alpha));
    assert_eq!(loaded.current_context(), Some("admin"));
    let entry = loaded.target(&alpha).unwrap();
    assert!(!entry.context("guest").unwrap().current);
    assert_eq!(
        entry.context("guest").unwrap().attrs["contexts"],
        Value::from("scalar")
    );
}
