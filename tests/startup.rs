//! Settings resolution and initial location

use std::io::Write;

use fleetdash::{initial_location, resolve_settings, Args};
use fleetdash_core::Error;
use tempfile::NamedTempFile;

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn args_with(file: &NamedTempFile) -> Args {
    Args {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    }
}

#[test]
fn test_config_file_values_are_used() {
    let file = config_file(
        r#"
[api]
base_url = "http://monitor.lan/api"

[dashboard]
location = "http://monitor.lan/machines"
refresh_interval_secs = 15
"#,
    );

    let settings = resolve_settings(&args_with(&file)).unwrap();

    assert_eq!(settings.api.base_url, "http://monitor.lan/api");
    assert_eq!(settings.dashboard.refresh_interval_secs, 15);
    assert!(settings.ui.show_url);
}

#[test]
fn test_flags_override_config_file() {
    let file = config_file("[dashboard]\nrefresh_interval_secs = 15\n");
    let args = Args {
        api_url: Some("http://other.lan/api".into()),
        refresh_secs: Some(5),
        hide_url: true,
        ..args_with(&file)
    };

    let settings = resolve_settings(&args).unwrap();

    assert_eq!(settings.api.base_url, "http://other.lan/api");
    assert_eq!(settings.dashboard.refresh_interval_secs, 5);
    assert!(!settings.ui.show_url);
}

#[test]
fn test_zero_refresh_interval_rejected() {
    let file = config_file("");
    let args = Args {
        refresh_secs: Some(0),
        ..args_with(&file)
    };

    assert!(matches!(resolve_settings(&args), Err(Error::Config { .. })));
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let args = Args {
        config: Some("/nonexistent/fleetdash/config.toml".into()),
        ..Default::default()
    };

    assert!(matches!(
        resolve_settings(&args),
        Err(Error::ConfigNotFound { .. })
    ));
}

#[test]
fn test_bare_query_applies_to_configured_location() {
    let file = config_file("[dashboard]\nlocation = \"http://monitor.lan/machines?c=old\"\n");
    let settings = resolve_settings(&args_with(&file)).unwrap();

    let url = initial_location(&settings, Some("?c=miners&m=rig-01&mt=xmrig")).unwrap();

    assert_eq!(
        url.as_str(),
        "http://monitor.lan/machines?c=miners&m=rig-01&mt=xmrig"
    );
}

#[test]
fn test_full_location_replaces_configured_one() {
    let file = config_file("");
    let settings = resolve_settings(&args_with(&file)).unwrap();

    let url = initial_location(&settings, Some("http://elsewhere/dash?c=web")).unwrap();
    assert_eq!(url.host_str(), Some("elsewhere"));

    let url = initial_location(&settings, None).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8080/machines");

    assert!(matches!(
        initial_location(&settings, Some("not a url")),
        Err(Error::InvalidLocation { .. })
    ));
}
