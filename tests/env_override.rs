use build_config::Settings;
use pretty_assertions::assert_eq;
use std::path::Path;

// Kept in its own test binary: environment variables are process wide.
#[test]
fn environment_overrides_file_values() {
    std::env::set_var("BUILD_CONFIG__DEFAULT_NETWORK", "localhost");
    std::env::set_var("BUILD_CONFIG__PATHS__ARTIFACTS", "./out");
    let settings = Settings::load(Some(Path::new("config/base.toml"))).expect("Failed to parse config");
    std::env::remove_var("BUILD_CONFIG__DEFAULT_NETWORK");
    std::env::remove_var("BUILD_CONFIG__PATHS__ARTIFACTS");

    let expected = {
        let mut expected = Settings::default();
        expected.default_network = "localhost".into();
        expected.paths.artifacts = "./out".into();
        expected
    };
    assert_eq!(expected, settings);
}
