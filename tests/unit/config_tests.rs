use insighter_launcher::config::{
    self, capture_passthrough_env, resolve_image_tag, split_image_tag, LaunchConfig,
};

#[test]
fn namespaced_reference_without_tag_gets_latest() {
    assert_eq!(resolve_image_tag("myorg/app"), "myorg/app:latest");
}

#[test]
fn tagged_reference_is_unchanged() {
    assert_eq!(resolve_image_tag("myorg/app:1.2"), "myorg/app:1.2");
}

#[test]
fn bare_reference_is_unchanged() {
    assert_eq!(resolve_image_tag("app"), "app");
}

#[test]
fn registry_port_counts_as_explicit_tag_marker() {
    // Matches the observed normalization: any colon suppresses the
    // `:latest` append, including one in the registry host.
    assert_eq!(resolve_image_tag("localhost:5000/app"), "localhost:5000/app");
}

#[test]
fn split_image_tag_finds_trailing_tag() {
    assert_eq!(split_image_tag("myorg/app:latest"), ("myorg/app", Some("latest")));
}

#[test]
fn split_image_tag_ignores_registry_port() {
    assert_eq!(split_image_tag("localhost:5000/app"), ("localhost:5000/app", None));
}

#[test]
fn allow_list_names_the_fourteen_variables() {
    assert_eq!(config::ENV_PASSTHROUGH.len(), 14);
    assert!(config::ENV_PASSTHROUGH.contains(&"POSTGRES_PASSWORD"));
    assert!(config::ENV_PASSTHROUGH.contains(&"JUPYTER_TOKEN"));
    assert!(config::ENV_PASSTHROUGH.contains(&"DISABLE_CUSTOM_OAI_KEY"));
}

#[test]
#[serial_test::serial]
#[allow(unsafe_code)]
fn captures_only_set_allow_listed_variables() {
    unsafe {
        std::env::set_var("POSTGRES_USERNAME", "insighter");
        std::env::set_var("LOG_LEVEL", "debug");
        std::env::remove_var("POSTGRES_PASSWORD");
        std::env::set_var("NOT_ON_THE_LIST", "ignored");
    }

    let env = capture_passthrough_env();

    assert!(env.contains(&"POSTGRES_USERNAME=insighter".to_string()));
    assert!(env.contains(&"LOG_LEVEL=debug".to_string()));
    assert!(!env.iter().any(|pair| pair.starts_with("POSTGRES_PASSWORD=")));
    assert!(!env.iter().any(|pair| pair.starts_with("NOT_ON_THE_LIST=")));

    unsafe {
        std::env::remove_var("POSTGRES_USERNAME");
        std::env::remove_var("LOG_LEVEL");
        std::env::remove_var("NOT_ON_THE_LIST");
    }
}

#[test]
#[serial_test::serial]
fn launch_config_uses_fixed_identity() {
    let config = LaunchConfig::new("myorg/app", true);

    assert_eq!(config.container_name, "insighter");
    assert_eq!(config.image, "myorg/app:latest");
    assert_eq!(config.base_port, 3000);
    assert_eq!(config.container_port, 3000);
    assert!(config.detach);
    assert_eq!(config.volumes.len(), 3);
    assert_eq!(config.volumes[0].name, "insighter_psql_data");
    assert_eq!(config.volumes[0].mount_path, "/var/lib/postgresql/data");
}
