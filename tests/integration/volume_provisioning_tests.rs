use std::sync::Mutex;

use insighter_launcher::config::VOLUMES;
use insighter_launcher::launcher::volumes::ensure_volumes;

use super::test_helpers::MockRuntime;

#[tokio::test]
async fn creates_all_three_volumes_when_none_exist() {
    let runtime = MockRuntime::default();

    ensure_volumes(&runtime, VOLUMES).await.expect("provisioning");

    let names = runtime.volume_names();
    assert_eq!(names.len(), 3);
    assert!(names.contains(&"insighter_psql_data".to_string()));
    assert!(names.contains(&"insighter_jupyter_data".to_string()));
    assert!(names.contains(&"insighter_insighter_data".to_string()));
}

#[tokio::test]
async fn skips_volumes_that_already_exist() {
    let runtime = MockRuntime {
        volumes: Mutex::new(vec!["insighter_psql_data".into()]),
        ..MockRuntime::default()
    };

    ensure_volumes(&runtime, VOLUMES).await.expect("provisioning");

    let creates: Vec<String> = runtime
        .calls()
        .into_iter()
        .filter(|call| call.starts_with("create_volume"))
        .collect();
    assert_eq!(
        creates,
        vec![
            "create_volume(insighter_jupyter_data)",
            "create_volume(insighter_insighter_data)",
        ]
    );
}

#[tokio::test]
async fn provisioning_twice_is_idempotent() {
    let runtime = MockRuntime::default();

    ensure_volumes(&runtime, VOLUMES).await.expect("first pass");
    ensure_volumes(&runtime, VOLUMES).await.expect("second pass");

    let names = runtime.volume_names();
    assert_eq!(names.len(), 3, "no duplicates after a second pass: {names:?}");

    let creates = runtime
        .calls()
        .into_iter()
        .filter(|call| call.starts_with("create_volume"))
        .count();
    assert_eq!(creates, 3);
}
