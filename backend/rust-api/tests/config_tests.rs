use std::path::PathBuf;

use quizroom_api::config::Config;

const VARS: &[&str] = &[
    "APP_ENV",
    "APP__SERVER__PORT",
    "APP__STORAGE__DATA_PATH",
    "HOST",
    "PORT",
    "QUIZROOM_DATA_PATH",
    "QUIZROOM_SEED",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
    // points at a config file that does not exist
    std::env::set_var("APP_ENV", "integration-test");
}

#[test]
#[serial_test::serial]
fn test_defaults() {
    clear_env();

    let config = Config::load().unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 4000);
    assert_eq!(config.data_path, PathBuf::from("data/db.json"));
    assert!(config.seed_on_start);
    assert_eq!(config.bind_address(), "0.0.0.0:4000");
}

#[test]
#[serial_test::serial]
fn test_plain_env_fallbacks() {
    clear_env();
    std::env::set_var("PORT", "5050");
    std::env::set_var("QUIZROOM_DATA_PATH", "/tmp/quizroom/db.json");
    std::env::set_var("QUIZROOM_SEED", "false");

    let config = Config::load().unwrap();

    assert_eq!(config.port, 5050);
    assert_eq!(config.data_path, PathBuf::from("/tmp/quizroom/db.json"));
    assert!(!config.seed_on_start);

    clear_env();
}

#[test]
#[serial_test::serial]
fn test_prefixed_env_wins() {
    clear_env();
    std::env::set_var("PORT", "5050");
    std::env::set_var("APP__SERVER__PORT", "6060");

    let config = Config::load().unwrap();
    assert_eq!(config.port, 6060);

    clear_env();
}

#[test]
#[serial_test::serial]
fn test_invalid_port_rejected() {
    clear_env();
    std::env::set_var("PORT", "not-a-port");

    assert!(Config::load().is_err());

    clear_env();
}
