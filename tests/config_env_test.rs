//! `Config::from_env` against real environment variables.

use seiun::config::Config;
use serial_test::serial;
use std::path::PathBuf;
use std::time::Duration;

const VARS: [&str; 4] = [
    "SEIUN_SERVICE_HOST",
    "SEIUN_PAGE_LIMIT",
    "SEIUN_TIMEOUT_SECS",
    "SEIUN_DATA_DIR",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    assert_eq!(Config::from_env(), Config::default());
}

#[test]
#[serial]
fn test_from_env_reads_all_values() {
    clear_env();
    std::env::set_var("SEIUN_SERVICE_HOST", "pds.example.com");
    std::env::set_var("SEIUN_PAGE_LIMIT", "20");
    std::env::set_var("SEIUN_TIMEOUT_SECS", "7");
    std::env::set_var("SEIUN_DATA_DIR", "/tmp/seiun-test");

    let config = Config::from_env();
    clear_env();

    assert_eq!(config.service_host, "pds.example.com");
    assert_eq!(config.page_limit, 20);
    assert_eq!(config.request_timeout, Duration::from_secs(7));
    assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/seiun-test")));
}

#[test]
#[serial]
fn test_from_env_invalid_values_fall_back() {
    clear_env();
    std::env::set_var("SEIUN_PAGE_LIMIT", "lots");
    std::env::set_var("SEIUN_TIMEOUT_SECS", "0");
    std::env::set_var("SEIUN_SERVICE_HOST", "   ");

    let config = Config::from_env();
    clear_env();

    assert_eq!(config.page_limit, 50);
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert_eq!(config.service_host, "bsky.social");
}

#[test]
#[serial]
fn test_from_env_clamps_page_limit() {
    clear_env();
    std::env::set_var("SEIUN_PAGE_LIMIT", "1000");

    let config = Config::from_env();
    clear_env();

    assert_eq!(config.page_limit, 100);
}
