use assert_cmd::Command;
use serde_json::Value;

fn bookshelf() -> Command {
    let mut cmd = Command::cargo_bin("bookshelf").unwrap();
    cmd.env(
        "BOOKSHELF_CONFIG_DIR",
        std::env::temp_dir().join("bookshelf-cli-missing-config"),
    )
    .env_remove("BOOKSHELF_ENV");
    cmd
}

#[test]
fn config_prints_defaults() {
    let output = bookshelf()
        .arg("config")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let settings: Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(settings["environment"], "local");
    assert_eq!(settings["server"]["host"], "localhost");
    assert_eq!(settings["server"]["port"], 9000);
    assert_eq!(settings["telemetry"]["log_format"], "pretty");
}

#[test]
fn config_reads_environment_overrides() {
    let output = bookshelf()
        .arg("config")
        .env("BOOKSHELF_ENV", "staging")
        .env("BOOKSHELF_SERVER__PORT", "9100")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let settings: Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(settings["environment"], "staging");
    assert_eq!(settings["server"]["port"], 9100);
}

#[test]
fn unknown_environment_fails() {
    bookshelf()
        .arg("config")
        .env("BOOKSHELF_ENV", "moon")
        .assert()
        .failure();
}
