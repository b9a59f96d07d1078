use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "dopo"])
        .status()
        .expect("failed to invoke cargo check for dopo CLI binary");

    assert!(status.success(), "cargo check --bin dopo should succeed");
}

#[test]
fn headless_run_prints_a_summary() {
    let output = Command::new(env!("CARGO_BIN_EXE_dopo"))
        .args(["--level", "1", "--ticks", "5", "--quiet", "--actions", "EEC"])
        .output()
        .expect("failed to run dopo binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout is utf-8");
    assert!(stdout.contains("level: 1"));
    assert!(stdout.contains("ticks: 5"));
    assert!(stdout.contains("fruits: 0/"));
}

#[test]
fn unknown_levels_are_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_dopo"))
        .args(["--level", "99", "--ticks", "1"])
        .output()
        .expect("failed to run dopo binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("stderr is utf-8");
    assert!(stderr.contains("no bundled level numbered 99"));
}

#[test]
fn malformed_scripts_are_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_dopo"))
        .args(["--actions", "NX"])
        .output()
        .expect("failed to run dopo binary");

    assert!(!output.status.success());
}

#[test]
fn run_stops_once_the_level_is_decided() {
    let path = std::env::temp_dir().join(format!("dopo-single-grape-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
            ice_creams = [{ flavor = "Vanilla", position = { x = 1, y = 1 } }]
            fruit_waves = [[{ kind = "Grape", position = { x = 1, y = 1 } }]]
        "#,
    )
    .expect("write level file");

    let output = Command::new(env!("CARGO_BIN_EXE_dopo"))
        .arg("--config")
        .arg(&path)
        .args(["--ticks", "50", "--quiet"])
        .output()
        .expect("failed to run dopo binary");
    let _ = std::fs::remove_file(&path);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout is utf-8");
    assert!(stdout.contains("state: LevelCompleted"));
    assert!(stdout.contains("ticks: 1\n"));
    assert!(stdout.contains("score: 50"));
}
