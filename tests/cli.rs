use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("eda-charts").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("eda-charts"));
}

#[test]
fn demo_renders_all_chart_kinds() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("eda-charts").unwrap();
    cmd.args([
        "demo",
        "--out-dir",
        dir.path().to_str().unwrap(),
        "--stats",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("mfcc_1_mean"));

    for name in [
        "stacked_counts.svg",
        "kde_mfcc_1_mean.svg",
        "mfcc_boxplots.svg",
        "single_boxplot.svg",
    ] {
        let path = dir.path().join(name);
        assert!(path.exists(), "missing {name}");
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
