//! End-to-end tests of the `ttfe` binary.

use std::path::Path;
use std::process::{Command, Output};

const SCENARIO: &str = "# three transactions\n\
                        1 2:2 1:1 3\n\
                        2 3:2 3:2 1\n\
                        1 3:1 2:1 2\n";

fn ttfe(dir: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ttfe"));
    command.current_dir(dir).env("HOME", dir).env_remove("TTFE_LOG");
    for key in [
        "TTFE_TOP_K",
        "TTFE_ALPHA",
        "TTFE_BETA",
        "TTFE_DELTA",
        "TTFE_DATABASE",
        "TTFE_DEBUG_LEVEL",
        "TTFE_OUTPUT",
    ] {
        command.env_remove(key);
    }
    command.args(args).output().unwrap()
}

fn setup() -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("scenario.txt"), SCENARIO).unwrap();
    dir
}

#[test]
fn test_mine_writes_report() {
    let dir = setup();
    let out = ttfe(
        dir.path(),
        &["mine", "scenario.txt", "-k", "2", "--debug-level", "0"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("2 pattern(s)"));

    let report = dir.path().join("output_scenario_2_0.5_0.5.txt");
    let text = std::fs::read_to_string(report).unwrap();
    assert!(text.contains("Database: scenario"));
    assert!(text.contains("Output delta: 4"));
}

#[test]
fn test_directives_and_project_config_layers() {
    let dir = setup();
    std::fs::write(
        dir.path().join("ttfe.toml"),
        "[mining]\ntop_k = 4\ndatabase = \"fromfile\"\n\n[output]\nformat = \"json\"\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("directed.txt"), format!("topk=1\n{SCENARIO}")).unwrap();
    let out = ttfe(
        dir.path(),
        &["mine", "directed.txt", "--debug-level", "0", "-o", "out/{database}_{topK}.json"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let json = std::fs::read_to_string(dir.path().join("out/fromfile_1.json")).unwrap();
    assert!(json.contains("\"top_k\": 1"));
}

#[test]
fn test_missing_input_fails() {
    let dir = setup();
    let out = ttfe(dir.path(), &["mine", "absent.txt"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("DATASET_NOT_FOUND"));
}

#[test]
fn test_out_of_range_top_k_is_substituted() {
    let dir = setup();
    let out = ttfe(
        dir.path(),
        &["mine", "scenario.txt", "--top-k", "-3", "--debug-level", "0"],
    );
    assert!(out.status.success());
    assert!(dir.path().join("output_scenario_5_0.5_0.5.txt").exists());
}

#[test]
fn test_sweep_writes_one_report_per_cell() {
    let dir = setup();
    let out = ttfe(
        dir.path(),
        &[
            "sweep", "scenario.txt", "--top-ks", "1,2", "--betas", "0,1", "--debug-level", "0",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    for name in [
        "output_scenario_1_1_0.txt",
        "output_scenario_1_0_1.txt",
        "output_scenario_2_1_0.txt",
        "output_scenario_2_0_1.txt",
    ] {
        assert!(dir.path().join(name).exists(), "missing {name}");
    }
}

#[test]
fn test_decompose_marks_report_approximate() {
    let dir = setup();
    let out = ttfe(dir.path(), &["decompose", "scenario.txt", "--debug-level", "0"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let text = std::fs::read_to_string(dir.path().join("output_scenario_5_0.5_0.5.txt")).unwrap();
    assert!(text.contains("Note: approximate"));
}

#[test]
fn test_broken_project_config_is_skipped() {
    let dir = setup();
    std::fs::write(dir.path().join("ttfe.toml"), "[mining\ntop_k = 2\n").unwrap();
    let out = ttfe(
        dir.path(),
        &[
            "mine", "scenario.txt", "--debug-level", "0", "--format", "json", "-o", "report.json",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let json = std::fs::read_to_string(dir.path().join("report.json")).unwrap();
    assert!(json.contains("config_file_skipped"));
    assert!(json.contains("\"top_k\": 5"));
}

#[test]
fn test_sweep_with_fixed_output_path_keeps_every_cell() {
    let dir = setup();
    let out = ttfe(
        dir.path(),
        &[
            "sweep", "scenario.txt", "-o", "sweep.txt", "--top-ks", "1,2", "--betas", "0,1",
            "--debug-level", "0",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    for name in ["sweep_1_0.txt", "sweep_1_1.txt", "sweep_2_0.txt", "sweep_2_1.txt"] {
        assert!(dir.path().join(name).exists(), "missing {name}");
    }
    assert!(!dir.path().join("sweep.txt").exists());
}

#[test]
fn test_sweep_out_of_range_values_are_substituted() {
    let dir = setup();
    let out = ttfe(
        dir.path(),
        &[
            "sweep", "scenario.txt", "--top-ks", "0", "--betas", "1.5", "--debug-level", "0",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(dir.path().join("output_scenario_5_0.5_0.5.txt").exists());
}
