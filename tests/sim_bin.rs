use std::process::Command;

fn run(args: &[&str]) -> Vec<serde_json::Value> {
    let output = Command::new(env!("CARGO_BIN_EXE_broadside"))
        .args(args)
        .output()
        .expect("failed to run broadside binary");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("invalid json"))
        .collect()
}

#[test]
fn sim_binary_smoke() {
    let reports = run(&["sim", "--seed", "1", "--games", "2"]);
    assert_eq!(reports.len(), 2);
    for report in &reports {
        assert!(report["winner"].is_string());
        assert!(report["turns"].as_u64().unwrap() >= 17);
    }
}

#[test]
fn sim_is_reproducible() {
    let args = ["sim", "--seed", "42", "--strategy", "density"];
    assert_eq!(run(&args), run(&args));
}

#[test]
fn hosted_binary_smoke() {
    let reports = run(&["hosted", "--seed", "3"]);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["game"], "hosted");
    assert!(reports[0]["winner"].is_string());
}

#[test]
fn oversized_board_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_broadside"))
        .args(["sim", "--rows", "20", "--cols", "20"])
        .output()
        .expect("failed to run broadside binary");
    assert!(!output.status.success());
}
