use std::path::{Path, PathBuf};

use tempdir::TempDir;

use eggdrop_rs::{solve, Arguments, ConfigError, Mode, SolveError};

fn args_writing_to(outfile: &Path) -> Arguments {
    Arguments {
        outfile: Some(outfile.to_path_buf()),
        logging: "error".into(),
        ..Default::default()
    }
}

fn read_json(path: &PathBuf) -> serde_json::Value {
    let contents = std::fs::read_to_string(path).expect("the report should exist");
    serde_json::from_str(&contents).expect("the report should be valid JSON")
}

#[tokio::test]
async fn batch_run_report() -> Result<(), SolveError> {
    let dir = TempDir::new("eggdrop-rs")?;
    let outfile = dir.path().join("run.json");
    let mut args = args_writing_to(&outfile);
    args.floors = Some(100);
    args.secret = Some(42);
    args.mode = Mode::Batch;
    solve(&args).await?;
    let report = read_json(&outfile);
    assert_eq!(report["kind"], "run");
    assert_eq!(report["k"], 14);
    assert_eq!(report["found_floor"], 42);
    assert_eq!(report["finished"], true);
    Ok(())
}

#[tokio::test]
async fn stepped_run_report() -> Result<(), SolveError> {
    let dir = TempDir::new("eggdrop-rs")?;
    let outfile = dir.path().join("run.json");
    let mut args = args_writing_to(&outfile);
    args.floors = Some(10);
    args.secret = Some(7);
    solve(&args).await?;
    let report = read_json(&outfile);
    assert_eq!(report["total_drops"], 5);
    assert_eq!(report["drops"].as_array().map(Vec::len), Some(5));
    Ok(())
}

#[tokio::test]
async fn sweep_report() -> Result<(), SolveError> {
    let dir = TempDir::new("eggdrop-rs")?;
    let outfile = dir.path().join("sweep.yaml");
    let mut args = args_writing_to(&outfile);
    args.floors = Some(100);
    args.sweep = true;
    solve(&args).await?;
    let report = std::fs::read_to_string(&outfile)?;
    assert!(report.contains("kind: sweep"), "{}", report);
    assert!(report.contains("most_drops: 16"), "{}", report);
    Ok(())
}

#[tokio::test]
async fn scenario_file_report() -> Result<(), SolveError> {
    let dir = TempDir::new("eggdrop-rs")?;
    let scenarios = dir.path().join("scenarios.yaml");
    std::fs::write(&scenarios, "- {floors: 10, secret: 7}\n- {floors: 10, secret: 0}\n")?;
    let outfile = dir.path().join("scenarios.json");
    let mut args = args_writing_to(&outfile);
    args.scenarios = Some(scenarios);
    solve(&args).await?;
    let report = read_json(&outfile);
    assert_eq!(report["kind"], "scenarios");
    assert_eq!(report["runs"][0]["total_drops"], 5);
    assert_eq!(report["runs"][1]["total_drops"], 2);
    Ok(())
}

#[tokio::test]
async fn invalid_configuration_is_rejected() -> Result<(), SolveError> {
    let dir = TempDir::new("eggdrop-rs")?;
    let outfile = dir.path().join("never.json");
    let mut args = args_writing_to(&outfile);
    args.floors = Some(10);
    args.secret = Some(12);
    let res = solve(&args).await;
    assert!(matches!(res, Err(SolveError::InvalidConfiguration { .. })), "{:?}", res.err());
    assert!(!outfile.exists());

    args.secret = Some(9);
    solve(&args).await?;
    assert_eq!(read_json(&outfile)["found_floor"], 9);
    Ok(())
}

#[tokio::test]
async fn oversized_building_is_rejected() -> Result<(), SolveError> {
    let dir = TempDir::new("eggdrop-rs")?;
    let outfile = dir.path().join("never.json");
    let mut args = args_writing_to(&outfile);
    args.floors = Some(u64::MAX);
    args.secret = Some(0);
    let res = solve(&args).await;
    assert!(
        matches!(res, Err(SolveError::InvalidConfiguration { source: ConfigError::TooManyFloors { .. } })),
        "{:?}",
        res.err()
    );
    assert!(!outfile.exists());
    Ok(())
}

#[tokio::test]
async fn invalid_sweep_leaves_no_report() -> Result<(), SolveError> {
    let dir = TempDir::new("eggdrop-rs")?;
    let outfile = dir.path().join("never.yaml");
    let mut args = args_writing_to(&outfile);
    args.floors = Some(0);
    args.sweep = true;
    let res = solve(&args).await;
    assert!(matches!(res, Err(SolveError::InvalidConfiguration { source: ConfigError::NoFloors })));
    assert!(!outfile.exists());
    Ok(())
}

#[tokio::test]
async fn invalid_scenario_file_leaves_no_report() -> Result<(), SolveError> {
    let dir = TempDir::new("eggdrop-rs")?;
    let scenarios = dir.path().join("scenarios.yaml");
    std::fs::write(&scenarios, "- {floors: 10, secret: 7}\n- {floors: 3, secret: 3}\n")?;
    let outfile = dir.path().join("never.json");
    let mut args = args_writing_to(&outfile);
    args.scenarios = Some(scenarios);
    let res = solve(&args).await;
    assert!(matches!(res, Err(SolveError::InvalidScenario { index: 1, .. })), "{:?}", res.err());
    assert!(!outfile.exists());
    Ok(())
}

#[tokio::test]
async fn existing_output_file_is_kept() -> Result<(), SolveError> {
    let dir = TempDir::new("eggdrop-rs")?;
    let outfile = dir.path().join("taken.json");
    std::fs::write(&outfile, "precious")?;
    let mut args = args_writing_to(&outfile);
    args.floors = Some(10);
    args.secret = Some(1);
    assert!(matches!(solve(&args).await, Err(SolveError::Io { .. })));
    assert_eq!(std::fs::read_to_string(&outfile)?, "precious");
    Ok(())
}
