use std::path::Path;

use serde::Serialize;

use crate::config::SearchConfig;
use crate::engine::{Phase, Probe, SearchState};
use crate::errors::SolveError;
use crate::sweep::SweepReport;

/// What a single search did, in a form that can be saved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub floors: u64,
    pub secret: u64,
    pub k: u64,
    pub sequence: Vec<u64>,
    pub drops: Vec<Probe>,
    pub found_floor: Option<u64>,
    pub total_drops: usize,
    pub finished: bool,
    pub phase: Phase,
}

impl RunReport {
    pub fn new(config: &SearchConfig, state: &SearchState) -> Self {
        RunReport {
            floors: config.floors(),
            secret: config.secret(),
            k: state.k(),
            sequence: state.sequence().iter().collect(),
            drops: state.drops().to_vec(),
            found_floor: state.found_floor(),
            total_drops: state.total_drops(),
            finished: state.is_finished(),
            phase: state.phase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Run(RunReport),
    Sweep(SweepReport),
    Scenarios { runs: Vec<RunReport> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Yaml,
}

impl ReportFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ReportFormat::Yaml
            }
            _ => ReportFormat::Json,
        }
    }
}

impl Report {
    pub fn encode(&self, format: ReportFormat) -> Result<String, SolveError> {
        Ok(match format {
            ReportFormat::Json => serde_json::to_string_pretty(self)?,
            ReportFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ThresholdSearchEngine;

    fn ten_floors_report() -> Report {
        let config = SearchConfig::new(10, 7).unwrap();
        let mut engine = ThresholdSearchEngine::new(&config);
        Report::Run(RunReport::new(&config, engine.run_to_completion()))
    }

    #[test]
    fn test_json_report() {
        let json = ten_floors_report().encode(ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "run");
        assert_eq!(value["k"], 4);
        assert_eq!(value["sequence"], serde_json::json!([4, 7, 9]));
        assert_eq!(value["found_floor"], 7);
        assert_eq!(value["total_drops"], 5);
        assert_eq!(value["drops"][1], serde_json::json!({"floor": 7, "broke": true, "stage": "descent"}));
        assert_eq!(value["phase"]["phase"], "done");
        assert_eq!(value["phase"]["reason"], "found");
    }

    #[test]
    fn test_yaml_report() {
        let yaml = ten_floors_report().encode(ReportFormat::Yaml).unwrap();
        assert!(yaml.contains("kind: run"), "{}", yaml);
        assert!(yaml.contains("found_floor: 7"), "{}", yaml);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ReportFormat::from_path(Path::new("out.yml")), ReportFormat::Yaml);
        assert_eq!(ReportFormat::from_path(Path::new("out.YAML")), ReportFormat::Yaml);
        assert_eq!(ReportFormat::from_path(Path::new("out.json")), ReportFormat::Json);
        assert_eq!(ReportFormat::from_path(Path::new("out")), ReportFormat::Json);
    }
}
