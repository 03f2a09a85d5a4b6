//! Lists of searches read from a YAML file, such as
//!
//! ```yaml
//! - floors: 10
//!   secret: 7
//! - floors: 100
//!   secret: 42
//! ```

use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::config::SearchConfig;
use crate::errors::SolveError;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct Scenario {
    floors: u64,
    secret: u64,
}

pub fn parse_scenarios(yaml: &str) -> Result<Vec<SearchConfig>, SolveError> {
    let scenarios: Vec<Scenario> = serde_yaml::from_str(yaml)?;
    scenarios
        .into_iter()
        .enumerate()
        .map(|(index, Scenario { floors, secret })| {
            SearchConfig::new(floors, secret).map_err(|reason| SolveError::InvalidScenario { index, reason })
        })
        .collect()
}

pub async fn load_scenarios(path: &Path) -> Result<Vec<SearchConfig>, SolveError> {
    debug!("Loading scenarios from {:?}", path);
    let yaml = tokio::fs::read_to_string(path).await?;
    parse_scenarios(&yaml)
}
