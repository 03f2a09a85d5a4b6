use std::fs::OpenOptions;
use std::path::Path;

use log::{info, warn};

use crate::errors::SolveError;
use crate::report::{Report, ReportFormat};

/// Creates the output file before the search starts, so that an existing file
/// is never overwritten and a bad path is reported early
pub fn reserve_output_file(path: &Path) -> Result<(), SolveError> {
    OpenOptions::new().write(true).create_new(true).open(path)?;
    Ok(())
}

/// Removes a reserved output file that no report was written to
pub fn release_output_file(path: &Path) {
    if let Err(err) = std::fs::remove_file(path) {
        warn!("Unable to remove the unused output file {:?}: {}", path, err);
    }
}

pub async fn write_report(path: &Path, report: &Report) -> Result<(), SolveError> {
    let format = ReportFormat::from_path(path);
    let contents = report.encode(format)?;
    tokio::fs::write(path, contents).await?;
    info!("Saved the {:?} report to {:?}", format, path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;
    use crate::engine::ThresholdSearchEngine;
    use crate::report::RunReport;
    use crate::SearchConfig;

    #[test]
    fn test_reserve_refuses_existing_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("eggdrop-rs")?;
        let path = dir.path().join("report.json");
        reserve_output_file(&path)?;
        assert!(path.exists());
        assert!(matches!(reserve_output_file(&path), Err(SolveError::Io { .. })));
        Ok(())
    }

    #[test]
    fn test_released_file_can_be_reserved_again() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("eggdrop-rs")?;
        let path = dir.path().join("report.json");
        reserve_output_file(&path)?;
        release_output_file(&path);
        assert!(!path.exists());
        reserve_output_file(&path)?;
        assert!(path.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_write_yaml_report() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("eggdrop-rs")?;
        let path = dir.path().join("report.yaml");
        reserve_output_file(&path)?;
        let config = SearchConfig::new(10, 0)?;
        let mut engine = ThresholdSearchEngine::new(&config);
        let report = Report::Run(RunReport::new(&config, engine.run_to_completion()));
        write_report(&path, &report).await?;
        let written = std::fs::read_to_string(&path)?;
        assert!(written.contains("total_drops: 2"), "{}", written);
        Ok(())
    }
}
