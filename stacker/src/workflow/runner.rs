use crate::workflow::config::StackConfig;
use anyhow::Context;
use stackcore::prelude::{SkippedFile, StackError, StackResult};
use stackcore::spectrum::{Periodogram, StackedPeriodogram};
use stackcore::stacking::StackAccumulator;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct RunSummary {
    pub stacked: StackedPeriodogram,
    pub folded: usize,
    pub skipped: Vec<SkippedFile>,
}

#[derive(Clone)]
pub struct Runner {
    config: StackConfig,
}

impl Runner {
    pub fn new(config: StackConfig) -> Self {
        Self { config }
    }

    /// Regular files directly inside the work folder, in directory order.
    pub fn discover(&self) -> anyhow::Result<Vec<PathBuf>> {
        let folder = &self.config.folder;
        let entries = fs::read_dir(folder)
            .with_context(|| format!("reading folder {}", folder.display()))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry =
                entry.with_context(|| format!("reading folder {}", folder.display()))?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }
        Ok(files)
    }

    fn load(&self, path: &Path) -> StackResult<Periodogram> {
        let text =
            fs::read_to_string(path).map_err(|err| StackError::Load(err.to_string()))?;
        self.config.table_format().parse(&text)
    }

    /// Feed every discovered file through the accumulator.
    pub fn ingest(&self) -> anyhow::Result<StackAccumulator> {
        let mut accumulator = StackAccumulator::new();
        for path in self.discover()? {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let loaded = self.load(&path);
            accumulator.fold(&name, loaded);
        }
        Ok(accumulator)
    }

    pub fn execute(&self) -> anyhow::Result<RunSummary> {
        let accumulator = self.ingest()?;
        let stacked = accumulator
            .finish()
            .with_context(|| self.failure_context(accumulator.skipped()))?;
        Ok(RunSummary {
            stacked,
            folded: accumulator.folded(),
            skipped: accumulator.skipped().to_vec(),
        })
    }

    /// Failure text carrying the skip log of the aborted run.
    fn failure_context(&self, skipped: &[SkippedFile]) -> String {
        let mut message = format!("stacking {}", self.config.folder.display());
        if !skipped.is_empty() {
            let reasons: Vec<String> = skipped
                .iter()
                .map(|entry| format!("{}: {}", entry.name, entry.reason))
                .collect();
            message.push_str(&format!(
                " ({} skipped: {})",
                skipped.len(),
                reasons.join("; ")
            ));
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn runner_for(folder: &Path) -> Runner {
        Runner::new(StackConfig::from_args(
            folder.to_path_buf(),
            None,
            ' ',
            '#',
        ))
    }

    #[test]
    fn discover_lists_only_regular_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.dat"), "1 1\n2 1\n").unwrap();
        fs::write(dir.path().join("b.dat"), "1 1\n2 1\n").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.dat"), "1 1\n2 1\n").unwrap();

        let files = runner_for(dir.path()).discover().unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn execute_stacks_every_loadable_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.dat"), "1.0 1.0\n2.0 1.0\n3.0 1.0\n").unwrap();
        fs::write(dir.path().join("b.dat"), "1.0 2.0\n2.0 2.0\n3.0 2.0\n").unwrap();
        fs::write(dir.path().join("broken.dat"), "1.0 watts\n").unwrap();

        let summary = runner_for(dir.path()).execute().unwrap();
        assert_eq!(summary.folded, 2);
        assert_eq!(summary.stacked.len(), 3);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].name, "broken.dat");
    }

    #[test]
    fn synthesized_inputs_stack_to_unit_area_curves() {
        use crate::generator::synthetic::{self, SyntheticConfig};
        use stackcore::math::QuadratureHelper;

        let dir = tempdir().unwrap();
        let config = SyntheticConfig {
            files: 3,
            points: 128,
            seed: 7,
            ..Default::default()
        };
        synthetic::write_inputs(dir.path(), &config).unwrap();

        let summary = runner_for(dir.path()).execute().unwrap();
        assert_eq!(summary.folded, 3);
        assert!(summary.skipped.is_empty());

        let and_area = QuadratureHelper::trapezoid(
            summary.stacked.frequencies.view(),
            summary.stacked.and_curve.view(),
        );
        let or_area = QuadratureHelper::trapezoid(
            summary.stacked.frequencies.view(),
            summary.stacked.or_curve.view(),
        );
        assert!((and_area - 1.0).abs() < 1e-9);
        assert!((or_area - 1.0).abs() < 1e-9);
    }

    #[test]
    fn execute_then_export_writes_the_expected_table() {
        use crate::render::export;

        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.dat"), "1.0 1.0\n2.0 1.0\n3.0 1.0\n").unwrap();
        fs::write(dir.path().join("b.dat"), "1.0 2.0\n2.0 2.0\n3.0 2.0\n").unwrap();
        fs::write(dir.path().join("c.dat"), "1.0 0.0\n2.0 0.0\n3.0 4.0\n").unwrap();

        let config =
            StackConfig::from_args(dir.path().to_path_buf(), Some("trio".into()), ' ', '#');
        let summary = Runner::new(config.clone()).execute().unwrap();
        assert!(format!("{:?}", summary).contains("folded: 3"));

        let path = config.data_path();
        export::write_table(&summary.stacked, &path, ' ', '#', true).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "#frec AND OR");
        assert_eq!(lines[1], "1.000000000 0.000000000 0.333333333");
        assert_eq!(lines[3], "3.000000000 2.000000000 1.000000000");
    }

    #[test]
    fn execute_fails_on_an_empty_folder() {
        let dir = tempdir().unwrap();
        let err = runner_for(dir.path()).execute().unwrap_err();
        assert!(err.to_string().contains("stacking"));
    }

    #[test]
    fn fatal_runs_report_the_skipped_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken.dat"), "1.0 watts\n").unwrap();

        let err = runner_for(dir.path()).execute().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("1 skipped"));
        assert!(message.contains("broken.dat"));
        assert!(message.contains("invalid power value"));
    }

    #[test]
    fn missing_folder_reports_its_path() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("missing");
        let err = runner_for(&gone).execute().unwrap_err();
        assert!(err.to_string().contains("reading folder"));
    }
}
