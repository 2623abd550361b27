use anyhow::Context;
use serde::Serialize;
use stackcore::prelude::SkippedFile;
use std::fs;
use std::path::Path;

/// Machine-readable summary of one stacking run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub case_name: String,
    pub folder: String,
    pub grid_points: usize,
    pub folded: usize,
    pub skipped: Vec<SkippedFile>,
}

impl RunReport {
    pub fn write<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path_ref = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("serializing run report")?;
        fs::write(path_ref, json)
            .with_context(|| format!("writing run report {}", path_ref.display()))?;
        Ok(())
    }
}
