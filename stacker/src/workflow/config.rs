use anyhow::Context;
use serde::{Deserialize, Serialize};
use stackcore::spectrum::TableFormat;
use std::fs;
use std::path::{Path, PathBuf};

fn default_delimiter() -> char {
    ' '
}

fn default_comments() -> char {
    '#'
}

fn default_ref_colors() -> Vec<String> {
    vec![
        "red".into(),
        "blue".into(),
        "green".into(),
        "orange".into(),
    ]
}

fn default_ref_styles() -> Vec<String> {
    vec!["-".into(), "--".into(), "-.".into(), ":".into()]
}

/// A reference frequency drawn as a vertical marker on every chart.
///
/// Markers without a label stay out of the legend.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefLine {
    pub frequency: f64,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StackConfig {
    pub folder: PathBuf,
    #[serde(default)]
    pub case_name: Option<String>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_comments")]
    pub comments: char,
    #[serde(default)]
    pub ref_lines: Vec<RefLine>,
    #[serde(default = "default_ref_colors")]
    pub ref_colors: Vec<String>,
    #[serde(default = "default_ref_styles")]
    pub ref_styles: Vec<String>,
}

impl StackConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading stack config {}", path_ref.display()))?;
        let config: StackConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing stack config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        folder: PathBuf,
        case_name: Option<String>,
        delimiter: char,
        comments: char,
    ) -> Self {
        Self {
            folder,
            case_name,
            delimiter,
            comments,
            ref_lines: Vec::new(),
            ref_colors: default_ref_colors(),
            ref_styles: default_ref_styles(),
        }
    }

    pub fn table_format(&self) -> TableFormat {
        TableFormat::new(self.delimiter, self.comments)
    }

    /// Configured case name, or the folder's final path component.
    pub fn effective_case_name(&self) -> String {
        if let Some(name) = &self.case_name {
            return name.clone();
        }
        self.folder
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "stacked".to_string())
    }

    pub fn data_path(&self) -> PathBuf {
        self.folder
            .join(format!("{}_StackedPG.dat", self.effective_case_name()))
    }

    pub fn chart_path(&self, suffix: &str) -> PathBuf {
        self.folder.join(format!(
            "{}_StackedPG_{}.jpg",
            self.effective_case_name(),
            suffix
        ))
    }
}
