use anyhow::{bail, Context};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for generating synthetic periodogram inputs.
///
/// Every file shares one grid and one primary peak; amplitude jitter and a
/// random secondary peak make the files differ while keeping the primary
/// peak strong in all of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    pub files: usize,
    pub points: usize,
    pub start_frequency: f64,
    pub end_frequency: f64,
    pub peak_frequency: f64,
    pub peak_width: f64,
    pub noise: f64,
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            files: 5,
            points: 512,
            start_frequency: 0.1,
            end_frequency: 10.0,
            peak_frequency: 2.5,
            peak_width: 0.15,
            noise: 0.05,
            seed: 0,
        }
    }
}

/// Write `config.files` synthetic periodograms into `folder`.
///
/// Deterministic for a fixed seed; returns the paths written.
pub fn write_inputs(folder: &Path, config: &SyntheticConfig) -> anyhow::Result<Vec<PathBuf>> {
    if config.end_frequency <= config.start_frequency {
        bail!(
            "end frequency {} must exceed start frequency {}",
            config.end_frequency,
            config.start_frequency
        );
    }
    if config.points < 2 {
        bail!("grid needs at least 2 points");
    }
    fs::create_dir_all(folder)
        .with_context(|| format!("creating folder {}", folder.display()))?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let span = config.end_frequency - config.start_frequency;
    let step = span / (config.points - 1) as f64;
    let mut written = Vec::with_capacity(config.files);

    for index in 0..config.files {
        let amplitude = 0.8 + 0.4 * rng.gen::<f64>();
        let secondary = config.start_frequency + span * rng.gen::<f64>();

        let mut rows = format!("# synthetic periodogram {}\n", index);
        for i in 0..config.points {
            let frequency = config.start_frequency + step * i as f64;
            let mut power = 0.01
                + amplitude * lorentzian(frequency, config.peak_frequency, config.peak_width)
                + 0.3 * lorentzian(frequency, secondary, config.peak_width * 2.0);
            if config.noise > 0.0 {
                power += rng.gen_range(0.0..config.noise);
            }
            rows.push_str(&format!("{:.9} {:.9}\n", frequency, power));
        }

        let path = folder.join(format!("pg_{:03}.dat", index));
        fs::write(&path, rows)
            .with_context(|| format!("writing synthetic input {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

fn lorentzian(x: f64, center: f64, width: f64) -> f64 {
    let half = 0.5 * width;
    (half * half) / ((x - center) * (x - center) + half * half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn generator_writes_the_requested_files() {
        let dir = tempdir().unwrap();
        let config = SyntheticConfig {
            files: 3,
            points: 64,
            ..Default::default()
        };
        let written = write_inputs(dir.path(), &config).unwrap();
        assert_eq!(written.len(), 3);
        assert!(written[0].ends_with("pg_000.dat"));

        let text = fs::read_to_string(&written[1]).unwrap();
        assert_eq!(text.lines().count(), 65);
        assert!(text.starts_with("# synthetic periodogram 1"));
    }

    #[test]
    fn generator_is_deterministic_for_a_seed() {
        let config = SyntheticConfig {
            files: 2,
            points: 32,
            seed: 42,
            ..Default::default()
        };
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        write_inputs(first.path(), &config).unwrap();
        write_inputs(second.path(), &config).unwrap();

        for name in ["pg_000.dat", "pg_001.dat"] {
            let a = fs::read_to_string(first.path().join(name)).unwrap();
            let b = fs::read_to_string(second.path().join(name)).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn inverted_frequency_range_is_rejected() {
        let dir = tempdir().unwrap();
        let config = SyntheticConfig {
            start_frequency: 5.0,
            end_frequency: 1.0,
            ..Default::default()
        };
        assert!(write_inputs(dir.path(), &config).is_err());
    }

    #[test]
    fn noiseless_config_still_generates() {
        let dir = tempdir().unwrap();
        let config = SyntheticConfig {
            files: 1,
            points: 16,
            noise: 0.0,
            ..Default::default()
        };
        write_inputs(dir.path(), &config).unwrap();
    }
}
