use ndarray::Array1;

use crate::prelude::{SkippedFile, StackError, StackResult};
use crate::spectrum::periodogram::Periodogram;
use crate::spectrum::stacked::StackedPeriodogram;
use crate::stacking::normalize;
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::RunMetrics;

/// Relative tolerance used when checking a file's frequency grid against
/// the one established by the first folded file. The comparison scale is
/// floored at 1.0, so below unit frequency this acts as an absolute bound
/// of the same magnitude.
pub const GRID_RTOL: f64 = 1e-9;

struct AccumulatorState {
    frecs: Array1<f64>,
    and_acc: Array1<f64>,
    or_acc: Array1<f64>,
}

/// Running AND/OR combination over a stream of tagged per-file results.
///
/// Each file is normalized to unit area before it multiplies into the AND
/// accumulator and adds into the OR accumulator. Per-file failures of any
/// kind are recorded in the error log and never abort the run.
pub struct StackAccumulator {
    state: Option<AccumulatorState>,
    skipped: Vec<SkippedFile>,
    logger: LogManager,
    metrics: RunMetrics,
}

impl StackAccumulator {
    pub fn new() -> Self {
        Self {
            state: None,
            skipped: Vec::new(),
            logger: LogManager::new(),
            metrics: RunMetrics::new(),
        }
    }

    /// Fold one tagged load result into the stack; returns whether the file
    /// made it in.
    pub fn fold(&mut self, name: &str, loaded: StackResult<Periodogram>) -> bool {
        match loaded.and_then(|pg| self.try_fold(pg)) {
            Ok(points) => {
                self.metrics.record_folded();
                self.logger
                    .record(&format!("folded {} ({} grid points)", name, points));
                true
            }
            Err(err) => {
                self.skip(name, &err);
                false
            }
        }
    }

    fn try_fold(&mut self, pg: Periodogram) -> StackResult<usize> {
        let Periodogram {
            frequencies,
            mut powers,
        } = pg;
        normalize::unit_area(frequencies.view(), &mut powers)?;

        if let Some(state) = self.state.as_mut() {
            Self::check_grid(&state.frecs, &frequencies)?;
            state.and_acc *= &powers;
            state.or_acc += &powers;
            return Ok(state.frecs.len());
        }

        let points = frequencies.len();
        self.state = Some(AccumulatorState {
            and_acc: powers.clone(),
            or_acc: powers,
            frecs: frequencies,
        });
        Ok(points)
    }

    fn check_grid(expected: &Array1<f64>, found: &Array1<f64>) -> StackResult<()> {
        if found.len() != expected.len() {
            return Err(StackError::GridMismatch(format!(
                "expected {} grid points, found {}",
                expected.len(),
                found.len()
            )));
        }
        for (i, (a, b)) in expected.iter().zip(found.iter()).enumerate() {
            let scale = a.abs().max(b.abs()).max(1.0);
            if (a - b).abs() > GRID_RTOL * scale {
                return Err(StackError::GridMismatch(format!(
                    "row {}: frequency {} != {}",
                    i + 1,
                    b,
                    a
                )));
            }
        }
        Ok(())
    }

    fn skip(&mut self, name: &str, err: &StackError) {
        let reason = err.to_string();
        self.logger.flag(&format!("skipping {}: {}", name, reason));
        self.metrics.record_skipped();
        self.skipped.push(SkippedFile::new(name, reason));
    }

    /// Renormalize both accumulated curves and assemble the result.
    ///
    /// Borrows the accumulator so the error log stays readable whether or
    /// not the run produced a stack.
    pub fn finish(&self) -> StackResult<StackedPeriodogram> {
        let state = self.state.as_ref().ok_or(StackError::NoValidInput)?;
        let and_curve = Self::renormalize(&state.frecs, &state.and_acc, "stacked AND curve")?;
        let or_curve = Self::renormalize(&state.frecs, &state.or_acc, "stacked OR curve")?;
        Ok(StackedPeriodogram {
            frequencies: state.frecs.clone(),
            and_curve,
            or_curve,
        })
    }

    fn renormalize(
        frecs: &Array1<f64>,
        curve: &Array1<f64>,
        label: &str,
    ) -> StackResult<Array1<f64>> {
        let mut scaled = curve.clone();
        normalize::unit_area(frecs.view(), &mut scaled).map_err(|err| match err {
            StackError::Normalization(msg) => {
                StackError::Normalization(format!("{}: {}", label, msg))
            }
            other => other,
        })?;
        Ok(scaled)
    }

    pub fn folded(&self) -> usize {
        self.metrics.snapshot().0
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    pub fn grid_len(&self) -> Option<usize> {
        self.state.as_ref().map(|state| state.frecs.len())
    }
}

impl Default for StackAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
