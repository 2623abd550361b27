use crate::render::style::MarkerPalette;
use crate::workflow::config::RefLine;
use anyhow::Context;
use clap::ValueEnum;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use stackcore::spectrum::StackedPeriodogram;
use std::ops::Range;
use std::path::Path;

/// Chart files a run can write.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlotMode {
    Combined,
    Separate,
}

const AND_COLOR: RGBColor = RGBColor(0, 102, 204);
const OR_COLOR: RGBColor = RGBColor(204, 102, 0);

const COMBINED_SIZE: (u32, u32) = (1500, 500);
const SEPARATE_SIZE: (u32, u32) = (1500, 1000);

/// Draws the stacked curves with the configured reference markers.
pub struct ChartRenderer<'a> {
    case_name: &'a str,
    ref_lines: &'a [RefLine],
    palette: MarkerPalette,
}

impl<'a> ChartRenderer<'a> {
    pub fn new(case_name: &'a str, ref_lines: &'a [RefLine], palette: MarkerPalette) -> Self {
        Self {
            case_name,
            ref_lines,
            palette,
        }
    }

    /// Both curves on one axes, legend covering curves and labelled markers.
    pub fn combined(&self, stacked: &StackedPeriodogram, path: &Path) -> anyhow::Result<()> {
        let root = BitMapBackend::new(path, COMBINED_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let x_range = Self::x_range(stacked);
        let y_top = Self::ceiling(stacked.rows().flat_map(|row| [row.and_power, row.or_power]));

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("{} Stacked periodograms", self.case_name),
                ("sans-serif", 30),
            )
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, 0.0..y_top)?;

        chart
            .configure_mesh()
            .x_desc("Frequency")
            .y_desc("Normalized power")
            .label_style(("sans-serif", 18))
            .axis_desc_style(("sans-serif", 22))
            .light_line_style(&WHITE)
            .draw()?;

        let and_points: Vec<(f64, f64)> = stacked
            .rows()
            .map(|row| (row.frequency, row.and_power))
            .collect();
        chart
            .draw_series(LineSeries::new(and_points, &AND_COLOR))?
            .label("AND operation")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], AND_COLOR));

        let or_points: Vec<(f64, f64)> = stacked
            .rows()
            .map(|row| (row.frequency, row.or_power))
            .collect();
        chart
            .draw_series(LineSeries::new(or_points, &OR_COLOR))?
            .label("OR operation")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], OR_COLOR));

        self.draw_ref_lines(&mut chart, y_top, true)?;

        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .label_font(("sans-serif", 18))
            .draw()?;

        root.present()
            .with_context(|| format!("writing chart {}", path.display()))?;
        Ok(())
    }

    /// Two stacked panels, AND above OR, markers on both. The AND panel
    /// carries the marker legend; the OR panel repeats the markers only.
    pub fn separate(&self, stacked: &StackedPeriodogram, path: &Path) -> anyhow::Result<()> {
        let root = BitMapBackend::new(path, SEPARATE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled(
            &format!("{} Stacked periodograms", self.case_name),
            ("sans-serif", 30),
        )?;
        let panels = root.split_evenly((2, 1));

        let and_points: Vec<(f64, f64)> = stacked
            .rows()
            .map(|row| (row.frequency, row.and_power))
            .collect();
        self.panel(&panels[0], "AND operation", and_points, AND_COLOR, stacked, true)?;

        let or_points: Vec<(f64, f64)> = stacked
            .rows()
            .map(|row| (row.frequency, row.or_power))
            .collect();
        self.panel(&panels[1], "OR operation", or_points, OR_COLOR, stacked, false)?;

        root.present()
            .with_context(|| format!("writing chart {}", path.display()))?;
        Ok(())
    }

    fn panel(
        &self,
        area: &DrawingArea<BitMapBackend, Shift>,
        title: &str,
        points: Vec<(f64, f64)>,
        color: RGBColor,
        stacked: &StackedPeriodogram,
        with_labels: bool,
    ) -> anyhow::Result<()> {
        let y_top = Self::ceiling(points.iter().map(|&(_, y)| y));
        let mut chart = ChartBuilder::on(area)
            .caption(title, ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(Self::x_range(stacked), 0.0..y_top)?;

        chart
            .configure_mesh()
            .x_desc("Frequency")
            .y_desc("Normalized power")
            .label_style(("sans-serif", 16))
            .axis_desc_style(("sans-serif", 20))
            .light_line_style(&WHITE)
            .draw()?;

        chart.draw_series(LineSeries::new(points, &color))?;
        self.draw_ref_lines(&mut chart, y_top, with_labels)?;

        if with_labels && self.ref_lines.iter().any(|line| line.label.is_some()) {
            chart
                .configure_series_labels()
                .border_style(&BLACK)
                .background_style(&WHITE.mix(0.8))
                .label_font(("sans-serif", 16))
                .draw()?;
        }
        Ok(())
    }

    fn draw_ref_lines(
        &self,
        chart: &mut ChartContext<BitMapBackend, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
        y_top: f64,
        with_labels: bool,
    ) -> anyhow::Result<()> {
        for (index, line) in self.ref_lines.iter().enumerate() {
            let color = self.palette.color(index);
            let style = self.palette.style(index);
            let segments = style.vertical_segments(line.frequency, 0.0, y_top);
            for (i, segment) in segments.into_iter().enumerate() {
                let series = chart.draw_series(std::iter::once(PathElement::new(
                    segment,
                    color.stroke_width(2),
                )))?;
                if i == 0 && with_labels {
                    if let Some(label) = &line.label {
                        series.label(label.as_str()).legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], color)
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn x_range(stacked: &StackedPeriodogram) -> Range<f64> {
        let start = stacked.frequencies.first().copied().unwrap_or(0.0);
        let end = stacked.frequencies.last().copied().unwrap_or(1.0);
        if end > start {
            start..end
        } else {
            start..start + 1.0
        }
    }

    fn ceiling<I: Iterator<Item = f64>>(values: I) -> f64 {
        let mut top = 0.0f64;
        for value in values {
            if value.is_finite() {
                top = top.max(value);
            }
        }
        if top <= 0.0 {
            1.0
        } else {
            top * 1.1
        }
    }
}
