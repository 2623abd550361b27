use anyhow::bail;
use plotters::style::RGBColor;

/// Resolve a color name or `#rrggbb` value to an RGB triple.
///
/// The named palette follows the usual plotting-library values, so `green`
/// is the dark (0, 128, 0) green rather than pure (0, 255, 0).
pub fn parse_color(name: &str) -> anyhow::Result<RGBColor> {
    let trimmed = name.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("invalid hex color {:?}", name);
        }
        let value = u32::from_str_radix(hex, 16)?;
        return Ok(RGBColor(
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ));
    }

    let color = match trimmed.to_ascii_lowercase().as_str() {
        "red" => RGBColor(255, 0, 0),
        "blue" => RGBColor(0, 0, 255),
        "green" => RGBColor(0, 128, 0),
        "orange" => RGBColor(255, 165, 0),
        "black" => RGBColor(0, 0, 0),
        "purple" => RGBColor(128, 0, 128),
        "brown" => RGBColor(165, 42, 42),
        "gray" | "grey" => RGBColor(128, 128, 128),
        "cyan" => RGBColor(0, 255, 255),
        "magenta" => RGBColor(255, 0, 255),
        "yellow" => RGBColor(255, 255, 0),
        "white" => RGBColor(255, 255, 255),
        _ => bail!("unknown color {:?}", name),
    };
    Ok(color)
}

/// The four classic dash patterns for reference markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl LineStyle {
    pub fn parse(token: &str) -> anyhow::Result<Self> {
        match token.trim() {
            "-" | "solid" => Ok(Self::Solid),
            "--" | "dashed" => Ok(Self::Dashed),
            "-." | "dashdot" => Ok(Self::DashDot),
            ":" | "dotted" => Ok(Self::Dotted),
            other => bail!("unknown line style {:?}", other),
        }
    }

    /// Cut the vertical span at `x` into the stroke segments of this style.
    ///
    /// Stroke and gap lengths are fractions of the span, so the pattern
    /// density does not depend on the axis scale.
    pub fn vertical_segments(&self, x: f64, y0: f64, y1: f64) -> Vec<Vec<(f64, f64)>> {
        let pattern: &[(f64, f64)] = match self {
            Self::Solid => return vec![vec![(x, y0), (x, y1)]],
            Self::Dashed => &[(0.030, 0.018)],
            Self::DashDot => &[(0.030, 0.014), (0.004, 0.014)],
            Self::Dotted => &[(0.004, 0.012)],
        };

        let span = y1 - y0;
        let mut segments = Vec::new();
        let mut cursor = 0.0;
        let mut index = 0;
        while cursor < 1.0 {
            let (stroke, gap) = pattern[index % pattern.len()];
            let top = (cursor + stroke).min(1.0);
            segments.push(vec![(x, y0 + span * cursor), (x, y0 + span * top)]);
            cursor += stroke + gap;
            index += 1;
        }
        segments
    }
}

/// Cyclic color/style assignment for reference markers.
#[derive(Debug, Clone)]
pub struct MarkerPalette {
    colors: Vec<RGBColor>,
    styles: Vec<LineStyle>,
}

impl MarkerPalette {
    pub fn from_config(colors: &[String], styles: &[String]) -> anyhow::Result<Self> {
        if colors.is_empty() {
            bail!("reference color list is empty");
        }
        if styles.is_empty() {
            bail!("reference style list is empty");
        }
        let colors = colors
            .iter()
            .map(|name| parse_color(name))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let styles = styles
            .iter()
            .map(|token| LineStyle::parse(token))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { colors, styles })
    }

    pub fn color(&self, index: usize) -> RGBColor {
        self.colors[index % self.colors.len()]
    }

    pub fn style(&self, index: usize) -> LineStyle {
        self.styles[index % self.styles.len()]
    }
}
