//! Chart appearance configuration
//!
//! Every field has a default, so a style file only needs the fields it changes.
//! Lengths are in typographic points (1/72 inch) and scale with [`RenderConfig::dpi`].

use plotters::chart::SeriesLabelPosition;
use serde::{Deserialize, Serialize};

use crate::{RenderError, color::SeriesColor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Figure size in inches.
    pub figure_size: FigureSize,
    /// Pixels per inch of the raster output.
    pub dpi: u32,
    /// Width of the statistic lines, in points.
    pub line_width: f64,
    pub font_family: String,
    pub fonts: FontSizes,
    pub theme: Theme,
    pub grid: GridStyle,
    pub legend_position: LegendPosition,
    pub annotation_box: AnnotationBoxStyle,
    pub labels: ChartLabels,
    pub bounding: BoundingBox,
    /// Fraction of the figure width given to the side panel holding the
    /// outside legend and the annotation box.
    pub side_panel_ratio: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            figure_size: FigureSize::default(),
            dpi: 300,
            line_width: 2.5,
            font_family: "sans-serif".to_owned(),
            fonts: FontSizes::default(),
            theme: Theme::default(),
            grid: GridStyle::default(),
            legend_position: LegendPosition::default(),
            annotation_box: AnnotationBoxStyle::default(),
            labels: ChartLabels::default(),
            bounding: BoundingBox::default(),
            side_panel_ratio: 0.24,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), RenderError> {
        let invalid = |reason: &str| {
            Err(RenderError::InvalidConfig {
                reason: reason.to_owned(),
            })
        };
        let FigureSize { width, height } = self.figure_size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return invalid("figure size must be positive");
        }
        if self.dpi == 0 {
            return invalid("dpi must be positive");
        }
        let (w, h) = self.pixel_size();
        if w < 16 || h < 16 {
            return invalid("figure is too small at this dpi");
        }
        if !(0.0..1.0).contains(&self.side_panel_ratio) {
            return invalid("side panel ratio must be in [0, 1)");
        }
        if !(0.0..=1.0).contains(&self.grid.alpha) || !(0.0..=1.0).contains(&self.annotation_box.alpha)
        {
            return invalid("alpha values must be in [0, 1]");
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return invalid("line width must be positive");
        }
        Ok(())
    }

    /// Raster size in pixels.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        let w = (self.figure_size.width * dpi).round().max(0.0);
        let h = (self.figure_size.height * dpi).round().max(0.0);
        (w as u32, h as u32)
    }

    /// Converts a length in points to pixels at the configured dpi.
    #[must_use]
    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.0
    }

    /// Same as [`points_to_pixels`](Self::points_to_pixels), rounded and at least 1.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn px(&self, points: f64) -> u32 {
        self.points_to_pixels(points).round().max(1.0) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

impl Default for FigureSize {
    fn default() -> Self {
        Self {
            width: 16.0,
            height: 9.0,
        }
    }
}

/// Font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontSizes {
    pub title: f64,
    pub axis_label: f64,
    pub tick: f64,
    pub legend: f64,
    pub annotation: f64,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 16.0,
            axis_label: 14.0,
            tick: 12.0,
            legend: 12.0,
            annotation: 14.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    pub background: SeriesColor,
    pub foreground: SeriesColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: SeriesColor::rgb(0, 0, 0),
            foreground: SeriesColor::rgb(0xff, 0xff, 0xff),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridStyle {
    pub visible: bool,
    pub dashed: bool,
    /// Opacity of the grid lines over the background.
    pub alpha: f64,
    /// Grid line width, in points.
    pub width: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            visible: true,
            dashed: true,
            alpha: 0.6,
            width: 0.8,
        }
    }
}

/// Where the series legend goes.
///
/// `outside` places it in the side panel next to the plotting area, aligned
/// with its top edge; the other positions are inside the plotting area.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendPosition {
    #[default]
    Outside,
    UpperLeft,
    UpperMiddle,
    UpperRight,
    MiddleLeft,
    MiddleRight,
    LowerLeft,
    LowerMiddle,
    LowerRight,
}

impl LegendPosition {
    /// The in-chart position, or `None` for [`LegendPosition::Outside`].
    #[must_use]
    pub fn inside(self) -> Option<SeriesLabelPosition> {
        Some(match self {
            Self::Outside => return None,
            Self::UpperLeft => SeriesLabelPosition::UpperLeft,
            Self::UpperMiddle => SeriesLabelPosition::UpperMiddle,
            Self::UpperRight => SeriesLabelPosition::UpperRight,
            Self::MiddleLeft => SeriesLabelPosition::MiddleLeft,
            Self::MiddleRight => SeriesLabelPosition::MiddleRight,
            Self::LowerLeft => SeriesLabelPosition::LowerLeft,
            Self::LowerMiddle => SeriesLabelPosition::LowerMiddle,
            Self::LowerRight => SeriesLabelPosition::LowerRight,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotationBoxStyle {
    pub face_color: SeriesColor,
    pub alpha: f64,
    pub border: bool,
    /// Inner padding, in points.
    pub padding: f64,
}

impl Default for AnnotationBoxStyle {
    fn default() -> Self {
        Self {
            face_color: SeriesColor::rgb(0xf5, 0xde, 0xb3),
            alpha: 0.5,
            border: true,
            padding: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartLabels {
    /// Title text before the experiment label.
    pub title_prefix: String,
    pub x_axis: String,
    pub y_axis: String,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            title_prefix: "GA Players' Winrates for".to_owned(),
            x_axis: "Generation".to_owned(),
            y_axis: "Winrate".to_owned(),
        }
    }
}

/// Space left around the figure content.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundingBox {
    /// A thin 0.1 inch border.
    #[default]
    Tight,
    /// A 0.5 inch border.
    Standard,
}

impl BoundingBox {
    #[must_use]
    pub fn padding_points(self) -> f64 {
        match self {
            Self::Tight => 7.2,
            Self::Standard => 36.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RenderConfig::default();
        config.validate().unwrap();
        assert_eq!(config.pixel_size(), (4800, 2700));
        assert_eq!(config.px(72.0), 300);
    }

    #[test]
    fn test_partial_override() {
        let config: RenderConfig = serde_json::from_str(
            r#"{"dpi": 100, "grid": {"visible": false}, "legend_position": "lower-right"}"#,
        )
        .unwrap();
        assert_eq!(config.dpi, 100);
        assert!(!config.grid.visible);
        assert_eq!(config.grid.alpha, 0.6);
        assert_eq!(config.legend_position, LegendPosition::LowerRight);
        assert_eq!(config.line_width, 2.5);
        assert_eq!(config.pixel_size(), (1600, 900));
    }

    #[test]
    fn test_color_overrides() {
        let config: RenderConfig = serde_json::from_str(
            r##"{"theme": {"background": "navy"}, "annotation_box": {"face_color": "#102030"}}"##,
        )
        .unwrap();
        assert_eq!(config.theme.background, SeriesColor::named("navy").unwrap());
        assert_eq!(config.annotation_box.face_color, SeriesColor::rgb(0x10, 0x20, 0x30));
        assert!(
            serde_json::from_str::<RenderConfig>(r#"{"theme": {"background": "nope"}}"#).is_err()
        );
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(serde_json::from_str::<RenderConfig>(r#"{"linewidth": 3}"#).is_err());
    }

    #[test]
    fn test_invalid_values() {
        let mut config = RenderConfig {
            dpi: 0,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());

        config.dpi = 100;
        config.grid.alpha = 1.5;
        assert!(config.validate().is_err());

        config.grid.alpha = 0.5;
        config.figure_size.width = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_legend_position() {
        assert!(LegendPosition::Outside.inside().is_none());
        assert!(LegendPosition::UpperRight.inside().is_some());
    }
}
