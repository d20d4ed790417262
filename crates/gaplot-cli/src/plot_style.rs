use gaplot_render::{RenderConfig, SeriesStyle};
use serde::{Deserialize, Serialize};

/// Contents of a `--style` file.
///
/// Both sections are optional. `series_colors` entries override the default
/// palette one statistic at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PlotStyle {
    pub(crate) series_colors: SeriesStyle,
    pub(crate) render: RenderConfig,
}

impl PlotStyle {
    /// The default palette with this file's colors applied on top.
    pub(crate) fn series_style(&self) -> SeriesStyle {
        let mut style = SeriesStyle::default();
        style.merge(&self.series_colors);
        style
    }
}

#[cfg(test)]
mod tests {
    use gaplot_render::{LegendPosition, SeriesColor};

    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let style: PlotStyle = serde_json::from_str("{}").unwrap();
        assert_eq!(style, PlotStyle::default());
        assert_eq!(style.series_style(), SeriesStyle::default());
    }

    #[test]
    fn test_partial_overrides() {
        let style: PlotStyle = serde_json::from_str(
            r##"{
                "series_colors": {"Mean": "#ffffff"},
                "render": {"legend_position": "upper-left", "dpi": 150}
            }"##,
        )
        .unwrap();
        let series = style.series_style();
        assert_eq!(series.color("Mean"), Some(SeriesColor::rgb(0xff, 0xff, 0xff)));
        assert_eq!(series.color("Max"), SeriesColor::named("blue"));
        assert_eq!(style.render.legend_position, LegendPosition::UpperLeft);
        assert_eq!(style.render.dpi, 150);
    }

    #[test]
    fn test_default_round_trip() {
        let json = serde_json::to_string(&PlotStyle::default()).unwrap();
        let parsed: PlotStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, PlotStyle::default());
    }

    #[test]
    fn test_bad_color_is_rejected() {
        assert!(
            serde_json::from_str::<PlotStyle>(r#"{"series_colors": {"Max": "blurple"}}"#).is_err()
        );
    }
}
