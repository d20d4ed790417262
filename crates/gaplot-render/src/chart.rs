//! Chart layout and drawing
//!
//! [`ChartPlan`] holds everything derived from the statistics table before a
//! single pixel is drawn: resolved colors, line segments, axis ranges and the
//! annotation text. Drawing then only has to lay it out on a backend.

use std::ops::Range;

use gaplot_aggregate::{RunMetadata, Statistic, StatisticsTable};
use plotters::{
    coord::{Shift, ranged1d::Ranged},
    drawing::DrawingAreaErrorKind,
    prelude::*,
};

use crate::{RenderError, color::SeriesColor, config::RenderConfig, style::SeriesStyle};

const X_LABELS: usize = 10;
const Y_LABELS: usize = 10;
const RANGE_PADDING: f64 = 0.05;

/// What the chart is about: the experiment label and, when known, its
/// configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleContext {
    pub label: String,
    pub metadata: Option<RunMetadata>,
}

impl TitleContext {
    pub fn new<S>(label: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            label: label.into(),
            metadata: None,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Option<RunMetadata>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Chart title.
    ///
    /// The generation count is only mentioned when metadata is present.
    #[must_use]
    pub fn title(&self, prefix: &str) -> String {
        match &self.metadata {
            Some(metadata) => format!(
                "{prefix} {} in {} generations",
                self.label, metadata.total_generations
            ),
            None => format!("{prefix} {}", self.label),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SeriesPlan {
    pub(crate) statistic: Statistic,
    pub(crate) color: SeriesColor,
    /// Runs of consecutive finite points; a non-finite value ends a run.
    pub(crate) segments: Vec<Vec<(f64, f64)>>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChartPlan {
    pub(crate) title: String,
    pub(crate) series: Vec<SeriesPlan>,
    pub(crate) x_range: Range<f64>,
    pub(crate) y_range: Range<f64>,
    pub(crate) annotation: Vec<String>,
}

impl ChartPlan {
    /// Fails if `style` has no color for one of the table's statistics.
    pub(crate) fn new(
        stats: &StatisticsTable,
        style: &SeriesStyle,
        context: &TitleContext,
        config: &RenderConfig,
    ) -> Result<Self, RenderError> {
        let colors = style.resolve(stats.statistics())?;

        let series = colors
            .into_iter()
            .map(|(statistic, color)| {
                let points = stats
                    .series(statistic)
                    .into_iter()
                    .flatten()
                    .map(|(generation, value)| (generation_coord(generation), value));
                SeriesPlan {
                    statistic,
                    color,
                    segments: split_segments(points),
                }
            })
            .collect::<Vec<_>>();

        let x_range = padded_range(stats.generations().map(generation_coord));
        let y_range = padded_range(stats.rows().iter().flat_map(|r| r.values.iter().copied()));

        let annotation = context
            .metadata
            .as_ref()
            .map(RunMetadata::annotation_lines)
            .unwrap_or_default();

        Ok(Self {
            title: context.title(&config.labels.title_prefix),
            series,
            x_range,
            y_range,
            annotation,
        })
    }

    pub(crate) fn draw<DB>(
        &self,
        root: &DrawingArea<DB, Shift>,
        config: &RenderConfig,
    ) -> Result<(), RenderError>
    where
        DB: DrawingBackend,
    {
        let fg = RGBColor::from(config.theme.foreground);
        let bg = RGBColor::from(config.theme.background);
        let family = config.font_family.as_str();
        let font = |points: f64| {
            (family, config.points_to_pixels(points))
                .into_font()
                .color(&fg)
        };

        root.fill(&bg).map_err(draw_error)?;
        let pad = to_pixels(config.points_to_pixels(config.bounding.padding_points()));
        let body = root
            .margin(pad, pad, pad, pad)
            .titled(&self.title, font(config.fonts.title))
            .map_err(draw_error)?;

        let (width, _) = body.dim_in_pixel();
        let legend = config.legend_position.inside();
        let outside_legend = legend.is_none();
        let side_width = if outside_legend || !self.annotation.is_empty() {
            (f64::from(width) * config.side_panel_ratio).round()
        } else {
            0.0
        };
        let (plot_area, side_panel) =
            body.split_horizontally(to_pixels(f64::from(width) - side_width));

        let tick = font(config.fonts.tick);
        let axis = font(config.fonts.axis_label);
        let mut chart = ChartBuilder::on(&plot_area)
            .margin(to_pixels(config.points_to_pixels(6.0)))
            .x_label_area_size(to_pixels(config.points_to_pixels(
                config.fonts.tick * 1.6 + config.fonts.axis_label * 1.6,
            )))
            .y_label_area_size(to_pixels(config.points_to_pixels(
                config.fonts.tick * 3.5 + config.fonts.axis_label * 1.6,
            )))
            .build_cartesian_2d(self.x_range.clone(), self.y_range.clone())
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(X_LABELS)
            .y_labels(Y_LABELS)
            .x_label_formatter(&|x| format!("{x:.0}"))
            .x_desc(config.labels.x_axis.as_str())
            .y_desc(config.labels.y_axis.as_str())
            .axis_style(fg.stroke_width(config.px(1.0)))
            .label_style(tick)
            .axis_desc_style(axis)
            .draw()
            .map_err(draw_error)?;

        if config.grid.visible {
            let (plot_w, plot_h) = chart.plotting_area().dim_in_pixel();
            let grid_style = fg
                .mix(config.grid.alpha)
                .stroke_width(config.px(config.grid.width));
            let (dash_px, gap_px) = if config.grid.dashed {
                (config.points_to_pixels(3.7), config.points_to_pixels(1.6))
            } else {
                (f64::INFINITY, 0.0)
            };
            let Range { start: x0, end: x1 } = self.x_range;
            let Range { start: y0, end: y1 } = self.y_range;
            let x_scale = (x1 - x0) / f64::from(plot_w.max(1));
            let y_scale = (y1 - y0) / f64::from(plot_h.max(1));

            let spec = chart.as_coord_spec();
            let x_keys = spec.x_spec().key_points(X_LABELS);
            let y_keys = spec.y_spec().key_points(Y_LABELS);

            let vertical = x_keys.into_iter().flat_map(|x| {
                dash_segments(y0, y1, dash_px * y_scale, gap_px * y_scale)
                    .into_iter()
                    .map(move |(a, b)| vec![(x, a), (x, b)])
            });
            let horizontal = y_keys.into_iter().flat_map(|y| {
                dash_segments(x0, x1, dash_px * x_scale, gap_px * x_scale)
                    .into_iter()
                    .map(move |(a, b)| vec![(a, y), (b, y)])
            });
            chart
                .draw_series(
                    vertical
                        .chain(horizontal)
                        .map(|path| PathElement::new(path, grid_style)),
                )
                .map_err(draw_error)?;
        }

        let line_width = config.px(config.line_width);
        for series in &self.series {
            let style = RGBColor::from(series.color).stroke_width(line_width);
            let legend_width = i32::try_from(config.px(20.0)).unwrap_or(i32::MAX);
            chart
                .draw_series(
                    series
                        .segments
                        .iter()
                        .map(|segment| PathElement::new(segment.clone(), style)),
                )
                .map_err(draw_error)?
                .label(series.statistic.label())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + legend_width, y)], style)
                });
        }

        if let Some(position) = legend {
            chart
                .configure_series_labels()
                .position(position)
                .background_style(bg.mix(0.8))
                .border_style(fg)
                .label_font(font(config.fonts.legend))
                .draw()
                .map_err(draw_error)?;
        }

        // The side panel starts at the top edge of the plotting area.
        let (_, top) = chart.plotting_area().get_base_pixel();
        let (_, panel_top) = side_panel.get_base_pixel();
        let mut cursor = top - panel_top;
        if outside_legend {
            cursor = self.draw_outside_legend(&side_panel, config, cursor)?;
            cursor += to_pixels(config.points_to_pixels(config.fonts.legend));
        }
        if !self.annotation.is_empty() {
            self.draw_annotation(&side_panel, config, cursor)?;
        }

        Ok(())
    }

    /// Draws the legend box at `top` and returns the y coordinate below it.
    fn draw_outside_legend<DB>(
        &self,
        panel: &DrawingArea<DB, Shift>,
        config: &RenderConfig,
        top: i32,
    ) -> Result<i32, RenderError>
    where
        DB: DrawingBackend,
    {
        let fg = RGBColor::from(config.theme.foreground);
        let bg = RGBColor::from(config.theme.background);
        let font_px = config.points_to_pixels(config.fonts.legend);
        let line_height = to_pixels(font_px * 1.5);
        let left = to_pixels(font_px);
        let sample = to_pixels(font_px * 2.0);
        let inner = to_pixels(font_px * 0.6);
        let (panel_width, _) = panel.dim_in_pixel();
        let right = i32::try_from(panel_width).unwrap_or(i32::MAX) - inner;
        let count = i32::try_from(self.series.len()).unwrap_or(i32::MAX);
        let bottom = top + inner * 2 + line_height * count;

        panel
            .draw(&Rectangle::new([(left, top), (right, bottom)], bg.mix(0.8).filled()))
            .map_err(draw_error)?;
        panel
            .draw(&Rectangle::new([(left, top), (right, bottom)], fg.stroke_width(1)))
            .map_err(draw_error)?;

        let text = (config.font_family.as_str(), font_px).into_font().color(&fg);
        let line_width = config.px(config.line_width);
        let mut y = top + inner;
        for series in &self.series {
            let mid = y + line_height / 2;
            let style = RGBColor::from(series.color).stroke_width(line_width);
            panel
                .draw(&PathElement::new(
                    vec![(left + inner, mid), (left + inner + sample, mid)],
                    style,
                ))
                .map_err(draw_error)?;
            panel
                .draw(&Text::new(
                    series.statistic.label(),
                    (left + inner * 2 + sample, mid - to_pixels(font_px / 2.0)),
                    text.clone(),
                ))
                .map_err(draw_error)?;
            y += line_height;
        }
        Ok(bottom)
    }

    fn draw_annotation<DB>(
        &self,
        panel: &DrawingArea<DB, Shift>,
        config: &RenderConfig,
        top: i32,
    ) -> Result<(), RenderError>
    where
        DB: DrawingBackend,
    {
        let style = &config.annotation_box;
        let font_px = config.points_to_pixels(config.fonts.annotation);
        let line_height = to_pixels(font_px * 1.3);
        let padding = to_pixels(config.points_to_pixels(style.padding));
        let left = to_pixels(config.points_to_pixels(config.fonts.legend));
        let (panel_width, _) = panel.dim_in_pixel();
        let right = i32::try_from(panel_width).unwrap_or(i32::MAX) - padding;
        let count = i32::try_from(self.annotation.len()).unwrap_or(i32::MAX);
        let bottom = top + padding * 2 + line_height * count;

        let face = RGBColor::from(style.face_color);
        panel
            .draw(&Rectangle::new(
                [(left, top), (right, bottom)],
                face.mix(style.alpha).filled(),
            ))
            .map_err(draw_error)?;
        if style.border {
            panel
                .draw(&Rectangle::new(
                    [(left, top), (right, bottom)],
                    RGBColor::from(config.theme.foreground).stroke_width(1),
                ))
                .map_err(draw_error)?;
        }

        let text = (config.font_family.as_str(), font_px)
            .into_font()
            .color(&RGBColor::from(config.theme.foreground));
        let mut y = top + padding;
        for line in &self.annotation {
            panel
                .draw(&Text::new(line.as_str(), (left + padding, y), text.clone()))
                .map_err(draw_error)?;
            y += line_height;
        }
        Ok(())
    }
}

pub(crate) fn draw_error<E>(err: DrawingAreaErrorKind<E>) -> RenderError
where
    E: std::error::Error + Send + Sync,
{
    RenderError::Draw {
        message: err.to_string(),
    }
}

#[expect(clippy::cast_precision_loss)]
fn generation_coord(generation: i64) -> f64 {
    generation as f64
}

#[expect(clippy::cast_possible_truncation)]
fn to_pixels(value: f64) -> i32 {
    value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

fn split_segments<I>(points: I) -> Vec<Vec<(f64, f64)>>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut segments = vec![];
    let mut current = vec![];
    for (x, y) in points {
        if y.is_finite() {
            current.push((x, y));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Range covering every finite value with a small margin on both sides.
///
/// Falls back to `0..1` without finite values, and widens a degenerate range
/// around its single value.
fn padded_range<I>(values: I) -> Range<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return 0.0..1.0;
    }
    let span = max - min;
    if span == 0.0 {
        let half = (min.abs() * RANGE_PADDING).max(0.5);
        return (min - half)..(max + half);
    }
    (min - span * RANGE_PADDING)..(max + span * RANGE_PADDING)
}

/// Splits `start..end` into dashes of length `dash` separated by `gap`.
fn dash_segments(start: f64, end: f64, dash: f64, gap: f64) -> Vec<(f64, f64)> {
    if !(dash > 0.0 && gap > 0.0) || dash >= end - start {
        return vec![(start, end)];
    }
    let mut dashes = vec![];
    let mut pos = start;
    while pos < end {
        dashes.push((pos, (pos + dash).min(end)));
        pos += dash + gap;
    }
    dashes
}

#[cfg(test)]
mod tests {
    use gaplot_aggregate::{AggregateOptions, RawColumn, RawRunTable, RunParameters, aggregate};

    use super::*;

    fn stats(cells: [[&str; 3]; 2]) -> StatisticsTable {
        let raw = RawRunTable::from_columns(
            "tournament",
            vec![1, 2, 3],
            vec![
                RawColumn::new("population 1 winrate", cells[0]),
                RawColumn::new("population 2 winrate", cells[1]),
            ],
        )
        .unwrap();
        aggregate(&raw, None, &AggregateOptions::default()).unwrap().0
    }

    fn metadata() -> RunMetadata {
        let params = RunParameters::from_fields([
            ("Total Generations", "200"),
            ("Total Populations", "30"),
            ("Total Games", "100"),
            ("Mutation Rate", "0.05"),
            ("Crossover Rate", "0.7"),
            ("Number of Elites", "2"),
        ]);
        RunMetadata::from_parameters(&params).unwrap()
    }

    #[test]
    fn test_title_with_metadata() {
        let context = TitleContext::new("Run42").with_metadata(Some(metadata()));
        assert_eq!(
            context.title("GA Players' Winrates for"),
            "GA Players' Winrates for Run42 in 200 generations"
        );
    }

    #[test]
    fn test_plan_without_metadata() {
        let plan = ChartPlan::new(
            &stats([["10", "15", "0"], ["20", "15", "30"]]),
            &SeriesStyle::default(),
            &TitleContext::new("Run42"),
            &RenderConfig::default(),
        )
        .unwrap();
        assert_eq!(plan.title, "GA Players' Winrates for Run42");
        assert!(plan.annotation.is_empty());
        assert_eq!(plan.series.len(), 7);
        assert_eq!(plan.series[0].statistic, Statistic::Max);
        assert_eq!(plan.series[0].color, SeriesColor::named("blue").unwrap());
    }

    #[test]
    fn test_plan_annotation() {
        let plan = ChartPlan::new(
            &stats([["10", "15", "0"], ["20", "15", "30"]]),
            &SeriesStyle::default(),
            &TitleContext::new("Run42").with_metadata(Some(metadata())),
            &RenderConfig::default(),
        )
        .unwrap();
        assert_eq!(
            plan.annotation,
            vec![
                "Total Generations = 200",
                "Total Populations = 30",
                "Total Games = 100",
                "Mutation rate = 0.05",
                "Crossover rate = 0.7",
                "Number of elites = 2",
            ]
        );
    }

    #[test]
    fn test_missing_values_leave_gaps() {
        let plan = ChartPlan::new(
            &stats([["10", "", "0"], ["20", "NaN", "30"]]),
            &SeriesStyle::default(),
            &TitleContext::new("gaps"),
            &RenderConfig::default(),
        )
        .unwrap();
        let max = &plan.series[0];
        assert_eq!(max.segments, vec![vec![(1.0, 20.0)], vec![(3.0, 30.0)]]);
    }

    #[test]
    fn test_missing_color_fails() {
        let mut style = SeriesStyle::default();
        style.remove("STD");
        let err = ChartPlan::new(
            &stats([["10", "15", "0"], ["20", "15", "30"]]),
            &style,
            &TitleContext::new("Run42"),
            &RenderConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RenderError::MissingSeriesColor {
                statistic: Statistic::Std
            }
        ));
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
        assert_eq!(padded_range([f64::NAN]), 0.0..1.0);
        assert_eq!(padded_range([2.0, 2.0]), 1.5..2.5);
        let range = padded_range([0.0, 10.0, f64::NAN]);
        assert!((range.start + 0.5).abs() < 1e-12);
        assert!((range.end - 10.5).abs() < 1e-12);
    }

    #[test]
    fn test_dash_segments() {
        assert_eq!(
            dash_segments(0.0, 10.0, 3.0, 1.0),
            vec![(0.0, 3.0), (4.0, 7.0), (8.0, 10.0)]
        );
        assert_eq!(dash_segments(0.0, 1.0, f64::INFINITY, 0.0), vec![(0.0, 1.0)]);
    }
}
