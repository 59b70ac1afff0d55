//! Typed chart descriptors.
//!
//! The structs serialise into the configuration object Chart.js takes as the
//! second constructor argument, so the browser side can hand them over
//! without any further translation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::theme::{Font, Theme};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Scatter,
    Doughnut,
}

impl ChartKind {
    /// Radial charts are drawn inside a circle and want a squarer canvas.
    pub fn is_radial(self) -> bool {
        matches!(self, ChartKind::Doughnut)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexAxis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    Values(Vec<f64>),
    Points(Vec<Point>),
}

impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Values(values) => values.len(),
            SeriesData::Points(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One colour for the whole dataset or one colour per data point.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(String),
    PerPoint(Vec<String>),
}

impl From<&str> for ColorSpec {
    fn from(color: &str) -> Self {
        ColorSpec::Single(color.to_owned())
    }
}

impl From<String> for ColorSpec {
    fn from(color: String) -> Self {
        ColorSpec::Single(color)
    }
}

impl From<Vec<String>> for ColorSpec {
    fn from(colors: Vec<String>) -> Self {
        ColorSpec::PerPoint(colors)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: SeriesData,
    /// Overrides the chart kind for this dataset (mixed charts).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChartKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_line: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_offset: Option<f64>,
}

impl Dataset {
    pub fn new(data: SeriesData) -> Self {
        Self {
            label: None,
            data,
            kind: None,
            background_color: None,
            border_color: None,
            border_width: None,
            border_radius: None,
            border_dash: None,
            tension: None,
            point_radius: None,
            point_hover_radius: None,
            fill: None,
            show_line: None,
            hover_offset: None,
        }
    }

    pub fn values(values: Vec<f64>) -> Self {
        Self::new(SeriesData::Values(values))
    }

    pub fn points(points: Vec<Point>) -> Self {
        Self::new(SeriesData::Points(points))
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn kind(mut self, kind: ChartKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn background(mut self, color: impl Into<ColorSpec>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn border(mut self, color: impl Into<ColorSpec>, width: f64) -> Self {
        self.border_color = Some(color.into());
        self.border_width = Some(width);
        self
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.border_radius = Some(radius);
        self
    }

    pub fn dash(mut self, pattern: Vec<f64>) -> Self {
        self.border_dash = Some(pattern);
        self
    }

    /// Smoothed line without area fill.
    pub fn curve(mut self, tension: f64, point_radius: f64) -> Self {
        self.tension = Some(tension);
        self.point_radius = Some(point_radius);
        self.fill = Some(false);
        self
    }

    pub fn point_radius(mut self, radius: f64, hover: Option<f64>) -> Self {
        self.point_radius = Some(radius);
        self.point_hover_radius = hover;
        self
    }

    pub fn show_line(mut self) -> Self {
        self.show_line = Some(true);
        self.fill = Some(false);
        self
    }

    pub fn hover_offset(mut self, offset: f64) -> Self {
        self.hover_offset = Some(offset);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChartData {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendLabels {
    pub font: Font,
    pub box_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<LegendPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<LegendLabels>,
}

impl Legend {
    pub fn hidden() -> Self {
        Self {
            display: false,
            position: None,
            labels: None,
        }
    }

    pub fn at(position: LegendPosition, labels: LegendLabels) -> Self {
        Self {
            display: true,
            position: Some(position),
            labels: Some(labels),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Grid {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ticks_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScaleTitle {
    pub display: bool,
    pub text: String,
    pub color: String,
    pub font: Font,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    pub grid: Grid,
    pub ticks: Ticks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<ScaleTitle>,
}

impl Scale {
    /// Value axis with themed grid lines.
    pub fn gridded(theme: &Theme) -> Self {
        Self {
            grid: Grid {
                display: None,
                color: Some(theme.grid_color.to_owned()),
            },
            ..Self::default()
        }
    }

    /// Category axis without grid lines.
    pub fn plain() -> Self {
        Self {
            grid: Grid {
                display: Some(false),
                color: None,
            },
            ..Self::default()
        }
    }

    pub fn tick_font(mut self, font: Font) -> Self {
        self.ticks.font = Some(font);
        self
    }

    pub fn tick_color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.ticks.color = Some(color.into());
        self
    }

    pub fn max_ticks(mut self, limit: u32) -> Self {
        self.ticks.max_ticks_limit = Some(limit);
        self
    }

    pub fn hide_ticks(mut self) -> Self {
        self.ticks.display = Some(false);
        self
    }

    pub fn stacked(mut self) -> Self {
        self.stacked = Some(true);
        self
    }

    pub fn from_zero(mut self) -> Self {
        self.begin_at_zero = Some(true);
        self
    }

    pub fn titled(mut self, theme: &Theme, text: impl Into<String>, font: Font) -> Self {
        self.title = Some(ScaleTitle {
            display: true,
            text: text.into(),
            color: theme.palette.muted.to_owned(),
            font,
        });
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub easing: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animate_rotate: Option<bool>,
}

impl Animation {
    pub fn lasting(duration: u32) -> Self {
        Self {
            duration,
            easing: None,
            animate_rotate: None,
        }
    }
}

/// Formatting of the tooltip line for a hovered data point.
///
/// Chart.js takes a function here, so this is not serialised; the browser
/// side compiles [`TooltipLabel::js_body`] and attaches it as
/// `options.plugins.tooltip.callbacks.label`.
#[derive(Clone, Debug, PartialEq)]
pub enum TooltipLabel {
    /// `prefix` followed by the raw value as a percentage.
    Percent { prefix: &'static str, decimals: u8 },
    /// `prefix` followed by the raw value.
    Prefixed(&'static str),
    /// Stacked fold diagram: the diagonal cell is the validation partition.
    FoldRole,
}

impl TooltipLabel {
    pub const VALIDATION: &'static str = "Validation (OOF)";
    pub const TRAIN: &'static str = "Train Data";

    /// Body of a JS function taking the tooltip context as `ctx`.
    pub fn js_body(&self) -> String {
        match self {
            TooltipLabel::Percent { prefix, decimals } => format!(
                "return {} + (ctx.raw * 100).toFixed({decimals}) + \"%\";",
                js_string(prefix)
            ),
            TooltipLabel::Prefixed(prefix) => format!("return {} + ctx.raw;", js_string(prefix)),
            TooltipLabel::FoldRole => format!(
                "return ctx.datasetIndex === ctx.dataIndex ? {} : {};",
                js_string(Self::VALIDATION),
                js_string(Self::TRAIN)
            ),
        }
    }
}

fn js_string(text: &str) -> String {
    serde_json::Value::from(text).to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    /// Default text colour, taken from the theme.
    pub color: String,
    /// Default font, taken from the theme.
    pub font: Font,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_axis: Option<IndexAxis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutout: Option<String>,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub scales: BTreeMap<&'static str, Scale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    #[serde(skip)]
    pub tooltip_label: Option<TooltipLabel>,
}

impl ChartOptions {
    pub fn themed(theme: &Theme) -> Self {
        Self {
            responsive: false,
            maintain_aspect_ratio: false,
            aspect_ratio: None,
            color: theme.text_color.to_owned(),
            font: theme.base_font(),
            index_axis: None,
            cutout: None,
            plugins: Plugins {
                legend: Legend::hidden(),
            },
            scales: BTreeMap::new(),
            animation: None,
            tooltip_label: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartDescriptor {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartDescriptor {
    pub fn new(kind: ChartKind, theme: &Theme) -> Self {
        Self {
            kind,
            data: ChartData::default(),
            options: ChartOptions::themed(theme),
        }
    }

    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn dataset(mut self, dataset: Dataset) -> Self {
        self.data.datasets.push(dataset);
        self
    }

    pub fn legend(mut self, legend: Legend) -> Self {
        self.options.plugins.legend = legend;
        self
    }

    pub fn x_scale(mut self, scale: Scale) -> Self {
        self.options.scales.insert("x", scale);
        self
    }

    pub fn y_scale(mut self, scale: Scale) -> Self {
        self.options.scales.insert("y", scale);
        self
    }

    pub fn horizontal(mut self) -> Self {
        self.options.index_axis = Some(IndexAxis::Y);
        self
    }

    pub fn cutout(mut self, cutout: impl Into<String>) -> Self {
        self.options.cutout = Some(cutout.into());
        self
    }

    pub fn animation(mut self, animation: Animation) -> Self {
        self.options.animation = Some(animation);
        self
    }

    pub fn tooltip_label(mut self, label: TooltipLabel) -> Self {
        self.options.tooltip_label = Some(label);
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
