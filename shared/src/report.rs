//! Widgets of the calorie-expenditure experiment report.
//!
//! Each builder takes the theme explicitly; builders that need synthetic
//! data also take the random source.

use rand::Rng;

use crate::descriptor::{
    Animation, ChartDescriptor, ChartKind, Dataset, Legend, LegendLabels, LegendPosition, Point,
    Scale, TooltipLabel,
};
use crate::error::DashboardResult;
use crate::series::{
    generate_convergence_series, generate_histogram, generate_prediction_scatter,
    ConvergenceSpec, HistogramBin, HistogramShape, HistogramSpec, ScatterSpec,
};
use crate::theme::{translucent, Font, Theme};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidgetInfo {
    pub mount_id: &'static str,
    pub title: &'static str,
    pub caption: &'static str,
}

pub const RMSE_PROGRESS: WidgetInfo = WidgetInfo {
    mount_id: "rmseChart",
    title: "RMSE by stage",
    caption: "Physics formula baseline against each tuned model and the ensemble.",
};
pub const FORMULA_RESIDUAL: WidgetInfo = WidgetInfo {
    mount_id: "formulaResidualChart",
    title: "Formula residuals",
    caption: "Residuals of the closed-form estimate are spread almost evenly.",
};
pub const FEATURE_IMPORTANCE: WidgetInfo = WidgetInfo {
    mount_id: "featureImportanceChart",
    title: "Feature importance",
    caption: "Formula-derived features dominate the raw measurements.",
};
pub const OPTUNA_TRIALS: WidgetInfo = WidgetInfo {
    mount_id: "optunaChart",
    title: "Hyper-parameter search",
    caption: "Best RMSE so far across 20 trials per model.",
};
pub const FOLD_DIAGRAM: WidgetInfo = WidgetInfo {
    mount_id: "foldChart",
    title: "5-fold out-of-fold scheme",
    caption: "Each fold holds out one partition for validation.",
};
pub const PREDICTION_SCATTER: WidgetInfo = WidgetInfo {
    mount_id: "scatterChart",
    title: "Predicted vs actual",
    caption: "Ensemble predictions hug the identity line.",
};
pub const RESIDUAL_DISTRIBUTION: WidgetInfo = WidgetInfo {
    mount_id: "residualChart",
    title: "Ensemble residuals",
    caption: "Residuals are tightly centred on zero.",
};
pub const RMSE_COMPARE: WidgetInfo = WidgetInfo {
    mount_id: "rmseCompareChart",
    title: "RMSE comparison",
    caption: "Adding each model, then rounding the final prediction.",
};
pub const ACCURACY: WidgetInfo = WidgetInfo {
    mount_id: "accuracyChart",
    title: "Rounded accuracy",
    caption: "Share of predictions that round to the exact target.",
};

/// Page order of the widgets.
pub const WIDGETS: [WidgetInfo; 9] = [
    RMSE_PROGRESS,
    FORMULA_RESIDUAL,
    FEATURE_IMPORTANCE,
    OPTUNA_TRIALS,
    FOLD_DIAGRAM,
    PREDICTION_SCATTER,
    RESIDUAL_DISTRIBUTION,
    RMSE_COMPARE,
    ACCURACY,
];

#[derive(Clone, Debug, PartialEq)]
pub struct Widget {
    pub info: WidgetInfo,
    pub descriptor: ChartDescriptor,
}

pub fn experiment_report<R: Rng + ?Sized>(theme: &Theme, rng: &mut R) -> DashboardResult<Vec<Widget>> {
    let widget = |info: WidgetInfo, descriptor: ChartDescriptor| Widget { info, descriptor };
    Ok(vec![
        widget(RMSE_PROGRESS, rmse_progress(theme)),
        widget(FORMULA_RESIDUAL, formula_residual(theme, rng)?),
        widget(FEATURE_IMPORTANCE, feature_importance(theme)),
        widget(OPTUNA_TRIALS, optuna_trials(theme, rng)),
        widget(FOLD_DIAGRAM, fold_diagram(theme)),
        widget(PREDICTION_SCATTER, prediction_scatter(theme, rng)),
        widget(RESIDUAL_DISTRIBUTION, residual_distribution(theme, rng)?),
        widget(RMSE_COMPARE, rmse_compare(theme)),
        widget(ACCURACY, accuracy_donut(theme)),
    ])
}

fn top_legend() -> Legend {
    Legend::at(
        LegendPosition::Top,
        LegendLabels {
            font: Font::bold(11),
            box_width: 12,
            padding: None,
        },
    )
}

fn fills(hexes: &[&str], alphas: &[f64]) -> Vec<String> {
    hexes
        .iter()
        .zip(alphas)
        .map(|(hex, alpha)| translucent(hex, *alpha))
        .collect()
}

fn borders(hexes: &[&str]) -> Vec<String> {
    hexes.iter().map(|hex| (*hex).to_owned()).collect()
}

pub fn rmse_progress(theme: &Theme) -> ChartDescriptor {
    let p = &theme.palette;
    // The LightGBM bar is filled green but outlined purple.
    let fill = fills(
        &[p.red, p.blue, p.orange, p.green, p.cyan, p.green],
        &[0.7, 0.7, 0.7, 0.7, 0.7, 0.9],
    );
    let border = borders(&[p.red, p.blue, p.orange, p.purple, p.cyan, p.green]);

    let mut animation = Animation::lasting(1500);
    animation.easing = Some("easeOutQuart");

    ChartDescriptor::new(ChartKind::Bar, theme)
        .labels(["Formula (step 1)", "ExtraTrees", "XGBoost", "LightGBM", "CatBoost", "Ensemble"])
        .dataset(
            Dataset::values(vec![0.2895, 0.0642, 0.0689, 0.0688, 0.0670, 0.0626])
                .label("RMSE")
                .background(fill)
                .border(border, 1.5)
                .radius(6.0),
        )
        .y_scale(
            Scale::gridded(theme)
                .tick_font(Font::bold(13))
                .titled(theme, "RMSE", Font::bold(14)),
        )
        .x_scale(Scale::plain().tick_font(Font::bold(11)))
        .animation(animation)
}

pub fn formula_residual<R: Rng + ?Sized>(theme: &Theme, rng: &mut R) -> DashboardResult<ChartDescriptor> {
    let spec = HistogramSpec {
        low: -0.55,
        high: 0.55,
        width: 0.05,
        precision: 2,
        shape: HistogramShape::Uniform {
            base: 800.0,
            spread: 200.0,
        },
    };
    let bins = generate_histogram(&spec, rng)?;
    Ok(histogram_chart(theme, bins, "Residual distribution", theme.palette.blue, 5, 1.0)
        .animation(Animation::lasting(1200)))
}

pub fn residual_distribution<R: Rng + ?Sized>(
    theme: &Theme,
    rng: &mut R,
) -> DashboardResult<ChartDescriptor> {
    let spec = HistogramSpec {
        low: -0.15,
        high: 0.15,
        width: 0.005,
        precision: 3,
        shape: HistogramShape::Gaussian {
            center: 0.0,
            sigma: 0.04,
            peak: 1000.0,
            noise: 30.0,
        },
    };
    let bins = generate_histogram(&spec, rng)?;
    Ok(histogram_chart(theme, bins, "Residual frequency", theme.palette.green, 8, 0.5)
        .animation(Animation::lasting(1400)))
}

fn histogram_chart(
    theme: &Theme,
    bins: Vec<HistogramBin>,
    label: &str,
    color: &'static str,
    max_ticks: u32,
    border_width: f64,
) -> ChartDescriptor {
    let (labels, counts): (Vec<_>, Vec<_>) = bins
        .into_iter()
        .map(|bin| (bin.label, bin.count as f64))
        .unzip();
    ChartDescriptor::new(ChartKind::Bar, theme)
        .labels(labels)
        .dataset(
            Dataset::values(counts)
                .label(label)
                .background(translucent(color, 0.6))
                .border(color, border_width)
                .radius(2.0),
        )
        .y_scale(
            Scale::gridded(theme)
                .tick_font(Font::sized(11))
                .titled(theme, "Frequency", Font::bold(12)),
        )
        .x_scale(Scale::plain().max_ticks(max_ticks).tick_font(Font::bold(11)))
}

const FEATURES: [(&str, f64); 15] = [
    ("fp_frac", 0.285),
    ("fp_dist", 0.198),
    ("fp_sin", 0.112),
    ("fp_cos", 0.098),
    ("fp", 0.072),
    ("Dur_BPM", 0.043),
    ("BPM", 0.038),
    ("Exercise_Duration", 0.032),
    ("Dur_Temp", 0.025),
    ("Dur_BPM_Temp", 0.022),
    ("Weight_kg", 0.018),
    ("Age", 0.015),
    ("BMI", 0.012),
    ("Body_Temp", 0.010),
    ("Temp_diff", 0.008),
];

pub fn feature_importance(theme: &Theme) -> ChartDescriptor {
    let p = &theme.palette;
    // Four periodic formula features, the formula itself, then raw inputs.
    let group = |i: usize| match i {
        0..=3 => (p.orange, 0.85, p.orange),
        4 => (p.blue, 0.75, p.blue),
        _ => (p.purple, 0.55, p.muted),
    };
    let fills = (0..FEATURES.len())
        .map(|i| {
            let (hex, alpha, _) = group(i);
            translucent(hex, alpha)
        })
        .collect::<Vec<_>>();
    let borders = (0..FEATURES.len())
        .map(|i| group(i).0.to_owned())
        .collect::<Vec<_>>();
    let tick_colors = (0..FEATURES.len())
        .map(|i| group(i).2.to_owned())
        .collect::<Vec<_>>();

    ChartDescriptor::new(ChartKind::Bar, theme)
        .labels(FEATURES.iter().map(|(name, _)| *name))
        .dataset(
            Dataset::values(FEATURES.iter().map(|(_, weight)| *weight).collect())
                .label("Importance")
                .background(fills)
                .border(borders, 1.0)
                .radius(4.0),
        )
        .horizontal()
        .tooltip_label(TooltipLabel::Percent {
            prefix: "Importance: ",
            decimals: 1,
        })
        .x_scale(Scale::gridded(theme).tick_font(Font::bold(11)))
        .y_scale(
            Scale::plain()
                .tick_font(Font::bold(11))
                .tick_color(tick_colors),
        )
        .animation(Animation::lasting(1400))
}

pub fn optuna_trials<R: Rng + ?Sized>(theme: &Theme, rng: &mut R) -> ChartDescriptor {
    const TRIALS: usize = 20;
    let p = &theme.palette;
    let models = [
        ("XGB Best", 0.22, 0.068, p.orange),
        ("LGB Best", 0.20, 0.068, p.green),
        ("CAT Best", 0.19, 0.067, p.purple),
    ];

    let mut descriptor = ChartDescriptor::new(ChartKind::Line, theme)
        .labels((1..=TRIALS).map(|i| format!("Trial {i}")));
    for (label, start, floor, color) in models {
        let trials = generate_convergence_series(&ConvergenceSpec::new(start, floor, TRIALS), rng);
        descriptor = descriptor.dataset(
            Dataset::values(trials.iter().map(|t| t.best).collect())
                .label(label)
                .border(color, 2.0)
                .curve(0.4, 2.0),
        );
    }
    descriptor
        .legend(top_legend())
        .y_scale(
            Scale::gridded(theme)
                .tick_font(Font::sized(11))
                .titled(theme, "RMSE", Font::bold(12)),
        )
        .x_scale(Scale::plain().max_ticks(6).tick_font(Font::bold(11)))
        .animation(Animation::lasting(1500))
}

pub fn fold_diagram(theme: &Theme) -> ChartDescriptor {
    const FOLDS: usize = 5;
    let p = &theme.palette;

    let mut descriptor = ChartDescriptor::new(ChartKind::Bar, theme)
        .labels((1..=FOLDS).map(|i| format!("Fold {i}")));
    for partition in 0..FOLDS {
        // Row `fold` validates on partition `fold`; every other cell trains.
        let (fills, borders): (Vec<_>, Vec<_>) = (0..FOLDS)
            .map(|fold| {
                if fold == partition {
                    (translucent(p.orange, 0.8), p.orange.to_owned())
                } else {
                    (translucent(p.blue, 0.5), p.blue.to_owned())
                }
            })
            .unzip();
        descriptor = descriptor.dataset(
            Dataset::values(vec![1.0; FOLDS])
                .label(format!("Partition {}", partition + 1))
                .background(fills)
                .border(borders, 1.0)
                .radius(4.0),
        );
    }

    let mut x = Scale::gridded(theme).stacked().hide_ticks().titled(
        theme,
        "Data partition (train vs validation)",
        Font::bold(12),
    );
    x.grid.color = Some(translucent(p.border, 0.6));

    // The legend is hidden, so the tooltip is what explains the colours.
    descriptor
        .horizontal()
        .tooltip_label(TooltipLabel::FoldRole)
        .x_scale(x)
        .y_scale(Scale::plain().stacked().tick_font(Font::bold(11)))
        .animation(Animation::lasting(1200))
}

pub fn prediction_scatter<R: Rng + ?Sized>(theme: &Theme, rng: &mut R) -> ChartDescriptor {
    let spec = ScatterSpec {
        count: 400,
        low: 5.0,
        span: 290.0,
        jitter: 0.3,
    };
    let points = generate_prediction_scatter(&spec, rng);
    let blue = theme.palette.blue;

    ChartDescriptor::new(ChartKind::Scatter, theme)
        .dataset(
            Dataset::points(points)
                .label("Predicted")
                .background(translucent(blue, 0.4))
                .border(translucent(blue, 0.7), 1.0)
                .point_radius(3.0, Some(5.0)),
        )
        .dataset(
            Dataset::points(vec![Point::new(0.0, 0.0), Point::new(300.0, 300.0)])
                .label("y=x")
                .kind(ChartKind::Line)
                .border(theme.palette.red, 2.0)
                .dash(vec![5.0, 5.0])
                .point_radius(0.0, None)
                .show_line(),
        )
        .legend(top_legend())
        .x_scale(
            Scale::gridded(theme)
                .tick_font(Font::bold(11))
                .titled(theme, "Actual calories", Font::bold(12)),
        )
        .y_scale(
            Scale::gridded(theme)
                .tick_font(Font::bold(11))
                .titled(theme, "Predicted calories", Font::bold(12)),
        )
        .animation(Animation::lasting(1500))
}

pub fn rmse_compare(theme: &Theme) -> ChartDescriptor {
    let p = &theme.palette;
    let stages = [p.red, p.blue, p.orange, p.purple, p.cyan, p.green, p.yellow];
    let fill = fills(&stages, &[0.7, 0.7, 0.7, 0.7, 0.7, 0.9, 0.9]);
    ChartDescriptor::new(ChartKind::Bar, theme)
        .labels(["Formula only", "+ ET", "+ XGB", "+ LGB", "+ CAT", "Ensemble", "Rounded"])
        .dataset(
            Dataset::values(vec![0.2895, 0.0642, 0.0689, 0.0688, 0.0670, 0.0626, 0.0673])
                .label("RMSE")
                .background(fill)
                .border(borders(&stages), 1.5)
                .radius(6.0),
        )
        .tooltip_label(TooltipLabel::Prefixed("RMSE: "))
        .y_scale(Scale::gridded(theme).tick_font(Font::bold(11)).from_zero())
        .x_scale(Scale::plain().tick_font(Font::bold(10)))
        .animation(Animation::lasting(1500))
}

pub fn accuracy_donut(theme: &Theme) -> ChartDescriptor {
    let p = &theme.palette;
    let mut animation = Animation::lasting(1800);
    animation.animate_rotate = Some(true);

    ChartDescriptor::new(ChartKind::Doughnut, theme)
        .labels(["Exact (±0)", "Off by one (±1)"])
        .dataset(
            Dataset::values(vec![99.55, 0.45])
                .background(fills(&[p.green, p.blue], &[0.8, 0.7]))
                .border(borders(&[p.green, p.blue]), 2.0)
                .hover_offset(8.0),
        )
        .cutout("65%")
        .legend(Legend::at(
            LegendPosition::Bottom,
            LegendLabels {
                font: Font::bold(12),
                box_width: 12,
                padding: Some(12),
            },
        ))
        .animation(animation)
}
