use std::collections::HashMap;

use anyhow::Result;
use eframe::egui::{self, Color32, Stroke};
use egui_plot::{Corner, Legend, Line, Plot, PlotPoint, PlotPoints, Points};

use super::config::LegendPosition;
use super::{ChartBackend, ChartConfig};
use crate::deck::Role;
use crate::format;

/// Samples per segment when drawing a tensioned line.
const CURVE_SAMPLES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlotHandle(u64);

/// Interpolate `points` with a cardinal spline of the given tension.
///
/// Tangents are `tension * (next - prev)`, with the end points standing in
/// for their missing neighbours. Tension 0 yields the straight polyline.
pub fn tensioned_curve(points: &[[f64; 2]], tension: f64, samples: usize) -> Vec<[f64; 2]> {
    if points.len() < 3 || tension == 0.0 || samples == 0 {
        return points.to_vec();
    }
    let last = points.len() - 1;
    let tangent = |i: usize| {
        let prev = points[i.saturating_sub(1)];
        let next = points[(i + 1).min(last)];
        [tension * (next[0] - prev[0]), tension * (next[1] - prev[1])]
    };

    let mut curve = Vec::with_capacity(last * samples + 1);
    for i in 0..last {
        let (p0, p1) = (points[i], points[i + 1]);
        let (m0, m1) = (tangent(i), tangent(i + 1));
        for s in 0..samples {
            let t = s as f64 / samples as f64;
            let t2 = t * t;
            let t3 = t2 * t;
            let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
            let h10 = t3 - 2.0 * t2 + t;
            let h01 = -2.0 * t3 + 3.0 * t2;
            let h11 = t3 - t2;
            curve.push([
                h00 * p0[0] + h10 * m0[0] + h01 * p1[0] + h11 * m1[0],
                h00 * p0[1] + h10 * m0[1] + h01 * p1[1] + h11 * m1[1],
            ]);
        }
    }
    curve.push(points[last]);
    curve
}

/// Index of the data point under the pointer, by nearest x position.
pub fn hovered_index(pointer_x: f64, len: usize) -> Option<usize> {
    let index = pointer_x.round();
    if index < 0.0 || index as usize >= len {
        return None;
    }
    Some(index as usize)
}

struct PlotInstance {
    surface: Role,
    config: ChartConfig,
    reset_bounds: bool,
}

/// Chart backend drawing with egui_plot.
///
/// Instances are retained between frames; the app paints the live one
/// into the chart surface rect each frame.
#[derive(Default)]
pub struct PlotBackend {
    instances: HashMap<u64, PlotInstance>,
    next_id: u64,
}

impl PlotBackend {
    pub fn live(&self) -> usize {
        self.instances.len()
    }

    /// Plot memory is keyed by drawing surface, so rebuilds reuse one entry.
    pub fn plot_id(&self, handle: PlotHandle) -> Option<egui::Id> {
        self.instances
            .get(&handle.0)
            .map(|instance| egui::Id::new(("revenue_plot", instance.surface)))
    }

    pub fn show(&mut self, ui: &mut egui::Ui, handle: PlotHandle) {
        let Some(plot_id) = self.plot_id(handle) else {
            return;
        };
        let Some(instance) = self.instances.get_mut(&handle.0) else {
            return;
        };
        let reset = std::mem::take(&mut instance.reset_bounds);
        let config = &instance.config;
        let Some(series) = config.series() else {
            return;
        };

        let opts = &config.options;
        let labels = config.data.labels.clone();
        let tooltip_config = config.clone();

        let data: Vec<[f64; 2]> = series
            .data
            .iter()
            .enumerate()
            .map(|(i, v)| [i as f64, *v])
            .collect();
        let values: PlotPoints =
            tensioned_curve(&data, f64::from(series.tension), CURVE_SAMPLES).into();
        let markers: PlotPoints = data.clone().into();
        let hover_color = series.point_background_color.0;
        let hover_radius = series.point_hover_radius;
        let hover_name = series.label.clone();

        let mut line = Line::new(series.label.clone(), values)
            .color(series.border_color.0)
            .width(series.border_width);
        if series.fill {
            line = line.fill(0.0);
        }
        let points = Points::new(series.label.clone(), markers)
            .color(series.point_background_color.0)
            .radius(series.point_radius)
            .filled(true);

        let mut plot = Plot::new(plot_id)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .x_axis_formatter(move |mark, _range| {
                let rounded = mark.value.round();
                if (mark.value - rounded).abs() > f64::EPSILON || rounded < 0.0 {
                    return String::new();
                }
                labels.get(rounded as usize).cloned().unwrap_or_default()
            })
            .y_axis_formatter(|mark, _range| format::format_axis_currency(mark.value))
            .label_formatter(move |_name, value: &PlotPoint| {
                let index = value.x.round();
                if index < 0.0 {
                    return String::new();
                }
                tooltip_config
                    .tooltip_text(index as usize)
                    .map(|(title, body)| format!("{title}\n{body}"))
                    .unwrap_or_default()
            });
        if opts.legend.display {
            let corner = match opts.legend.position {
                LegendPosition::Top => Corner::LeftTop,
            };
            plot = plot.legend(Legend::default().position(corner));
        }
        if opts.scales.y.begin_at_zero {
            plot = plot.include_y(0.0);
        }
        if reset {
            plot = plot.reset();
        }

        ui.scope(|ui| {
            let visuals = ui.visuals_mut();
            visuals.override_text_color = Some(opts.legend.label_color.0);
            visuals.window_fill = opts.tooltip.background_color.0;
            visuals.window_stroke = Stroke::new(opts.tooltip.border_width, opts.tooltip.border_color.0);
            visuals.widgets.noninteractive.bg_stroke =
                Stroke::new(1.0, opts.scales.y.grid_color.0);
            visuals.widgets.noninteractive.fg_stroke =
                Stroke::new(1.0, opts.scales.y.ticks_color.0);
            visuals.extreme_bg_color = Color32::TRANSPARENT;

            plot.show(ui, |plot_ui| {
                plot_ui.line(line);
                plot_ui.points(points);
                let hovered = plot_ui
                    .pointer_coordinate()
                    .and_then(|pointer| hovered_index(pointer.x, data.len()));
                if let Some(index) = hovered {
                    plot_ui.points(
                        Points::new(hover_name, vec![data[index]])
                            .color(hover_color)
                            .radius(hover_radius)
                            .filled(true),
                    );
                }
            });
        });
    }
}

impl ChartBackend for PlotBackend {
    type Handle = PlotHandle;

    fn construct(&mut self, surface: Role, config: &ChartConfig) -> Result<PlotHandle> {
        if config.series().is_none() {
            anyhow::bail!("Chart config has no dataset");
        }
        self.next_id += 1;
        self.instances.insert(
            self.next_id,
            PlotInstance {
                surface,
                config: config.clone(),
                reset_bounds: true,
            },
        );
        tracing::debug!(handle = self.next_id, live = self.live(), "plot constructed");
        Ok(PlotHandle(self.next_id))
    }

    fn destroy(&mut self, handle: PlotHandle) {
        self.instances.remove(&handle.0);
    }

    fn resize(&mut self, handle: PlotHandle) {
        if let Some(instance) = self.instances.get_mut(&handle.0) {
            instance.reset_bounds = true;
        }
    }

    fn update(&mut self, handle: PlotHandle, config: &ChartConfig) {
        if let Some(instance) = self.instances.get_mut(&handle.0) {
            instance.config = config.clone();
        }
    }
}
