use eframe::egui::Color32;
use serde::{Serialize, Serializer};

use crate::deck::RevenueDataPoint;
use crate::format;
use crate::theme::{PaletteSource, PaletteToken, Theme};

/// Line color of the revenue series. Fixed, not part of the palette.
pub const SERIES_COLOR: Color32 = Color32::from_rgb(0x1F, 0xB8, 0xCD);

/// Alpha byte applied to the border color for grid lines.
const GRID_ALPHA: u8 = 0x40;

/// Alpha byte of the area fill under the series.
const FILL_ALPHA: u8 = 0x20;

pub const DATASET_LABEL: &str = "Monthly Revenue ($)";

/// A color that serializes as `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexColor(pub Color32);

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let [r, g, b, a] = self.0.to_srgba_unmultiplied();
        serializer.serialize_str(&format!("#{r:02x}{g:02x}{b:02x}{a:02x}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    Index,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: HexColor,
    pub background_color: HexColor,
    pub border_width: f32,
    pub fill: bool,
    pub tension: f32,
    pub point_background_color: HexColor,
    pub point_border_color: HexColor,
    pub point_border_width: f32,
    pub point_radius: f32,
    pub point_hover_radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub legend: LegendOptions,
    pub tooltip: TooltipOptions,
    pub scales: Scales,
    pub interaction: Interaction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendOptions {
    pub display: bool,
    pub position: LegendPosition,
    pub label_color: HexColor,
    pub font_size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipOptions {
    pub background_color: HexColor,
    pub title_color: HexColor,
    pub body_color: HexColor,
    pub border_color: HexColor,
    pub border_width: f32,
    pub corner_radius: f32,
    pub display_colors: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: AxisOptions,
    pub y: AxisOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    pub grid_color: HexColor,
    pub border_color: HexColor,
    pub ticks_color: HexColor,
    pub font_size: f32,
    pub begin_at_zero: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub intersect: bool,
    pub mode: InteractionMode,
}

impl ChartConfig {
    /// Line chart of monthly revenue, themed from `palette`.
    pub fn revenue(points: &[RevenueDataPoint], palette: &dyn PaletteSource) -> Self {
        let placeholder = HexColor(Color32::TRANSPARENT);
        let axis = |begin_at_zero| AxisOptions {
            grid_color: placeholder,
            border_color: placeholder,
            ticks_color: placeholder,
            font_size: 11.0,
            begin_at_zero,
        };

        let mut config = Self {
            kind: ChartKind::Line,
            data: ChartData {
                labels: points.iter().map(|p| format::month_label(p.month)).collect(),
                datasets: vec![Dataset {
                    label: DATASET_LABEL.to_string(),
                    data: points.iter().map(|p| p.revenue).collect(),
                    border_color: HexColor(SERIES_COLOR),
                    background_color: HexColor(Theme::with_alpha(SERIES_COLOR, FILL_ALPHA)),
                    border_width: 3.0,
                    fill: true,
                    tension: 0.4,
                    point_background_color: HexColor(SERIES_COLOR),
                    point_border_color: HexColor(Color32::WHITE),
                    point_border_width: 2.0,
                    point_radius: 6.0,
                    point_hover_radius: 8.0,
                }],
            },
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: false,
                legend: LegendOptions {
                    display: true,
                    position: LegendPosition::Top,
                    label_color: placeholder,
                    font_size: 12.0,
                },
                tooltip: TooltipOptions {
                    background_color: placeholder,
                    title_color: placeholder,
                    body_color: placeholder,
                    border_color: placeholder,
                    border_width: 1.0,
                    corner_radius: 8.0,
                    display_colors: false,
                },
                scales: Scales {
                    x: axis(false),
                    y: axis(true),
                },
                interaction: Interaction {
                    intersect: false,
                    mode: InteractionMode::Index,
                },
            },
        };
        config.apply_palette(palette);
        config
    }

    /// Copy the current palette into legend, tooltip and axis styling.
    pub fn apply_palette(&mut self, palette: &dyn PaletteSource) {
        let text = HexColor(palette.read(PaletteToken::Text));
        let text_secondary = HexColor(palette.read(PaletteToken::TextSecondary));
        let surface = HexColor(palette.read(PaletteToken::Surface));
        let border = palette.read(PaletteToken::Border);

        self.options.legend.label_color = text;

        let tooltip = &mut self.options.tooltip;
        tooltip.background_color = surface;
        tooltip.title_color = text;
        tooltip.body_color = text_secondary;
        tooltip.border_color = HexColor(border);

        for axis in [&mut self.options.scales.x, &mut self.options.scales.y] {
            axis.grid_color = HexColor(Theme::with_alpha(border, GRID_ALPHA));
            axis.border_color = HexColor(border);
            axis.ticks_color = text_secondary;
        }
    }

    pub fn series(&self) -> Option<&Dataset> {
        self.data.datasets.first()
    }

    /// Tooltip title and body for the point at `index`.
    pub fn tooltip_text(&self, index: usize) -> Option<(String, String)> {
        let label = self.data.labels.get(index)?;
        let value = self.series()?.data.get(index)?;
        Some((
            label.clone(),
            format!("Revenue: {}", format::format_currency(*value)),
        ))
    }
}
