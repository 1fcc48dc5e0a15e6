use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;

use crate::chart::plot::PlotBackend;
use crate::config::Config;
use crate::deck::{DeckLayout, Role, SlideSpec};
use crate::input::{InputEvent, Key};
use crate::presentation::Presentation;
use crate::surface::RenderSurface;
use crate::theme::Theme;

const PROGRESS_HEIGHT: f32 = 3.0;
const RIPPLE_BASE_RADIUS: f32 = 12.0;
const TOAST_DURATION: f32 = 1.5;

pub struct LaunchOptions {
    pub deck_file: Option<PathBuf>,
    /// `Some(false)` forces fullscreen over a windowed config default.
    pub windowed: Option<bool>,
    /// 1-indexed
    pub start_slide: Option<usize>,
    pub theme: Option<String>,
}

/// Launch settings after merging CLI flags over the config file.
#[derive(Debug)]
struct Launch {
    theme: Theme,
    /// 0-indexed
    start_slide: usize,
    windowed: bool,
}

impl LaunchOptions {
    fn resolve(&self, config: &Config) -> Launch {
        let theme_name = self
            .theme
            .as_deref()
            .or(config.theme())
            .unwrap_or("light");
        let start_slide = self
            .start_slide
            .or(config.start_slide())
            .map_or(0, |s| s.saturating_sub(1));
        Launch {
            theme: Theme::from_name(theme_name),
            start_slide,
            windowed: self.windowed.unwrap_or_else(|| config.windowed()),
        }
    }
}

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        let fade_start = 1.0;
        if elapsed < fade_start {
            1.0
        } else if elapsed < TOAST_DURATION {
            1.0 - (elapsed - fade_start) / (TOAST_DURATION - fade_start)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= TOAST_DURATION
    }
}

/// Pointer interactions gathered while painting, applied after the frame.
enum UiAction {
    Click {
        role: Role,
        at: egui::Pos2,
        origin: egui::Pos2,
    },
    Hover {
        role: Role,
        hovered: bool,
    },
}

struct PresentationApp {
    presentation: Presentation<PlotBackend>,
    toast: Option<Toast>,
    last_size: Option<egui::Vec2>,
    reported: bool,
}

impl PresentationApp {
    fn new(presentation: Presentation<PlotBackend>) -> Self {
        Self {
            presentation,
            toast: None,
            last_size: None,
            reported: false,
        }
    }

    fn compute_scale(rect: egui::Rect) -> f32 {
        let ref_w = 1920.0;
        let ref_h = 1080.0;
        (rect.width() / ref_w).min(rect.height() / ref_h)
    }

    fn handle_resize(&mut self, ctx: &egui::Context) {
        let Some(size) = ctx.input(|i| i.viewport().inner_rect.map(|r| r.size())) else {
            return;
        };
        if self.last_size.is_some_and(|last| last != size) {
            tracing::trace!(width = size.x, height = size.y, "viewport resized");
            self.presentation.viewport_resized();
        }
        self.last_size = Some(size);
    }

    fn report_once(&mut self, now: Instant) {
        if self.reported {
            return;
        }
        self.reported = true;
        let report = self.presentation.report(now);
        match serde_json::to_string(&report) {
            Ok(json) => tracing::info!(
                slide = self.presentation.current() + 1,
                analytics = %json,
                "presentation closed"
            ),
            Err(e) => tracing::warn!("Failed to serialize analytics: {e}"),
        }
    }

    fn draw_slide(
        &mut self,
        ui: &mut egui::Ui,
        rect: egui::Rect,
        scale: f32,
        now: Instant,
        actions: &mut Vec<UiAction>,
    ) {
        let surface = self.presentation.surface();
        let Some(index) =
            (0..self.presentation.total()).find(|i| surface.is_active(Role::Slide(*i)))
        else {
            return;
        };
        let slide = self.presentation.deck().slides[index].clone();
        let theme = self.presentation.theme().clone();

        let (opacity, dx) = match self.presentation.entrance() {
            Some(entrance) => (entrance.opacity(now), entrance.x_offset(now)),
            None => (1.0, 0.0),
        };

        let padding = 100.0 * scale;
        let content = rect
            .translate(egui::vec2(dx * scale, 0.0))
            .shrink2(egui::vec2(padding, padding * 0.8));
        let bottom_limit = rect.bottom() - 160.0 * scale;

        let mut y = content.top();
        let is_cover = index == 0;
        let heading_size = if is_cover {
            theme.title_size
        } else {
            theme.heading_size
        } * scale;

        if is_cover {
            y = content.center().y - heading_size * 1.5;
        }

        y += draw_text(
            ui,
            &slide.title,
            egui::pos2(content.left(), y),
            heading_size,
            Theme::with_opacity(theme.text, opacity),
            content.width(),
        );

        if let Some(subtitle) = &slide.subtitle {
            y += 16.0 * scale;
            y += draw_text(
                ui,
                subtitle,
                egui::pos2(content.left(), y),
                theme.body_size * scale,
                Theme::with_opacity(theme.text_secondary, opacity),
                content.width(),
            );
        }
        y += 48.0 * scale;

        y = draw_bullets(ui, &slide, &theme, content, y, opacity, scale);

        if !slide.cards.is_empty() {
            y = self.draw_cards(ui, &slide, index, &theme, content, y, opacity, scale, actions);
        }

        if slide.chart {
            let chart_rect = egui::Rect::from_min_max(
                egui::pos2(content.left(), y),
                egui::pos2(content.right(), bottom_limit.max(y + 200.0 * scale)),
            );
            self.draw_chart(ui, chart_rect);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_cards(
        &self,
        ui: &egui::Ui,
        slide: &SlideSpec,
        index: usize,
        theme: &Theme,
        content: egui::Rect,
        top: f32,
        opacity: f32,
        scale: f32,
        actions: &mut Vec<UiAction>,
    ) -> f32 {
        let gap = 32.0 * scale;
        let count = slide.cards.len() as f32;
        let width = (content.width() - gap * (count - 1.0)) / count;
        let height = 280.0 * scale;
        let inner = 28.0 * scale;
        let effects = self.presentation.effects();

        for (c, card) in slide.cards.iter().enumerate() {
            let role = Role::Card(index, c);
            let base = egui::Rect::from_min_size(
                egui::pos2(content.left() + c as f32 * (width + gap), top),
                egui::vec2(width, height),
            );
            let response = ui.interact(base, ui.id().with(role), egui::Sense::hover());
            actions.push(UiAction::Hover {
                role,
                hovered: response.hovered(),
            });

            let lifted = base.translate(egui::vec2(0.0, effects.lift(role) * scale));
            let radius = 12.0 * scale;
            if effects.lift(role) != 0.0 {
                let shadow = lifted.translate(egui::vec2(0.0, 4.0 * scale));
                ui.painter().rect_filled(
                    shadow,
                    radius,
                    Theme::with_opacity(egui::Color32::BLACK, 0.08 * opacity),
                );
            }
            ui.painter()
                .rect_filled(lifted, radius, Theme::with_opacity(theme.surface, opacity));
            ui.painter().rect_stroke(
                lifted,
                radius,
                egui::Stroke::new(1.0, Theme::with_opacity(theme.border, opacity)),
                egui::StrokeKind::Inside,
            );

            let text_width = lifted.width() - inner * 2.0;
            let title_h = draw_text(
                ui,
                &card.title,
                lifted.min + egui::vec2(inner, inner),
                theme.card_title_size * scale,
                Theme::with_opacity(theme.primary, opacity),
                text_width,
            );
            draw_text(
                ui,
                &card.body,
                lifted.min + egui::vec2(inner, inner + title_h + 14.0 * scale),
                theme.small_size * 1.2 * scale,
                Theme::with_opacity(theme.text, opacity),
                text_width,
            );
        }
        top + height + 40.0 * scale
    }

    fn draw_chart(&mut self, ui: &mut egui::Ui, rect: egui::Rect) {
        if !self.presentation.surface().is_mounted(Role::ChartSurface) {
            return;
        }
        let Some(handle) = self.presentation.chart().handle() else {
            return;
        };
        let mut child = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(rect)
                .id_salt("chart_surface"),
        );
        self.presentation
            .chart_mut()
            .backend_mut()
            .show(&mut child, handle);
    }

    fn draw_progress(&self, ui: &egui::Ui, rect: egui::Rect) {
        let theme = self.presentation.theme();
        let percent = self
            .presentation
            .surface()
            .width_percent(Role::ProgressFill);
        let track = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), PROGRESS_HEIGHT));
        ui.painter().rect_filled(track, 0.0, theme.secondary);
        let fill = egui::Rect::from_min_size(
            rect.min,
            egui::vec2(rect.width() * percent / 100.0, PROGRESS_HEIGHT),
        );
        ui.painter().rect_filled(fill, 0.0, theme.primary);
    }

    fn draw_controls(
        &self,
        ui: &egui::Ui,
        rect: egui::Rect,
        scale: f32,
        now: Instant,
        actions: &mut Vec<UiAction>,
    ) {
        let surface = self.presentation.surface();
        let theme = self.presentation.theme();
        let padding = 48.0 * scale;
        let bar_y = rect.bottom() - 72.0 * scale;

        let button_size = egui::vec2(150.0 * scale, 48.0 * scale);
        let prev_rect = egui::Rect::from_min_size(
            egui::pos2(rect.left() + padding, bar_y - button_size.y / 2.0),
            button_size,
        );
        let next_rect = egui::Rect::from_min_size(
            egui::pos2(rect.right() - padding - button_size.x, bar_y - button_size.y / 2.0),
            button_size,
        );
        self.draw_button(ui, Role::PrevControl, prev_rect, "\u{2190} Previous", scale, now, actions);
        self.draw_button(ui, Role::NextControl, next_rect, "Next \u{2192}", scale, now, actions);

        // Nav indicators
        let dot = 16.0 * scale;
        let gap = 14.0 * scale;
        let total = self.presentation.total();
        let row_width = total as f32 * dot + (total as f32 - 1.0) * gap;
        let row_left = rect.center().x - row_width / 2.0;
        for i in 0..total {
            let role = Role::Indicator(i);
            let base = egui::Rect::from_min_size(
                egui::pos2(row_left + i as f32 * (dot + gap), bar_y - dot / 2.0),
                egui::vec2(dot, dot),
            );
            self.interact_control(ui, role, base, actions);
            let r = base.translate(egui::vec2(0.0, self.presentation.effects().lift(role) * scale));
            let color = if surface.is_active(role) {
                theme.primary
            } else {
                theme.border
            };
            ui.painter().circle_filled(r.center(), dot / 2.0, color);
            self.draw_ripples(ui, role, r, scale, now);
        }

        // Counter
        let counter = format!(
            "{} / {}",
            surface.text(Role::CurrentSlide),
            surface.text(Role::TotalSlides)
        );
        let color = theme.text_secondary;
        let galley = ui.painter().layout_no_wrap(
            counter,
            egui::FontId::proportional(theme.small_size * scale),
            color,
        );
        let pos = egui::pos2(
            rect.center().x - galley.rect.width() / 2.0,
            bar_y - dot / 2.0 - galley.rect.height() - 12.0 * scale,
        );
        ui.painter().galley(pos, galley, color);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_button(
        &self,
        ui: &egui::Ui,
        role: Role,
        base: egui::Rect,
        label: &str,
        scale: f32,
        now: Instant,
        actions: &mut Vec<UiAction>,
    ) {
        let theme = self.presentation.theme();
        let disabled = self.presentation.surface().is_disabled(role);
        if disabled {
            actions.push(UiAction::Hover {
                role,
                hovered: false,
            });
        } else {
            self.interact_control(ui, role, base, actions);
        }

        let rect = base.translate(egui::vec2(0.0, self.presentation.effects().lift(role) * scale));
        let opacity = if disabled { 0.4 } else { 1.0 };
        let radius = 8.0 * scale;
        ui.painter()
            .rect_filled(rect, radius, Theme::with_opacity(theme.secondary, opacity));
        ui.painter().rect_stroke(
            rect,
            radius,
            egui::Stroke::new(1.0, Theme::with_opacity(theme.border, opacity)),
            egui::StrokeKind::Inside,
        );

        let color = Theme::with_opacity(theme.text, opacity);
        let galley = ui.painter().layout_no_wrap(
            label.to_string(),
            egui::FontId::proportional(theme.small_size * scale),
            color,
        );
        let pos = rect.center() - galley.rect.size() / 2.0;
        ui.painter().galley(pos, galley, color);
        self.draw_ripples(ui, role, rect, scale, now);
    }

    fn interact_control(
        &self,
        ui: &egui::Ui,
        role: Role,
        rect: egui::Rect,
        actions: &mut Vec<UiAction>,
    ) {
        let response = ui.interact(rect, ui.id().with(role), egui::Sense::click());
        actions.push(UiAction::Hover {
            role,
            hovered: response.hovered(),
        });
        if response.clicked() && self.presentation.is_clickable(role) {
            let at = response.interact_pointer_pos().unwrap_or(rect.center());
            actions.push(UiAction::Click {
                role,
                at,
                origin: rect.min,
            });
        }
    }

    fn draw_ripples(&self, ui: &egui::Ui, role: Role, rect: egui::Rect, scale: f32, now: Instant) {
        let painter = ui.painter().with_clip_rect(rect);
        for ripple in self.presentation.effects().ripples_on(role) {
            let color = Theme::with_opacity(egui::Color32::WHITE, 0.3 * ripple.opacity(now));
            painter.circle_filled(
                rect.min + ripple.offset,
                RIPPLE_BASE_RADIUS * scale * ripple.scale(now),
                color,
            );
        }
    }

    fn draw_toast(&self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let Some(ref toast) = self.toast else {
            return;
        };
        let opacity = toast.opacity();
        if opacity <= 0.0 {
            return;
        }
        let theme = self.presentation.theme();
        let toast_color = Theme::with_opacity(theme.text, opacity * 0.9);
        let toast_bg = Theme::with_opacity(theme.surface, opacity * 0.9);
        let galley = ui.painter().layout_no_wrap(
            toast.message.clone(),
            egui::FontId::proportional(20.0 * scale),
            toast_color,
        );
        let padding = 16.0 * scale;
        let toast_rect = egui::Rect::from_min_size(
            egui::pos2(
                rect.center().x - galley.rect.width() / 2.0 - padding,
                rect.top() + 40.0 * scale,
            ),
            egui::vec2(
                galley.rect.width() + padding * 2.0,
                galley.rect.height() + padding * 2.0,
            ),
        );
        ui.painter().rect_filled(toast_rect, 8.0 * scale, toast_bg);
        let text_pos = egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding);
        ui.painter().galley(text_pos, galley, toast_color);
    }
}

/// Paint wrapped text and return its height.
fn draw_text(
    ui: &egui::Ui,
    text: &str,
    pos: egui::Pos2,
    size: f32,
    color: egui::Color32,
    width: f32,
) -> f32 {
    let galley = ui.painter().layout(
        text.to_string(),
        egui::FontId::proportional(size),
        color,
        width,
    );
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

fn draw_bullets(
    ui: &egui::Ui,
    slide: &SlideSpec,
    theme: &Theme,
    content: egui::Rect,
    top: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let mut y = top;
    let size = theme.body_size * scale;
    let indent = 36.0 * scale;
    let text = Theme::with_opacity(theme.text, opacity);
    let bullet = Theme::with_opacity(theme.primary, opacity);
    for item in &slide.bullets {
        ui.painter().circle_filled(
            egui::pos2(content.left() + 8.0 * scale, y + size * 0.6),
            5.0 * scale,
            bullet,
        );
        y += draw_text(
            ui,
            item,
            egui::pos2(content.left() + indent, y),
            size,
            text,
            content.width() - indent,
        );
        y += 20.0 * scale;
    }
    y
}

impl eframe::App for PresentationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let mut events: Vec<InputEvent> = Vec::new();
        let mut toggle_theme = false;

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) || i.key_pressed(egui::Key::Escape) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }
            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
            }
            if i.key_pressed(egui::Key::D) {
                toggle_theme = true;
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                events.push(InputEvent::Key(Key::ArrowLeft));
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                events.push(InputEvent::Key(Key::ArrowRight));
            }
            for event in &i.events {
                if let egui::Event::Touch { phase, pos, .. } = event {
                    match phase {
                        egui::TouchPhase::Start => events.push(InputEvent::TouchStart { x: pos.x }),
                        egui::TouchPhase::End => events.push(InputEvent::TouchEnd { x: pos.x }),
                        _ => {}
                    }
                }
            }
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        if toggle_theme {
            self.presentation.toggle_theme();
            self.toast = Some(Toast::new(format!(
                "Theme: {}",
                self.presentation.theme().name
            )));
        }
        for event in events {
            self.presentation.handle_input(event, now);
        }

        self.handle_resize(ctx);
        self.presentation.tick(now);

        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        let mut actions: Vec<UiAction> = Vec::new();
        let bg = self.presentation.theme().background;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);

                let scale = Self::compute_scale(rect);

                self.draw_slide(ui, rect, scale, now, &mut actions);
                self.draw_progress(ui, rect);
                self.draw_controls(ui, rect, scale, now, &mut actions);
                self.draw_toast(ui, rect, scale);
            });

        for action in actions {
            match action {
                UiAction::Click { role, at, origin } => {
                    self.presentation.click(role, at, origin, now);
                }
                UiAction::Hover { role, hovered } => {
                    self.presentation.effects_mut().set_hovered(role, hovered);
                }
            }
        }

        let animating = self
            .presentation
            .entrance()
            .is_some_and(|e| !e.is_complete(now))
            || self.presentation.effects().ripple_count() > 0
            || self.toast.is_some();
        if animating {
            ctx.request_repaint();
        } else if let Some(due) = self.presentation.next_wakeup() {
            ctx.request_repaint_after(due.saturating_duration_since(now));
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            self.report_once(now);
        }
    }
}

pub fn run(opts: LaunchOptions) -> anyhow::Result<()> {
    let deck = match &opts.deck_file {
        Some(path) => DeckLayout::load(path)?,
        None => DeckLayout::builtin()?,
    };

    let Launch {
        theme,
        start_slide,
        windowed,
    } = opts.resolve(&Config::load_or_default());

    let title = deck.title.clone();
    tracing::info!(
        slides = deck.slide_count(),
        theme = %theme.name,
        start = start_slide + 1,
        "starting presentation"
    );

    let presentation = Presentation::new(
        deck,
        PlotBackend::default(),
        theme,
        start_slide,
        Instant::now(),
    )?;

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(PresentationApp::new(presentation)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> LaunchOptions {
        LaunchOptions {
            deck_file: None,
            windowed: None,
            start_slide: None,
            theme: None,
        }
    }

    fn config(pairs: &[(&str, &str)]) -> Config {
        let mut config = Config::default();
        for (key, value) in pairs {
            config.set(key, value).unwrap();
        }
        config
    }

    #[test]
    fn test_defaults_without_config() {
        let launch = options().resolve(&Config::default());
        assert_eq!(launch.theme.name, "light");
        assert_eq!(launch.start_slide, 0);
        assert!(!launch.windowed);
    }

    #[test]
    fn test_cli_theme_beats_config() {
        let opts = LaunchOptions {
            theme: Some("light".to_string()),
            ..options()
        };
        let launch = opts.resolve(&config(&[("defaults.theme", "dark")]));
        assert_eq!(launch.theme.name, "light");

        let launch = options().resolve(&config(&[("defaults.theme", "dark")]));
        assert_eq!(launch.theme.name, "dark");
    }

    #[test]
    fn test_start_slide_is_one_indexed() {
        let launch = options().resolve(&config(&[("defaults.start_slide", "6")]));
        assert_eq!(launch.start_slide, 5);

        let opts = LaunchOptions {
            start_slide: Some(0),
            ..options()
        };
        assert_eq!(opts.resolve(&config(&[("defaults.start_slide", "6")])).start_slide, 0);

        let opts = LaunchOptions {
            start_slide: Some(2),
            ..options()
        };
        assert_eq!(opts.resolve(&config(&[("defaults.start_slide", "6")])).start_slide, 1);
    }

    #[test]
    fn test_windowed_override_both_directions() {
        let windowed_config = config(&[("defaults.windowed", "true")]);
        assert!(options().resolve(&windowed_config).windowed);

        let fullscreen = LaunchOptions {
            windowed: Some(false),
            ..options()
        };
        assert!(!fullscreen.resolve(&windowed_config).windowed);

        let windowed = LaunchOptions {
            windowed: Some(true),
            ..options()
        };
        assert!(windowed.resolve(&config(&[("defaults.windowed", "false")])).windowed);
    }
}
