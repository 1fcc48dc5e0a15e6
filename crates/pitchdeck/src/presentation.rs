use std::time::Instant;

use anyhow::Result;
use eframe::egui::Pos2;

use crate::analytics::{Analytics, AnalyticsReport};
use crate::chart::{ChartAdapter, ChartBackend};
use crate::deck::{DeckLayout, REVENUE_DATA, Role};
use crate::effects::{EffectsLayer, SlideEntrance};
use crate::input::{InputAdapter, InputEvent};
use crate::model::{NavigationIntent, SlideIndexModel, Transition};
use crate::scheduler::{Deferred, Scheduler};
use crate::surface::SurfaceState;
use crate::theme::Theme;
use crate::view::ViewProjector;

/// All presentation state, owned by the host and passed around explicitly.
pub struct Presentation<B: ChartBackend> {
    deck: DeckLayout,
    model: SlideIndexModel,
    input: InputAdapter,
    view: ViewProjector,
    surface: SurfaceState,
    scheduler: Scheduler,
    effects: EffectsLayer,
    chart: ChartAdapter<B>,
    analytics: Analytics,
    theme: Theme,
    entrance: Option<SlideEntrance>,
}

impl<B: ChartBackend> Presentation<B> {
    /// Build the state, render the start slide and initialize the chart.
    pub fn new(
        deck: DeckLayout,
        backend: B,
        theme: Theme,
        start_slide: usize,
        now: Instant,
    ) -> Result<Self> {
        let model = SlideIndexModel::starting_at(deck.slide_count(), start_slide)?;
        let mut presentation = Self {
            input: InputAdapter::from_deck(&deck),
            view: ViewProjector::new(deck.slide_count(), deck.chart_slide()),
            surface: SurfaceState::mount(&deck),
            scheduler: Scheduler::default(),
            effects: EffectsLayer::default(),
            chart: ChartAdapter::new(backend, Role::ChartSurface, &REVENUE_DATA),
            analytics: Analytics::new(now),
            entrance: None,
            deck,
            model,
            theme,
        };
        presentation.render(now);
        presentation.rebuild_chart();
        Ok(presentation)
    }

    fn render(&mut self, now: Instant) {
        let index = self.model.current();
        if self
            .view
            .render(&mut self.surface, index, &mut self.scheduler, now)
        {
            tracing::debug!(slide = index + 1, "chart rebuild scheduled");
        }
        self.analytics.record_view(index);
    }

    fn rebuild_chart(&mut self) {
        if let Err(e) = self.chart.initialize(&self.surface, &self.theme) {
            tracing::error!("Failed to build revenue chart: {e:#}");
        }
    }

    pub fn navigate(&mut self, intent: NavigationIntent, now: Instant) -> Transition {
        let transition = self.model.transition(intent);
        if let Transition::Moved { from, to } = transition {
            tracing::debug!(?intent, from = from + 1, to = to + 1, "navigated");
            self.render(now);
            self.entrance = Some(SlideEntrance::new(now));
        }
        transition
    }

    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> Transition {
        match self.input.translate(event) {
            Some(intent) => self.navigate(intent, now),
            None => Transition::Unchanged,
        }
    }

    /// A click on a control: ripple feedback, then whatever the role is bound to.
    pub fn click(&mut self, role: Role, at: Pos2, control_origin: Pos2, now: Instant) -> Transition {
        self.effects
            .spawn_ripple(role, at, control_origin, now, &mut self.scheduler);
        self.handle_input(InputEvent::Click(role), now)
    }

    /// Run every deferred task that has come due.
    pub fn tick(&mut self, now: Instant) {
        let due = self.scheduler.drain_due(now);
        if !due.is_empty() {
            tracing::trace!(ran = due.len(), pending = self.scheduler.pending(), "deferred tasks");
        }
        for task in due {
            match task {
                Deferred::RebuildChart => self.rebuild_chart(),
                Deferred::RemoveRipple(id) => {
                    self.effects.remove_ripple(id);
                }
            }
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.chart.retheme(&self.theme);
        tracing::info!(theme = %self.theme.name, "theme changed");
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme.toggled());
    }

    pub fn viewport_resized(&mut self) {
        self.chart.resize();
    }

    pub fn next_wakeup(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    pub fn report(&self, now: Instant) -> AnalyticsReport {
        self.analytics
            .report(self.model.current(), self.model.total(), now)
    }

    pub fn deck(&self) -> &DeckLayout {
        &self.deck
    }

    pub fn current(&self) -> usize {
        self.model.current()
    }

    pub fn total(&self) -> usize {
        self.model.total()
    }

    pub fn surface(&self) -> &SurfaceState {
        &self.surface
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn effects(&self) -> &EffectsLayer {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut EffectsLayer {
        &mut self.effects
    }

    pub fn chart(&self) -> &ChartAdapter<B> {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut ChartAdapter<B> {
        &mut self.chart
    }

    pub fn entrance(&self) -> Option<SlideEntrance> {
        self.entrance
    }

    pub fn is_clickable(&self, role: Role) -> bool {
        self.input.is_clickable(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::testing::{BackendEvent, RecordingBackend};
    use crate::input::Key;
    use crate::view::CHART_REBUILD_DELAY;
    use eframe::egui::pos2;
    use std::time::Duration;

    fn presentation(now: Instant) -> Presentation<RecordingBackend> {
        Presentation::new(
            DeckLayout::builtin().unwrap(),
            RecordingBackend::default(),
            Theme::light(),
            0,
            now,
        )
        .unwrap()
    }

    #[test]
    fn test_startup_renders_and_builds_chart() {
        let now = Instant::now();
        let p = presentation(now);
        assert_eq!(p.current(), 0);
        assert!(p.surface().is_active(Role::Slide(0)));
        assert_eq!(p.surface().width_percent(Role::ProgressFill), 12.5);
        assert_eq!(p.chart().backend().events, vec![BackendEvent::Construct(1)]);
    }

    #[test]
    fn test_next_scenario_clamps() {
        let now = Instant::now();
        let mut p = presentation(now);
        for _ in 0..6 {
            p.navigate(NavigationIntent::Next, now);
        }
        assert_eq!(p.current(), 6);
        p.navigate(NavigationIntent::Next, now);
        assert_eq!(
            p.navigate(NavigationIntent::Next, now),
            Transition::Unchanged
        );
        assert_eq!(p.current(), 7);
        assert!(p.surface().is_disabled(Role::NextControl));
        assert_eq!(p.surface().text(Role::CurrentSlide), "8");
    }

    #[test]
    fn test_chart_slide_rebuilds_after_delay() {
        let now = Instant::now();
        let mut p = presentation(now);
        p.navigate(NavigationIntent::GoTo(5), now);
        assert_eq!(p.next_wakeup(), Some(now + CHART_REBUILD_DELAY));

        p.tick(now + Duration::from_millis(50));
        assert_eq!(p.chart().backend().events.len(), 1);

        p.tick(now + CHART_REBUILD_DELAY);
        assert_eq!(
            p.chart().backend().events,
            vec![
                BackendEvent::Construct(1),
                BackendEvent::Destroy(1),
                BackendEvent::Construct(2),
            ]
        );
        assert_eq!(p.chart().backend().live, vec![2]);
    }

    #[test]
    fn test_superseded_rebuild_still_runs_harmlessly() {
        let now = Instant::now();
        let mut p = presentation(now);
        p.navigate(NavigationIntent::GoTo(5), now);
        p.navigate(NavigationIntent::Next, now + Duration::from_millis(10));
        p.tick(now + Duration::from_secs(1));
        assert_eq!(p.current(), 6);
        assert_eq!(p.chart().backend().live.len(), 1);
    }

    #[test]
    fn test_click_spawns_ripple_and_navigates() {
        let now = Instant::now();
        let mut p = presentation(now);
        let moved = p.click(Role::Indicator(3), pos2(12.0, 8.0), pos2(0.0, 0.0), now);
        assert_eq!(moved, Transition::Moved { from: 0, to: 3 });
        assert_eq!(p.effects().ripple_count(), 1);

        p.tick(now + Duration::from_millis(300));
        assert_eq!(p.effects().ripple_count(), 0);
    }

    #[test]
    fn test_keys_and_swipes() {
        let now = Instant::now();
        let mut p = presentation(now);
        p.handle_input(InputEvent::Key(Key::ArrowRight), now);
        p.handle_input(InputEvent::Key(Key::ArrowRight), now);
        assert_eq!(p.current(), 2);

        p.handle_input(InputEvent::TouchStart { x: 100.0 }, now);
        p.handle_input(InputEvent::TouchEnd { x: 151.0 }, now);
        assert_eq!(p.current(), 1);

        p.handle_input(InputEvent::TouchStart { x: 100.0 }, now);
        p.handle_input(InputEvent::TouchEnd { x: 51.0 }, now);
        assert_eq!(p.current(), 1);
    }

    #[test]
    fn test_toggle_theme_rethemes_chart() {
        let now = Instant::now();
        let mut p = presentation(now);
        p.toggle_theme();
        assert_eq!(p.theme().name, "dark");
        assert_eq!(
            p.chart().backend().events.last(),
            Some(&BackendEvent::Update(1))
        );
    }

    #[test]
    fn test_resize_forwards_to_chart() {
        let now = Instant::now();
        let mut p = presentation(now);
        p.viewport_resized();
        assert_eq!(
            p.chart().backend().events.last(),
            Some(&BackendEvent::Resize(1))
        );
    }

    #[test]
    fn test_chart_failure_is_not_fatal() {
        let now = Instant::now();
        let mut backend = RecordingBackend::default();
        backend.fail = true;
        let mut p = Presentation::new(
            DeckLayout::builtin().unwrap(),
            backend,
            Theme::light(),
            5,
            now,
        )
        .unwrap();
        p.tick(now + CHART_REBUILD_DELAY);
        assert_eq!(p.chart().handle(), None);
        assert_eq!(p.current(), 5);
    }

    #[test]
    fn test_report_counts_views() {
        let now = Instant::now();
        let mut p = presentation(now);
        p.navigate(NavigationIntent::Next, now);
        p.navigate(NavigationIntent::Previous, now);
        let report = p.report(now);
        assert_eq!(report.slide_views.get(&0), Some(&2));
        assert_eq!(report.slide_views.get(&1), Some(&1));
        assert_eq!(report.total_slides, 8);
    }
}
