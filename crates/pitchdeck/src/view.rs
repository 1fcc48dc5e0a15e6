use std::time::{Duration, Instant};

use crate::deck::Role;
use crate::scheduler::{Deferred, Scheduler};
use crate::surface::RenderSurface;

/// Delay between landing on the chart slide and the chart rebuild.
pub const CHART_REBUILD_DELAY: Duration = Duration::from_millis(100);

/// Fill width of the progress bar for a slide, in percent.
pub fn progress_percent(index: usize, total: usize) -> f32 {
    (index + 1) as f32 / total as f32 * 100.0
}

/// Projects a slide index onto every dependent element of the surface.
#[derive(Debug)]
pub struct ViewProjector {
    total: usize,
    chart_slide: Option<usize>,
    active: Option<usize>,
}

impl ViewProjector {
    pub fn new(total: usize, chart_slide: Option<usize>) -> Self {
        Self {
            total,
            chart_slide,
            active: None,
        }
    }

    /// Update slide, indicator, controls, counter and progress bar in one pass.
    ///
    /// Returns true when a chart rebuild was scheduled.
    pub fn render(
        &mut self,
        surface: &mut dyn RenderSurface,
        index: usize,
        scheduler: &mut Scheduler,
        now: Instant,
    ) -> bool {
        if index >= self.total {
            return false;
        }

        if let Some(prev) = self.active.take() {
            surface.set_active(Role::Slide(prev), false);
            surface.set_active(Role::Indicator(prev), false);
        }
        surface.set_active(Role::Slide(index), true);
        surface.set_active(Role::Indicator(index), true);
        self.active = Some(index);

        surface.set_text(Role::CurrentSlide, &(index + 1).to_string());
        surface.set_text(Role::TotalSlides, &self.total.to_string());
        surface.set_disabled(Role::PrevControl, index == 0);
        surface.set_disabled(Role::NextControl, index == self.total - 1);
        surface.set_width_percent(Role::ProgressFill, progress_percent(index, self.total));

        tracing::debug!(slide = index + 1, total = self.total, "rendered slide");

        if self.chart_slide == Some(index) {
            scheduler.schedule(now, CHART_REBUILD_DELAY, Deferred::RebuildChart);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::DeckLayout;
    use crate::surface::SurfaceState;

    fn setup() -> (ViewProjector, SurfaceState, Scheduler) {
        let deck = DeckLayout::builtin().unwrap();
        (
            ViewProjector::new(deck.slide_count(), deck.chart_slide()),
            SurfaceState::mount(&deck),
            Scheduler::default(),
        )
    }

    fn assert_single_active(surface: &SurfaceState, index: usize) {
        let active: Vec<Role> = surface.active_roles().collect();
        assert_eq!(
            active,
            vec![Role::Slide(index), Role::Indicator(index)],
            "unexpected active set after rendering slide {index}"
        );
    }

    #[test]
    fn test_render_first_slide() {
        let (mut view, mut surface, mut scheduler) = setup();
        view.render(&mut surface, 0, &mut scheduler, Instant::now());

        assert_single_active(&surface, 0);
        assert_eq!(surface.text(Role::CurrentSlide), "1");
        assert_eq!(surface.text(Role::TotalSlides), "8");
        assert!(surface.is_disabled(Role::PrevControl));
        assert!(!surface.is_disabled(Role::NextControl));
        assert_eq!(surface.width_percent(Role::ProgressFill), 12.5);
    }

    #[test]
    fn test_render_last_slide() {
        let (mut view, mut surface, mut scheduler) = setup();
        view.render(&mut surface, 7, &mut scheduler, Instant::now());

        assert_single_active(&surface, 7);
        assert_eq!(surface.text(Role::CurrentSlide), "8");
        assert!(!surface.is_disabled(Role::PrevControl));
        assert!(surface.is_disabled(Role::NextControl));
        assert_eq!(surface.width_percent(Role::ProgressFill), 100.0);
    }

    #[test]
    fn test_exactly_one_active_after_any_sequence() {
        let (mut view, mut surface, mut scheduler) = setup();
        let now = Instant::now();
        for index in [0, 3, 3, 7, 1, 6, 0, 5] {
            view.render(&mut surface, index, &mut scheduler, now);
            assert_single_active(&surface, index);
        }
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0, 8), 12.5);
        assert_eq!(progress_percent(3, 8), 50.0);
        assert_eq!(progress_percent(7, 8), 100.0);
        assert_eq!(progress_percent(0, 1), 100.0);
    }

    #[test]
    fn test_chart_slide_schedules_rebuild() {
        let (mut view, mut surface, mut scheduler) = setup();
        let now = Instant::now();
        assert!(!view.render(&mut surface, 4, &mut scheduler, now));
        assert_eq!(scheduler.pending(), 0);

        assert!(view.render(&mut surface, 5, &mut scheduler, now));
        assert!(scheduler.drain_due(now + Duration::from_millis(50)).is_empty());
        assert_eq!(
            scheduler.drain_due(now + CHART_REBUILD_DELAY),
            vec![Deferred::RebuildChart]
        );
    }

    #[test]
    fn test_out_of_range_render_is_ignored() {
        let (mut view, mut surface, mut scheduler) = setup();
        let now = Instant::now();
        view.render(&mut surface, 2, &mut scheduler, now);
        assert!(!view.render(&mut surface, 8, &mut scheduler, now));
        assert_single_active(&surface, 2);
    }
}
