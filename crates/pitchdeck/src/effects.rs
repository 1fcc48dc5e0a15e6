use std::collections::HashSet;
use std::time::{Duration, Instant};

use eframe::egui::{Pos2, Vec2};

use crate::deck::Role;
use crate::scheduler::{Deferred, Scheduler};

pub const RIPPLE_DURATION: Duration = Duration::from_millis(300);
/// Final ripple scale relative to its base radius.
pub const RIPPLE_MAX_SCALE: f32 = 4.0;
/// Upward shift of a hovered interactive element, in points.
pub const HOVER_LIFT: f32 = 2.0;

const ENTRANCE_DURATION: f32 = 0.3;
const ENTRANCE_OFFSET: f32 = 20.0;

pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub id: u64,
    pub owner: Role,
    /// Click position relative to the owning control's top-left corner.
    pub offset: Vec2,
    pub spawned: Instant,
}

impl Ripple {
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.spawned).as_secs_f32();
        (elapsed / RIPPLE_DURATION.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn scale(&self, now: Instant) -> f32 {
        RIPPLE_MAX_SCALE * self.progress(now)
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        1.0 - self.progress(now)
    }
}

/// Hover lift and click ripples. Never touches navigation state.
#[derive(Debug, Default)]
pub struct EffectsLayer {
    hovered: HashSet<Role>,
    ripples: Vec<Ripple>,
    next_ripple: u64,
}

impl EffectsLayer {
    pub fn pointer_enter(&mut self, role: Role) {
        if role.is_interactive() {
            self.hovered.insert(role);
        }
    }

    pub fn pointer_leave(&mut self, role: Role) {
        self.hovered.remove(&role);
    }

    /// Track hover state from a per-frame hover flag.
    pub fn set_hovered(&mut self, role: Role, hovered: bool) {
        if hovered {
            self.pointer_enter(role);
        } else {
            self.pointer_leave(role);
        }
    }

    /// Vertical offset to paint `role` with (negative is up).
    pub fn lift(&self, role: Role) -> f32 {
        if self.hovered.contains(&role) {
            -HOVER_LIFT
        } else {
            0.0
        }
    }

    /// Spawn a ripple for a click on a button-class control and schedule its removal.
    pub fn spawn_ripple(
        &mut self,
        owner: Role,
        click: Pos2,
        control_origin: Pos2,
        now: Instant,
        scheduler: &mut Scheduler,
    ) -> Option<u64> {
        if !owner.is_button() {
            return None;
        }
        self.next_ripple += 1;
        let id = self.next_ripple;
        self.ripples.push(Ripple {
            id,
            owner,
            offset: click - control_origin,
            spawned: now,
        });
        scheduler.schedule(now, RIPPLE_DURATION, Deferred::RemoveRipple(id));
        Some(id)
    }

    /// Returns false when the ripple was already gone.
    pub fn remove_ripple(&mut self, id: u64) -> bool {
        let before = self.ripples.len();
        self.ripples.retain(|r| r.id != id);
        self.ripples.len() != before
    }

    pub fn ripples_on(&self, owner: Role) -> impl Iterator<Item = &Ripple> + '_ {
        self.ripples.iter().filter(move |r| r.owner == owner)
    }

    pub fn ripple_count(&self) -> usize {
        self.ripples.len()
    }
}

/// Fade-and-slide entrance of the newly active slide.
#[derive(Debug, Clone, Copy)]
pub struct SlideEntrance {
    started: Instant,
}

impl SlideEntrance {
    pub fn new(started: Instant) -> Self {
        Self { started }
    }

    fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started).as_secs_f32();
        ease_in_out((elapsed / ENTRANCE_DURATION).clamp(0.0, 1.0))
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        self.progress(now)
    }

    pub fn x_offset(&self, now: Instant) -> f32 {
        ENTRANCE_OFFSET * (1.0 - self.progress(now))
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started).as_secs_f32() >= ENTRANCE_DURATION
    }
}
