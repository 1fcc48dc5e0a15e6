use std::collections::HashMap;

use crate::deck::{DeckLayout, Role};
use crate::model::NavigationIntent;

/// Horizontal displacement, in points, a swipe must exceed to navigate.
pub const SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
}

/// A raw input event, already detached from the windowing toolkit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Click(Role),
    Key(Key),
    TouchStart { x: f32 },
    TouchEnd { x: f32 },
}

type Handler = Box<dyn Fn() -> NavigationIntent>;

/// Maps logical roles to click handlers.
#[derive(Default)]
pub struct RoleTable {
    handlers: HashMap<Role, Handler>,
}

impl RoleTable {
    /// Build the bindings for every clickable role in the deck.
    pub fn from_deck(deck: &DeckLayout) -> Self {
        let mut table = Self::default();
        for role in deck.roles() {
            match role {
                Role::Indicator(i) => {
                    let index = i as i64;
                    table.bind(role, move || NavigationIntent::GoTo(index));
                }
                Role::PrevControl => table.bind(role, || NavigationIntent::Previous),
                Role::NextControl => table.bind(role, || NavigationIntent::Next),
                _ => {}
            }
        }
        table
    }

    pub fn bind(&mut self, role: Role, handler: impl Fn() -> NavigationIntent + 'static) {
        self.handlers.insert(role, Box::new(handler));
    }

    pub fn dispatch(&self, role: Role) -> Option<NavigationIntent> {
        self.handlers.get(&role).map(|handler| handler())
    }

    pub fn is_bound(&self, role: Role) -> bool {
        self.handlers.contains_key(&role)
    }

    pub fn bound_count(&self) -> usize {
        self.handlers.len()
    }
}

/// Single-shot swipe detection: start x is recorded, the delta is read at touch end.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start_x: Option<f32>,
}

impl SwipeTracker {
    pub fn start(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    pub fn end(&mut self, x: f32) -> Option<NavigationIntent> {
        let start = self.start_x.take()?;
        let delta = x - start;
        if delta < -SWIPE_THRESHOLD {
            Some(NavigationIntent::Next)
        } else if delta > SWIPE_THRESHOLD {
            Some(NavigationIntent::Previous)
        } else {
            None
        }
    }
}

/// Turns clicks, keys and swipes into navigation intents.
pub struct InputAdapter {
    table: RoleTable,
    swipe: SwipeTracker,
}

impl InputAdapter {
    pub fn new(table: RoleTable) -> Self {
        Self {
            table,
            swipe: SwipeTracker::default(),
        }
    }

    pub fn from_deck(deck: &DeckLayout) -> Self {
        let table = RoleTable::from_deck(deck);
        tracing::debug!(bound = table.bound_count(), "input roles bound");
        Self::new(table)
    }

    pub fn translate(&mut self, event: InputEvent) -> Option<NavigationIntent> {
        let intent = match event {
            InputEvent::Click(role) => self.table.dispatch(role),
            InputEvent::Key(Key::ArrowLeft) => Some(NavigationIntent::Previous),
            InputEvent::Key(Key::ArrowRight) => Some(NavigationIntent::Next),
            InputEvent::TouchStart { x } => {
                self.swipe.start(x);
                None
            }
            InputEvent::TouchEnd { x } => self.swipe.end(x),
        };
        if let Some(intent) = intent {
            tracing::trace!(?event, ?intent, "input translated");
        }
        intent
    }

    pub fn is_clickable(&self, role: Role) -> bool {
        self.table.is_bound(role)
    }
}
