use std::collections::BTreeMap;

use crate::deck::{DeckLayout, Role};

/// Mutation capability over the visible elements, addressed by role.
pub trait RenderSurface {
    fn set_active(&mut self, role: Role, active: bool);
    fn set_text(&mut self, role: Role, text: &str);
    fn set_disabled(&mut self, role: Role, disabled: bool);
    fn set_width_percent(&mut self, role: Role, percent: f32);
    fn is_mounted(&self, role: Role) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementState {
    pub active: bool,
    pub disabled: bool,
    pub text: String,
    pub width_percent: f32,
}

/// Retained element table written by the projector and read by the painter.
#[derive(Debug, Clone, Default)]
pub struct SurfaceState {
    elements: BTreeMap<Role, ElementState>,
}

impl SurfaceState {
    pub fn mount(deck: &DeckLayout) -> Self {
        let elements = deck
            .roles()
            .into_iter()
            .map(|role| (role, ElementState::default()))
            .collect();
        Self { elements }
    }

    pub fn element(&self, role: Role) -> Option<&ElementState> {
        self.elements.get(&role)
    }

    pub fn is_active(&self, role: Role) -> bool {
        self.element(role).is_some_and(|e| e.active)
    }

    pub fn is_disabled(&self, role: Role) -> bool {
        self.element(role).is_some_and(|e| e.disabled)
    }

    pub fn text(&self, role: Role) -> &str {
        self.element(role).map_or("", |e| e.text.as_str())
    }

    pub fn width_percent(&self, role: Role) -> f32 {
        self.element(role).map_or(0.0, |e| e.width_percent)
    }

    #[cfg(test)]
    pub fn active_roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.elements
            .iter()
            .filter(|(_, e)| e.active)
            .map(|(role, _)| *role)
    }

    #[cfg(test)]
    pub fn unmount(&mut self, role: Role) {
        self.elements.remove(&role);
    }
}

impl RenderSurface for SurfaceState {
    fn set_active(&mut self, role: Role, active: bool) {
        if let Some(e) = self.elements.get_mut(&role) {
            e.active = active;
        }
    }

    fn set_text(&mut self, role: Role, text: &str) {
        if let Some(e) = self.elements.get_mut(&role) {
            text.clone_into(&mut e.text);
        }
    }

    fn set_disabled(&mut self, role: Role, disabled: bool) {
        if let Some(e) = self.elements.get_mut(&role) {
            e.disabled = disabled;
        }
    }

    fn set_width_percent(&mut self, role: Role, percent: f32) {
        if let Some(e) = self.elements.get_mut(&role) {
            e.width_percent = percent;
        }
    }

    fn is_mounted(&self, role: Role) -> bool {
        self.elements.contains_key(&role)
    }
}
