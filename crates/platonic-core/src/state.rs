//! Hover and finale state shared by the frame driver and the input handlers.

use log::{debug, info};

use crate::element::Element;

/// Which shape is hovered and whether the finale has started.
///
/// Created as `{None, false}`. The finale flag flips once, when Ether is
/// hovered, and from then on the state is frozen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneState {
    active_element: Element,
    is_finale: bool,
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently hovered element.
    pub fn active_element(&self) -> Element {
        self.active_element
    }

    /// Whether the finale is running.
    pub fn is_finale(&self) -> bool {
        self.is_finale
    }

    /// Whether `element` is the hovered one.
    pub fn is_active(&self, element: Element) -> bool {
        self.active_element == element
    }

    /// Pointer entered (or clicked) a shape. Returns whether anything changed.
    pub fn on_hover(&mut self, element: Element) -> bool {
        if self.is_finale {
            return false;
        }
        let changed = self.active_element != element;
        self.active_element = element;
        if element == Element::Ether {
            self.is_finale = true;
            info!("finale started");
            return true;
        }
        if changed {
            debug!("hover {element}");
        }
        changed
    }

    /// Pointer left a shape. Returns whether anything changed.
    pub fn on_hover_leave(&mut self) -> bool {
        if self.is_finale {
            return false;
        }
        let changed = self.active_element != Element::None;
        if changed {
            debug!("leave {}", self.active_element);
        }
        self.active_element = Element::None;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let state = SceneState::new();
        assert_eq!(state.active_element(), Element::None);
        assert!(!state.is_finale());
    }

    #[test]
    fn test_hover_tracks_latest_without_ether() {
        let mut state = SceneState::new();
        let sequence = [
            Some(Element::Water),
            Some(Element::Fire),
            None,
            Some(Element::Air),
            Some(Element::Earth),
            None,
            None,
            Some(Element::Fire),
        ];
        for event in sequence {
            match event {
                Some(element) => {
                    state.on_hover(element);
                    assert_eq!(state.active_element(), element);
                }
                None => {
                    state.on_hover_leave();
                    assert_eq!(state.active_element(), Element::None);
                }
            }
            assert!(!state.is_finale());
        }
    }

    #[test]
    fn test_ether_starts_finale() {
        let mut state = SceneState::new();
        assert!(state.on_hover(Element::Ether));
        assert_eq!(state.active_element(), Element::Ether);
        assert!(state.is_finale());
    }

    #[test]
    fn test_frozen_after_finale() {
        let mut state = SceneState::new();
        state.on_hover(Element::Fire);
        state.on_hover(Element::Ether);
        let frozen = state;

        for element in [
            Element::Water,
            Element::Earth,
            Element::Fire,
            Element::Air,
            Element::Ether,
            Element::None,
        ] {
            assert!(!state.on_hover(element));
            assert_eq!(state, frozen);
            assert!(!state.on_hover_leave());
            assert_eq!(state, frozen);
        }
    }

    #[test]
    fn test_hover_scenario() {
        let mut state = SceneState::new();

        state.on_hover(Element::Water);
        assert_eq!(state.active_element(), Element::Water);
        assert!(!state.is_finale());

        state.on_hover_leave();
        assert_eq!(state.active_element(), Element::None);
        assert!(!state.is_finale());

        state.on_hover(Element::Ether);
        assert_eq!(state.active_element(), Element::Ether);
        assert!(state.is_finale());

        state.on_hover(Element::Earth);
        assert_eq!(state.active_element(), Element::Ether);
        assert!(state.is_finale());
    }

    #[test]
    fn test_change_reporting() {
        let mut state = SceneState::new();
        assert!(!state.on_hover_leave());
        assert!(state.on_hover(Element::Air));
        assert!(!state.on_hover(Element::Air));
        assert!(state.on_hover_leave());
    }
}
