//! Collapse/expand state machine for the QR panel.
//!
//! Two states only. A toggle click flips between them; crossing the scroll
//! threshold force-expands once per page load when auto-show is enabled.
//! Without a toggle button the panel is pinned open and no event changes it.

use crate::widget::WidgetConfig;

/// Vertical scroll offset (px) past which auto-show fires.
pub const SCROLL_THRESHOLD_PX: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Collapsed,
    Expanded,
}

impl PanelState {
    /// CSS `display` value for the content panel in this state.
    pub fn css_display(self) -> &'static str {
        match self {
            PanelState::Collapsed => "none",
            PanelState::Expanded => "flex",
        }
    }

    fn flipped(self) -> Self {
        match self {
            PanelState::Collapsed => PanelState::Expanded,
            PanelState::Expanded => PanelState::Collapsed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelEvent {
    ToggleClicked,
    Scrolled { scroll_y: f64 },
}

#[derive(Debug, Clone)]
pub struct PanelMachine {
    state: PanelState,
    has_toggle: bool,
    auto_show_on_scroll: bool,
    scroll_latched: bool,
}

impl PanelMachine {
    pub fn new(config: &WidgetConfig) -> Self {
        let state = if config.show_button && config.start_collapsed {
            PanelState::Collapsed
        } else {
            PanelState::Expanded
        };

        Self {
            state,
            has_toggle: config.show_button,
            auto_show_on_scroll: config.auto_show_on_scroll,
            scroll_latched: false,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Whether a toggle button exists (and a click listener is attached).
    pub fn has_toggle(&self) -> bool {
        self.has_toggle
    }

    /// Whether a scroll listener is needed at all.
    pub fn listens_for_scroll(&self) -> bool {
        self.has_toggle && self.auto_show_on_scroll && !self.scroll_latched
    }

    /// Feed an event. Returns the new state when it changed.
    pub fn handle(&mut self, event: PanelEvent) -> Option<PanelState> {
        if !self.has_toggle {
            return None;
        }

        let next = match event {
            PanelEvent::ToggleClicked => self.state.flipped(),
            PanelEvent::Scrolled { scroll_y } => {
                if !self.listens_for_scroll() || scroll_y <= SCROLL_THRESHOLD_PX {
                    return None;
                }
                self.scroll_latched = true;
                PanelState::Expanded
            }
        };

        if next == self.state {
            return None;
        }
        self.state = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(show_button: bool, start_collapsed: bool, auto_show: bool) -> PanelMachine {
        PanelMachine::new(&WidgetConfig {
            show_button,
            start_collapsed,
            auto_show_on_scroll: auto_show,
            ..WidgetConfig::default()
        })
    }

    fn scroll(y: f64) -> PanelEvent {
        PanelEvent::Scrolled { scroll_y: y }
    }

    #[test]
    fn initial_state_follows_start_collapsed_only_with_toggle() {
        assert_eq!(machine(true, true, false).state(), PanelState::Collapsed);
        assert_eq!(machine(true, false, false).state(), PanelState::Expanded);
        assert_eq!(machine(false, true, false).state(), PanelState::Expanded);
    }

    #[test]
    fn click_flips_state() {
        let mut m = machine(true, true, false);
        assert_eq!(m.handle(PanelEvent::ToggleClicked), Some(PanelState::Expanded));
        assert_eq!(m.handle(PanelEvent::ToggleClicked), Some(PanelState::Collapsed));
    }

    #[test]
    fn scroll_expands_exactly_once() {
        let mut m = machine(true, true, true);
        assert_eq!(m.handle(scroll(150.0)), None);
        assert_eq!(m.handle(scroll(250.0)), Some(PanelState::Expanded));
        assert!(!m.listens_for_scroll());

        m.handle(PanelEvent::ToggleClicked);
        assert_eq!(m.state(), PanelState::Collapsed);
        assert_eq!(m.handle(scroll(0.0)), None);
        assert_eq!(m.handle(scroll(300.0)), None);
        assert_eq!(m.state(), PanelState::Collapsed);
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut m = machine(true, true, true);
        assert_eq!(m.handle(scroll(200.0)), None);
        assert_eq!(m.handle(scroll(200.5)), Some(PanelState::Expanded));
    }

    #[test]
    fn crossing_while_expanded_still_latches() {
        let mut m = machine(true, false, true);
        assert_eq!(m.handle(scroll(400.0)), None);
        m.handle(PanelEvent::ToggleClicked);
        assert_eq!(m.handle(scroll(500.0)), None);
        assert_eq!(m.state(), PanelState::Collapsed);
    }

    #[test]
    fn scroll_ignored_without_auto_show() {
        let mut m = machine(true, true, false);
        assert_eq!(m.handle(scroll(1000.0)), None);
        assert_eq!(m.state(), PanelState::Collapsed);
    }

    #[test]
    fn no_toggle_pins_panel_open() {
        let mut m = machine(false, true, true);
        assert!(!m.has_toggle());
        assert!(!m.listens_for_scroll());
        assert_eq!(m.handle(PanelEvent::ToggleClicked), None);
        assert_eq!(m.handle(scroll(500.0)), None);
        assert_eq!(m.state(), PanelState::Expanded);
    }

    #[test]
    fn css_display_values() {
        assert_eq!(PanelState::Collapsed.css_display(), "none");
        assert_eq!(PanelState::Expanded.css_display(), "flex");
    }
}
