//! Swipe-driven navigation between the three tab screens.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{DEFAULT_SWIPE_OFFSET_THRESHOLD, DEFAULT_SWIPE_VELOCITY_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Currently,
    Today,
    Weekly,
}

impl Screen {
    /// Tab order.
    pub const ALL: [Screen; 3] = [Screen::Currently, Screen::Today, Screen::Weekly];

    pub const fn label(self) -> &'static str {
        match self {
            Screen::Currently => "Currently",
            Screen::Today => "Today",
            Screen::Weekly => "Weekly",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Screen::Currently => 0,
            Screen::Today => 1,
            Screen::Weekly => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Raw horizontal drag as reported by the shell's gesture source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipeGesture {
    pub direction: SwipeDirection,
    /// Horizontal velocity, normalized units per millisecond.
    pub velocity: f64,
    /// Horizontal travel in layout units.
    pub offset: f64,
    #[serde(default)]
    pub vertical_offset: f64,
}

impl SwipeGesture {
    pub fn new(direction: SwipeDirection, velocity: f64, offset: f64) -> Self {
        Self {
            direction,
            velocity,
            offset,
            vertical_offset: 0.0,
        }
    }

    pub fn with_vertical_offset(mut self, vertical_offset: f64) -> Self {
        self.vertical_offset = vertical_offset;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipeConfig {
    pub velocity_threshold: f64,
    pub directional_offset_threshold: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: DEFAULT_SWIPE_VELOCITY_THRESHOLD,
            directional_offset_threshold: DEFAULT_SWIPE_OFFSET_THRESHOLD,
        }
    }
}

impl SwipeConfig {
    /// Anything below threshold, or more vertical than horizontal, is a
    /// scroll or a tap.
    pub fn recognizes(&self, gesture: &SwipeGesture) -> bool {
        if !gesture.velocity.is_finite()
            || !gesture.offset.is_finite()
            || !gesture.vertical_offset.is_finite()
        {
            return false;
        }

        gesture.velocity.abs() >= self.velocity_threshold
            && gesture.offset.abs() >= self.directional_offset_threshold
            && gesture.vertical_offset.abs() < gesture.offset.abs()
    }

    pub fn validated(mut self) -> Self {
        if !self.velocity_threshold.is_finite() || self.velocity_threshold < 0.0 {
            self.velocity_threshold = DEFAULT_SWIPE_VELOCITY_THRESHOLD;
        }
        if !self.directional_offset_threshold.is_finite() || self.directional_offset_threshold < 0.0
        {
            self.directional_offset_threshold = DEFAULT_SWIPE_OFFSET_THRESHOLD;
        }
        self
    }
}

/// (from, direction, to). Pairs not listed leave the screen unchanged.
const TRANSITIONS: [(Screen, SwipeDirection, Screen); 4] = [
    (Screen::Currently, SwipeDirection::Left, Screen::Today),
    (Screen::Today, SwipeDirection::Left, Screen::Weekly),
    (Screen::Today, SwipeDirection::Right, Screen::Currently),
    (Screen::Weekly, SwipeDirection::Right, Screen::Today),
];

pub fn next_screen(current: Screen, direction: SwipeDirection) -> Screen {
    TRANSITIONS
        .iter()
        .find(|(from, dir, _)| *from == current && *dir == direction)
        .map_or(current, |(_, _, to)| *to)
}

/// Owns the active screen.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenNavigator {
    active: Screen,
    swipe: SwipeConfig,
}

impl ScreenNavigator {
    pub fn new(swipe: SwipeConfig) -> Self {
        Self {
            active: Screen::default(),
            swipe: swipe.validated(),
        }
    }

    pub fn active(&self) -> Screen {
        self.active
    }

    pub fn swipe_config(&self) -> SwipeConfig {
        self.swipe
    }

    pub fn set_swipe_config(&mut self, swipe: SwipeConfig) {
        self.swipe = swipe.validated();
    }

    /// Returns whether the active screen changed.
    pub fn swipe(&mut self, direction: SwipeDirection) -> bool {
        let next = next_screen(self.active, direction);
        if next == self.active {
            return false;
        }
        debug!(from = ?self.active, to = ?next, ?direction, "screen transition");
        self.active = next;
        true
    }

    pub fn handle_gesture(&mut self, gesture: &SwipeGesture) -> bool {
        if !self.swipe.recognizes(gesture) {
            debug!(?gesture, "gesture below swipe threshold");
            return false;
        }
        self.swipe(gesture.direction)
    }

    /// Direct tab-bar selection.
    pub fn select(&mut self, screen: Screen) -> bool {
        if screen == self.active {
            return false;
        }
        debug!(from = ?self.active, to = ?screen, "tab selected");
        self.active = screen;
        true
    }
}
