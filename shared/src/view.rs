use serde::{Deserialize, Serialize};

use crate::location::LocationResult;
use crate::model::Session;
use crate::navigation::{Screen, ScreenNavigator};
use crate::LOCATION_HEADLINE;

/// What a screen displays, derived from the session on every render.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Empty,
    ShowingSearch(String),
    ShowingLocation(LocationResult),
}

impl ViewState {
    pub fn headline(&self) -> Option<&str> {
        match self {
            ViewState::Empty => None,
            ViewState::ShowingSearch(query) => Some(query.as_str()),
            ViewState::ShowingLocation(_) => Some(LOCATION_HEADLINE),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::ShowingLocation(location) => location.error_message(),
            _ => None,
        }
    }
}

/// A non-empty search always wins over any location result.
pub fn resolve(query: &str, location: &LocationResult) -> ViewState {
    if !query.is_empty() {
        return ViewState::ShowingSearch(query.to_owned());
    }

    match location {
        LocationResult::Unset => ViewState::Empty,
        LocationResult::Success { .. } | LocationResult::Failure { .. } => {
            ViewState::ShowingLocation(location.clone())
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScreenView {
    pub screen: Screen,
    pub label: String,
    pub is_active: bool,
    pub headline: Option<String>,
    pub error_message: Option<String>,
    pub state: ViewState,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ViewModel {
    pub active_screen: Screen,
    pub search_query: String,
    pub is_locating: bool,
    pub screens: Vec<ScreenView>,
}

impl ViewModel {
    pub fn new(session: &Session, navigator: &ScreenNavigator) -> Self {
        let state = session.view_state();
        let active = navigator.active();

        let screens = Screen::ALL
            .iter()
            .map(|&screen| ScreenView {
                screen,
                label: screen.label().to_owned(),
                is_active: screen == active,
                headline: state.headline().map(str::to_owned),
                error_message: state.error_message().map(str::to_owned),
                state: state.clone(),
            })
            .collect();

        Self {
            active_screen: active,
            search_query: session.search_query().to_owned(),
            is_locating: session.is_locating(),
            screens,
        }
    }

    pub fn active(&self) -> Option<&ScreenView> {
        self.screens.iter().find(|s| s.is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{Coordinates, ErrorKind};

    fn success(latitude: f64, longitude: f64) -> LocationResult {
        LocationResult::success(Coordinates::new(latitude, longitude).unwrap())
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_empty() {
            assert_eq!(resolve("", &LocationResult::Unset), ViewState::Empty);
        }

        #[test]
        fn test_search_beats_location() {
            assert_eq!(
                resolve("Paris", &success(1.0, 2.0)),
                ViewState::ShowingSearch("Paris".into())
            );
            assert_eq!(
                resolve("Paris", &LocationResult::from_kind(ErrorKind::Timeout)),
                ViewState::ShowingSearch("Paris".into())
            );
            assert_eq!(
                resolve("Paris", &LocationResult::Unset),
                ViewState::ShowingSearch("Paris".into())
            );
        }

        #[test]
        fn test_location_success() {
            assert_eq!(
                resolve("", &success(48.85, 2.35)),
                ViewState::ShowingLocation(success(48.85, 2.35))
            );
        }

        #[test]
        fn test_location_failure() {
            let failure = LocationResult::failure(ErrorKind::Timeout, "too slow");
            assert_eq!(
                resolve("", &failure),
                ViewState::ShowingLocation(failure.clone())
            );
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn test_headline() {
            assert_eq!(ViewState::Empty.headline(), None);
            assert_eq!(
                ViewState::ShowingSearch("Lyon".into()).headline(),
                Some("Lyon")
            );
            assert_eq!(
                ViewState::ShowingLocation(success(0.0, 0.0)).headline(),
                Some(LOCATION_HEADLINE)
            );
        }

        #[test]
        fn test_error_message() {
            let failure = LocationResult::failure(ErrorKind::Unknown, "nope");
            assert_eq!(
                ViewState::ShowingLocation(failure).error_message(),
                Some("nope")
            );
            assert_eq!(
                ViewState::ShowingLocation(success(0.0, 0.0)).error_message(),
                None
            );
        }
    }

    mod view_model_tests {
        use super::*;

        #[test]
        fn test_all_screens_share_state() {
            let mut session = Session::new();
            session.set_search_query("Lyon");
            let mut navigator = ScreenNavigator::default();
            navigator.select(Screen::Today);

            let view = ViewModel::new(&session, &navigator);
            assert_eq!(view.active_screen, Screen::Today);
            assert_eq!(view.screens.len(), 3);
            assert!(view
                .screens
                .iter()
                .all(|s| s.state == ViewState::ShowingSearch("Lyon".into())));
            assert_eq!(view.active().map(|s| s.label.as_str()), Some("Today"));
            assert_eq!(
                view.screens.iter().filter(|s| s.is_active).count(),
                1
            );
        }

        #[test]
        fn test_serializes_for_shell() {
            let view = ViewModel::new(&Session::new(), &ScreenNavigator::default());
            let json = serde_json::to_value(&view).unwrap();
            assert_eq!(json["active_screen"], "Currently");
            assert_eq!(json["screens"][0]["state"]["type"], "empty");
        }
    }
}
