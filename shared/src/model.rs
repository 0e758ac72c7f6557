use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::config::AppConfig;
use crate::location::LocationResult;
use crate::navigation::ScreenNavigator;
use crate::view::{resolve, ViewState};

/// Identifies one location acquisition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Search text and last location result, shared read-only by every screen.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Session {
    search_query: String,
    location: LocationResult,
    pending_request: Option<RequestId>,
    next_request_id: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn location(&self) -> &LocationResult {
        &self.location
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending_request
    }

    pub fn is_locating(&self) -> bool {
        self.pending_request.is_some()
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
    }

    /// Starts a new acquisition. Any request still in flight is superseded
    /// and its result will be dropped.
    pub fn begin_location_request(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request = RequestId(self.next_request_id);

        if let Some(previous) = self.pending_request.replace(request) {
            debug!(%previous, %request, "superseding in-flight location request");
        }
        request
    }

    /// Returns false when `request` is not the latest one.
    ///
    /// A successful fix clears the search query so the location takes over
    /// the display; a failure leaves it untouched.
    pub fn apply_location_result(&mut self, request: RequestId, result: LocationResult) -> bool {
        if self.pending_request != Some(request) {
            debug!(%request, "dropping stale location result");
            return false;
        }

        self.pending_request = None;
        if result.is_success() {
            self.search_query.clear();
        }
        self.location = result;
        true
    }

    pub fn view_state(&self) -> ViewState {
        resolve(&self.search_query, &self.location)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Model {
    pub session: Session,
    pub navigator: ScreenNavigator,
    pub config: AppConfig,
}

impl Model {
    pub fn new(config: AppConfig) -> Self {
        let config = config.validated();
        Self {
            session: Session::new(),
            navigator: ScreenNavigator::new(config.swipe),
            config,
        }
    }

    pub fn configure(&mut self, config: AppConfig) {
        self.config = config.validated();
        self.navigator.set_swipe_config(self.config.swipe);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{Coordinates, ErrorKind};

    fn lyon() -> LocationResult {
        LocationResult::success(Coordinates::new(45.76, 4.83).unwrap())
    }

    #[test]
    fn test_success_clears_search() {
        let mut session = Session::new();
        session.set_search_query("Lyon");
        let request = session.begin_location_request();

        assert!(session.is_locating());
        assert!(session.apply_location_result(request, lyon()));
        assert_eq!(session.search_query(), "");
        assert_eq!(session.location(), &lyon());
        assert!(!session.is_locating());
    }

    #[test]
    fn test_failure_keeps_search() {
        let mut session = Session::new();
        session.set_search_query("Lyon");
        let request = session.begin_location_request();
        let failure = LocationResult::from_kind(ErrorKind::PositionUnavailable);

        assert!(session.apply_location_result(request, failure.clone()));
        assert_eq!(session.search_query(), "Lyon");
        assert_eq!(session.location(), &failure);
        assert_eq!(session.view_state(), ViewState::ShowingSearch("Lyon".into()));
    }

    #[test]
    fn test_restart_drops_stale_result() {
        let mut session = Session::new();
        let first = session.begin_location_request();
        let second = session.begin_location_request();
        assert_ne!(first, second);

        let failure = LocationResult::from_kind(ErrorKind::Timeout);
        assert!(session.apply_location_result(second, failure.clone()));
        assert!(!session.apply_location_result(first, lyon()));
        assert_eq!(session.location(), &failure);
    }

    #[test]
    fn test_unsolicited_result_ignored() {
        let mut session = Session::new();
        assert!(!session.apply_location_result(RequestId(7), lyon()));
        assert_eq!(session.location(), &LocationResult::Unset);
    }

    #[test]
    fn test_each_result_supersedes_previous() {
        let mut session = Session::new();
        let request = session.begin_location_request();
        session.apply_location_result(request, lyon());

        let request = session.begin_location_request();
        let failure = LocationResult::from_kind(ErrorKind::Unknown);
        session.apply_location_result(request, failure.clone());
        assert_eq!(session.location(), &failure);
        assert_eq!(session.view_state(), ViewState::ShowingLocation(failure));
    }

    #[test]
    fn test_clear_search() {
        let mut session = Session::new();
        session.set_search_query("Porto");
        session.clear_search();
        assert_eq!(session.view_state(), ViewState::Empty);
    }
}
