use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::location::LocationResult;
use crate::model::RequestId;
use crate::navigation::{Screen, SwipeGesture};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Event {
    #[default]
    Noop,

    AppStarted,
    Configure(AppConfig),

    SearchQueryChanged(String),
    SearchCleared,

    LocateRequested,
    // Internal: completion of a location acquisition.
    LocationResolved {
        request: RequestId,
        result: LocationResult,
    },

    Swiped(SwipeGesture),
    TabSelected(Screen),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Noop => "noop",
            Event::AppStarted => "app_started",
            Event::Configure(_) => "configure",
            Event::SearchQueryChanged(_) => "search_query_changed",
            Event::SearchCleared => "search_cleared",
            Event::LocateRequested => "locate_requested",
            Event::LocationResolved { .. } => "location_resolved",
            Event::Swiped(_) => "swiped",
            Event::TabSelected(_) => "tab_selected",
        }
    }

    pub fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Event::SearchQueryChanged(_)
                | Event::SearchCleared
                | Event::LocateRequested
                | Event::Swiped(_)
                | Event::TabSelected(_)
        )
    }
}
