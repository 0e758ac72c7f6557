// lib.rs - Weather app shared core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod capabilities;
pub mod config;
pub mod event;
pub mod location;
pub mod model;
pub mod navigation;
pub mod view;

pub use app::App;
pub use capabilities::{
    Capabilities, Effect, LocationOperation, LocationOutput, LocationShellError,
    LocationShellResult,
};
pub use config::{AppConfig, ConfigError, PermissionRationale, Platform};
pub use event::Event;
pub use location::{
    Coordinates, ErrorKind, LocationAcquirer, LocationResult, PermissionGate, PermissionStatus,
    PositionError, PositionOptions,
};
pub use model::{Model, RequestId, Session};
pub use navigation::{Screen, ScreenNavigator, SwipeConfig, SwipeDirection, SwipeGesture};
pub use view::{resolve, ScreenView, ViewModel, ViewState};

pub const DEFAULT_POSITION_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_POSITION_MAX_AGE_MS: u64 = 10_000;
pub const MIN_POSITION_TIMEOUT_MS: u64 = 1_000;
pub const MAX_POSITION_TIMEOUT_MS: u64 = 120_000;
pub const MAX_POSITION_AGE_MS: u64 = 600_000;
pub const DEFAULT_SWIPE_VELOCITY_THRESHOLD: f64 = 0.3;
pub const DEFAULT_SWIPE_OFFSET_THRESHOLD: f64 = 80.0;
pub const PERMISSION_NOT_GRANTED_MESSAGE: &str = "location permission denied";
pub const LOCATION_HEADLINE: &str = "Geolocation";

pub mod app {
    use tracing::{debug, info};

    use crate::capabilities::Capabilities;
    use crate::event::Event;
    use crate::model::Model;
    use crate::view::ViewModel;

    #[derive(Default)]
    pub struct App;

    impl App {
        fn start_location_request(model: &mut Model, caps: &Capabilities) {
            let request = model.session.begin_location_request();
            info!(%request, platform = ?model.config.platform, "acquiring current location");

            caps.location
                .acquire_current_location(&model.config, move |result| {
                    Event::LocationResolved { request, result }
                });
        }
    }

    impl crux_core::App for App {
        type Event = Event;
        type Model = Model;
        type ViewModel = ViewModel;
        type Capabilities = Capabilities;

        fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
            debug!(
                event = event.name(),
                user_initiated = event.is_user_initiated(),
                "handling event"
            );

            match event {
                Event::Noop => {}

                Event::AppStarted => {
                    if model.config.locate_on_start {
                        Self::start_location_request(model, caps);
                    }
                    caps.render.render();
                }

                Event::Configure(config) => {
                    model.configure(config);
                    caps.render.render();
                }

                Event::SearchQueryChanged(query) => {
                    model.session.set_search_query(query);
                    caps.render.render();
                }

                Event::SearchCleared => {
                    model.session.clear_search();
                    caps.render.render();
                }

                Event::LocateRequested => {
                    Self::start_location_request(model, caps);
                    caps.render.render();
                }

                Event::LocationResolved { request, result } => {
                    if model.session.apply_location_result(request, result) {
                        info!(
                            %request,
                            success = model.session.location().is_success(),
                            "location result applied"
                        );
                        caps.render.render();
                    }
                }

                Event::Swiped(gesture) => {
                    if model.navigator.handle_gesture(&gesture) {
                        caps.render.render();
                    }
                }

                Event::TabSelected(screen) => {
                    if model.navigator.select(screen) {
                        caps.render.render();
                    }
                }
            }
        }

        fn view(&self, model: &Model) -> ViewModel {
            ViewModel::new(&model.session, &model.navigator)
        }
    }
}
