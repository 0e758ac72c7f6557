//! Capabilities the core uses to reach the shell.
//!
//! We use Crux's built-in Render capability directly because it provides
//! all necessary functionality for triggering view updates.

mod location;

pub use self::location::{
    Location, LocationOperation, LocationOutput, LocationShellError, LocationShellResult,
};
pub use crux_core::render::Render;

use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub render: Render<Event>,
    pub location: Location<Event>,
}
