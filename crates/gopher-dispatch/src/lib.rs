//! Gopher dispatch: from inbound event to platform effect.
//!
//! - **rules** / **commands**: the ordered rule table and what each rule does
//! - **dispatcher**: normalization, wake-word handling, first-match selection
//! - **executor**: performs the chosen action via `ChatPlatform`
//! - **playground**: Go Playground share client
//! - **bot**: the event loop tying it all together

pub mod action;
pub mod bot;
pub mod commands;
pub mod dispatcher;
pub mod executor;
pub mod library;
pub mod playground;
pub mod resources;
pub mod rules;

pub use action::{Action, Audience, Origin};
pub use bot::GopherBot;
pub use dispatcher::Dispatcher;
pub use executor::ActionExecutor;
pub use playground::{PasteService, PlaygroundClient, PlaygroundError};
pub use rules::{Rule, RuleTable};
