//! Gopher Slack: Web API client, Socket Mode listener, startup.

pub mod socket;
pub mod startup;
pub mod web;

pub use socket::SocketModeListener;
pub use startup::initialize;
pub use web::SlackWebClient;
