//! Chrome session management

pub mod config;
pub mod session;

pub use config::LaunchOptions;
pub use session::BrowserSession;
