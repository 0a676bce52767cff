mod app;
pub mod cli;
pub mod logging;

pub use app::App;
pub use cli::{Cli, Command};
