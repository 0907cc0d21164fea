mod app;
pub mod cli;
pub mod logging;
pub mod navigator;
pub mod overlay;
pub mod settings;

pub use app::App;
