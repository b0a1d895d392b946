pub mod loader;
pub mod network;
pub mod routing;
pub mod ui;
