pub mod alias;
pub mod args;
pub mod child;
pub mod config;
pub mod console;
pub mod input;
pub mod logging;
pub mod relay;
