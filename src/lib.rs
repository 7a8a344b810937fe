// Library crate exposing modules for integration tests

pub mod chart;
pub mod cli;
pub mod config;
pub mod export;
pub mod filter;
pub mod input;
pub mod logging;
pub mod model;
pub mod scanner;
pub mod util;
pub mod view;
pub mod viewmodel;
