pub mod app;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod io;
pub mod model;
pub mod ui;

pub use error::{Error, Result};
