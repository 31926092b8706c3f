//! Utility helpers shared by the library and the command-line tool

pub mod logger;

pub use logger::init_logging;
