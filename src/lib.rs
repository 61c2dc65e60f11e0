pub mod catalog;
pub mod cli;
pub mod config;
pub mod logging;
pub mod paging;
pub mod ui;
