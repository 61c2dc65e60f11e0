pub mod adapter;
pub mod app;
pub mod controller;
pub mod detail;
pub mod events;
pub mod header;
pub mod input;
pub mod layout;
pub mod list;
pub mod mvi;
pub mod render;
pub mod runtime;
pub mod status_bar;
pub mod terminal_guard;
pub mod theme;
