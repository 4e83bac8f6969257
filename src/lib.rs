#![forbid(unsafe_code)]
//! dirviz — a directory visualizer: a collapsible, color-coded tree of a
//! directory with clean screenshot export.

pub mod app;
pub mod classify;
pub mod cli;
pub mod controller;
pub mod event_loop;
pub mod export;
pub mod logging;
pub mod picker;
pub mod render;
pub mod terminal;
pub mod tree;
pub mod ui;
