#![forbid(unsafe_code)]

//! Tile-puzzle game for the terminal.
//!
//! The library half holds everything that does not need a real terminal so
//! the headless end-to-end tests can drive the same screens the binary runs.

pub mod app;
pub mod art;
pub mod cli;
pub mod components;
pub mod config;
pub mod screens;
pub mod terminal;
