#![forbid(unsafe_code)]

//! Core: geometry and canonical input events.

pub mod event;
pub mod geometry;
