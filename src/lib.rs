//! # level-tutor
//!
//! Server-rendered demo of a level-adjusted tutor: a chat panel that answers
//! with a placeholder citing the selected textbook, plus side panels for
//! improvement ideas and developer feedback. All state is in memory and
//! scoped to one browser session.

pub mod config;
pub mod routes;
pub mod services;
pub mod state;
pub mod view;
