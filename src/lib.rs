//! Tamper-evident hash chain over fixed-size blocks of an input file.
//!
//! Pipeline: read → [`blocker::split`] → [`chain::Chain::build`] → [`chain::Chain::verify`].

pub mod block;
pub mod blocker;
pub mod chain;
pub mod config;
pub mod driver;
pub mod error;
pub mod hasher;
pub mod logging;
