//! Sky-Guard - Aviation MRO inventory risk engine
//!
//! Scores inventory components for supply-chain risk, drafts mitigation
//! recommendations for the riskiest ones through a reasoning service, and
//! estimates the return on acting on them.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
