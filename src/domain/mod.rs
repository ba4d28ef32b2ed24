//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, money, errors)
//! - `inventory` - Components, suppliers, and dataset validation
//! - `risk` - Risk scoring, ranking, and executive summary
//! - `recommendation` - Mitigation advice, prompting, and response recovery
//! - `roi` - Return-on-investment business case

pub mod foundation;
pub mod inventory;
pub mod recommendation;
pub mod risk;
pub mod roi;
