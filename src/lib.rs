//! Spendable
//!
//! Spendable finds the fewest fixed top-ups after which a balance can be spent exactly on a menu
//! of items, and lists the item combinations that do it.

pub mod config;
pub mod fixtures;
pub mod logging;
pub mod menu;
pub mod prelude;
pub mod report;
pub mod solution;
pub mod solvers;
pub mod topup;
pub mod units;
