//! Shared test harness modules for the Afterglow CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod helpers;
mod quality_unit;
mod score_unit;
