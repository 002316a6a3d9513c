//! Victory points: clamped writes, audit history, win and leader queries.

mod ledger;

pub use ledger::{Leader, Standing, VictoryLedger, VpChange, VpSummary, WinCheck};
