//! Comanda — ordering core for a steakhouse point of sale.
//!
//! Deterministic cart identity (selection-normalized merge keys), integer
//! pricing, quota validation, kitchen ticket rendering, and a spreadsheet
//! backend boundary with a local JSONL order journal.

pub mod backend;
pub mod cli;
pub mod core;
pub mod journal;
pub mod menu;
pub mod receipt;
