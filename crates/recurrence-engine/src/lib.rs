//! Bloomlog Recurrence Engine
//!
//! Computes *what should exist* for recurring task series:
//! - **Generate:** Expand a recurring task into a bounded series
//! - **Extend:** Idempotent reconciliation that tops up every series
//! - **Split:** "This occurrence" vs. "this and all future" edit/delete
//!
//! This crate is pure computation: no I/O, no storage access.
//! All inputs are data (item slices plus an explicit `today`); all
//! outputs are data for the caller to persist.

pub mod extend;
pub mod series;
pub mod split;

pub use extend::{extend_all, Extension};
pub use series::{generate, horizon, Series, MAX_GENERATED};
pub use split::{split_delete, split_update, EditScope, Revision};
