//! Batch reconciliation over a contact-id range.
//!
//! The [`reconciler::Reconciler`] drives fetch → normalize → diff →
//! apply-or-simulate → log for each record; [`runner::run_range`] validates
//! the request, chunks the range, and merges the per-chunk results. Storage
//! is behind the [`store::ContactStore`] seam.

#![deny(unsafe_code)]

pub mod change_log;
pub mod diff;
pub mod reconciler;
pub mod runner;
pub mod store;

pub use crate::change_log::{Category, ChangeLog};
pub use crate::diff::{FieldDiff, diff_fields};
pub use crate::reconciler::Reconciler;
pub use crate::runner::{RunnerParams, run_range};
pub use crate::store::{ContactStore, MemoryStore};
