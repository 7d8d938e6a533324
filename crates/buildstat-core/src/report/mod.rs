//! Report assembly.
//!
//! Turns the current snapshot (and, when one exists, the previous snapshot)
//! into an immutable, renderer-agnostic [`Report`]: an ordered list of
//! summary and listing sections.
//!
//! ## Section order
//!
//! summary → current modules → added modules → removed modules →
//! current assets → added assets → removed assets
//!
//! Added/removed sections only appear when a previous snapshot was given.
//! A first build and a diffed build are distinct report shapes, even though
//! diffing against nothing would classify every artifact as added.

pub mod assemble;
pub mod model;

pub use assemble::{assemble, assemble_with, labels, AssembleOptions, DEFAULT_TITLE};
pub use model::{FieldGroup, LabeledField, ListingKind, ListingSection, Report, ReportSection, SummarySection};
