//! # Domain Module
//!
//! Contains all business logic for due-date estimation.
//!
//! This module encapsulates the core rules that convert a user-supplied
//! reference date (and, for the ultrasound method, an observed gestational
//! age) into a due date, current gestational age, trimester, and
//! remaining-days countdown. It operates independently of any UI framework:
//! the caller supplies raw field values and renders whatever comes back.
//!
//! ## Module Organization
//!
//! - **date_math**: Calendar-day arithmetic primitives (offsets, differences,
//!   week/day splits, trimester classification)
//! - **validation**: Field-level input validation and parsing into typed,
//!   per-method input shapes
//! - **estimation_service**: The four per-method calculators and the
//!   `EstimationService` entry point
//! - **models**: Internal domain types (error taxonomy, validated input)
//!
//! ## Business Rules
//!
//! - Every method resolves to the same 280-day (40-week) gestational span;
//!   the per-method offsets only shift where counting starts
//! - A reference date may not lie in the future, and may not lie further in
//!   the past than the maximum plausible pregnancy duration
//! - A calculation either produces a result or a non-empty set of field
//!   errors, never both
//! - "Today" is read once per calculation, so a single invocation stays
//!   internally consistent

pub mod date_math;
pub mod estimation_service;
pub mod models;
pub mod validation;

pub use estimation_service::*;
