//! Due-date estimation engine.
//!
//! A pure, synchronous library that turns raw form input into a due-date
//! estimate (due date, gestational age, trimester, days remaining) or a map
//! of field-level validation errors. The UI layer owns presentation and
//! decides when to call into the engine; nothing here performs I/O.

pub mod domain;

pub use domain::date_math;
pub use domain::estimation_service::EstimationService;
pub use domain::models::FieldError;
pub use domain::validation;
