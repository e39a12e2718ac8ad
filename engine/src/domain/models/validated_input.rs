use chrono::NaiveDate;
use shared::EmbryoDay;

/// Validated, typed input for one estimation run.
///
/// Each variant carries exactly the fields its calculator needs, so a
/// calculator can never be handed the field shape of a different method.
/// Values only enter here through `validation::validate_request`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidatedInput {
    Lmp {
        lmp_date: NaiveDate,
    },
    Conception {
        conception_date: NaiveDate,
    },
    Ivf {
        transfer_date: NaiveDate,
        embryo_day: EmbryoDay,
    },
    Ultrasound {
        scan_date: NaiveDate,
        scan_weeks: u32,
        scan_days: u32,
    },
}
