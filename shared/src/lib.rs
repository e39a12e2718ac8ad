use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The four supported due-date estimation methods
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EstimationMethod {
    /// Date the last menstrual period started (the traditional anchor)
    Lmp,
    /// Known or tracked conception date
    Conception,
    /// IVF embryo transfer date plus embryo age at transfer
    IvfTransfer,
    /// Gestational age measured at an ultrasound scan
    Ultrasound,
}

impl EstimationMethod {
    /// All methods in the order the UI presents them
    pub fn all() -> [EstimationMethod; 4] {
        [
            EstimationMethod::Lmp,
            EstimationMethod::Conception,
            EstimationMethod::IvfTransfer,
            EstimationMethod::Ultrasound,
        ]
    }

    /// Short name for the method picker
    pub fn display_name(&self) -> &'static str {
        match self {
            EstimationMethod::Lmp => "Last Menstrual Period",
            EstimationMethod::Conception => "Conception Date",
            EstimationMethod::IvfTransfer => "IVF Transfer",
            EstimationMethod::Ultrasound => "Ultrasound Scan",
        }
    }

    /// One-line description for the method picker
    pub fn description(&self) -> &'static str {
        match self {
            EstimationMethod::Lmp => "Most common method using your last period date",
            EstimationMethod::Conception => "For tracked ovulation or known conception",
            EstimationMethod::IvfTransfer => "Precise calculation for IVF pregnancies",
            EstimationMethod::Ultrasound => "Based on fetal measurements from scan",
        }
    }
}

/// Embryo age at IVF transfer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EmbryoDay {
    Day3,
    Day5,
}

impl EmbryoDay {
    /// The raw radio-button value this variant is parsed from
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbryoDay::Day3 => "3",
            EmbryoDay::Day5 => "5",
        }
    }

    /// Days from transfer to the estimated due date.
    ///
    /// A 3-day embryo has already developed 3 days before transfer, leaving
    /// 263 days of the 266-day post-conception span; a 5-day embryo leaves 261.
    pub fn due_date_offset_days(&self) -> i64 {
        match self {
            EmbryoDay::Day3 => 263,
            EmbryoDay::Day5 => 261,
        }
    }

    /// Gestational days already accrued on the transfer date (14 days from
    /// LMP-equivalent start to conception, plus embryo age at transfer).
    pub fn gestational_offset_days(&self) -> i64 {
        match self {
            EmbryoDay::Day3 => 17,
            EmbryoDay::Day5 => 19,
        }
    }
}

/// Stable field identifiers used as keys in the validation error map so the
/// caller can route each message to the matching input control
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FieldKey {
    LmpDate,
    ConceptionDate,
    TransferDate,
    EmbryoDay,
    UltrasoundDate,
    GestationalWeeks,
    GestationalDays,
    /// Catch-all for unexpected calculation failures
    General,
}

impl FieldKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::LmpDate => "lmpDate",
            FieldKey::ConceptionDate => "conceptionDate",
            FieldKey::TransferDate => "transferDate",
            FieldKey::EmbryoDay => "embryoDay",
            FieldKey::UltrasoundDate => "ultrasoundDate",
            FieldKey::GestationalWeeks => "gestationalWeeks",
            FieldKey::GestationalDays => "gestationalDays",
            FieldKey::General => "general",
        }
    }
}

/// Raw form values exactly as the UI holds them. All fields are text; the
/// engine parses and validates the ones relevant to the selected method.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EstimateRequest {
    /// First day of the last menstrual period (YYYY-MM-DD)
    pub lmp_date: String,
    /// Conception date (YYYY-MM-DD)
    pub conception_date: String,
    /// Embryo transfer date (YYYY-MM-DD)
    pub transfer_date: String,
    /// Embryo age at transfer, "3" or "5"
    pub embryo_day: String,
    /// Ultrasound scan date (YYYY-MM-DD)
    pub ultrasound_date: String,
    /// Gestational weeks reported at the scan
    pub gestational_weeks: String,
    /// Additional gestational days reported at the scan
    pub gestational_days: String,
}

/// Gestational age as completed weeks plus extra days.
///
/// `days` is always in `[0, 6]`, and `weeks * 7 + days` equals the total
/// gestational day count the age was derived from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GestationalAge {
    pub weeks: u32,
    pub days: u32,
}

impl GestationalAge {
    pub fn total_days(&self) -> i64 {
        self.weeks as i64 * 7 + self.days as i64
    }
}

/// One of the three phases of gestation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Trimester {
    First,
    Second,
    Third,
}

impl Trimester {
    pub fn label(&self) -> &'static str {
        match self {
            Trimester::First => "1st Trimester",
            Trimester::Second => "2nd Trimester",
            Trimester::Third => "3rd Trimester",
        }
    }

    /// Week span shown alongside the trimester in the progress panel
    pub fn week_range_label(&self) -> &'static str {
        match self {
            Trimester::First => "Weeks 1-12",
            Trimester::Second => "Weeks 13-26",
            Trimester::Third => "Weeks 27-40",
        }
    }
}

/// Gestational age reported at scan time, retained on ultrasound results
/// for display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanInfo {
    pub weeks: u32,
    pub days: u32,
}

impl ScanInfo {
    pub fn display(&self) -> String {
        format!("Scan at {} weeks, {} days", self.weeks, self.days)
    }
}

/// A successful estimation. Produced only when every relevant field
/// validated; the caller discards and replaces it on the next input change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimationResult {
    /// Estimated date of delivery
    pub due_date: NaiveDate,
    /// Gestational age as of the day the calculation ran
    pub gestational_age: GestationalAge,
    pub trimester: Trimester,
    /// Method used, retained for display and audit
    pub method: EstimationMethod,
    /// Human-readable method label, e.g. "IVF Transfer (5-day embryo)"
    pub method_label: String,
    /// Days from today to the due date, floored at zero when overdue
    pub days_remaining: i64,
    /// Scan-time gestational age (Ultrasound method only)
    pub scan_info: Option<ScanInfo>,
}

/// Outcome of one estimation call: either a result with no errors, or no
/// result and a non-empty map of field-level messages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimateResponse {
    pub is_valid: bool,
    pub result: Option<EstimationResult>,
    /// Message per invalid field, keyed by the stable `FieldKey` strings
    pub errors: BTreeMap<String, String>,
}

impl EstimateResponse {
    pub fn success(result: EstimationResult) -> Self {
        Self {
            is_valid: true,
            result: Some(result),
            errors: BTreeMap::new(),
        }
    }

    pub fn failure(errors: BTreeMap<String, String>) -> Self {
        Self {
            is_valid: false,
            result: None,
            errors,
        }
    }
}

/// Thresholds for estimation and validation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimationConfig {
    /// Nominal pregnancy term in days (40 weeks)
    pub term_days: i64,
    /// How far back an LMP date may plausibly lie
    pub lmp_max_days_ago: i64,
    /// How far back conception, transfer, and scan dates may lie
    pub default_max_days_ago: i64,
    /// Lowest gestational week a scan may report
    pub min_scan_weeks: u32,
    /// Highest gestational week a scan may report
    pub max_scan_weeks: u32,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            term_days: 280,
            lmp_max_days_ago: 300,
            default_max_days_ago: 280,
            min_scan_weeks: 4,
            max_scan_weeks: 42,
        }
    }
}

/// State for the estimation input form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimationFormState {
    pub selected_method: EstimationMethod,
    pub inputs: EstimateRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keys_are_stable() {
        assert_eq!(FieldKey::LmpDate.as_str(), "lmpDate");
        assert_eq!(FieldKey::ConceptionDate.as_str(), "conceptionDate");
        assert_eq!(FieldKey::TransferDate.as_str(), "transferDate");
        assert_eq!(FieldKey::EmbryoDay.as_str(), "embryoDay");
        assert_eq!(FieldKey::UltrasoundDate.as_str(), "ultrasoundDate");
        assert_eq!(FieldKey::GestationalWeeks.as_str(), "gestationalWeeks");
        assert_eq!(FieldKey::GestationalDays.as_str(), "gestationalDays");
        assert_eq!(FieldKey::General.as_str(), "general");
    }

    #[test]
    fn test_embryo_day_offsets_differ_by_two() {
        assert_eq!(
            EmbryoDay::Day3.due_date_offset_days() - EmbryoDay::Day5.due_date_offset_days(),
            2
        );
        assert_eq!(
            EmbryoDay::Day5.gestational_offset_days() - EmbryoDay::Day3.gestational_offset_days(),
            2
        );
    }

    #[test]
    fn test_trimester_labels() {
        assert_eq!(Trimester::First.label(), "1st Trimester");
        assert_eq!(Trimester::Second.label(), "2nd Trimester");
        assert_eq!(Trimester::Third.label(), "3rd Trimester");
        assert_eq!(Trimester::Second.week_range_label(), "Weeks 13-26");
    }

    #[test]
    fn test_scan_info_display() {
        let info = ScanInfo { weeks: 12, days: 3 };
        assert_eq!(info.display(), "Scan at 12 weeks, 3 days");
    }

    #[test]
    fn test_gestational_age_total_days() {
        let age = GestationalAge { weeks: 13, days: 4 };
        assert_eq!(age.total_days(), 95);
    }

    #[test]
    fn test_due_date_serializes_as_iso_date() {
        let result = EstimationResult {
            due_date: NaiveDate::from_ymd_opt(2024, 10, 7).unwrap(),
            gestational_age: GestationalAge { weeks: 13, days: 0 },
            trimester: Trimester::Second,
            method: EstimationMethod::Lmp,
            method_label: "Last Menstrual Period (LMP)".to_string(),
            days_remaining: 189,
            scan_info: None,
        };
        let json = serde_json::to_value(&result).expect("Failed to serialize result");
        assert_eq!(json["due_date"], "2024-10-07");
    }
}
