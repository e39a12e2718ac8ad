//! Field-level validation for due-date estimation input.
//!
//! Raw form values come in as text. Validation parses the fields relevant to
//! the selected method, collects every applicable error keyed by its stable
//! field identifier, and on success hands back a typed `ValidatedInput` so
//! the calculators downstream never see unparsed strings.

use chrono::NaiveDate;
use shared::{EmbryoDay, EstimateRequest, EstimationConfig, EstimationMethod, FieldKey};

use crate::domain::date_math;
use crate::domain::models::{FieldError, ValidatedInput};

/// Field labels as they appear in user-facing messages
pub const LMP_DATE_LABEL: &str = "Last menstrual period date";
pub const CONCEPTION_DATE_LABEL: &str = "Conception date";
pub const TRANSFER_DATE_LABEL: &str = "Transfer date";
pub const ULTRASOUND_DATE_LABEL: &str = "Ultrasound date";

/// Validate a single date field against "today".
///
/// Checks run in order: presence, ISO-8601 (`YYYY-MM-DD`) calendar validity,
/// not in the future (a date equal to `today` passes — the cutoff is the end
/// of the current day), and not further back than `max_days_ago` whole days.
pub fn validate_date(
    raw: &str,
    label: &str,
    max_days_ago: i64,
    today: NaiveDate,
) -> Result<NaiveDate, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::MissingField(label.to_string()));
    }

    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| FieldError::InvalidDate(label.to_lowercase()))?;

    if date > today {
        return Err(FieldError::FutureDate(label.to_string()));
    }

    if date_math::days_between(date, today) > max_days_ago {
        return Err(FieldError::TooOld {
            label: label.to_string(),
            max_days_ago,
        });
    }

    Ok(date)
}

/// Validate the gestational weeks reported at an ultrasound scan.
///
/// Absent and non-numeric input fail with the same range message the UI
/// shows for out-of-range values.
pub fn validate_scan_weeks(raw: &str, min: u32, max: u32) -> Result<u32, FieldError> {
    let message = || FieldError::OutOfRange(format!("Please enter weeks between {} and {}", min, max));
    let weeks = raw.trim().parse::<u32>().map_err(|_| message())?;
    if weeks < min || weeks > max {
        return Err(message());
    }
    Ok(weeks)
}

/// Validate the additional gestational days reported at an ultrasound scan.
pub fn validate_scan_days(raw: &str) -> Result<u32, FieldError> {
    let message = || FieldError::OutOfRange("Please enter days between 0 and 6".to_string());
    let days = raw.trim().parse::<u32>().map_err(|_| message())?;
    if days > 6 {
        return Err(message());
    }
    Ok(days)
}

/// Parse the embryo-day radio value ("3" or "5").
pub fn parse_embryo_day(raw: &str) -> Result<EmbryoDay, FieldError> {
    match raw.trim() {
        "3" => Ok(EmbryoDay::Day3),
        "5" => Ok(EmbryoDay::Day5),
        _ => Err(FieldError::OutOfRange(
            "Please select a 3-day or 5-day embryo".to_string(),
        )),
    }
}

/// Validate every field the selected method needs.
///
/// Errors for unrelated fields are independent: an invalid scan date does
/// not suppress a simultaneous out-of-range weeks value. All applicable
/// errors come back in one pass.
pub fn validate_request(
    method: EstimationMethod,
    request: &EstimateRequest,
    config: &EstimationConfig,
    today: NaiveDate,
) -> Result<ValidatedInput, Vec<(FieldKey, FieldError)>> {
    let mut errors: Vec<(FieldKey, FieldError)> = Vec::new();

    let input = match method {
        EstimationMethod::Lmp => {
            match validate_date(&request.lmp_date, LMP_DATE_LABEL, config.lmp_max_days_ago, today) {
                Ok(lmp_date) => Some(ValidatedInput::Lmp { lmp_date }),
                Err(e) => {
                    errors.push((FieldKey::LmpDate, e));
                    None
                }
            }
        }
        EstimationMethod::Conception => {
            match validate_date(
                &request.conception_date,
                CONCEPTION_DATE_LABEL,
                config.default_max_days_ago,
                today,
            ) {
                Ok(conception_date) => Some(ValidatedInput::Conception { conception_date }),
                Err(e) => {
                    errors.push((FieldKey::ConceptionDate, e));
                    None
                }
            }
        }
        EstimationMethod::IvfTransfer => {
            let transfer_date = validate_date(
                &request.transfer_date,
                TRANSFER_DATE_LABEL,
                config.default_max_days_ago,
                today,
            )
            .map_err(|e| errors.push((FieldKey::TransferDate, e)))
            .ok();
            let embryo_day = parse_embryo_day(&request.embryo_day)
                .map_err(|e| errors.push((FieldKey::EmbryoDay, e)))
                .ok();

            match (transfer_date, embryo_day) {
                (Some(transfer_date), Some(embryo_day)) => Some(ValidatedInput::Ivf {
                    transfer_date,
                    embryo_day,
                }),
                _ => None,
            }
        }
        EstimationMethod::Ultrasound => {
            let scan_date = validate_date(
                &request.ultrasound_date,
                ULTRASOUND_DATE_LABEL,
                config.default_max_days_ago,
                today,
            )
            .map_err(|e| errors.push((FieldKey::UltrasoundDate, e)))
            .ok();
            let scan_weeks = validate_scan_weeks(
                &request.gestational_weeks,
                config.min_scan_weeks,
                config.max_scan_weeks,
            )
            .map_err(|e| errors.push((FieldKey::GestationalWeeks, e)))
            .ok();
            let scan_days = validate_scan_days(&request.gestational_days)
                .map_err(|e| errors.push((FieldKey::GestationalDays, e)))
                .ok();

            match (scan_date, scan_weeks, scan_days) {
                (Some(scan_date), Some(scan_weeks), Some(scan_days)) => {
                    Some(ValidatedInput::Ultrasound {
                        scan_date,
                        scan_weeks,
                        scan_days,
                    })
                }
                _ => None,
            }
        }
    };

    match input {
        Some(input) if errors.is_empty() => Ok(input),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 4, 1)
    }

    #[test]
    fn test_validate_date_accepts_today() {
        let result = validate_date("2024-04-01", LMP_DATE_LABEL, 300, today());
        assert_eq!(result, Ok(date(2024, 4, 1)));
    }

    #[test]
    fn test_validate_date_rejects_empty() {
        let result = validate_date("   ", LMP_DATE_LABEL, 300, today());
        assert_eq!(
            result,
            Err(FieldError::MissingField("Last menstrual period date".to_string()))
        );
    }

    #[test]
    fn test_validate_date_rejects_garbage_and_impossible_dates() {
        let result = validate_date("not-a-date", CONCEPTION_DATE_LABEL, 280, today());
        assert_eq!(
            result,
            Err(FieldError::InvalidDate("conception date".to_string()))
        );

        // 2023 is not a leap year
        let result = validate_date("2023-02-29", CONCEPTION_DATE_LABEL, 280, today());
        assert!(matches!(result, Err(FieldError::InvalidDate(_))));
    }

    #[test]
    fn test_validate_date_rejects_tomorrow() {
        let result = validate_date("2024-04-02", TRANSFER_DATE_LABEL, 280, today());
        assert_eq!(
            result,
            Err(FieldError::FutureDate("Transfer date".to_string()))
        );
    }

    #[test]
    fn test_validate_date_enforces_max_days_ago() {
        // 300 days before 2024-04-01 is 2023-06-06; one day earlier is too old
        let result = validate_date("2023-06-06", LMP_DATE_LABEL, 300, today());
        assert_eq!(result, Ok(date(2023, 6, 6)));

        let result = validate_date("2023-06-05", LMP_DATE_LABEL, 300, today());
        assert_eq!(
            result,
            Err(FieldError::TooOld {
                label: "Last menstrual period date".to_string(),
                max_days_ago: 300,
            })
        );
    }

    #[test]
    fn test_validate_scan_weeks_range() {
        assert_eq!(validate_scan_weeks("12", 4, 42), Ok(12));
        assert_eq!(validate_scan_weeks("4", 4, 42), Ok(4));
        assert_eq!(validate_scan_weeks("42", 4, 42), Ok(42));
        assert!(validate_scan_weeks("3", 4, 42).is_err());
        assert!(validate_scan_weeks("43", 4, 42).is_err());
        assert!(validate_scan_weeks("", 4, 42).is_err());
        assert!(validate_scan_weeks("twelve", 4, 42).is_err());
    }

    #[test]
    fn test_validate_scan_days_range() {
        assert_eq!(validate_scan_days("0"), Ok(0));
        assert_eq!(validate_scan_days("6"), Ok(6));
        assert!(validate_scan_days("7").is_err());
        assert!(validate_scan_days("-1").is_err());
        assert!(validate_scan_days("").is_err());
    }

    #[test]
    fn test_parse_embryo_day() {
        assert_eq!(parse_embryo_day("3"), Ok(EmbryoDay::Day3));
        assert_eq!(parse_embryo_day("5"), Ok(EmbryoDay::Day5));
        assert!(parse_embryo_day("4").is_err());
        assert!(parse_embryo_day("").is_err());
    }

    #[test]
    fn test_validate_request_ultrasound_accumulates_all_errors() {
        let request = EstimateRequest {
            ultrasound_date: "2024-05-01".to_string(), // future
            gestational_weeks: "50".to_string(),       // out of range
            gestational_days: "9".to_string(),         // out of range
            ..Default::default()
        };
        let config = EstimationConfig::default();

        let errors = validate_request(EstimationMethod::Ultrasound, &request, &config, today())
            .unwrap_err();

        let keys: Vec<FieldKey> = errors.iter().map(|(key, _)| *key).collect();
        assert_eq!(
            keys,
            vec![
                FieldKey::UltrasoundDate,
                FieldKey::GestationalWeeks,
                FieldKey::GestationalDays,
            ]
        );
    }

    #[test]
    fn test_validate_request_lmp_success() {
        let request = EstimateRequest {
            lmp_date: "2024-01-01".to_string(),
            ..Default::default()
        };
        let config = EstimationConfig::default();

        let input = validate_request(EstimationMethod::Lmp, &request, &config, today()).unwrap();
        assert_eq!(
            input,
            ValidatedInput::Lmp {
                lmp_date: date(2024, 1, 1)
            }
        );
    }

    #[test]
    fn test_validate_request_missing_field_yields_single_error() {
        let request = EstimateRequest::default();
        let config = EstimationConfig::default();

        let errors =
            validate_request(EstimationMethod::Conception, &request, &config, today()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, FieldKey::ConceptionDate);
        assert!(matches!(errors[0].1, FieldError::MissingField(_)));
    }
}
