//! Due-date estimation domain logic.
//!
//! This module contains the four per-method calculators and the
//! `EstimationService` entry point that validates raw form input, runs the
//! matching calculator, and packages either a result or a field-error map.
//! The UI only handles presentation concerns; every estimation rule lives
//! here.

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use log::{error, info, warn};
use std::collections::BTreeMap;

use crate::domain::date_math;
use crate::domain::models::{FieldError, ValidatedInput};
use crate::domain::validation;
use shared::{
    EmbryoDay, EstimateRequest, EstimateResponse, EstimationConfig, EstimationFormState,
    EstimationMethod, EstimationResult, FieldKey, ScanInfo,
};

/// Days from the LMP-equivalent start of pregnancy to conception
const CONCEPTION_OFFSET_DAYS: i64 = 14;

/// Estimation service that handles all due-date calculation business logic
#[derive(Clone)]
pub struct EstimationService {
    config: EstimationConfig,
}

impl EstimationService {
    pub fn new() -> Self {
        Self {
            config: EstimationConfig::default(),
        }
    }

    pub fn with_config(config: EstimationConfig) -> Self {
        Self { config }
    }

    /// Create the initial form state the UI starts from (and resets to)
    pub fn create_form_state() -> EstimationFormState {
        EstimationFormState {
            selected_method: EstimationMethod::Lmp,
            inputs: EstimateRequest {
                embryo_day: "3".to_string(),
                ..EstimateRequest::default()
            },
        }
    }

    /// Whether every raw field the method needs is present, so the caller
    /// knows to run a calculation rather than clear the previous result
    pub fn has_required_inputs(&self, method: EstimationMethod, request: &EstimateRequest) -> bool {
        match method {
            EstimationMethod::Lmp => !request.lmp_date.trim().is_empty(),
            EstimationMethod::Conception => !request.conception_date.trim().is_empty(),
            EstimationMethod::IvfTransfer => !request.transfer_date.trim().is_empty(),
            EstimationMethod::Ultrasound => {
                !request.ultrasound_date.trim().is_empty()
                    && !request.gestational_weeks.trim().is_empty()
                    && !request.gestational_days.trim().is_empty()
            }
        }
    }

    /// Run one estimation against the local calendar date.
    ///
    /// "Today" is read exactly once, so the result stays internally
    /// consistent even if the clock rolls over mid-call.
    pub fn calculate(&self, method: EstimationMethod, request: &EstimateRequest) -> EstimateResponse {
        let today = Local::now().date_naive();
        self.calculate_at(method, request, today)
    }

    /// Run one estimation against an explicit "today". Callers that need a
    /// pinned or non-local clock use this directly.
    pub fn calculate_at(
        &self,
        method: EstimationMethod,
        request: &EstimateRequest,
        today: NaiveDate,
    ) -> EstimateResponse {
        let input = match validation::validate_request(method, request, &self.config, today) {
            Ok(input) => input,
            Err(errors) => {
                warn!(
                    "Rejected {} input: {} invalid field(s)",
                    method.display_name(),
                    errors.len()
                );
                return EstimateResponse::failure(Self::error_map(errors));
            }
        };

        match self.calculate_for_input(input, today) {
            Ok(result) => {
                info!(
                    "Estimated due date {} via {} ({} days remaining)",
                    result.due_date, result.method_label, result.days_remaining
                );
                EstimateResponse::success(result)
            }
            Err(e) => {
                error!("Calculation failed after validation passed: {:#}", e);
                let mut errors = BTreeMap::new();
                errors.insert(
                    FieldKey::General.as_str().to_string(),
                    FieldError::GeneralCalculationFailure.to_string(),
                );
                EstimateResponse::failure(errors)
            }
        }
    }

    /// Percentage of the nominal term already elapsed, for the progress bar.
    /// Zero when no result exists; clamped to `[0, 100]`.
    pub fn progress_percentage(&self, result: Option<&EstimationResult>) -> f64 {
        let Some(result) = result else {
            return 0.0;
        };
        let term = self.config.term_days as f64;
        let elapsed = term - result.days_remaining as f64;
        (elapsed / term * 100.0).clamp(0.0, 100.0)
    }

    pub fn config(&self) -> &EstimationConfig {
        &self.config
    }

    pub(crate) fn calculate_for_input(
        &self,
        input: ValidatedInput,
        today: NaiveDate,
    ) -> Result<EstimationResult> {
        match input {
            ValidatedInput::Lmp { lmp_date } => self.calculate_lmp(lmp_date, today),
            ValidatedInput::Conception { conception_date } => {
                self.calculate_conception(conception_date, today)
            }
            ValidatedInput::Ivf {
                transfer_date,
                embryo_day,
            } => self.calculate_ivf(transfer_date, embryo_day, today),
            ValidatedInput::Ultrasound {
                scan_date,
                scan_weeks,
                scan_days,
            } => self.calculate_ultrasound(scan_date, scan_weeks, scan_days, today),
        }
    }

    /// LMP: the full 280-day term runs from the period start itself.
    fn calculate_lmp(&self, lmp_date: NaiveDate, today: NaiveDate) -> Result<EstimationResult> {
        let due_date = date_math::add_days(lmp_date, self.config.term_days)
            .ok_or_else(|| anyhow!("due date out of calendar range"))?;
        let gestational_days = date_math::days_between(lmp_date, today);

        Ok(self.build_result(
            EstimationMethod::Lmp,
            "Last Menstrual Period (LMP)".to_string(),
            due_date,
            gestational_days,
            today,
            None,
        ))
    }

    /// Conception: 14 gestational days have already passed at conception, so
    /// the due date sits 266 days out and the age count starts at 14.
    fn calculate_conception(
        &self,
        conception_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<EstimationResult> {
        let due_date =
            date_math::add_days(conception_date, self.config.term_days - CONCEPTION_OFFSET_DAYS)
                .ok_or_else(|| anyhow!("due date out of calendar range"))?;
        let gestational_days =
            date_math::days_between(conception_date, today) + CONCEPTION_OFFSET_DAYS;

        Ok(self.build_result(
            EstimationMethod::Conception,
            "Conception Date".to_string(),
            due_date,
            gestational_days,
            today,
            None,
        ))
    }

    /// IVF: embryo age at transfer shifts the conception offsets by the days
    /// the embryo already developed in the lab.
    fn calculate_ivf(
        &self,
        transfer_date: NaiveDate,
        embryo_day: EmbryoDay,
        today: NaiveDate,
    ) -> Result<EstimationResult> {
        let due_date = date_math::add_days(transfer_date, embryo_day.due_date_offset_days())
            .ok_or_else(|| anyhow!("due date out of calendar range"))?;
        let gestational_days =
            date_math::days_between(transfer_date, today) + embryo_day.gestational_offset_days();

        Ok(self.build_result(
            EstimationMethod::IvfTransfer,
            format!("IVF Transfer ({}-day embryo)", embryo_day.as_str()),
            due_date,
            gestational_days,
            today,
            None,
        ))
    }

    /// Ultrasound: the scan pins gestational age directly, so the due date
    /// anchors on today plus whatever remains of the term. An overdue
    /// pregnancy puts the due date in the past; only the countdown floors
    /// at zero.
    fn calculate_ultrasound(
        &self,
        scan_date: NaiveDate,
        scan_weeks: u32,
        scan_days: u32,
        today: NaiveDate,
    ) -> Result<EstimationResult> {
        let scan_gestational_days = scan_weeks as i64 * 7 + scan_days as i64;
        let gestational_days = scan_gestational_days + date_math::days_between(scan_date, today);
        let remaining_days = self.config.term_days - gestational_days;
        let due_date = date_math::add_days(today, remaining_days)
            .ok_or_else(|| anyhow!("due date out of calendar range"))?;

        Ok(self.build_result(
            EstimationMethod::Ultrasound,
            "Ultrasound Scan".to_string(),
            due_date,
            gestational_days,
            today,
            Some(ScanInfo {
                weeks: scan_weeks,
                days: scan_days,
            }),
        ))
    }

    fn build_result(
        &self,
        method: EstimationMethod,
        method_label: String,
        due_date: NaiveDate,
        gestational_days: i64,
        today: NaiveDate,
        scan_info: Option<ScanInfo>,
    ) -> EstimationResult {
        let gestational_age = date_math::weeks_and_days(gestational_days);
        let trimester = date_math::trimester_of(gestational_age.weeks);
        let days_remaining = date_math::days_between(today, due_date).max(0);

        EstimationResult {
            due_date,
            gestational_age,
            trimester,
            method,
            method_label,
            days_remaining,
            scan_info,
        }
    }

    fn error_map(errors: Vec<(FieldKey, FieldError)>) -> BTreeMap<String, String> {
        errors
            .into_iter()
            .map(|(key, error)| (key.as_str().to_string(), error.to_string()))
            .collect()
    }
}

impl Default for EstimationService {
    fn default() -> Self {
        Self::new()
    }
}
