//! Multi-step booking form state machine.
//!
//! This is the controller a form UI drives: it owns the in-progress draft,
//! the active step, per-field errors, and submission status, and it gates
//! step transitions on the validation aggregator. It is sans-IO — when the
//! final step validates, it hands the serialized draft back to the caller,
//! who performs the actual POST and reports the outcome.

use crate::models::BookingPayload;
use crate::validation::{self, FieldErrors, Rule};

/// Fixed service catalog the service-and-schedule screen offers.
pub const SERVICE_TYPES: &[&str] = &[
    "Oil Change",
    "Brake Service",
    "Tire Rotation",
    "Wheel Alignment",
    "Engine Diagnostic",
    "Battery Replacement",
    "A/C Service",
    "Transmission Service",
    "General Inspection",
];

/// Fixed appointment slots the schedule screen offers.
pub const TIME_SLOTS: &[&str] = &[
    "09:00 AM", "10:00 AM", "11:00 AM", "01:00 PM", "02:00 PM", "03:00 PM", "04:00 PM",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    CustomerInfo,
    VehicleInfo,
    ServiceSchedule,
}

impl Step {
    fn next(self) -> Option<Step> {
        match self {
            Step::CustomerInfo => Some(Step::VehicleInfo),
            Step::VehicleInfo => Some(Step::ServiceSchedule),
            Step::ServiceSchedule => None,
        }
    }

    fn prev(self) -> Option<Step> {
        match self {
            Step::CustomerInfo => None,
            Step::VehicleInfo => Some(Step::CustomerInfo),
            Step::ServiceSchedule => Some(Step::VehicleInfo),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Make,
    Model,
    Year,
    LicensePlate,
    ServiceType,
    Date,
    Time,
    Notes,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Make => "make",
            Field::Model => "model",
            Field::Year => "year",
            Field::LicensePlate => "licensePlate",
            Field::ServiceType => "serviceType",
            Field::Date => "date",
            Field::Time => "time",
            Field::Notes => "notes",
        }
    }
}

/// Outcome of an advance attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Current step has outstanding errors (or the form is mid-submit).
    Stayed,
    /// Moved forward to the given step.
    Moved(Step),
    /// Final step validated; the caller should POST this payload and report
    /// back via `submit_succeeded` / `submit_failed`.
    Submitting(BookingPayload),
}

#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    draft: BookingPayload,
    step: Step,
    errors: FieldErrors,
    submitting: bool,
    submitted: bool,
    submit_error: Option<String>,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &BookingPayload {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Write one draft field. A recorded error for that field is cleared
    /// immediately; the new value is not re-validated until the next advance.
    pub fn update_field(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::FirstName => &mut self.draft.first_name,
            Field::LastName => &mut self.draft.last_name,
            Field::Email => &mut self.draft.email,
            Field::Phone => &mut self.draft.phone,
            Field::Make => &mut self.draft.make,
            Field::Model => &mut self.draft.model,
            Field::Year => &mut self.draft.year,
            Field::LicensePlate => &mut self.draft.license_plate,
            Field::ServiceType => &mut self.draft.service_type,
            Field::Date => &mut self.draft.date,
            Field::Time => &mut self.draft.time,
            Field::Notes => {
                self.draft.notes = Some(value.to_string());
                self.errors.remove(Field::Notes.name());
                return;
            }
        };
        *slot = value.to_string();
        self.errors.remove(field.name());
    }

    /// Validate the current step; move forward when clean, or surface the
    /// error mapping and stay. On the last step a clean draft flips the form
    /// into submitting and yields the payload.
    pub fn advance(&mut self) -> Advance {
        if self.submitting || self.submitted {
            return Advance::Stayed;
        }

        let fields = step_fields(&self.draft, self.step);
        let step_errors = validation::collect(fields.iter().map(|&(n, v, r)| (n, v, r)));

        // Replace only this step's entries; errors retained from other steps
        // stay recorded (they are shown again when their step is active).
        for (name, _, _) in &fields {
            self.errors.remove(*name);
        }
        let clean = step_errors.is_empty();
        self.errors.extend(step_errors);

        if !clean {
            return Advance::Stayed;
        }

        match self.step.next() {
            Some(next) => {
                self.step = next;
                Advance::Moved(next)
            }
            None => {
                self.submitting = true;
                self.submit_error = None;
                Advance::Submitting(self.draft.clone())
            }
        }
    }

    /// Move to the previous step without validating. Errors on the step
    /// being left are retained but not shown until it is revisited.
    pub fn back(&mut self) {
        if self.submitting || self.submitted {
            return;
        }
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
    }

    pub fn submit_succeeded(&mut self) {
        self.submitting = false;
        self.submitted = true;
        self.submit_error = None;
    }

    /// Stay on the final step with a single top-level message; the draft is
    /// untouched so the customer can retry.
    pub fn submit_failed(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.submit_error = Some(message.into());
    }

    /// Clear the draft and return to the first step. Only reachable from the
    /// submitted state.
    pub fn reset(&mut self) {
        if self.submitted {
            *self = Self::default();
        }
    }
}

fn step_fields(draft: &BookingPayload, step: Step) -> Vec<(&'static str, &str, Rule)> {
    match step {
        Step::CustomerInfo => vec![
            ("firstName", draft.first_name.as_str(), Rule::Name("First name")),
            ("lastName", draft.last_name.as_str(), Rule::Name("Last name")),
            ("email", draft.email.as_str(), Rule::Email),
            ("phone", draft.phone.as_str(), Rule::Phone),
        ],
        Step::VehicleInfo => vec![
            ("make", draft.make.as_str(), Rule::Required("Make")),
            ("model", draft.model.as_str(), Rule::Required("Model")),
            ("year", draft.year.as_str(), Rule::Year),
            ("licensePlate", draft.license_plate.as_str(), Rule::LicensePlate),
        ],
        Step::ServiceSchedule => vec![
            ("serviceType", draft.service_type.as_str(), Rule::Required("Service type")),
            ("date", draft.date.as_str(), Rule::Date),
            ("time", draft.time.as_str(), Rule::Required("Time")),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_customer(form: &mut BookingForm) {
        form.update_field(Field::FirstName, "John");
        form.update_field(Field::LastName, "Doe");
        form.update_field(Field::Email, "john@ex.com");
        form.update_field(Field::Phone, "555-0123-4");
    }

    fn fill_vehicle(form: &mut BookingForm) {
        form.update_field(Field::Make, "Toyota");
        form.update_field(Field::Model, "Corolla");
        form.update_field(Field::Year, "2015");
        form.update_field(Field::LicensePlate, "AB-123");
    }

    fn fill_service(form: &mut BookingForm) {
        form.update_field(Field::ServiceType, SERVICE_TYPES[0]);
        form.update_field(Field::Date, "2099-01-01");
        form.update_field(Field::Time, TIME_SLOTS[0]);
    }

    #[test]
    fn test_empty_step_blocks_advance() {
        let mut form = BookingForm::new();
        assert_eq!(form.advance(), Advance::Stayed);
        assert_eq!(form.step(), Step::CustomerInfo);
        assert_eq!(
            form.errors().get("firstName").map(String::as_str),
            Some("First name is required")
        );
        assert!(form.errors().contains_key("email"));
        assert!(form.errors().contains_key("phone"));
    }

    #[test]
    fn test_valid_step_moves_forward() {
        let mut form = BookingForm::new();
        fill_customer(&mut form);
        assert_eq!(form.advance(), Advance::Moved(Step::VehicleInfo));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_edit_clears_error_immediately() {
        let mut form = BookingForm::new();
        form.advance();
        assert!(form.errors().contains_key("firstName"));

        // A single keystroke clears the error, even to a still-invalid value.
        form.update_field(Field::FirstName, "J");
        assert!(!form.errors().contains_key("firstName"));
        // Other errors remain untouched.
        assert!(form.errors().contains_key("lastName"));
    }

    #[test]
    fn test_back_skips_validation_and_retains_errors() {
        let mut form = BookingForm::new();
        fill_customer(&mut form);
        form.advance();
        form.advance(); // vehicle step fails
        assert!(form.errors().contains_key("make"));

        form.back();
        assert_eq!(form.step(), Step::CustomerInfo);
        // Errors from the step we left are retained.
        assert!(form.errors().contains_key("make"));

        form.back();
        // Already on the first step.
        assert_eq!(form.step(), Step::CustomerInfo);
    }

    #[test]
    fn test_full_walk_yields_payload() {
        let mut form = BookingForm::new();
        fill_customer(&mut form);
        assert_eq!(form.advance(), Advance::Moved(Step::VehicleInfo));
        fill_vehicle(&mut form);
        assert_eq!(form.advance(), Advance::Moved(Step::ServiceSchedule));
        fill_service(&mut form);

        match form.advance() {
            Advance::Submitting(payload) => {
                assert_eq!(payload.first_name, "John");
                assert_eq!(payload.service_type, "Oil Change");
            }
            other => panic!("expected Submitting, got {other:?}"),
        }
        assert!(form.is_submitting());

        // No double-submit while in flight.
        assert_eq!(form.advance(), Advance::Stayed);
    }

    #[test]
    fn test_submit_failure_keeps_draft_for_retry() {
        let mut form = BookingForm::new();
        fill_customer(&mut form);
        form.advance();
        fill_vehicle(&mut form);
        form.advance();
        fill_service(&mut form);
        form.advance();

        form.submit_failed("Failed to create booking");
        assert!(!form.is_submitting());
        assert!(!form.is_submitted());
        assert_eq!(form.submit_error(), Some("Failed to create booking"));
        assert_eq!(form.draft().first_name, "John");

        // Retry succeeds.
        assert!(matches!(form.advance(), Advance::Submitting(_)));
        form.submit_succeeded();
        assert!(form.is_submitted());
        assert_eq!(form.submit_error(), None);
    }

    #[test]
    fn test_reset_only_from_submitted() {
        let mut form = BookingForm::new();
        fill_customer(&mut form);

        // Not submitted yet: reset is a no-op.
        form.reset();
        assert_eq!(form.draft().first_name, "John");

        form.advance();
        fill_vehicle(&mut form);
        form.advance();
        fill_service(&mut form);
        form.advance();
        form.submit_succeeded();

        form.reset();
        assert_eq!(form.step(), Step::CustomerInfo);
        assert_eq!(form.draft().first_name, "");
        assert!(form.errors().is_empty());
        assert!(!form.is_submitted());
    }

    #[test]
    fn test_advance_revalidates_edited_field() {
        let mut form = BookingForm::new();
        fill_customer(&mut form);
        form.update_field(Field::Email, "not-an-email");
        assert_eq!(form.advance(), Advance::Stayed);
        assert_eq!(
            form.errors().get("email").map(String::as_str),
            Some("Please enter a valid email address")
        );

        form.update_field(Field::Email, "john@ex.com");
        assert_eq!(form.advance(), Advance::Moved(Step::VehicleInfo));
    }
}
