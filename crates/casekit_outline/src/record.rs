//! Record formatting and the date source stamped into each record.

use chrono::{Local, NaiveDate};

use crate::conf::C_DATE_FORMAT;
use crate::spec::{SpecCaseConstants, SpecCaseFields, SpecTestCase};

/// Source of the "today" date written into records.
pub trait CaseClock {
    /// Current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl CaseClock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl CaseClock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Combine parsed fields with constant metadata into one record.
pub fn format_test_case(
    fields: SpecCaseFields,
    constants: &SpecCaseConstants,
    clock: &dyn CaseClock,
) -> SpecTestCase {
    SpecTestCase {
        import_path: fields.import_path,
        sub_system: constants.sub_system.clone(),
        name: fields.name,
        description: String::new(),
        steps: fields.steps,
        expected_result: fields.expected_result,
        direction: fields.direction.label().to_string(),
        level: fields.level,
        is_trans: constants.is_trans.clone(),
        um_code: constants.um_code.clone(),
        date: clock.today().format(C_DATE_FORMAT).to_string(),
        significance: constants.significance.clone(),
    }
}
