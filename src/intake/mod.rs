//! Intake Module
//!
//! Form answers, their lookup tables, and the encoder that turns them into
//! the fixed-order feature record the model expects.

mod encoder;
mod form;
pub mod lookup;
mod record;

pub use encoder::{calculate_bmi, encode, previous_birth_flag};
pub use form::IntakeForm;
pub use lookup::{education_to_code, month_to_number, race_to_code, sex_to_binary, yes_no_to_binary};
pub use record::{ClinicalFlags, IntakeRecord, LastBirthInterval, FIELD_NAMES};
