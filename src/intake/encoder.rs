//! Feature Encoder
//!
//! Maps a validated form submission onto the Intake Record through fixed
//! lookups and arithmetic. Deterministic; the only failures are a name
//! missing from a lookup table and a non-positive height.

use tracing::error;

use super::form::IntakeForm;
use super::lookup::{education_to_code, month_to_number, race_to_code, sex_to_binary, yes_no_to_binary};
use super::record::{ClinicalFlags, IntakeRecord, LastBirthInterval};
use crate::error::AssessmentError;

/// Body-mass index from imperial units. `None` when height is not positive.
pub fn calculate_bmi(weight_pounds: f64, height_inches: f64) -> Option<f64> {
    if height_inches > 0.0 {
        Some(weight_pounds / (height_inches * height_inches) * 703.0)
    } else {
        None
    }
}

pub fn previous_birth_flag(total_prior_births: u32) -> u8 {
    u8::from(total_prior_births > 0)
}

fn lookup(field: &'static str, value: &str, table: fn(&str) -> Option<u8>) -> Result<u8, AssessmentError> {
    table(value).ok_or_else(|| {
        error!(field, value, "Intake option missing from lookup table");
        AssessmentError::UnknownOption { field, value: value.to_string() }
    })
}

pub fn encode(form: &IntakeForm) -> Result<IntakeRecord, AssessmentError> {
    let delivery_month = lookup("delivery month", &form.delivery_month, month_to_number)?;
    let mothers_race = lookup("race", &form.mothers_race, race_to_code)?;
    let mothers_education = lookup("education", &form.mothers_education, education_to_code)?;

    let bmi = calculate_bmi(form.weight_pounds, form.height_inches)
        .ok_or(AssessmentError::InvalidHeight(form.height_inches))?;

    let flags = ClinicalFlags {
        diabetes_prepregnancy: yes_no_to_binary(&form.diabetes_prepregnancy),
        gestational_diabetes: yes_no_to_binary(&form.gestational_diabetes),
        prepregnancy_hypertension: yes_no_to_binary(&form.prepregnancy_hypertension),
        gestational_hypertension: yes_no_to_binary(&form.gestational_hypertension),
        hypertension_eclampsia: yes_no_to_binary(&form.hypertension_eclampsia),
        infertility_treatment: yes_no_to_binary(&form.infertility_treatment),
        cigarettes_during_pregnancy: yes_no_to_binary(&form.cigarettes_during_pregnancy),
        cigarettes_before_pregnancy: yes_no_to_binary(&form.cigarettes_before_pregnancy),
    };

    Ok(IntakeRecord {
        delivery_month,
        mothers_age: form.mothers_age,
        mothers_race,
        mothers_education,
        fathers_age: form.fathers_age,
        prenatal_care_month: form.prenatal_care_month,
        bmi,
        flags,
        infant_sex: sex_to_binary(&form.infant_sex),
        wic_program: yes_no_to_binary(&form.wic_program),
        total_prior_births: form.total_prior_births,
        had_previous_birth: previous_birth_flag(form.total_prior_births),
        last_birth: LastBirthInterval::from_months(form.months_since_last_birth),
        risk_sum: flags.risk_sum(),
    })
}
