//! Raw answers as submitted by the risk assessment form.

use serde::{Deserialize, Serialize};

use super::lookup::{FEMALE, MALE, NO, YES};

/// One submission of the risk assessment form. Categorical answers are kept
/// as the option text the user picked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IntakeForm {
    pub delivery_month: String,
    pub mothers_age: u32,
    pub mothers_race: String,
    pub mothers_education: String,
    pub fathers_age: u32,
    pub prenatal_care_month: u32,
    pub weight_pounds: f64,
    pub height_inches: f64,
    pub diabetes_prepregnancy: String,
    pub gestational_diabetes: String,
    pub prepregnancy_hypertension: String,
    pub gestational_hypertension: String,
    pub hypertension_eclampsia: String,
    pub infertility_treatment: String,
    pub infant_sex: String,
    pub wic_program: String,
    pub cigarettes_during_pregnancy: String,
    pub cigarettes_before_pregnancy: String,
    pub total_prior_births: u32,
    pub months_since_last_birth: u32,
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self {
            delivery_month: "January".to_string(),
            mothers_age: 30,
            mothers_race: "White (alone)".to_string(),
            mothers_education: "8th grade or less".to_string(),
            fathers_age: 30,
            prenatal_care_month: 1,
            weight_pounds: 120.0,
            height_inches: 60.0,
            diabetes_prepregnancy: NO.to_string(),
            gestational_diabetes: NO.to_string(),
            prepregnancy_hypertension: NO.to_string(),
            gestational_hypertension: NO.to_string(),
            hypertension_eclampsia: NO.to_string(),
            infertility_treatment: NO.to_string(),
            infant_sex: MALE.to_string(),
            wic_program: NO.to_string(),
            cigarettes_during_pregnancy: NO.to_string(),
            cigarettes_before_pregnancy: NO.to_string(),
            total_prior_births: 0,
            months_since_last_birth: 0,
        }
    }
}

fn check_range<T: PartialOrd + std::fmt::Display>(
    errors: &mut Vec<String>,
    label: &str,
    value: T,
    min: T,
    max: T,
) {
    if value < min || value > max {
        errors.push(format!("{} {} out of range [{}, {}]", label, value, min, max));
    }
}

impl IntakeForm {
    pub fn yes_no_answers(&self) -> [(&'static str, &str); 9] {
        [
            ("Diabetes pre-pregnancy", &self.diabetes_prepregnancy),
            ("Gestational diabetes", &self.gestational_diabetes),
            ("Pre-pregnancy hypertension", &self.prepregnancy_hypertension),
            ("Gestational hypertension", &self.gestational_hypertension),
            ("Hypertension eclampsia", &self.hypertension_eclampsia),
            ("Infertility treatment", &self.infertility_treatment),
            ("WIC program", &self.wic_program),
            ("Cigarettes during pregnancy", &self.cigarettes_during_pregnancy),
            ("Cigarettes before pregnancy", &self.cigarettes_before_pregnancy),
        ]
    }

    /// Check the bounds the input widgets allow.
    ///
    /// Lookup-table answers (month, race, education) are not checked here:
    /// an unknown name there is a programming error surfaced by the encoder.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        check_range(&mut errors, "Mother's age", self.mothers_age, 0, 65);
        check_range(&mut errors, "Father's age", self.fathers_age, 0, 100);
        check_range(&mut errors, "Prenatal care month", self.prenatal_care_month, 1, 10);
        check_range(&mut errors, "Weight (lb)", self.weight_pounds, 50.0, 500.0);
        check_range(&mut errors, "Height (in)", self.height_inches, 48.0, 96.0);
        check_range(&mut errors, "Prior births", self.total_prior_births, 0, 21);
        check_range(&mut errors, "Months since last birth", self.months_since_last_birth, 0, 320);

        // NaN slips past the range comparisons above
        if !self.weight_pounds.is_finite() || !self.height_inches.is_finite() {
            errors.push("Weight and height must be numbers".to_string());
        }

        for (label, answer) in self.yes_no_answers() {
            if answer != YES && answer != NO {
                errors.push(format!("{} must be '{}' or '{}', got '{}'", label, NO, YES, answer));
            }
        }
        if self.infant_sex != MALE && self.infant_sex != FEMALE {
            errors.push(format!("Infant sex must be '{}' or '{}', got '{}'", MALE, FEMALE, self.infant_sex));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
