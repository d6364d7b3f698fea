//! The Intake Record: one submission as the model's fixed-order feature vector.

use serde::Serialize;

/// Column names in model-fit order. The CSV line sent for inference uses
/// exactly this order.
pub const FIELD_NAMES: [&str; 25] = [
    "Delivery_Month",
    "Mothers_Age",
    "Mothers_Race_Recode_31",
    "Mothers_Education",
    "Fathers_Age_Combined",
    "Month_Prenatal_Care_Began",
    "Mothers_PrePregnancy_BMI",
    "Diabetes_Prepregnancy",
    "Gestational_Diabetes",
    "PrePregnancy_Hypertension",
    "Gestational_Hypertension",
    "Hypertension_Eclampsia",
    "Infertility_Treatment",
    "Infant_Sex",
    "WIC_Program",
    "Cigarettes_During_Pregnancy",
    "Cigarettes_Before_Pregnancy_Int",
    "Total_Prior_Births",
    "Had_Previous_Birth",
    "Less_than_1_year",
    "1_year_to_2.5_years",
    "2.5_years_to_4_years",
    "4_to_5.5_years",
    "Greater_than_5.5_years",
    "Risk_Sum",
];

/// Months-since-last-birth bucket. Exactly one bucket holds for any count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LastBirthInterval {
    LessThanOneYear,
    OneToTwoAndHalfYears,
    TwoAndHalfToFourYears,
    FourToFiveAndHalfYears,
    MoreThanFiveAndHalfYears,
}

impl LastBirthInterval {
    pub fn from_months(months: u32) -> Self {
        match months {
            0..=11 => Self::LessThanOneYear,
            12..=29 => Self::OneToTwoAndHalfYears,
            30..=47 => Self::TwoAndHalfToFourYears,
            48..=65 => Self::FourToFiveAndHalfYears,
            _ => Self::MoreThanFiveAndHalfYears,
        }
    }

    /// One-hot indicators in field order.
    pub fn indicators(self) -> [u8; 5] {
        let mut flags = [0; 5];
        flags[self as usize] = 1;
        flags
    }
}

/// The eight clinical flags summed into `Risk_Sum`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClinicalFlags {
    pub diabetes_prepregnancy: u8,
    pub gestational_diabetes: u8,
    pub prepregnancy_hypertension: u8,
    pub gestational_hypertension: u8,
    pub hypertension_eclampsia: u8,
    pub infertility_treatment: u8,
    pub cigarettes_during_pregnancy: u8,
    pub cigarettes_before_pregnancy: u8,
}

impl ClinicalFlags {
    pub fn as_array(&self) -> [u8; 8] {
        [
            self.diabetes_prepregnancy,
            self.gestational_diabetes,
            self.prepregnancy_hypertension,
            self.gestational_hypertension,
            self.hypertension_eclampsia,
            self.infertility_treatment,
            self.cigarettes_during_pregnancy,
            self.cigarettes_before_pregnancy,
        ]
    }

    pub fn risk_sum(&self) -> u8 {
        self.as_array().iter().filter(|&&flag| flag == 1).count() as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakeRecord {
    pub delivery_month: u8,
    pub mothers_age: u32,
    pub mothers_race: u8,
    pub mothers_education: u8,
    pub fathers_age: u32,
    pub prenatal_care_month: u32,
    pub bmi: f64,
    pub flags: ClinicalFlags,
    pub infant_sex: u8,
    pub wic_program: u8,
    pub total_prior_births: u32,
    pub had_previous_birth: u8,
    pub last_birth: LastBirthInterval,
    pub risk_sum: u8,
}

impl IntakeRecord {
    /// Values in `FIELD_NAMES` order.
    pub fn values(&self) -> [f64; 25] {
        let f = &self.flags;
        let interval = self.last_birth.indicators();
        [
            f64::from(self.delivery_month),
            f64::from(self.mothers_age),
            f64::from(self.mothers_race),
            f64::from(self.mothers_education),
            f64::from(self.fathers_age),
            f64::from(self.prenatal_care_month),
            self.bmi,
            f64::from(f.diabetes_prepregnancy),
            f64::from(f.gestational_diabetes),
            f64::from(f.prepregnancy_hypertension),
            f64::from(f.gestational_hypertension),
            f64::from(f.hypertension_eclampsia),
            f64::from(f.infertility_treatment),
            f64::from(self.infant_sex),
            f64::from(self.wic_program),
            f64::from(f.cigarettes_during_pregnancy),
            f64::from(f.cigarettes_before_pregnancy),
            f64::from(self.total_prior_births),
            f64::from(self.had_previous_birth),
            f64::from(interval[0]),
            f64::from(interval[1]),
            f64::from(interval[2]),
            f64::from(interval[3]),
            f64::from(interval[4]),
            f64::from(self.risk_sum),
        ]
    }

    /// `(name, value)` pairs in field order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FIELD_NAMES.into_iter().zip(self.values())
    }
}
