//! Lookup tables for categorical intake answers.
//!
//! Codes are 1-based positions in the option lists the model was fitted on,
//! so the order of these arrays is part of the model contract.

pub const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

pub const RACES: [&str; 31] = [
    "White (alone)", "Black (alone)", "AIAN (alone)", "Asian (alone)", "NHOPI (alone)",
    "Black And White", "Black and AIAN", "Black and Asian", "Black and NHOPI",
    "AIAN and White", "AIAN and Asian", "AIAN and NHOPI", "Asian and White",
    "Asian and NHOPI", "NHOPI and White", "Black, AIAN, and White", "Black, AIAN, and Asian",
    "Black, AIAN, and NHOPI", "Black, Asian, and White", "Black, Asian, and NHOPI",
    "Black, NHOPI, and White", "AIAN, Asian, and White", "AIAN, NHOPI, and White",
    "AIAN, Asian, and NHOPI", "Asian, NHOPI, and White", "Black, AIAN, Asian, and White",
    "Black, AIAN, Asian, and NHOPI", "Black, AIAN, NHOPI, and White",
    "Black, Asian, NHOPI, and White", "AIAN, Asian, NHOPI, and White",
    "Black, AIAN, Asian, NHOPI, and White",
];

pub const EDUCATION_LEVELS: [&str; 8] = [
    "8th grade or less",
    "9th through 12th grade with no diploma",
    "High school graduate or GED completed",
    "Some college credit, but not a degree",
    "Associate degree (AA, AS)",
    "Bachelor\u{2019}s degree (BA, AB, BS)",
    "Master\u{2019}s degree (MA, MS, MEng, Med, MSW, MBA)",
    "Doctorate (PhD, EdD) or Professional degree (MD, DDS, DVM, LLB, JD)",
];

pub const YES: &str = "Yes";
pub const NO: &str = "No";
pub const MALE: &str = "Male";
pub const FEMALE: &str = "Female";

fn position_code(table: &[&str], name: &str) -> Option<u8> {
    table.iter().position(|&entry| entry == name).map(|i| (i + 1) as u8)
}

/// Calendar month name to 1..=12.
pub fn month_to_number(name: &str) -> Option<u8> {
    position_code(&MONTHS, name)
}

/// Race option to its 1..=31 recode.
pub fn race_to_code(name: &str) -> Option<u8> {
    position_code(&RACES, name)
}

/// Education level to 1..=8.
pub fn education_to_code(level: &str) -> Option<u8> {
    position_code(&EDUCATION_LEVELS, level)
}

pub fn yes_no_to_binary(answer: &str) -> u8 {
    u8::from(answer == YES)
}

pub fn sex_to_binary(answer: &str) -> u8 {
    u8::from(answer == MALE)
}
