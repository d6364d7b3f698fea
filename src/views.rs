//! HTML views for the five navigable pages.
//!
//! Pages are assembled with `format!`; every user-supplied value goes
//! through `html_escape` before it is interpolated.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::assessment::Assessment;
use crate::intake::lookup::{EDUCATION_LEVELS, FEMALE, MALE, MONTHS, NO, RACES, YES};
use crate::intake::IntakeForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    RiskAssessment,
    Team,
    Tips,
    Feedback,
}

impl Page {
    pub const ALL: [Page; 5] = [Page::Home, Page::RiskAssessment, Page::Team, Page::Tips, Page::Feedback];

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::RiskAssessment => "/assessment",
            Page::Team => "/team",
            Page::Tips => "/tips",
            Page::Feedback => "/feedback",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::RiskAssessment => "Risk Assessment",
            Page::Team => "Meet Our Team",
            Page::Tips => "StillSafe Tips for Success",
            Page::Feedback => "Feedback",
        }
    }
}

/// What to show under the assessment form after a submission.
pub enum Outcome<'a> {
    Risk(&'a Assessment),
    Invalid(&'a [String]),
    Failed(String),
}

pub enum FeedbackNotice {
    Thanks,
    Empty,
}

pub const DISCLAIMER: &str = "The StillSafe Risk Assessment Tool is designed by data science students and professionals to offer data-driven insights. \
However, it is not intended to replace medical advice, diagnosis, or treatment. For any concerns about your pregnancy or health, always consult a qualified healthcare provider. \
Your health and well-being are our top priority.";

const TIPS: [(&str, &str); 10] = [
    ("Schedule Regular Prenatal Checkups", "Work closely with your healthcare provider to ensure everything is on track and to address any questions or concerns along the way."),
    ("Nourish Your Body with a Balanced Diet", "Focus on nutrient-rich foods, including fresh fruits, vegetables, whole grains, lean proteins, and dairy."),
    ("Engage in Safe Physical Activity", "Try gentle exercises like walking, prenatal yoga, swimming, or low-impact aerobics, with the green light from your healthcare provider."),
    ("Avoid Harmful Substances", "Minimize caffeine, and steer clear of alcohol, tobacco, and recreational drugs."),
    ("Stay Hydrated", "Drink plenty of water throughout the day to support your body\u{2019}s increased demands."),
    ("Prioritize Rest and Relaxation", "Getting 7-9 hours of quality sleep each night is essential."),
    ("Empower Yourself with Knowledge", "Explore trusted resources and don\u{2019}t hesitate to ask your healthcare provider any questions you have."),
    ("Create Your Circle of Support", "Surround yourself with loving family, friends, or a community of other parents-to-be."),
    ("Prepare for Your Baby\u{2019}s Big Day", "Talk with your healthcare provider about your birth plan and pack a bag for labor and recovery."),
    ("Keep an Eye on Your Health", "Reach out to your healthcare provider if you notice persistent headaches, swelling, or changes in your baby\u{2019}s movements."),
];

fn layout(active: Page, body: &str) -> String {
    let nav: String = Page::ALL
        .iter()
        .map(|&page| {
            let class = if page == active { " class=\"active\"" } else { "" };
            format!("<a href=\"{}\"{}>{}</a>", page.path(), class, page.title())
        })
        .collect::<Vec<_>>()
        .join("\n            ");

    format!(r####"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>StillSafe | {title}</title>
    <script src="https://cdn.jsdelivr.net/npm/marked/marked.min.js"></script>
    <style>
        body {{ margin: 0; display: grid; grid-template-columns: 220px 1fr; min-height: 100vh; font-family: -apple-system, BlinkMacSystemFont, sans-serif; color: #3D405B; background: #FFF5F8; }}
        nav {{ background: #FEEBF3; padding: 20px; display: flex; flex-direction: column; gap: 10px; }}
        nav a {{ color: #3D405B; text-decoration: none; }}
        nav a.active {{ font-weight: 700; color: #C45BAA; }}
        main {{ padding: 30px 40px; max-width: 900px; }}
        h1, h2, h3 {{ color: #C45BAA; }}
        label {{ display: block; font-weight: bold; margin-top: 14px; }}
        select, input, textarea {{ color: white; background: #3D405B; padding: 6px; border-radius: 6px; border: none; }}
        button, .button {{ background: #FFC8E1; color: #3D405B; border-radius: 12px; border: 1px solid #C45BAA; padding: 8px 16px; margin-top: 18px; cursor: pointer; text-decoration: none; display: inline-block; }}
        .notice {{ padding: 10px; border-radius: 10px; margin-top: 20px; }}
        .notice.ok {{ background: #EAFBF1; border-left: 5px solid #62A87C; }}
        .notice.error {{ background: #FDEDEC; border-left: 5px solid #E74C3C; }}
    </style>
</head>
<body>
    <nav>
        <h2>Navigation</h2>
            {nav}
    </nav>
    <main>
{body}
    </main>
    <script>
        document.querySelectorAll('[data-markdown]').forEach((el) => {{ el.innerHTML = marked.parse(el.textContent); }});
    </script>
</body>
</html>"####, title = active.title(), nav = nav, body = body)
}

pub fn home() -> String {
    layout(Page::Home, r#"        <h1>StillSafe</h1>
        <h3>About StillSafe</h3>
        <p>At <strong>StillSafe</strong>, we are on a mission to reduce the heartbreak of stillbirth by providing expecting families with the tools,
        knowledge, and support they need for a safe pregnancy journey.</p>
        <h3>Our Mission</h3>
        <p>To ensure no family experiences a preventable stillbirth by providing accessible, evidence-based
        risk assessment tools and empowering support throughout pregnancy.</p>
        <h3>How It Works</h3>
        <ul>
            <li><strong>Input Key Information:</strong> Enter basic health and demographic details.</li>
            <li><strong>Personalized Risk Assessment:</strong> Our machine learning tool identifies pregnancies at higher risk for stillbirth.</li>
            <li><strong>Tips for Success:</strong> Explore our Guide to a Safe and Healthy Pregnancy.</li>
            <li><strong>Feedback Section:</strong> Share your thoughts and help us improve.</li>
        </ul>
        <h3>Get Started Today</h3>
        <a class="button" href="/assessment">Start Your Risk Assessment Now</a>"#)
}

pub fn team() -> String {
    layout(Page::Team, "        <h1>Meet Our Team</h1>
        <p>At StillSafe, we\u{2019}re a team of Master\u{2019}s students studying Information and Data Science, brought together by a shared
        passion for supporting moms-to-be and their little ones.</p>")
}

pub fn tips() -> String {
    let items: String = TIPS
        .iter()
        .map(|(title, body)| format!("        <h3>{}</h3>\n        <p>{}</p>\n", text(title), text(body)))
        .collect();
    layout(Page::Tips, &format!("        <h1>StillSafe Tips for Success</h1>\n        <h2>Your Guide to a Safe and Healthy Pregnancy</h2>\n{}", items))
}

pub fn feedback(notice: Option<FeedbackNotice>) -> String {
    let notice = match notice {
        Some(FeedbackNotice::Thanks) => "<div class=\"notice ok\"><strong>Thank you for your feedback!</strong> We\u{2019}ll get back to you shortly.</div>",
        Some(FeedbackNotice::Empty) => "<div class=\"notice error\"><strong>Please enter some feedback</strong> before submitting.</div>",
        None => "",
    };
    layout(Page::Feedback, &format!(r#"        <h1>Feedback</h1>
        <h2>We&rsquo;d Love to Hear From You!</h2>
        <p>Welcome to our feedback section! Please feel free to ask us any questions or share your feedback.</p>
        <form method="post" action="/feedback">
            <label for="message">Your Feedback</label>
            <textarea id="message" name="message" rows="6" cols="60" placeholder="Type your message here..."></textarea>
            <br><button type="submit">Submit Feedback</button>
        </form>
        {}"#, notice))
}

fn select(name: &str, label: &str, options: &[&str], selected: &str) -> String {
    let options: String = options
        .iter()
        .map(|&option| {
            let mark = if option == selected { " selected" } else { "" };
            format!("<option value=\"{}\"{}>{}</option>", attr(option), mark, text(option))
        })
        .collect();
    format!(
        "            <label for=\"{name}\">{label}</label>\n            <select id=\"{name}\" name=\"{name}\">{options}</select>\n",
        name = name,
        label = text(label),
        options = options
    )
}

fn number(name: &str, label: &str, value: String, min: &str, max: &str, step: &str) -> String {
    format!(
        "            <label for=\"{name}\">{label}</label>\n            <input type=\"number\" id=\"{name}\" name=\"{name}\" value=\"{value}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" required>\n",
        name = name,
        label = text(label),
        value = attr(&value),
        min = min,
        max = max,
        step = step
    )
}

fn outcome_block(outcome: Outcome<'_>) -> String {
    match outcome {
        Outcome::Risk(assessment) => format!(
            "        <p>Your calculated pre-pregnancy BMI: {:.2}</p>\n        <div class=\"notice ok\"><strong>Risk Assessment:</strong><div id=\"risk-message\" data-markdown>{}</div></div>\n",
            assessment.record.bmi,
            text(assessment.message)
        ),
        Outcome::Invalid(errors) => {
            let items: String = errors.iter().map(|e| format!("<li>{}</li>", text(e))).collect();
            format!("        <div class=\"notice error\"><strong>Please check your answers:</strong><ul>{}</ul></div>\n", items)
        }
        Outcome::Failed(message) => format!(
            "        <div class=\"notice error\"><strong>Risk Assessment:</strong> {}</div>\n",
            text(&message)
        ),
    }
}

pub fn assessment(form: &IntakeForm, outcome: Option<Outcome<'_>>) -> String {
    let yes_no = [NO, YES];
    let mut fields = String::new();

    fields += &select("delivery_month", "What month are you expecting to have your baby?", &MONTHS, &form.delivery_month);
    fields += &number("mothers_age", "How old are you right now?", form.mothers_age.to_string(), "0", "65", "1");
    fields += &select("mothers_race", "What is your race?", &RACES, &form.mothers_race);
    fields += &select("mothers_education", "What is your highest level of education?", &EDUCATION_LEVELS, &form.mothers_education);
    fields += &number("fathers_age", "How old is the baby's father?", form.fathers_age.to_string(), "0", "100", "1");
    fields += &number(
        "prenatal_care_month",
        "How many months along in your pregnancy were you when you had your first prenatal care visit? If you have yet to visit, at how many months do you expect to have your first prenatal care visit?",
        form.prenatal_care_month.to_string(),
        "1",
        "10",
        "1",
    );
    fields += &number("weight_pounds", "What was your pre-pregnancy weight in pounds?", form.weight_pounds.to_string(), "50", "500", "0.1");
    fields += &number("height_inches", "What was your pre-pregnancy height in inches?", form.height_inches.to_string(), "48", "96", "0.1");
    fields += &select("diabetes_prepregnancy", "Did you have diabetes pre-pregnancy?", &yes_no, &form.diabetes_prepregnancy);
    fields += &select("gestational_diabetes", "Did you get gestational diabetes?", &yes_no, &form.gestational_diabetes);
    fields += &select("prepregnancy_hypertension", "Did you have pre-pregnancy hypertension?", &yes_no, &form.prepregnancy_hypertension);
    fields += &select("gestational_hypertension", "Did you get gestational hypertension?", &yes_no, &form.gestational_hypertension);
    fields += &select("hypertension_eclampsia", "Do you have hypertension eclampsia?", &yes_no, &form.hypertension_eclampsia);
    fields += &select("infertility_treatment", "Have you undergone infertility treatment?", &yes_no, &form.infertility_treatment);
    fields += &select("infant_sex", "What is the expected sex of your baby?", &[MALE, FEMALE], &form.infant_sex);
    fields += &select("wic_program", "Are you participating in the WIC program? (Supplemental Nutrition Assistance)", &yes_no, &form.wic_program);
    fields += &select("cigarettes_during_pregnancy", "Have you been smoking cigarettes during your pregnancy?", &yes_no, &form.cigarettes_during_pregnancy);
    fields += &select("cigarettes_before_pregnancy", "Did you smoke cigarettes before your pregnancy?", &yes_no, &form.cigarettes_before_pregnancy);
    fields += &number("total_prior_births", "How many previous pregnancies have you had?", form.total_prior_births.to_string(), "0", "21", "1");
    fields += &number(
        "months_since_last_birth",
        "How many months has it been since your last pregnancy? Put 0 if you have not had any previous pregnancies.",
        form.months_since_last_birth.to_string(),
        "0",
        "320",
        "1",
    );

    let outcome = outcome.map(outcome_block).unwrap_or_default();

    layout(Page::RiskAssessment, &format!(r#"        <h1>Risk Assessment Tool</h1>
        <p>Provide the following information to receive a personalized pregnancy risk assessment.</p>
        <form method="post" action="/assessment">
{fields}            <button type="submit">Submit</button>
        </form>
{outcome}        <hr>
        <h3>Disclaimer</h3>
        <p>{disclaimer}</p>"#, fields = fields, outcome = outcome, disclaimer = DISCLAIMER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_marks_active_page() {
        let html = tips();
        assert!(html.contains("<a href=\"/tips\" class=\"active\">StillSafe Tips for Success</a>"));
        assert!(html.contains("<a href=\"/\">Home</a>"));
        for page in Page::ALL {
            assert!(html.contains(page.path()));
        }
    }

    #[test]
    fn test_form_preselects_answers() {
        let form = IntakeForm { delivery_month: "June".to_string(), wic_program: "Yes".to_string(), ..Default::default() };
        let html = assessment(&form, None);
        assert!(html.contains("<option value=\"June\" selected>June</option>"));
        assert!(html.contains("<option value=\"January\">January</option>"));
        assert!(html.contains("name=\"months_since_last_birth\" value=\"0\" min=\"0\" max=\"320\""));
        assert!(!html.contains("Risk Assessment:</strong>"));
    }

    #[test]
    fn test_failure_text_is_escaped() {
        let html = assessment(&IntakeForm::default(), Some(Outcome::Failed("<script>alert(1)</script>".to_string())));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_validation_messages_listed() {
        let errors = vec!["Mother's age 70 out of range [0, 65]".to_string()];
        let html = assessment(&IntakeForm::default(), Some(Outcome::Invalid(&errors)));
        assert!(html.contains("<li>Mother's age 70 out of range [0, 65]</li>"));
    }

    #[test]
    fn test_feedback_notices() {
        assert!(feedback(Some(FeedbackNotice::Thanks)).contains("Thank you for your feedback!"));
        assert!(feedback(Some(FeedbackNotice::Empty)).contains("Please enter some feedback"));
        assert!(!feedback(None).contains("class=\"notice"));
    }
}
