//! Response Interpreter
//!
//! Two-way switch from the rounded model score to a templated message.

use serde::Serialize;

pub const LOW_RISK_MESSAGE: &str = concat!(
    "We are pleased to inform you that our predictive model indicates a low likelihood of stillbirth based on the ",
    "information you provided. While this is encouraging, ongoing prenatal care remains essential for ensuring a healthy pregnancy.\n\n",
    "**Recommendations for Continued Care:**\n",
    "- **Attend Regular Check-ups**: Keep all scheduled appointments to monitor your pregnancy.\n",
    "- **Monitor Signs and Symptoms**: Stay attentive to your body and your baby\u{2019}s movements, and report any concerns to your healthcare provider.\n",
    "- **Maintain a Healthy Lifestyle**: Follow medical advice on nutrition, exercise, and stress management.\n\n",
    "For additional information, visit our *Tips for Success* section on our website. It provides valuable insights ",
    "to help you maintain a healthy pregnancy.\n\n",
    "Thank you for your commitment to your health and your baby\u{2019}s well-being. If you have any concerns, please reach out to your ",
    "healthcare provider. Wishing you a smooth and healthy pregnancy!",
);

pub const HIGH_RISK_MESSAGE: &str = concat!(
    "We regret to inform you that our model has identified a potential high risk for stillbirth based on the ",
    "information you provided. This is not a guarantee of stillbirth but an indication that further medical ",
    "evaluation is crucial. We strongly recommend scheduling an appointment with your healthcare provider ",
    "immediately to discuss these results and determine the best course of action.\n\n",
    "**Immediate Steps to Take:**\n",
    "- **Consult a Healthcare Provider**: Schedule an appointment as soon as possible.\n",
    "- **Monitor Symptoms**: Pay close attention to changes in symptoms or fetal movements and report them promptly.\n",
    "- **Seek Support**: Reach out to loved ones or support groups during this challenging time.\n",
    "- **Maintain a Healthy Lifestyle**: Focus on a balanced diet, appropriate physical activity, and stress management.\n\n",
    "For additional guidance, please visit our *Tips for Success* section on our website, where you\u{2019}ll find ",
    "helpful strategies and resources.\n\n",
    "Your health and your baby\u{2019}s well-being are our utmost priority. With timely intervention, the risk can often be mitigated. ",
    "Wishing you strength and support during this time.",
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    High,
}

impl RiskLevel {
    /// 0 is low risk; every other value, including negatives and values
    /// above 1, is reported as high risk.
    pub fn from_rounded(prediction: i64) -> Self {
        if prediction == 0 {
            Self::Low
        } else {
            Self::High
        }
    }

    /// Markdown body of the message shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            Self::Low => LOW_RISK_MESSAGE,
            Self::High => HIGH_RISK_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_low_risk() {
        assert_eq!(RiskLevel::from_rounded(0), RiskLevel::Low);
        assert_eq!(RiskLevel::Low.message(), LOW_RISK_MESSAGE);
        assert!(LOW_RISK_MESSAGE.starts_with("We are pleased to inform you"));
        assert!(LOW_RISK_MESSAGE.ends_with("Wishing you a smooth and healthy pregnancy!"));
    }

    #[test]
    fn test_one_is_high_risk() {
        assert_eq!(RiskLevel::from_rounded(1), RiskLevel::High);
        assert_eq!(RiskLevel::High.message(), HIGH_RISK_MESSAGE);
        assert!(HIGH_RISK_MESSAGE.starts_with("We regret to inform you"));
        assert!(HIGH_RISK_MESSAGE.contains("**Immediate Steps to Take:**\n- **Consult a Healthcare Provider**"));
    }

    #[test]
    fn test_other_values_read_as_high_risk() {
        for value in [-3, -1, 2, 7, i64::MAX, i64::MIN] {
            assert_eq!(RiskLevel::from_rounded(value), RiskLevel::High, "value = {}", value);
        }
    }

    #[test]
    fn test_templates_keep_typographic_apostrophes() {
        assert!(LOW_RISK_MESSAGE.contains("baby\u{2019}s movements"));
        assert!(HIGH_RISK_MESSAGE.contains("you\u{2019}ll find"));
        assert!(!HIGH_RISK_MESSAGE.contains('\''));
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"high\"");
    }
}
