use serde::{Deserialize, Serialize};

use crate::interview::profile::ProfileField;

/// Phase of the scripted interview. Transitions are strictly forward.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStage {
    #[default]
    Greeting,
    InfoGathering,
    TechnicalQuestioning,
    Closing,
}

const GREETING_REQUIRED: &[ProfileField] = &[ProfileField::Name];

const INFO_GATHERING_REQUIRED: &[ProfileField] = &[
    ProfileField::Email,
    ProfileField::Phone,
    ProfileField::YearsOfExperience,
    ProfileField::DesiredPosition,
    ProfileField::TechStack,
];

impl InterviewStage {
    pub fn ordinal(self) -> u8 {
        match self {
            InterviewStage::Greeting => 0,
            InterviewStage::InfoGathering => 1,
            InterviewStage::TechnicalQuestioning => 2,
            InterviewStage::Closing => 3,
        }
    }

    /// The following stage, or `None` from the terminal stage.
    pub fn next(self) -> Option<Self> {
        match self {
            InterviewStage::Greeting => Some(InterviewStage::InfoGathering),
            InterviewStage::InfoGathering => Some(InterviewStage::TechnicalQuestioning),
            InterviewStage::TechnicalQuestioning => Some(InterviewStage::Closing),
            InterviewStage::Closing => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Fields that must be in the profile before this stage can be left.
    pub fn required_fields(self) -> &'static [ProfileField] {
        match self {
            InterviewStage::Greeting => GREETING_REQUIRED,
            InterviewStage::InfoGathering => INFO_GATHERING_REQUIRED,
            InterviewStage::TechnicalQuestioning | InterviewStage::Closing => &[],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InterviewStage::Greeting => "Introduction",
            InterviewStage::InfoGathering => "Candidate Details",
            InterviewStage::TechnicalQuestioning => "Technical Assessment",
            InterviewStage::Closing => "Conclusion",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_follow_declaration_order() {
        let stages = [
            InterviewStage::Greeting,
            InterviewStage::InfoGathering,
            InterviewStage::TechnicalQuestioning,
            InterviewStage::Closing,
        ];
        for pair in stages.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].ordinal() + 1, pair[1].ordinal());
            assert_eq!(pair[0].next(), Some(pair[1]));
        }
    }

    #[test]
    fn test_closing_is_only_terminal_stage() {
        assert!(InterviewStage::Closing.is_terminal());
        assert!(!InterviewStage::Greeting.is_terminal());
        assert!(!InterviewStage::TechnicalQuestioning.is_terminal());
    }

    #[test]
    fn test_default_is_greeting() {
        assert_eq!(InterviewStage::default(), InterviewStage::Greeting);
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&InterviewStage::TechnicalQuestioning).unwrap();
        assert_eq!(json, "\"technical_questioning\"");
        let stage: InterviewStage = serde_json::from_str("\"info_gathering\"").unwrap();
        assert_eq!(stage, InterviewStage::InfoGathering);
    }

    #[test]
    fn test_greeting_requires_name() {
        assert_eq!(
            InterviewStage::Greeting.required_fields(),
            &[ProfileField::Name]
        );
        assert!(InterviewStage::Closing.required_fields().is_empty());
    }
}
