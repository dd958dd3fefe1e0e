use serde::{Deserialize, Serialize};

use crate::feedback::validation::{lenient_string, lenient_strings};

pub const DEFAULT_MANAGER_NAME: &str = "Manager";
pub const DEFAULT_EMPLOYEE_NAME: &str = "Employee";

/// The kind of conversation the manager is practicing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReviewType {
    #[default]
    AdHoc,
    MidYear,
    Annual,
}

impl ReviewType {
    /// Anything other than mid-year / annual is ad-hoc.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mid-year" => ReviewType::MidYear,
            "annual" => ReviewType::Annual,
            _ => ReviewType::AdHoc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReviewType::AdHoc => "Ad-hoc feedback",
            ReviewType::MidYear => "Mid-year performance review",
            ReviewType::Annual => "Annual performance review",
        }
    }

    pub fn is_formal_review(self) -> bool {
        matches!(self, ReviewType::MidYear | ReviewType::Annual)
    }

    /// Formal reviews sample more conservatively.
    pub fn temperature(self) -> f32 {
        if self.is_formal_review() {
            0.3
        } else {
            0.5
        }
    }

    pub fn max_tokens(self) -> u32 {
        match self {
            ReviewType::AdHoc => 600,
            ReviewType::MidYear => 800,
            ReviewType::Annual => 900,
        }
    }

    /// Inclusive sentence range for the Improved Example section.
    pub fn example_sentences(self) -> (u8, u8) {
        match self {
            ReviewType::AdHoc => (4, 6),
            ReviewType::MidYear => (6, 8),
            ReviewType::Annual => (8, 10),
        }
    }
}

/// Phrasing framework the improved example should follow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrameworkPreference {
    #[default]
    Sbi,
    SbiSmart,
    Feedforward,
    NoFramework,
}

impl FrameworkPreference {
    /// Unknown values fall back to SBI.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sbi+smart" => FrameworkPreference::SbiSmart,
            "feedforward" => FrameworkPreference::Feedforward,
            "none" => FrameworkPreference::NoFramework,
            _ => FrameworkPreference::Sbi,
        }
    }
}

/// Raw `/api/ask` body as sent by the front-end.
///
/// Every field is optional and a value of the wrong JSON type reads as absent,
/// so a malformed field never rejects the whole body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AskRequest {
    #[serde(deserialize_with = "lenient_string")]
    pub input: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub employee: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub review_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub scenario_id: Option<String>,
    #[serde(deserialize_with = "lenient_strings")]
    pub competencies: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub module_guidelines: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub framework_preference: Option<String>,
}

/// A validated `/api/ask` request with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRequest {
    pub draft_text: String,
    pub manager_name: String,
    pub employee_name: String,
    pub review_type: ReviewType,
    pub scenario_id: Option<String>,
    pub competencies: Vec<String>,
    pub module_guidelines: Option<String>,
    pub framework: FrameworkPreference,
}

impl FeedbackRequest {
    pub fn new(draft_text: impl Into<String>) -> Self {
        Self {
            draft_text: draft_text.into(),
            manager_name: DEFAULT_MANAGER_NAME.to_string(),
            employee_name: DEFAULT_EMPLOYEE_NAME.to_string(),
            review_type: ReviewType::default(),
            scenario_id: None,
            competencies: Vec::new(),
            module_guidelines: None,
            framework: FrameworkPreference::default(),
        }
    }
}

/// The instruction pair sent upstream. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBundle {
    pub system_instruction: String,
    pub user_instruction: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub response: String,
}
