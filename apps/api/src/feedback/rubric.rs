//! Rubric and framework tables, keyed by enum and selected independently.

use crate::feedback::models::{FrameworkPreference, ReviewType};

/// One scored line in the Evaluation section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RubricItem {
    pub label: &'static str,
    pub guidance: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rubric {
    pub title: &'static str,
    pub items: &'static [RubricItem],
}

pub const AD_HOC_RUBRIC: Rubric = Rubric {
    title: "Ad-hoc feedback rubric",
    items: &[
        RubricItem {
            label: "Clarity",
            guidance: "the message is easy to follow and gets to the point",
        },
        RubricItem {
            label: "Specificity",
            guidance: "describes specific, observable behavior rather than traits",
        },
        RubricItem {
            label: "Tone",
            guidance: "respectful, supportive and bias-aware wording",
        },
        RubricItem {
            label: "Actionability",
            guidance: "ends with one clear, realistic next step",
        },
        RubricItem {
            label: "Structure",
            guidance: "follows the framework guidance below",
        },
    ],
};

pub const REVIEW_RUBRIC: Rubric = Rubric {
    title: "Performance review rubric",
    items: &[
        RubricItem {
            label: "Goals alignment",
            guidance: "ties performance to agreed goals and expectations for the period",
        },
        RubricItem {
            label: "Evidence",
            guidance: "cites concrete examples and results, not impressions",
        },
        RubricItem {
            label: "Balance",
            guidance: "recognizes strengths as well as growth areas",
        },
        RubricItem {
            label: "Development plan",
            guidance: "names concrete development actions and support for the next period",
        },
        RubricItem {
            label: "Fairness",
            guidance: "consistent, bias-aware language that would hold for any employee",
        },
    ],
};

/// Formal reviews get the review rubric; everything else is ad-hoc.
pub fn rubric_for(review_type: ReviewType) -> Rubric {
    if review_type.is_formal_review() {
        REVIEW_RUBRIC
    } else {
        AD_HOC_RUBRIC
    }
}

/// Phrasing guidance and example rule for a framework preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameworkGuidance {
    /// Appended to both instructions.
    pub guidance: &'static str,
    /// Constrains the Improved Example section.
    pub example_rule: &'static str,
}

pub fn framework_guidance(framework: FrameworkPreference) -> FrameworkGuidance {
    match framework {
        FrameworkPreference::Sbi => FrameworkGuidance {
            guidance: "Use SBI (Situation–Behavior–Impact): name the specific situation, \
                describe the observable behavior, then explain its impact on the team or work.",
            example_rule: "Use SBI and one clear next step.",
        },
        FrameworkPreference::SbiSmart => FrameworkGuidance {
            guidance: "Use SBI (Situation–Behavior–Impact) to describe what happened, \
                then frame the next step so it meets the SMART criteria: \
                Specific, Measurable, Achievable, Relevant, Time-bound.",
            example_rule: "Use SBI and close with one SMART next step (Specific, Measurable, \
                Achievable, Relevant, Time-bound).",
        },
        FrameworkPreference::Feedforward => FrameworkGuidance {
            guidance: "Use feedforward: keep the focus on future behavior and concrete \
                suggestions for next time rather than re-examining past mistakes.",
            example_rule: "Focus on what to do next time, with one clear next step.",
        },
        FrameworkPreference::NoFramework => FrameworkGuidance {
            guidance: "No forced framework: use whatever natural structure best fits the \
                message, as long as it stays specific, respectful and actionable.",
            example_rule: "Use whatever structure reads most naturally, with one clear next step.",
        },
    }
}
