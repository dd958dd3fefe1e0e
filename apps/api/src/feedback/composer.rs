//! Prompt composition. A pure function from a validated request (plus persona)
//! to the system/user instruction pair. No I/O, no clock, no randomness.

use crate::feedback::models::{FeedbackRequest, PromptBundle, ReviewType};
use crate::feedback::prompts::{
    AD_HOC_FRAMING, ANNUAL_FRAMING, DEFAULT_MODULE_GUIDELINES, MID_YEAR_FRAMING, SYSTEM_TEMPLATE,
    USER_TEMPLATE,
};
use crate::feedback::rubric::{framework_guidance, rubric_for};

/// Builds the instruction pair for one `/api/ask` request.
pub fn compose_prompts(request: &FeedbackRequest, persona: &str) -> PromptBundle {
    let rubric = rubric_for(request.review_type);
    let framework = framework_guidance(request.framework);

    let module_guidelines = request
        .module_guidelines
        .as_deref()
        .filter(|g| !g.trim().is_empty())
        .unwrap_or(DEFAULT_MODULE_GUIDELINES);

    let persona_line = if persona.is_empty() {
        String::new()
    } else {
        format!("\nPersona: {persona}")
    };

    let system_instruction = fill_template(
        SYSTEM_TEMPLATE,
        &[
            ("review_framing", review_framing(request.review_type)),
            ("framework_guidance", framework.guidance),
            ("module_guidelines", module_guidelines),
            ("persona_line", persona_line.as_str()),
        ],
    );

    let rubric_lines = rubric
        .items
        .iter()
        .map(|item| format!("- {}: {}", item.label, item.guidance))
        .collect::<Vec<_>>()
        .join("\n");

    let evaluation_lines = rubric
        .items
        .iter()
        .map(|item| format!("- {}:", item.label))
        .collect::<Vec<_>>()
        .join("\n");

    let (min_sentences, max_sentences) = request.review_type.example_sentences();
    let sentence_range = format!("{min_sentences}–{max_sentences}");
    let context = context_lines(request);

    let user_instruction = fill_template(
        USER_TEMPLATE,
        &[
            ("manager_name", request.manager_name.as_str()),
            ("employee_name", request.employee_name.as_str()),
            ("review_label", request.review_type.label()),
            ("context_lines", context.as_str()),
            ("draft_text", request.draft_text.as_str()),
            ("rubric_title", rubric.title),
            ("rubric_lines", rubric_lines.as_str()),
            ("framework_guidance", framework.guidance),
            ("evaluation_lines", evaluation_lines.as_str()),
            ("sentence_range", sentence_range.as_str()),
            ("example_rule", framework.example_rule),
        ],
    );

    PromptBundle {
        system_instruction,
        user_instruction,
    }
}

fn review_framing(review_type: ReviewType) -> &'static str {
    match review_type {
        ReviewType::AdHoc => AD_HOC_FRAMING,
        ReviewType::MidYear => MID_YEAR_FRAMING,
        ReviewType::Annual => ANNUAL_FRAMING,
    }
}

/// Optional scenario / competency lines, each prefixed with a newline.
fn context_lines(request: &FeedbackRequest) -> String {
    let mut lines = String::new();
    if let Some(scenario) = &request.scenario_id {
        lines.push_str("\nScenario: ");
        lines.push_str(scenario);
    }
    if !request.competencies.is_empty() {
        lines.push_str("\nCompetencies: ");
        lines.push_str(&request.competencies.join(", "));
    }
    lines
}

/// Replaces `{key}` placeholders in one left-to-right pass.
///
/// Substituted values are never rescanned, so user text containing braces is
/// inserted verbatim. Unknown placeholders are left untouched.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replacement = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });

        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
