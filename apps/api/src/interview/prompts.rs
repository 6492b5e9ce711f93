// All LLM prompt constants for the Interview module.
// Reuses the interviewer system fragments from llm_client::prompts.

use crate::interview::extract::ValidationIssue;
use crate::interview::profile::{CandidateProfile, ProfileField};
use crate::interview::stage::InterviewStage;

/// First assistant message of every session. Sent without a model call.
pub const GREETING_MESSAGE: &str = "Hello! I'm the TalentScout interview assistant. \
    I'm here to learn about your skills and experience for potential tech positions. \
    Let's start with your name.";

/// Reply to any message after the interview has concluded.
pub const CLOSED_NOTICE: &str = "This interview has concluded. Thank you again for your time. \
    A TalentScout recruiter will contact you soon about next steps.";

/// Used when question generation returns nothing usable.
pub const FALLBACK_QUESTION: &str =
    "Let's discuss your technical experience. What projects have you worked on recently?";

/// Precedes the first technical question. Replace `{name}` and `{tech_list}`.
pub const TECHNICAL_TRANSITION_TEMPLATE: &str = "Thank you, {name}! I have everything I need \
    for now. Let's move on to a few technical questions about your experience with {tech_list}.";

/// Base persona for conversational turns. Replace `{profile}`.
pub const INTERVIEWER_BASE_TEMPLATE: &str = "You are an intelligent hiring assistant for \
TalentScout, a recruitment agency specializing in tech placements. You are conducting a \
preliminary technical interview with a candidate. Be professional but conversational and friendly.

Candidate information collected so far:
{profile}";

const GREETING_STAGE: &str = "
You are at the INTRODUCTION stage of the interview.
Introduce yourself as the TalentScout interview assistant.
Explain briefly that you will collect a few details and then ask some technical questions.
Ask the candidate for their full name.
Be friendly and professional.
";

const INFO_GATHERING_STAGE: &str = "
You are at the CANDIDATE DETAILS stage of the interview.
Acknowledge what the candidate has shared so far, using their name.
Ask for the details that are still missing: contact information (email and phone number), \
years of experience, the position they are looking for, and the technologies they are proficient in.
Ask for at most two or three details per message. Keep your response concise and professional.
";

const TECHNICAL_STAGE: &str = "
You are at the TECHNICAL ASSESSMENT stage of the interview.
Listen carefully to the candidate's answers and provide thoughtful follow-up questions.
Evaluate their technical knowledge but maintain a supportive tone.
Focus on their problem-solving approach and depth of understanding.
";

const CLOSING_STAGE: &str = "
You are at the CONCLUSION stage of the interview.
Thank the candidate for their time and responses.
Summarize what you've learned about their background and skills.
Explain that a TalentScout recruiter will contact them soon to discuss potential opportunities.
Provide a positive and encouraging conclusion to the interview. Do not ask any further questions.
";

/// Appended when the stage could not advance. Replace `{missing}` and `{issues}`.
const REPROMPT_TEMPLATE: &str = "
The candidate has not yet provided: {missing}.
{issues}Politely ask for the missing information again, in one short message.
";

/// Technical question generation prompt. Replace `{count}` and `{tech_list}`.
pub const QUESTION_GENERATION_TEMPLATE: &str = "Generate {count} technical interview questions \
appropriate for a candidate skilled in: {tech_list}.
The questions should:
1. Be specific to the technologies mentioned
2. Range from moderate to challenging difficulty
3. Test both practical knowledge and theoretical understanding
4. Each be answerable in 2-3 minutes
5. Not require writing actual code

Format each question on a separate line, numbered 1-{count}. Don't include answers.";

/// Answer evaluation prompt. Replace `{tech_list}`, `{question}`, `{answer}`.
pub const EVALUATION_TEMPLATE: &str = r#"Evaluate the following technical response from a candidate with skills in {tech_list}.

QUESTION: {question}

CANDIDATE'S ANSWER: {answer}

Return a JSON object with this EXACT schema:
{
  "assessment": "A brief evaluation of the technical accuracy (1-2 sentences)",
  "response": "A conversational response to the candidate that acknowledges their answer (1-2 sentences)",
  "follow_up": "A follow-up question that probes deeper or clarifies a misconception (1 sentence)"
}

Be fair but thorough in your assessment. Don't be too harsh or too lenient."#;

/// Renders collected fields as `- field: value` lines.
pub fn render_profile(profile: &CandidateProfile) -> String {
    if profile.is_empty() {
        return "- (nothing yet)\n".to_string();
    }
    profile
        .iter()
        .map(|(field, value)| format!("- {}: {}\n", field.as_str(), value))
        .collect()
}

fn stage_block(stage: InterviewStage) -> &'static str {
    match stage {
        InterviewStage::Greeting => GREETING_STAGE,
        InterviewStage::InfoGathering => INFO_GATHERING_STAGE,
        InterviewStage::TechnicalQuestioning => TECHNICAL_STAGE,
        InterviewStage::Closing => CLOSING_STAGE,
    }
}

/// Builds the system prompt for a conversational turn at `stage`.
///
/// `missing` and `issues` describe why the stage could not advance; when both
/// are empty no re-prompt block is added.
pub fn build_stage_prompt(
    stage: InterviewStage,
    profile: &CandidateProfile,
    missing: &[ProfileField],
    issues: &[ValidationIssue],
) -> String {
    let mut prompt = INTERVIEWER_BASE_TEMPLATE.replace("{profile}", &render_profile(profile));
    prompt.push_str(stage_block(stage));

    if !missing.is_empty() || !issues.is_empty() {
        let missing_text = if missing.is_empty() {
            "nothing further".to_string()
        } else {
            missing
                .iter()
                .map(|f| f.describe())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let issues_text: String = issues
            .iter()
            .map(|i| {
                format!(
                    "Their last answer had a problem with {}: {}.\n",
                    i.field.describe(),
                    i.reason
                )
            })
            .collect();

        prompt.push_str(&fill(
            REPROMPT_TEMPLATE,
            &[("{missing}", missing_text.as_str()), ("{issues}", issues_text.as_str())],
        ));
    }

    prompt
}

pub fn build_transition(profile: &CandidateProfile) -> String {
    let tech_list = profile.tech_stack().join(", ");
    fill(
        TECHNICAL_TRANSITION_TEMPLATE,
        &[
            ("{name}", profile.text(ProfileField::Name).unwrap_or("there")),
            ("{tech_list}", tech_list.as_str()),
        ],
    )
}

pub fn build_question_prompt(tech_stack: &[String], count: usize) -> String {
    QUESTION_GENERATION_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{tech_list}", &tech_stack.join(", "))
}

pub fn build_evaluation_prompt(tech_stack: &[String], question: &str, answer: &str) -> String {
    let tech_list = tech_stack.join(", ");
    fill(
        EVALUATION_TEMPLATE,
        &[
            ("{tech_list}", tech_list.as_str()),
            ("{question}", question),
            ("{answer}", answer),
        ],
    )
}

/// Substitutes placeholders in one left-to-right pass. Inserted values are
/// never scanned again, so a question or answer that happens to contain a
/// placeholder is kept as written.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::profile::FieldValue;

    #[test]
    fn test_profile_lines_render_lists_joined() {
        let mut profile = CandidateProfile::new();
        profile.set(ProfileField::Name, FieldValue::Text("Jane".to_string()));
        profile.set(
            ProfileField::TechStack,
            FieldValue::List(vec!["Rust".to_string(), "Go".to_string()]),
        );
        let rendered = render_profile(&profile);
        assert!(rendered.contains("- name: Jane\n"));
        assert!(rendered.contains("- tech_stack: Rust, Go\n"));
    }

    #[test]
    fn test_greeting_prompt_asks_for_name() {
        let prompt = build_stage_prompt(
            InterviewStage::Greeting,
            &CandidateProfile::new(),
            &[ProfileField::Name],
            &[],
        );
        assert!(prompt.contains("INTRODUCTION"));
        assert!(prompt.contains("not yet provided: full name"));
        assert!(!prompt.contains("{profile}"));
    }

    #[test]
    fn test_no_reprompt_block_when_nothing_missing() {
        let prompt = build_stage_prompt(InterviewStage::Closing, &CandidateProfile::new(), &[], &[]);
        assert!(prompt.contains("CONCLUSION"));
        assert!(!prompt.contains("not yet provided"));
    }

    #[test]
    fn test_issues_are_listed_in_reprompt() {
        let issues = vec![ValidationIssue {
            field: ProfileField::Email,
            reason: "'bob@' is not a valid email address".to_string(),
        }];
        let prompt = build_stage_prompt(
            InterviewStage::InfoGathering,
            &CandidateProfile::new(),
            &[ProfileField::Email],
            &issues,
        );
        assert!(prompt.contains("problem with email address: 'bob@'"));
    }

    #[test]
    fn test_transition_names_candidate_and_stack() {
        let mut profile = CandidateProfile::new();
        profile.set(ProfileField::Name, FieldValue::Text("Jane".to_string()));
        profile.set(
            ProfileField::TechStack,
            FieldValue::List(vec!["Rust".to_string(), "Docker".to_string()]),
        );
        let line = build_transition(&profile);
        assert!(line.starts_with("Thank you, Jane!"));
        assert!(line.ends_with("experience with Rust, Docker."));
    }

    #[test]
    fn test_question_prompt_substitutes_all_placeholders() {
        let prompt = build_question_prompt(&["Rust".to_string(), "Docker".to_string()], 3);
        assert!(prompt.contains("Generate 3 technical interview questions"));
        assert!(prompt.contains("Rust, Docker"));
        assert!(prompt.contains("numbered 1-3"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_evaluation_prompt_includes_question_and_answer() {
        let prompt = build_evaluation_prompt(&["Rust".to_string()], "What is ownership?", "Moves.");
        assert!(prompt.contains("QUESTION: What is ownership?"));
        assert!(prompt.contains("CANDIDATE'S ANSWER: Moves."));
        assert!(prompt.contains("\"follow_up\""));
    }

    #[test]
    fn test_placeholders_inside_values_are_left_alone() {
        let prompt = build_evaluation_prompt(
            &["Rust".to_string()],
            "What does format!(\"{answer}\") print?",
            "It prints the {question} binding.",
        );
        assert!(prompt.contains("QUESTION: What does format!(\"{answer}\") print?"));
        assert!(prompt.contains("CANDIDATE'S ANSWER: It prints the {question} binding."));
        assert_eq!(prompt.matches("It prints the").count(), 1);
        assert!(prompt.contains("{\n  \"assessment\""));
    }

    #[test]
    fn test_fill_keeps_unknown_braces() {
        assert_eq!(fill("{a} and {b}", &[("{a}", "x")]), "x and {b}");
        assert_eq!(fill("no braces", &[("{a}", "x")]), "no braces");
        assert_eq!(fill("{a}{a}", &[("{a}", "{a}")]), "{a}{a}");
    }
}
