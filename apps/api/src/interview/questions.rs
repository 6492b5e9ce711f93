//! Technical question generation and answer evaluation.
//!
//! Both calls go through the Provider Bridge. Model output is parsed
//! leniently: an unusable question list becomes an empty Vec (the driver
//! substitutes a fallback question) and unparseable evaluation JSON becomes
//! a neutral default, so neither ever fails a turn on its own.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::interview::prompts::{build_evaluation_prompt, build_question_prompt};
use crate::llm_client::prompts::{INTERVIEWER_JSON_SYSTEM, INTERVIEWER_SYSTEM};
use crate::llm_client::{
    strip_json_fences, BridgeError, GenerateOptions, Prompt, ProviderBridge, ProviderKind,
};

const QUESTION_OPTIONS: GenerateOptions = GenerateOptions::text(800, 0.7);
const EVALUATION_OPTIONS: GenerateOptions = GenerateOptions::json(500, 0.5);

/// "1. What is...", "2) Explain...", "**3.** Describe..."
static NUMBERED_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:\*\*)?\d{1,2}\s*[.):](?:\*\*)?\s*(.+?)\s*$").expect("valid regex")
});

/// Parses a numbered list, keeping at most `limit` non-empty questions.
/// Lines that are not numbered (preambles, blank lines) are skipped.
pub fn parse_question_list(text: &str, limit: usize) -> Vec<String> {
    text.lines()
        .filter_map(|line| NUMBERED_LINE.captures(line))
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim_matches('*').trim().to_string())
        .filter(|q| !q.is_empty())
        .take(limit)
        .collect()
}

/// Structured feedback on one technical answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(default)]
    pub assessment: String,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub follow_up: String,
}

impl Default for Evaluation {
    fn default() -> Self {
        Self {
            assessment: "Unable to evaluate response.".to_string(),
            response: "Thank you for your answer.".to_string(),
            follow_up: "Could you elaborate more on your approach?".to_string(),
        }
    }
}

/// Parses evaluation JSON (optionally fenced). Missing or blank fields are
/// filled from the default evaluation; invalid JSON yields the default.
pub fn parse_evaluation(text: &str) -> Evaluation {
    let fallback = Evaluation::default();
    match serde_json::from_str::<Evaluation>(strip_json_fences(text)) {
        Ok(parsed) => Evaluation {
            assessment: non_blank(parsed.assessment, fallback.assessment),
            response: non_blank(parsed.response, fallback.response),
            follow_up: non_blank(parsed.follow_up, fallback.follow_up),
        },
        Err(e) => {
            warn!(error = %e, "evaluation response was not valid JSON, using default");
            fallback
        }
    }
}

fn non_blank(value: String, fallback: String) -> String {
    if value.trim().is_empty() {
        fallback
    } else {
        value.trim().to_string()
    }
}

/// Asks the bridge for up to `count` questions about `tech_stack`.
pub async fn generate_questions(
    bridge: &ProviderBridge,
    tech_stack: &[String],
    count: usize,
) -> Result<(Vec<String>, ProviderKind), BridgeError> {
    let prompt = Prompt::single(INTERVIEWER_SYSTEM, build_question_prompt(tech_stack, count));
    let response = bridge.generate(&prompt, &QUESTION_OPTIONS).await?;

    let questions = parse_question_list(&response.text, count);
    if questions.is_empty() {
        warn!(provider = %response.provider, "question generation returned no numbered questions");
    }
    Ok((questions, response.provider))
}

pub async fn evaluate_answer(
    bridge: &ProviderBridge,
    tech_stack: &[String],
    question: &str,
    answer: &str,
) -> Result<(Evaluation, ProviderKind), BridgeError> {
    let prompt = Prompt::single(
        INTERVIEWER_JSON_SYSTEM,
        build_evaluation_prompt(tech_stack, question, answer),
    );
    let response = bridge.generate(&prompt, &EVALUATION_OPTIONS).await?;
    Ok((parse_evaluation(&response.text), response.provider))
}
