//! Conversation Driver: the interview state machine.
//!
//! ARCHITECTURAL RULE: `advance` takes the current session by reference and
//! returns the next one. Nothing is written until the whole turn, including
//! every provider call, has succeeded; on `BridgeError` the caller still holds
//! the untouched session and the candidate can simply retry.

use std::sync::Arc;

use tracing::info;

use crate::interview::extract::{extract_fields, ValidationIssue};
use crate::interview::profile::ProfileField;
use crate::interview::prompts::{
    build_stage_prompt, build_transition, CLOSED_NOTICE, FALLBACK_QUESTION,
};
use crate::interview::questions::{evaluate_answer, generate_questions};
use crate::interview::session::{AnswerRecord, InterviewSession};
use crate::interview::stage::InterviewStage;
use crate::llm_client::{
    BridgeError, ChatMessage, GenerateOptions, Prompt, ProviderBridge, ProviderKind,
};

const CONVERSATION_OPTIONS: GenerateOptions = GenerateOptions::text(500, 0.7);

/// Result of one successful turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub session: InterviewSession,
    pub reply: String,
    /// Provider that produced the last generated text; `None` when the reply
    /// was fixed text.
    pub provider: Option<ProviderKind>,
}

pub struct ConversationDriver {
    bridge: Arc<ProviderBridge>,
    max_technical_questions: usize,
}

impl ConversationDriver {
    pub fn new(bridge: Arc<ProviderBridge>, max_technical_questions: usize) -> Self {
        Self {
            bridge,
            max_technical_questions: max_technical_questions.max(1),
        }
    }

    pub fn bridge(&self) -> &ProviderBridge {
        &self.bridge
    }

    /// Applies one user message to `session` and returns the next session
    /// together with the assistant reply.
    pub async fn advance(
        &self,
        session: &InterviewSession,
        user_input: &str,
    ) -> Result<TurnOutcome, BridgeError> {
        if session.stage.is_terminal() {
            return Ok(TurnOutcome {
                session: session.clone(),
                reply: CLOSED_NOTICE.to_string(),
                provider: None,
            });
        }

        let mut next = session.clone();
        next.transcript.push(ChatMessage::user(user_input));

        let (reply, provider) = match next.stage {
            InterviewStage::Greeting | InterviewStage::InfoGathering => {
                self.collect_details(&mut next, user_input).await?
            }
            InterviewStage::TechnicalQuestioning => {
                self.answer_question(&mut next, user_input).await?
            }
            InterviewStage::Closing => (CLOSED_NOTICE.to_string(), None),
        };

        next.transcript.push(ChatMessage::assistant(reply.as_str()));

        info!(
            session_id = %next.id,
            from = session.stage.label(),
            to = next.stage.label(),
            fields = next.profile.len(),
            "interview turn completed"
        );

        Ok(TurnOutcome {
            session: next,
            reply,
            provider,
        })
    }

    /// Greeting and info-gathering turns: record extracted fields, then either
    /// move on or re-prompt for whatever is still missing.
    async fn collect_details(
        &self,
        session: &mut InterviewSession,
        user_input: &str,
    ) -> Result<(String, Option<ProviderKind>), BridgeError> {
        let extraction = extract_fields(session.stage, user_input);
        for (field, value) in extraction.values {
            session.profile.set(field, value);
        }

        let missing = session.profile.missing(session.stage.required_fields());
        if !missing.is_empty() {
            return self
                .converse(session, &missing, &extraction.issues)
                .await
                .map(|(reply, kind)| (reply, Some(kind)));
        }

        match session.stage {
            InterviewStage::Greeting => {
                session.stage = InterviewStage::InfoGathering;
                self.converse(session, &[], &[])
                    .await
                    .map(|(reply, kind)| (reply, Some(kind)))
            }
            _ => self.start_technical(session).await,
        }
    }

    async fn start_technical(
        &self,
        session: &mut InterviewSession,
    ) -> Result<(String, Option<ProviderKind>), BridgeError> {
        let (mut questions, provider) = generate_questions(
            &self.bridge,
            session.profile.tech_stack(),
            self.max_technical_questions,
        )
        .await?;

        if questions.is_empty() {
            questions.push(FALLBACK_QUESTION.to_string());
        }
        questions.truncate(self.max_technical_questions);

        let reply = format!("{}\n\n{}", build_transition(&session.profile), questions[0]);
        session.stage = InterviewStage::TechnicalQuestioning;
        session.questions = questions;
        session.question_index = 0;

        Ok((reply, Some(provider)))
    }

    async fn answer_question(
        &self,
        session: &mut InterviewSession,
        answer: &str,
    ) -> Result<(String, Option<ProviderKind>), BridgeError> {
        let question = session
            .current_question()
            .unwrap_or(FALLBACK_QUESTION)
            .to_string();

        let (evaluation, mut provider) = evaluate_answer(
            &self.bridge,
            session.profile.tech_stack(),
            &question,
            answer,
        )
        .await?;

        let feedback = format!("{} {}", evaluation.response, evaluation.follow_up);
        session.answers.push(AnswerRecord {
            question,
            answer: answer.to_string(),
            assessment: evaluation.assessment,
            follow_up: evaluation.follow_up,
        });
        session.question_index += 1;

        let limit = session.questions.len().min(self.max_technical_questions);
        let reply = if session.answers.len() >= limit {
            session.stage = InterviewStage::Closing;
            let (conclusion, kind) = self.converse(session, &[], &[]).await?;
            provider = kind;
            format!("{feedback}\n\n{conclusion}")
        } else {
            let next_question = session
                .current_question()
                .unwrap_or(FALLBACK_QUESTION);
            format!("{feedback}\n\n{next_question}")
        };

        Ok((reply, Some(provider)))
    }

    /// Generates a conversational reply from the stage template and the
    /// transcript so far.
    async fn converse(
        &self,
        session: &InterviewSession,
        missing: &[ProfileField],
        issues: &[ValidationIssue],
    ) -> Result<(String, ProviderKind), BridgeError> {
        let system = build_stage_prompt(session.stage, &session.profile, missing, issues);
        let prompt = Prompt::new(system, session.transcript.clone());
        let response = self.bridge.generate(&prompt, &CONVERSATION_OPTIONS).await?;
        Ok((response.text.trim().to_string(), response.provider))
    }
}
