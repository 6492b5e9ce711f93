use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interview::profile::CandidateProfile;
use crate::interview::prompts::GREETING_MESSAGE;
use crate::interview::stage::InterviewStage;
use crate::llm_client::ChatMessage;

/// One answered technical question and the model's evaluation of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: String,
    pub answer: String,
    pub assessment: String,
    pub follow_up: String,
}

/// Everything one candidate conversation has accumulated.
///
/// The driver never mutates a session in place: each turn produces a new
/// value, and the store swaps it in only when the turn succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSession {
    pub id: Uuid,
    pub profile: CandidateProfile,
    pub stage: InterviewStage,
    pub transcript: Vec<ChatMessage>,
    pub questions: Vec<String>,
    pub question_index: usize,
    pub answers: Vec<AnswerRecord>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl InterviewSession {
    /// A fresh session at the greeting stage, with the greeting as the first
    /// transcript entry.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            profile: CandidateProfile::new(),
            stage: InterviewStage::Greeting,
            transcript: vec![ChatMessage::assistant(GREETING_MESSAGE)],
            questions: Vec::new(),
            question_index: 0,
            answers: Vec::new(),
            created_at: now,
            last_active: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    /// True once the session has been idle for longer than `ttl`.
    pub fn is_stale(&self, ttl: Duration) -> bool {
        Utc::now() - self.last_active > ttl
    }

    /// The question awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&str> {
        if self.stage != InterviewStage::TechnicalQuestioning {
            return None;
        }
        self.questions.get(self.question_index).map(String::as_str)
    }
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new()
    }
}
