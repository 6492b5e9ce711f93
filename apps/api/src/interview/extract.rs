//! Field extraction: pulls the details a stage expects out of free text.
//!
//! Matching is deliberately shallow: anchored phrases and regexes. Anything
//! that looks like a field but fails validation becomes a `ValidationIssue`,
//! which the driver turns into a re-prompt instead of an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::interview::catalog::match_technologies;
use crate::interview::profile::{FieldValue, ProfileField};
use crate::interview::stage::InterviewStage;

const MAX_YEARS_OF_EXPERIENCE: u32 = 50;
const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,}\b").expect("valid regex")
});
static EMAIL_LIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S*").expect("valid regex"));
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\(?\d[\d\s().-]{4,}\d").expect("valid regex"));
static YEARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,3})(?:\.\d+)?\s*\+?\s*(?:years?|yrs?)\b").expect("valid regex")
});
static YEARS_LABELLED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bexperience\s*[:=-]\s*(\d{1,3})\b").expect("valid regex"));
static YEAR_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:19|20)\d{2}\s*[-–]\s*(?:19|20)\d{2}\b").expect("valid regex")
});
static POSITION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(?:desired\s+)?(?:position|role)\s*[:=-]\s*([^,.;\n]+)",
        r"(?i)\b(?:looking\s+for|seeking|interested\s+in|applying\s+for)\s+(?:an?\s+|the\s+)?([^,.;\n]+?)\s+(?:role|position|job|opening)\b",
        r"(?i)\b(?:applying\s+for|want\s+to\s+be)\s+(?:an?\s+|the\s+)?([^,.;\n]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});
static EDUCATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(?:education|degree)\s*[:=-]\s*([^;\n]+?)(?:[.;]\s|$|\n)",
        r"(?i)\b((?:b\.?sc?|m\.?sc?|ph\.?\s?d|bachelor'?s?|master'?s?|mba|associate'?s?)\b[^,.;\n]*)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});
static LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:based\s+in|located\s+in|living\s+in|live\s+in|location\s*[:=-])\s*([^,.;\n]+)")
        .expect("valid regex")
});
static NAME_INTRO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:my\s+name\s+is|my\s+name's|name\s*[:=-]|i\s+am|i'm|im|this\s+is|call\s+me)\s+([a-z][a-z'.-]*(?:\s+[a-z][a-z'.-]*){0,3})")
        .expect("valid regex")
});

/// Words that end a captured name ("I'm Jane and ..." → "Jane").
const NAME_STOP_WORDS: &[&str] = &[
    "and", "from", "here", "i", "im", "looking", "with", "a", "an", "the", "currently", "based",
    "living", "applying", "interested", "but", "so", "to", "at", "in", "excited", "happy",
    "glad", "new", "thrilled", "pleased",
];

/// Answers that are pleasantries rather than names.
const NON_NAMES: &[&str] = &[
    "hi", "hello", "hey", "hiya", "yo", "greetings", "good", "morning", "afternoon", "evening",
    "thanks", "thank", "you", "yes", "no", "ok", "okay", "sure", "fine", "great", "ready", "well",
    "start", "lets", "let's", "go", "please", "help", "excited", "happy", "glad", "new",
    "thrilled", "pleased",
];

/// A value that resembled a field but could not be accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub field: ProfileField,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub values: Vec<(ProfileField, FieldValue)>,
    pub issues: Vec<ValidationIssue>,
}

impl Extraction {
    fn push(&mut self, field: ProfileField, value: FieldValue) {
        self.values.push((field, value));
    }

    fn issue(&mut self, field: ProfileField, reason: impl Into<String>) {
        self.issues.push(ValidationIssue {
            field,
            reason: reason.into(),
        });
    }

    #[cfg(test)]
    pub fn get(&self, field: ProfileField) -> Option<&FieldValue> {
        self.values.iter().find(|(f, _)| *f == field).map(|(_, v)| v)
    }
}

/// Extracts the fields the given stage collects from one user message.
/// Stages that collect nothing return an empty extraction.
pub fn extract_fields(stage: InterviewStage, input: &str) -> Extraction {
    let mut extraction = Extraction::default();
    match stage {
        InterviewStage::Greeting => {
            if let Some(name) = extract_name(input) {
                extraction.push(ProfileField::Name, FieldValue::Text(name));
            }
        }
        InterviewStage::InfoGathering => extract_details(input, &mut extraction),
        InterviewStage::TechnicalQuestioning | InterviewStage::Closing => {}
    }
    extraction
}

fn extract_details(input: &str, extraction: &mut Extraction) {
    let without_email = match EMAIL.find(input) {
        Some(m) => {
            extraction.push(ProfileField::Email, FieldValue::Text(m.as_str().to_lowercase()));
            EMAIL.replace_all(input, " ").into_owned()
        }
        None => {
            if let Some(m) = EMAIL_LIKE.find(input) {
                extraction.issue(
                    ProfileField::Email,
                    format!("'{}' is not a valid email address", m.as_str()),
                );
            }
            EMAIL_LIKE.replace_all(input, " ").into_owned()
        }
    };

    match years_of_experience(&without_email) {
        Some(Ok(years)) => {
            extraction.push(ProfileField::YearsOfExperience, FieldValue::Number(years))
        }
        Some(Err(reason)) => extraction.issue(ProfileField::YearsOfExperience, reason),
        None => {}
    }

    // Year counts and year ranges are cut out so their digits never join a phone number.
    let mut phone_text = without_email;
    for pattern in [&*YEARS, &*YEARS_LABELLED, &*YEAR_RANGE] {
        phone_text = pattern.replace_all(&phone_text, " ").into_owned();
    }

    for candidate in PHONE.find_iter(&phone_text) {
        let raw = candidate.as_str().trim();
        let digits = raw.chars().filter(char::is_ascii_digit).count();
        if (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
            extraction.push(ProfileField::Phone, FieldValue::Text(raw.to_string()));
            break;
        } else if digits > MAX_PHONE_DIGITS || raw.starts_with(['+', '(']) {
            extraction.issue(
                ProfileField::Phone,
                format!("'{raw}' does not look like a phone number ({digits} digits)"),
            );
        }
    }

    if let Some(position) = first_capture(&POSITION_PATTERNS, input) {
        extraction.push(ProfileField::DesiredPosition, FieldValue::Text(position));
    }

    let technologies = match_technologies(input);
    if !technologies.is_empty() {
        extraction.push(ProfileField::TechStack, FieldValue::List(technologies));
    }

    if let Some(education) = first_capture(&EDUCATION_PATTERNS, input) {
        extraction.push(ProfileField::Education, FieldValue::Text(education));
    }

    if let Some(location) = LOCATION.captures(input).and_then(|c| c.get(1)) {
        let location = location.as_str().trim();
        if !location.is_empty() {
            extraction.push(ProfileField::Location, FieldValue::Text(location.to_string()));
        }
    }
}

fn years_of_experience(input: &str) -> Option<Result<u32, String>> {
    let captured = YEARS
        .captures(input)
        .or_else(|| YEARS_LABELLED.captures(input))
        .and_then(|c| c.get(1))?;

    let years: u32 = captured.as_str().parse().ok()?;
    if years > MAX_YEARS_OF_EXPERIENCE {
        Some(Err(format!(
            "{years} years of experience is outside the accepted range (0-{MAX_YEARS_OF_EXPERIENCE})"
        )))
    } else {
        Some(Ok(years))
    }
}

fn first_capture(patterns: &[Regex], input: &str) -> Option<String> {
    patterns.iter().find_map(|re| {
        re.captures(input)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    })
}

/// Finds the candidate's name in an introduction ("Hi, I'm Jane Doe") or a
/// short bare answer ("Jane Doe"). Pleasantries alone yield `None`.
pub fn extract_name(input: &str) -> Option<String> {
    if let Some(captured) = NAME_INTRO.captures(input).and_then(|c| c.get(1)) {
        let name = take_name_words(captured.as_str());
        if !name.is_empty() {
            return Some(name);
        }
    }

    let cleaned: String = input
        .chars()
        .map(|c| if c.is_alphabetic() || c == '\'' || c == '-' { c } else { ' ' })
        .collect();
    let words: Vec<&str> = cleaned.split_whitespace().collect();

    let looks_like_name = !words.is_empty()
        && words.len() <= 4
        && words
            .iter()
            .all(|w| !NON_NAMES.contains(&w.to_lowercase().as_str()));

    // A bare answer must be the whole message, without stray digits or '@'.
    let plain = input
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || matches!(c, '\'' | '-' | '.' | ','));

    (looks_like_name && plain).then(|| title_case(&words.join(" ")))
}

fn take_name_words(captured: &str) -> String {
    let words: Vec<&str> = captured
        .split_whitespace()
        .take_while(|w| !NAME_STOP_WORDS.contains(&w.to_lowercase().as_str()))
        .filter(|w| !NON_NAMES.contains(&w.to_lowercase().as_str()))
        .collect();
    title_case(&words.join(" "))
}

fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(input: &str) -> Extraction {
        extract_fields(InterviewStage::InfoGathering, input)
    }

    #[test]
    fn test_greeting_alone_has_no_name() {
        assert_eq!(extract_name("Hi"), None);
        assert_eq!(extract_name("Hello there!"), None);
        assert_eq!(extract_name("good morning"), None);
    }

    #[test]
    fn test_name_from_introduction() {
        assert_eq!(extract_name("Hi, I'm Jane Doe").as_deref(), Some("Jane Doe"));
        assert_eq!(extract_name("my name is alex kim").as_deref(), Some("Alex Kim"));
        assert_eq!(
            extract_name("Hello! This is Priya and I'm here for the interview").as_deref(),
            Some("Priya")
        );
    }

    #[test]
    fn test_feelings_are_not_names() {
        assert_eq!(extract_name("I'm excited to start"), None);
        assert_eq!(extract_name("I am happy to be here"), None);
        assert_eq!(extract_name("im new to this"), None);
        assert_eq!(extract_name("I'm Jane, glad to meet you").as_deref(), Some("Jane"));
    }

    #[test]
    fn test_bare_name_answer() {
        assert_eq!(extract_name("Sam Rivera").as_deref(), Some("Sam Rivera"));
    }

    #[test]
    fn test_sentence_with_digits_is_not_a_name() {
        assert_eq!(extract_name("route 66"), None);
        assert_eq!(extract_name("sam@example.com"), None);
    }

    #[test]
    fn test_greeting_stage_only_collects_name() {
        let extraction = extract_fields(InterviewStage::Greeting, "I'm Jo, jo@example.com");
        assert_eq!(extraction.values.len(), 1);
        assert_eq!(
            extraction.get(ProfileField::Name),
            Some(&FieldValue::Text("Jo".to_string()))
        );
    }

    #[test]
    fn test_full_details_message() {
        let extraction = info(
            "Email: Jane.Doe@Example.com, phone +1 (555) 123-4567. \
             I have 6 years of experience and I'm looking for a Senior Backend Engineer role. \
             Skills: Rust, PostgreSQL, Docker.",
        );

        assert_eq!(
            extraction.get(ProfileField::Email),
            Some(&FieldValue::Text("jane.doe@example.com".to_string()))
        );
        assert_eq!(
            extraction.get(ProfileField::Phone),
            Some(&FieldValue::Text("+1 (555) 123-4567".to_string()))
        );
        assert_eq!(
            extraction.get(ProfileField::YearsOfExperience),
            Some(&FieldValue::Number(6))
        );
        assert_eq!(
            extraction.get(ProfileField::DesiredPosition),
            Some(&FieldValue::Text("Senior Backend Engineer".to_string()))
        );
        assert_eq!(
            extraction.get(ProfileField::TechStack),
            Some(&FieldValue::List(vec![
                "Rust".to_string(),
                "Docker".to_string(),
                "PostgreSQL".to_string(),
            ]))
        );
        assert!(extraction.issues.is_empty(), "{:?}", extraction.issues);
    }

    #[test]
    fn test_invalid_email_is_reported_not_stored() {
        let extraction = info("you can reach me at bob@ anytime");
        assert!(extraction.get(ProfileField::Email).is_none());
        assert_eq!(extraction.issues.len(), 1);
        assert_eq!(extraction.issues[0].field, ProfileField::Email);
        assert!(extraction.issues[0].reason.contains("bob@"));
    }

    #[test]
    fn test_years_out_of_range_is_an_issue() {
        let extraction = info("I have 70 years of experience");
        assert!(extraction.get(ProfileField::YearsOfExperience).is_none());
        assert_eq!(extraction.issues[0].field, ProfileField::YearsOfExperience);
    }

    #[test]
    fn test_labelled_experience() {
        let extraction = info("Experience: 3, Position: Data Engineer");
        assert_eq!(
            extraction.get(ProfileField::YearsOfExperience),
            Some(&FieldValue::Number(3))
        );
        assert_eq!(
            extraction.get(ProfileField::DesiredPosition),
            Some(&FieldValue::Text("Data Engineer".to_string()))
        );
    }

    #[test]
    fn test_short_digit_runs_are_not_phones() {
        let extraction = info("I worked 3 jobs in 12 months");
        assert!(extraction.get(ProfileField::Phone).is_none());
        assert!(extraction.issues.is_empty());
    }

    #[test]
    fn test_years_count_does_not_join_phone_number() {
        let extraction = info("jane@example.com 555-123-4567 5 years of experience");
        assert_eq!(
            extraction.get(ProfileField::Phone),
            Some(&FieldValue::Text("555-123-4567".to_string()))
        );
        assert_eq!(
            extraction.get(ProfileField::YearsOfExperience),
            Some(&FieldValue::Number(5))
        );
    }

    #[test]
    fn test_year_range_is_not_a_phone() {
        let extraction = info("I studied at MIT 2015-2019 and know Rust");
        assert!(extraction.get(ProfileField::Phone).is_none());
        assert!(extraction.issues.is_empty());

        let extraction = info("Worked there 2018 – 2023, phone (555) 987-6543");
        assert_eq!(
            extraction.get(ProfileField::Phone),
            Some(&FieldValue::Text("(555) 987-6543".to_string()))
        );
    }

    #[test]
    fn test_education_and_location() {
        let extraction = info("Education: BSc in Computer Science. Based in Berlin, Germany.");
        assert_eq!(
            extraction.get(ProfileField::Education),
            Some(&FieldValue::Text("BSc in Computer Science".to_string()))
        );
        assert_eq!(
            extraction.get(ProfileField::Location),
            Some(&FieldValue::Text("Berlin".to_string()))
        );
    }

    #[test]
    fn test_technical_stage_extracts_nothing() {
        let extraction = extract_fields(InterviewStage::TechnicalQuestioning, "I use Rust daily");
        assert!(extraction.values.is_empty());
    }
}
