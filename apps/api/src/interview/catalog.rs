//! Tech-stack catalog offered to candidates and used to recognise skills in
//! free-text answers.

pub const TECH_STACK_OPTIONS: &[&str] = &[
    "Python", "JavaScript", "TypeScript", "Java", "C#", "C++", "Go",
    "Ruby", "PHP", "Swift", "Kotlin", "Rust", "Scala",
    "React", "Angular", "Vue.js", "Node.js", "Express.js", "Django", "Flask",
    "Spring Boot", "ASP.NET", "Ruby on Rails", "Laravel",
    "AWS", "Azure", "Google Cloud", "Docker", "Kubernetes", "Terraform",
    "SQL", "MongoDB", "PostgreSQL", "MySQL", "Redis", "Elasticsearch",
    "TensorFlow", "PyTorch", "Scikit-learn", "Pandas", "NumPy",
    "Git", "Jenkins", "CircleCI", "GitHub Actions", "Travis CI",
    "GraphQL", "REST API", "gRPC", "WebSockets",
];

/// Names this short are matched case-sensitively ("Go" but not "go").
const CASE_SENSITIVE_MAX_LEN: usize = 2;

/// Returns catalog entries mentioned in `input`, in catalog order.
///
/// A mention must stand on its own: the characters around it may not be
/// alphanumeric, so "Java" is not found inside "JavaScript" and "SQL" is not
/// found inside "PostgreSQL".
pub fn match_technologies(input: &str) -> Vec<String> {
    let lowered = input.to_lowercase();

    TECH_STACK_OPTIONS
        .iter()
        .filter(|tech| {
            if tech.len() <= CASE_SENSITIVE_MAX_LEN {
                contains_standalone(input, tech)
            } else {
                contains_standalone(&lowered, &tech.to_lowercase())
            }
        })
        .map(|tech| tech.to_string())
        .collect()
}

fn contains_standalone(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(is_word_continuation)
    })
}

/// "C" followed by "#" or "+" continues the token, as do letters and digits.
fn is_word_continuation(c: char) -> bool {
    c.is_alphanumeric() || c == '#' || c == '+'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_case_insensitively() {
        let found = match_technologies("I mostly write python and rust, deploy with docker");
        assert_eq!(found, vec!["Python", "Rust", "Docker"]);
    }

    #[test]
    fn test_java_not_found_inside_javascript() {
        let found = match_technologies("JavaScript and TypeScript");
        assert_eq!(found, vec!["JavaScript", "TypeScript"]);
    }

    #[test]
    fn test_sql_not_found_inside_postgresql() {
        assert_eq!(match_technologies("PostgreSQL"), vec!["PostgreSQL"]);
    }

    #[test]
    fn test_short_names_are_case_sensitive() {
        assert!(match_technologies("I go to the gym").is_empty());
        assert_eq!(match_technologies("Go and Kubernetes"), vec!["Go", "Kubernetes"]);
    }

    #[test]
    fn test_symbols_in_names() {
        let found = match_technologies("C++, C#, Node.js and ASP.NET");
        assert_eq!(found, vec!["C#", "C++", "Node.js", "ASP.NET"]);
    }

    #[test]
    fn test_git_not_found_inside_github_actions() {
        assert_eq!(match_technologies("GitHub Actions"), vec!["GitHub Actions"]);
    }
}
