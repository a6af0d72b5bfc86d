// Display-name parsing.
//
// Course pages print instructor names in several shapes: directory style
// ("Smith, John"), initial plus surname ("J. Smith"), or plain "John Smith".
// Patterns are tried most-specific first; there is no full name grammar.

use regex::Regex;
use std::sync::OnceLock;

use super::entity::ParsedIdentity;

/// Lower-cased names that stand in for an unassigned instructor
pub const PLACEHOLDER_NAMES: &[&str] = &["staff", "the staff", "tba", "tbd", "instructor"];

/// Ordered parsing rules for scraped instructor names
pub struct NameRules {
    /// A bare initial such as "J" or "J."
    initial_pattern: Regex,

    placeholder_names: &'static [&'static str],
}

impl Default for NameRules {
    fn default() -> Self {
        Self {
            initial_pattern: Regex::new(r"^([A-Za-z])\.?$").unwrap(),
            placeholder_names: PLACEHOLDER_NAMES,
        }
    }
}

impl NameRules {
    /// Parse one raw display string. `None` when nothing is left after cleaning.
    pub fn parse(&self, raw: &str) -> Option<ParsedIdentity> {
        let name = clean_display_name(raw);
        if name.is_empty() {
            return None;
        }

        if self.is_placeholder(&name) {
            return Some(ParsedIdentity::placeholder(name));
        }

        if name.contains(',') {
            return Some(Self::parse_directory_form(name));
        }

        let tokens: Vec<&str> = name.split(' ').collect();

        if let Some(initial) = self.leading_initial(tokens[0]) {
            let last = tokens[1..].join(" ");
            return Some(ParsedIdentity::new(name, String::new(), initial, last));
        }

        if tokens.len() >= 2 {
            let first = tokens[0].to_string();
            let initial = initial_of(&first);
            let last = tokens[1..].join(" ");
            return Some(ParsedIdentity::new(name, first, initial, last));
        }

        Some(ParsedIdentity::new(
            name.clone(),
            String::new(),
            String::new(),
            name,
        ))
    }

    pub fn is_placeholder(&self, cleaned: &str) -> bool {
        let lowered = cleaned.to_lowercase();
        self.placeholder_names.contains(&lowered.as_str())
    }

    /// "Last, First Middle" — the surname is everything before the first
    /// comma and the given name is the first token of the next segment.
    fn parse_directory_form(name: String) -> ParsedIdentity {
        let mut segments = name.split(',').map(str::trim);
        let last = segments.next().unwrap_or_default().to_string();
        let first = segments
            .next()
            .and_then(|segment| segment.split(' ').find(|t| !t.is_empty()))
            .unwrap_or_default()
            .to_string();
        let initial = initial_of(&first);
        ParsedIdentity::new(name, first, initial, last)
    }

    fn leading_initial(&self, token: &str) -> Option<String> {
        self.initial_pattern
            .captures(token)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_uppercase())
    }
}

/// Collapse every whitespace run (non-breaking spaces included) to one
/// space and trim the ends.
pub fn clean_display_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse with the default rules.
pub fn parse_professor_name(raw: &str) -> Option<ParsedIdentity> {
    static RULES: OnceLock<NameRules> = OnceLock::new();
    RULES.get_or_init(NameRules::default).parse(raw)
}

fn initial_of(first: &str) -> String {
    first
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}
