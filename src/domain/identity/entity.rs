use serde::{Deserialize, Serialize};
use std::fmt;

/// A professor identity derived from one scraped display string.
///
/// Built once by the name parser and never mutated afterwards. The serde
/// shape is the one carried across the messaging boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedIdentity {
    /// Cleaned display text, exactly as shown to the user
    pub display: String,

    /// Given name, possibly with trailing punctuation ("J.")
    #[serde(default)]
    pub first: String,

    /// Single upper-case letter, or empty
    #[serde(default)]
    pub first_initial: String,

    /// Surname, possibly several words ("Sadoghi Hamedani")
    #[serde(default)]
    pub last: String,

    /// Placeholder names ("Staff", "TBA") are never resolved
    #[serde(default)]
    pub skip: bool,
}

impl ParsedIdentity {
    pub fn new(display: String, first: String, first_initial: String, last: String) -> Self {
        Self {
            display,
            first,
            first_initial,
            last,
            skip: false,
        }
    }

    /// Identity for a placeholder name
    pub fn placeholder(display: String) -> Self {
        Self {
            display,
            first: String::new(),
            first_initial: String::new(),
            last: String::new(),
            skip: true,
        }
    }

    /// The free-text query sent to the search service
    pub fn search_text(&self) -> &str {
        if self.last.is_empty() {
            &self.display
        } else {
            &self.last
        }
    }

    pub fn key(&self) -> IdentityKey {
        IdentityKey::from_identity(self)
    }
}

/// Normalized cache key for a professor identity.
///
/// Lower-cased `initial|last|display`, each part trimmed with internal
/// whitespace collapsed. `|` never appears in a display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub const DELIMITER: &str = "|";

    pub fn from_identity(identity: &ParsedIdentity) -> Self {
        let parts = [
            collapse(&identity.first_initial),
            collapse(&identity.last),
            collapse(&identity.display),
        ];
        let joined = parts.join(Self::DELIMITER);
        Self(joined.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
