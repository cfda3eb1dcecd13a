use std::fmt;

/// Training level label shared by exercises and workout templates.
///
/// Unknown labels are kept verbatim so that free-text values entered elsewhere
/// survive a round trip through storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Other(String),
}

impl Difficulty {
    pub const KNOWN: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    /// Parses a label case-insensitively; blank input yields `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let level = match trimmed.to_ascii_lowercase().as_str() {
            "beginner" => Self::Beginner,
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::Other(trimmed.to_owned()),
        };
        Some(level)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_levels_case_insensitively() {
        assert_eq!(Difficulty::parse("advanced"), Some(Difficulty::Advanced));
        assert_eq!(Difficulty::parse(" Beginner "), Some(Difficulty::Beginner));
    }

    #[test]
    fn parse_keeps_unknown_labels() {
        assert_eq!(
            Difficulty::parse("Elite"),
            Some(Difficulty::Other("Elite".into()))
        );
        assert_eq!(Difficulty::parse("   "), None);
    }
}
