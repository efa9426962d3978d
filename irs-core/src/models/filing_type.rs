use serde::{Deserialize, Serialize};

/// How a return was filed. Stored as the literal strings `Individual` and
/// `Joint`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilingType {
    Individual,
    Joint,
}

impl FilingType {
    pub const ALL: [FilingType; 2] = [FilingType::Individual, FilingType::Joint];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Joint => "Joint",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Individual" => Some(Self::Individual),
            "Joint" => Some(Self::Joint),
            _ => None,
        }
    }
}

impl std::fmt::Display for FilingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
