use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The user-initiated chain actions that are tracked by cooldowns and the activity log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionKind {
    /// A self-addressed transfer carrying a greeting in its calldata.
    #[serde(rename = "GM")]
    Greet,
    /// Deployment of the bundled mock contract.
    #[serde(rename = "DEPLOY")]
    Deploy,
}

impl ActionKind {
    /// All action kinds, in display order.
    pub const ALL: [Self; 2] = [Self::Greet, Self::Deploy];

    /// The persisted tag of this action.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Greet => "GM",
            Self::Deploy => "DEPLOY",
        }
    }

    /// Label shown in the activity list.
    pub const fn activity_label(&self) -> &'static str {
        match self {
            Self::Greet => "Sent GM",
            Self::Deploy => "Deployed Contract",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gm" | "greet" | "greeting" => Ok(Self::Greet),
            "deploy" => Ok(Self::Deploy),
            _ => Err(format!("unknown action: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_tags() {
        assert_eq!(serde_json::to_string(&ActionKind::Greet).unwrap(), r#""GM""#);
        assert_eq!(serde_json::from_str::<ActionKind>(r#""DEPLOY""#).unwrap(), ActionKind::Deploy);
        assert_eq!("greet".parse::<ActionKind>().unwrap(), ActionKind::Greet);
        assert!("swap".parse::<ActionKind>().is_err());
    }
}
