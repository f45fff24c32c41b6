// A single committed draw: who gives to whom.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One (giver, receiver) pair. Sessions keep these in draw order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// The participant who drew.
    pub giver: String,
    /// The participant drawn, who becomes the next drawer.
    pub receiver: String,
}

impl Assignment {
    pub fn new(giver: impl Into<String>, receiver: impl Into<String>) -> Self {
        Assignment {
            giver: giver.into(),
            receiver: receiver.into(),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.giver, self.receiver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_arrow() {
        let a = Assignment::new("Ming", "Hua");
        assert_eq!(a.to_string(), "Ming -> Hua");
    }

    #[test]
    fn serializes_with_named_fields() {
        let a = Assignment::new("A", "B");
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, r#"{"giver":"A","receiver":"B"}"#);
    }
}
