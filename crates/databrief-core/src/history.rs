//! Session history entries as reported by the analysis service.

use serde::{Deserialize, Serialize};

/// The author of one recorded exchange turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The user's query.
    User,
    /// The assistant's summary. The service historically writes this
    /// role as `"ai"`, so both spellings decode.
    #[serde(alias = "ai")]
    Assistant,
}

/// One recorded turn in the session's exchange log.
///
/// The log is append-only and chronological on the service side; the
/// client only ever holds a wholesale snapshot of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The role of the message author.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_ai_role() {
        let entries: Vec<HistoryEntry> = serde_json::from_str(
            r#"[
                {"role": "user", "content": "Analyze Q1 revenue"},
                {"role": "ai", "content": "Revenue grew 12%"}
            ]"#,
        )
        .unwrap();

        assert_eq!(entries[0].role, MessageRole::User);
        assert_eq!(entries[1].role, MessageRole::Assistant);
    }

    #[test]
    fn serializes_assistant_role_canonically() {
        let entry = HistoryEntry {
            role: MessageRole::Assistant,
            content: "ok".into(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""role":"assistant""#));
    }
}
