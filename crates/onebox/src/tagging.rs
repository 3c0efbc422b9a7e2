//! Keyword-based smart tag suggestions
//!
//! Tags are suggested from a thread's subject and body. They are client-only
//! annotations and are never sent to the server.

use serde::{Deserialize, Serialize};

/// Visual category of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Urgent,
    Work,
    Personal,
    Document,
}

/// A suggested tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: TagKind,
}

struct Rule {
    tag: Tag,
    keywords: &'static [&'static str],
}

/// Rules in suggestion order
const RULES: &[Rule] = &[
    Rule {
        tag: Tag {
            id: "urgent",
            name: "Urgent",
            kind: TagKind::Urgent,
        },
        keywords: &["urgent", "asap", "immediately", "emergency", "deadline", "critical"],
    },
    Rule {
        tag: Tag {
            id: "work",
            name: "Work",
            kind: TagKind::Work,
        },
        keywords: &["meeting", "project", "report", "client", "deadline", "task", "team"],
    },
    Rule {
        tag: Tag {
            id: "document",
            name: "Document",
            kind: TagKind::Document,
        },
        keywords: &[
            "document",
            "file",
            "attachment",
            "pdf",
            "report",
            "presentation",
            "spreadsheet",
        ],
    },
    Rule {
        tag: Tag {
            id: "followup",
            name: "Follow Up",
            kind: TagKind::Personal,
        },
        keywords: &["follow up", "followup", "check back", "reminder", "get back"],
    },
];

/// Suggest tags for a message.
///
/// Matching is case-insensitive substring search over subject and body.
/// Each tag appears at most once, in rule order.
pub fn suggest_tags(subject: &str, body: &str) -> Vec<Tag> {
    let subject = subject.to_lowercase();
    let body = body.to_lowercase();

    RULES
        .iter()
        .filter(|rule| {
            rule.keywords
                .iter()
                .any(|kw| subject.contains(kw) || body.contains(kw))
        })
        .map(|rule| rule.tag.clone())
        .collect()
}
