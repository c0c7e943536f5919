use crate::domain::ticket::{Priority, TicketDraft};

/// Scanned top to bottom; the first level with a keyword hit wins.
const PRIORITY_KEYWORDS: [(Priority, &[&str]); 4] = [
    (Priority::Urgent, &["urgent", "critical", "highest"]),
    (Priority::High, &["high", "important"]),
    (Priority::Medium, &["medium", "normal"]),
    (Priority::Low, &["low", "minor"]),
];

pub(super) fn applies(content: &str) -> bool {
    content.contains("# ")
}

/// One draft per "# " section: first line is the title, the rest the
/// description, priority inferred from keywords in the description.
pub(super) fn parse(content: &str) -> Vec<TicketDraft> {
    let mut drafts = Vec::new();

    for section in content.split("# ").skip(1) {
        let section = section.trim();
        if section.is_empty() {
            continue;
        }

        let mut lines = section.lines();
        let title = lines.next().unwrap_or_default().trim().to_string();
        let description = lines.collect::<Vec<_>>().join("\n").trim().to_string();
        let priority = infer_priority(&description);

        drafts.push(TicketDraft {
            title,
            description,
            priority,
        });
    }

    drafts
}

fn infer_priority(description: &str) -> Priority {
    let haystack = description.to_lowercase();
    PRIORITY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| haystack.contains(keyword)))
        .map(|(level, _)| *level)
        .unwrap_or(Priority::Medium)
}
