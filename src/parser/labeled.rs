use crate::domain::ticket::{Priority, TicketDraft};

/// Splits the content on blank lines and reads `Title:`, `Description:` and
/// `Priority:` lines out of each block. Blocks without a title are dropped.
pub(super) fn parse(content: &str) -> Vec<TicketDraft> {
    let mut drafts = Vec::new();

    for block in content.split("\n\n") {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }

        let mut title = String::new();
        let mut description = String::new();
        let mut priority = Priority::Medium;

        for line in block.lines() {
            if let Some(rest) = line.strip_prefix("Title:") {
                title = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix("Description:") {
                description = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix("Priority:") {
                if let Some(level) = Priority::from_str(rest) {
                    priority = level;
                }
            }
        }

        if !title.is_empty() {
            drafts.push(TicketDraft {
                title,
                description,
                priority,
            });
        }
    }

    drafts
}
