use crate::domain::ticket::{Priority, TicketDraft};

pub(super) fn applies(content: &str) -> bool {
    content.lines().any(|line| is_item_marker(line.trim()))
}

// A single digit 1-9 immediately followed by a period, e.g. "3. Ship it".
fn is_item_marker(line: &str) -> bool {
    let mut chars = line.chars();
    matches!(chars.next(), Some('1'..='9')) && chars.next() == Some('.')
}

/// Accumulates drafts line by line: a marker line starts a new draft titled
/// with the text after the first period, every other non-empty line extends
/// the current description. Lines before the first marker are ignored.
pub(super) fn parse(content: &str) -> Vec<TicketDraft> {
    let mut drafts = Vec::new();
    let mut current: Option<TicketDraft> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if is_item_marker(line) {
            flush(&mut drafts, current.take());
            let title = line
                .split_once('.')
                .map(|(_, rest)| rest)
                .unwrap_or_default()
                .trim()
                .to_string();
            current = Some(TicketDraft {
                title,
                description: String::new(),
                priority: Priority::Medium,
            });
        } else if let Some(draft) = current.as_mut() {
            draft.description.push_str(line);
            draft.description.push('\n');
            apply_priority_override(draft, line);
        }
    }

    flush(&mut drafts, current.take());
    drafts
}

// The checks run in sequence and a later match overwrites an earlier one: a
// line naming both "high" and "urgent" lands on urgent, and "low" beats
// everything on its line.
fn apply_priority_override(draft: &mut TicketDraft, line: &str) {
    let lower = line.to_lowercase();
    if !lower.contains("priority") {
        return;
    }

    if lower.contains("high") {
        draft.priority = Priority::High;
    }
    if lower.contains("urgent") || lower.contains("critical") {
        draft.priority = Priority::Urgent;
    }
    if lower.contains("low") {
        draft.priority = Priority::Low;
    }
}

fn flush(drafts: &mut Vec<TicketDraft>, current: Option<TicketDraft>) {
    if let Some(draft) = current {
        if !draft.title.is_empty() {
            drafts.push(draft);
        }
    }
}
