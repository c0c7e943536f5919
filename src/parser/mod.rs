mod headings;
mod labeled;
mod numbered;

use tracing::{debug, info};

use crate::domain::ticket::{Priority, TicketDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Headings,
    NumberedList,
    LabeledBlocks,
}

/// Picks the first applicable strategy; exactly one ever runs on a given
/// input, so the heuristics never blend.
fn select_strategy(content: &str) -> Strategy {
    if headings::applies(content) {
        Strategy::Headings
    } else if numbered::applies(content) {
        Strategy::NumberedList
    } else {
        Strategy::LabeledBlocks
    }
}

/// Extracts ticket drafts from generated content. Total: malformed input
/// degrades to a single whole-content draft, blank input to no drafts at
/// all. Every draft carries a non-empty title.
pub fn parse(content: &str) -> Vec<TicketDraft> {
    debug!(raw = content, "parsing generated ticket content");

    let strategy = select_strategy(content);
    let mut drafts = match strategy {
        Strategy::Headings => headings::parse(content),
        Strategy::NumberedList => numbered::parse(content),
        Strategy::LabeledBlocks => labeled::parse(content),
    };

    if drafts.is_empty() && !content.trim().is_empty() {
        drafts.push(fallback_draft(content));
    }

    info!(count = drafts.len(), ?strategy, "parsed ticket drafts");
    for (index, draft) in drafts.iter().enumerate() {
        debug!(index, title = %draft.title, priority = draft.priority.as_str(), "ticket draft");
    }

    drafts
}

fn fallback_draft(content: &str) -> TicketDraft {
    TicketDraft {
        title: fallback_title(content),
        description: content.to_string(),
        priority: Priority::Medium,
    }
}

fn fallback_title(content: &str) -> String {
    let first_line = content.trim().lines().next().unwrap_or_default().trim();

    let length = first_line.chars().count();
    if length > 10 && length < 100 {
        return first_line.to_string();
    }

    // First sentence of the raw content; when the content opens with a
    // period that segment is empty, and the first line stands in so the
    // title stays non-empty.
    let sentence = content.split('.').next().unwrap_or_default().trim();
    let candidate = if sentence.is_empty() {
        first_line
    } else {
        sentence
    };
    truncate_title(candidate)
}

fn truncate_title(text: &str) -> String {
    if text.chars().count() <= 100 {
        return text.to_string();
    }
    let head: String = text.chars().take(97).collect();
    format!("{head}...")
}
