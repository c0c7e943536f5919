use tracing::{info, warn};

use crate::context::AppContext;
use crate::domain::ticket::TicketDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReport {
    pub created: usize,
    pub attempted: usize,
}

/// Submits drafts one at a time, in input order. A failed draft is logged
/// and counted; the drafts after it are still attempted.
pub async fn submit_drafts(ctx: &AppContext, drafts: &[TicketDraft]) -> SubmissionReport {
    info!(
        team = %ctx.config.team_id,
        count = drafts.len(),
        "submitting ticket drafts"
    );

    let mut created = 0;
    for draft in drafts {
        match ctx.issue_tracker.create_ticket(draft).await {
            Ok(ticket) => {
                created += 1;
                info!(
                    id = %ticket.id,
                    title = %ticket.title,
                    url = ticket.url.as_deref().unwrap_or("<none>"),
                    "created ticket"
                );
            }
            Err(error) => {
                warn!(title = %draft.title, %error, "failed to create ticket");
            }
        }
    }

    SubmissionReport {
        created,
        attempted: drafts.len(),
    }
}
