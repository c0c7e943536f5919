use crate::context::AppContext;
use crate::domain::ticket::TicketDraft;
use crate::workflow::submit::{SubmissionReport, submit_drafts};

pub async fn run(ctx: &AppContext, drafts: &[TicketDraft]) -> SubmissionReport {
    submit_drafts(ctx, drafts).await
}
