use crate::core::transport::Inbox;
use crate::core::{DebateRequest, DebateResponse, Reviewer};

/// Answers every request in `inbox` with this reviewer's argument, sent to
/// the request's `reply_to`. Returns once every sender has been dropped.
pub async fn serve<R: Reviewer + ?Sized>(reviewer: &R, mut inbox: Inbox<DebateRequest>) {
    let stance = reviewer.stance();
    while let Some(request) = inbox.recv().await {
        tracing::info!(debate_id = %request.debate_id, "{} reviewer received request", stance);

        let assessment = reviewer.evaluate(&request.candidate, &request.job);
        let response = DebateResponse::from_assessment(request.debate_id, stance, assessment);

        match request.reply_to.send(response) {
            Ok(()) => tracing::info!(
                debate_id = %request.debate_id,
                "{} reviewer sent argument to '{}'",
                stance,
                request.reply_to.name()
            ),
            Err(e) => tracing::warn!("{} reviewer could not reply: {}", stance, e),
        }
    }
    tracing::debug!("{} reviewer mailbox '{}' closed", stance, inbox.name());
}
