//! Document fetch stage
//!
//! Fetches the current reference, records crawl bookkeeping, and routes the
//! document: continue on a good state, queue the target on a redirect, or
//! reject on any other state.

use crate::event::EventKind;
use crate::fetch::HttpMethod;
use crate::pipeline::{ImporterStage, PipelineContext};
use crate::queue::queue_redirect_url;
use crate::StageResult;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use url::Url;

/// Terminal disposition of one fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Good state; the pipeline continues with this document
    Accepted,

    /// Non-good state; the event kind that was fired
    Rejected(EventKind),

    /// The server redirected; the target was queued as a new reference
    Redirected(Url),
}

impl FetchOutcome {
    /// Continuation signal for the pipeline
    pub fn should_continue(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Fetches a document and classifies the result
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchStage;

impl FetchStage {
    pub fn new() -> Self {
        Self
    }

    /// Runs one fetch attempt and returns its disposition
    ///
    /// Nothing in `ctx` is touched until the fetch completes, and no await
    /// point follows the fetch, so dropping this future early leaves the
    /// context as it was.
    pub async fn run(&self, ctx: &mut PipelineContext) -> StageResult<FetchOutcome> {
        let client = Arc::clone(ctx.fetch_client());
        let mut response = client.fetch(&ctx.document, HttpMethod::Get).await?;

        ctx.reference.crawl_date = Some(Utc::now());

        let (headers, content) = response.take_payload();
        ctx.document.metadata.extend(&headers);
        ctx.document.content = content;

        let enhancer = Arc::clone(ctx.enhancer());
        enhancer.enhance(&mut ctx.document.metadata);
        enhancer.apply_metadata_to_document(&mut ctx.document);

        ctx.reference.content_type = ctx.document.info.content_type.clone();
        ctx.reference.content_encoding = ctx.document.info.content_encoding.clone();

        // The original reference is abandoned: no state, no event.
        if let Some(target) = response.redirect_target.clone() {
            let queue = Arc::clone(ctx.queue());
            let accepted = queue_redirect_url(&*queue, &ctx.reference, target.clone())?;
            tracing::debug!(
                from = %ctx.reference.url(),
                to = %target,
                accepted,
                "Fetch redirected"
            );
            return Ok(FetchOutcome::Redirected(target));
        }

        let state = response.crawl_state;
        ctx.reference.state = Some(state);

        let kind = EventKind::for_state(state);
        ctx.fire_event(kind, &response);

        if kind.is_rejection() {
            Ok(FetchOutcome::Rejected(kind))
        } else {
            Ok(FetchOutcome::Accepted)
        }
    }
}

#[async_trait]
impl ImporterStage for FetchStage {
    fn name(&self) -> &'static str {
        "fetch"
    }

    async fn execute(&self, ctx: &mut PipelineContext) -> StageResult<bool> {
        Ok(self.run(ctx).await?.should_continue())
    }
}
