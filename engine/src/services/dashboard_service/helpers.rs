// Helper functions shared by the view handlers
use super::ViewContext;
use crate::data::{tokenize_sheet, Row};
use crate::error::{EngineError, Result};
use shared::models::Period;
use tracing::Span;
use uuid::Uuid;

/// Fetches one sheet with the configured timeout and tokenizes it.
pub async fn fetch_rows(ctx: &ViewContext, sheet_id: &str) -> Result<Vec<Row>> {
    let timeout = ctx.settings.fetch_timeout();
    let text = match tokio::time::timeout(timeout, ctx.source.fetch(sheet_id)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            tracing::error!(sheet = %sheet_id, error = %e, "Sheet fetch failed");
            return Err(e);
        }
        Err(_) => {
            tracing::error!(sheet = %sheet_id, timeout_ms = ctx.settings.fetch_timeout_ms, "Sheet fetch timed out");
            return Err(EngineError::SourceTimeout {
                sheet: sheet_id.to_string(),
                timeout_ms: ctx.settings.fetch_timeout_ms,
            });
        }
    };
    let rows = tokenize_sheet(&text);
    tracing::debug!(sheet = %sheet_id, bytes = text.len(), rows = rows.len(), "Fetched sheet");
    Ok(rows)
}

pub fn view_span(view: &'static str, period: &Period) -> Span {
    let request_id = Uuid::new_v4();
    tracing::info_span!(
        "view",
        view,
        %request_id,
        from = %period.start,
        to = %period.end
    )
}
