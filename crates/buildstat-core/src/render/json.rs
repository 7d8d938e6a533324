use crate::errors::{ExError, ExErrorKind, Result};
use crate::render::{RenderContext, ReportFormat, ReportRenderer};
use crate::report::Report;
use serde::Serialize;

/// Renders a report as pretty-printed JSON.
///
/// The document wraps the report with its generation time:
/// `{ "generatedAt": "<rfc3339>", "report": { ... } }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDocument<'a> {
    generated_at: String,
    report: &'a Report,
}

impl ReportRenderer for JsonRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }

    fn render(&self, report: &Report, context: &RenderContext) -> Result<Vec<u8>> {
        let document = JsonDocument {
            generated_at: context.generated_at.to_rfc3339(),
            report,
        };
        let mut bytes = serde_json::to_vec_pretty(&document).map_err(|e| {
            ExError::new(ExErrorKind::RenderFailure)
                .with_op("render_json")
                .with_message(e.to_string())
        })?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
