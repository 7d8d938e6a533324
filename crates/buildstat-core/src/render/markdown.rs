use crate::errors::Result;
use crate::model::{Artifact, ArtifactCollection};
use crate::render::{RenderContext, ReportFormat, ReportRenderer};
use crate::report::{ListingSection, Report, ReportSection, SummarySection};

/// Renders a report as a Markdown document.
///
/// Layout:
/// - Title as H1, followed by the generation time
/// - Summary field groups as H2 with a bullet per field
/// - Each listing as H2 with an H3 per artifact
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl ReportRenderer for MarkdownRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }

    fn render(&self, report: &Report, context: &RenderContext) -> Result<Vec<u8>> {
        Ok(render_markdown(report, context).into_bytes())
    }
}

/// Render a report to a Markdown string
pub fn render_markdown(report: &Report, context: &RenderContext) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", inline(&report.title)));
    output.push_str(&format!(
        "_Generated {}_\n\n",
        context.generated_at.format("%Y-%m-%d %H:%M:%S %:z")
    ));

    for section in &report.sections {
        match section {
            ReportSection::Summary(summary) => render_summary(&mut output, summary),
            ReportSection::Listing(listing) => render_listing(&mut output, listing),
        }
    }

    output
}

fn render_summary(output: &mut String, summary: &SummarySection) {
    for group in &summary.groups {
        output.push_str(&format!("## {}\n\n", group.heading));
        for field in &group.fields {
            output.push_str(&format!("- **{}**: {}\n", field.label, inline(&field.value)));
        }
        output.push('\n');
    }
}

fn render_listing(output: &mut String, listing: &ListingSection) {
    output.push_str(&format!("## {}\n\n", listing.kind.heading()));

    let collection = listing.kind.collection();
    if listing.artifacts.is_empty() {
        output.push_str(&format!("_No {}._\n\n", collection.key()));
        return;
    }

    for artifact in &listing.artifacts {
        render_artifact(output, collection, artifact);
    }
}

fn render_artifact(output: &mut String, collection: ArtifactCollection, artifact: &Artifact) {
    let label = collection.item_label();
    output.push_str(&format!("### {}\n\n", inline(&artifact.name)));
    output.push_str(&format!("- **{} type**: {}\n", label, inline(&artifact.kind)));
    output.push_str(&format!("- **Size**: {} KB\n", artifact.size_kb));
    // Assets carry no build flag
    if collection == ArtifactCollection::Modules {
        output.push_str(&format!("- **Built**: {}\n", yes_no(artifact.built)));
    }
    output.push_str(&format!("- **Cached**: {}\n\n", yes_no(artifact.cached)));
}

/// Host-supplied text on a single line; line breaks would open new blocks
fn inline(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}
