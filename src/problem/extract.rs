use scraper::{ElementRef, Html};
use thiserror::Error;
use tracing::debug;

use super::blocks;
use super::html;
use super::ProblemDocument;
use crate::day::Day;

pub const UNKNOWN_TITLE: &str = "Unknown Title";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not find the problem description (no <article> in page)")]
    MissingContent,
}

/// Pull the title, narrative and example blocks out of a problem page.
pub fn extract(markup: &str, day: Day) -> Result<ProblemDocument, ExtractError> {
    let page = Html::parse_document(markup);

    let title = find_title(&page, day).unwrap_or_else(|| UNKNOWN_TITLE.to_string());

    let containers = html::containers(&page);
    if containers.is_empty() {
        return Err(ExtractError::MissingContent);
    }
    let body = containers
        .iter()
        .map(|article| blocks::render_container(&blocks::classify_element(*article)))
        .collect::<Vec<_>>()
        .join("\n\n");

    // Scanned over the whole page, not just the containers. Kept decoded.
    let examples: Vec<String> = html::preformatted(&page)
        .filter(|pre| blocks::is_code_block(*pre))
        .map(|pre| html::text_content(pre).trim().to_string())
        .collect();

    debug!(
        title = %title,
        containers = containers.len(),
        examples = examples.len(),
        "extracted problem"
    );

    Ok(ProblemDocument {
        title,
        body,
        examples,
    })
}

/// Title from the `<h2>--- Day N: Title ---</h2>` heading for `day`.
fn find_title(page: &Html, day: Day) -> Option<String> {
    let prefix = format!("--- Day {day}: ");
    html::headings(page).find_map(|h2| title_from_heading(h2, &prefix))
}

fn title_from_heading(h2: ElementRef<'_>, prefix: &str) -> Option<String> {
    let text = html::text_content(h2);
    let title = text.trim().strip_prefix(prefix)?.strip_suffix("---")?.trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}
