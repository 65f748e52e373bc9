pub mod blocks;
pub mod extract;
pub mod fetch;
pub mod html;
pub mod render;

use thiserror::Error;

use crate::day::PuzzleId;
use extract::ExtractError;
use fetch::{FetchError, Fetcher};

/// One puzzle's statement, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemDocument {
    pub title: String,
    pub body: String,
    pub examples: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ProblemError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Two-stage pipeline: page → document. Errors from either stage are passed
/// through unchanged.
pub async fn fetch_problem(fetcher: &Fetcher, id: PuzzleId) -> Result<ProblemDocument, ProblemError> {
    let page = fetcher.fetch(id).await?;
    Ok(extract::extract(&page, id.day)?)
}
