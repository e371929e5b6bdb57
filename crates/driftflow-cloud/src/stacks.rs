//! Stack enumeration and selection

use crate::error::{CloudError, Result};
use crate::model::StackSummary;
use crate::provider::DriftProvider;
use futures_util::stream::{self, Stream, TryStreamExt};
use std::path::{Path, PathBuf};
use tokio::fs;

enum PageCursor {
    First,
    Next(String),
    Done,
}

/// Stream every stack summary, following pagination
///
/// Pages are fetched lazily as the stream is polled. Each call starts a new
/// listing from the first page.
pub fn list_all_stacks<P>(provider: &P) -> impl Stream<Item = Result<StackSummary>> + '_
where
    P: DriftProvider + ?Sized,
{
    stream::try_unfold(PageCursor::First, move |cursor| async move {
        let token = match cursor {
            PageCursor::First => None,
            PageCursor::Next(token) => Some(token),
            PageCursor::Done => return Ok(None),
        };

        tracing::debug!("Listing stacks (token: {:?})", token);
        let page = provider.list_stacks_page(token).await?;

        let next = match page.next_token {
            Some(token) if !token.is_empty() => PageCursor::Next(token),
            _ => PageCursor::Done,
        };
        let summaries = stream::iter(page.summaries.into_iter().map(Ok::<_, CloudError>));
        Ok::<_, CloudError>(Some((summaries, next)))
    })
    .try_flatten()
}

/// Collect all stack names in provider order
pub async fn fetch_all_stacks<P>(provider: &P) -> Result<Vec<String>>
where
    P: DriftProvider + ?Sized,
{
    let names: Vec<String> = list_all_stacks(provider)
        .map_ok(|summary| summary.stack_name)
        .try_collect()
        .await?;

    tracing::debug!("Listed {} stacks", names.len());
    Ok(names)
}

/// Which stacks a run should check
#[derive(Debug, Clone, Default)]
pub struct StackSelection {
    /// File with one stack name per line. Takes precedence when it exists.
    pub stack_file: Option<PathBuf>,

    /// Case-sensitive substring a listed stack name must contain
    pub filter_text: Option<String>,
}

impl StackSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stack_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.stack_file = Some(path.into());
        self
    }

    pub fn with_filter(mut self, filter_text: impl Into<String>) -> Self {
        self.filter_text = Some(filter_text.into());
        self
    }

    /// Stack file to read, if one is configured and present on disk
    fn existing_stack_file(&self) -> Option<&Path> {
        let path = self.stack_file.as_deref()?;
        if path.exists() {
            Some(path)
        } else {
            tracing::warn!(
                "Stack file {} not found, listing stacks instead",
                path.display()
            );
            None
        }
    }
}

/// Parse a stack file body: trimmed, non-blank lines in order
pub fn parse_stack_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read stack names from a file
pub async fn read_stack_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).await?;
    let names = parse_stack_lines(&content);
    tracing::debug!("Read {} stack names from {}", names.len(), path.display());
    Ok(names)
}

/// Keep names containing `filter_text`; `None` keeps everything
pub fn filter_stack_names(names: Vec<String>, filter_text: Option<&str>) -> Vec<String> {
    match filter_text {
        Some(filter) => names
            .into_iter()
            .filter(|name| name.contains(filter))
            .collect(),
        None => names,
    }
}

/// Resolve the stack names for a run
///
/// An existing stack file wins and the filter is ignored. Otherwise every
/// listed stack is filtered by `filter_text`.
pub async fn resolve_stack_names<P>(provider: &P, selection: &StackSelection) -> Result<Vec<String>>
where
    P: DriftProvider + ?Sized,
{
    if let Some(path) = selection.existing_stack_file() {
        return read_stack_file(path).await;
    }

    let names = fetch_all_stacks(provider).await?;
    Ok(filter_stack_names(names, selection.filter_text.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stack_lines_trims_and_skips_blanks() {
        let content = "  alpha  \n\nbeta\n   \n\tgamma\t\n";
        assert_eq!(parse_stack_lines(content), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_parse_stack_lines_handles_crlf() {
        assert_eq!(parse_stack_lines("one\r\ntwo\r\n"), vec!["one", "two"]);
    }

    #[test]
    fn test_filter_is_case_sensitive_substring() {
        let names = vec![
            "DatadogIntegration".to_string(),
            "app-datadog".to_string(),
            "network".to_string(),
            "ProdDatadogForwarder".to_string(),
        ];
        assert_eq!(
            filter_stack_names(names.clone(), Some("Datadog")),
            vec!["DatadogIntegration", "ProdDatadogForwarder"]
        );
        assert_eq!(filter_stack_names(names.clone(), None), names);
    }

    #[tokio::test]
    async fn test_read_stack_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("stacks.txt");
        std::fs::write(&path, "web\n\n  db \n").unwrap();

        let names = read_stack_file(&path).await.unwrap();
        assert_eq!(names, vec!["web", "db"]);
    }
}
