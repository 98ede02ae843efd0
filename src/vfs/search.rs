//! `search_text` / `search_binaries` (§4.3.15).

use serde::Serialize;

use super::VfsEngine;
use crate::error::Result;

/// Whether a hit must match every term (`MatchAll`) or any one of them
/// (`MatchAny`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    MatchAny,
    MatchAll,
}

/// Result ordering for [`VfsEngine::search_text`] / [`VfsEngine::search_binaries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    ModifiedTime,
    Name,
}

/// One matched line (for [`VfsEngine::search_text`]) or filename (for
/// [`VfsEngine::search_binaries`]).
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub uuid: uuid::Uuid,
    pub full_path: String,
    pub filename: String,
    pub line_no: Option<usize>,
    pub content_snippet: Option<String>,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub modified_time: i64,
}

/// Split a query into terms, treating `"..."`-quoted substrings as a
/// single term.
fn tokenize(query: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut chars = query.chars().peekable();
    let mut current = String::new();

    while let Some(c) = chars.next() {
        if c == '"' {
            let mut quoted = String::new();
            for c2 in chars.by_ref() {
                if c2 == '"' {
                    break;
                }
                quoted.push(c2);
            }
            if !quoted.is_empty() {
                terms.push(quoted);
            }
        } else if c.is_whitespace() {
            if !current.is_empty() {
                terms.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        terms.push(current);
    }

    terms
}

fn matches(haystack: &str, terms: &[String], case_sensitive: bool, mode: MatchMode) -> bool {
    let haystack_owned;
    let haystack = if case_sensitive {
        haystack
    } else {
        haystack_owned = haystack.to_lowercase();
        &haystack_owned
    };

    let mut term_matches = terms.iter().map(|t| {
        if case_sensitive {
            haystack.contains(t.as_str())
        } else {
            haystack.contains(&t.to_lowercase())
        }
    });

    match mode {
        MatchMode::MatchAny => term_matches.any(|m| m),
        MatchMode::MatchAll => term_matches.all(|m| m),
    }
}

impl VfsEngine {
    /// Scan `content_text` of every non-binary descendant of `path` for
    /// `query`. Quoted substrings in `query` are single terms; matching
    /// mode and sort order are caller-selected.
    pub async fn search_text(
        &self,
        root_key: &str,
        path: &str,
        query: &str,
        mode: MatchMode,
        case_sensitive: bool,
        order: SearchOrder,
    ) -> Result<Vec<SearchHit>> {
        let normalized = super::path::normalize(path)?;
        let root_key_owned = root_key.to_string();

        let rows = self
            .store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query_as::<_, super::Node>("SELECT * FROM fn_search_text_candidates($1, $2)")
                        .bind(root_key_owned)
                        .bind(normalized)
                        .fetch_all(conn)
                        .await
                })
            })
            .await?;

        let terms = tokenize(query);
        let mut hits = Vec::new();

        for node in &rows {
            let Some(content) = node.content_text.as_ref() else {
                continue;
            };

            for (idx, line) in content.lines().enumerate() {
                if matches(line, &terms, case_sensitive, mode) {
                    hits.push(SearchHit {
                        uuid: node.uuid,
                        full_path: node.full_path(),
                        filename: node.filename.clone(),
                        line_no: Some(idx + 1),
                        content_snippet: Some(line.to_string()),
                        content_type: node.content_type.clone(),
                        size_bytes: node.size_bytes,
                        modified_time: node.modified_time,
                    });
                }
            }
        }

        sort_hits(&mut hits, order);
        Ok(hits)
    }

    /// Like [`Self::search_text`] but matches on `filename` only, across
    /// binary descendants of `path`.
    pub async fn search_binaries(&self, root_key: &str, path: &str, query: &str) -> Result<Vec<SearchHit>> {
        let normalized = super::path::normalize(path)?;
        let root_key_owned = root_key.to_string();

        let rows = self
            .store
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query_as::<_, super::Node>("SELECT * FROM fn_search_binary_candidates($1, $2)")
                        .bind(root_key_owned)
                        .bind(normalized)
                        .fetch_all(conn)
                        .await
                })
            })
            .await?;

        let needle = query.to_lowercase();
        let mut hits: Vec<SearchHit> = rows
            .into_iter()
            .filter(|node| node.filename.to_lowercase().contains(&needle))
            .map(|node| SearchHit {
                uuid: node.uuid,
                full_path: node.full_path(),
                filename: node.filename.clone(),
                line_no: None,
                content_snippet: None,
                content_type: node.content_type.clone(),
                size_bytes: node.size_bytes,
                modified_time: node.modified_time,
            })
            .collect();

        sort_hits(&mut hits, SearchOrder::Name);
        Ok(hits)
    }
}

fn sort_hits(hits: &mut [SearchHit], order: SearchOrder) {
    match order {
        SearchOrder::ModifiedTime => hits.sort_by(|a, b| b.modified_time.cmp(&a.modified_time)),
        SearchOrder::Name => hits.sort_by(|a, b| a.filename.cmp(&b.filename)),
    }
}
