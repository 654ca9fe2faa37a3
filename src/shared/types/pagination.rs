//! Page, sort and window types shared by the pagination engine and the
//! page sources that back it.

use serde::Serialize;
use utoipa::ToSchema;

/// Page size used when `limit` is absent, non-numeric or not positive.
pub const DEFAULT_LIMIT: u64 = 10;
/// Page number used when `page` is absent, non-numeric or not positive.
pub const DEFAULT_PAGE: u64 = 1;

/// Sort direction of a single sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One `field:direction` entry of a `sortBy` expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse `name:desc,createdAt` into sort keys in priority order.
    ///
    /// Anything other than `desc` is ascending. Empty entries are skipped.
    pub fn parse_list(expr: &str) -> Vec<SortKey> {
        expr.split(',')
            .filter_map(|entry| {
                let mut parts = entry.splitn(2, ':');
                let field = parts.next()?.trim();
                if field.is_empty() {
                    return None;
                }
                let direction = match parts.next().map(|d| d.trim().to_ascii_lowercase()) {
                    Some(d) if d == "desc" => SortDirection::Desc,
                    _ => SortDirection::Asc,
                };
                Some(SortKey {
                    field: field.to_string(),
                    direction,
                })
            })
            .collect()
    }
}

/// Caller-supplied paging options, prior to normalisation.
///
/// `limit` and `page` are kept signed so that `0` and negative values
/// arriving from the boundary can be recognised and replaced by defaults.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub sort_by: Option<String>,
    pub limit: Option<i64>,
    pub page: Option<i64>,
    pub populate: Option<String>,
}

impl QueryOptions {
    /// Lenient numeric parse for raw query-string values.
    /// Non-numeric input yields `None` so the default applies.
    pub fn parse_number(raw: Option<&str>) -> Option<i64> {
        raw.and_then(|v| v.trim().parse::<i64>().ok())
    }

    pub fn normalized_limit(&self) -> u64 {
        positive_or(self.limit, DEFAULT_LIMIT)
    }

    pub fn normalized_page(&self) -> u64 {
        positive_or(self.page, DEFAULT_PAGE)
    }

    pub fn sort_keys(&self) -> Vec<SortKey> {
        self.sort_by
            .as_deref()
            .map(SortKey::parse_list)
            .unwrap_or_default()
    }

    pub fn populate_fields(&self) -> Vec<String> {
        self.populate
            .as_deref()
            .map(|p| {
                p.split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn positive_or(value: Option<i64>, default: u64) -> u64 {
    match value {
        Some(v) if v > 0 => v as u64,
        _ => default,
    }
}

/// The window a page source is asked to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub sort: Vec<SortKey>,
    pub skip: u64,
    pub limit: u64,
    pub populate: Vec<String>,
}

/// One page of results plus counts.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub results: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub total_results: u64,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, total_results: u64, page: u64, limit: u64) -> Self {
        Self {
            results,
            page,
            limit,
            total_pages: total_pages(total_results, limit),
            total_results,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            results: self.results.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

/// `ceil(total / limit)`, zero when there is nothing to page over.
pub fn total_pages(total_results: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total_results.div_ceil(limit)
}
