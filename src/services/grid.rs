use serde::Deserialize;
use validator::Validate;

use crate::models::assessment::AssessmentDetail;
use crate::models::question::Question;

pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const MAX_PAGE_SIZE: usize = 100;
pub const DEFAULT_SORT_FIELD: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Query parameters understood by list endpoints.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GridQuery {
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 100, message = "pageSize must be between 1 and 100"))]
    pub page_size: Option<usize>,
    pub sort_field: Option<String>,
    pub sort: Option<SortDirection>,
    pub q: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Int(i64),
    Text(String),
}

pub trait GridRow {
    const SORT_FIELDS: &'static [&'static str];

    fn sort_key(&self, field: &str) -> Option<SortKey>;

    /// Values the quick filter searches through.
    fn search_values(&self) -> Vec<&str>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridPage<T> {
    pub rows: Vec<T>,
    /// Row count after filtering, before pagination.
    pub total: usize,
}

impl GridQuery {
    /// No grid parameter at all means the caller wants the plain list.
    pub fn is_active(&self) -> bool {
        self.page.is_some()
            || self.page_size.is_some()
            || self.sort_field.is_some()
            || self.sort.is_some()
            || self.q.is_some()
    }

    pub fn apply<T: GridRow>(&self, rows: Vec<T>) -> GridPage<T> {
        let terms: Vec<String> = self
            .q
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        let mut rows: Vec<T> = rows
            .into_iter()
            .filter(|row| matches_quick_filter(row, &terms))
            .collect();

        let field = self
            .sort_field
            .as_deref()
            .filter(|f| T::SORT_FIELDS.iter().any(|known| known == f))
            .unwrap_or(DEFAULT_SORT_FIELD);
        let direction = self.sort.unwrap_or_default();

        rows.sort_by(|a, b| {
            let ord = a.sort_key(field).cmp(&b.sort_key(field));
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        let total = rows.len();
        let page_size = self
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let skip = self.page.unwrap_or(0).saturating_mul(page_size);

        let rows = rows.into_iter().skip(skip).take(page_size).collect();
        GridPage { rows, total }
    }
}

// every term must hit at least one searchable value
fn matches_quick_filter<T: GridRow>(row: &T, terms: &[String]) -> bool {
    if terms.is_empty() {
        return true;
    }
    let values: Vec<String> = row
        .search_values()
        .into_iter()
        .map(str::to_lowercase)
        .collect();
    terms
        .iter()
        .all(|term| values.iter().any(|v| v.contains(term.as_str())))
}

// ====================================
// ROW IMPLEMENTATIONS

impl GridRow for Question {
    const SORT_FIELDS: &'static [&'static str] =
        &["id", "question", "category", "type", "createdAt", "updatedAt"];

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "id" => Some(SortKey::Int(self.id)),
            "question" => Some(SortKey::Text(self.question.to_lowercase())),
            "category" => Some(SortKey::Text(self.category.to_lowercase())),
            "type" => self
                .question_type
                .map(|t| SortKey::Text(format!("{:?}", t))),
            "createdAt" => Some(SortKey::Int(self.created_at.timestamp_millis())),
            "updatedAt" => Some(SortKey::Int(self.updated_at.timestamp_millis())),
            _ => None,
        }
    }

    fn search_values(&self) -> Vec<&str> {
        let mut values = vec![
            self.question.as_str(),
            self.description.as_str(),
            self.category.as_str(),
        ];
        values.extend(self.options.iter().map(String::as_str));
        values
    }
}

impl GridRow for AssessmentDetail {
    const SORT_FIELDS: &'static [&'static str] = &["id", "name", "level", "createdAt", "updatedAt"];

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "id" => Some(SortKey::Int(self.id)),
            "name" => Some(SortKey::Text(self.name.to_lowercase())),
            "level" => Some(SortKey::Text(self.level.to_lowercase())),
            "createdAt" => Some(SortKey::Int(self.created_at.timestamp_millis())),
            "updatedAt" => Some(SortKey::Int(self.updated_at.timestamp_millis())),
            _ => None,
        }
    }

    fn search_values(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.level.as_str()]
    }
}
