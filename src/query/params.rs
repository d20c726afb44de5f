//! Listing parameters resolved once at the HTTP boundary.
//!
//! Raw query-string values are turned into closed types here; anything that
//! is not on an allow-list is rejected before a query is ever built.

use crate::core::AppError;
use crate::dtos::{ArticlesQuery, PaginationQuery};
use std::str::FromStr;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_PAGE: i64 = 1;

pub const INVALID_SORT_FIELD: &str = "Invalid Sort Field";
pub const INVALID_ORDER_FIELD: &str = "Invalid Order Field";
pub const INVALID_PAGINATION: &str = "Invalid Limit or Page Number";

/// Sortable article columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Title,
    Topic,
    Author,
    #[default]
    CreatedAt,
    Votes,
    CommentCount,
}

impl SortField {
    /// Column name as it appears in the article listing projection
    pub fn column(self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Topic => "topic",
            SortField::Author => "author",
            SortField::CreatedAt => "created_at",
            SortField::Votes => "votes",
            SortField::CommentCount => "comment_count",
        }
    }
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortField::Title),
            "topic" => Ok(SortField::Topic),
            "author" => Ok(SortField::Author),
            "created_at" => Ok(SortField::CreatedAt),
            "votes" => Ok(SortField::Votes),
            "comment_count" => Ok(SortField::CommentCount),
            _ => Err(AppError::bad_request(INVALID_SORT_FIELD)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(AppError::bad_request(INVALID_ORDER_FIELD))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub page: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
        }
    }
}

impl Pagination {
    /// Parses `limit` and `p`; both must be positive integers when present.
    pub fn parse(limit: Option<&str>, page: Option<&str>) -> Result<Self, AppError> {
        let limit = parse_positive(limit, DEFAULT_LIMIT)?;
        let page = parse_positive(page, DEFAULT_PAGE)?;
        let pagination = Self { limit, page };
        // reject pages whose offset does not fit the column type
        pagination.checked_offset()?;
        Ok(pagination)
    }

    fn checked_offset(&self) -> Result<i64, AppError> {
        (self.page - 1)
            .checked_mul(self.limit)
            .ok_or_else(|| AppError::bad_request(INVALID_PAGINATION))
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn parse_positive(raw: Option<&str>, default: i64) -> Result<i64, AppError> {
    match raw {
        None => Ok(default),
        Some(value) => match value.trim().parse::<i64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(AppError::bad_request(INVALID_PAGINATION)),
        },
    }
}

impl TryFrom<PaginationQuery> for Pagination {
    type Error = AppError;

    fn try_from(query: PaginationQuery) -> Result<Self, Self::Error> {
        Pagination::parse(query.limit.as_deref(), query.p.as_deref())
    }
}

/// Fully resolved parameters of `GET /api/articles`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleListParams {
    pub sort_by: SortField,
    pub order: SortOrder,
    /// Topic slug to filter on; `None` lists every topic
    pub topic: Option<String>,
    pub pagination: Pagination,
}

impl TryFrom<ArticlesQuery> for ArticleListParams {
    type Error = AppError;

    /// Validation order: pagination, sort field, order.
    fn try_from(query: ArticlesQuery) -> Result<Self, Self::Error> {
        let pagination = Pagination::parse(query.limit.as_deref(), query.p.as_deref())?;

        let sort_by = match query.sort_by.as_deref() {
            Some(raw) => raw.parse()?,
            None => SortField::default(),
        };

        let order = match query.order.as_deref() {
            Some(raw) => raw.parse()?,
            None => SortOrder::default(),
        };

        let topic = query.topic.filter(|t| !t.is_empty());

        Ok(Self {
            sort_by,
            order,
            topic,
            pagination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> ArticlesQuery {
        let mut q = ArticlesQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "sort_by" => q.sort_by = value,
                "order" => q.order = value,
                "topic" => q.topic = value,
                "limit" => q.limit = value,
                "p" => q.p = value,
                _ => unreachable!(),
            }
        }
        q
    }

    #[test]
    fn test_defaults() {
        let params = ArticleListParams::try_from(ArticlesQuery::default()).unwrap();
        assert_eq!(params.sort_by, SortField::CreatedAt);
        assert_eq!(params.order, SortOrder::Desc);
        assert_eq!(params.topic, None);
        assert_eq!(params.pagination, Pagination { limit: 10, page: 1 });
        assert_eq!(params.pagination.offset(), 0);
    }

    #[test]
    fn test_order_is_case_insensitive() {
        let params = ArticleListParams::try_from(query(&[("order", "AsC")])).unwrap();
        assert_eq!(params.order, SortOrder::Asc);
    }

    #[test]
    fn test_invalid_sort_field() {
        let err = ArticleListParams::try_from(query(&[("sort_by", "reactions")])).unwrap_err();
        assert_eq!(err.message(), INVALID_SORT_FIELD);
        // identifiers that look like SQL never get through
        let err = ArticleListParams::try_from(query(&[("sort_by", "votes; DROP TABLE articles")]))
            .unwrap_err();
        assert_eq!(err.message(), INVALID_SORT_FIELD);
    }

    #[test]
    fn test_invalid_order() {
        let err = ArticleListParams::try_from(query(&[("order", "downwards")])).unwrap_err();
        assert_eq!(err.message(), INVALID_ORDER_FIELD);
    }

    #[test]
    fn test_pagination_checked_before_sort() {
        let err = ArticleListParams::try_from(query(&[("sort_by", "nope"), ("limit", "abc")]))
            .unwrap_err();
        assert_eq!(err.message(), INVALID_PAGINATION);
    }

    #[test]
    fn test_invalid_pagination_values() {
        for (limit, page) in [("notanumber", "1"), ("5", "-1"), ("0", "1"), ("5", ""), ("1.5", "1")] {
            let err = Pagination::parse(Some(limit), Some(page)).unwrap_err();
            assert_eq!(err.message(), INVALID_PAGINATION, "limit={limit} p={page}");
        }
    }

    #[test]
    fn test_offset() {
        let pagination = Pagination::parse(Some("5"), Some("3")).unwrap();
        assert_eq!(pagination.offset(), 10);
    }

    #[test]
    fn test_overflowing_offset_rejected() {
        let err = Pagination::parse(Some(&i64::MAX.to_string()), Some("3")).unwrap_err();
        assert_eq!(err.message(), INVALID_PAGINATION);
    }

    #[test]
    fn test_empty_topic_means_no_filter() {
        let params = ArticleListParams::try_from(query(&[("topic", "")])).unwrap();
        assert_eq!(params.topic, None);
        let params = ArticleListParams::try_from(query(&[("topic", "cats")])).unwrap();
        assert_eq!(params.topic.as_deref(), Some("cats"));
    }
}
