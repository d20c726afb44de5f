//! Parameterized SQL for the list and per-id reads.
//!
//! Identifiers only ever come from [`SortField`] or from string literals in
//! this file, and are quoted; every client-supplied value is pushed as a bind
//! parameter.
//!
//! Paged listings are a single statement: a `matching` CTE holds the filtered
//! rows, `counted` their number, and the page is joined `LEFT JOIN LATERAL`
//! to `counted`. The statement therefore always yields at least one row, so
//! `total_count` is known even when the requested page is past the end (the
//! page columns are then all NULL).

use super::params::{ArticleListParams, Pagination, SortOrder};
use crate::dtos::ArticleSummaryDTO;
use crate::entities::Comment;
use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};

/// Article with its comment count, for a single id
pub const ARTICLE_BY_ID_SQL: &str = r#"
    SELECT
        articles.article_id,
        articles.title,
        articles.topic,
        articles.author,
        articles.body,
        articles.created_at,
        articles.votes,
        articles.article_img_url,
        COUNT(comments.comment_id)::INT AS comment_count
    FROM articles
    LEFT JOIN comments ON comments.article_id = articles.article_id
    WHERE articles.article_id = $1
    GROUP BY articles.article_id
"#;

const ARTICLE_LIST_COLUMNS: [&str; 8] = [
    "article_id",
    "title",
    "topic",
    "author",
    "created_at",
    "votes",
    "article_img_url",
    "comment_count",
];

const COMMENT_LIST_COLUMNS: [&str; 6] = [
    "comment_id",
    "article_id",
    "body",
    "votes",
    "author",
    "created_at",
];

/// Quotes an SQL identifier, doubling any embedded quote
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// One `ORDER BY` term
struct OrderTerm {
    column: &'static str,
    direction: SortOrder,
}

fn order_by(terms: &[OrderTerm], qualifier: Option<&str>) -> String {
    terms
        .iter()
        .map(|term| match qualifier {
            Some(q) => format!("{}.{} {}", q, quote_ident(term.column), term.direction.as_sql()),
            None => format!("{} {}", quote_ident(term.column), term.direction.as_sql()),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Appends the `counted` CTE and the lateral page selection. The caller has
/// already pushed the `matching` CTE.
fn push_page(
    qb: &mut QueryBuilder<'_, Postgres>,
    columns: &[&str],
    terms: &[OrderTerm],
    pagination: Pagination,
) {
    let projection = columns
        .iter()
        .map(|c| format!("page.{}", quote_ident(c)))
        .collect::<Vec<_>>()
        .join(", ");

    qb.push(", counted AS (SELECT COUNT(*) AS total_count FROM matching) ");
    qb.push("SELECT counted.total_count, ");
    qb.push(projection);
    qb.push(" FROM counted LEFT JOIN LATERAL (SELECT * FROM matching ORDER BY ");
    qb.push(order_by(terms, None));
    qb.push(" LIMIT ");
    qb.push_bind(pagination.limit);
    qb.push(" OFFSET ");
    qb.push_bind(pagination.offset());
    qb.push(") AS page ON TRUE ORDER BY ");
    qb.push(order_by(terms, Some("page")));
}

/// `GET /api/articles`: filtered, sorted, paginated, with comment counts.
/// Ties on the sort column are broken by `article_id` ascending.
pub fn list_articles(params: &ArticleListParams) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new(
        "WITH matching AS (SELECT articles.article_id, articles.title, articles.topic, \
         articles.author, articles.created_at, articles.votes, articles.article_img_url, \
         COUNT(comments.comment_id)::INT AS comment_count \
         FROM articles LEFT JOIN comments ON comments.article_id = articles.article_id",
    );

    if let Some(topic) = params.topic.as_deref() {
        qb.push(" WHERE articles.topic = ");
        qb.push_bind(topic);
    }
    qb.push(" GROUP BY articles.article_id)");

    let terms = [
        OrderTerm {
            column: params.sort_by.column(),
            direction: params.order,
        },
        OrderTerm {
            column: "article_id",
            direction: SortOrder::Asc,
        },
    ];
    push_page(&mut qb, &ARTICLE_LIST_COLUMNS, &terms, params.pagination);
    qb
}

/// `GET /api/articles/{id}/comments`: newest first, ties by newest id.
pub fn list_comments(article_id: i32, pagination: Pagination) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "WITH matching AS (SELECT comment_id, article_id, body, votes, author, created_at \
         FROM comments WHERE article_id = ",
    );
    qb.push_bind(article_id);
    qb.push(")");

    let terms = [
        OrderTerm {
            column: "created_at",
            direction: SortOrder::Desc,
        },
        OrderTerm {
            column: "comment_id",
            direction: SortOrder::Desc,
        },
    ];
    push_page(&mut qb, &COMMENT_LIST_COLUMNS, &terms, pagination);
    qb
}

/// Row of the article listing statement
#[derive(Debug, sqlx::FromRow)]
pub struct ArticlePageRow {
    pub total_count: i64,
    pub article_id: Option<i32>,
    pub title: Option<String>,
    pub topic: Option<String>,
    pub author: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub votes: Option<i32>,
    pub article_img_url: Option<String>,
    pub comment_count: Option<i32>,
}

impl ArticlePageRow {
    fn into_summary(self) -> Option<ArticleSummaryDTO> {
        Some(ArticleSummaryDTO {
            article_id: self.article_id?,
            title: self.title?,
            topic: self.topic?,
            author: self.author?,
            created_at: self.created_at?,
            votes: self.votes?,
            article_img_url: self.article_img_url?,
            comment_count: self.comment_count?,
        })
    }
}

/// Row of the comment listing statement
#[derive(Debug, sqlx::FromRow)]
pub struct CommentPageRow {
    pub total_count: i64,
    pub comment_id: Option<i32>,
    pub article_id: Option<i32>,
    pub body: Option<String>,
    pub votes: Option<i32>,
    pub author: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl CommentPageRow {
    fn into_comment(self) -> Option<Comment> {
        Some(Comment {
            comment_id: self.comment_id?,
            article_id: self.article_id?,
            body: self.body?,
            votes: self.votes?,
            author: self.author?,
            created_at: self.created_at?,
        })
    }
}

/// Splits listing rows into the page items and the total count.
/// The NULL row produced for an empty page yields no item.
pub fn collect_articles(rows: Vec<ArticlePageRow>) -> (Vec<ArticleSummaryDTO>, i64) {
    let total = rows.first().map_or(0, |r| r.total_count);
    let items = rows.into_iter().filter_map(ArticlePageRow::into_summary).collect();
    (items, total)
}

pub fn collect_comments(rows: Vec<CommentPageRow>) -> (Vec<Comment>, i64) {
    let total = rows.first().map_or(0, |r| r.total_count);
    let items = rows.into_iter().filter_map(CommentPageRow::into_comment).collect();
    (items, total)
}
