//! Query module - listing parameters and SQL construction

pub mod builder;
pub mod params;

pub use builder::{
    ARTICLE_BY_ID_SQL, ArticlePageRow, CommentPageRow, collect_articles, collect_comments,
    list_articles, list_comments, quote_ident,
};
pub use params::{ArticleListParams, Pagination, SortField, SortOrder};
