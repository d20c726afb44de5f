//! Integration tests for the topic endpoints
//!
//! - GET /api/topics
//! - POST /api/topics

mod common;

#[cfg(test)]
mod topic_tests {
    use super::common::{offline_server, server_for};
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use sqlx::PgPool;

    #[sqlx::test(fixtures(path = "../fixtures", scripts("topics")))]
    async fn test_list_topics(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);

        let response = server.get("/api/topics").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let topics = body["topics"].as_array().expect("topics array");
        assert_eq!(topics.len(), 3);
        for topic in topics {
            assert!(topic["slug"].is_string());
            assert!(topic["description"].is_string());
            assert!(topic["img_url"].is_string());
        }
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("topics")))]
    async fn test_create_topic(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool.clone());
        let new_topic = json!({
            "slug": "football",
            "description": "Footie!",
            "img_url": "https://example.com/ball.jpg"
        });

        let response = server.post("/api/topics").json(&new_topic).await;

        response.assert_status(StatusCode::CREATED);
        response.assert_json(&json!({ "topic": new_topic }));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM topics")
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 4);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("topics")))]
    async fn test_create_topic_with_empty_slug(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);
        let new_topic = json!({ "slug": "", "description": "d", "img_url": "x" });

        let response = server.post("/api/topics").json(&new_topic).await;

        response.assert_status(StatusCode::CREATED);
        response.assert_json(&json!({ "topic": new_topic }));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("topics")))]
    async fn test_create_duplicate_topic(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);

        let response = server
            .post("/api/topics")
            .json(&json!({ "slug": "cats", "description": "More cats", "img_url": "" }))
            .await;

        response.assert_status_bad_request();
        response.assert_json(&json!({ "msg": "Topic already exists" }));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_topic_missing_fields() {
        let server = offline_server();

        let cases = [
            (json!({ "description": "d", "img_url": "" }), "Topic is required"),
            (json!({ "slug": "s", "img_url": "" }), "Description is required"),
            (json!({ "slug": "s", "description": "d" }), "Image URL is required"),
            (json!({ "slug": "s" }), "Missing more than one required field"),
        ];
        for (body, msg) in cases {
            let response = server.post("/api/topics").json(&body).await;
            response.assert_status_bad_request();
            response.assert_json(&json!({ "msg": msg }));
        }
    }

    #[tokio::test]
    async fn test_create_topic_invalid_types() {
        let server = offline_server();

        let cases = [
            (json!({ "slug": 1, "description": "d", "img_url": "" }), "Invalid Topic Slug"),
            (json!({ "slug": "s", "description": true, "img_url": "" }), "Invalid Description"),
            (json!({ "slug": "s", "description": "d", "img_url": 5 }), "Invalid Image URL"),
            (
                json!({ "slug": 1, "description": 2, "img_url": "" }),
                "Invalid data type for more than one field",
            ),
        ];
        for (body, msg) in cases {
            let response = server.post("/api/topics").json(&body).await;
            response.assert_status_bad_request();
            response.assert_json(&json!({ "msg": msg }));
        }
    }

    #[tokio::test]
    async fn test_create_topic_malformed_json() {
        let server = offline_server();

        let response = server
            .post("/api/topics")
            .text("{\"slug\": ")
            .content_type("application/json")
            .await;

        response.assert_status_bad_request();
        response.assert_json(&json!({ "msg": "Bad Request" }));
    }
}
