//! TopicRepository - topics are listed and created, never updated

use super::{Create, ReadAll};
use crate::dtos::CreateTopicDTO;
use crate::entities::Topic;
use sqlx::{Error, PgPool};
use tracing::{debug, info, instrument};

pub struct TopicRepository {
    connection_pool: PgPool,
}

impl TopicRepository {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }
}

impl ReadAll<Topic> for TopicRepository {
    #[instrument(skip(self))]
    async fn read_all(&self) -> Result<Vec<Topic>, Error> {
        debug!("Listing topics");
        let topics = sqlx::query_as::<_, Topic>("SELECT slug, description, img_url FROM topics")
            .fetch_all(&self.connection_pool)
            .await?;

        debug!("Found {} topics", topics.len());
        Ok(topics)
    }
}

impl Create<Topic, CreateTopicDTO> for TopicRepository {
    /// A duplicate slug surfaces as a unique violation from the store
    #[instrument(skip(self, data), fields(slug = %data.slug))]
    async fn create(&self, data: &CreateTopicDTO) -> Result<Topic, Error> {
        debug!("Creating new topic");
        let topic = sqlx::query_as::<_, Topic>(
            r#"
            INSERT INTO topics (slug, description, img_url)
            VALUES ($1, $2, $3)
            RETURNING slug, description, img_url
            "#,
        )
        .bind(&data.slug)
        .bind(&data.description)
        .bind(&data.img_url)
        .fetch_one(&self.connection_pool)
        .await?;

        info!("Topic created");
        Ok(topic)
    }
}
