//! Topic DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO for creating a new topic
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateTopicDTO {
    #[validate(length(max = 10000, message = "Slug must be at most 10000 characters"))]
    pub slug: String,

    #[validate(length(max = 250, message = "Description must be at most 250 characters"))]
    pub description: String,

    #[validate(length(max = 1000, message = "Image URL must be at most 1000 characters"))]
    pub img_url: String,
}
