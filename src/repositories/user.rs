//! UserRepository - users are read-only

use super::{Read, ReadAll};
use crate::entities::User;
use sqlx::{Error, PgPool};
use tracing::{debug, instrument};

pub struct UserRepository {
    connection_pool: PgPool,
}

impl UserRepository {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }
}

impl ReadAll<User> for UserRepository {
    #[instrument(skip(self))]
    async fn read_all(&self) -> Result<Vec<User>, Error> {
        debug!("Listing users");
        let users = sqlx::query_as::<_, User>("SELECT username, name, avatar_url FROM users")
            .fetch_all(&self.connection_pool)
            .await?;

        Ok(users)
    }
}

impl Read<User, String> for UserRepository {
    #[instrument(skip(self), fields(username = %username))]
    async fn read(&self, username: &String) -> Result<Option<User>, Error> {
        debug!("Reading user by username");
        let user = sqlx::query_as::<_, User>(
            "SELECT username, name, avatar_url FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.connection_pool)
        .await?;

        if user.is_some() {
            debug!("User found");
        } else {
            debug!("User not found");
        }

        Ok(user)
    }
}
