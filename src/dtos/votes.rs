//! Vote increment DTO, shared by articles and comments

use serde::{Deserialize, Serialize};

/// Relative change applied to `votes`; absolute values are never accepted
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct VotesDTO {
    pub inc_votes: i32,
}
