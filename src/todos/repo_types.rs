use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    pub completed_at: Option<i64>, // unix millis
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Todo {
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            completed: false,
            completed_at: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Completing stamps `completed_at`; un-completing clears it.
    pub fn set_completed(&mut self, completed: bool) {
        if completed && !self.completed {
            self.completed_at = Some(now_millis());
        } else if !completed {
            self.completed_at = None;
        }
        self.completed = completed;
    }
}

fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
