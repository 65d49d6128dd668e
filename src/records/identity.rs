use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identity assigned to a record at creation time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

pub trait IdentityGenerator {
    fn next(&self) -> Identity;
}

/// Random v4 UUIDs stamped with the current UTC time.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIdentity;

impl IdentityGenerator for RandomIdentity {
    fn next(&self) -> Identity {
        Identity {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
        }
    }
}
