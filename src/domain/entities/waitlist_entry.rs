use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A single clinic's place on the waitlist.
///
/// `id` and `created_at` are assigned by the registry when the entry is
/// created and never change afterwards. `email` is the natural key and is
/// compared as an exact string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub email: String,
    pub clinic_name: String,
    pub clinic_size: String,
    pub created_at: DateTime<Utc>,
}

/// Candidate entry that already passed boundary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWaitlistEntry {
    pub email: String,
    pub clinic_name: String,
    pub clinic_size: String,
}

impl NewWaitlistEntry {
    pub fn into_entry(self, id: Uuid, created_at: DateTime<Utc>) -> WaitlistEntry {
        WaitlistEntry {
            id,
            email: self.email,
            clinic_name: self.clinic_name,
            clinic_size: self.clinic_size,
            created_at,
        }
    }
}
