//! Well-known identifiers the emulation answers with.
//!
//! These values are a private contract with the engine's bootstrap path: it
//! logs in as the built-in supervisor user and expects the stock en-US
//! culture row.

use uuid::{uuid, Uuid};

/// Name of the emulated database, as reported by the connection.
pub const DATABASE_NAME: &str = "creatio";

/// The built-in supervisor user the engine authenticates as.
pub const SUPERVISOR_USER_ID: Uuid = uuid!("7f3b869f-34f3-4f20-ab4d-7480a5fdf647");
pub const SUPERVISOR_USER_NAME: &str = "Supervisor";

/// Contact record backing the supervisor user.
pub const SUPERVISOR_CONTACT_ID: Uuid = uuid!("410006e1-ca4e-4502-a9ec-e54d922d2c00");

/// The stock en-US culture row.
pub const CULTURE_EN_US_ID: Uuid = uuid!("a5420246-0a8e-e111-84a3-00155d054c03");
pub const CULTURE_EN_US_NAME: &str = "en-US";

/// Canned security-role memberships reported for the supervisor user.
pub const SUPERVISOR_ROLE_IDS: [Uuid; 2] = [
    uuid!("83a43ebc-f36b-1410-298d-001e8c82bcad"),
    uuid!("a29a3ba5-4b0d-de11-9a51-005056c00008"),
];
