//! Seed user directory

use chrono::{TimeZone, Utc};

use core_kernel::UserId;

use crate::directory::UserRecord;
use crate::user::Role;

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    full_name: &str,
    email: &str,
    mobile: &str,
    role: Role,
    email_confirmed: bool,
    created: (i32, u32, u32, u32, u32),
    active_policy_count: usize,
) -> UserRecord {
    let (y, mo, d, h, mi) = created;
    let created_at = Utc
        .with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("seed creation time is a valid UTC instant");
    UserRecord {
        id: UserId::new(id),
        full_name: full_name.to_string(),
        email: email.to_string(),
        mobile: mobile.to_string(),
        role,
        email_confirmed,
        created_at,
        active_policy_count,
    }
}

/// user-001 (demo) through user-004; user-002 is the only administrator
///
/// The demo user holds the three seed policies.
///
/// # Panics
///
/// Never with the built-in data; a malformed seed timestamp panics rather
/// than silently shrinking the directory.
pub fn mock_users() -> Vec<UserRecord> {
    vec![
        record(
            "user-001",
            "Usuario Demo",
            "demo@vesta.com",
            "+34612345678",
            Role::Usuario,
            true,
            (2025, 1, 15, 10, 30),
            3,
        ),
        record(
            "user-002",
            "Admin Vesta",
            "admin@vesta.com",
            "+34687654321",
            Role::Administrador,
            true,
            (2025, 1, 1, 8, 0),
            0,
        ),
        record(
            "user-003",
            "María García López",
            "maria.garcia@email.com",
            "+34655443322",
            Role::Usuario,
            true,
            (2025, 1, 20, 14, 15),
            0,
        ),
        record(
            "user-004",
            "Carlos Rodríguez Pérez",
            "carlos.rodriguez@email.com",
            "+34677889900",
            Role::Usuario,
            false,
            (2025, 2, 1, 9, 45),
            0,
        ),
    ]
}
