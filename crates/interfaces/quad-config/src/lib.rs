//! Central configuration constants for runtime limits and defaults.

/// Capacity of the kernel's domain-event channel. Snapshot and worker
/// callbacks that overflow it are logged and dropped.
pub const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Maximum accepted length of a single draft field, in characters.
pub const MAX_FIELD_CHARS: usize = 500;

/// Demo identity used by the CLI when none is given.
pub const DEMO_USER_ID: &str = "demo-user";

/// Demo e-mail used by the CLI when none is given.
pub const DEMO_USER_EMAIL: &str = "demo@campus.edu";

/// Convenience function to cap a draft field at the allowed length.
pub fn clamp_field(value: String) -> String {
    if value.chars().count() <= MAX_FIELD_CHARS {
        return value;
    }
    value.chars().take(MAX_FIELD_CHARS).collect()
}
