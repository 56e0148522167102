//! Username validation.

/// Is this a well-formed username?
///
/// The accepted shape is 3–16 characters drawn from ASCII letters,
/// digits, and underscore (the usual game-account alphabet). Anything
/// else (too short, too long, spaces, unicode) is rejected before it
/// can reach the roster.
pub fn is_valid_username(name: &str) -> bool {
    (3..=16).contains(&name.len())
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
