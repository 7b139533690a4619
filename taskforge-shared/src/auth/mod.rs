/// Authentication utilities
///
/// Currently limited to password hashing; transport-level authentication
/// (sessions, tokens) is owned by whatever sits in front of the API.

pub mod password;
