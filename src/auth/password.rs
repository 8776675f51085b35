//! Argon2 password hashing. Stored values are PHC strings.

use password_auth::{generate_hash, verify_password};

pub fn hash_password(password: &str) -> String {
    generate_hash(password)
}

pub fn password_matches(password: &str, hash: &str) -> bool {
    verify_password(password, hash).is_ok()
}
