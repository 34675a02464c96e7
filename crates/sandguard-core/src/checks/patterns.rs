//! Shared detection patterns for checks.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Environment variable names that usually carry credentials.
    /// Matches anywhere in the name: DB_PASSWORD, GITHUB_TOKEN, OPENAI_API_KEY, ...
    pub static ref SECRET_LIKE_NAME: Regex = Regex::new(
        r"(?i)(token|secret|password|api[_-]?key)"
    ).unwrap();
}

/// Suffix marking a variable that points at a mounted secret file.
pub const FILE_SUFFIX: &str = "_FILE";

/// Check if an environment variable name looks credential-bearing.
pub fn is_secret_like(name: &str) -> bool {
    SECRET_LIKE_NAME.is_match(name)
}

/// Check if a variable uses the `*_FILE` indirection.
///
/// Case-sensitive: `db_password_file` is not exempt.
pub fn is_file_reference(name: &str) -> bool {
    name.ends_with(FILE_SUFFIX)
}
