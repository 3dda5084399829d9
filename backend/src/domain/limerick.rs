//! Limerick upload rules: the canonical upload filename, per-user storage
//! keys, and the word count.

use crate::domain::Username;

/// Filename the upload form must carry, compared case-insensitively.
pub const EXPECTED_UPLOAD_NAME: &str = "Limerick.txt";

/// Suffix appended to the username to form the per-user storage key.
const STORAGE_SUFFIX: &str = "_Limerick.txt";

/// Whether a submitted filename names the expected limerick file.
///
/// The expected name is ASCII, so an ASCII case-insensitive comparison covers
/// every accepted spelling (`limerick.txt`, `LIMERICK.TXT`, ...).
pub fn is_expected_upload_name(filename: &str) -> bool {
    filename.eq_ignore_ascii_case(EXPECTED_UPLOAD_NAME)
}

/// Storage key of a user's limerick blob: `{username}_Limerick.txt`.
///
/// Derived deterministically from the username, so each user owns at most one
/// blob and a new upload overwrites the previous one.
pub fn storage_key(username: &Username) -> String {
    format!("{username}{STORAGE_SUFFIX}")
}

/// Count the words in an uploaded blob.
///
/// Bytes are decoded leniently (invalid sequences become replacement
/// characters rather than failing the upload), then split on runs of
/// whitespace; the count is the number of non-empty tokens.
///
/// # Examples
/// ```
/// use backend::domain::limerick::word_count;
///
/// assert_eq!(word_count(b"one two  three"), 3);
/// assert_eq!(word_count(b"   "), 0);
/// ```
pub fn word_count(bytes: &[u8]) -> u32 {
    let text = String::from_utf8_lossy(bytes);
    let count = text.split_whitespace().count();
    // Clamp rather than fail: a count beyond u32 is not a real limerick.
    u32::try_from(count).unwrap_or(u32::MAX)
}
