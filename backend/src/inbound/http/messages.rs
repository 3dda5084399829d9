//! One-shot flash messages shown after form submissions.

/// Registration submitted with a blank username or password.
pub const CREDENTIALS_REQUIRED: &str = "Username and password are required.";
/// Registration hit an existing username.
pub const USERNAME_TAKEN: &str = "That username already exists.";
/// Login failed; unknown users and wrong passwords are not distinguished.
pub const INVALID_LOGIN: &str = "Invalid username or password.";
/// Upload form arrived without a `file` part.
pub const NO_FILE_PART: &str = "No file part.";
/// Upload form arrived with an empty filename.
pub const NO_FILE_SELECTED: &str = "No file selected.";
/// Upload filename was not the expected limerick file.
pub const WRONG_FILENAME: &str = "Please upload the file named Limerick.txt";
/// Download requested before any upload.
pub const NO_UPLOADED_FILE: &str = "No uploaded file found.";
