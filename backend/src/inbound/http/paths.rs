//! Route paths shared between handlers, redirects, and tests.

/// Registration form and handler.
pub const REGISTER: &str = "/register";
/// Login form and handler.
pub const LOGIN: &str = "/login";
/// Session teardown.
pub const LOGOUT: &str = "/logout";
/// Profile-edit form and handler.
pub const DETAILS: &str = "/details";
/// Profile summary view.
pub const PROFILE: &str = "/profile";
/// Limerick upload handler.
pub const UPLOAD: &str = "/upload";
/// Limerick download handler.
pub const DOWNLOAD: &str = "/download";
