//! HTML page rendering.
//!
//! The views are deliberately plain: one function per page producing a
//! complete document, with every dynamic value escaped. Handlers never build
//! markup themselves.

use crate::domain::User;

use super::paths;

/// Escape a value for embedding in HTML text or attribute content.
pub(crate) fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn layout(title: &str, flash: Option<&str>, body: &str) -> String {
    let banner = flash.map_or_else(String::new, |message| {
        format!("<p class=\"flash\">{}</p>\n", escape_html(message))
    });
    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<h1>{title}</h1>\n{banner}{body}\n</body>\n</html>\n"
    )
}

/// Registration form.
pub fn register_page(flash: Option<&str>) -> String {
    let body = format!(
        "<form method=\"post\" action=\"{register}\">\n\
         <label>Username <input type=\"text\" name=\"username\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n\
         <p><a href=\"{login}\">Already registered? Log in</a></p>",
        register = paths::REGISTER,
        login = paths::LOGIN,
    );
    layout("Register", flash, &body)
}

/// Login form.
pub fn login_page(flash: Option<&str>) -> String {
    let body = format!(
        "<form method=\"post\" action=\"{login}\">\n\
         <label>Username <input type=\"text\" name=\"username\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         <p><a href=\"{register}\">Need an account? Register</a></p>",
        login = paths::LOGIN,
        register = paths::REGISTER,
    );
    layout("Log in", flash, &body)
}

/// Profile-edit form.
pub fn details_page(flash: Option<&str>) -> String {
    let body = format!(
        "<form method=\"post\" action=\"{details}\">\n\
         <label>First name <input type=\"text\" name=\"firstname\"></label>\n\
         <label>Last name <input type=\"text\" name=\"lastname\"></label>\n\
         <label>Email <input type=\"text\" name=\"email\"></label>\n\
         <label>Address <input type=\"text\" name=\"address\"></label>\n\
         <button type=\"submit\">Save</button>\n\
         </form>\n\
         <p><a href=\"{profile}\">Back to profile</a></p>",
        details = paths::DETAILS,
        profile = paths::PROFILE,
    );
    layout("Your details", flash, &body)
}

/// Profile summary with the upload form and download link.
pub fn profile_page(user: &User, flash: Option<&str>) -> String {
    let details = user.details();
    let limerick = user.limerick().map_or_else(
        || "<p>No limerick uploaded yet.</p>".to_owned(),
        |limerick| {
            format!(
                "<p>Limerick: {} ({} words) <a href=\"{download}\">Download</a></p>",
                escape_html(&limerick.filename),
                limerick.word_count,
                download = paths::DOWNLOAD,
            )
        },
    );
    let body = format!(
        "<dl>\n\
         <dt>Username</dt><dd>{username}</dd>\n\
         <dt>First name</dt><dd>{firstname}</dd>\n\
         <dt>Last name</dt><dd>{lastname}</dd>\n\
         <dt>Email</dt><dd>{email}</dd>\n\
         <dt>Address</dt><dd>{address}</dd>\n\
         </dl>\n\
         {limerick}\n\
         <form method=\"post\" action=\"{upload}\" enctype=\"multipart/form-data\">\n\
         <label>Upload Limerick.txt <input type=\"file\" name=\"file\"></label>\n\
         <button type=\"submit\">Upload</button>\n\
         </form>\n\
         <p><a href=\"{details_path}\">Edit details</a> | <a href=\"{logout}\">Log out</a></p>",
        username = escape_html(user.username().as_str()),
        firstname = escape_html(&details.firstname),
        lastname = escape_html(&details.lastname),
        email = escape_html(&details.email),
        address = escape_html(&details.address),
        upload = paths::UPLOAD,
        details_path = paths::DETAILS,
        logout = paths::LOGOUT,
    );
    layout("Profile", flash, &body)
}

/// Minimal error page used by the `ResponseError` mapping.
pub fn error_page(status: u16, message: &str) -> String {
    let body = format!("<p>{}</p>", escape_html(message));
    layout(&format!("Error {status}"), None, &body)
}
