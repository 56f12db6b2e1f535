use std::path::Path;

const TYPES: &[(&str, &str)] = &[
    (".html", "text/html"),
    (".gif", "image/gif"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
];

/// Content type for a served file, chosen by its name suffix.
///
/// Anything not in the table, including names without a suffix, is sent as
/// `text/plain`.
///
/// ```
/// # use tiny::http::mime::content_type_for;
/// assert_eq!(content_type_for("./index.html".as_ref()), "text/html");
/// assert_eq!(content_type_for("./notes".as_ref()), "text/plain");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    let name = path.to_string_lossy();

    TYPES
        .iter()
        .find(|(suffix, _)| name.ends_with(suffix))
        .map(|(_, mime)| *mime)
        .unwrap_or("text/plain")
}
