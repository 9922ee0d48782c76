//! HTTP status classification
//!
//! Status codes and descriptions as documented for the Apple Music API.

use super::types::StatusOutcome;

const UNAUTHORIZED_DESCRIPTION: &str = concat!(
    "    The request wasn’t accepted because its authorization is missing or invalid due to an issue with the developer token.\n",
    "    (For personal endpoints) Authorization issues may occur because the user wasn’t signed in or didn’t have a valid Apple Music subscription.\n",
    "    (For music user token request) Developer token issues may occur because the token wasn’t received or was invalid. There could also be an error processing the request.",
);

const FORBIDDEN_DESCRIPTION: &str = concat!(
    "    The request wasn’t accepted due to an issue with the music user token or because it’s using incorrect authentication.\n",
    "    (For personal endpoints) Authentication issues may occur if the account hasn’t accepted the Media and Apple Music privacy setting.",
);

/// Classify an HTTP status code
///
/// Total over `u16`: unlisted codes are unsuccessful with the name
/// "Unknown Status Code".
pub fn classify_status(code: u16) -> StatusOutcome {
    let (is_success, code_name, description) = match code {
        200 => (true, "OK", "The request was successful; no errors or faults."),
        201 => (true, "Created", "Creation request was successful."),
        202 => (
            true,
            "Accepted",
            "Modification request was accepted but may not have completed.",
        ),
        204 => (
            true,
            "No Content",
            "Modification was successful, but there’s no content in the response.",
        ),
        301 => (
            false,
            "Moved Permanently",
            "Content may be available at a different URL.",
        ),
        302 => (
            false,
            "Found",
            "Content definitely available at a specific URL.",
        ),
        400 => (false, "Bad Request", "The request wasn’t accepted as formed."),
        401 => (false, "Unauthorized", UNAUTHORIZED_DESCRIPTION),
        403 => (false, "Forbidden", FORBIDDEN_DESCRIPTION),
        404 => (false, "Not Found", "The requested resource doesn’t exist."),
        405 => (
            false,
            "Method Not Allowed",
            "The method can’t be used for the request.",
        ),
        409 => (
            false,
            "Conflict",
            "A modification or creation request couldn’t be processed because there’s a conflict with the current state of the resource.",
        ),
        413 => (
            false,
            "Payload Too Large",
            "The body of the request is too large.",
        ),
        414 => (
            false,
            "URI Too Long",
            "The URI of the request is too long and won’t be processed.",
        ),
        429 => (
            false,
            "Too Many Requests",
            "The user has made too many requests. See Simulate the Too Many Requests Error.",
        ),
        500 => (
            false,
            "Internal Server Error",
            "There’s an error processing the request.",
        ),
        501 => (
            false,
            "Not Implemented",
            "Endpoint is currently unavailable and reserved for future use.",
        ),
        503 => (
            false,
            "Service Unavailable",
            "The service is currently unavailable to process requests.",
        ),
        _ => (false, "Unknown Status Code", "No Description Available."),
    };

    StatusOutcome {
        is_success,
        code_name,
        description,
    }
}
