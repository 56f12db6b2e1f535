use tiny::content::ClientError;
use tiny::http::response::{ResponseHead, StatusCode};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::Forbidden.as_u16(), 403);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::Forbidden.reason_phrase(), "Forbidden");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not found");
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
    assert_eq!(StatusCode::NotImplemented.reason_phrase(), "Not Implemented");
}

#[test]
fn test_response_head_status_line() {
    let head = ResponseHead::new(StatusCode::Forbidden);

    assert_eq!(head.status_line(), "HTTP/1.0 403 Forbidden\r\n");
}

#[test]
fn test_response_head_keeps_duplicates_and_order() {
    let head = ResponseHead::new(StatusCode::Ok)
        .header("X-A", "1")
        .header("X-B", "2")
        .header("X-A", "3");

    assert_eq!(
        head.headers,
        vec![
            ("X-A".to_string(), "1".to_string()),
            ("X-B".to_string(), "2".to_string()),
            ("X-A".to_string(), "3".to_string()),
        ]
    );
}

#[test]
fn test_response_head_empty_block() {
    let head = ResponseHead::new(StatusCode::Ok).finish();

    assert_eq!(&head.to_bytes()[..], b"HTTP/1.0 200 OK\r\n\r\n");
}

#[test]
fn test_client_error_constructors() {
    let cases = vec![
        (ClientError::not_implemented("POST"), 501, "POST"),
        (ClientError::not_found("./a.html"), 404, "./a.html"),
        (ClientError::unreadable("./b.html"), 403, "./b.html"),
        (ClientError::not_runnable("./cgi-bin/x"), 403, "./cgi-bin/x"),
        (ClientError::outside_root("./../etc"), 403, "./../etc"),
        (ClientError::spawn_failed("./cgi-bin/y"), 500, "./cgi-bin/y"),
    ];

    for (err, code, cause) in cases {
        assert_eq!(err.status.as_u16(), code);
        assert_eq!(err.cause, cause);
        assert!(err.body(4096).contains(&format!("{}: {}\r\n", err.long_message, cause)));
    }
}
