#[cfg(feature = "http-backend")]
use std::{
    io::{BufRead, BufReader, Read, Write},
    net::TcpListener,
    thread::{self, JoinHandle},
};

#[cfg(feature = "http-backend")]
use dear_stranger_lib::{Backend, Draft, HttpBackend, HttpConfig, Letter, Report, Sender};

/// Serves the given responses, one per connection, and returns the
/// requests received (request line followed by the body).
#[cfg(feature = "http-backend")]
fn serve(listener: TcpListener, responses: Vec<(&'static str, String)>) -> JoinHandle<Vec<String>> {
    thread::spawn(move || {
        let mut requests = Vec::new();

        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut content_len = 0;
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                let header = header.trim_end();
                if header.is_empty() {
                    break;
                }
                if let Some((name, value)) = header.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_len = value.trim().parse().unwrap();
                    }
                }
            }

            let mut request_body = vec![0; content_len];
            reader.read_exact(&mut request_body).unwrap();
            requests.push(format!(
                "{}{}",
                request_line,
                String::from_utf8(request_body).unwrap()
            ));

            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
            stream.flush().unwrap();
        }

        requests
    })
}

#[cfg(feature = "http-backend")]
fn local_config(listener: &TcpListener) -> HttpConfig {
    let addr = listener.local_addr().unwrap();
    HttpConfig {
        letters_url: format!("http://{}/messages", addr),
        reports_url: format!("http://{}/reports", addr),
        timeout_secs: Some(5),
    }
}

#[cfg(feature = "http-backend")]
#[test]
fn test_http_backend_fetch() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let config = local_config(&listener);

    let letters = serde_json::json!([
        {
            "uuid": "a",
            "senderUuid": "stranger",
            "body": "hello",
            "hue": "#ffffff",
            "timestamp": 1000,
            "inResponseTo": null
        },
        {
            "id": "b",
            "senderId": "me",
            "body": "hi back",
            "hue": "#a0c4ff",
            "timestamp": 2000.0,
            "inResponseTo": "a"
        },
        { "uuid": "broken", "body": "no sender" },
        "not even an object"
    ]);
    let reports = serde_json::json!([
        { "letterUuid": "a", "reporterUuid": "me", "explanation": "hello" },
        { "letterUuid": "", "reporterUuid": "me" }
    ]);

    let server = serve(
        listener,
        vec![
            ("200 OK", letters.to_string()),
            ("200 OK", reports.to_string()),
            ("500 Internal Server Error", "{}".into()),
        ],
    );

    let backend = HttpBackend::new(&config).unwrap();

    let letters = backend.list_letters().unwrap();
    assert_eq!(2, letters.len());
    assert_eq!(
        Letter {
            id: "a".into(),
            sender_id: "stranger".into(),
            body: "hello".into(),
            hue: Some("#ffffff".into()),
            timestamp: 1000,
            in_response_to: None,
        },
        letters[0]
    );
    assert_eq!(Some("a"), letters[1].parent());
    assert_eq!(2000, letters[1].timestamp);

    let reports = backend.list_reports().unwrap();
    assert_eq!(1, reports.len());
    assert_eq!("a", reports[0].letter_id);
    assert_eq!("me", reports[0].reporter_id);

    assert!(backend.list_letters().is_err());

    let requests = server.join().unwrap();
    assert!(requests[0].starts_with("GET /messages "));
    assert!(requests[1].starts_with("GET /reports "));
}

#[cfg(feature = "http-backend")]
#[test]
fn test_http_backend_post() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let config = local_config(&listener);

    let server = serve(
        listener,
        vec![
            ("201 Created", "{}".into()),
            ("201 Created", "{}".into()),
            ("201 Created", "{}".into()),
            ("503 Service Unavailable", "{}".into()),
        ],
    );

    let mut backend = HttpBackend::new(&config).unwrap();
    let parent = Letter {
        id: "a".into(),
        sender_id: "stranger".into(),
        body: "hello".into(),
        hue: Some("#ffffff".into()),
        timestamp: 1000,
        in_response_to: None,
    };

    backend
        .send_letter("me", &Draft::new("dear stranger"), 1500)
        .unwrap();
    backend
        .send_letter("me", &Draft::reply_to(&parent, "hi").hue("#ffd6a5"), 2000)
        .unwrap();
    backend
        .send_report(&Report::new(&parent, "me"))
        .unwrap();
    assert!(backend
        .send_letter("me", &Draft::new("nobody home"), 3000)
        .is_err());

    let requests = server.join().unwrap();

    let (line, body) = requests[0].split_once("\r\n").unwrap();
    assert!(line.starts_with("POST /messages "));
    let body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(
        serde_json::json!({
            "senderUuid": "me",
            "body": "dear stranger",
            "hue": "#ffffff",
            "timestamp": 1500,
            "inResponseTo": null
        }),
        body
    );

    let (_, body) = requests[1].split_once("\r\n").unwrap();
    let body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!("a", body["inResponseTo"]);
    assert_eq!("#ffd6a5", body["hue"]);

    let (line, body) = requests[2].split_once("\r\n").unwrap();
    assert!(line.starts_with("POST /reports "));
    let body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(
        serde_json::json!({
            "letterUuid": "a",
            "reporterUuid": "me",
            "explanation": "hello"
        }),
        body
    );
}

#[cfg(feature = "http-backend")]
#[test]
fn test_http_backend_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let config = local_config(&listener);
    drop(listener);

    let mut backend = HttpBackend::new(&config).unwrap();
    assert!(backend.list_letters().is_err());
    assert!(backend.list_reports().is_err());
    assert!(backend
        .send_letter("me", &Draft::new("dear stranger"), 1500)
        .is_err());
}
