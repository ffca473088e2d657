//! Integration tests driving a live server thread with the client.
//!
//! Each test binds its own server on an ephemeral port, runs the accept
//! loop on a background thread, and stops it through the documented exit
//! condition: a connection that sends zero bytes.

use crappy_http::client::send_request;
use crappy_http::config::ServerConfig;
use crappy_http::error::ExchangeError;
use crappy_http::server::Responder;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const HOST: &str = "127.0.0.1";

fn assert_response_compliant(response: &str) {
    assert!(response.contains("HTTP/1.1 200 OK"));
    assert!(response.contains("Server: CrappyServer/0.0.1"));
    assert!(response.contains("Content-Type: text/plain"));
}

fn assert_request_compliant(request: &str) {
    assert!(request.contains("User-Agent: CrappyClient/0.0.1"));
    assert!(request.contains("Content-Type: text/plain"));
}

/// Bind a server with the given response body on an ephemeral port and
/// run it on a background thread.
fn spawn_responder(response: &[u8]) -> (thread::JoinHandle<(String, String)>, u16) {
    let config = ServerConfig {
        host: HOST.to_string(),
        port: 0,
        response: response.to_vec(),
        log_level: "info".to_string(),
    };

    let responder = Responder::bind(&config).expect("bind responder");
    let port = responder.local_addr().expect("local addr").port();

    let handle = thread::spawn(move || responder.run().expect("responder run"));

    (handle, port)
}

/// Trigger the accept loop's exit condition: connect and close without
/// sending any bytes.
fn shutdown_responder(port: u16) {
    let stream = TcpStream::connect((HOST, port)).expect("connect for shutdown");
    drop(stream);
}

#[test]
fn test_custom_server_response() {
    let (handle, port) = spawn_responder(b"Custom Response");

    let (request, response) = send_request(b"Test request", HOST, port).unwrap();

    assert!(response.contains("Custom Response"));
    assert!(request.contains("Test request"));
    assert_request_compliant(&request);
    assert_response_compliant(&response);

    shutdown_responder(port);
    let (last_response, last_request) = handle.join().unwrap();
    assert!(last_response.contains("Custom Response"));
    assert!(last_request.is_empty());
}

#[test]
fn test_multiple_subsequent_calls() {
    let (handle, port) = spawn_responder(b"Hello yet again");

    for payload in [&b"Call 1"[..], &b"Call 2"[..], &b"Call 3"[..]] {
        let (request, response) = send_request(payload, HOST, port).unwrap();

        assert!(response.contains("Hello yet again"));
        assert_request_compliant(&request);
        assert_response_compliant(&response);
    }

    shutdown_responder(port);
    handle.join().unwrap();
}

#[test]
fn test_empty_request_and_response_bodies() {
    let (handle, port) = spawn_responder(b"");

    let (request, response) = send_request(b"", HOST, port).unwrap();

    assert!(response.contains("HTTP/1.1 200 OK"));
    assert!(response.contains("Content-Type: text/plain"));
    assert!(!response.contains("Request received!"));
    assert_request_compliant(&request);
    assert_response_compliant(&response);

    shutdown_responder(port);
    handle.join().unwrap();
}

#[test]
fn test_special_characters_payload() {
    let (handle, port) = spawn_responder(b"Request received!");
    let special = b"!@#$%^&*()\n\t";

    let (request, response) = send_request(special, HOST, port).unwrap();

    assert!(request.contains("!@#$%^&*()\n\t"));
    assert!(response.contains("Request received!"));
    assert_request_compliant(&request);
    assert_response_compliant(&response);

    shutdown_responder(port);
    handle.join().unwrap();
}

#[test]
fn test_multibyte_utf8_payload() {
    let (handle, port) = spawn_responder("svar på förfrågan".as_bytes());
    let payload = "héllo wörld \u{1F44B}";

    let (request, response) = send_request(payload.as_bytes(), HOST, port).unwrap();

    assert!(request.contains(payload));
    assert!(response.contains("svar på förfrågan"));
    assert_request_compliant(&request);
    assert_response_compliant(&response);

    shutdown_responder(port);
    handle.join().unwrap();
}

/// A payload far beyond OS socket buffering cannot complete its send:
/// the server reads only one bounded chunk, responds, and closes, so the
/// sender's blocked write fails with a reset instead of round-tripping.
#[test]
fn test_oversized_payload_resets_sender() {
    let (handle, port) = spawn_responder(b"Request received!");
    let very_long_payload = vec![b'b'; 64 * 1024 * 1024];

    let err = send_request(&very_long_payload, HOST, port).unwrap_err();
    assert!(matches!(err, ExchangeError::Io(_)));

    // The server side saw an ordinary truncated request and keeps serving.
    let (_, response) = send_request(b"still alive?", HOST, port).unwrap();
    assert!(response.contains("Request received!"));

    shutdown_responder(port);
    handle.join().unwrap();
}

/// A reply that is not valid UTF-8 fails the client-side decode.
#[test]
fn test_invalid_utf8_response_fails_decode() {
    // Raw listener standing in for a misbehaving peer.
    let listener = TcpListener::bind((HOST, 0)).expect("bind raw listener");
    let port = listener.local_addr().expect("local addr").port();

    let peer = thread::spawn(move || {
        let (mut conn, _) = listener.accept().expect("accept");
        let mut buf = [0u8; 1024];
        conn.read(&mut buf).expect("read request");
        conn.write_all(&[0xff, 0xfe, 0xfd]).expect("write reply");
    });

    let err = send_request(b"Test request", HOST, port).unwrap_err();
    assert!(matches!(err, ExchangeError::Utf8(_)));

    peer.join().unwrap();
}

/// The accept loop is strictly one connection at a time: while the first
/// connection is still open and unanswered, a second requester's exchange
/// cannot complete; it finishes only once the first connection closes.
#[test]
fn test_second_requester_waits_for_first_connection() {
    let (handle, port) = spawn_responder(b"one at a time");

    // Hold the first connection open without sending anything, leaving
    // the server blocked in its bounded read.
    let mut first = TcpStream::connect((HOST, port)).expect("first connect");
    thread::sleep(Duration::from_millis(100));

    let (done_tx, done_rx) = mpsc::channel();
    let second = thread::spawn(move || {
        let result = send_request(b"second in line", HOST, port).unwrap();
        done_tx.send(()).unwrap();
        result
    });

    // The second exchange must not complete while the first connection
    // still owns the server.
    assert!(done_rx.recv_timeout(Duration::from_millis(300)).is_err());

    // Unblock the server; the first exchange runs to completion and the
    // second is accepted next.
    first.write_all(b"first in line").expect("first write");
    let mut reply = [0u8; 1024];
    first.read(&mut reply).expect("first read");
    drop(first);

    done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("second exchange completes after first closes");

    let (request, response) = second.join().unwrap();
    assert!(response.contains("one at a time"));
    assert_request_compliant(&request);
    assert_response_compliant(&response);

    shutdown_responder(port);
    handle.join().unwrap();
}
