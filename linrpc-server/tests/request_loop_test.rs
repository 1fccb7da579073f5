//! End-to-end tests for the request loop over in-memory streams
//!
//! These tests drive the public API exactly the way the binary does,
//! with the stdio streams swapped for in-memory doubles: a scripted
//! line source, a collecting line sink, and a collecting error sink.

use linrpc_core::Error;
use linrpc_server::{
    from_fn, from_typed_fn, MemoryErrorSink, MemoryLineSink, MemoryLineSource, RequestLoop,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct SayHelloParams {
    #[serde(default = "default_name")]
    name: String,
}

fn default_name() -> String {
    "World".to_string()
}

#[derive(Deserialize)]
struct ProcessPathParams {
    #[serde(default)]
    path: String,
}

/// Run the example responder over the given input lines and return
/// (response lines, error reports).
async fn run_responder(lines: &[&str]) -> (Vec<String>, Vec<String>) {
    let sink = MemoryLineSink::new();
    let errors = MemoryErrorSink::new();
    let out = sink.buffer();
    let reports = errors.buffer();

    RequestLoop::builder()
        .handler(
            "say_hello",
            from_typed_fn(|p: SayHelloParams| async move {
                Ok(format!("Hello, {}!", p.name))
            }),
        )
        .handler(
            "process_path",
            from_typed_fn(|p: ProcessPathParams| async move {
                Ok(format!("Successfully processed path: {}", p.path))
            }),
        )
        .handler(
            "always_fails",
            from_fn(|_| async { Err(Error::Internal("deliberate failure".to_string())) }),
        )
        .source(Box::new(MemoryLineSource::new(lines.to_vec())))
        .sink(Box::new(sink))
        .error_sink(Box::new(errors))
        .build()
        .run()
        .await
        .expect("loop should shut down cleanly");

    let out = out.lock().unwrap().clone();
    let reports = reports.lock().unwrap().clone();
    (out, reports)
}

fn parse(line: &str) -> serde_json::Value {
    serde_json::from_str(line).expect("response line should be valid JSON")
}

#[tokio::test]
async fn say_hello_with_name() {
    let (out, reports) =
        run_responder(&[r#"{"jsonrpc":"2.0","id":1,"method":"say_hello","params":{"name":"Ada"}}"#])
            .await;

    assert_eq!(out.len(), 1);
    assert!(reports.is_empty());

    let response = parse(&out[0]);
    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"], "Hello, Ada!");
    assert!(response.get("error").is_none());
}

#[tokio::test]
async fn say_hello_without_params_defaults_to_world() {
    let (out, _) = run_responder(&[r#"{"jsonrpc":"2.0","id":2,"method":"say_hello"}"#]).await;

    assert_eq!(out.len(), 1);
    let response = parse(&out[0]);
    assert_eq!(response["id"], 2);
    assert_eq!(response["result"], "Hello, World!");
}

#[tokio::test]
async fn malformed_line_is_dropped_and_loop_survives() {
    let (out, reports) = run_responder(&[
        "not json at all",
        r#"{"jsonrpc":"2.0","id":5,"method":"say_hello"}"#,
    ])
    .await;

    // No response for the garbage line, one for the request after it.
    assert_eq!(out.len(), 1);
    assert_eq!(parse(&out[0])["id"], 5);

    // Exactly one report on the secondary error channel.
    assert_eq!(reports.len(), 1);
    assert!(reports[0].contains("parse error"));
}

#[tokio::test]
async fn process_path_result_mentions_the_path() {
    let (out, _) = run_responder(&[
        r#"{"jsonrpc":"2.0","id":3,"method":"process_path","params":{"path":"/tmp/x"}}"#,
    ])
    .await;

    assert_eq!(out.len(), 1);
    let response = parse(&out[0]);
    assert_eq!(response["id"], 3);
    let result = response["result"].as_str().unwrap();
    assert!(result.contains("/tmp/x"));
}

#[tokio::test]
async fn empty_input_exits_cleanly_with_no_output() {
    let (out, reports) = run_responder(&[]).await;
    assert!(out.is_empty());
    assert!(reports.is_empty());
}

#[tokio::test]
async fn valid_json_non_objects_produce_no_response() {
    let (out, reports) = run_responder(&["42", "[1,2,3]", "\"hello\"", "null"]).await;
    assert!(out.is_empty());
    assert_eq!(reports.len(), 4);
}

#[tokio::test]
async fn id_type_is_preserved_exactly() {
    let (out, _) = run_responder(&[
        r#"{"jsonrpc":"2.0","id":"req-1","method":"say_hello"}"#,
        r#"{"jsonrpc":"2.0","id":7,"method":"say_hello"}"#,
        r#"{"jsonrpc":"2.0","id":null,"method":"say_hello"}"#,
    ])
    .await;

    assert_eq!(out.len(), 3);
    assert_eq!(parse(&out[0])["id"], serde_json::json!("req-1"));
    assert_eq!(parse(&out[1])["id"], serde_json::json!(7));
    assert_eq!(parse(&out[2])["id"], serde_json::Value::Null);
}

#[tokio::test]
async fn unusual_scalar_ids_still_get_answered() {
    let (out, reports) = run_responder(&[
        r#"{"jsonrpc":"2.0","id":1.5,"method":"say_hello"}"#,
        r#"{"jsonrpc":"2.0","id":18446744073709551615,"method":"say_hello"}"#,
        r#"{"jsonrpc":"2.0","id":true,"method":"say_hello"}"#,
    ])
    .await;

    assert_eq!(out.len(), 3);
    assert!(reports.is_empty());
    assert_eq!(parse(&out[0])["id"], serde_json::json!(1.5));
    assert_eq!(parse(&out[1])["id"], serde_json::json!(18446744073709551615u64));
    assert_eq!(parse(&out[2])["id"], serde_json::json!(true));
}

#[tokio::test]
async fn request_without_version_tag_is_answered() {
    let (out, reports) = run_responder(&[r#"{"id":10,"method":"say_hello"}"#]).await;

    assert_eq!(out.len(), 1);
    assert!(reports.is_empty());
    let response = parse(&out[0]);
    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 10);
    assert_eq!(response["result"], "Hello, World!");
}

#[tokio::test]
async fn say_hello_is_idempotent() {
    let line = r#"{"jsonrpc":"2.0","id":9,"method":"say_hello","params":{"name":"Ada"}}"#;
    let (out, _) = run_responder(&[line, line]).await;

    assert_eq!(out.len(), 2);
    assert_eq!(out[0], out[1]);
}

#[tokio::test]
async fn unknown_method_gets_a_method_not_found_response() {
    let (out, reports) =
        run_responder(&[r#"{"jsonrpc":"2.0","id":4,"method":"frobnicate"}"#]).await;

    assert_eq!(out.len(), 1);
    let response = parse(&out[0]);
    assert_eq!(response["id"], 4);
    assert!(response.get("result").is_none());
    assert_eq!(response["error"]["code"], -32601);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("frobnicate"));
    assert_eq!(reports.len(), 1);
}

#[tokio::test]
async fn failing_handler_gets_an_internal_error_response() {
    let (out, reports) =
        run_responder(&[r#"{"jsonrpc":"2.0","id":6,"method":"always_fails"}"#]).await;

    assert_eq!(out.len(), 1);
    let response = parse(&out[0]);
    assert_eq!(response["id"], 6);
    assert_eq!(response["error"]["code"], -32603);
    assert_eq!(reports.len(), 1);
    assert!(reports[0].contains("deliberate failure"));
}

#[tokio::test]
async fn mistyped_params_get_an_invalid_params_response() {
    let (out, _) = run_responder(&[
        r#"{"jsonrpc":"2.0","id":8,"method":"say_hello","params":{"name":12}}"#,
    ])
    .await;

    assert_eq!(out.len(), 1);
    let response = parse(&out[0]);
    assert_eq!(response["id"], 8);
    assert_eq!(response["error"]["code"], -32602);
}

#[tokio::test]
async fn every_decoded_request_yields_exactly_one_response() {
    let (out, _) = run_responder(&[
        r#"{"jsonrpc":"2.0","id":1,"method":"say_hello"}"#,
        "garbage",
        r#"{"jsonrpc":"2.0","id":2,"method":"frobnicate"}"#,
        r#"{"jsonrpc":"2.0","id":3,"method":"process_path","params":{"path":"a"}}"#,
    ])
    .await;

    // Three decoded requests, three responses, in input order.
    assert_eq!(out.len(), 3);
    assert_eq!(parse(&out[0])["id"], 1);
    assert_eq!(parse(&out[1])["id"], 2);
    assert_eq!(parse(&out[2])["id"], 3);
}
