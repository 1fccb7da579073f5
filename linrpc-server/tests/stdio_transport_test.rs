//! Tests for the loop over real async byte streams
//!
//! Uses a duplex pipe in place of the process's stdin/stdout, which
//! exercises the same `ReaderLineSource` / `WriterLineSink` code paths
//! as the binary, including the per-line flush and the end-of-input
//! shutdown when the client closes its writing end.

use linrpc_server::{
    from_fn, MemoryErrorSink, ReaderLineSource, RequestLoop, WriterLineSink,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::test]
async fn responds_over_a_byte_stream_pair() {
    let (client, server) = tokio::io::duplex(4096);
    let (server_read, server_write) = tokio::io::split(server);
    let (client_read, mut client_write) = tokio::io::split(client);

    let loop_handle = tokio::spawn(
        RequestLoop::builder()
            .handler(
                "echo",
                from_fn(|params| async move {
                    Ok(params.unwrap_or(serde_json::Value::Null))
                }),
            )
            .source(Box::new(ReaderLineSource::new(BufReader::new(server_read))))
            .sink(Box::new(WriterLineSink::new(server_write)))
            .error_sink(Box::new(MemoryErrorSink::new()))
            .build()
            .run(),
    );

    client_write
        .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"echo\",\"params\":{\"n\":1}}\n")
        .await
        .unwrap();

    let mut responses = BufReader::new(client_read).lines();
    let line = responses
        .next_line()
        .await
        .unwrap()
        .expect("one response line");
    let response: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"], serde_json::json!({"n": 1}));

    // Closing the client's writing end is end-of-input for the loop.
    // (Dropping a split `WriteHalf` alone does not close the duplex
    // stream while the read half is alive, so shut it down explicitly.)
    client_write.shutdown().await.unwrap();
    drop(client_write);
    loop_handle.await.unwrap().unwrap();

    // Nothing further arrives after shutdown.
    assert_eq!(responses.next_line().await.unwrap(), None);
}

#[tokio::test]
async fn interleaves_requests_and_responses_one_at_a_time() {
    let (client, server) = tokio::io::duplex(4096);
    let (server_read, server_write) = tokio::io::split(server);
    let (client_read, mut client_write) = tokio::io::split(client);

    let loop_handle = tokio::spawn(
        RequestLoop::builder()
            .handler(
                "echo",
                from_fn(|params| async move {
                    Ok(params.unwrap_or(serde_json::Value::Null))
                }),
            )
            .source(Box::new(ReaderLineSource::new(BufReader::new(server_read))))
            .sink(Box::new(WriterLineSink::new(server_write)))
            .error_sink(Box::new(MemoryErrorSink::new()))
            .build()
            .run(),
    );

    let mut responses = BufReader::new(client_read).lines();

    // Each response is flushed before the next request is sent, so the
    // client can run strictly request-by-request.
    for i in 1..=3i64 {
        let request = format!(
            "{{\"jsonrpc\":\"2.0\",\"id\":{},\"method\":\"echo\",\"params\":{{\"seq\":{}}}}}\n",
            i, i
        );
        client_write.write_all(request.as_bytes()).await.unwrap();

        let line = responses.next_line().await.unwrap().unwrap();
        let response: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(response["id"], i);
        assert_eq!(response["result"]["seq"], i);
    }

    client_write.shutdown().await.unwrap();
    drop(client_write);
    loop_handle.await.unwrap().unwrap();
}
