use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::UnixStream;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::events::AppEvent;
use crate::io;

#[tokio::test]
async fn query_is_every_byte_until_the_peer_closes() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("inkdict-test.sock");

    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let cancel = CancellationToken::new();
    let listener = io::bind(&path).unwrap();
    let server = tokio::spawn(io::serve(listener, tx, cancel.clone()));

    // The transport has no framing: two writes, one query.
    let mut stream = UnixStream::connect(&path).await.unwrap();
    stream.write_all(b"ca").await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    stream.write_all(b"t").await.unwrap();
    stream.shutdown().await.unwrap();
    drop(stream);

    let event = timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for the query")
        .expect("channel closed");
    let AppEvent::Query(query) = event;
    assert_eq!(query, "cat");

    cancel.cancel();
    let _ = timeout(Duration::from_secs(2), server).await;
}

#[tokio::test]
async fn each_connection_is_one_query() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("inkdict-test.sock");

    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let cancel = CancellationToken::new();
    let listener = io::bind(&path).unwrap();
    let server = tokio::spawn(io::serve(listener, tx, cancel.clone()));

    io::forward_query(&path, "first").await.unwrap();
    io::forward_query(&path, "second").await.unwrap();

    let mut received = Vec::new();
    for _ in 0..2 {
        let event = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out")
            .expect("channel closed");
        let AppEvent::Query(query) = event;
        received.push(query);
    }
    received.sort();
    assert_eq!(received, ["first", "second"]);

    cancel.cancel();
    let _ = timeout(Duration::from_secs(2), server).await;
}

#[tokio::test]
async fn forwarding_without_an_instance_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nobody-home.sock");
    assert!(io::forward_query(&path, "cat").await.is_err());
}

#[tokio::test]
async fn binding_replaces_a_stale_socket_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("stale.sock");

    // First instance died without cleanup.
    let first = io::bind(&path).unwrap();
    drop(first);
    assert!(path.exists());

    let listener = io::bind(&path).unwrap();
    drop(listener);
}
