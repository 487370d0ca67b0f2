// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the pipe readers, driven by in-memory readers.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};
use tokio::sync::mpsc;

use crate::spawn::{read_capped, reader_error, Sink};
use crate::OutputStream;

/// Yields `data` once, then fails every read.
struct FailingPipe {
    data: Option<&'static [u8]>,
}

impl AsyncRead for FailingPipe {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.data.take() {
            Some(data) => {
                buf.put_slice(data);
                Poll::Ready(Ok(()))
            }
            None => Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe went away"))),
        }
    }
}

#[tokio::test]
async fn read_error_is_returned_with_what_was_read() {
    let sink = Sink::default();
    let (tx, _rx) = mpsc::channel(2);
    let pipe = FailingPipe { data: Some(b"partial") };

    let err = read_capped(Some(pipe), OutputStream::Stdout, None, sink.clone(), tx)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert_eq!(err.to_string(), "reading child stdout: pipe went away");
    assert_eq!(sink.lock().as_slice(), b"partial");
}

#[tokio::test]
async fn overflow_is_reported_once_and_rest_discarded() {
    let sink = Sink::default();
    let (tx, mut rx) = mpsc::channel(2);
    let pipe: &[u8] = b"0123456789abcdef";

    read_capped(Some(pipe), OutputStream::Stderr, Some(4), sink.clone(), tx)
        .await
        .unwrap();

    assert_eq!(sink.lock().as_slice(), b"0123");
    assert_eq!(rx.recv().await, Some(OutputStream::Stderr));
    assert_eq!(rx.recv().await, None);
}

#[tokio::test]
async fn missing_pipe_reads_nothing() {
    let sink = Sink::default();
    let (tx, _rx) = mpsc::channel(2);
    read_capped(None::<&[u8]>, OutputStream::Stdout, Some(4), sink.clone(), tx)
        .await
        .unwrap();
    assert!(sink.lock().is_empty());
}

#[tokio::test]
async fn reader_errors_surface_but_aborts_do_not() {
    let span = tracing::Span::none();

    let failed = tokio::spawn(async { Err::<(), _>(io::Error::other("boom")) }).await;
    assert_eq!(reader_error(failed, &span).map(|err| err.to_string()), Some("boom".to_string()));

    let clean = tokio::spawn(async { Ok::<(), io::Error>(()) }).await;
    assert!(reader_error(clean, &span).is_none());

    let aborted = tokio::spawn(std::future::pending::<io::Result<()>>());
    aborted.abort();
    assert!(reader_error(aborted.await, &span).is_none());
}
