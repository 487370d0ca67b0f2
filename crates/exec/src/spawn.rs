// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawn the child, drain its output, and wait for it to exit.

use std::io;
use std::sync::Arc;

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use parking_lot::Mutex;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinError, JoinHandle};
use tokio::time::Instant;

use crate::{interpret, Completion, ExecRequest, OutputStream, RawCompletion};

/// Size of each read from the child's stdout/stderr pipes.
const READ_CHUNK: usize = 8 * 1024;

/// Run `request` to completion.
///
/// Every outcome, including a failure to spawn at all, comes back as the
/// returned [`Completion`]. Dropping the future kills the child.
pub async fn run(request: &ExecRequest) -> Completion {
    let start = std::time::Instant::now();
    let label = request.label();
    let span = tracing::info_span!(
        "fxw.exec",
        cmd = %label,
        status = tracing::field::Empty,
        signal = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    );

    // A synchronous spawn error takes the same path as a failed wait.
    let (raw, stdout, stderr) = match request.command().spawn() {
        Ok(child) => {
            tracing::debug!(parent: &span, pid = ?child.id(), "spawned child");
            supervise(child, request, &span).await
        }
        Err(err) => {
            tracing::debug!(parent: &span, error = %err, "spawn failed");
            (RawCompletion::Error(err), Vec::new(), Vec::new())
        }
    };

    let encoding = request.output_encoding();
    let completion = interpret(
        label,
        &raw,
        encoding.decode(&stdout),
        encoding.decode(&stderr),
        request.includes_stderr(),
    );

    if let Some(status) = completion.status() {
        span.record("status", status);
    }
    if let Some(signal) = completion.signal() {
        span.record("signal", signal);
    }
    span.record("duration_ms", start.elapsed().as_millis() as u64);

    completion
}

/// Run `request` on a new tokio task and hand the result to `callback`.
///
/// The callback runs exactly once, always on the spawned task and never
/// inline in this call, whether or not the child could be spawned.
///
/// # Panics
///
/// When called outside a tokio runtime.
pub fn run_with_callback<F>(request: ExecRequest, callback: F) -> JoinHandle<()>
where
    F: FnOnce(Completion) + Send + 'static,
{
    tokio::spawn(async move {
        let completion = run(&request).await;
        callback(completion);
    })
}

/// Bytes captured so far from one output pipe.
///
/// Shared with the reader task so whatever it buffered survives an abort.
type Sink = Arc<Mutex<Vec<u8>>>;

/// Wait for a spawned child while draining both output pipes.
///
/// Enforces the request's timeout (SIGKILL) and output limit (SIGKILL when a
/// timeout is set, otherwise SIGTERM). Once the child has been killed, or the
/// deadline passes while a descendant still holds a pipe open, the readers
/// are abandoned and only what they already captured is returned.
async fn supervise(
    mut child: Child,
    request: &ExecRequest,
    span: &tracing::Span,
) -> (RawCompletion, Vec<u8>, Vec<u8>) {
    let limit = request.output_limit();
    let (overflow_tx, mut overflow_rx) = mpsc::channel(2);
    let stdout = Sink::default();
    let stderr = Sink::default();
    let stdout_task = tokio::spawn(read_capped(
        child.stdout.take(),
        OutputStream::Stdout,
        limit,
        Arc::clone(&stdout),
        overflow_tx.clone(),
    ));
    let stderr_task = tokio::spawn(read_capped(
        child.stderr.take(),
        OutputStream::Stderr,
        limit,
        Arc::clone(&stderr),
        overflow_tx,
    ));
    let aborts = [stdout_task.abort_handle(), stderr_task.abort_handle()];

    let timeout = request.timeout_duration();
    let deadline = timeout.map(|timeout| Instant::now() + timeout);
    let overflow_signal = if timeout.is_some() { Signal::SIGKILL } else { Signal::SIGTERM };

    let mut overflowed = None;
    let (status, killed) = tokio::select! {
        status = child.wait() => (status, false),
        () = expire(deadline) => {
            tracing::warn!(
                parent: span,
                timeout_ms = timeout.unwrap_or_default().as_millis() as u64,
                "timed out, killing child",
            );
            kill(&mut child, Signal::SIGKILL, span);
            (child.wait().await, true)
        }
        Some(stream) = overflow_rx.recv() => {
            tracing::warn!(parent: span, %stream, limit = ?limit, "output limit exceeded, killing child");
            overflowed = Some(stream);
            kill(&mut child, overflow_signal, span);
            (child.wait().await, true)
        }
    };

    let readers = async { (stdout_task.await, stderr_task.await) };
    tokio::pin!(readers);
    let (stdout_read, stderr_read) = if killed {
        aborts.iter().for_each(AbortHandle::abort);
        readers.await
    } else {
        // The child is gone, but a descendant may still hold its pipes.
        tokio::select! {
            results = &mut readers => results,
            () = expire(deadline) => {
                tracing::warn!(parent: span, "timed out waiting for output to close");
                aborts.iter().for_each(AbortHandle::abort);
                readers.await
            }
        }
    };

    // A reader can go over the limit after the child has already exited.
    if !killed {
        overflowed = overflow_rx.try_recv().ok();
    }
    let stdout_error = reader_error(stdout_read, span);
    let stderr_error = reader_error(stderr_read, span);
    let read_error = stdout_error.or(stderr_error);
    let raw = match (overflowed, read_error) {
        (Some(stream), _) => RawCompletion::OutputLimit {
            stream,
            limit: limit.unwrap_or_default(),
        },
        (None, Some(err)) => RawCompletion::Error(err),
        (None, None) => status.into(),
    };

    let stdout = std::mem::take(&mut *stdout.lock());
    let stderr = std::mem::take(&mut *stderr.lock());
    (raw, stdout, stderr)
}

/// Resolve once `deadline` has passed; never resolve without one.
async fn expire(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn kill(child: &mut Child, signal: Signal, span: &tracing::Span) {
    // No pid means the child has already been reaped.
    let Some(pid) = child.id().and_then(|pid| i32::try_from(pid).ok()) else {
        return;
    };
    if let Err(err) = signal::kill(Pid::from_raw(pid), signal) {
        tracing::warn!(parent: span, pid, signal = signal.as_str(), error = %err, "failed to signal child");
    }
}

/// Read `reader` to EOF into `sink`, keeping at most `limit` bytes.
///
/// Past the limit `stream` is sent on `overflow` once and the rest of the
/// stream is drained and discarded, so the child never sees a closed pipe
/// before it is signalled.
async fn read_capped<R>(
    reader: Option<R>,
    stream: OutputStream,
    limit: Option<usize>,
    sink: Sink,
    overflow: mpsc::Sender<OutputStream>,
) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let Some(mut reader) = reader else {
        return Ok(());
    };
    let mut chunk = [0u8; READ_CHUNK];
    let mut overflowed = false;
    loop {
        let n = reader
            .read(&mut chunk)
            .await
            .map_err(|err| io::Error::new(err.kind(), format!("reading child {stream}: {err}")))?;
        if n == 0 {
            return Ok(());
        }
        if overflowed {
            continue;
        }
        let mut buf = sink.lock();
        buf.extend_from_slice(&chunk[..n]);
        if let Some(limit) = limit.filter(|&limit| buf.len() > limit) {
            buf.truncate(limit);
            overflowed = true;
            // One slot per stream, so this send always fits.
            let _ = overflow.try_send(stream);
        }
    }
}

/// The error a reader task ended with, if any. Aborted readers count as clean.
fn reader_error(
    result: Result<io::Result<()>, JoinError>,
    span: &tracing::Span,
) -> Option<io::Error> {
    match result {
        Ok(Ok(())) => None,
        Ok(Err(err)) => {
            tracing::warn!(parent: span, error = %err, "error reading child output");
            Some(err)
        }
        Err(err) if err.is_cancelled() => None,
        Err(err) => {
            tracing::warn!(parent: span, error = %err, "output reader task failed");
            Some(io::Error::other(err))
        }
    }
}

#[cfg(test)]
#[path = "spawn_tests/mod.rs"]
mod tests;
