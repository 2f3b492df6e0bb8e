//! Streams a rendered report out of the blocking render worker.
//!
//! The worker signals once the document is built. Failures up to that point
//! come back as a `RenderError` the handler can still turn into a response.
//! Anything that fails afterwards can only abort the body.

use std::io::{self, Write};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};
use tokio_stream::wrappers::ReceiverStream;
use tracing::error;

use crate::report::layout::plan_report;
use crate::report::pdf::{build_document, write_document};
use crate::report::{RenderError, ReportPayload};

const CHANNEL_CAPACITY: usize = 16;

pub type ReportStream = ReceiverStream<Result<Bytes, io::Error>>;

/// `io::Write` adapter that forwards each write as a chunk to an async receiver.
/// Must only be used from a blocking thread.
pub struct ChannelWriter {
    tx: mpsc::Sender<Result<Bytes, io::Error>>,
}

impl ChannelWriter {
    pub fn new(tx: mpsc::Sender<Result<Bytes, io::Error>>) -> Self {
        Self { tx }
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.tx
            .blocking_send(Ok(Bytes::copy_from_slice(buf)))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "report receiver dropped"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Plans and builds the report on a blocking worker, then streams its bytes.
/// Resolves after the build step: `Err` if the document could not be built.
pub async fn render_stream(
    payload: ReportPayload,
    generated_at: DateTime<Utc>,
) -> Result<ReportStream, RenderError> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (ready_tx, ready_rx) = oneshot::channel::<Result<(), RenderError>>();
    let abort_tx = tx.clone();

    let worker = tokio::task::spawn_blocking(move || {
        let plan = plan_report(&payload, generated_at);
        let doc = match build_document(&plan) {
            Ok(doc) => doc,
            Err(e) => {
                let _ = ready_tx.send(Err(e));
                return;
            }
        };

        if ready_tx.send(Ok(())).is_err() {
            return;
        }

        if let Err(e) = write_document(doc, ChannelWriter::new(tx.clone())) {
            error!("Report stream aborted mid-response: {e}");
            let _ = tx.blocking_send(Err(io::Error::new(io::ErrorKind::Other, e.to_string())));
        }
    });

    tokio::spawn(async move {
        if let Err(e) = worker.await {
            error!("Report worker panicked: {e}");
            let _ = abort_tx
                .send(Err(io::Error::new(io::ErrorKind::Other, "report worker panicked")))
                .await;
        }
    });

    match ready_rx.await {
        Ok(Ok(())) => Ok(ReceiverStream::new(rx)),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(RenderError::Worker(
            "worker exited before the document was built".to_string(),
        )),
    }
}
