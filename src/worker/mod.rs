use anyhow::Result;
use erd_builder::db::{describe_error, Extractor};
use erd_builder::types::Schema;
use std::sync::mpsc;
use std::thread;
use tracing::debug;

/// Messages sent to the worker thread
#[derive(Debug)]
pub enum WorkerMessage {
    LoadSchema { connection: String },
    Shutdown,
}

/// Responses sent back from the worker thread
#[derive(Debug)]
pub enum WorkerResponse {
    SchemaLoaded { schema: Schema },
    Error { message: String },
}

/// Worker thread that runs schema extraction off the UI thread
pub struct Worker {
    sender: mpsc::Sender<WorkerMessage>,
    receiver: mpsc::Receiver<WorkerResponse>,
    handle: thread::JoinHandle<()>,
}

impl Worker {
    pub fn new(extractor: Extractor) -> Self {
        let (tx, rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();

        let handle = thread::spawn(move || loop {
            match rx.recv() {
                Ok(WorkerMessage::LoadSchema { connection }) => {
                    debug!("Worker loading schema");
                    let response = match extractor.extract(&connection) {
                        Ok(schema) => WorkerResponse::SchemaLoaded { schema },
                        Err(e) => WorkerResponse::Error {
                            message: describe_error(&e),
                        },
                    };
                    let _ = response_tx.send(response);
                }
                Ok(WorkerMessage::Shutdown) => {
                    break;
                }
                Err(_) => {
                    // Channel closed, exit
                    break;
                }
            }
        });

        Self {
            sender: tx,
            receiver: response_rx,
            handle,
        }
    }

    /// Send a message to the worker
    pub fn send(&self, message: WorkerMessage) -> Result<()> {
        self.sender.send(message)?;
        Ok(())
    }

    /// Try to receive a response (non-blocking)
    pub fn try_recv(&self) -> Result<Option<WorkerResponse>> {
        match self.receiver.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => {
                Err(anyhow::anyhow!("Worker thread disconnected"))
            }
        }
    }

    /// Shutdown the worker thread
    pub fn shutdown(self) -> Result<()> {
        self.sender.send(WorkerMessage::Shutdown)?;
        self.handle
            .join()
            .map_err(|_| anyhow::anyhow!("Worker thread panicked"))?;
        Ok(())
    }
}
