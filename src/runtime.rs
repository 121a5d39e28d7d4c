//! Headless runtime: runs commands and feeds their results back into update
//!
//! Side effects run on worker threads and report back over an mpsc channel.
//! The model is only ever touched from the thread that owns the runtime.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::commands::Cmd;
use crate::correction::CorrectionService;
use crate::messages::{CorrectionMsg, Msg};
use crate::model::{AppModel, FormValues};
use crate::update::update;

pub struct Runtime {
    model: AppModel,
    service: Arc<dyn CorrectionService>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    /// Workers spawned whose completion has not been received yet
    in_flight: usize,
    submissions: Vec<FormValues>,
}

impl Runtime {
    pub fn new(model: AppModel, service: Arc<dyn CorrectionService>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            service,
            msg_tx,
            msg_rx,
            in_flight: 0,
            submissions: Vec::new(),
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn into_model(self) -> AppModel {
        self.model
    }

    /// Sender for messages produced outside the runtime thread
    pub fn sender(&self) -> Sender<Msg> {
        self.msg_tx.clone()
    }

    /// Number of correction workers still running
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Values of every successful submit, oldest first
    pub fn take_submissions(&mut self) -> Vec<FormValues> {
        std::mem::take(&mut self.submissions)
    }

    /// Run one message through update and execute the resulting command
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::RequestCorrection {
                request_id,
                content,
            } => {
                let tx = self.msg_tx.clone();
                let service = Arc::clone(&self.service);
                self.in_flight += 1;
                std::thread::spawn(move || {
                    let result = service.correct(&content).map_err(|e| format!("{:#}", e));
                    let _ = tx.send(Msg::Correction(CorrectionMsg::Completed {
                        request_id,
                        result,
                    }));
                });
            }
            Cmd::ReportSubmission(values) => {
                tracing::info!(len = values.content.len(), "submission recorded");
                self.submissions.push(values);
            }
        }
    }

    /// Drain messages that have already arrived. Returns how many were handled.
    pub fn process_async_messages(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.receive(msg);
            handled += 1;
        }
        handled
    }

    /// Block until every spawned worker has reported back, or `timeout`
    /// elapses. Returns true if the runtime went idle.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        self.process_async_messages();
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.msg_rx.recv_timeout(remaining) {
                Ok(msg) => self.receive(msg),
                Err(RecvTimeoutError::Timeout) => {
                    tracing::warn!(in_flight = self.in_flight, "timed out waiting for workers");
                    return false;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        true
    }

    fn receive(&mut self, msg: Msg) {
        if let Msg::Correction(CorrectionMsg::Completed { .. }) = &msg {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        self.dispatch(msg);
    }
}
