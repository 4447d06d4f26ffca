//! Runs predicate calls on a helper thread so a caller can stop waiting.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};

use logsift_core::errors::LexiconError;
use logsift_core::traits::LexiconPredicate;

pub(crate) enum Lookup {
    Valid,
    Invalid,
    Failed(LexiconError),
    TimedOut,
}

struct Channel {
    requests: Sender<String>,
    responses: Receiver<Result<bool, LexiconError>>,
}

/// One helper thread serving one worker's lookups.
///
/// When a call exceeds the timeout the helper is abandoned: its channels
/// are dropped so it exits once the slow call returns, and the next call
/// starts a fresh helper.
pub(crate) struct TimedCaller {
    predicate: Arc<dyn LexiconPredicate>,
    timeout: Duration,
    channel: Option<Channel>,
}

impl TimedCaller {
    pub(crate) fn new(predicate: Arc<dyn LexiconPredicate>, timeout: Duration) -> Self {
        Self {
            predicate,
            timeout,
            channel: None,
        }
    }

    pub(crate) fn call(&mut self, token: &str) -> Lookup {
        let channel = match self.channel.take() {
            Some(c) => c,
            None => match self.spawn() {
                Ok(c) => c,
                Err(e) => return Lookup::Failed(e),
            },
        };

        if channel.requests.send(token.to_string()).is_err() {
            return Lookup::Failed(LexiconError::WorkerUnavailable {
                reason: "lookup thread exited".into(),
            });
        }

        match channel.responses.recv_timeout(self.timeout) {
            Ok(result) => {
                self.channel = Some(channel);
                match result {
                    Ok(true) => Lookup::Valid,
                    Ok(false) => Lookup::Invalid,
                    Err(e) => Lookup::Failed(e),
                }
            }
            Err(RecvTimeoutError::Timeout) => Lookup::TimedOut,
            Err(RecvTimeoutError::Disconnected) => Lookup::Failed(LexiconError::WorkerUnavailable {
                reason: "lookup thread panicked".into(),
            }),
        }
    }

    fn spawn(&self) -> Result<Channel, LexiconError> {
        let (req_tx, req_rx) = bounded::<String>(1);
        let (resp_tx, resp_rx) = bounded(1);
        let predicate = Arc::clone(&self.predicate);
        thread::Builder::new()
            .name("logsift-lookup".into())
            .spawn(move || {
                for token in req_rx {
                    if resp_tx.send(predicate.is_valid(&token)).is_err() {
                        break;
                    }
                }
            })
            .map_err(|e| LexiconError::WorkerUnavailable {
                reason: e.to_string(),
            })?;
        Ok(Channel {
            requests: req_tx,
            responses: resp_rx,
        })
    }
}
