//! Producer actor - runs turns against the response producer in Tokio

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::error::{TurnFailure, TurnStage};
use crate::messages::{ProducerCommand, ProducerResponse};
use crate::producer::ResponseProducer;

/// Producer actor that processes turn commands
pub struct ProducerActor {
    producer: Arc<dyn ResponseProducer>,
    response_tx: mpsc::UnboundedSender<ProducerResponse>,
    active_turns: JoinSet<()>,
}

impl ProducerActor {
    pub fn new(
        producer: Arc<dyn ResponseProducer>,
        response_tx: mpsc::UnboundedSender<ProducerResponse>,
    ) -> Self {
        ProducerActor {
            producer,
            response_tx,
            active_turns: JoinSet::new(),
        }
    }

    /// Run the actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<ProducerCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(ProducerCommand::Turn { id, text }) => {
                            let producer = Arc::clone(&self.producer);
                            let response_tx = self.response_tx.clone();

                            self.active_turns.spawn(async move {
                                tracing::info!(id, len = text.len(), "Running turn");
                                let response = match run_turn(producer.as_ref(), &text).await {
                                    Ok(reply) => {
                                        tracing::info!(id, chars = reply.content.chars().count(), "Turn replied");
                                        ProducerResponse::Reply { id, reply }
                                    }
                                    Err(failure) => {
                                        tracing::warn!(id, error = %failure, "Turn failed");
                                        ProducerResponse::Failed { id, failure }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(ProducerCommand::Shutdown) => {
                            self.active_turns.abort_all();
                            break;
                        }

                        None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_turns.join_next() => {}
            }
        }
    }
}

/// Submit then fetch, strictly in sequence. Either failure ends the turn.
pub async fn run_turn(
    producer: &dyn ResponseProducer,
    text: &str,
) -> Result<crate::models::Reply, TurnFailure> {
    producer
        .submit(text)
        .await
        .map_err(|e| TurnFailure::new(TurnStage::Submit, e))?;

    producer
        .fetch_reply()
        .await
        .map_err(|e| TurnFailure::new(TurnStage::Fetch, e))
}
