#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::OVERLAY_DURATION_MS;
use crate::infrastructure::relay::RelayClient;

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        client: RelayClient,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        loop {
            let event = rx.recv().await;
            if event.is_none() {
                continue;
            }

            let worker_tx = tx.clone();
            match event.unwrap() {
                Action::OverlayTimer() => {
                    tokio::spawn(async move {
                        time::sleep(time::Duration::from_millis(OVERLAY_DURATION_MS)).await;
                        return worker_tx.send(Event::OverlayExpired());
                    });
                }
                Action::RelayRequest(text) => {
                    let worker_client = client.clone();
                    tokio::spawn(async move {
                        match worker_client.send(&text).await {
                            Ok(reply) => {
                                return worker_tx.send(Event::RelayResponse(reply));
                            }
                            Err(err) => {
                                return worker_tx.send(Event::RelayFailure(err.to_string()));
                            }
                        }
                    });
                }
            }
        }
    }
}
