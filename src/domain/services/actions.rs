#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::GeneratorBox;

pub struct ActionsService {}

impl ActionsService {
    /// Runs actions sent by the UI one at a time until the UI hangs up.
    /// Generation requests are awaited to completion; there is no abort.
    pub async fn start(
        generator: GeneratorBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        loop {
            let action = match rx.recv().await {
                Some(action) => action,
                None => return Ok(()),
            };

            match action {
                Action::Generate(request) => {
                    let res = generator.generate(request).await;
                    tx.send(Event::GenerationResult(res))?;
                }
            }
        }
    }
}
