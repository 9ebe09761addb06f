//! Simulated assistant backend.
//!
//! Stands in for a real request/response client: each successful send gets
//! exactly one reply, delivered over the app event channel after a fixed
//! delay. A real backend replaces this module and keeps the same contract —
//! one reply per send, addressed to the conversation that was active at send
//! time, dropped by the receiver if that conversation is gone by the time it
//! resolves.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use super::event::AppEvent;

/// Fixed think-time before the canned reply lands.
pub const RESPONSE_DELAY: Duration = Duration::from_millis(1000);

/// The canned reply body.
pub const REPLY_TEXT: &str =
    "This is a simulated response from the AI. Replace this with actual API integration.";

/// Schedule the reply for one send. Fires exactly once; the receiving side
/// decides whether the target conversation still exists.
pub fn spawn_response(conversation_id: String, tx: UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        tokio::time::sleep(RESPONSE_DELAY).await;
        // The app may already be shutting down; a closed channel is fine.
        let _ = tx.send(AppEvent::ResponseReady {
            conversation_id,
            content: REPLY_TEXT.to_string(),
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_the_fixed_delay_and_only_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_response("conv-1".to_string(), tx);

        // Just short of the delay: nothing yet.
        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(rx.try_recv().is_err());

        // Past the delay: exactly one reply, addressed to the right place.
        tokio::time::sleep(Duration::from_millis(2)).await;
        match rx.try_recv() {
            Ok(AppEvent::ResponseReady {
                conversation_id,
                content,
            }) => {
                assert_eq!(conversation_id, "conv-1");
                assert_eq!(content, REPLY_TEXT);
            }
            other => panic!("expected ResponseReady, got {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_send_gets_its_own_reply() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_response("a".to_string(), tx.clone());
        spawn_response("b".to_string(), tx);

        tokio::time::sleep(RESPONSE_DELAY + Duration::from_millis(5)).await;

        let mut ids = Vec::new();
        while let Ok(AppEvent::ResponseReady {
            conversation_id, ..
        }) = rx.try_recv()
        {
            ids.push(conversation_id);
        }
        ids.sort();
        assert_eq!(ids, ["a", "b"]);
    }
}
