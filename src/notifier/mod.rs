mod message;
mod matrix;

use async_trait::async_trait;
use derive_more::Display;
pub use message::*;
pub use matrix::*;
use crate::domain::{AnnouncedState, GiveawayEntry};

#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, message: &Message) -> anyhow::Result<()>;
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Display)]
#[display("{sent} sent, {failed} failed")]
pub struct Report {
    pub sent: usize,
    pub failed: usize,
}

pub struct Notifier<S: MessageSender> {
    sender: S,
}

impl <S: MessageSender> Notifier<S> {
    pub fn new(sender: S) -> Self {
        Self { sender }
    }

    #[cfg(test)]
    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Sends one message per entry in the given order, skipping ids which are already in the state.
    /// Only successfully sent entries are marked as announced; a failure is logged and the remaining
    /// entries are still tried.
    pub async fn announce(&self, entries: &[&GiveawayEntry], state: &mut AnnouncedState) -> Report {
        let mut report = Report::default();
        for entry in entries {
            if state.contains(entry.id) {
                log::debug!("'{}' (id={}) has already been announced", entry.title, entry.id);
                continue
            }
            match self.send(entry).await {
                Ok(()) => {
                    log::info!("sent a message for '{}' (id={})", entry.title, entry.id);
                    state.insert(entry.id);
                    report.sent += 1;
                }
                Err(e) => {
                    log::error!("failed to send a message for '{}' (id={}): {e}", entry.title, entry.id);
                    report.failed += 1;
                }
            }
        }
        report
    }

    async fn send(&self, entry: &GiveawayEntry) -> anyhow::Result<()> {
        let message = Message::render(entry)?;
        self.sender.send(&message).await
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::sync::Mutex;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use super::{Message, MessageSender, Notifier, Report};
    use crate::domain::{AnnouncedState, GiveawayEntry, GiveawayId};

    /// Records every message and rejects the ones whose text contains `fail_on`.
    #[derive(Default)]
    pub(crate) struct RecordingSender {
        pub sent: Mutex<Vec<Message>>,
        pub fail_on: Option<String>,
    }

    impl RecordingSender {
        pub fn failing_on(title: &str) -> Self {
            Self {
                fail_on: Some(title.to_owned()),
                ..Default::default()
            }
        }

        pub fn sent_count(&self) -> usize {
            self.sent.lock().expect("poisoned").len()
        }
    }

    #[async_trait]
    impl MessageSender for RecordingSender {
        async fn send(&self, message: &Message) -> anyhow::Result<()> {
            if self.fail_on.as_ref().is_some_and(|title| message.plain.contains(title.as_str())) {
                return Err(anyhow!("M_FORBIDDEN"))
            }
            self.sent.lock().expect("poisoned").push(message.clone());
            Ok(())
        }
    }

    pub(crate) fn entry(id: i64, title: &str, platforms: &str) -> GiveawayEntry {
        GiveawayEntry {
            id: GiveawayId(id),
            title: title.to_owned(),
            worth: "N/A".to_owned(),
            platforms: platforms.to_owned(),
            url: format!("https://www.gamerpower.com/open/{id}"),
            end_date: "N/A".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_announce_in_order() {
        let notifier = Notifier::new(RecordingSender::default());
        let (first, second) = (entry(1, "First", "Steam"), entry(2, "Second", "GOG"));
        let mut state = AnnouncedState::default();

        let report = notifier.announce(&[&first, &second], &mut state).await;

        assert_eq!(report, Report { sent: 2, failed: 0 });
        assert_eq!(state, [1, 2].map(GiveawayId).into_iter().collect::<AnnouncedState>());
        let sent = notifier.sender.sent.lock().unwrap();
        assert!(sent[0].plain.contains("First"));
        assert!(sent[1].plain.contains("Second"));
    }

    #[tokio::test]
    async fn test_same_id_is_sent_once() {
        let notifier = Notifier::new(RecordingSender::default());
        let (copy, other) = (entry(1, "Same", "Steam"), entry(2, "Other", "GOG"));
        let mut state = [GiveawayId(2)].into_iter().collect::<AnnouncedState>();

        let report = notifier.announce(&[&copy, &copy, &other], &mut state).await;

        assert_eq!(report, Report { sent: 1, failed: 0 });
        assert_eq!(notifier.sender.sent_count(), 1);
        assert_eq!(state, [1, 2].map(GiveawayId).into_iter().collect::<AnnouncedState>());
    }

    #[tokio::test]
    async fn test_failure_is_not_marked() {
        let notifier = Notifier::new(RecordingSender::failing_on("Broken"));
        let entries = [entry(1, "Broken", "Steam"), entry(2, "Fine", "Steam")];
        let mut state = AnnouncedState::default();

        let report = notifier.announce(&entries.iter().collect::<Vec<_>>(), &mut state).await;

        assert_eq!(report, Report { sent: 1, failed: 1 });
        assert!(!state.contains(GiveawayId(1)));
        assert!(state.contains(GiveawayId(2)));
        assert_eq!(notifier.sender.sent_count(), 1);
    }
}
