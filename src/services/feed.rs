use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use crate::domain::{Match, UserId};

/// Per-user live view of the complete match list.
///
/// Every publish replaces the whole list; observers never receive diffs and
/// rebuild anything derived from the list from scratch.
#[derive(Clone, Default)]
pub struct MatchFeed {
    channels: Arc<Mutex<HashMap<UserId, watch::Sender<Vec<Match>>>>>,
}

impl MatchFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receiver seeded with `current`, which also refreshes existing observers
    pub fn subscribe(&self, user_id: UserId, current: Vec<Match>) -> watch::Receiver<Vec<Match>> {
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        match channels.get(&user_id) {
            Some(sender) => {
                sender.send_replace(current);
                sender.subscribe()
            }
            None => {
                let (sender, receiver) = watch::channel(current);
                channels.insert(user_id, sender);
                receiver
            }
        }
    }

    pub fn publish(&self, user_id: UserId, matches: Vec<Match>) {
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = channels.get(&user_id) else {
            return;
        };
        if sender.receiver_count() == 0 {
            channels.remove(&user_id);
            return;
        }
        sender.send_replace(matches);
    }

    pub fn observer_count(&self, user_id: UserId) -> usize {
        let channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        channels.get(&user_id).map_or(0, |s| s.receiver_count())
    }
}
