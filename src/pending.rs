use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::errors::BotError;
use crate::platform::Attachment;

/// How long Discord keeps an interaction token valid, and therefore how
/// long a modal can stay open.
pub const PENDING_LIFETIME: Duration = Duration::from_secs(15 * 60);

struct Entry {
    user_id: u64,
    attachment: Attachment,
    created: Instant,
}

/// Remembers the image attached to `/recipe` until the modal it opened
/// is submitted. Keys travel in the modal's custom ID.
pub struct PendingAttachments {
    entries: RwLock<HashMap<Uuid, Entry>>,
    lifetime: Duration,
}

impl Default for PendingAttachments {
    fn default() -> Self {
        Self::new(PENDING_LIFETIME)
    }
}

impl PendingAttachments {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            lifetime,
        }
    }

    /// Stores an attachment for a user and returns its key. Expired
    /// entries are dropped first.
    pub fn insert(&self, user_id: u64, attachment: Attachment) -> Uuid {
        let key = Uuid::new_v4();
        let now = Instant::now();
        let lifetime = self.lifetime;

        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.retain(|_, entry| now.duration_since(entry.created) < lifetime);
        entries.insert(
            key,
            Entry {
                user_id,
                attachment,
                created: now,
            },
        );

        key
    }

    /// Removes and returns the attachment stored under `key` if it
    /// belongs to `user_id` and has not expired. Entries stored for
    /// another user are left in place.
    pub fn take(&self, key: &Uuid, user_id: u64) -> Result<Attachment, BotError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());

        match entries.get(key) {
            Some(entry) if entry.user_id != user_id => return Err(BotError::ForeignAttachment),
            Some(_) => {}
            None => return Err(BotError::ExpiredAttachment),
        }

        match entries.remove(key) {
            Some(entry) if entry.created.elapsed() < self.lifetime => Ok(entry.attachment),
            _ => Err(BotError::ExpiredAttachment),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use uuid::Uuid;

    use super::PendingAttachments;
    use crate::errors::BotError;
    use crate::platform::Attachment;

    fn attachment(name: &str) -> Attachment {
        Attachment {
            filename: name.to_owned(),
            content_type: Some("image/png".to_owned()),
            url: format!("https://cdn.discordapp.com/{}", name),
        }
    }

    #[test]
    fn attachments_are_taken_once() {
        let pending = PendingAttachments::default();
        let key = pending.insert(1, attachment("a.png"));

        assert_eq!(pending.take(&key, 1).unwrap().filename, "a.png");
        assert!(matches!(pending.take(&key, 1), Err(BotError::ExpiredAttachment)));
        assert!(pending.is_empty());
    }

    #[test]
    fn other_users_cannot_take_an_attachment() {
        let pending = PendingAttachments::default();
        let key = pending.insert(1, attachment("a.png"));

        assert!(matches!(pending.take(&key, 2), Err(BotError::ForeignAttachment)));
        assert_eq!(pending.take(&key, 1).unwrap().filename, "a.png");
    }

    #[test]
    fn concurrent_submissions_do_not_mix() {
        let pending = PendingAttachments::default();
        let first = pending.insert(1, attachment("first.png"));
        let second = pending.insert(2, attachment("second.png"));

        assert_eq!(pending.take(&second, 2).unwrap().filename, "second.png");
        assert_eq!(pending.take(&first, 1).unwrap().filename, "first.png");
    }

    #[test]
    fn expired_entries_are_dropped() {
        let pending = PendingAttachments::new(Duration::from_millis(0));
        let key = pending.insert(1, attachment("a.png"));

        assert!(matches!(pending.take(&key, 1), Err(BotError::ExpiredAttachment)));

        pending.insert(1, attachment("b.png"));
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert!(matches!(
            PendingAttachments::default().take(&Uuid::new_v4(), 1),
            Err(BotError::ExpiredAttachment)
        ));
    }
}
