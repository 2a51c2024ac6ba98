use std::time::Duration;

use tokio::time::Instant;

use client_domain::Notification;

/// Single transient-message slot. The last notification shown wins.
#[derive(Debug)]
pub struct NotificationSlot {
    current: Option<Notification>,
    expires_at: Option<Instant>,
    ttl: Duration,
}

impl NotificationSlot {
    pub fn new(ttl: Duration) -> Self {
        Self {
            current: None,
            expires_at: None,
            ttl,
        }
    }

    pub fn show(&mut self, notification: Notification, now: Instant) {
        self.expires_at = if notification.sticky {
            None
        } else {
            Some(now + self.ttl)
        };
        self.current = Some(notification);
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    pub fn expire(&mut self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) if now >= deadline => {
                self.current = None;
                self.expires_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn dismiss_sticky(&mut self) -> bool {
        if self.current.as_ref().is_some_and(|current| current.sticky) {
            self.current = None;
            return true;
        }
        false
    }
}
