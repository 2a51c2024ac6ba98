use client_domain::{Event, EventId, StreamMessage};

/// Newest-first projection of the service's event list.
///
/// Best effort only: counts come from `Stats`, never from here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventList {
    events: Vec<Event>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    Inserted,
    Replaced,
    Dropped,
    Cleared,
}

impl EventList {
    pub fn from_snapshot(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Snapshots replace local state wholesale; no merge.
    pub fn replace_all(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    pub fn apply(&mut self, message: &StreamMessage) -> Reconciled {
        match message {
            StreamMessage::EventCreated(event) => self.upsert_created(event.clone()),
            StreamMessage::EventUpdated(event) => self.update_in_place(event.clone()),
            StreamMessage::EventsCleared => {
                self.clear();
                Reconciled::Cleared
            }
        }
    }

    /// Prepends a new event. An id we already hold (our own create racing
    /// the push message) is replaced where it sits instead.
    pub fn upsert_created(&mut self, event: Event) -> Reconciled {
        match self.position(event.id) {
            Some(index) => {
                self.events[index] = event;
                Reconciled::Replaced
            }
            None => {
                self.events.insert(0, event);
                Reconciled::Inserted
            }
        }
    }

    /// Unknown ids are dropped: inserting would break creation order.
    pub fn update_in_place(&mut self, event: Event) -> Reconciled {
        match self.position(event.id) {
            Some(index) => {
                self.events[index] = event;
                Reconciled::Replaced
            }
            None => Reconciled::Dropped,
        }
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn ids(&self) -> Vec<EventId> {
        self.events.iter().map(|event| event.id).collect()
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn position(&self, id: EventId) -> Option<usize> {
        self.events.iter().position(|event| event.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::event;
    use client_domain::EventStatus;

    fn ids(list: &EventList) -> Vec<i64> {
        list.ids().into_iter().map(|id| id.0).collect()
    }

    #[test]
    fn created_messages_prepend_in_reverse_arrival_order() {
        let mut list = EventList::from_snapshot(vec![event(1, EventStatus::Processed)]);
        for id in 2..=5 {
            let outcome = list.apply(&StreamMessage::EventCreated(event(id, EventStatus::Pending)));
            assert_eq!(outcome, Reconciled::Inserted);
        }
        assert_eq!(ids(&list), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn update_replaces_in_place_and_is_idempotent() {
        let mut list = EventList::from_snapshot(vec![
            event(3, EventStatus::Pending),
            event(2, EventStatus::Pending),
            event(1, EventStatus::Pending),
        ]);
        let update = StreamMessage::EventUpdated(event(2, EventStatus::Processed));

        assert_eq!(list.apply(&update), Reconciled::Replaced);
        let once = list.clone();
        assert_eq!(list.apply(&update), Reconciled::Replaced);

        assert_eq!(list, once);
        assert_eq!(ids(&list), vec![3, 2, 1]);
        assert_eq!(
            list.get(EventId(2)).map(|event| event.status),
            Some(EventStatus::Processed)
        );
    }

    #[test]
    fn update_for_unknown_id_is_dropped() {
        let mut list = EventList::from_snapshot(vec![event(1, EventStatus::Pending)]);
        let before = list.clone();
        let outcome = list.apply(&StreamMessage::EventUpdated(event(99, EventStatus::Failed)));
        assert_eq!(outcome, Reconciled::Dropped);
        assert_eq!(list, before);
    }

    #[test]
    fn duplicate_created_message_does_not_duplicate_rows() {
        let mut list = EventList::default();
        list.upsert_created(event(7, EventStatus::Pending));
        let outcome = list.apply(&StreamMessage::EventCreated(event(7, EventStatus::Pending)));
        assert_eq!(outcome, Reconciled::Replaced);
        assert_eq!(ids(&list), vec![7]);
    }

    #[test]
    fn cleared_message_empties_the_list() {
        let mut list = EventList::from_snapshot(vec![event(1, EventStatus::Pending)]);
        assert_eq!(list.apply(&StreamMessage::EventsCleared), Reconciled::Cleared);
        assert!(list.is_empty());
    }

    #[test]
    fn any_interleaving_converges_to_the_next_snapshot() {
        let snapshot = vec![
            event(12, EventStatus::Pending),
            event(10, EventStatus::Processed),
            event(4, EventStatus::Failed),
        ];
        // deterministic pseudo-random interleavings
        let mut seed: u64 = 0x5eed;
        for _ in 0..50 {
            let mut list = EventList::from_snapshot(vec![event(1, EventStatus::Pending)]);
            for _ in 0..20 {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let id = ((seed >> 33) % 15) as i64;
                let message = match (seed >> 20) % 3 {
                    0 => StreamMessage::EventCreated(event(id, EventStatus::Pending)),
                    1 => StreamMessage::EventUpdated(event(id, EventStatus::Processed)),
                    _ => StreamMessage::EventsCleared,
                };
                list.apply(&message);
            }
            list.replace_all(snapshot.clone());
            assert_eq!(list.as_slice(), snapshot.as_slice());
        }
    }
}
