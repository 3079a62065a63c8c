use tracing::debug;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryResult;
use crate::gateway::events::EventPublisher;

#[derive(Debug, Default)]
pub struct MemoryPublisher {
    events: Vec<DomainEvent>,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventPublisher for MemoryPublisher {
    fn publish(&mut self, event: &DomainEvent) -> LibraryResult<()> {
        debug!(event_id = event.event_id.as_str(), name = event.name.as_str(), key = event.key.as_str(), "retaining event");
        self.events.push(event.clone());
        Ok(())
    }

    fn events(&self) -> &[DomainEvent] {
        &self.events
    }
}


#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::{DomainEvent, DomainEventType};
    use crate::gateway::events::EventPublisher;
    use crate::gateway::memory::publisher::MemoryPublisher;

    #[test]
    fn test_should_retain_events_in_order() {
        let mut publisher = MemoryPublisher::new();
        let added = DomainEvent::added("users", "catalog", "a@b.com", &HashMap::new(), &"a").expect("build event");
        let updated = DomainEvent::updated("users", "catalog", "a@b.com", &HashMap::new(), &"b").expect("build event");
        publisher.publish(&added).expect("should publish");
        publisher.publish(&updated).expect("should publish");

        let events = publisher.events();
        assert_eq!(2, events.len());
        assert_eq!(DomainEventType::Added, events[0].kind);
        assert_eq!(DomainEventType::Updated, events[1].kind);
    }
}
