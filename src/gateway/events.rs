use crate::core::events::DomainEvent;
use crate::core::library::LibraryResult;

pub trait EventPublisher {
    fn publish(&mut self, event: &DomainEvent) -> LibraryResult<()>;

    // events retained by the publisher, oldest first
    fn events(&self) -> &[DomainEvent];
}
