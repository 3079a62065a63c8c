use crate::catalog::domain::service::Catalog;
use crate::core::domain::Configuration;
use crate::gateway::factory::create_publisher;
use crate::gateway::GatewayPublisherVia;

pub fn create_catalog(config: &Configuration, via: GatewayPublisherVia) -> Catalog {
    let publisher = create_publisher(via);
    Catalog::new(config, publisher)
}
