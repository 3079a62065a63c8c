use serde::{Deserialize, Serialize};

// Identifiable defines the natural key shared by catalog objects
pub trait Identifiable {
    fn id(&self) -> String;
}


// Configuration abstracts config options for the catalog
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub currency_symbol: String,
    pub report_size: usize,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            currency_symbol: "$".to_string(),
            report_size: 3,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new("main")
    }
}
