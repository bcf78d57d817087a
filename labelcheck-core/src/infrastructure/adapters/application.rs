// labelcheck-core/src/infrastructure/adapters/application.rs

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::label::model::DeclaredFields;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::read_json;

/// The applicant's submission as stored next to a label (`application.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    #[serde(default)]
    pub brand_name: String,
    #[serde(default)]
    pub abv: Option<String>,
    #[serde(default)]
    pub net_contents: Option<String>,
    #[serde(default = "default_warning_required")]
    pub government_warning_required: bool,
}

fn default_warning_required() -> bool {
    true
}

impl ApplicationRecord {
    pub fn load(path: &Path) -> Result<Self, InfrastructureError> {
        read_json(path)
    }

    pub fn into_declared(self) -> DeclaredFields {
        let mut declared =
            DeclaredFields::new(self.brand_name).with_gov_warning(self.government_warning_required);
        // Blank strings are the same as "not declared".
        if let Some(abv) = self.abv.filter(|v| !v.trim().is_empty()) {
            declared = declared.with_abv(abv);
        }
        if let Some(net) = self.net_contents.filter(|v| !v.trim().is_empty()) {
            declared = declared.with_net_contents(net);
        }
        declared
    }
}

impl From<ApplicationRecord> for DeclaredFields {
    fn from(record: ApplicationRecord) -> Self {
        record.into_declared()
    }
}
