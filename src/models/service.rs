//! Service model (the kind of work a service-department visit is about)

use serde::{Deserialize, Serialize};

use super::ids::ServiceId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,

    pub name: String,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
