//! Age category model

use serde::{Deserialize, Serialize};

/// Age category reference data (read-only on the client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Age {
    pub id: i64,
    pub value: String,
}
