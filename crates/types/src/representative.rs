use crate::RepresentativeId;
use serde::{Deserialize, Serialize};

/// Representative record
///
/// Created standalone; carries no company reference. Identity for
/// relationship purposes is the storage-assigned `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representative {
    /// Storage-assigned identifier, immutable after creation
    pub id: RepresentativeId,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
}

impl Representative {
    pub fn new(
        id: RepresentativeId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}
