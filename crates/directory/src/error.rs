use repdesk_types::{CompanyId, RepresentativeId};
use thiserror::Error;

/// Directory errors
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Company not found with id {0}")]
    CompanyNotFound(CompanyId),

    #[error("Representative not found with id: {0}")]
    RepresentativeNotFound(RepresentativeId),

    /// Transfer requested for a representative that is not a member of the
    /// named source company
    #[error("Representative not part of current company")]
    NotInCompany,

    #[error("Store error: {0}")]
    Store(#[from] repdesk_store::StoreError),
}
