mod company;
mod representative;

pub use company::*;
pub use representative::*;

/// Storage-assigned company identifier
pub type CompanyId = u64;

/// Storage-assigned representative identifier
pub type RepresentativeId = u64;
