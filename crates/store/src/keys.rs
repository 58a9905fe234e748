use borsh::{BorshDeserialize, BorshSerialize};
use repdesk_types::{CompanyId, RepresentativeId};

/// Storage key types for RocksDB
///
/// Enum-based keys give every record kind a distinct, collision-free borsh
/// discriminant prefix, avoid string formatting on the hot path, and keep the
/// key namespace in one place.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum StoreKey {
    /// Company record: id -> Company
    Company { id: CompanyId },

    /// List of all company ids
    CompanyList,

    /// Representative record: id -> Representative
    Representative { id: RepresentativeId },

    /// List of all representative ids
    RepresentativeList,

    /// Reverse association index: representative id -> set of company ids
    /// referencing it. Keeps representative deletion a targeted update
    /// instead of a scan over every company.
    MemberIndex { representative_id: RepresentativeId },

    /// Company id counter
    NextCompanyId,

    /// Representative id counter
    NextRepresentativeId,
}

impl StoreKey {
    /// Serialize to bytes for use as a RocksDB key
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).expect("StoreKey serialization should never fail")
    }
}
