use crate::{CompanyId, RepresentativeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Company record together with the association set it owns
///
/// Membership is tracked as a set of representative identifiers rather than
/// embedded records; the company is the managing side of the association and
/// the set is only mutated through [`Company::add_representative`] and
/// [`Company::remove_representative`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Storage-assigned identifier, immutable after creation
    pub id: CompanyId,
    /// Display name; duplicates across companies are permitted
    pub name: String,
    /// Identifiers of the representatives currently assigned to this company
    pub representatives: BTreeSet<RepresentativeId>,
}

impl Company {
    /// Create a company with an empty association set
    pub fn new(id: CompanyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            representatives: BTreeSet::new(),
        }
    }

    /// Create a company with an initial association set
    pub fn with_representatives(
        id: CompanyId,
        name: impl Into<String>,
        representatives: BTreeSet<RepresentativeId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            representatives,
        }
    }

    /// Add a representative to the set
    ///
    /// Returns `true` if the set changed; adding an already-present member
    /// changes nothing.
    pub fn add_representative(&mut self, id: RepresentativeId) -> bool {
        self.representatives.insert(id)
    }

    /// Remove a representative from the set
    ///
    /// Returns `true` if the set changed.
    pub fn remove_representative(&mut self, id: RepresentativeId) -> bool {
        self.representatives.remove(&id)
    }

    /// Whether the representative is currently a member
    pub fn has_representative(&self, id: RepresentativeId) -> bool {
        self.representatives.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let mut company = Company::new(1, "Acme Corporation");

        assert!(company.add_representative(7));
        assert!(!company.add_representative(7));
        assert_eq!(company.representatives.len(), 1);
    }

    #[test]
    fn test_remove_reports_change() {
        let mut company = Company::new(1, "Acme Corporation");
        company.add_representative(7);

        assert!(company.remove_representative(7));
        assert!(!company.remove_representative(7));
        assert!(company.representatives.is_empty());
    }

    #[test]
    fn test_initial_set() {
        let company =
            Company::with_representatives(2, "Globex", BTreeSet::from([1, 2, 3]));
        assert!(company.has_representative(2));
        assert!(!company.has_representative(4));
    }
}
