mod companies;
mod error;
mod representatives;

pub use companies::CompanyService;
pub use error::*;
pub use representatives::RepresentativeService;

use repdesk_store::Store;
use repdesk_types::{Company, CompanyId, Representative, RepresentativeId};

/// Directory for companies and their representatives
///
/// Owns the store and orchestrates the two domain services. Every public
/// operation is a synchronous load-mutate-save cycle; callers serialize
/// access, the directory itself holds no locks.
pub struct Directory {
    /// Persistent store
    store: Store,
    /// Domain services
    companies: CompanyService,
    representatives: RepresentativeService,
}

impl Directory {
    /// Create a new directory over the given store
    pub fn new(store: Store) -> Self {
        Self {
            store,
            companies: CompanyService::default(),
            representatives: RepresentativeService::default(),
        }
    }

    // ========================================================================
    // Company Operations (delegated to CompanyService)
    // ========================================================================

    pub fn create_company(
        &mut self,
        name: &str,
        representatives: Option<Vec<RepresentativeId>>,
    ) -> Result<Company, DirectoryError> {
        self.companies.create(&mut self.store, name, representatives)
    }

    pub fn get_company(&self, id: CompanyId) -> Result<Company, DirectoryError> {
        self.companies.get(&self.store, id)
    }

    pub fn find_companies_by_name(&self, name: &str) -> Result<Vec<Company>, DirectoryError> {
        self.companies.find_by_name(&self.store, name)
    }

    pub fn companies_without_representatives(&self) -> Result<Vec<Company>, DirectoryError> {
        self.companies.find_without_representatives(&self.store)
    }

    pub fn list_companies(&self) -> Result<Vec<Company>, DirectoryError> {
        self.companies.list_all(&self.store)
    }

    pub fn update_company(
        &mut self,
        id: CompanyId,
        name: &str,
        representatives: Option<Vec<RepresentativeId>>,
    ) -> Result<Company, DirectoryError> {
        self.companies
            .update(&mut self.store, id, name, representatives)
    }

    pub fn delete_company(&mut self, id: CompanyId) -> Result<(), DirectoryError> {
        self.companies.delete(&mut self.store, id)
    }

    pub fn assign_representative(
        &mut self,
        company_id: CompanyId,
        representative_id: RepresentativeId,
    ) -> Result<Company, DirectoryError> {
        self.companies
            .assign(&mut self.store, company_id, representative_id)
    }

    pub fn unassign_representative(
        &mut self,
        company_id: CompanyId,
        representative_id: RepresentativeId,
    ) -> Result<(), DirectoryError> {
        self.companies
            .unassign(&mut self.store, company_id, representative_id)
    }

    pub fn representatives_for_company(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<Representative>, DirectoryError> {
        self.companies.representatives_for(&self.store, company_id)
    }

    pub fn transfer_representative(
        &mut self,
        current_company_id: CompanyId,
        new_company_id: CompanyId,
        representative_id: RepresentativeId,
    ) -> Result<(), DirectoryError> {
        self.companies.transfer(
            &mut self.store,
            current_company_id,
            new_company_id,
            representative_id,
        )
    }

    /// Resolve the member set of an already-loaded company to full records
    pub fn resolve_members(
        &self,
        company: &Company,
    ) -> Result<Vec<Representative>, DirectoryError> {
        self.companies.resolve_members(&self.store, company)
    }

    // ========================================================================
    // Representative Operations (delegated to RepresentativeService)
    // ========================================================================

    pub fn create_representative(
        &mut self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Representative, DirectoryError> {
        self.representatives
            .create(&mut self.store, first_name, last_name)
    }

    pub fn get_representative(
        &self,
        id: RepresentativeId,
    ) -> Result<Representative, DirectoryError> {
        self.representatives.get(&self.store, id)
    }

    pub fn find_representatives_by_full_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<Representative>, DirectoryError> {
        self.representatives
            .find_by_full_name(&self.store, first_name, last_name)
    }

    pub fn list_representatives(&self) -> Result<Vec<Representative>, DirectoryError> {
        self.representatives.list_all(&self.store)
    }

    pub fn update_representative(
        &mut self,
        id: RepresentativeId,
        first_name: &str,
        last_name: &str,
    ) -> Result<Representative, DirectoryError> {
        self.representatives
            .update(&mut self.store, id, first_name, last_name)
    }

    pub fn delete_representative(&mut self, id: RepresentativeId) -> Result<(), DirectoryError> {
        self.representatives.delete(&mut self.store, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn directory(temp_dir: &TempDir) -> Directory {
        Directory::new(Store::new(temp_dir.path()).unwrap())
    }

    #[test]
    fn test_create_then_fetch_representative() {
        let temp_dir = TempDir::new().unwrap();
        let mut directory = directory(&temp_dir);

        let created = directory.create_representative("John", "Doe").unwrap();
        let fetched = directory.get_representative(created.id).unwrap();

        assert_eq!(fetched.first_name, "John");
        assert_eq!(fetched.last_name, "Doe");
        assert_eq!(fetched.id, created.id);
    }

    #[test]
    fn test_get_missing_representative_fails() {
        let temp_dir = TempDir::new().unwrap();
        let directory = directory(&temp_dir);

        assert!(matches!(
            directory.get_representative(42),
            Err(DirectoryError::RepresentativeNotFound(42))
        ));
    }

    #[test]
    fn test_update_keeps_identifier() {
        let temp_dir = TempDir::new().unwrap();
        let mut directory = directory(&temp_dir);

        let created = directory.create_representative("John", "Doe").unwrap();
        let updated = directory
            .update_representative(created.id, "Johnny", "Doe")
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.first_name, "Johnny");
    }

    #[test]
    fn test_assign_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let mut directory = directory(&temp_dir);

        let company = directory.create_company("Acme Corporation", None).unwrap();
        let representative = directory.create_representative("John", "Doe").unwrap();

        directory
            .assign_representative(company.id, representative.id)
            .unwrap();
        let after_second = directory
            .assign_representative(company.id, representative.id)
            .unwrap();

        assert_eq!(after_second.representatives.len(), 1);
        assert!(after_second.has_representative(representative.id));
    }

    #[test]
    fn test_assign_unknown_parties_fail() {
        let temp_dir = TempDir::new().unwrap();
        let mut directory = directory(&temp_dir);

        let company = directory.create_company("Acme Corporation", None).unwrap();
        assert!(matches!(
            directory.assign_representative(company.id, 99),
            Err(DirectoryError::RepresentativeNotFound(99))
        ));

        let representative = directory.create_representative("John", "Doe").unwrap();
        assert!(matches!(
            directory.assign_representative(99, representative.id),
            Err(DirectoryError::CompanyNotFound(99))
        ));
    }

    #[test]
    fn test_assign_allows_multi_company_membership() {
        let temp_dir = TempDir::new().unwrap();
        let mut directory = directory(&temp_dir);

        let acme = directory.create_company("Acme Corporation", None).unwrap();
        let globex = directory.create_company("Globex", None).unwrap();
        let representative = directory.create_representative("John", "Doe").unwrap();

        directory
            .assign_representative(acme.id, representative.id)
            .unwrap();
        directory
            .assign_representative(globex.id, representative.id)
            .unwrap();

        assert!(directory
            .get_company(acme.id)
            .unwrap()
            .has_representative(representative.id));
        assert!(directory
            .get_company(globex.id)
            .unwrap()
            .has_representative(representative.id));
    }

    #[test]
    fn test_unassign_non_member_leaves_set_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let mut directory = directory(&temp_dir);

        let company = directory.create_company("Acme Corporation", None).unwrap();
        let member = directory.create_representative("John", "Doe").unwrap();
        let outsider = directory.create_representative("Jane", "Roe").unwrap();
        directory.assign_representative(company.id, member.id).unwrap();

        directory
            .unassign_representative(company.id, outsider.id)
            .unwrap();

        let after = directory.get_company(company.id).unwrap();
        assert!(after.has_representative(member.id));
        assert_eq!(after.representatives.len(), 1);
    }

    #[test]
    fn test_unassign_checks_global_existence() {
        let temp_dir = TempDir::new().unwrap();
        let mut directory = directory(&temp_dir);

        let company = directory.create_company("Acme Corporation", None).unwrap();

        // a representative id that exists nowhere fails, even though it is
        // also not a member
        assert!(matches!(
            directory.unassign_representative(company.id, 42),
            Err(DirectoryError::RepresentativeNotFound(42))
        ));
    }

    #[test]
    fn test_transfer_moves_membership() {
        let temp_dir = TempDir::new().unwrap();
        let mut directory = directory(&temp_dir);

        let acme = directory.create_company("Acme Corporation", None).unwrap();
        let globex = directory.create_company("Globex", None).unwrap();
        let representative = directory.create_representative("John", "Doe").unwrap();
        directory
            .assign_representative(acme.id, representative.id)
            .unwrap();

        directory
            .transfer_representative(acme.id, globex.id, representative.id)
            .unwrap();

        assert!(!directory
            .get_company(acme.id)
            .unwrap()
            .has_representative(representative.id));
        assert!(directory
            .get_company(globex.id)
            .unwrap()
            .has_representative(representative.id));
    }

    #[test]
    fn test_transfer_of_non_member_fails_without_changes() {
        let temp_dir = TempDir::new().unwrap();
        let mut directory = directory(&temp_dir);

        let acme = directory.create_company("Acme Corporation", None).unwrap();
        let globex = directory.create_company("Globex", None).unwrap();
        let member = directory.create_representative("John", "Doe").unwrap();
        let outsider = directory.create_representative("Jane", "Roe").unwrap();
        directory.assign_representative(globex.id, member.id).unwrap();

        assert!(matches!(
            directory.transfer_representative(acme.id, globex.id, outsider.id),
            Err(DirectoryError::NotInCompany)
        ));

        assert!(directory.get_company(acme.id).unwrap().representatives.is_empty());
        let globex_after = directory.get_company(globex.id).unwrap();
        assert_eq!(globex_after.representatives.len(), 1);
        assert!(globex_after.has_representative(member.id));
    }

    #[test]
    fn test_transfer_requires_all_parties() {
        let temp_dir = TempDir::new().unwrap();
        let mut directory = directory(&temp_dir);

        let acme = directory.create_company("Acme Corporation", None).unwrap();
        let representative = directory.create_representative("John", "Doe").unwrap();

        assert!(matches!(
            directory.transfer_representative(acme.id, 99, representative.id),
            Err(DirectoryError::CompanyNotFound(99))
        ));
        assert!(matches!(
            directory.transfer_representative(99, acme.id, representative.id),
            Err(DirectoryError::CompanyNotFound(99))
        ));

        let globex = directory.create_company("Globex", None).unwrap();
        assert!(matches!(
            directory.transfer_representative(acme.id, globex.id, 99),
            Err(DirectoryError::RepresentativeNotFound(99))
        ));
    }

    #[test]
    fn test_delete_representative_strips_memberships() {
        let temp_dir = TempDir::new().unwrap();
        let mut directory = directory(&temp_dir);

        let company = directory.create_company("Acme Corporation", None).unwrap();
        let representative = directory.create_representative("John", "Doe").unwrap();
        directory
            .assign_representative(company.id, representative.id)
            .unwrap();

        directory.delete_representative(representative.id).unwrap();

        assert!(directory
            .get_company(company.id)
            .unwrap()
            .representatives
            .is_empty());
        assert!(matches!(
            directory.get_representative(representative.id),
            Err(DirectoryError::RepresentativeNotFound(_))
        ));
    }

    #[test]
    fn test_companies_without_representatives_tracks_state() {
        let temp_dir = TempDir::new().unwrap();
        let mut directory = directory(&temp_dir);

        let acme = directory.create_company("Acme Corporation", None).unwrap();
        let globex = directory.create_company("Globex", None).unwrap();
        let initech = directory.create_company("Initech", None).unwrap();
        let representative = directory.create_representative("John", "Doe").unwrap();
        directory
            .assign_representative(globex.id, representative.id)
            .unwrap();

        let empty: Vec<_> = directory
            .companies_without_representatives()
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(empty, vec![acme.id, initech.id]);

        directory
            .unassign_representative(globex.id, representative.id)
            .unwrap();
        assert_eq!(directory.companies_without_representatives().unwrap().len(), 3);
    }

    #[test]
    fn test_update_company_replaces_set_only_when_supplied() {
        let temp_dir = TempDir::new().unwrap();
        let mut directory = directory(&temp_dir);

        let john = directory.create_representative("John", "Doe").unwrap();
        let jane = directory.create_representative("Jane", "Roe").unwrap();
        let company = directory
            .create_company("Acme Corporation", Some(vec![john.id]))
            .unwrap();

        // name-only update keeps the set
        let renamed = directory
            .update_company(company.id, "Acme Holdings", None)
            .unwrap();
        assert_eq!(renamed.name, "Acme Holdings");
        assert!(renamed.has_representative(john.id));

        // supplied list replaces the set wholesale
        let replaced = directory
            .update_company(company.id, "Acme Holdings", Some(vec![jane.id]))
            .unwrap();
        assert!(!replaced.has_representative(john.id));
        assert!(replaced.has_representative(jane.id));
    }

    #[test]
    fn test_update_company_with_unknown_reference_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut directory = directory(&temp_dir);

        let john = directory.create_representative("John", "Doe").unwrap();
        let company = directory
            .create_company("Acme Corporation", Some(vec![john.id]))
            .unwrap();

        assert!(matches!(
            directory.update_company(company.id, "Acme Holdings", Some(vec![99])),
            Err(DirectoryError::RepresentativeNotFound(99))
        ));

        // record untouched
        let after = directory.get_company(company.id).unwrap();
        assert_eq!(after.name, "Acme Corporation");
        assert!(after.has_representative(john.id));
    }

    #[test]
    fn test_assign_then_unassign_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let mut directory = directory(&temp_dir);

        let company = directory.create_company("Acme Corporation", None).unwrap();
        let representative = directory.create_representative("John", "Doe").unwrap();

        let assigned = directory
            .assign_representative(company.id, representative.id)
            .unwrap();
        let members = directory.resolve_members(&assigned).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].first_name, "John");
        assert_eq!(members[0].last_name, "Doe");

        directory
            .unassign_representative(company.id, representative.id)
            .unwrap();
        assert!(directory
            .representatives_for_company(company.id)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_delete_company_keeps_representatives() {
        let temp_dir = TempDir::new().unwrap();
        let mut directory = directory(&temp_dir);

        let company = directory.create_company("Acme Corporation", None).unwrap();
        let representative = directory.create_representative("John", "Doe").unwrap();
        directory
            .assign_representative(company.id, representative.id)
            .unwrap();

        directory.delete_company(company.id).unwrap();

        assert!(matches!(
            directory.get_company(company.id),
            Err(DirectoryError::CompanyNotFound(_))
        ));
        assert!(directory.get_representative(representative.id).is_ok());
    }
}
