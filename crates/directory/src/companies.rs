use crate::{DirectoryError, RepresentativeService};
use repdesk_store::Store;
use repdesk_types::{Company, CompanyId, Representative, RepresentativeId};
use std::collections::BTreeSet;

/// Company service handles company records and every association-mutating
/// operation
///
/// Representative identities are always resolved through
/// [`RepresentativeService`]; representative records are never mutated here.
#[derive(Default)]
pub struct CompanyService {
    representatives: RepresentativeService,
}

impl CompanyService {
    /// Create a company; the initial set is taken from the input if present
    pub fn create(
        &self,
        store: &mut Store,
        name: &str,
        representatives: Option<Vec<RepresentativeId>>,
    ) -> Result<Company, DirectoryError> {
        let members = match representatives {
            Some(ids) => self.resolve_all(store, ids)?,
            None => BTreeSet::new(),
        };
        let company = store.create_company(name, members)?;
        tracing::debug!(id = company.id, "created company");
        Ok(company)
    }

    /// Resolve a company by id
    pub fn get(&self, store: &Store, id: CompanyId) -> Result<Company, DirectoryError> {
        store
            .get_company(id)?
            .ok_or(DirectoryError::CompanyNotFound(id))
    }

    /// Find companies by exact name match
    pub fn find_by_name(&self, store: &Store, name: &str) -> Result<Vec<Company>, DirectoryError> {
        store.find_companies_by_name(name).map_err(Into::into)
    }

    /// Companies whose association set is currently empty
    pub fn find_without_representatives(
        &self,
        store: &Store,
    ) -> Result<Vec<Company>, DirectoryError> {
        store
            .find_companies_without_representatives()
            .map_err(Into::into)
    }

    /// List every company
    pub fn list_all(&self, store: &Store) -> Result<Vec<Company>, DirectoryError> {
        store.list_companies().map_err(Into::into)
    }

    /// Update a company's name, and replace its association set when the
    /// input supplies one
    ///
    /// An omitted representative list leaves the existing set untouched. The
    /// identifier is never altered by an update.
    pub fn update(
        &self,
        store: &mut Store,
        id: CompanyId,
        name: &str,
        representatives: Option<Vec<RepresentativeId>>,
    ) -> Result<Company, DirectoryError> {
        let mut company = self.get(store, id)?;
        company.name = name.to_string();
        if let Some(ids) = representatives {
            company.representatives = self.resolve_all(store, ids)?;
        }
        store.put_company(&company)?;
        Ok(company)
    }

    /// Delete a company; association rows cascade, representative records
    /// survive
    pub fn delete(&self, store: &mut Store, id: CompanyId) -> Result<(), DirectoryError> {
        store.delete_company(id)?;
        tracing::debug!(id, "deleted company");
        Ok(())
    }

    /// Assign a representative to a company
    ///
    /// Idempotent: assigning an already-present member changes nothing.
    /// Membership in other companies is not checked.
    pub fn assign(
        &self,
        store: &mut Store,
        company_id: CompanyId,
        representative_id: RepresentativeId,
    ) -> Result<Company, DirectoryError> {
        let mut company = self.get(store, company_id)?;
        let representative = self.representatives.get(store, representative_id)?;

        company.add_representative(representative.id);
        store.put_company(&company)?;
        tracing::debug!(company_id, representative_id, "assigned representative");
        Ok(company)
    }

    /// Unassign a representative from a company
    ///
    /// The representative must exist as an entity; membership in this
    /// particular company is not required. The company is only persisted when
    /// the removal actually changed the set.
    pub fn unassign(
        &self,
        store: &mut Store,
        company_id: CompanyId,
        representative_id: RepresentativeId,
    ) -> Result<(), DirectoryError> {
        let mut company = self.get(store, company_id)?;
        let representative = self.representatives.get(store, representative_id)?;

        if company.remove_representative(representative.id) {
            store.put_company(&company)?;
            tracing::debug!(company_id, representative_id, "unassigned representative");
        }
        Ok(())
    }

    /// Resolve the current representative set of a company to full records
    pub fn representatives_for(
        &self,
        store: &Store,
        company_id: CompanyId,
    ) -> Result<Vec<Representative>, DirectoryError> {
        let company = self.get(store, company_id)?;
        self.resolve_members(store, &company)
    }

    /// Transfer a representative from one company to another
    ///
    /// Both companies and the representative must exist, and the
    /// representative must currently be a member of the source company.
    /// Both records are saved in a single batch.
    pub fn transfer(
        &self,
        store: &mut Store,
        current_company_id: CompanyId,
        new_company_id: CompanyId,
        representative_id: RepresentativeId,
    ) -> Result<(), DirectoryError> {
        let mut current_company = self.get(store, current_company_id)?;
        let mut new_company = self.get(store, new_company_id)?;
        let representative = self.representatives.get(store, representative_id)?;

        if !current_company.has_representative(representative.id) {
            return Err(DirectoryError::NotInCompany);
        }

        current_company.remove_representative(representative.id);
        new_company.add_representative(representative.id);
        store.put_companies(&[current_company, new_company])?;
        tracing::debug!(
            current_company_id,
            new_company_id,
            representative_id,
            "transferred representative"
        );
        Ok(())
    }

    /// Resolve member ids of a loaded company to full records
    pub fn resolve_members(
        &self,
        store: &Store,
        company: &Company,
    ) -> Result<Vec<Representative>, DirectoryError> {
        company
            .representatives
            .iter()
            .map(|id| self.representatives.get(store, *id))
            .collect()
    }

    /// Resolve every reference, failing on the first unknown id
    fn resolve_all(
        &self,
        store: &Store,
        ids: Vec<RepresentativeId>,
    ) -> Result<BTreeSet<RepresentativeId>, DirectoryError> {
        ids.into_iter()
            .map(|id| self.representatives.get(store, id).map(|r| r.id))
            .collect()
    }
}
