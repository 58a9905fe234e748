use crate::DirectoryError;
use repdesk_store::Store;
use repdesk_types::{Representative, RepresentativeId};

/// Representative service handles representative record lifecycle
///
/// Leaf service: it has no knowledge of companies beyond the disassociation
/// fan-out it requests from the store before deleting a record.
#[derive(Default)]
pub struct RepresentativeService;

impl RepresentativeService {
    /// Create and persist a new representative
    pub fn create(
        &self,
        store: &mut Store,
        first_name: &str,
        last_name: &str,
    ) -> Result<Representative, DirectoryError> {
        let representative = store.create_representative(first_name, last_name)?;
        tracing::debug!(id = representative.id, "created representative");
        Ok(representative)
    }

    /// Resolve a representative by id
    pub fn get(
        &self,
        store: &Store,
        id: RepresentativeId,
    ) -> Result<Representative, DirectoryError> {
        store
            .get_representative(id)?
            .ok_or(DirectoryError::RepresentativeNotFound(id))
    }

    /// Find representatives by exact first and last name match
    pub fn find_by_full_name(
        &self,
        store: &Store,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<Representative>, DirectoryError> {
        store
            .find_representatives_by_full_name(first_name, last_name)
            .map_err(Into::into)
    }

    /// List every representative
    pub fn list_all(&self, store: &Store) -> Result<Vec<Representative>, DirectoryError> {
        store.list_representatives().map_err(Into::into)
    }

    /// Overwrite the names of an existing representative
    ///
    /// The identifier is never altered by an update.
    pub fn update(
        &self,
        store: &mut Store,
        id: RepresentativeId,
        first_name: &str,
        last_name: &str,
    ) -> Result<Representative, DirectoryError> {
        let mut representative = self.get(store, id)?;
        representative.first_name = first_name.to_string();
        representative.last_name = last_name.to_string();
        store.put_representative(&representative)?;
        Ok(representative)
    }

    /// Delete a representative
    ///
    /// Strips the identifier from every company's set first, then removes the
    /// record. No existence pre-check: deleting an unknown id is a no-op.
    pub fn delete(&self, store: &mut Store, id: RepresentativeId) -> Result<(), DirectoryError> {
        store.disassociate_representative(id)?;
        store.delete_representative(id)?;
        tracing::debug!(id, "deleted representative");
        Ok(())
    }
}
