mod error;
mod keys;
mod rocksdb_store;

pub use error::*;
pub use keys::*;
pub use rocksdb_store::*;

use repdesk_types::{Company, CompanyId, Representative, RepresentativeId};
use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};
use std::path::Path;

/// Staged member-index entries, keyed by representative id
///
/// Several record saves inside one batch may touch the same index entry, so
/// entries are loaded once, mutated in memory, and written at the end.
type IndexStage = BTreeMap<RepresentativeId, BTreeSet<CompanyId>>;

/// RocksDB-backed store for companies and representatives
///
/// Every public mutation stages all of its key updates in a single
/// [`Batch`], so a multi-record operation (transfer, delete fan-out) either
/// commits completely or not at all.
pub struct Store {
    db: RocksDb,
}

impl Store {
    /// Open the store at the given path
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, StoreError> {
        let db = RocksDb::open(db_path)?;
        Ok(Self { db })
    }

    /// Create a store under a fresh temp path for testing
    /// Uses UUID v7 (time-ordered) for better RocksDB LSM tree performance
    #[cfg(feature = "testing")]
    pub fn new_for_test() -> Result<Self, StoreError> {
        let temp_dir = std::env::temp_dir().join(format!("repdesk_test_{}", uuid::Uuid::now_v7()));
        Self::new(temp_dir)
    }

    /// Flush WAL and memtables to disk
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()
    }

    // ========================================================================
    // Companies
    // ========================================================================

    /// Create a company, allocating a fresh identifier
    pub fn create_company(
        &mut self,
        name: &str,
        representatives: BTreeSet<RepresentativeId>,
    ) -> Result<Company, StoreError> {
        let mut batch = Batch::new();
        let id = self.allocate_id(&mut batch, StoreKey::NextCompanyId)?;
        let company = Company::with_representatives(id, name, representatives);

        let mut stage = IndexStage::new();
        self.stage_company_save(&mut batch, &mut stage, &company)?;
        Self::write_stage(&mut batch, stage)?;
        self.stage_list_insert(&mut batch, StoreKey::CompanyList, id)?;

        self.db.write(batch)?;
        Ok(company)
    }

    /// Get a company record
    pub fn get_company(&self, id: CompanyId) -> Result<Option<Company>, StoreError> {
        self.db.get(&StoreKey::Company { id })
    }

    /// List every company
    pub fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        let ids: Vec<CompanyId> = self.db.get(&StoreKey::CompanyList)?.unwrap_or_default();

        let mut companies = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(company) = self.get_company(id)? {
                companies.push(company);
            }
        }
        Ok(companies)
    }

    /// Find companies by exact name match
    pub fn find_companies_by_name(&self, name: &str) -> Result<Vec<Company>, StoreError> {
        let mut companies = self.list_companies()?;
        companies.retain(|c| c.name == name);
        Ok(companies)
    }

    /// Find companies whose association set is empty
    pub fn find_companies_without_representatives(&self) -> Result<Vec<Company>, StoreError> {
        let mut companies = self.list_companies()?;
        companies.retain(|c| c.representatives.is_empty());
        Ok(companies)
    }

    /// Save an existing company record
    pub fn put_company(&mut self, company: &Company) -> Result<(), StoreError> {
        self.put_companies(std::slice::from_ref(company))
    }

    /// Save several company records in one atomic batch
    ///
    /// Used by transfer so removal from the source and insertion into the
    /// destination commit together.
    pub fn put_companies(&mut self, companies: &[Company]) -> Result<(), StoreError> {
        let mut batch = Batch::new();
        let mut stage = IndexStage::new();
        for company in companies {
            self.stage_company_save(&mut batch, &mut stage, company)?;
        }
        Self::write_stage(&mut batch, stage)?;
        self.db.write(batch)
    }

    /// Delete a company record and its association rows
    ///
    /// Representative records referenced by the company survive. A missing
    /// company id is a no-op.
    pub fn delete_company(&mut self, id: CompanyId) -> Result<(), StoreError> {
        let Some(company) = self.get_company(id)? else {
            return Ok(());
        };

        let mut batch = Batch::new();
        let mut stage = IndexStage::new();
        for representative_id in &company.representatives {
            self.staged_entry(&mut stage, *representative_id)?.remove(&id);
        }
        Self::write_stage(&mut batch, stage)?;

        batch.delete(&StoreKey::Company { id });
        self.stage_list_remove(&mut batch, StoreKey::CompanyList, id)?;

        self.db.write(batch)
    }

    // ========================================================================
    // Representatives
    // ========================================================================

    /// Create a representative, allocating a fresh identifier
    pub fn create_representative(
        &mut self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Representative, StoreError> {
        let mut batch = Batch::new();
        let id = self.allocate_id(&mut batch, StoreKey::NextRepresentativeId)?;
        let representative = Representative::new(id, first_name, last_name);

        batch.put(&StoreKey::Representative { id }, &representative)?;
        self.stage_list_insert(&mut batch, StoreKey::RepresentativeList, id)?;

        self.db.write(batch)?;
        Ok(representative)
    }

    /// Get a representative record
    pub fn get_representative(
        &self,
        id: RepresentativeId,
    ) -> Result<Option<Representative>, StoreError> {
        self.db.get(&StoreKey::Representative { id })
    }

    /// List every representative
    pub fn list_representatives(&self) -> Result<Vec<Representative>, StoreError> {
        let ids: Vec<RepresentativeId> = self
            .db
            .get(&StoreKey::RepresentativeList)?
            .unwrap_or_default();

        let mut representatives = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(representative) = self.get_representative(id)? {
                representatives.push(representative);
            }
        }
        Ok(representatives)
    }

    /// Find representatives by exact first and last name match
    pub fn find_representatives_by_full_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<Representative>, StoreError> {
        let mut representatives = self.list_representatives()?;
        representatives.retain(|r| r.first_name == first_name && r.last_name == last_name);
        Ok(representatives)
    }

    /// Save an existing representative record
    pub fn put_representative(&mut self, representative: &Representative) -> Result<(), StoreError> {
        let mut batch = Batch::new();
        batch.put(
            &StoreKey::Representative {
                id: representative.id,
            },
            representative,
        )?;
        self.db.write(batch)
    }

    /// Delete a representative record
    ///
    /// Does not touch the member index; callers disassociate first. A missing
    /// id is a no-op, matching RocksDB delete semantics.
    pub fn delete_representative(&mut self, id: RepresentativeId) -> Result<(), StoreError> {
        let mut batch = Batch::new();
        batch.delete(&StoreKey::Representative { id });
        self.stage_list_remove(&mut batch, StoreKey::RepresentativeList, id)?;
        self.db.write(batch)
    }

    // ========================================================================
    // Association index
    // ========================================================================

    /// Companies whose sets currently reference the representative
    pub fn companies_referencing(
        &self,
        representative_id: RepresentativeId,
    ) -> Result<BTreeSet<CompanyId>, StoreError> {
        Ok(self
            .db
            .get(&StoreKey::MemberIndex { representative_id })?
            .unwrap_or_default())
    }

    /// Remove the representative from every company's set in one batch
    pub fn disassociate_representative(
        &mut self,
        representative_id: RepresentativeId,
    ) -> Result<(), StoreError> {
        let referencing = self.companies_referencing(representative_id)?;
        if referencing.is_empty() {
            return Ok(());
        }

        let mut batch = Batch::new();
        for company_id in &referencing {
            if let Some(mut company) = self.get_company(*company_id)? {
                company.remove_representative(representative_id);
                batch.put(&StoreKey::Company { id: *company_id }, &company)?;
            }
        }
        batch.delete(&StoreKey::MemberIndex { representative_id });

        self.db.write(batch)?;
        log::debug!(
            "Disassociated representative {} from {} companies",
            representative_id,
            referencing.len()
        );
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Read the id counter at `key` and stage its increment
    fn allocate_id(&self, batch: &mut Batch, key: StoreKey) -> Result<u64, StoreError> {
        let current: u64 = self.db.get(&key)?.unwrap_or(1);
        let next = current
            .checked_add(1)
            .ok_or_else(|| StoreError::Backend("id counter overflow".to_string()))?;
        batch.put(&key, &next)?;
        Ok(current)
    }

    /// Stage a company record write plus the member-index diff against the
    /// persisted record
    fn stage_company_save(
        &self,
        batch: &mut Batch,
        stage: &mut IndexStage,
        company: &Company,
    ) -> Result<(), StoreError> {
        let previous: Option<Company> = self.db.get(&StoreKey::Company { id: company.id })?;
        let previous_set = previous.map(|c| c.representatives).unwrap_or_default();

        for added in company.representatives.difference(&previous_set) {
            self.staged_entry(stage, *added)?.insert(company.id);
        }
        for removed in previous_set.difference(&company.representatives) {
            self.staged_entry(stage, *removed)?.remove(&company.id);
        }

        batch.put(&StoreKey::Company { id: company.id }, company)
    }

    /// Load an index entry into the stage on first touch
    fn staged_entry<'a>(
        &self,
        stage: &'a mut IndexStage,
        representative_id: RepresentativeId,
    ) -> Result<&'a mut BTreeSet<CompanyId>, StoreError> {
        match stage.entry(representative_id) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let current = self
                    .db
                    .get(&StoreKey::MemberIndex { representative_id })?
                    .unwrap_or_default();
                Ok(entry.insert(current))
            }
        }
    }

    /// Stage every touched index entry; empty entries are removed
    fn write_stage(batch: &mut Batch, stage: IndexStage) -> Result<(), StoreError> {
        for (representative_id, companies) in stage {
            let key = StoreKey::MemberIndex { representative_id };
            if companies.is_empty() {
                batch.delete(&key);
            } else {
                batch.put(&key, &companies)?;
            }
        }
        Ok(())
    }

    fn stage_list_insert(
        &self,
        batch: &mut Batch,
        key: StoreKey,
        id: u64,
    ) -> Result<(), StoreError> {
        let mut ids: Vec<u64> = self.db.get(&key)?.unwrap_or_default();
        if !ids.contains(&id) {
            ids.push(id);
            batch.put(&key, &ids)?;
        }
        Ok(())
    }

    fn stage_list_remove(
        &self,
        batch: &mut Batch,
        key: StoreKey,
        id: u64,
    ) -> Result<(), StoreError> {
        let mut ids: Vec<u64> = self.db.get(&key)?.unwrap_or_default();
        if ids.contains(&id) {
            ids.retain(|&existing| existing != id);
            batch.put(&key, &ids)?;
        }
        Ok(())
    }
}
