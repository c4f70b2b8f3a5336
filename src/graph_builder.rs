//! Builds the genealogy index from people and parent/child relations

use log::{debug, trace};

use crate::{
    config::GraphConfig,
    error::TableError,
    person::{Person, PersonId},
    probing_hashtable::ProbingHashtable,
};

/// Table mapping person ids to their records
pub type PersonTable = ProbingHashtable<PersonId, Person>;

/// Builds a [`PersonTable`] from a people list and a relation list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphBuilder {
    /// Sizing of the table being built
    config: GraphConfig,
}

impl GraphBuilder {
    /// Creates a builder with the default sizing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder sizing its table with `config`
    #[must_use]
    pub fn with_config(config: GraphConfig) -> Self {
        Self { config }
    }

    /// Indexes `people` (id, name) and `relations` (parent id, child id).
    ///
    /// Names are applied first, a later entry for the same id replacing an
    /// earlier one. Relations are then applied in input order: the child is
    /// appended to the parent's children and the parent to the child's
    /// parents. Repeated relations are appended again. Ids that only appear in
    /// relations get an unnamed record.
    ///
    /// # Errors
    ///
    /// Propagates [`TableError`] from the table, most notably
    /// `CapacityExhausted` when a fixed capacity is too small for the input.
    pub fn build<S>(
        &self,
        people: &[(PersonId, S)],
        relations: &[(PersonId, PersonId)],
    ) -> Result<PersonTable, TableError>
    where
        S: AsRef<str>,
    {
        let distinct_ids = people.len().saturating_add(relations.len().saturating_mul(2));
        let mut table = PersonTable::with_capacity(self.config.capacity_for(distinct_ids))?;

        for (id, name) in people {
            name.as_ref().clone_into(&mut fetch_or_create(&mut table, *id)?.name);
        }

        for &(parent, child) in relations {
            trace!("relating parent {parent} to child {child}");
            fetch_or_create(&mut table, parent)?.children.push(child);
            fetch_or_create(&mut table, child)?.parents.push(parent);
        }

        debug!(
            "built genealogy table: {} people, {} relations, {} records in {} slots",
            people.len(),
            relations.len(),
            table.len(),
            table.capacity()
        );

        Ok(table)
    }
}

/// Indexes `people` and `relations` with the default sizing.
///
/// # Errors
///
/// See [`GraphBuilder::build`].
pub fn build<S>(
    people: &[(PersonId, S)],
    relations: &[(PersonId, PersonId)],
) -> Result<PersonTable, TableError>
where
    S: AsRef<str>,
{
    GraphBuilder::new().build(people, relations)
}

/// Returns the record for `id`, inserting an unnamed one first if needed
fn fetch_or_create(table: &mut PersonTable, id: PersonId) -> Result<&mut Person, TableError> {
    table.get_or_insert_with(id, || Person::new(id))
}
