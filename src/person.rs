//! Person records stored in the genealogy table

/// Numeric identifier of a person
pub type PersonId = u64;

/// A person and the ids of their direct relatives.
///
/// Records are created lazily the first time an id is mentioned, with an empty
/// name and no relatives, and are then filled in place as names and relations
/// are read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    /// Unique identifier, also the table key
    pub id: PersonId,
    /// Display name, empty until the people list names this id
    pub name: String,
    /// Parent ids in relation input order, duplicates included
    pub parents: Vec<PersonId>,
    /// Child ids in relation input order, duplicates included
    pub children: Vec<PersonId>,
}

impl Person {
    /// Creates an unnamed person without relatives
    #[must_use]
    pub fn new(id: PersonId) -> Self {
        Self { id, ..Self::default() }
    }
}
