//! Descendant and ancestor queries over a built [`PersonTable`]

use std::collections::HashSet;

use log::debug;

use crate::{
    graph_builder::PersonTable,
    person::{Person, PersonId},
};

/// Every person reachable from `id` through child links, in depth-first pre-order.
///
/// Children are visited in the order they are stored, and each id is reported
/// once however many paths lead to it. The starting person is never part of
/// the result, even when a cycle leads back to it. A child without a record
/// of its own is reported but not expanded.
///
/// Returns `None` when `id` has no record, and `Some` of an empty list for a
/// known person without children.
#[must_use]
pub fn descendants(table: &PersonTable, id: PersonId) -> Option<Vec<PersonId>> {
    walk(table, id, |person| person.children.as_slice())
}

/// Every person reachable from `id` through parent links.
///
/// Mirrors [`descendants`]: same ordering, deduplication and cycle handling.
#[must_use]
pub fn ancestors(table: &PersonTable, id: PersonId) -> Option<Vec<PersonId>> {
    walk(table, id, |person| person.parents.as_slice())
}

/// Pre-order depth-first walk from `start` along the links picked by `links`.
///
/// Keeps an explicit stack of sibling iterators so long lines of descent
/// cannot exhaust the call stack.
fn walk(
    table: &PersonTable,
    start: PersonId,
    links: fn(&Person) -> &[PersonId],
) -> Option<Vec<PersonId>> {
    let root = table.lookup(&start)?;
    let mut visited = HashSet::from([start]);
    let mut order = Vec::new();
    let mut stack = vec![links(root).iter()];

    while let Some(siblings) = stack.last_mut() {
        let Some(&next) = siblings.next() else {
            stack.pop();
            continue;
        };
        if !visited.insert(next) {
            continue;
        }

        order.push(next);
        if let Some(person) = table.lookup(&next) {
            stack.push(links(person).iter());
        }
    }

    debug!("walk from {start} reached {} people", order.len());
    Some(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_builder::build;
    use proptest::prelude::*;

    const NO_PEOPLE: [(PersonId, &str); 0] = [];

    fn family(relations: &[(PersonId, PersonId)]) -> PersonTable {
        build(&NO_PEOPLE, relations).unwrap()
    }

    /// Straightforward recursive version the iterative walk must agree with
    fn recursive_descendants(table: &PersonTable, id: PersonId) -> Option<Vec<PersonId>> {
        fn visit(
            table: &PersonTable,
            person: &Person,
            visited: &mut HashSet<PersonId>,
            order: &mut Vec<PersonId>,
        ) {
            for &child in &person.children {
                if visited.insert(child) {
                    order.push(child);
                    if let Some(record) = table.lookup(&child) {
                        visit(table, record, visited, order);
                    }
                }
            }
        }

        let root = table.lookup(&id)?;
        let mut visited = HashSet::from([id]);
        let mut order = Vec::new();
        visit(table, root, &mut visited, &mut order);
        Some(order)
    }

    #[test]
    fn test_childless_person_has_no_descendants() {
        let table = build(&[(1, "John")], &[]).unwrap();
        assert_eq!(descendants(&table, 1), Some(vec![]));
    }

    #[test]
    fn test_unknown_person_is_not_found() {
        let table = build(&[(1, "John"), (2, "Alice")], &[(1, 2)]).unwrap();
        assert_eq!(descendants(&table, 3), None);
        assert_eq!(ancestors(&table, 3), None);
    }

    #[test]
    fn test_children_keep_relation_order() {
        let table = family(&[(1, 2), (1, 3)]);
        assert_eq!(descendants(&table, 1), Some(vec![2, 3]));
    }

    #[test]
    fn test_cycle_does_not_readd_start() {
        let table = family(&[(1, 2), (2, 1)]);
        assert_eq!(descendants(&table, 1), Some(vec![2]));
        assert_eq!(descendants(&table, 2), Some(vec![1]));
    }

    #[test]
    fn test_pre_order_goes_deep_first() {
        let table = family(&[(1, 2), (1, 3), (2, 4), (4, 5), (3, 6)]);
        assert_eq!(descendants(&table, 1), Some(vec![2, 4, 5, 3, 6]));
    }

    #[test]
    fn test_shared_descendant_reported_once() {
        let table = family(&[(1, 2), (1, 3), (2, 4), (3, 4), (1, 2)]);
        assert_eq!(descendants(&table, 1), Some(vec![2, 4, 3]));
    }

    #[test]
    fn test_child_without_record_is_reported_not_expanded() {
        let mut table = PersonTable::with_capacity(8).unwrap();
        let parent = Person { id: 1, children: vec![9, 2], ..Person::default() };
        let child = Person { id: 2, children: vec![3], ..Person::default() };
        for person in [parent, child] {
            assert!(table.insert(person.id, person).unwrap().is_none());
            table.record_insertion();
        }

        assert_eq!(descendants(&table, 1), Some(vec![9, 2, 3]));
        assert_eq!(descendants(&table, 9), None);
    }

    #[test]
    fn test_ancestors_follow_parents() {
        let table = family(&[(1, 3), (2, 3), (4, 1), (5, 2)]);
        assert_eq!(ancestors(&table, 3), Some(vec![1, 4, 2, 5]));
        assert_eq!(ancestors(&table, 4), Some(vec![]));
    }

    #[test]
    fn test_long_line_of_descent() {
        let relations: Vec<(PersonId, PersonId)> = (0..100_000).map(|i| (i, i + 1)).collect();
        let table = family(&relations);

        let line = descendants(&table, 0).unwrap();
        assert_eq!(line.len(), 100_000);
        assert_eq!(line.first(), Some(&1));
        assert_eq!(line.last(), Some(&100_000));
    }

    proptest! {
        #[test]
        fn prop_walk_matches_recursive_pre_order(
            relations in prop::collection::vec((0u64..24, 0u64..24), 0..60),
            start in 0u64..24,
        ) {
            let table = family(&relations);
            prop_assert_eq!(descendants(&table, start), recursive_descendants(&table, start));
        }

        #[test]
        fn prop_descendants_are_unique_and_exclude_start(
            relations in prop::collection::vec((0u64..16, 0u64..16), 0..40),
            start in 0u64..16,
        ) {
            let table = family(&relations);
            if let Some(found) = descendants(&table, start) {
                let unique: HashSet<_> = found.iter().copied().collect();
                prop_assert_eq!(unique.len(), found.len());
                prop_assert!(!unique.contains(&start));
            }
        }
    }
}
