use std::collections::BTreeMap;
use tracing::{debug, error, info};

use super::{Seat, TableSlot};
use crate::config::CapacityConfig;
use crate::error::{SeatingError, SeatingResult};
use crate::guest::{GroupKind, GuestRecord};

/// How one group was laid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupAllocation {
    pub group_id: u32,
    pub group_name: String,
    pub kind: GroupKind,
    pub capacity: usize,
    pub first_table: u32,
    pub tables: usize,
    pub guests: usize,
    pub vacancies: usize,
}

/// Assigner output: every seat of every allocated table
#[derive(Debug, Clone, Default)]
pub struct SeatingPlan {
    /// Sorted by (table_number, seat)
    pub slots: Vec<TableSlot>,
    /// In group id order
    pub allocations: Vec<GroupAllocation>,
}

impl SeatingPlan {
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn table_count(&self) -> usize {
        self.allocations.iter().map(|a| a.tables).sum()
    }

    pub fn vacancy_count(&self) -> usize {
        self.slots.iter().filter(|s| s.occupant.is_vacant()).count()
    }
}

/// Packs booking groups onto whole tables
pub struct TableAssigner {
    capacity: CapacityConfig,
}

impl TableAssigner {
    pub fn new(capacity: CapacityConfig) -> Self {
        Self { capacity }
    }

    /// Seat all guests, one contiguous run of tables per group.
    ///
    /// Groups are taken in increasing id order. The table counter starts at
    /// the smallest group id and jumps forward to a group's id whenever it
    /// is behind it, so a group never sits at a table numbered below its id.
    /// Fails when a table number would not fit in `u32`.
    pub fn assign(&self, guests: &[GuestRecord]) -> SeatingResult<SeatingPlan> {
        let mut groups: BTreeMap<u32, Vec<&GuestRecord>> = BTreeMap::new();
        for guest in guests {
            groups.entry(guest.group_id).or_default().push(guest);
        }

        let Some(&first_table) = groups.keys().next() else {
            error!("❌ No guests to seat, seating table is empty");
            return Ok(SeatingPlan::default());
        };

        // Widened so the counter can step past the last u32 table
        let (mut plan, next_table) = groups.into_iter().try_fold(
            (SeatingPlan::default(), u64::from(first_table)),
            |(mut plan, counter), (group_id, members)| {
                let start = counter.max(u64::from(group_id));
                let allocation = self.seat_group(start, members, &mut plan.slots)?;
                let next = start + allocation.tables as u64;
                plan.allocations.push(allocation);
                Ok::<_, SeatingError>((plan, next))
            },
        )?;

        plan.slots.sort_by_key(|slot| (slot.table_number, slot.seat));

        info!(
            groups = plan.allocations.len(),
            tables = plan.table_count(),
            seats = plan.slots.len(),
            vacancies = plan.vacancy_count(),
            last_table = next_table.saturating_sub(1),
            "🪑 Seating assigned"
        );

        Ok(plan)
    }

    fn seat_group(
        &self,
        start: u64,
        mut members: Vec<&GuestRecord>,
        slots: &mut Vec<TableSlot>,
    ) -> SeatingResult<GroupAllocation> {
        members.sort_by_key(|guest| guest.original_order);

        let first = members[0];
        let group_id = first.group_id;
        let capacity = self.capacity.seats_for(first.group_kind).max(1);
        let guests = members.len();
        let tables = guests.div_ceil(capacity);
        let vacancies = tables * capacity - guests;

        let number_at = |offset: usize| {
            u32::try_from(start + offset as u64).map_err(|_| {
                error!(group_id, start, tables, "❌ Table number does not fit in u32");
                SeatingError::TableNumberOverflow { group_id }
            })
        };
        let first_table = number_at(0)?;
        number_at(tables - 1)?;

        let padded: Vec<Seat> = members
            .into_iter()
            .map(|guest| Seat::Occupied(guest.clone()))
            .chain(std::iter::repeat(Seat::Vacant).take(vacancies))
            .collect();

        for (offset, table) in padded.chunks(capacity).enumerate() {
            let table_number = number_at(offset)?;
            for (position, occupant) in table.iter().enumerate() {
                slots.push(TableSlot {
                    table_number,
                    seat: position as u32 + 1,
                    occupant: occupant.clone(),
                });
            }
        }

        debug!(
            group_id,
            group_name = %first.group_name,
            first_table,
            tables,
            vacancies,
            "Group seated"
        );

        Ok(GroupAllocation {
            group_id,
            group_name: first.group_name.clone(),
            kind: first.group_kind,
            capacity,
            first_table,
            tables,
            guests,
            vacancies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guest::GroupTag;
    use std::collections::BTreeSet;

    fn group(id: u32, name: &str, size: usize, order_start: u64) -> Vec<GuestRecord> {
        let capacity = CapacityConfig::default();
        let tag = GroupTag {
            id,
            name: name.to_string(),
            kind: capacity.classify(name),
        };
        (0..size)
            .map(|i| GuestRecord::new(format!("{} Guest {}", name, i), "Daging", &tag, order_start + i as u64))
            .collect()
    }

    fn assigner() -> TableAssigner {
        TableAssigner::new(CapacityConfig::default())
    }

    #[test]
    fn test_vip_and_standard_groups() {
        let mut guests = group(5, "Diraja", 20, 0);
        guests.extend(group(6, "Unit A", 10, 20));

        let plan = assigner().assign(&guests).unwrap();
        let diraja = &plan.allocations[0];
        assert_eq!((diraja.capacity, diraja.tables, diraja.vacancies), (9, 3, 7));
        assert_eq!(diraja.first_table, 5);

        let unit_a = &plan.allocations[1];
        assert_eq!((unit_a.capacity, unit_a.tables, unit_a.vacancies), (8, 2, 6));
        assert_eq!(unit_a.first_table, 8);

        assert_eq!(plan.slots.len(), 27 + 16);
        assert_eq!(plan.vacancy_count(), 13);
    }

    #[test]
    fn test_seats_are_contiguous_per_table() {
        let mut guests = group(1, "Alpha", 13, 0);
        guests.extend(group(2, "Diraja", 4, 13));

        let plan = assigner().assign(&guests).unwrap();
        let mut tables: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        for slot in &plan.slots {
            tables.entry(slot.table_number).or_default().push(slot.seat);
        }

        assert_eq!(tables[&1], (1..=8).collect::<Vec<_>>());
        assert_eq!(tables[&2], (1..=8).collect::<Vec<_>>());
        assert_eq!(tables[&3], (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn test_exact_fit_has_no_vacancies() {
        let plan = assigner().assign(&group(3, "Beta", 16, 0)).unwrap();
        assert_eq!(plan.table_count(), 2);
        assert_eq!(plan.vacancy_count(), 0);
    }

    #[test]
    fn test_vacancies_trail_the_group() {
        let plan = assigner().assign(&group(1, "Gamma", 3, 0)).unwrap();
        let vacant: Vec<u32> = plan
            .slots
            .iter()
            .filter(|s| s.occupant.is_vacant())
            .map(|s| s.seat)
            .collect();
        assert_eq!(vacant, vec![4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_in_group_order_follows_original_order() {
        let mut guests = group(4, "Delta", 10, 0);
        guests.reverse();

        let plan = assigner().assign(&guests).unwrap();
        let orders: Vec<u64> = plan
            .slots
            .iter()
            .filter_map(|s| match &s.occupant {
                Seat::Occupied(g) => Some(g.original_order),
                _ => None,
            })
            .collect();
        assert_eq!(orders, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_counter_jumps_to_group_id() {
        let mut guests = group(2, "Small", 3, 0);
        guests.extend(group(10, "Late", 3, 3));

        let plan = assigner().assign(&guests).unwrap();
        let tables: BTreeSet<u32> = plan.slots.iter().map(|s| s.table_number).collect();
        assert_eq!(tables.into_iter().collect::<Vec<_>>(), vec![2, 10]);
    }

    #[test]
    fn test_counter_does_not_go_backwards() {
        let mut guests = group(1, "Big", 30, 0);
        guests.extend(group(2, "Next", 1, 30));

        let plan = assigner().assign(&guests).unwrap();
        assert_eq!(plan.allocations[0].first_table, 1);
        assert_eq!(plan.allocations[1].first_table, 5);
    }

    #[test]
    fn test_groups_processed_by_id_not_input_order() {
        let mut guests = group(7, "Later", 2, 0);
        guests.extend(group(3, "Earlier", 2, 2));

        let plan = assigner().assign(&guests).unwrap();
        assert_eq!(plan.allocations[0].group_id, 3);
        assert_eq!(plan.allocations[0].first_table, 3);
        assert_eq!(plan.allocations[1].first_table, 7);
    }

    #[test]
    fn test_empty_input_gives_empty_plan() {
        let plan = assigner().assign(&[]).unwrap();
        assert!(plan.is_empty());
        assert!(plan.allocations.is_empty());
    }

    #[test]
    fn test_assignment_is_repeatable() {
        let mut guests = group(1, "Diraja", 11, 0);
        guests.extend(group(4, "Unit C", 9, 11));

        let first = assigner().assign(&guests).unwrap();
        let second = assigner().assign(&guests).unwrap();
        assert_eq!(first.slots, second.slots);
    }

    #[test]
    fn test_last_table_number_is_usable() {
        let plan = assigner().assign(&group(u32::MAX, "Edge", 3, 0)).unwrap();
        assert_eq!(plan.allocations[0].first_table, u32::MAX);
        assert!(plan.slots.iter().all(|s| s.table_number == u32::MAX));
    }

    #[test]
    fn test_table_number_overflow_is_an_error() {
        let err = assigner().assign(&group(u32::MAX, "Big", 9, 0)).unwrap_err();
        assert!(matches!(err, SeatingError::TableNumberOverflow { group_id } if group_id == u32::MAX));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_counter_pushed_past_last_table_is_an_error() {
        let mut guests = group(u32::MAX - 1, "Wide", 9, 0);
        guests.extend(group(u32::MAX, "Tail", 1, 9));

        let err = assigner().assign(&guests).unwrap_err();
        assert!(matches!(err, SeatingError::TableNumberOverflow { group_id } if group_id == u32::MAX));
    }
}
