use tracing::info;

use super::{Seat, TableSlot};
use crate::guest::ReserveGuest;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FillReport {
    pub vacancies: usize,
    pub filled: usize,
    pub remaining_vacancies: usize,
    pub unused_reserves: usize,
}

/// Backfill vacant seats from the reserve pool.
///
/// Vacancies are visited in (table, seat) order and paired with reserve
/// guests in pool order; each reserve guest fills at most one seat.
/// Occupied seats are never touched.
pub fn fill_vacancies(slots: &mut [TableSlot], pool: Vec<ReserveGuest>) -> FillReport {
    let mut vacant: Vec<usize> = slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.occupant.is_vacant())
        .map(|(i, _)| i)
        .collect();
    vacant.sort_by_key(|&i| (slots[i].table_number, slots[i].seat));

    let vacancies = vacant.len();
    let pool_size = pool.len();

    if pool.is_empty() {
        info!("No reserve guests available to fill vacant seats.");
        return FillReport {
            vacancies,
            filled: 0,
            remaining_vacancies: vacancies,
            unused_reserves: 0,
        };
    }

    let mut filled = 0;
    for (index, guest) in vacant.into_iter().zip(pool) {
        slots[index].occupant = Seat::Reserve(guest);
        filled += 1;
    }

    info!("✅ Successfully filled {} vacant seats with reserve guests.", filled);

    FillReport {
        vacancies,
        filled,
        remaining_vacancies: vacancies - filled,
        unused_reserves: pool_size - filled,
    }
}
