pub mod assigner;
pub mod reserve;

pub use assigner::{GroupAllocation, SeatingPlan, TableAssigner};
pub use reserve::{FillReport, fill_vacancies};

use crate::guest::{GuestRecord, ReserveGuest};

/// Who sits in a seat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seat {
    Occupied(GuestRecord),
    /// Vacancy backfilled from the reserve pool
    Reserve(ReserveGuest),
    Vacant,
}

impl Seat {
    pub fn is_vacant(&self) -> bool {
        matches!(self, Seat::Vacant)
    }

    pub fn guest_name(&self) -> Option<&str> {
        match self {
            Seat::Occupied(guest) => Some(&guest.name),
            Seat::Reserve(guest) => Some(&guest.name),
            Seat::Vacant => None,
        }
    }
}

/// One seat at one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSlot {
    pub table_number: u32,
    /// 1-based, contiguous within the table
    pub seat: u32,
    pub occupant: Seat,
}
