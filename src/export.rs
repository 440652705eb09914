use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::LabelsConfig;
use crate::error::{ErrorContext, SeatingError, SeatingResult};
use crate::seating::{Seat, TableSlot};

/// gp_id written for vacant seats
pub const VACANT_GROUP_ID: u32 = 0;

pub const COLUMNS: [&str; 6] = ["table_number", "seat", "name", "menu", "gp_id", "gp_name"];

/// One line of the final seating table.
///
/// Field order and names are the column contract for everything that reads
/// guest_seat.csv.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingRow {
    pub table_number: u32,
    pub seat: u32,
    pub name: String,
    pub menu: String,
    pub gp_id: u32,
    pub gp_name: String,
}

impl SeatingRow {
    pub fn from_slot(slot: &TableSlot, labels: &LabelsConfig) -> Self {
        let (name, menu, gp_id, gp_name) = match &slot.occupant {
            Seat::Occupied(guest) => (
                guest.name.clone(),
                guest.menu.clone(),
                guest.group_id,
                guest.group_name.clone(),
            ),
            Seat::Reserve(guest) => (
                guest.name.clone(),
                guest.menu.clone(),
                labels.reserve_group_id,
                labels.reserve_group.clone(),
            ),
            Seat::Vacant => (
                labels.vacancy_name.clone(),
                labels.vacancy_menu.clone(),
                VACANT_GROUP_ID,
                labels.vacancy_group.clone(),
            ),
        };

        Self {
            table_number: slot.table_number,
            seat: slot.seat,
            name,
            menu,
            gp_id,
            gp_name,
        }
    }
}

pub fn to_rows(slots: &[TableSlot], labels: &LabelsConfig) -> Vec<SeatingRow> {
    slots.iter().map(|slot| SeatingRow::from_slot(slot, labels)).collect()
}

/// Write the seating table as CSV.
///
/// The rows go to a sibling `.tmp` file first and are renamed into place,
/// so an existing table survives a failed write.
pub fn write_seating_table(path: &Path, rows: &[SeatingRow]) -> SeatingResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| SeatingError::file_io(parent.display().to_string(), e))?;
    }

    let tmp_path = temp_path_for(path);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&tmp_path)
        .map_err(|e| SeatingError::csv(tmp_path.display().to_string(), e))?;

    writer
        .write_record(COLUMNS)
        .map_err(|e| SeatingError::csv(tmp_path.display().to_string(), e))?;

    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| SeatingError::csv(tmp_path.display().to_string(), e))?;
    }
    writer
        .flush()
        .map_err(|e| SeatingError::file_io(tmp_path.display().to_string(), e))?;
    drop(writer);

    std::fs::rename(&tmp_path, path).with_context(&format!("replace {}", path.display()))?;

    info!("💾 Seating table written: {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Read a seating table written by [`write_seating_table`]
pub fn read_seating_table(path: &Path) -> SeatingResult<Vec<SeatingRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| SeatingError::csv(path.display().to_string(), e))?;

    reader
        .deserialize::<SeatingRow>()
        .map(|row| row.map_err(|e| SeatingError::csv(path.display().to_string(), e)))
        .collect()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
