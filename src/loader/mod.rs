pub mod cleaner;
pub mod source;

pub use cleaner::{CleanedGuest, GuestCleaner, RawGuestRow, title_case};
pub use source::{FilenameParser, GroupSource};

use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::config::{CapacityConfig, SeatingConfig};
use crate::error::{SeatingError, SeatingResult};
use crate::guest::{GuestRecord, ReserveGuest};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleaningChanges {
    pub total_rows: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
    pub menus_defaulted: usize,
}

impl CleaningChanges {
    pub fn merge(&mut self, other: &CleaningChanges) {
        self.total_rows += other.total_rows;
        self.rows_kept += other.rows_kept;
        self.rows_dropped += other.rows_dropped;
        self.menus_defaulted += other.menus_defaulted;
    }

    pub fn summary(&self) -> String {
        format!(
            "Cleaned {} rows: {} kept, {} dropped. Defaulted {} menus.",
            self.total_rows, self.rows_kept, self.rows_dropped, self.menus_defaulted
        )
    }
}

/// Everything the loader produced from the group sources
#[derive(Debug, Default)]
pub struct LoadReport {
    pub guests: Vec<GuestRecord>,
    pub sources_loaded: usize,
    pub sources_skipped: usize,
    pub changes: CleaningChanges,
}

/// Reads group and reserve sources into cleaned guest records
pub struct GuestLoader {
    cleaner: GuestCleaner,
    parser: FilenameParser,
    capacity: CapacityConfig,
}

impl GuestLoader {
    pub fn new(config: &SeatingConfig) -> SeatingResult<Self> {
        Ok(Self {
            cleaner: GuestCleaner::new(config.labels.default_menu.clone()),
            parser: FilenameParser::new()?,
            capacity: config.capacity.clone(),
        })
    }

    /// Load every booking file in `dir`.
    ///
    /// Fails only when the directory is absent or holds no grp*.csv files.
    /// Unreadable or empty sources are skipped with a warning.
    pub fn load_groups(&self, dir: &Path) -> SeatingResult<LoadReport> {
        let sources = self.parser.discover(dir)?;
        Ok(self.load_sources(&sources))
    }

    pub fn load_sources(&self, sources: &[GroupSource]) -> LoadReport {
        let mut report = LoadReport::default();
        let mut next_order: u64 = 0;

        for source in sources {
            let rows = match read_guest_rows(&source.path) {
                Ok(rows) => rows,
                Err(e) => {
                    warn!(error = %e, file = %source.file_name, "⚠️  Skipping unreadable group source");
                    report.sources_skipped += 1;
                    continue;
                }
            };

            let (cleaned, changes) = self.cleaner.clean_rows(rows);
            report.changes.merge(&changes);

            if cleaned.is_empty() {
                warn!("⚠️  File {} contained no valid guest records after cleaning", source.file_name);
                report.sources_skipped += 1;
                continue;
            }

            let tag = self.parser.parse_tag(&source.file_name, &self.capacity);
            info!(
                file = %source.file_name,
                group_id = tag.id,
                group_name = %tag.name,
                kind = ?tag.kind,
                guests = cleaned.len(),
                "📋 Loaded group source"
            );

            for guest in cleaned {
                report.guests.push(GuestRecord::new(guest.name, guest.menu, &tag, next_order));
                next_order += 1;
            }
            report.sources_loaded += 1;
        }

        report
    }

    /// Load the standby pool. A missing or unreadable file is an empty pool.
    pub fn load_reserve(&self, path: &Path) -> Vec<ReserveGuest> {
        if !path.exists() {
            warn!("⚠️  Reserve file not found at {}, no vacancies will be backfilled", path.display());
            return Vec::new();
        }

        let rows = match read_guest_rows(path) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "⚠️  Could not read reserve file {}", path.display());
                return Vec::new();
            }
        };

        self.reserve_from_rows(rows)
    }

    pub fn reserve_from_rows(&self, rows: Vec<RawGuestRow>) -> Vec<ReserveGuest> {
        let (cleaned, changes) = self.cleaner.clean_rows(rows);
        info!("🪑 Reserve pool: {}", changes.summary());

        cleaned
            .into_iter()
            .enumerate()
            .map(|(i, guest)| ReserveGuest {
                name: guest.name,
                menu: guest.menu,
                original_order: i as u64,
            })
            .collect()
    }
}

/// Read all guest rows from a CSV file
pub fn read_guest_rows(path: &Path) -> SeatingResult<Vec<RawGuestRow>> {
    let file = std::fs::File::open(path)
        .map_err(|e| SeatingError::file_io(path.display().to_string(), e))?;
    read_guest_rows_from(file, &path.display().to_string())
}

/// Read guest rows from any CSV reader; `label` names the source in errors.
pub fn read_guest_rows_from<R: Read>(reader: R, label: &str) -> SeatingResult<Vec<RawGuestRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    reader
        .deserialize::<RawGuestRow>()
        .map(|row| row.map_err(|e| SeatingError::csv(label, e)))
        .collect()
}
