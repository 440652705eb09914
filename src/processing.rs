use std::path::PathBuf;
use tracing::{error, info};

use crate::config::SeatingConfig;
use crate::error::{SeatingError, SeatingResult};
use crate::export::{self, SeatingRow};
use crate::loader::{GuestLoader, LoadReport};
use crate::logging::PerformanceTimer;
use crate::seating::{FillReport, SeatingPlan, TableAssigner, fill_vacancies};

/// Outcome of a full seating run
#[derive(Debug)]
pub struct RunReport {
    pub sources_loaded: usize,
    pub sources_skipped: usize,
    pub guests: usize,
    pub tables: usize,
    pub fill: FillReport,
    pub rows: Vec<SeatingRow>,
    pub output: PathBuf,
}

/// Loader → assigner → reserve filler → writer, in one synchronous pass
pub struct SeatingPipeline {
    config: SeatingConfig,
    use_reserve: bool,
}

impl SeatingPipeline {
    pub fn new(config: SeatingConfig) -> Self {
        Self {
            config,
            use_reserve: true,
        }
    }

    pub fn with_reserve(mut self, use_reserve: bool) -> Self {
        self.use_reserve = use_reserve;
        self
    }

    /// Load the group sources and assign tables, without touching the
    /// reserve pool or the output file.
    pub fn plan(&self) -> SeatingResult<(LoadReport, SeatingPlan)> {
        self.config
            .validate()
            .map_err(|e| SeatingError::configuration(e.to_string()))?;

        let timer = PerformanceTimer::start("load and assign");
        let loader = GuestLoader::new(&self.config)?;
        let load = loader.load_groups(&self.config.paths.groups_dir)?;
        info!("🧹 {}", load.changes.summary());
        timer.checkpoint("group sources loaded");

        if load.guests.is_empty() {
            error!("❌ No valid main guest data found.");
            return Err(SeatingError::NoValidGuests);
        }

        let reserve_id = self.config.labels.reserve_group_id;
        if let Some(guest) = load.guests.iter().find(|g| g.group_id == reserve_id) {
            error!(
                group_id = reserve_id,
                group_name = %guest.group_name,
                "❌ Booking group uses the reserve group id"
            );
            return Err(SeatingError::ReserveIdConflict { group_id: reserve_id });
        }

        let plan = TableAssigner::new(self.config.capacity.clone()).assign(&load.guests)?;
        Ok((load, plan))
    }

    /// Run the whole pipeline and write the seating table.
    ///
    /// Nothing is written when the run fails, so a previous table stays in
    /// place.
    pub fn run(&self) -> SeatingResult<RunReport> {
        let _timer = PerformanceTimer::start("seating run");
        let (load, mut plan) = self.plan()?;

        let fill = if self.use_reserve {
            let loader = GuestLoader::new(&self.config)?;
            let pool = loader.load_reserve(&self.config.paths.reserve_file);
            fill_vacancies(&mut plan.slots, pool)
        } else {
            let vacancies = plan.vacancy_count();
            info!("Reserve backfill disabled, {} seats stay vacant", vacancies);
            FillReport {
                vacancies,
                remaining_vacancies: vacancies,
                ..FillReport::default()
            }
        };

        let rows = export::to_rows(&plan.slots, &self.config.labels);
        let output = self.config.paths.output_file.clone();
        export::write_seating_table(&output, &rows)?;

        Ok(RunReport {
            sources_loaded: load.sources_loaded,
            sources_skipped: load.sources_skipped,
            guests: load.guests.len(),
            tables: plan.table_count(),
            fill,
            rows,
            output,
        })
    }
}
