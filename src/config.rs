use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use crate::guest::GroupKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatingConfig {
    pub paths: PathsConfig,
    pub capacity: CapacityConfig,
    pub labels: LabelsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Folder holding one grp<id>-<name>.csv per booking
    pub groups_dir: PathBuf,

    /// Standby guests used to backfill vacancies
    pub reserve_file: PathBuf,

    /// Final seating table
    pub output_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityConfig {
    /// Seats per table for ordinary groups
    pub standard: usize,

    /// Seats per table for VIP groups
    pub vip: usize,

    /// Group names (case-insensitive) that get VIP tables
    pub vip_groups: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    pub default_menu: String,
    pub vacancy_name: String,
    pub vacancy_menu: String,
    pub vacancy_group: String,
    pub reserve_group_id: u32,
    pub reserve_group: String,
    pub menu_categories: Vec<String>,
}

impl Default for SeatingConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            capacity: CapacityConfig::default(),
            labels: LabelsConfig::default(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            groups_dir: PathBuf::from("tempahan"),
            reserve_file: PathBuf::from("data/reserve.csv"),
            output_file: PathBuf::from("guest_seat.csv"),
        }
    }
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            standard: 8,
            vip: 9,
            vip_groups: vec!["diraja".to_string(), "ramli".to_string()],
        }
    }
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            default_menu: "Daging".to_string(),
            vacancy_name: "Simpanan".to_string(),
            vacancy_menu: "N/A".to_string(),
            vacancy_group: "RESERVE_SEAT".to_string(),
            reserve_group_id: 999,
            reserve_group: "Reserve".to_string(),
            menu_categories: ["Daging", "Ayam", "Ikan", "Vegetarian"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl CapacityConfig {
    /// Classify a group by its name
    pub fn classify(&self, group_name: &str) -> GroupKind {
        let name = group_name.trim().to_lowercase();
        if self.vip_groups.iter().any(|vip| vip.trim().to_lowercase() == name) {
            GroupKind::Vip
        } else {
            GroupKind::Standard
        }
    }

    /// Seats per table for a group kind
    pub fn seats_for(&self, kind: GroupKind) -> usize {
        match kind {
            GroupKind::Standard => self.standard,
            GroupKind::Vip => self.vip,
        }
    }
}

impl SeatingConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow!("Failed to read config file: {}", e))?;

        let config: SeatingConfig = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file: {}", e))?;

        Ok(config)
    }

    pub fn load_from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields from SEATING_* environment variables
    pub fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var("SEATING_GROUPS_DIR") {
            self.paths.groups_dir = PathBuf::from(dir);
        }

        if let Ok(file) = std::env::var("SEATING_RESERVE_FILE") {
            self.paths.reserve_file = PathBuf::from(file);
        }

        if let Ok(file) = std::env::var("SEATING_OUTPUT_FILE") {
            self.paths.output_file = PathBuf::from(file);
        }

        if let Ok(seats) = std::env::var("SEATING_STANDARD_CAPACITY") {
            if let Ok(value) = seats.parse::<usize>() {
                self.capacity.standard = value;
            }
        }

        if let Ok(seats) = std::env::var("SEATING_VIP_CAPACITY") {
            if let Ok(value) = seats.parse::<usize>() {
                self.capacity.vip = value;
            }
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| anyhow!("Failed to write config file: {}", e))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity.standard == 0 || self.capacity.vip == 0 {
            return Err(anyhow!(
                "table capacity must be at least 1 (standard={}, vip={})",
                self.capacity.standard,
                self.capacity.vip
            ));
        }

        // gp_id 0 marks vacancies and unparseable filenames
        if self.labels.reserve_group_id == 0 {
            return Err(anyhow!("reserve_group_id must not be 0"));
        }

        if self.labels.default_menu.trim().is_empty() {
            return Err(anyhow!("default_menu must not be blank"));
        }

        Ok(())
    }
}
