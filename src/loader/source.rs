use std::path::{Path, PathBuf};
use anyhow::Result;
use regex::Regex;
use tracing::{debug, warn};

use crate::config::CapacityConfig;
use crate::error::{SeatingError, SeatingResult};
use crate::guest::GroupTag;

const UNKNOWN_GROUP_ID: u32 = 0;
const UNKNOWN_GROUP_NAME: &str = "unknown";

/// One grp*.csv booking file found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSource {
    pub path: PathBuf,
    pub file_name: String,
    /// First digit run in the filename, 0 when there is none
    pub sort_key: u32,
}

/// Pulls group id and group name out of `grp<digits>-<name>.csv`
pub struct FilenameParser {
    id_pattern: Regex,
    name_pattern: Regex,
    digits: Regex,
}

impl FilenameParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            id_pattern: Regex::new(r"grp(\d+)")?,
            name_pattern: Regex::new(r"-(.*?)\.csv$")?,
            digits: Regex::new(r"\d+")?,
        })
    }

    /// Parse a group tag from a filename.
    ///
    /// Each half falls back on its own: a file called `grp7.csv` keeps id 7
    /// but gets the name "unknown".
    pub fn parse_tag(&self, file_name: &str, capacity: &CapacityConfig) -> GroupTag {
        let id = self
            .id_pattern
            .captures(file_name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| match m.as_str().parse::<u32>() {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!(
                        file = file_name,
                        digits = m.as_str(),
                        max = u32::MAX,
                        "⚠️  Group id is out of range, filing the group under id {}",
                        UNKNOWN_GROUP_ID
                    );
                    None
                }
            });

        let name = self
            .name_pattern
            .captures(file_name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string());

        if id.is_none() || name.is_none() {
            warn!(
                file = file_name,
                "⚠️  Filename does not match grp<id>-<name>.csv, using defaults for missing parts"
            );
        }

        let name = name.unwrap_or_else(|| UNKNOWN_GROUP_NAME.to_string());
        let kind = capacity.classify(&name);

        GroupTag {
            id: id.unwrap_or(UNKNOWN_GROUP_ID),
            name,
            kind,
        }
    }

    fn sort_key(&self, file_name: &str) -> u32 {
        self.digits
            .find(file_name)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    }

    /// List the booking files in `dir`, ordered by their leading number.
    pub fn discover(&self, dir: &Path) -> SeatingResult<Vec<GroupSource>> {
        if !dir.is_dir() {
            return Err(SeatingError::GroupsDirMissing {
                path: dir.display().to_string(),
            });
        }

        let entries = std::fs::read_dir(dir)
            .map_err(|e| SeatingError::file_io(dir.display().to_string(), e))?;

        let mut sources = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SeatingError::file_io(dir.display().to_string(), e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
                continue;
            };

            if file_name.starts_with("grp") && file_name.ends_with(".csv") {
                let sort_key = self.sort_key(&file_name);
                sources.push(GroupSource { path, file_name, sort_key });
            }
        }

        if sources.is_empty() {
            return Err(SeatingError::NoGroupSources {
                path: dir.display().to_string(),
            });
        }

        sources.sort_by(|a, b| a.sort_key.cmp(&b.sort_key).then_with(|| a.file_name.cmp(&b.file_name)));
        debug!("Found {} group sources in {}", sources.len(), dir.display());

        Ok(sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guest::GroupKind;
    use tempfile::tempdir;

    #[test]
    fn test_parse_well_formed_name() {
        let parser = FilenameParser::new().unwrap();
        let tag = parser.parse_tag("grp5-Diraja.csv", &CapacityConfig::default());
        assert_eq!(tag.id, 5);
        assert_eq!(tag.name, "Diraja");
        assert_eq!(tag.kind, GroupKind::Vip);
    }

    #[test]
    fn test_parse_name_with_spaces() {
        let parser = FilenameParser::new().unwrap();
        let tag = parser.parse_tag("grp12- Unit A .csv", &CapacityConfig::default());
        assert_eq!(tag.id, 12);
        assert_eq!(tag.name, "Unit A");
        assert_eq!(tag.kind, GroupKind::Standard);
    }

    #[test]
    fn test_parse_falls_back_per_part() {
        let parser = FilenameParser::new().unwrap();
        let capacity = CapacityConfig::default();

        let no_name = parser.parse_tag("grp7.csv", &capacity);
        assert_eq!(no_name.id, 7);
        assert_eq!(no_name.name, "unknown");

        let no_id = parser.parse_tag("grpX-Ramli.csv", &capacity);
        assert_eq!(no_id.id, 0);
        assert_eq!(no_id.name, "Ramli");
        assert_eq!(no_id.kind, GroupKind::Vip);
    }

    #[test]
    fn test_out_of_range_id_falls_back() {
        let parser = FilenameParser::new().unwrap();
        let capacity = CapacityConfig::default();

        let max = parser.parse_tag("grp4294967295-Big.csv", &capacity);
        assert_eq!(max.id, u32::MAX);

        let too_big = parser.parse_tag("grp4294967296-Big.csv", &capacity);
        assert_eq!(too_big.id, 0);
        assert_eq!(too_big.name, "Big");
    }

    #[test]
    fn test_discover_orders_numerically() {
        let dir = tempdir().unwrap();
        for name in ["grp10-b.csv", "grp2-a.csv", "notes.txt", "grp1-c.txt", "other.csv"] {
            std::fs::write(dir.path().join(name), "name\n").unwrap();
        }

        let parser = FilenameParser::new().unwrap();
        let sources = parser.discover(dir.path()).unwrap();
        let names: Vec<&str> = sources.iter().map(|s| s.file_name.as_str()).collect();
        assert_eq!(names, vec!["grp2-a.csv", "grp10-b.csv"]);
    }

    #[test]
    fn test_discover_missing_dir_is_fatal() {
        let dir = tempdir().unwrap();
        let parser = FilenameParser::new().unwrap();
        let err = parser.discover(&dir.path().join("tempahan")).unwrap_err();
        assert!(matches!(err, SeatingError::GroupsDirMissing { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_discover_empty_dir_is_fatal() {
        let dir = tempdir().unwrap();
        let parser = FilenameParser::new().unwrap();
        let err = parser.discover(dir.path()).unwrap_err();
        assert!(matches!(err, SeatingError::NoGroupSources { .. }));
    }
}
