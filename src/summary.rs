use chrono::{DateTime, Local};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

use crate::config::LabelsConfig;
use crate::error::{SeatingError, SeatingResult};
use crate::export::SeatingRow;

/// Per-table tallies of a seating table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableTally {
    pub total_seats: usize,
    pub vacant: usize,
    pub reserve_filled: usize,
    /// One count per configured menu category, same order
    pub menu_counts: Vec<usize>,
}

impl TableTally {
    pub fn occupied(&self) -> usize {
        self.total_seats - self.vacant
    }

    fn add(&mut self, other: &TableTally) {
        self.total_seats += other.total_seats;
        self.vacant += other.vacant;
        self.reserve_filled += other.reserve_filled;
        if self.menu_counts.len() < other.menu_counts.len() {
            self.menu_counts.resize(other.menu_counts.len(), 0);
        }
        for (total, count) in self.menu_counts.iter_mut().zip(&other.menu_counts) {
            *total += count;
        }
    }
}

#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub categories: Vec<String>,
    pub tables: Vec<(u32, TableTally)>,
    pub totals: TableTally,
    pub generated_at: DateTime<Local>,
}

impl SummaryReport {
    pub fn build(rows: &[SeatingRow], labels: &LabelsConfig) -> Self {
        let categories = labels.menu_categories.clone();
        let lowered: Vec<String> = categories.iter().map(|c| c.to_lowercase()).collect();
        let vacancy = labels.vacancy_name.trim().to_lowercase();

        let mut by_table: BTreeMap<u32, TableTally> = BTreeMap::new();
        for row in rows {
            let tally = by_table.entry(row.table_number).or_insert_with(|| TableTally {
                menu_counts: vec![0; categories.len()],
                ..TableTally::default()
            });

            tally.total_seats += 1;
            if row.name.trim().to_lowercase() == vacancy {
                tally.vacant += 1;
            }
            if row.gp_id == labels.reserve_group_id {
                tally.reserve_filled += 1;
            }

            // Menus match by substring so "Ayam (kurang pedas)" still counts as Ayam
            let menu = row.menu.to_lowercase();
            for (count, category) in tally.menu_counts.iter_mut().zip(&lowered) {
                if menu.contains(category.as_str()) {
                    *count += 1;
                }
            }
        }

        let mut totals = TableTally {
            menu_counts: vec![0; categories.len()],
            ..TableTally::default()
        };
        for tally in by_table.values() {
            totals.add(tally);
        }

        Self {
            categories,
            tables: by_table.into_iter().collect(),
            totals,
            generated_at: Local::now(),
        }
    }

    fn header(&self) -> Vec<String> {
        let mut header: Vec<String> = ["Table", "Seats", "Vacant", "Reserve", "Occupied"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        header.extend(self.categories.iter().cloned());
        header
    }

    fn records(&self) -> Vec<Vec<String>> {
        let record = |label: String, tally: &TableTally| {
            let mut fields = vec![
                label,
                tally.total_seats.to_string(),
                tally.vacant.to_string(),
                tally.reserve_filled.to_string(),
                tally.occupied().to_string(),
            ];
            fields.extend(tally.menu_counts.iter().map(|c| c.to_string()));
            fields
        };

        let mut records: Vec<Vec<String>> = self
            .tables
            .iter()
            .map(|(table, tally)| record(table.to_string(), tally))
            .collect();
        records.push(record("Total".to_string(), &self.totals));
        records
    }

    pub fn to_text(&self) -> String {
        let header = self.header();
        let records = self.records();

        let widths: Vec<usize> = (0..header.len())
            .map(|col| {
                records
                    .iter()
                    .map(|r| r[col].len())
                    .chain(std::iter::once(header[col].len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |fields: &[String]| {
            fields
                .iter()
                .zip(&widths)
                .map(|(field, width)| format!("{:>width$}", field, width = *width))
                .collect::<Vec<_>>()
                .join("  ")
        };

        let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  ");
        let mut lines = vec![
            "Tables Summary".to_string(),
            format!("Generated at: {}", self.generated_at.format("%d-%m-%Y %H:%M")),
            String::new(),
            line(&header),
            rule,
        ];
        lines.extend(records.iter().map(|record| line(record)));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    pub fn to_csv(&self) -> SeatingResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(self.header())
            .map_err(|e| SeatingError::csv("summary", e))?;
        for record in self.records() {
            writer
                .write_record(&record)
                .map_err(|e| SeatingError::csv("summary", e))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| SeatingError::General(anyhow::anyhow!("flush summary csv: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| SeatingError::General(e.into()))
    }

    pub fn to_json(&self) -> Value {
        let tally_json = |tally: &TableTally| {
            let menus: Map<String, Value> = self
                .categories
                .iter()
                .zip(&tally.menu_counts)
                .map(|(category, count)| (category.clone(), json!(count)))
                .collect();
            json!({
                "total_seats": tally.total_seats,
                "vacant": tally.vacant,
                "reserve_filled": tally.reserve_filled,
                "occupied": tally.occupied(),
                "menus": menus,
            })
        };

        let tables: Vec<Value> = self
            .tables
            .iter()
            .map(|(table, tally)| {
                let mut value = tally_json(tally);
                value["table_number"] = json!(table);
                value
            })
            .collect();

        json!({
            "generated_at": self.generated_at.to_rfc3339(),
            "tables": tables,
            "totals": tally_json(&self.totals),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(table_number: u32, seat: u32, name: &str, menu: &str, gp_id: u32) -> SeatingRow {
        SeatingRow {
            table_number,
            seat,
            name: name.to_string(),
            menu: menu.to_string(),
            gp_id,
            gp_name: String::new(),
        }
    }

    fn rows() -> Vec<SeatingRow> {
        vec![
            row(1, 1, "Aminah", "Daging", 1),
            row(1, 2, "Bakar", "Ayam", 1),
            row(1, 3, "Zed", "ikan", 999),
            row(1, 4, "Simpanan", "N/A", 0),
            row(2, 1, "Chong", "Vegetarian", 2),
            row(2, 2, "Simpanan", "N/A", 0),
        ]
    }

    #[test]
    fn test_tallies_per_table() {
        let report = SummaryReport::build(&rows(), &LabelsConfig::default());
        assert_eq!(report.tables.len(), 2);

        let (table, first) = &report.tables[0];
        assert_eq!(*table, 1);
        assert_eq!(first.total_seats, 4);
        assert_eq!(first.vacant, 1);
        assert_eq!(first.reserve_filled, 1);
        assert_eq!(first.occupied(), 3);
        assert_eq!(first.menu_counts, vec![1, 1, 1, 0]);
    }

    #[test]
    fn test_totals_row() {
        let report = SummaryReport::build(&rows(), &LabelsConfig::default());
        assert_eq!(report.totals.total_seats, 6);
        assert_eq!(report.totals.vacant, 2);
        assert_eq!(report.totals.occupied(), 4);
        assert_eq!(report.totals.menu_counts, vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_csv_output() {
        let report = SummaryReport::build(&rows(), &LabelsConfig::default());
        let csv = report.to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Table,Seats,Vacant,Reserve,Occupied,Daging,Ayam,Ikan,Vegetarian");
        assert_eq!(lines[1], "1,4,1,1,3,1,1,1,0");
        assert_eq!(lines[3], "Total,6,2,1,4,1,1,1,1");
    }

    #[test]
    fn test_text_and_json_output() {
        let report = SummaryReport::build(&rows(), &LabelsConfig::default());
        let text = report.to_text();
        assert!(text.starts_with("Tables Summary"));
        assert!(text.lines().last().unwrap().trim_start().starts_with("Total"));

        let json = report.to_json();
        assert_eq!(json["totals"]["vacant"], 2);
        assert_eq!(json["tables"][1]["table_number"], 2);
        assert_eq!(json["tables"][0]["menus"]["Ayam"], 1);
    }

    #[test]
    fn test_guest_named_like_vacancy_is_occupied() {
        let rows = vec![
            row(1, 1, "Nor Simpanan", "Ayam", 1),
            row(1, 2, "SIMPANAN", "N/A", 0),
        ];
        let report = SummaryReport::build(&rows, &LabelsConfig::default());
        let (_, tally) = &report.tables[0];
        assert_eq!(tally.vacant, 1);
        assert_eq!(tally.occupied(), 1);
    }

    #[test]
    fn test_menu_variants_count_toward_category() {
        let rows = vec![row(1, 1, "Aminah", "Ayam (kurang pedas)", 1)];
        let report = SummaryReport::build(&rows, &LabelsConfig::default());
        assert_eq!(report.totals.menu_counts, vec![0, 1, 0, 0]);
    }
}
