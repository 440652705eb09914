use serde::Deserialize;

use super::CleaningChanges;

/// Literal left behind when a missing name goes through string normalization
const MISSING_NAME: &str = "Nan";

/// One row of a guest CSV, as read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGuestRow {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub menu: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedGuest {
    pub name: String,
    pub menu: String,
}

/// Normalizes raw guest rows: trimmed text, title-cased names, defaulted menus.
pub struct GuestCleaner {
    default_menu: String,
}

impl GuestCleaner {
    pub fn new(default_menu: impl Into<String>) -> Self {
        Self {
            default_menu: default_menu.into(),
        }
    }

    pub fn clean_rows<I>(&self, rows: I) -> (Vec<CleanedGuest>, CleaningChanges)
    where
        I: IntoIterator<Item = RawGuestRow>,
    {
        let mut changes = CleaningChanges::default();
        let mut cleaned = Vec::new();

        for row in rows {
            changes.total_rows += 1;

            let menu_missing = is_missing(row.menu.as_deref());

            match self.clean_row(row) {
                Some(guest) => {
                    changes.rows_kept += 1;
                    if menu_missing {
                        changes.menus_defaulted += 1;
                    }
                    cleaned.push(guest);
                }
                None => changes.rows_dropped += 1,
            }
        }

        (cleaned, changes)
    }

    /// Clean a single row, or `None` when it has no usable name.
    ///
    /// The name check runs on the cleaned value: a missing name is turned
    /// into "Nan" by title-casing and must still be dropped.
    pub fn clean_row(&self, row: RawGuestRow) -> Option<CleanedGuest> {
        let name = title_case(row.name.as_deref().map(str::trim).unwrap_or("nan"));
        if name.is_empty() || name == MISSING_NAME {
            return None;
        }

        let menu = match row.menu.as_deref().map(str::trim) {
            Some(menu) if !is_missing(Some(menu)) => menu.to_string(),
            _ => self.default_menu.clone(),
        };

        Some(CleanedGuest { name, menu })
    }
}

fn is_missing(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None => true,
        Some(v) => v.is_empty() || v.eq_ignore_ascii_case("nan"),
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_is_letter = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            result.push(ch);
            prev_is_letter = false;
        }
    }

    result
}
