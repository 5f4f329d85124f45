use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::error::DataError;

pub const SKILL_COLUMN: &str = "skill_group_name";
pub const COUNTRY_COLUMN: &str = "country_name";
pub const RATIO_COLUMN: &str = "relative_skill_group_penetration";
pub const OCCUPATIONS_COLUMN: &str = "n_occupations_country_skill";

pub const REQUIRED_COLUMNS: [&str; 4] = [
    SKILL_COLUMN,
    COUNTRY_COLUMN,
    RATIO_COLUMN,
    OCCUPATIONS_COLUMN,
];

/// One (skill group, country) row of the penetration table. Blank measure
/// cells are kept as `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceRecord {
    pub skill: String,
    pub country: String,
    pub ratio: Option<f64>,
    pub occupations: Option<u64>,
}

/// Join key of the dense grid. Serialises as `[skill, country]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SkillCountry(pub String, pub String);

impl SkillCountry {
    pub fn skill(&self) -> &str {
        &self.0
    }

    pub fn country(&self) -> &str {
        &self.1
    }
}

/// Read-only penetration table, unique by (skill, country).
#[derive(Clone, Debug, Default)]
pub struct SourceTable {
    records: Vec<SourceRecord>,
    index: HashMap<String, HashMap<String, usize>>,
    lines: Vec<u64>,
    skills: Vec<String>,
    countries: Vec<String>,
    seen_countries: HashSet<String>,
}

impl SourceTable {
    /// Builds a table from records in file order. Duplicate keys are reported
    /// with line numbers that assume one header line before the first record.
    #[cfg(test)]
    pub fn from_records(records: Vec<SourceRecord>) -> Result<Self, DataError> {
        let mut table = Self::default();
        for (position, record) in records.into_iter().enumerate() {
            table.insert(record, position as u64 + 2)?;
        }
        Ok(table)
    }

    pub(super) fn insert(&mut self, record: SourceRecord, line: u64) -> Result<(), DataError> {
        let countries = self.index.entry(record.skill.clone()).or_default();
        if let Some(&existing) = countries.get(&record.country) {
            return Err(DataError::DuplicateKey {
                skill: record.skill,
                country: record.country,
                first_line: self.lines.get(existing).copied().unwrap_or_default(),
                line,
            });
        }

        let position = self.records.len();
        countries.insert(record.country.clone(), position);

        if countries.len() == 1 {
            self.skills.push(record.skill.clone());
        }
        if self.seen_countries.insert(record.country.clone()) {
            self.countries.push(record.country.clone());
        }

        self.records.push(record);
        self.lines.push(line);
        Ok(())
    }

    #[cfg(test)]
    pub fn get(&self, skill: &str, country: &str) -> Option<&SourceRecord> {
        let position = *self.index.get(skill)?.get(country)?;
        self.records.get(position)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct skill group names in order of first appearance.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Distinct country names in order of first appearance.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Records whose key is in `keys`, in table order.
    pub fn restrict_to<'a>(&'a self, keys: &HashSet<(&str, &str)>) -> Vec<&'a SourceRecord> {
        self.records
            .iter()
            .filter(|record| keys.contains(&(record.skill.as_str(), record.country.as_str())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(skill: &str, country: &str) -> SourceRecord {
        SourceRecord {
            skill: skill.to_owned(),
            country: country.to_owned(),
            ratio: Some(1.0),
            occupations: Some(1),
        }
    }

    #[test]
    fn option_lists_keep_first_appearance_order() {
        let table = SourceTable::from_records(vec![
            record("Robotics", "Namibia"),
            record("AI", "Namibia"),
            record("AI", "Botswana"),
            record("Robotics", "Botswana"),
        ])
        .unwrap();

        assert_eq!(table.skills(), &["Robotics", "AI"]);
        assert_eq!(table.countries(), &["Namibia", "Botswana"]);
    }

    #[test]
    fn from_records_rejects_duplicates() {
        let error = SourceTable::from_records(vec![
            record("AI", "Kenya"),
            record("AI", "Ghana"),
            record("AI", "Kenya"),
        ])
        .unwrap_err();

        assert_eq!(
            error.to_string(),
            "duplicate row for (AI, Kenya) on lines 2 and 4"
        );
    }

    #[test]
    fn restrict_to_filters_by_key() {
        let table = SourceTable::from_records(vec![
            record("AI", "Kenya"),
            record("AI", "Ghana"),
            record("Robotics", "Kenya"),
        ])
        .unwrap();

        let keys = HashSet::from([("Robotics", "Kenya"), ("AI", "Chile")]);
        let restricted = table.restrict_to(&keys);
        assert_eq!(restricted, vec![&record("Robotics", "Kenya")]);
        assert!(table.get("AI", "Chile").is_none());
    }
}
