use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::palette::{ColorStrategy, Rgb};
use super::table::{SkillCountry, SourceTable};

#[derive(Clone, Debug, PartialEq)]
pub struct GridEntry {
    pub key: SkillCountry,
    pub ratio: Option<f64>,
    pub occupations: Option<u64>,
    pub color: Rgb,
}

/// Cartesian product of the selected skills and countries, row-major with the
/// skill as the outer key. Pairs missing from the source keep `None` measures.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseGrid {
    entries: Vec<GridEntry>,
    skills: Vec<String>,
    countries: Vec<String>,
    strategy: ColorStrategy,
}

/// Column view of a [`DenseGrid`] in the shape a chart data source binds to.
#[derive(Debug, Serialize)]
pub struct GridColumns<'a> {
    pub x: Vec<&'a SkillCountry>,
    pub y: Vec<Option<f64>>,
    pub z: Vec<Option<u64>>,
    pub color: Vec<Rgb>,
}

impl DenseGrid {
    pub fn entries(&self) -> &[GridEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn color_strategy(&self) -> ColorStrategy {
        self.strategy
    }

    pub fn pairs(&self) -> impl Iterator<Item = &SkillCountry> {
        self.entries.iter().map(|entry| &entry.key)
    }

    pub fn max_ratio(&self) -> Option<f64> {
        self.entries
            .iter()
            .filter_map(|entry| entry.ratio)
            .filter(|ratio| ratio.is_finite())
            .reduce(f64::max)
    }

    pub fn columns(&self) -> GridColumns<'_> {
        GridColumns {
            x: self.pairs().collect(),
            y: self.entries.iter().map(|entry| entry.ratio).collect(),
            z: self.entries.iter().map(|entry| entry.occupations).collect(),
            color: self.entries.iter().map(|entry| entry.color).collect(),
        }
    }
}

fn distinct(values: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .iter()
        .filter(|value| seen.insert(value.as_str()))
        .cloned()
        .collect()
}

/// Joins every (skill, country) pair of the selection against `table`.
/// Repeated names in either slice count once.
pub fn build_grid(table: &SourceTable, countries: &[String], skills: &[String]) -> DenseGrid {
    let skills = distinct(skills);
    let countries = distinct(countries);

    let skeleton = skills
        .iter()
        .flat_map(|skill| {
            countries
                .iter()
                .enumerate()
                .map(move |(index, country)| (skill.as_str(), country.as_str(), index))
        })
        .collect::<Vec<_>>();

    let wanted = skeleton
        .iter()
        .map(|&(skill, country, _)| (skill, country))
        .collect::<HashSet<_>>();
    let joined = table
        .restrict_to(&wanted)
        .into_iter()
        .map(|record| ((record.skill.as_str(), record.country.as_str()), record))
        .collect::<HashMap<_, _>>();

    let strategy = ColorStrategy::for_country_count(countries.len());
    let entries = skeleton
        .iter()
        .map(|&(skill, country, country_index)| {
            let record = joined.get(&(skill, country));
            GridEntry {
                key: SkillCountry(skill.to_owned(), country.to_owned()),
                ratio: record.and_then(|record| record.ratio),
                occupations: record.and_then(|record| record.occupations),
                color: strategy.color_for(country_index),
            }
        })
        .collect::<Vec<_>>();

    DenseGrid {
        entries,
        skills,
        countries,
        strategy,
    }
}
