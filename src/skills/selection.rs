use super::grid::{DenseGrid, build_grid};
use super::table::SourceTable;

/// Skill groups and countries picked by the user, sorted by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    skills: Vec<String>,
    countries: Vec<String>,
}

impl Selection {
    pub fn new<S, C>(skills: S, countries: C) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            skills: sorted_unique(skills),
            countries: sorted_unique(countries),
        }
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn grid(&self, table: &SourceTable) -> DenseGrid {
        build_grid(table, &self.countries, &self.skills)
    }
}

fn sorted_unique<I>(values: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut values = values.into_iter().map(Into::into).collect::<Vec<String>>();
    values.sort();
    values.dedup();
    values
}
