use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// State behind one multi-select widget: the option list, the chosen values
/// and the search box text.
pub(in crate::app) struct MultiChoice {
    title: &'static str,
    options: Vec<String>,
    selected: Vec<String>,
    query: String,
    matcher: SkimMatcherV2,
}

impl MultiChoice {
    pub(in crate::app) fn new(title: &'static str, options: Vec<String>, selected: Vec<String>) -> Self {
        let mut choice = Self {
            title,
            options,
            selected: Vec::with_capacity(selected.len()),
            query: String::new(),
            matcher: SkimMatcherV2::default(),
        };
        for value in selected {
            if !choice.selected.contains(&value) {
                choice.selected.push(value);
            }
        }
        choice
    }

    pub(in crate::app) fn title(&self) -> &'static str {
        self.title
    }

    pub(in crate::app) fn selected(&self) -> &[String] {
        &self.selected
    }

    pub(in crate::app) fn query_mut(&mut self) -> &mut String {
        &mut self.query
    }

    pub(in crate::app) fn select(&mut self, value: &str) -> bool {
        if self.selected.iter().any(|selected| selected == value)
            || !self.options.iter().any(|option| option == value)
        {
            return false;
        }

        self.selected.push(value.to_owned());
        true
    }

    pub(in crate::app) fn deselect(&mut self, value: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|selected| selected != value);
        self.selected.len() != before
    }

    /// Unselected options matching the search text, best match first. With an
    /// empty query all unselected options are returned in their original order.
    pub(in crate::app) fn matching_options(&self) -> Vec<&str> {
        let query = self.query.trim();
        let unselected = self
            .options
            .iter()
            .filter(|option| !self.selected.contains(option));

        if query.is_empty() {
            return unselected.map(String::as_str).collect();
        }

        let mut scored = unselected
            .filter_map(|option| {
                fuzzy_match_score(&self.matcher, option, query).map(|score| (score, option.as_str()))
            })
            .collect::<Vec<_>>();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored.into_iter().map(|(_, option)| option).collect()
    }
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countries() -> MultiChoice {
        MultiChoice::new(
            "Select Countries",
            ["Kenya", "Germany", "Ghana", "South Africa", "Poland"]
                .map(str::to_owned)
                .to_vec(),
            vec!["Kenya".to_owned(), "Kenya".to_owned()],
        )
    }

    #[test]
    fn initial_selection_is_deduplicated() {
        assert_eq!(countries().selected(), &["Kenya"]);
    }

    #[test]
    fn select_ignores_unknown_and_repeated_values() {
        let mut choice = countries();
        assert!(choice.select("Poland"));
        assert!(!choice.select("Poland"));
        assert!(!choice.select("Atlantis"));
        assert_eq!(choice.selected(), &["Kenya", "Poland"]);
    }

    #[test]
    fn deselect_removes_value() {
        let mut choice = countries();
        assert!(choice.deselect("Kenya"));
        assert!(!choice.deselect("Kenya"));
        assert!(choice.selected().is_empty());
    }

    #[test]
    fn empty_query_lists_unselected_in_order() {
        assert_eq!(
            countries().matching_options(),
            vec!["Germany", "Ghana", "South Africa", "Poland"]
        );
    }

    #[test]
    fn query_filters_case_insensitively() {
        let mut choice = countries();
        *choice.query_mut() = "SOUTH".to_owned();
        assert_eq!(choice.matching_options(), vec!["South Africa"]);

        *choice.query_mut() = "gha".to_owned();
        let matches = choice.matching_options();
        assert_eq!(matches.first(), Some(&"Ghana"));
        assert!(!matches.contains(&"Kenya"));
    }
}
