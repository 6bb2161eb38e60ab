use std::collections::HashMap;

/// Static mapping from a lowercase skill to related search terms
///
/// Expansion broadens what the query embedding "sees" without touching the
/// stored profile.
#[derive(Debug, Clone, PartialEq)]
pub struct SynonymTable {
    entries: HashMap<String, Vec<String>>,
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::from_entries([
            ("data engineering", &["etl", "pipelines", "big data"][..]),
            ("aws", &["cloud", "s3"][..]),
            ("airflow", &["workflow orchestration"][..]),
        ])
    }
}

impl SynonymTable {
    /// Builds a table; keys are lowercased so lookups are case-insensitive
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let entries = entries
            .into_iter()
            .map(|(skill, synonyms)| {
                (
                    skill.to_lowercase(),
                    synonyms.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();

        Self { entries }
    }

    /// Synonyms for `skill`, empty when there is no entry
    pub fn synonyms(&self, skill: &str) -> &[String] {
        self.entries
            .get(&skill.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Expands each skill in place: the original followed by its synonyms
    ///
    /// Input order is preserved and duplicates are kept.
    pub fn expand(&self, skills: &[String]) -> Vec<String> {
        skills
            .iter()
            .flat_map(|skill| {
                std::iter::once(skill.clone()).chain(self.synonyms(skill).iter().cloned())
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
