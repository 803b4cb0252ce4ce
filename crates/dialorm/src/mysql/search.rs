use crate::criterion::{Comparator, Criterion};
use crate::term::Term;

/// Modifier placed inside `AGAINST(...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    NaturalLanguage,
    NaturalLanguageWithQueryExpansion,
    Boolean,
    WithQueryExpansion,
}

impl SearchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchMode::NaturalLanguage => "IN NATURAL LANGUAGE MODE",
            SearchMode::NaturalLanguageWithQueryExpansion => {
                "IN NATURAL LANGUAGE MODE WITH QUERY EXPANSION"
            }
            SearchMode::Boolean => "IN BOOLEAN MODE",
            SearchMode::WithQueryExpansion => "WITH QUERY EXPANSION",
        }
    }
}

/// Full-text search: `MATCH(col,...) AGAINST(expr [mode])`.
pub struct SearchCriterion;

impl SearchCriterion {
    pub fn new(columns: Vec<Term>, expr: Term, mode: Option<SearchMode>) -> Criterion {
        let against = Term::Function {
            name: "AGAINST",
            args: vec![expr],
            suffix: mode.map(SearchMode::as_str),
        };
        Criterion::basic(Comparator::Search, Term::function("MATCH", columns), against)
    }
}
