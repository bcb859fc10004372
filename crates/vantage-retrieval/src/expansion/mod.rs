pub mod synonym_expander;

pub use synonym_expander::{ExpandedQuery, SynonymExpander};
