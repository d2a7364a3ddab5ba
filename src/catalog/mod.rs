use std::collections::HashSet;

use crate::models::{CastCredit, CrewCredit, FilmRecord};

mod loader;

pub use loader::load_dataset;

/// Immutable catalog snapshot: film records plus cast and crew credits.
///
/// Built once at startup from the dataset files and shared read-only for the
/// process lifetime. All lookups run against this fixed snapshot; a changed
/// dataset requires constructing a new `Catalog` (and a new engine generation
/// on top of it).
pub struct Catalog {
    films: Vec<FilmRecord>,
    cast: Vec<CastCredit>,
    crew: Vec<CrewCredit>,
}

impl Catalog {
    /// Creates a snapshot over the given records, preserving dataset order
    pub fn new(films: Vec<FilmRecord>, cast: Vec<CastCredit>, crew: Vec<CrewCredit>) -> Self {
        Self { films, cast, crew }
    }

    /// All film records in dataset order
    pub fn films(&self) -> &[FilmRecord] {
        &self.films
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    /// Resolves a film by exact, case-sensitive title match.
    ///
    /// Returns the corpus index alongside the record; on duplicate titles the
    /// first occurrence in dataset order wins.
    pub fn find_by_title(&self, title: &str) -> Option<(usize, &FilmRecord)> {
        self.films.iter().enumerate().find(|(_, f)| f.title == title)
    }

    /// Resolves a film by case-insensitive title match, first occurrence wins
    pub fn find_by_title_ci(&self, title: &str) -> Option<&FilmRecord> {
        let needle = title.to_lowercase();
        self.films.iter().find(|f| f.title.to_lowercase() == needle)
    }

    /// All films sharing the given collection identifier, in dataset order.
    ///
    /// The query film itself is included when it carries the identifier; the
    /// recommendation assembler strips it by title afterwards.
    pub fn collection_members(&self, collection_id: u64) -> Vec<&FilmRecord> {
        self.films
            .iter()
            .filter(|f| f.collection_id == Some(collection_id))
            .collect()
    }

    /// Films the named actor appears in, matched case-insensitively against
    /// cast credits, returned in dataset order without duplicates.
    pub fn films_with_actor(&self, name: &str) -> Vec<&FilmRecord> {
        let needle = name.to_lowercase();
        let ids: HashSet<u64> = self
            .cast
            .iter()
            .filter(|credit| credit.name.to_lowercase() == needle)
            .map(|credit| credit.film_id)
            .collect();
        self.films.iter().filter(|f| ids.contains(&f.id)).collect()
    }

    /// Films directed by the named person: crew credits matched
    /// case-insensitively on name, restricted to the director job.
    pub fn films_directed_by(&self, name: &str) -> Vec<&FilmRecord> {
        let needle = name.to_lowercase();
        let ids: HashSet<u64> = self
            .crew
            .iter()
            .filter(|credit| {
                credit.job.eq_ignore_ascii_case("director")
                    && credit.name.to_lowercase() == needle
            })
            .map(|credit| credit.film_id)
            .collect();
        self.films.iter().filter(|f| ids.contains(&f.id)).collect()
    }
}
