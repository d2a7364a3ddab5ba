use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::catalog::Catalog;

pub mod features;
pub mod similarity;
pub mod text;
pub mod vector;

use vector::{FilmVector, VocabularyIndex};

/// Number of recommendations returned per request
const RESULT_SIZE: usize = 5;

/// Errors surfaced by the recommendation engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cannot build a vector space over an empty catalog")]
    EmptyCorpus,
    #[error("no film titled '{0}' in the catalog")]
    UnknownTitle(String),
}

/// Content-based recommendation engine over an immutable catalog snapshot.
///
/// Construction is the one-time initialization barrier: the composite feature
/// texts, vocabulary and TF-IDF vectors are all derived here, before the
/// engine serves its first request, and are never recomputed afterwards.
/// Requests only read, so the engine can be shared behind an `Arc` without
/// locking. A changed catalog means building a fresh engine; readers holding
/// the old one keep a consistent generation.
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
    vocabulary: VocabularyIndex,
    vectors: Vec<FilmVector>,
}

impl RecommendationEngine {
    /// Builds the vector space for the given catalog snapshot.
    ///
    /// Fails with `EmptyCorpus` when the catalog holds no films; a process
    /// serving zero films cannot answer any request and must not start.
    pub fn build(catalog: Arc<Catalog>) -> Result<Self, EngineError> {
        let composite_texts: Vec<String> = catalog
            .films()
            .iter()
            .map(|film| features::fuse(&film.title, film.overview.as_deref(), &film.genres))
            .collect();

        let (vocabulary, vectors) = vector::build(&composite_texts)?;

        tracing::info!(
            films = vectors.len(),
            vocabulary = vocabulary.len(),
            "Vector space built"
        );

        Ok(Self {
            catalog,
            vocabulary,
            vectors,
        })
    }

    /// Number of distinct terms in the built vector space
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Produces up to five recommended titles for the given film.
    ///
    /// The query is resolved by exact, case-sensitive title match. Candidates
    /// are assembled in priority order: every film sharing the query's
    /// collection (catalog order) first, then the five nearest films by
    /// cosine similarity. If self-exclusion and title deduplication left
    /// fewer than five, further films follow in descending similarity order
    /// until five are reached or the catalog is exhausted. Catalogs with
    /// fewer than six films legitimately return shorter lists.
    pub fn recommend(&self, query_title: &str) -> Result<Vec<String>, EngineError> {
        let (query_idx, query_film) = self
            .catalog
            .find_by_title(query_title)
            .ok_or_else(|| EngineError::UnknownTitle(query_title.to_string()))?;

        let ranked = similarity::rank(&self.vectors[query_idx], &self.vectors);

        // Collection membership takes strict priority over text similarity
        let mut candidates: Vec<&str> = Vec::new();
        if let Some(collection_id) = query_film.collection_id {
            candidates.extend(
                self.catalog
                    .collection_members(collection_id)
                    .iter()
                    .map(|film| film.title.as_str()),
            );
        }

        // Baseline: skip the top-1 self-match, take the next five
        candidates.extend(
            ranked
                .iter()
                .skip(1)
                .take(RESULT_SIZE)
                .map(|&(idx, _)| self.catalog.films()[idx].title.as_str()),
        );

        // Self-exclusion and title dedup, preserving first-occurrence order
        let mut seen: HashSet<&str> = HashSet::new();
        let mut recommendations: Vec<String> = Vec::new();
        for title in candidates {
            if title == query_title || !seen.insert(title) {
                continue;
            }
            recommendations.push(title.to_string());
        }

        // Fallback fill from beyond the initial similarity window
        if recommendations.len() < RESULT_SIZE {
            for &(idx, _) in ranked.iter().skip(RESULT_SIZE + 1) {
                let title = self.catalog.films()[idx].title.as_str();
                if title == query_title || !seen.insert(title) {
                    continue;
                }
                recommendations.push(title.to_string());
                if recommendations.len() == RESULT_SIZE {
                    break;
                }
            }
        }

        recommendations.truncate(RESULT_SIZE);
        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilmRecord;
    use chrono::NaiveDate;

    fn film(
        id: u64,
        title: &str,
        overview: Option<&str>,
        genres: &[&str],
        collection_id: Option<u64>,
    ) -> FilmRecord {
        FilmRecord {
            id,
            title: title.to_string(),
            overview: overview.map(|o| o.to_string()),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            collection_id,
            release_date: NaiveDate::from_ymd_opt(2005, 3, 12).unwrap(),
            popularity: 1.0,
            vote_count: 100,
            vote_average: 6.5,
            budget: 0.0,
            revenue: 0.0,
            return_ratio: 0.0,
        }
    }

    fn engine(films: Vec<FilmRecord>) -> RecommendationEngine {
        let catalog = Arc::new(Catalog::new(films, vec![], vec![]));
        RecommendationEngine::build(catalog).unwrap()
    }

    fn action_catalog() -> Vec<FilmRecord> {
        vec![
            film(
                1,
                "Sky Guardians",
                Some("a hero saves the city"),
                &["Action"],
                Some(1),
            ),
            film(
                2,
                "Sky Guardians II",
                Some("a hero defends the town"),
                &["Action"],
                Some(1),
            ),
            film(
                3,
                "Midnight Laughs",
                Some("a clown tells jokes"),
                &["Comedy"],
                None,
            ),
        ]
    }

    #[test]
    fn test_build_fails_on_empty_catalog() {
        let catalog = Arc::new(Catalog::new(vec![], vec![], vec![]));
        assert!(matches!(
            RecommendationEngine::build(catalog),
            Err(EngineError::EmptyCorpus)
        ));
    }

    #[test]
    fn test_unknown_title_is_reported() {
        let engine = engine(action_catalog());
        assert!(matches!(
            engine.recommend("Unknown Title"),
            Err(EngineError::UnknownTitle(_))
        ));
    }

    #[test]
    fn test_collection_mate_precedes_textual_neighbor() {
        let engine = engine(action_catalog());
        let recommendations = engine.recommend("Sky Guardians").unwrap();
        assert_eq!(recommendations, vec!["Sky Guardians II", "Midnight Laughs"]);
    }

    #[test]
    fn test_collection_priority_beats_higher_similarity() {
        // "Lone Signal" is textually much closer to the query than its
        // collection mates, but collection membership must win.
        let engine = engine(vec![
            film(
                1,
                "Deep Orbit",
                Some("astronauts drift past a dying star"),
                &["SciFi"],
                Some(4),
            ),
            film(2, "Quiet Fields", Some("farmers tend wheat"), &["Drama"], Some(4)),
            film(3, "Still Rivers", Some("monks cross water"), &["Drama"], Some(4)),
            film(
                4,
                "Lone Signal",
                Some("astronauts drift past a dying star"),
                &["SciFi"],
                None,
            ),
        ]);

        let recommendations = engine.recommend("Deep Orbit").unwrap();
        assert_eq!(
            recommendations,
            vec!["Quiet Fields", "Still Rivers", "Lone Signal"]
        );
    }

    #[test]
    fn test_recommendations_are_deterministic() {
        let engine = engine(action_catalog());
        let first = engine.recommend("Sky Guardians").unwrap();
        let second = engine.recommend("Sky Guardians").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_query_film_never_appears() {
        let engine = engine(action_catalog());
        let recommendations = engine.recommend("Sky Guardians").unwrap();
        assert!(!recommendations.contains(&"Sky Guardians".to_string()));
    }

    #[test]
    fn test_exactly_five_when_catalog_is_large_enough() {
        let films = (1..=9)
            .map(|i| {
                film(
                    i,
                    &format!("Film {i}"),
                    Some("a hero saves the city"),
                    &["Action"],
                    None,
                )
            })
            .collect();
        let engine = engine(films);

        let recommendations = engine.recommend("Film 1").unwrap();
        assert_eq!(recommendations.len(), 5);
    }

    #[test]
    fn test_tiny_catalog_returns_all_other_titles() {
        let engine = engine(action_catalog());
        let recommendations = engine.recommend("Midnight Laughs").unwrap();
        assert_eq!(recommendations.len(), 2);
    }

    #[test]
    fn test_no_duplicate_titles_and_fallback_fill() {
        // Two films share the title "Twin Harbor"; dedup shrinks the initial
        // window and the fill must reach past it to restore five results.
        let mut films = vec![
            film(1, "Query Port", Some("ships cross the bay at dawn"), &["Drama"], None),
            film(2, "Twin Harbor", Some("ships cross the bay at dawn"), &["Drama"], None),
            film(3, "Twin Harbor", Some("ships cross the bay at night"), &["Drama"], None),
            film(4, "Salt Wind", Some("ships cross the bay slowly"), &["Drama"], None),
            film(5, "Gull Rock", Some("ships in the bay"), &["Drama"], None),
            film(6, "Pier Nine", Some("ships near the bay"), &["Drama"], None),
        ];
        films.push(film(7, "Dry Dock", Some("boats rest in the harbor"), &["Drama"], None));
        films.push(film(8, "Last Ferry", Some("a boat leaves the bay"), &["Drama"], None));
        let engine = engine(films);

        let recommendations = engine.recommend("Query Port").unwrap();
        assert_eq!(recommendations.len(), 5);
        let unique: HashSet<&String> = recommendations.iter().collect();
        assert_eq!(unique.len(), recommendations.len());
    }

    #[test]
    fn test_film_without_usable_text_still_recommends() {
        // A punctuation-only title with no overview and no genres produces an
        // all-zero vector; assembly must still return the rest of the catalog.
        let films = vec![
            film(1, "???", None, &[], None),
            film(2, "Sky Guardians", Some("a hero saves the city"), &["Action"], None),
            film(3, "Midnight Laughs", Some("a clown tells jokes"), &["Comedy"], None),
        ];
        let engine = engine(films);

        let recommendations = engine.recommend("???").unwrap();
        assert_eq!(recommendations.len(), 2);
        assert!(!recommendations.contains(&"???".to_string()));
    }

    #[test]
    fn test_duplicate_query_title_resolves_to_first_occurrence() {
        let films = vec![
            film(1, "Echo", Some("a hero saves the city"), &["Action"], None),
            film(2, "Echo", Some("a clown tells jokes"), &["Comedy"], None),
            film(3, "Sky Guardians", Some("a hero defends the town"), &["Action"], None),
        ];
        let engine = engine(films);

        // Resolves to index 0 (the action film); its own title is excluded
        // everywhere, so the duplicate never shows up either.
        let recommendations = engine.recommend("Echo").unwrap();
        assert_eq!(recommendations, vec!["Sky Guardians"]);
    }

    #[test]
    fn test_single_film_catalog_yields_empty_list() {
        let engine = engine(vec![film(
            1,
            "Only One",
            Some("nothing else exists"),
            &["Drama"],
            Some(3),
        )]);
        let recommendations = engine.recommend("Only One").unwrap();
        assert!(recommendations.is_empty());
    }

    #[test]
    fn test_vocabulary_is_exposed_for_diagnostics() {
        let engine = engine(action_catalog());
        assert!(engine.vocabulary_size() > 0);
    }
}
