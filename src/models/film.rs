use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single film in the catalog snapshot.
///
/// Records are deserialized once from the dataset files at startup and are
/// read-only for the lifetime of the process. Titles are not guaranteed to be
/// unique across the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilmRecord {
    /// Unique identifier for the film
    pub id: u64,
    /// Display title, stored as-is (casing and punctuation preserved)
    pub title: String,
    /// Free-text plot summary, absent for some films
    #[serde(default)]
    pub overview: Option<String>,
    /// Genre tags in dataset order, may be empty
    #[serde(default)]
    pub genres: Vec<String>,
    /// Films sharing a collection identifier form a series
    #[serde(default)]
    pub collection_id: Option<u64>,
    /// Theatrical release date
    pub release_date: NaiveDate,
    /// Popularity score from the upstream dataset
    pub popularity: f64,
    pub vote_count: u64,
    pub vote_average: f64,
    pub budget: f64,
    pub revenue: f64,
    /// Return on investment (revenue / budget, precomputed in the dataset)
    #[serde(rename = "return")]
    pub return_ratio: f64,
}

impl FilmRecord {
    /// Year of theatrical release
    pub fn release_year(&self) -> i32 {
        self.release_date.year()
    }
}

/// One cast credit row: an actor appearing in a film.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastCredit {
    pub film_id: u64,
    pub name: String,
}

/// One crew credit row. Directors are rows whose job is "Director".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrewCredit {
    pub film_id: u64,
    pub name: String,
    pub job: String,
}
