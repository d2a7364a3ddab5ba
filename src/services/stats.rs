use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{AppError, AppResult};
use crate::models::{FilmRecord, Month, Weekday};

/// Titles below this vote count are not eligible for the votes endpoint
const MIN_VOTE_COUNT: u64 = 2000;

/// Release year and popularity score for one title
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TitleScore {
    pub title: String,
    pub release_year: i32,
    pub popularity: f64,
}

/// Vote statistics for one title
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TitleVotes {
    pub title: String,
    pub release_year: i32,
    pub vote_count: u64,
    pub vote_average: f64,
}

/// Aggregate career statistics for an actor
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActorSummary {
    pub name: String,
    pub film_count: usize,
    pub total_return: f64,
    pub average_return: f64,
}

/// One film in a director's breakdown
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DirectedFilm {
    pub title: String,
    pub release_date: NaiveDate,
    #[serde(rename = "return")]
    pub return_ratio: f64,
    pub budget: f64,
    pub revenue: f64,
}

/// Aggregate career statistics for a director, with a per-film breakdown
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DirectorSummary {
    pub name: String,
    pub film_count: usize,
    pub total_return: f64,
    pub average_return: f64,
    pub films: Vec<DirectedFilm>,
}

/// Number of films released in the given month, across all years
pub fn releases_in_month(catalog: &Catalog, month: Month) -> usize {
    catalog
        .films()
        .iter()
        .filter(|film| film.release_date.month() == month.number())
        .count()
}

/// Number of films released on the given weekday, across all years
pub fn releases_on_weekday(catalog: &Catalog, weekday: Weekday) -> usize {
    catalog
        .films()
        .iter()
        .filter(|film| film.release_date.weekday() == weekday.as_chrono())
        .count()
}

/// Release year and popularity for a title, matched case-insensitively
pub fn score_for_title(catalog: &Catalog, title: &str) -> AppResult<TitleScore> {
    let film = resolve_title(catalog, title)?;
    Ok(TitleScore {
        title: film.title.clone(),
        release_year: film.release_year(),
        popularity: film.popularity,
    })
}

/// Vote statistics for a title, matched case-insensitively.
///
/// Titles with fewer than 2000 recorded votes are not eligible and are
/// reported as such rather than returning low-confidence numbers.
pub fn votes_for_title(catalog: &Catalog, title: &str) -> AppResult<TitleVotes> {
    let film = resolve_title(catalog, title)?;
    if film.vote_count < MIN_VOTE_COUNT {
        return Err(AppError::IneligibleTitle(format!(
            "'{}' has {} votes, below the minimum of {}",
            film.title, film.vote_count, MIN_VOTE_COUNT
        )));
    }
    Ok(TitleVotes {
        title: film.title.clone(),
        release_year: film.release_year(),
        vote_count: film.vote_count,
        vote_average: film.vote_average,
    })
}

/// Career statistics for the named actor
pub fn actor_summary(catalog: &Catalog, name: &str) -> AppResult<ActorSummary> {
    let films = catalog.films_with_actor(name);
    if films.is_empty() {
        return Err(AppError::NotFound(format!(
            "no films featuring actor '{name}'"
        )));
    }

    let (film_count, total_return, average_return) = return_aggregates(&films);
    Ok(ActorSummary {
        name: name.to_string(),
        film_count,
        total_return,
        average_return,
    })
}

/// Career statistics for the named director, with a per-film breakdown
pub fn director_summary(catalog: &Catalog, name: &str) -> AppResult<DirectorSummary> {
    let films = catalog.films_directed_by(name);
    if films.is_empty() {
        return Err(AppError::NotFound(format!(
            "no films directed by '{name}'"
        )));
    }

    let (film_count, total_return, average_return) = return_aggregates(&films);
    let breakdown = films
        .iter()
        .map(|film| DirectedFilm {
            title: film.title.clone(),
            release_date: film.release_date,
            return_ratio: film.return_ratio,
            budget: film.budget,
            revenue: film.revenue,
        })
        .collect();

    Ok(DirectorSummary {
        name: name.to_string(),
        film_count,
        total_return,
        average_return,
        films: breakdown,
    })
}

fn resolve_title<'a>(catalog: &'a Catalog, title: &str) -> AppResult<&'a FilmRecord> {
    catalog
        .find_by_title_ci(title)
        .ok_or_else(|| AppError::NotFound(format!("no film titled '{title}'")))
}

fn return_aggregates(films: &[&FilmRecord]) -> (usize, f64, f64) {
    let film_count = films.len();
    let total_return: f64 = films.iter().map(|film| film.return_ratio).sum();
    let average_return = total_return / film_count as f64;
    (film_count, total_return, average_return)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CastCredit, CrewCredit};

    fn film(id: u64, title: &str, date: (i32, u32, u32), votes: u64, ret: f64) -> FilmRecord {
        FilmRecord {
            id,
            title: title.to_string(),
            overview: None,
            genres: vec![],
            collection_id: None,
            release_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            popularity: 12.5,
            vote_count: votes,
            vote_average: 7.2,
            budget: 1000.0,
            revenue: 3000.0,
            return_ratio: ret,
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::new(
            vec![
                // 2010-05-14 is a Friday, 2011-05-02 a Monday
                film(1, "Sky Guardians", (2010, 5, 14), 3200, 3.0),
                film(2, "Midnight Laughs", (2011, 5, 2), 150, 1.5),
                film(3, "Harbor Shadows", (2012, 11, 9), 2400, 2.0),
            ],
            vec![
                CastCredit { film_id: 1, name: "Lena Vasquez".to_string() },
                CastCredit { film_id: 3, name: "Lena Vasquez".to_string() },
            ],
            vec![
                CrewCredit { film_id: 1, name: "Marco Ito".to_string(), job: "Director".to_string() },
                CrewCredit { film_id: 2, name: "Marco Ito".to_string(), job: "Producer".to_string() },
            ],
        )
    }

    #[test]
    fn test_releases_in_month() {
        let catalog = sample_catalog();
        assert_eq!(releases_in_month(&catalog, Month::May), 2);
        assert_eq!(releases_in_month(&catalog, Month::November), 1);
        assert_eq!(releases_in_month(&catalog, Month::January), 0);
    }

    #[test]
    fn test_releases_on_weekday() {
        let catalog = sample_catalog();
        assert_eq!(releases_on_weekday(&catalog, Weekday::Friday), 2);
        assert_eq!(releases_on_weekday(&catalog, Weekday::Monday), 1);
        assert_eq!(releases_on_weekday(&catalog, Weekday::Sunday), 0);
    }

    #[test]
    fn test_score_for_title_is_case_insensitive() {
        let catalog = sample_catalog();
        let score = score_for_title(&catalog, "sky guardians").unwrap();
        assert_eq!(score.title, "Sky Guardians");
        assert_eq!(score.release_year, 2010);
        assert_eq!(score.popularity, 12.5);
    }

    #[test]
    fn test_score_for_unknown_title() {
        let catalog = sample_catalog();
        assert!(matches!(
            score_for_title(&catalog, "Nope"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_votes_for_eligible_title() {
        let catalog = sample_catalog();
        let votes = votes_for_title(&catalog, "Sky Guardians").unwrap();
        assert_eq!(votes.vote_count, 3200);
        assert_eq!(votes.vote_average, 7.2);
    }

    #[test]
    fn test_votes_below_threshold_are_ineligible() {
        let catalog = sample_catalog();
        assert!(matches!(
            votes_for_title(&catalog, "Midnight Laughs"),
            Err(AppError::IneligibleTitle(_))
        ));
    }

    #[test]
    fn test_actor_summary_aggregates_returns() {
        let catalog = sample_catalog();
        let summary = actor_summary(&catalog, "lena vasquez").unwrap();
        assert_eq!(summary.film_count, 2);
        assert_eq!(summary.total_return, 5.0);
        assert_eq!(summary.average_return, 2.5);
    }

    #[test]
    fn test_unknown_actor_is_not_found() {
        let catalog = sample_catalog();
        assert!(matches!(
            actor_summary(&catalog, "Nobody"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_director_summary_ignores_non_director_credits() {
        let catalog = sample_catalog();
        let summary = director_summary(&catalog, "Marco Ito").unwrap();
        assert_eq!(summary.film_count, 1);
        assert_eq!(summary.films.len(), 1);
        assert_eq!(summary.films[0].title, "Sky Guardians");
        assert_eq!(summary.films[0].budget, 1000.0);
    }
}
