use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

use super::Catalog;
use crate::models::{CastCredit, CrewCredit, FilmRecord};

const FILMS_FILE: &str = "films.json";
const CAST_FILE: &str = "credits_cast.json";
const CREW_FILE: &str = "credits_crew.json";

/// Loads the catalog snapshot from the dataset directory.
///
/// Reads the three dataset files once; the returned `Catalog` is the immutable
/// snapshot the engine and all endpoints serve from. Missing or malformed
/// files fail startup.
pub fn load_dataset(dir: &Path) -> anyhow::Result<Catalog> {
    let films: Vec<FilmRecord> = read_json(&dir.join(FILMS_FILE))?;
    let cast: Vec<CastCredit> = read_json(&dir.join(CAST_FILE))?;
    let crew: Vec<CrewCredit> = read_json(&dir.join(CREW_FILE))?;

    tracing::info!(
        films = films.len(),
        cast_credits = cast.len(),
        crew_credits = crew.len(),
        "Dataset loaded"
    );

    Ok(Catalog::new(films, cast, crew))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read dataset file {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse dataset file {}", path.display()))
}
