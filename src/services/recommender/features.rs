use super::text::normalize;

/// Fuses per-film metadata into one composite text field for vectorization.
///
/// The overview is normalized; the genre string is repeated three times so
/// genre terms carry more term-frequency mass than title or overview terms,
/// biasing downstream similarity toward genre match. The title is passed
/// through untouched (casing and punctuation preserved).
pub fn fuse(title: &str, overview: Option<&str>, genres: &[String]) -> String {
    let normalized_overview = normalize(overview);

    let joined = genres.join(" ");
    let weighted_genres = if joined.is_empty() {
        String::new()
    } else {
        format!("{joined} {joined} {joined}")
    };

    format!("{title} {normalized_overview} {weighted_genres}")
}
