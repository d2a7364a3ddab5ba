use std::collections::{HashMap, HashSet};

use super::EngineError;

/// Term → stable dimension position over the corpus vocabulary.
///
/// Built once per catalog snapshot; the mapping never changes for the
/// lifetime of the built vector space.
#[derive(Debug, Default)]
pub struct VocabularyIndex {
    terms: HashMap<String, usize>,
}

impl VocabularyIndex {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Dimension position of a term, if it occurs anywhere in the corpus
    pub fn position(&self, term: &str) -> Option<usize> {
        self.terms.get(term).copied()
    }

    fn intern(&mut self, term: &str) -> usize {
        if let Some(&dim) = self.terms.get(term) {
            return dim;
        }
        let dim = self.terms.len();
        self.terms.insert(term.to_string(), dim);
        dim
    }
}

/// Sparse TF-IDF vector for one film, L2-normalized at build time.
///
/// Dimensionality always equals the vocabulary size; a film whose composite
/// text produced no tokens is the all-zero vector.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmVector {
    dims: usize,
    terms: Vec<(usize, f32)>,
}

impl FilmVector {
    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Non-zero (dimension, weight) entries, sorted by dimension
    pub fn terms(&self) -> &[(usize, f32)] {
        &self.terms
    }

    /// Sparse dot product over the shared dimension ordering
    pub fn dot(&self, other: &FilmVector) -> f32 {
        let (a, b) = (&self.terms, &other.terms);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Splits composite text into maximal alphanumeric runs, case preserved.
///
/// Overview and genre contributions arrive already lowercased from the
/// normalizer; title tokens keep their original case, so a capitalized title
/// term and its lowercase overview twin occupy different dimensions.
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
}

/// Builds the shared vocabulary and one TF-IDF vector per composite text.
///
/// Weights are term frequency × smoothed inverse document frequency,
/// `ln((1 + n) / (1 + df)) + 1`, with document frequency counted across the
/// whole corpus (the query film included, since it is itself a catalog
/// member).
/// Vectors are L2-normalized so cosine similarity reduces to a dot product.
///
/// Runs exactly once per catalog snapshot. An empty corpus cannot serve any
/// request and fails with `EmptyCorpus`.
pub fn build(texts: &[String]) -> Result<(VocabularyIndex, Vec<FilmVector>), EngineError> {
    if texts.is_empty() {
        return Err(EngineError::EmptyCorpus);
    }

    let tokenized: Vec<Vec<&str>> = texts
        .iter()
        .map(|text| tokenize(text).collect())
        .collect();

    let mut vocabulary = VocabularyIndex::default();
    let mut document_frequency: Vec<usize> = Vec::new();
    for tokens in &tokenized {
        let unique: HashSet<&str> = tokens.iter().copied().collect();
        for term in unique {
            let dim = vocabulary.intern(term);
            if dim == document_frequency.len() {
                document_frequency.push(0);
            }
            document_frequency[dim] += 1;
        }
    }

    let corpus_size = texts.len() as f32;
    let idf: Vec<f32> = document_frequency
        .iter()
        .map(|&df| ((1.0 + corpus_size) / (1.0 + df as f32)).ln() + 1.0)
        .collect();

    let dims = vocabulary.len();
    let vectors = tokenized
        .iter()
        .map(|tokens| {
            let mut frequencies: HashMap<usize, f32> = HashMap::new();
            for token in tokens {
                // Every corpus token was interned above
                if let Some(dim) = vocabulary.position(token) {
                    *frequencies.entry(dim).or_insert(0.0) += 1.0;
                }
            }

            let mut terms: Vec<(usize, f32)> = frequencies
                .into_iter()
                .map(|(dim, tf)| (dim, tf * idf[dim]))
                .collect();
            terms.sort_by_key(|&(dim, _)| dim);

            let norm = terms.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
            if norm > 0.0 {
                for term in &mut terms {
                    term.1 /= norm;
                }
            }

            FilmVector { dims, terms }
        })
        .collect();

    Ok((vocabulary, vectors))
}
