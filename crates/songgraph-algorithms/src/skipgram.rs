//! Skip-gram with negative sampling (SGNS) over token sequences
//!
//! Walks are treated as sentences and node indices as words. Every center token predicts the
//! tokens inside a dynamic window around it; each positive pair is contrasted against
//! `negative_samples` tokens drawn from the unigram distribution raised to 3/4.
//!
//! Two matrices are learned: input vectors (returned) and output vectors (discarded).
//! Training is single-writer SGD on a seeded RNG, so equal inputs give equal vectors.

use ndarray::{Array1, Array2, ArrayView1};
use rand::distributions::{Distribution, WeightedIndex};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::collections::HashMap;

/// Skip-gram trainer configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkipGramConfig {
    /// Embedding dimension
    pub dimensions: usize,
    /// Maximum context distance on each side of the center token
    pub window_size: usize,
    /// Tokens seen fewer times than this are dropped from the vocabulary
    pub min_count: u64,
    /// Passes over the corpus
    pub iterations: usize,
    /// Negative samples per positive pair
    pub negative_samples: usize,
    /// Starting learning rate
    pub learning_rate: f32,
    /// Floor of the linear learning rate decay
    pub min_learning_rate: f32,
    /// RNG seed for initialization, window shrinking and negative draws
    pub seed: u64,
}

impl Default for SkipGramConfig {
    fn default() -> Self {
        Self {
            dimensions: 64,
            window_size: 10,
            min_count: 1,
            iterations: 5,
            negative_samples: 5,
            learning_rate: 0.025,
            min_learning_rate: 0.0001,
            seed: 42,
        }
    }
}

/// Token vocabulary, ordered by descending frequency (ties by token id)
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    tokens: Vec<usize>,
    counts: Vec<u64>,
    rows: HashMap<usize, usize>,
}

impl Vocabulary {
    /// Count tokens across the corpus and keep those seen at least `min_count` times
    pub fn build(corpus: &[Vec<usize>], min_count: u64) -> Self {
        let mut frequencies: HashMap<usize, u64> = HashMap::new();
        for sentence in corpus {
            for &token in sentence {
                *frequencies.entry(token).or_insert(0) += 1;
            }
        }

        let mut entries: Vec<(usize, u64)> = frequencies
            .into_iter()
            .filter(|&(_, count)| count >= min_count)
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut tokens = Vec::with_capacity(entries.len());
        let mut counts = Vec::with_capacity(entries.len());
        let mut rows = HashMap::with_capacity(entries.len());
        for (row, (token, count)) in entries.into_iter().enumerate() {
            tokens.push(token);
            counts.push(count);
            rows.insert(token, row);
        }

        Self { tokens, counts, rows }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Matrix row of a token, if it survived filtering
    pub fn row(&self, token: usize) -> Option<usize> {
        self.rows.get(&token).copied()
    }

    /// Token stored at a matrix row
    pub fn token(&self, row: usize) -> usize {
        self.tokens[row]
    }

    /// Corpus frequency of the token at a matrix row
    pub fn count(&self, row: usize) -> u64 {
        self.counts[row]
    }
}

/// Trained embeddings: one row per vocabulary token
#[derive(Debug, Clone)]
pub struct SkipGramModel {
    vocabulary: Vocabulary,
    vectors: Array2<f32>,
}

impl SkipGramModel {
    pub fn dimensions(&self) -> usize {
        self.vectors.ncols()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Learned vector of a token, `None` if it is outside the vocabulary
    pub fn vector(&self, token: usize) -> Option<ArrayView1<'_, f32>> {
        self.vocabulary.row(token).map(|row| self.vectors.row(row))
    }

    /// Consume the model into `(token, vector)` pairs in vocabulary order
    pub fn into_vectors(self) -> Vec<(usize, Vec<f32>)> {
        let SkipGramModel { vocabulary, vectors } = self;
        vectors
            .outer_iter()
            .enumerate()
            .map(|(row, v)| (vocabulary.token(row), v.to_vec()))
            .collect()
    }
}

/// Skip-gram trainer
pub struct SkipGramTrainer {
    config: SkipGramConfig,
}

impl SkipGramTrainer {
    pub fn new(config: SkipGramConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SkipGramConfig {
        &self.config
    }

    /// Fit vectors to the corpus. `on_iteration` receives each finished pass number (1-based).
    pub fn train_with_progress<F>(&self, corpus: &[Vec<usize>], mut on_iteration: F) -> SkipGramModel
    where
        F: FnMut(usize, f32),
    {
        let cfg = &self.config;
        let dim = cfg.dimensions;
        let vocabulary = Vocabulary::build(corpus, cfg.min_count);
        let vocab_size = vocabulary.len();

        if vocab_size == 0 || dim == 0 {
            return SkipGramModel {
                vocabulary,
                vectors: Array2::zeros((vocab_size, dim)),
            };
        }

        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let bound = 0.5 / dim as f32;
        let mut input = Array2::from_shape_fn((vocab_size, dim), |_| rng.gen_range(-bound..bound));
        let mut output: Array2<f32> = Array2::zeros((vocab_size, dim));

        // Unigram^0.75 negative sampling distribution
        let negatives = WeightedIndex::new(
            (0..vocab_size).map(|row| (vocabulary.count(row) as f64).powf(0.75)),
        )
        .ok();

        // Out-of-vocabulary tokens are dropped from the sentences
        let sentences: Vec<Vec<usize>> = corpus
            .iter()
            .map(|walk| walk.iter().filter_map(|&t| vocabulary.row(t)).collect())
            .collect();

        let words_per_pass: usize = sentences.iter().map(Vec::len).sum();
        let total_words = (words_per_pass * cfg.iterations).max(1);
        let mut processed = 0usize;
        let mut lr = cfg.learning_rate;
        let window = cfg.window_size.max(1);
        let mut gradient = Array1::<f32>::zeros(dim);

        for iteration in 0..cfg.iterations {
            let mut loss = 0.0f32;

            for sentence in &sentences {
                for (pos, &center) in sentence.iter().enumerate() {
                    let reach = rng.gen_range(1..=window);
                    let start = pos.saturating_sub(reach);
                    let end = (pos + reach + 1).min(sentence.len());

                    for (ctx_pos, &context) in sentence.iter().enumerate().take(end).skip(start) {
                        if ctx_pos == pos {
                            continue;
                        }

                        gradient.fill(0.0);
                        loss += train_pair(&input, &mut output, &mut gradient, center, context, 1.0, lr);

                        if let Some(ref dist) = negatives {
                            for _ in 0..cfg.negative_samples {
                                let negative = dist.sample(&mut rng);
                                if negative == context {
                                    continue;
                                }
                                loss += train_pair(&input, &mut output, &mut gradient, center, negative, 0.0, lr);
                            }
                        }

                        input.row_mut(center).scaled_add(1.0, &gradient);
                    }

                    processed += 1;
                    let progress = processed as f32 / total_words as f32;
                    lr = (cfg.learning_rate - (cfg.learning_rate - cfg.min_learning_rate) * progress)
                        .max(cfg.min_learning_rate);
                }
            }

            on_iteration(iteration + 1, loss);
        }

        SkipGramModel {
            vocabulary,
            vectors: input,
        }
    }

    /// Fit vectors to the corpus
    pub fn train(&self, corpus: &[Vec<usize>]) -> SkipGramModel {
        self.train_with_progress(corpus, |_, _| {})
    }
}

/// One logistic update of (center, target). Accumulates the center gradient into `gradient`,
/// applies the target update in place and returns the pair loss.
fn train_pair(
    input: &Array2<f32>,
    output: &mut Array2<f32>,
    gradient: &mut Array1<f32>,
    center: usize,
    target: usize,
    label: f32,
    lr: f32,
) -> f32 {
    let center_vec = input.row(center);
    let score = center_vec.dot(&output.row(target)).clamp(-20.0, 20.0);
    let prediction = 1.0 / (1.0 + (-score).exp());
    let g = (label - prediction) * lr;

    gradient.scaled_add(g, &output.row(target));
    output.row_mut(target).scaled_add(g, &center_vec);

    let p = if label > 0.5 { prediction } else { 1.0 - prediction };
    -(p.max(1e-7)).ln()
}
