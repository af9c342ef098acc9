//! Append-only record of clustering scores over a run.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Clustering score observed after a given step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    pub step: u32,
    pub score: f64,
}

/// Ordered `(step, score)` samples. Entries are never changed once appended.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct History {
    samples: Vec<Sample>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, step: u32, score: f64) {
        debug_assert!(self.samples.last().map_or(true, |s| s.step < step));
        self.samples.push(Sample { step, score });
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn steps(&self) -> Vec<u32> {
        self.samples.iter().map(|s| s.step).collect()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.score).collect()
    }

    /// Step-wise mean of histories sampled at the same steps.
    ///
    /// Returns `None` for an empty slice or when the sampled steps differ.
    pub fn mean(histories: &[History]) -> Option<History> {
        let first = histories.first()?;
        if histories.iter().any(|h| h.steps() != first.steps()) {
            return None;
        }
        let n = histories.len() as f64;
        let samples = first
            .samples
            .iter()
            .enumerate()
            .map(|(i, s)| Sample {
                step: s.step,
                score: histories.iter().map(|h| h.samples[i].score).sum::<f64>() / n,
            })
            .collect();
        Some(History { samples })
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
