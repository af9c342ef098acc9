//! Deneubourg pick/drop response functions.

/// Probability that an empty-handed ant picks the item it stands on.
///
/// `(k1 / (k1 + s))²`: close to 1 for an isolated item, strictly decreasing in `s`.
pub fn pick_probability(k1: f64, similarity: f64) -> f64 {
    let ratio = k1 / (k1 + similarity);
    ratio * ratio
}

/// Probability that a carrying ant drops its item on the empty cell it stands on.
///
/// `(s / (k2 + s))²`: 0 with no matching neighbors, strictly increasing in `s`.
pub fn drop_probability(k2: f64, similarity: f64) -> f64 {
    let ratio = similarity / (k2 + similarity);
    ratio * ratio
}
