use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Pick an index with probability proportional to its weight.
///
/// Zero (and negative) weights are never picked. Returns `None` when no
/// weight is positive.
pub fn weighted_index(rng: &mut ChaCha8Rng, weights: &[f64]) -> Option<usize> {
    let total: f64 = weights.iter().filter(|&&w| w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }

    let mut r = rng.gen::<f64>() * total;
    let mut last = None;
    for (i, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        if r < weight {
            return Some(i);
        }
        r -= weight;
        last = Some(i);
    }

    // Rounding can leave r just above the final weight
    last
}
