//! Sampling helpers shared by the agents

use rand::{Rng, SeedableRng, distr::StandardUniform, prelude::IndexedRandom, rngs::StdRng};

/// Deterministic RNG for `Some(seed)`, entropy-seeded otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(value) => StdRng::seed_from_u64(value),
        None => StdRng::seed_from_u64(rand::random::<u64>()),
    }
}

/// Performs weighted random sampling from a collection of items.
///
/// Items are visited in slice order, so callers that need reproducible draws
/// must pass them in a stable order.
///
/// # Returns
///
/// - `Some(item)` drawn with probability proportional to its weight
/// - `None` if the slice is empty or the total weight is not positive
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use menace_engine::utils::weighted_sample;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let items = vec![("a", 1u32), ("b", 0), ("c", 0)];
/// assert_eq!(weighted_sample(&mut rng, &items), Some("a"));
/// ```
pub fn weighted_sample<R, T, W>(rng: &mut R, items: &[(T, W)]) -> Option<T>
where
    R: Rng,
    T: Clone,
    W: Into<f64> + Copy,
{
    let total: f64 = items.iter().map(|(_, w)| (*w).into()).sum();
    if items.is_empty() || total <= 0.0 {
        return None;
    }

    let mut threshold = rng.sample::<f64, _>(StandardUniform) * total;
    for (item, weight) in items {
        let w = (*weight).into();
        if w > 0.0 && threshold < w {
            return Some(item.clone());
        }
        threshold -= w;
    }

    // Floating point slack: fall back to the last item that carries weight
    items
        .iter()
        .rev()
        .find(|(_, w)| (*w).into() > 0.0)
        .map(|(item, _)| item.clone())
}

/// Uniform choice from a slice.
pub fn choose_uniform<R: Rng, T: Clone>(rng: &mut R, items: &[T]) -> Option<T> {
    items.choose(rng).cloned()
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
