use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::distance::squared_distance;
use super::types::InitStrategy;

/// Select k initial centers from the distinct input colors.
///
/// Both strategies sample without replacement, so when k exceeds the number
/// of distinct colors the surplus centers are seeded with the global mean
/// color. Those degenerate clusters stay empty during iteration and never
/// leave a center undefined.
pub fn select_centers(
    pixels: &[[f32; 3]],
    distinct: &[[f32; 3]],
    k: usize,
    strategy: InitStrategy,
    seed: u64,
) -> Vec<[f32; 3]> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut centers = match strategy {
        InitStrategy::RandomSample => distinct.choose_multiple(&mut rng, k).copied().collect(),
        InitStrategy::PlusPlus => plus_plus(distinct, k, &mut rng),
    };

    if centers.len() < k {
        centers.resize(k, mean_color(pixels));
    }
    centers
}

/// k-means++ seeding: first center uniform, each next center sampled with
/// probability proportional to its squared distance to the nearest center
/// chosen so far.
fn plus_plus(distinct: &[[f32; 3]], k: usize, rng: &mut ChaCha8Rng) -> Vec<[f32; 3]> {
    let n = distinct.len();
    let k = k.min(n);

    let mut centers = Vec::with_capacity(k);
    let first = rng.gen_range(0..n);
    centers.push(distinct[first]);

    let mut min_distances: Vec<f32> = distinct
        .iter()
        .map(|&c| squared_distance(c, distinct[first]))
        .collect();
    let mut total: f32 = min_distances.iter().sum();

    while centers.len() < k {
        if total <= 0.0 {
            // Every distinct color is already a center
            break;
        }
        let next = sample_by_distance(rng, &min_distances, total);
        centers.push(distinct[next]);

        total = 0.0;
        for (min_d, &color) in min_distances.iter_mut().zip(distinct) {
            let d = squared_distance(color, distinct[next]);
            if d < *min_d {
                *min_d = d;
            }
            total += *min_d;
        }
    }

    centers
}

/// Walk the cumulative distance sum until it passes a random threshold.
/// Already-chosen colors have distance zero and can never be re-picked.
fn sample_by_distance(rng: &mut ChaCha8Rng, min_distances: &[f32], total: f32) -> usize {
    let threshold = rng.gen::<f32>() * total;
    let mut cumulative = 0.0;

    for (i, &d) in min_distances.iter().enumerate() {
        cumulative += d;
        if cumulative > threshold {
            return i;
        }
    }

    min_distances.len() - 1
}

/// Per-channel arithmetic mean over all input pixels.
pub fn mean_color(pixels: &[[f32; 3]]) -> [f32; 3] {
    let mut sums = [0f64; 3];
    for pixel in pixels {
        for ch in 0..3 {
            sums[ch] += pixel[ch] as f64;
        }
    }
    let n = pixels.len() as f64;
    [
        (sums[0] / n) as f32,
        (sums[1] / n) as f32,
        (sums[2] / n) as f32,
    ]
}
