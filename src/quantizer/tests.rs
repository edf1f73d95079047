use super::*;

fn options(init: InitStrategy, seed: u64) -> QuantizeOptions {
    QuantizeOptions {
        init,
        seed,
        ..QuantizeOptions::default()
    }
}

/// Four well-separated color blobs with slight per-pixel jitter.
fn four_blob_image() -> Vec<Color> {
    let bases: [Color; 4] = [
        [10, 10, 10],
        [240, 20, 20],
        [20, 240, 20],
        [20, 20, 240],
    ];
    let mut colors = Vec::new();
    for base in bases {
        for jitter in 0..8u8 {
            colors.push([
                base[0] + jitter,
                base[1] + jitter,
                base[2] + jitter,
            ]);
        }
    }
    colors
}

fn reconstruction_mse(colors: &[Color], result: &QuantizationResult) -> f64 {
    let mut sum = 0f64;
    for (pixel, &assigned) in colors.iter().zip(&result.assignments) {
        let center = result.palette[assigned as usize];
        for ch in 0..3 {
            let d = pixel[ch] as f64 - center[ch] as f64;
            sum += d * d;
        }
    }
    sum / (colors.len() as f64 * 3.0)
}

#[test]
fn test_returns_k_centers_and_full_assignments() {
    let colors = four_blob_image();

    for init in [InitStrategy::RandomSample, InitStrategy::PlusPlus] {
        let result = quantize(&colors, 5, &options(init, 7)).unwrap();

        assert_eq!(result.palette.len(), 5);
        assert_eq!(result.assignments.len(), colors.len());
        assert!(result.assignments.iter().all(|&a| a < 5));
    }
}

#[test]
fn test_empty_input_rejected() {
    let result = quantize(&[], 4, &QuantizeOptions::default());

    assert!(matches!(result, Err(QuantizeError::EmptyInput)));
}

#[test]
fn test_zero_color_count_rejected() {
    let colors = vec![[1, 2, 3]];
    let result = quantize(&colors, 0, &QuantizeOptions::default());

    assert!(matches!(result, Err(QuantizeError::InvalidColorCount(0))));
}

#[test]
fn test_k_one_yields_global_mean() {
    let colors: Vec<Color> = vec![
        [10, 10, 10],
        [20, 20, 20],
        [30, 30, 30],
        [40, 40, 40],
    ];

    let result = quantize(&colors, 1, &QuantizeOptions::default()).unwrap();

    assert_eq!(result.palette, vec![[25, 25, 25]]);
    assert!(result.assignments.iter().all(|&a| a == 0));
    assert!(result.converged);
}

#[test]
fn test_two_tone_image_converges_in_one_iteration() {
    // 2x2 image: two black pixels, two white pixels
    let colors: Vec<Color> = vec![
        [0, 0, 0],
        [0, 0, 0],
        [255, 255, 255],
        [255, 255, 255],
    ];

    for seed in [0, 1, 42, 1234] {
        let result = quantize(&colors, 2, &options(InitStrategy::PlusPlus, seed)).unwrap();

        assert!(result.converged);
        assert_eq!(result.iterations, 1);

        let mut palette = result.palette.clone();
        palette.sort();
        assert_eq!(palette, vec![[0, 0, 0], [255, 255, 255]]);

        // Grouping matches the original regardless of center order
        assert_eq!(result.assignments[0], result.assignments[1]);
        assert_eq!(result.assignments[2], result.assignments[3]);
        assert_ne!(result.assignments[0], result.assignments[2]);
    }
}

#[test]
fn test_deterministic_for_fixed_seed() {
    let colors = four_blob_image();

    for init in [InitStrategy::RandomSample, InitStrategy::PlusPlus] {
        let opts = options(init, 99);
        let a = quantize(&colors, 3, &opts).unwrap();
        let b = quantize(&colors, 3, &opts).unwrap();

        assert_eq!(a.palette, b.palette);
        assert_eq!(a.assignments, b.assignments);
        assert_eq!(a.iterations, b.iterations);
    }
}

#[test]
fn test_mse_non_increasing_in_k() {
    let colors = four_blob_image();
    let opts = options(InitStrategy::PlusPlus, 42);

    let mut previous = f64::INFINITY;
    for k in [1, 2, 4] {
        let result = quantize(&colors, k, &opts).unwrap();
        let mse = reconstruction_mse(&colors, &result);

        assert!(
            mse <= previous,
            "mse increased from {previous} to {mse} at k={k}",
        );
        previous = mse;
    }
}

#[test]
fn test_k_at_distinct_count_has_zero_error() {
    let colors = four_blob_image();
    // Jitter makes every pixel color distinct: 32 distinct colors
    let result = quantize(&colors, 32, &options(InitStrategy::PlusPlus, 5)).unwrap();

    assert_eq!(reconstruction_mse(&colors, &result), 0.0);
    assert_eq!(result.colors_used(), 32);
}

#[test]
fn test_k_beyond_distinct_count_leaves_empty_clusters() {
    // Only two distinct colors, so two of the four clusters stay empty
    let colors: Vec<Color> = vec![[0, 0, 0], [0, 0, 0], [255, 255, 255]];

    let result = quantize(&colors, 4, &options(InitStrategy::PlusPlus, 11)).unwrap();

    assert_eq!(result.palette.len(), 4);
    assert_eq!(result.colors_used(), 2);
    assert_eq!(reconstruction_mse(&colors, &result), 0.0);
    assert!(result.converged);
}

#[test]
fn test_surplus_centers_seeded_with_global_mean() {
    // Two distinct colors, k=3: the surplus center gets the global mean
    // (here (85, 85, 85) over two black pixels and one white) and keeps it,
    // since no pixel ever prefers it over an exact match.
    let colors: Vec<Color> = vec![[0, 0, 0], [0, 0, 0], [255, 255, 255]];

    let result = quantize(&colors, 3, &options(InitStrategy::RandomSample, 3)).unwrap();

    let mut palette = result.palette.clone();
    palette.sort();
    assert_eq!(palette, vec![[0, 0, 0], [85, 85, 85], [255, 255, 255]]);
    assert_eq!(result.colors_used(), 2);
}

#[test]
fn test_reconstructed_image_is_a_fixed_point() {
    let colors = four_blob_image();
    let first = quantize(&colors, 4, &options(InitStrategy::PlusPlus, 42)).unwrap();

    let reduced: Vec<Color> = first
        .assignments
        .iter()
        .map(|&a| first.palette[a as usize])
        .collect();
    let distinct = {
        let unique: std::collections::HashSet<Color> = reduced.iter().copied().collect();
        unique.len()
    };

    let second = quantize(&reduced, distinct, &options(InitStrategy::PlusPlus, 42)).unwrap();
    let again: Vec<Color> = second
        .assignments
        .iter()
        .map(|&a| second.palette[a as usize])
        .collect();

    assert_eq!(reduced, again);
}
