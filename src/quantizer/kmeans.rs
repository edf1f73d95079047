use std::collections::HashSet;

use super::distance::squared_distance;
use super::error::QuantizeError;
use super::init;
use super::types::{Color, QuantizationResult, QuantizeOptions};

/// Cluster the input colors into exactly k representative colors using
/// Lloyd's algorithm.
///
/// All arithmetic runs in floating point; the palette is rounded and clamped
/// back to 8-bit channels only at output time. Hitting the iteration cap is
/// normal termination, reported through `converged: false`.
pub fn quantize(
    colors: &[Color],
    k: usize,
    options: &QuantizeOptions,
) -> Result<QuantizationResult, QuantizeError> {
    if colors.is_empty() {
        return Err(QuantizeError::EmptyInput);
    }
    if k < 1 {
        return Err(QuantizeError::InvalidColorCount(k));
    }

    let pixels: Vec<[f32; 3]> = colors.iter().map(|&c| to_f32(c)).collect();
    let distinct = distinct_colors(colors);

    let mut centers = init::select_centers(&pixels, &distinct, k, options.init, options.seed);
    let mut assignments = vec![0u32; pixels.len()];

    let mut iterations = 0;
    let mut converged = false;
    let mut first_pass = true;

    while iterations < options.max_iterations {
        iterations += 1;

        let changed = assign_pixels(&pixels, &centers, &mut assignments);
        let shift = update_centers(&pixels, &assignments, k, &mut centers);

        // The changed flag is meaningless on the first pass: the assignment
        // vector starts out all-zero, not as a previous iteration's result.
        if (!changed && !first_pass) || shift < options.tolerance {
            converged = true;
            break;
        }
        first_pass = false;
    }

    let palette = centers
        .iter()
        .map(|&c| [round_channel(c[0]), round_channel(c[1]), round_channel(c[2])])
        .collect();

    Ok(QuantizationResult {
        palette,
        assignments,
        iterations,
        converged,
    })
}

/// Assign every pixel to its nearest center. Ties break to the lowest
/// cluster id via the strict comparison. Returns whether any assignment
/// changed.
fn assign_pixels(pixels: &[[f32; 3]], centers: &[[f32; 3]], assignments: &mut [u32]) -> bool {
    let mut changed = false;

    for (pixel, slot) in pixels.iter().zip(assignments.iter_mut()) {
        let mut best = 0u32;
        let mut best_distance = squared_distance(*pixel, centers[0]);

        for (id, center) in centers.iter().enumerate().skip(1) {
            let d = squared_distance(*pixel, *center);
            if d < best_distance {
                best_distance = d;
                best = id as u32;
            }
        }

        if *slot != best {
            *slot = best;
            changed = true;
        }
    }

    changed
}

/// Recompute each center as the per-channel mean of its members. A cluster
/// with no members keeps its previous center. Returns the summed squared
/// center movement.
fn update_centers(
    pixels: &[[f32; 3]],
    assignments: &[u32],
    k: usize,
    centers: &mut [[f32; 3]],
) -> f32 {
    let mut sums = vec![[0f64; 3]; k];
    let mut counts = vec![0u32; k];

    for (pixel, &assigned) in pixels.iter().zip(assignments.iter()) {
        let assigned = assigned as usize;
        counts[assigned] += 1;
        for ch in 0..3 {
            sums[assigned][ch] += pixel[ch] as f64;
        }
    }

    let mut shift = 0f32;

    for (id, center) in centers.iter_mut().enumerate() {
        if counts[id] == 0 {
            continue;
        }

        let n = counts[id] as f64;
        let new = [
            (sums[id][0] / n) as f32,
            (sums[id][1] / n) as f32,
            (sums[id][2] / n) as f32,
        ];

        for ch in 0..3 {
            let delta = center[ch] - new[ch];
            shift += delta * delta;
        }
        *center = new;
    }

    shift
}

/// Distinct input colors in first-seen order, converted to f32.
fn distinct_colors(colors: &[Color]) -> Vec<[f32; 3]> {
    let mut seen = HashSet::new();
    let mut distinct = Vec::new();
    for &color in colors {
        if seen.insert(color) {
            distinct.push(to_f32(color));
        }
    }
    distinct
}

fn to_f32(c: Color) -> [f32; 3] {
    [c[0] as f32, c[1] as f32, c[2] as f32]
}

fn round_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
