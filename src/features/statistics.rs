use anyhow::{ensure, Result};
use ndarray::{Array1, Array2, Axis};

const DELTA_WINDOW: usize = 2;

/// Collapse a per-frame cepstral sequence into the fixed fingerprint:
/// per-coefficient temporal means of the coefficients, their deltas, and
/// their delta-deltas, concatenated in that order.
pub(crate) fn summarize(mfcc_frames: &[Vec<f64>]) -> Result<Vec<f64>> {
    let mfcc = array_from_frames(mfcc_frames)?;
    let deltas = regression_delta(&mfcc, DELTA_WINDOW);
    let delta_deltas = regression_delta(&deltas, DELTA_WINDOW);

    let mut vector = Vec::with_capacity(3 * mfcc.len_of(Axis(1)));
    vector.extend(column_means(&mfcc));
    vector.extend(column_means(&deltas));
    vector.extend(column_means(&delta_deltas));
    Ok(vector)
}

fn array_from_frames(frames: &[Vec<f64>]) -> Result<Array2<f64>> {
    ensure!(!frames.is_empty(), "cepstral sequence contains no frames");
    let rows = frames.len();
    let cols = frames[0].len();
    ensure!(cols > 0, "cepstral frames contain no coefficients");
    let mut flat = Vec::with_capacity(rows * cols);
    for frame in frames {
        ensure!(
            frame.len() == cols,
            "ragged cepstral frame: {} coefficients, expected {}",
            frame.len(),
            cols
        );
        flat.extend_from_slice(frame);
    }
    Ok(Array2::from_shape_vec((rows, cols), flat).expect("frame dimensions already checked"))
}

/// Regression delta over a symmetric window, edge frames clamped.
fn regression_delta(input: &Array2<f64>, window: usize) -> Array2<f64> {
    let frames = input.len_of(Axis(0));
    let coeffs = input.len_of(Axis(1));
    let mut output = Array2::zeros((frames, coeffs));
    let denominator = 2.0 * (1..=window).map(|n| (n * n) as f64).sum::<f64>();

    for t in 0..frames {
        let mut numerator = Array1::zeros(coeffs);
        for n in 1..=window {
            let prev = input.row(t.saturating_sub(n));
            let next = input.row((t + n).min(frames - 1));
            let diff = (&next - &prev).to_owned() * (n as f64);
            numerator += &diff;
        }
        output.row_mut(t).assign(&(&numerator / denominator));
    }
    output
}

fn column_means(input: &Array2<f64>) -> Vec<f64> {
    let frames = input.len_of(Axis(0)) as f64;
    input
        .sum_axis(Axis(0))
        .into_iter()
        .map(|total| total / frames)
        .collect()
}
