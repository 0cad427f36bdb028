//! Pitch-class profile: fold the power spectrum into 12 chroma bins and
//! average over frames. The profile is diagnostic output only; it is not
//! concatenated into the classifier-facing fingerprint.

const CHROMA_BINS: usize = 12;

pub(crate) fn profile(power: &[Vec<f64>], freqs: &[f64]) -> Vec<f64> {
    let mut totals = vec![0.0_f64; CHROMA_BINS];
    if power.is_empty() {
        return totals;
    }
    for frame in power {
        let folded = fold_frame(frame, freqs);
        for (total, value) in totals.iter_mut().zip(folded.iter()) {
            *total += value;
        }
    }
    let frames = power.len() as f64;
    for total in &mut totals {
        *total /= frames;
    }
    totals
}

/// Fold one power frame into pitch classes (0 = C), normalized by the frame
/// peak so loud and quiet frames contribute comparably.
fn fold_frame(frame: &[f64], freqs: &[f64]) -> [f64; CHROMA_BINS] {
    let mut bins = [0.0_f64; CHROMA_BINS];
    for (value, &freq) in frame.iter().zip(freqs.iter()) {
        if freq <= 0.0 {
            continue;
        }
        let midi = 69.0 + 12.0 * (freq / 440.0).log2();
        let class = (midi.round() as i64).rem_euclid(CHROMA_BINS as i64) as usize;
        bins[class] += value;
    }
    let peak = bins.iter().cloned().fold(0.0_f64, f64::max);
    if peak > 0.0 {
        for bin in &mut bins {
            *bin /= peak;
        }
    }
    bins
}
