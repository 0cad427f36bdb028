use anyhow::{ensure, Result};
use aus::analysis;
use aus::analysis::mel::MelFilterbank;
use aus::spectrum;
use aus::WindowType;

use crate::audio::resample;
use crate::types::AudioData;

/// Fixed analysis rate; inputs at any other rate are resampled first.
pub const ANALYSIS_SAMPLE_RATE: u32 = 22_050;
pub(crate) const MFCC_COUNT: usize = 13;
const FFT_SIZE: usize = 2048;
const HOP_SIZE: usize = 512;
const MEL_BANDS: usize = 128;
const MIN_FREQ: f64 = 20.0;

pub(crate) struct CepstrumBundle {
    /// Per-frame cepstral coefficients, one row of `MFCC_COUNT` per frame.
    pub mfcc: Vec<Vec<f64>>,
    /// Per-frame power spectrum, kept for the chroma profile.
    pub power: Vec<Vec<f64>>,
    /// Center frequency of each power-spectrum bin.
    pub freqs: Vec<f64>,
}

pub(crate) fn compute_cepstrum(audio: &AudioData) -> Result<CepstrumBundle> {
    ensure!(!audio.samples.is_empty(), "signal contains no samples");
    let mono = ensure_sample_rate(audio)?;
    let audio_f64: Vec<f64> = mono.iter().map(|&s| s as f64).collect();

    let stft = spectrum::rstft(&audio_f64, FFT_SIZE, HOP_SIZE, WindowType::Hanning);
    let (magnitude, _) = spectrum::complex_to_polar_rstft(&stft);
    let power = analysis::make_power_spectrogram(&magnitude);
    ensure!(!power.is_empty(), "analysis produced no frames");

    let freqs = spectrum::rfftfreq(FFT_SIZE, ANALYSIS_SAMPLE_RATE);
    let filterbank = MelFilterbank::new(
        MIN_FREQ,
        (ANALYSIS_SAMPLE_RATE as f64) / 2.0,
        MEL_BANDS,
        &freqs,
        true,
    );
    let mel = analysis::mel::make_mel_spectrogram(&power, &filterbank);
    let mfcc = analysis::mel::mfcc_spectrogram(&mel, MFCC_COUNT, None);

    Ok(CepstrumBundle { mfcc, power, freqs })
}

fn ensure_sample_rate(audio: &AudioData) -> Result<Vec<f32>> {
    if audio.sample_rate == ANALYSIS_SAMPLE_RATE {
        Ok(audio.samples.clone())
    } else {
        resample::linear_resample(&audio.samples, audio.sample_rate, ANALYSIS_SAMPLE_RATE)
    }
}
