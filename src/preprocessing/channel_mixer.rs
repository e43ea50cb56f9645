//! Channel mixing utilities (multichannel to mono conversion)

use crate::error::AnalysisError;

/// Average interleaved multichannel audio down to mono
///
/// # Arguments
///
/// * `interleaved` - Samples as `[ch0, ch1, .., chN, ch0, ..]`
/// * `channels` - Number of interleaved channels
///
/// # Returns
///
/// One sample per frame, the mean of its channels. A trailing partial frame
/// is dropped.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `channels` is zero.
pub fn mix_to_mono(interleaved: &[f32], channels: usize) -> Result<Vec<f32>, AnalysisError> {
    if channels == 0 {
        return Err(AnalysisError::InvalidInput(
            "Channel count must be at least 1".to_string(),
        ));
    }
    if channels == 1 {
        return Ok(interleaved.to_vec());
    }

    if interleaved.len() % channels != 0 {
        log::warn!(
            "Dropping {} samples of trailing partial frame",
            interleaved.len() % channels
        );
    }

    log::debug!("Mixing {} channels to mono", channels);
    let scale = 1.0 / channels as f32;
    Ok(interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() * scale)
        .collect())
}

/// Convert separate left/right channels to mono
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the channel lengths differ.
pub fn stereo_to_mono(left: &[f32], right: &[f32]) -> Result<Vec<f32>, AnalysisError> {
    if left.len() != right.len() {
        return Err(AnalysisError::InvalidInput(format!(
            "Channel length mismatch: left {} vs right {}",
            left.len(),
            right.len()
        )));
    }
    Ok(left
        .iter()
        .zip(right)
        .map(|(l, r)| (l + r) * 0.5)
        .collect())
}
