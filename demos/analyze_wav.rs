//! Example: Analyze a WAV file
//!
//! Loads a WAV file, mixes it to mono and prints the chord timeline as JSON.
//!
//! ```text
//! cargo run --example analyze_wav -- path/to/song.wav [--parallel]
//! ```

use chordsync::preprocessing::mix_to_mono;
use chordsync::{analyze_waveform_with_config, AnalysisConfig};

/// Load a WAV file and return (interleaved samples, channels, sample_rate)
fn load_wav(path: &str) -> Result<(Vec<f32>, usize, u32), Box<dyn std::error::Error>> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / max_value))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    Ok((samples, spec.channels as usize, spec.sample_rate))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or("usage: analyze_wav <file.wav> [--parallel]")?;

    let mut config = AnalysisConfig::default();
    config.segmenter.parallel = args.any(|arg| arg == "--parallel");

    let (interleaved, channels, sample_rate) = load_wav(&path)?;
    let samples = mix_to_mono(&interleaved, channels)?;

    let result = analyze_waveform_with_config(&samples, sample_rate, &config)?;

    eprintln!(
        "{}: {} / {} BPM / {} chords in {:.2} ms",
        path,
        result.key,
        result.tempo,
        result.chords.len(),
        result.metadata.processing_time_ms
    );
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
