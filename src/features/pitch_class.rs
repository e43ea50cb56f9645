//! Pitch-class arithmetic shared by chroma, chord, key and pitch modules
//!
//! Pitch classes are indexed 0 = C, 1 = C#, ..., 11 = B. Frequencies map to
//! pitch classes relative to A4 = 440 Hz (MIDI note 69).

/// Note names indexed by pitch class
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Reference tuning frequency for A4
pub const A4_FREQUENCY: f32 = 440.0;

/// MIDI note number of A4
pub const A4_MIDI: i32 = 69;

/// Note name for a pitch class (wraps modulo 12)
pub fn note_name(pitch_class: u32) -> &'static str {
    NOTE_NAMES[pitch_class as usize % 12]
}

/// Pitch class for a note name such as "C", "F#" or "Bb"
///
/// Accepts sharps and flats; returns `None` for anything else.
pub fn parse_note_name(name: &str) -> Option<u32> {
    let mut chars = name.chars();
    let letter = chars.next()?;
    let natural: i32 = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let offset = match chars.as_str() {
        "" => 0,
        "#" => 1,
        "b" => -1,
        _ => return None,
    };
    Some((natural + offset).rem_euclid(12) as u32)
}

/// Fractional semitone distance from A4
///
/// Returns `None` for non-positive or non-finite frequencies.
pub fn semitones_from_a4(frequency: f32) -> Option<f32> {
    if !(frequency.is_finite() && frequency > 0.0) {
        return None;
    }
    Some(12.0 * (frequency / A4_FREQUENCY).log2())
}

/// Map a frequency to its pitch class
///
/// `round(12 * log2(f / 440)) + 57`, reduced modulo 12. The constant 57 shifts
/// the A-relative semitone count so that index 0 lands on C.
pub fn frequency_to_pitch_class(frequency: f32) -> Option<u32> {
    let semitones = semitones_from_a4(frequency)?.round() as i32;
    Some((semitones + 57).rem_euclid(12) as u32)
}

/// Nearest MIDI note number for a frequency
pub fn frequency_to_midi(frequency: f32) -> Option<i32> {
    Some(semitones_from_a4(frequency)?.round() as i32 + A4_MIDI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_pitches() {
        assert_eq!(frequency_to_pitch_class(440.0), Some(9)); // A4
        assert_eq!(frequency_to_pitch_class(261.63), Some(0)); // C4
        assert_eq!(frequency_to_pitch_class(329.63), Some(4)); // E4
        assert_eq!(frequency_to_pitch_class(392.0), Some(7)); // G4
        assert_eq!(frequency_to_pitch_class(110.0), Some(9)); // A2
        assert_eq!(frequency_to_pitch_class(1975.53), Some(11)); // B6
    }

    #[test]
    fn test_rounds_to_nearest_semitone() {
        // 20 cents sharp of C4 is still C
        let c4_sharp = 261.63 * 2f32.powf(0.2 / 12.0);
        assert_eq!(frequency_to_pitch_class(c4_sharp), Some(0));
        // 70 cents sharp rounds up to C#
        let nearly_c_sharp = 261.63 * 2f32.powf(0.7 / 12.0);
        assert_eq!(frequency_to_pitch_class(nearly_c_sharp), Some(1));
    }

    #[test]
    fn test_invalid_frequencies() {
        assert_eq!(frequency_to_pitch_class(0.0), None);
        assert_eq!(frequency_to_pitch_class(-10.0), None);
        assert_eq!(frequency_to_pitch_class(f32::NAN), None);
        assert_eq!(frequency_to_midi(f32::INFINITY), None);
    }

    #[test]
    fn test_midi_numbers() {
        assert_eq!(frequency_to_midi(440.0), Some(69));
        assert_eq!(frequency_to_midi(261.63), Some(60));
    }

    #[test]
    fn test_note_names() {
        assert_eq!(note_name(0), "C");
        assert_eq!(note_name(13), "C#");
        assert_eq!(parse_note_name("F#"), Some(6));
        assert_eq!(parse_note_name("Bb"), Some(10));
        assert_eq!(parse_note_name("Cb"), Some(11));
        assert_eq!(parse_note_name("H"), None);
        assert_eq!(parse_note_name(""), None);
    }
}
