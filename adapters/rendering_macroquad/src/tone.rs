//! PCM tone synthesis for cue playback.

use snake_system_cues::Cue;

/// Sample rate of generated tones.
pub const SAMPLE_RATE: u32 = 44_100;

const HEADER_LEN: usize = 44;

/// Pitch, length and loudness of a cue's tone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    /// Frequency in hertz.
    pub frequency_hz: f32,
    /// Length in seconds.
    pub duration_seconds: f32,
    /// Loudness in the range 0.0..=1.0.
    pub volume: f32,
}

impl Tone {
    /// Tone played for the provided cue.
    #[must_use]
    pub const fn for_cue(cue: Cue) -> Self {
        let (frequency_hz, duration_seconds, volume) = match cue {
            Cue::Eat => (880.0, 0.08, 0.6),
            Cue::GameOver => (110.0, 0.4, 0.7),
            Cue::Pause => (440.0, 0.1, 0.5),
            Cue::Resume => (660.0, 0.1, 0.5),
            Cue::LevelUp => (1_320.0, 0.15, 0.5),
        };
        Self {
            frequency_hz,
            duration_seconds,
            volume,
        }
    }

    /// Encodes the tone as a mono 16-bit PCM WAV file.
    #[must_use]
    pub fn to_wav(&self) -> Vec<u8> {
        sine_wav(self.frequency_hz, self.duration_seconds, self.volume)
    }
}

/// Generates a mono 16-bit PCM WAV file holding a sine wave.
#[must_use]
pub fn sine_wav(frequency_hz: f32, duration_seconds: f32, volume: f32) -> Vec<u8> {
    let sample_count = (duration_seconds.max(0.0) * SAMPLE_RATE as f32) as u32;
    let block_align: u16 = 2;
    let byte_rate = SAMPLE_RATE * u32::from(block_align);
    let data_len = sample_count * u32::from(block_align);

    let mut wav = Vec::with_capacity(HEADER_LEN + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());

    let amplitude = volume.clamp(0.0, 1.0) * 0.7 * f32::from(i16::MAX);
    for n in 0..sample_count {
        let t = n as f32 / SAMPLE_RATE as f32;
        let sample = (amplitude * (std::f32::consts::TAU * frequency_hz * t).sin()) as i16;
        wav.extend_from_slice(&sample.to_le_bytes());
    }
    wav
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_describes_payload() {
        let wav = sine_wav(440.0, 0.01, 1.0);
        let samples = (0.01 * SAMPLE_RATE as f32) as usize;

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(wav.len(), HEADER_LEN + samples * 2);

        let data_len = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(data_len as usize, samples * 2);
    }

    #[test]
    fn silence_stays_at_zero() {
        let wav = sine_wav(440.0, 0.005, 0.0);
        assert!(wav[HEADER_LEN..].iter().all(|byte| *byte == 0));
    }

    #[test]
    fn every_cue_has_an_audible_tone() {
        for cue in Cue::ALL {
            let tone = Tone::for_cue(cue);
            assert!(tone.frequency_hz > 0.0);
            assert!(tone.to_wav().len() > HEADER_LEN, "{cue:?} is empty");
        }
    }
}
