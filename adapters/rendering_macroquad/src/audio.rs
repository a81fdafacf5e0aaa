//! Cue playback sinks.

use snake_system_cues::{AudioSink, Cue};
use tracing::info;

/// Sink that reports cues through the log instead of playing them.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LoggingSink;

impl AudioSink for LoggingSink {
    fn play(&mut self, cue: Cue) {
        info!(?cue, "cue");
    }
}

#[cfg(feature = "audio")]
pub(crate) use self::tones::ToneSink;

#[cfg(feature = "audio")]
mod tones {
    use std::collections::HashMap;

    use anyhow::{Context, Result};
    use macroquad::audio::{load_sound_from_bytes, play_sound, PlaySoundParams, Sound};
    use snake_system_cues::{AudioSink, Cue};

    use crate::tone::Tone;

    /// Sink playing synthesised tones through macroquad's mixer.
    pub(crate) struct ToneSink {
        sounds: HashMap<Cue, Sound>,
    }

    impl ToneSink {
        pub(crate) async fn load() -> Result<Self> {
            let mut sounds = HashMap::new();
            for cue in Cue::ALL {
                let wav = Tone::for_cue(cue).to_wav();
                let sound = load_sound_from_bytes(&wav)
                    .await
                    .map_err(|error| anyhow::anyhow!("{error:?}"))
                    .with_context(|| format!("failed to load tone for {cue:?}"))?;
                let _ = sounds.insert(cue, sound);
            }
            Ok(Self { sounds })
        }
    }

    impl AudioSink for ToneSink {
        fn play(&mut self, cue: Cue) {
            if let Some(sound) = self.sounds.get(&cue) {
                play_sound(
                    *sound,
                    PlaySoundParams {
                        looped: false,
                        volume: 1.0,
                    },
                );
            }
        }
    }
}
