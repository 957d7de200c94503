//! Drop feedback tones
//!
//! Each landing plays a short sine "thunk" whose pitch falls as the object
//! gets heavier. The pitch mapping is plain data; the Web Audio player only
//! exists on wasm32.

use crate::consts::{MAX_MASS, MIN_MASS};

/// Pitch of the lightest object (Hz)
pub const LIGHT_FREQ_HZ: f32 = 880.0;
/// Pitch of the heaviest object (Hz)
pub const HEAVY_FREQ_HZ: f32 = 340.0;

/// A single decaying tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    /// Peak gain before volume scaling
    pub gain: f32,
    pub duration_secs: f32,
}

impl Tone {
    /// Tone for an object of `mass` kg
    pub fn for_mass(mass: u32) -> Self {
        let mass = mass.clamp(MIN_MASS, MAX_MASS);
        let t = (mass - MIN_MASS) as f32 / (MAX_MASS - MIN_MASS) as f32;
        Self {
            frequency_hz: LIGHT_FREQ_HZ + (HEAVY_FREQ_HZ - LIGHT_FREQ_HZ) * t,
            gain: 0.3 + 0.3 * t,
            duration_secs: 0.12 + 0.13 * t,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, OscillatorType};

    use super::Tone;
    use crate::error::{Result, SeesawError};

    /// Web Audio player for drop tones
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(volume: f32) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        pub fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }

        /// Play the tone for `mass`, swallowing any failure
        pub fn play_drop(&self, mass: u32) {
            if let Err(e) = self.try_play(Tone::for_mass(mass)) {
                log::debug!("{}", e);
            }
        }

        fn try_play(&self, tone: Tone) -> Result<()> {
            if self.volume <= 0.0 {
                return Ok(());
            }
            let ctx = self
                .ctx
                .as_ref()
                .ok_or_else(|| SeesawError::FeedbackUnavailable("no AudioContext".into()))?;

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let unavailable = |e: wasm_bindgen::JsValue| {
                SeesawError::FeedbackUnavailable(format!("{:?}", e))
            };
            let osc = ctx.create_oscillator().map_err(unavailable)?;
            let gain = ctx.create_gain().map_err(unavailable)?;
            osc.set_type(OscillatorType::Sine);
            osc.connect_with_audio_node(&gain).map_err(unavailable)?;
            gain.connect_with_audio_node(&ctx.destination())
                .map_err(unavailable)?;

            let t = ctx.current_time();
            let end = t + tone.duration_secs as f64;
            gain.gain()
                .set_value_at_time(tone.gain * self.volume, t)
                .map_err(unavailable)?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, end)
                .map_err(unavailable)?;
            osc.frequency()
                .set_value_at_time(tone.frequency_hz, t)
                .map_err(unavailable)?;
            osc.frequency()
                .exponential_ramp_to_value_at_time(tone.frequency_hz * 0.5, end)
                .map_err(unavailable)?;

            osc.start().map_err(unavailable)?;
            osc.stop_with_when(end + 0.05).map_err(unavailable)?;
            Ok(())
        }
    }
}
