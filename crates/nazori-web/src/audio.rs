//! Synthesized sound cues (WebAudio) and Japanese speech (Web Speech API).
//!
//! Both are best-effort: if the browser has no audio or speech support the
//! calls fail quietly and the game carries on.

use nazori::Cue;
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioContextState, OscillatorType, SpeechSynthesisUtterance};

const CUE_GAIN: f32 = 0.1;

pub const SPEECH_LANG: &str = "ja-JP";
pub const SPEECH_PITCH: f32 = 1.3;
pub const SPEECH_RATE: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Triangle,
}

impl Wave {
    fn oscillator_type(self) -> OscillatorType {
        match self {
            Self::Sine => OscillatorType::Sine,
            Self::Triangle => OscillatorType::Triangle,
        }
    }
}

/// One oscillator of a cue. Times are seconds from the cue's start.
#[derive(Debug, Clone, PartialEq)]
pub struct Tone {
    pub wave: Wave,
    pub start_s: f64,
    pub duration_s: f64,
    /// (offset from `start_s`, frequency in Hz).
    pub pitches: Vec<(f64, f32)>,
    /// Glide exponentially between pitches instead of stepping.
    pub glide: bool,
}

/// The oscillators making up a cue.
pub fn cue_tones(cue: Cue) -> Vec<Tone> {
    match cue {
        Cue::Pop => vec![Tone {
            wave: Wave::Sine,
            start_s: 0.0,
            duration_s: 0.15,
            pitches: vec![(0.0, 800.0), (0.1, 1200.0)],
            glide: true,
        }],
        Cue::Start => vec![Tone {
            wave: Wave::Triangle,
            start_s: 0.0,
            duration_s: 0.4,
            pitches: vec![(0.0, 523.0), (0.1, 659.0), (0.2, 784.0)],
            glide: false,
        }],
        Cue::Fanfare => [523.0, 659.0, 784.0, 1047.0]
            .iter()
            .enumerate()
            .map(|(i, freq)| Tone {
                wave: Wave::Sine,
                start_s: i as f64 * 0.15,
                duration_s: 0.3,
                pitches: vec![(0.0, *freq)],
                glide: false,
            })
            .collect(),
    }
}

/// Lazily created audio context plus the speech channel.
#[derive(Default)]
pub struct AudioChannel {
    context: Option<AudioContext>,
}

impl AudioChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&mut self) -> Result<&AudioContext, JsValue> {
        if self.context.is_none() {
            self.context = Some(AudioContext::new()?);
        }
        let ctx = self
            .context
            .as_ref()
            .ok_or_else(|| JsValue::from_str("audio context unavailable"))?;
        // Browsers start contexts suspended until a user gesture.
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume()?;
        }
        Ok(ctx)
    }

    pub fn play(&mut self, cue: Cue) -> Result<(), JsValue> {
        let ctx = self.context()?;
        let now = ctx.current_time();
        for tone in cue_tones(cue) {
            let t0 = now + tone.start_s;
            let t1 = t0 + tone.duration_s;

            let osc = ctx.create_oscillator()?;
            osc.set_type(tone.wave.oscillator_type());
            let freq = osc.frequency();
            for (i, (offset, hz)) in tone.pitches.iter().enumerate() {
                if i > 0 && tone.glide {
                    freq.exponential_ramp_to_value_at_time(*hz, t0 + offset)?;
                } else {
                    freq.set_value_at_time(*hz, t0 + offset)?;
                }
            }

            let gain = ctx.create_gain()?;
            gain.gain().set_value_at_time(CUE_GAIN, t0)?;
            gain.gain().linear_ramp_to_value_at_time(0.0, t1)?;

            osc.connect_with_audio_node(&gain)?;
            gain.connect_with_audio_node(&ctx.destination())?;
            osc.start_with_when(t0)?;
            osc.stop_with_when(t1)?;
        }
        Ok(())
    }

    /// Speak `text` in Japanese, cutting off anything still being spoken.
    pub fn speak(&mut self, text: &str) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let synth = window.speech_synthesis()?;
        synth.cancel();
        let utterance = SpeechSynthesisUtterance::new_with_text(text)?;
        utterance.set_lang(SPEECH_LANG);
        utterance.set_pitch(SPEECH_PITCH);
        utterance.set_rate(SPEECH_RATE);
        synth.speak(&utterance);
        Ok(())
    }
}
