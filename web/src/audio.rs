use wasm_bindgen::JsValue;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};
use whackamole_core::AudioSink;

#[derive(Copy, Clone, Debug, PartialEq)]
struct Tone {
    wave: OscillatorType,
    from_hz: f32,
    to_hz: f32,
    seconds: f64,
    volume: f32,
}

const WHACK: Tone = Tone {
    wave: OscillatorType::Square,
    from_hz: 880.0,
    to_hz: 220.0,
    seconds: 0.12,
    volume: 0.2,
};

const BOMB: Tone = Tone {
    wave: OscillatorType::Sawtooth,
    from_hz: 180.0,
    to_hz: 40.0,
    seconds: 0.45,
    volume: 0.35,
};

const MUSIC_HZ: f32 = 110.0;
const MUSIC_VOLUME: f32 = 0.04;
const MUSIC_SWELL_HZ: f32 = 0.25;

#[derive(Debug)]
enum Output {
    Unopened,
    Open(AudioContext),
    Muted,
}

#[derive(Debug)]
struct Music {
    voice: OscillatorNode,
    swell: OscillatorNode,
}

/// Procedurally synthesized cues on the Web Audio API.
///
/// The context is opened on the first cue, which follows a click. If the browser refuses, every later cue is
/// silently dropped.
#[derive(Debug)]
pub(crate) struct WebAudio {
    output: Output,
    music: Option<Music>,
}

impl WebAudio {
    pub(crate) fn new(muted: bool) -> Self {
        Self {
            output: if muted { Output::Muted } else { Output::Unopened },
            music: None,
        }
    }

    fn context(&mut self) -> Option<&AudioContext> {
        if let Output::Unopened = self.output {
            self.output = match AudioContext::new() {
                Ok(context) => {
                    log::debug!("audio context opened");
                    Output::Open(context)
                }
                Err(err) => {
                    log::warn!("audio unavailable, muting: {:?}", err);
                    Output::Muted
                }
            };
        }

        match &self.output {
            Output::Open(context) => {
                // contexts created before a user gesture start suspended
                if let Err(err) = context.resume() {
                    log::warn!("failed to resume audio: {:?}", err);
                }
                Some(context)
            }
            Output::Unopened | Output::Muted => None,
        }
    }

    fn play(&mut self, tone: Tone) {
        let Some(context) = self.context() else {
            return;
        };
        if let Err(err) = play_tone(context, tone) {
            log::warn!("failed to play tone: {:?}", err);
        }
    }

    fn start_music(&mut self) {
        if self.music.is_some() {
            return;
        }
        let Some(context) = self.context() else {
            return;
        };
        match start_drone(context) {
            Ok(music) => self.music = Some(music),
            Err(err) => log::warn!("failed to start music: {:?}", err),
        }
    }

    fn stop_music(&mut self) {
        let Some(Music { voice, swell }) = self.music.take() else {
            return;
        };
        for node in [voice, swell] {
            if let Err(err) = node.stop() {
                log::warn!("failed to stop music: {:?}", err);
            }
        }
    }
}

impl AudioSink for WebAudio {
    fn play_whack(&mut self) {
        self.play(WHACK);
    }

    fn play_bomb(&mut self) {
        self.play(BOMB);
    }

    fn set_music(&mut self, playing: bool) {
        if playing {
            self.start_music();
        } else {
            self.stop_music();
        }
    }
}

impl Drop for WebAudio {
    fn drop(&mut self) {
        self.stop_music();
    }
}

fn play_tone(context: &AudioContext, tone: Tone) -> Result<(), JsValue> {
    let now = context.current_time();
    let end = now + tone.seconds;

    let oscillator = context.create_oscillator()?;
    oscillator.set_type(tone.wave);
    oscillator.frequency().set_value_at_time(tone.from_hz, now)?;
    oscillator
        .frequency()
        .exponential_ramp_to_value_at_time(tone.to_hz, end)?;

    let gain = context.create_gain()?;
    gain.gain().set_value_at_time(tone.volume, now)?;
    gain.gain().exponential_ramp_to_value_at_time(0.001, end)?;

    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&context.destination())?;
    oscillator.start()?;
    oscillator.stop_with_when(end)?;
    Ok(())
}

fn start_drone(context: &AudioContext) -> Result<Music, JsValue> {
    let voice = context.create_oscillator()?;
    voice.set_type(OscillatorType::Triangle);
    voice.frequency().set_value(MUSIC_HZ);

    let level: GainNode = context.create_gain()?;
    level.gain().set_value(MUSIC_VOLUME);

    // slow tremolo on the level
    let swell = context.create_oscillator()?;
    swell.frequency().set_value(MUSIC_SWELL_HZ);
    let depth = context.create_gain()?;
    depth.gain().set_value(MUSIC_VOLUME / 2.0);
    swell.connect_with_audio_node(&depth)?;
    depth.connect_with_audio_param(&level.gain())?;

    voice.connect_with_audio_node(&level)?;
    level.connect_with_audio_node(&context.destination())?;
    voice.start()?;
    swell.start()?;

    Ok(Music { voice, swell })
}
