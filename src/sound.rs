use std::cell::{OnceCell, RefCell};
use std::time::Duration;

use rand::Rng;
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamBuilder, Sink};

/// Lifecycle events that get an audio cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// A generation request was just triggered
    Click,
    /// The archive arrived and was saved
    Success,
    /// The request settled without an archive
    Failure,
    /// The user touched a picker or typed into the theme prompt
    Interact,
    /// The mute flag was flipped
    ToggleMute,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub millis: u64,
    pub volume: f32,
}

const CLICK: Tone = Tone { freq: 880.0, millis: 120, volume: 0.4 };
const SUCCESS: Tone = Tone { freq: 1320.0, millis: 200, volume: 0.6 };
const FAILURE: Tone = Tone { freq: 220.0, millis: 250, volume: 0.5 };
const TOGGLE_MUTE: Tone = Tone { freq: 880.0, millis: 80, volume: 0.3 };

// varied pitches so repeated interactions don't sound robotic
const INTERACT_POOL: [Tone; 4] = [
    Tone { freq: 620.0, millis: 60, volume: 0.4 },
    Tone { freq: 700.0, millis: 60, volume: 0.4 },
    Tone { freq: 780.0, millis: 60, volume: 0.4 },
    Tone { freq: 860.0, millis: 60, volume: 0.4 },
];

/// Plays short feedback tones for session events. Audio is best effort:
/// without an output device the emitter stays silent instead of erroring.
/// The output stream is opened on the first audible cue, so muted emitters
/// never touch the device.
pub struct FeedbackEmitter {
    muted: bool,
    stream: OnceCell<Option<OutputStream>>,
    playing: RefCell<Option<Sink>>,
    #[cfg(test)]
    recorded: RefCell<Vec<Cue>>,
}

impl FeedbackEmitter {
    pub fn new(muted: bool) -> Self {
        FeedbackEmitter {
            muted,
            stream: OnceCell::new(),
            playing: RefCell::new(None),
            #[cfg(test)]
            recorded: RefCell::new(Vec::new()),
        }
    }

    /// Flips the mute flag, confirming with a cue when sound comes back on.
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.play(Cue::ToggleMute);
    }

    /// Plays the tone for `cue`, a no-op for every kind while muted.
    /// A new cue replaces whatever is still sounding, at most one cue
    /// plays at a time. Playback happens on the stream's own thread, the
    /// caller never waits for the tone to finish.
    pub fn play(&self, cue: Cue) {
        let Some(tone) = self.select(cue) else { return };

        #[cfg(test)]
        self.recorded.borrow_mut().push(cue);

        let stream = self.stream.get_or_init(|| {
            match OutputStreamBuilder::open_default_stream() {
                Ok(stream) => Some(stream),
                Err(err) => {
                    log::debug!("no audio output available: {err}");
                    None
                }
            }
        });
        let Some(stream) = stream else { return };

        let sink = Sink::connect_new(stream.mixer());
        sink.append(
            SineWave::new(tone.freq)
                .take_duration(Duration::from_millis(tone.millis))
                .amplify(tone.volume),
        );
        *self.playing.borrow_mut() = Some(sink);
    }

    fn select(&self, cue: Cue) -> Option<Tone> {
        if self.muted {
            return None;
        }

        Some(match cue {
            Cue::Click => CLICK,
            Cue::Success => SUCCESS,
            Cue::Failure => FAILURE,
            Cue::Interact => INTERACT_POOL[pick_pooled(INTERACT_POOL.len())],
            Cue::ToggleMute => TOGGLE_MUTE,
        })
    }

    #[cfg(test)]
    pub(crate) fn detached(muted: bool) -> Self {
        FeedbackEmitter {
            muted,
            stream: OnceCell::from(None),
            playing: RefCell::new(None),
            recorded: RefCell::new(Vec::new()),
        }
    }

    #[cfg(test)]
    pub(crate) fn recorded_cues(&self) -> Vec<Cue> {
        self.recorded.borrow().clone()
    }
}

impl Drop for FeedbackEmitter {
    // lets a cue that is still sounding finish before the stream goes away
    fn drop(&mut self) {
        if let Some(sink) = self.playing.get_mut().take() {
            sink.sleep_until_end();
        }
    }
}

// Uniform over [0, pool_len - 2]: the final pool entry is intentionally
// unreachable and stays a dead slot.
fn pick_pooled(pool_len: usize) -> usize {
    if pool_len < 2 {
        return 0;
    }
    rand::thread_rng().gen_range(0..pool_len - 1)
}
