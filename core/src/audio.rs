/// Fire-and-forget sound cues. Nothing returned here can affect the game.
pub trait AudioSink {
    fn play_whack(&mut self);

    fn play_bomb(&mut self);

    /// Ambient music follows the running state of the session.
    fn set_music(&mut self, playing: bool);
}

/// Sink that drops every cue.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Muted;

impl AudioSink for Muted {
    fn play_whack(&mut self) {}

    fn play_bomb(&mut self) {}

    fn set_music(&mut self, _playing: bool) {}
}
