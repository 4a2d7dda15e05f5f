use std::io::{self, Write};

/// Game events that warrant a sound effect.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CueKind {
    RegularEat,
    BonusEat,
    GameOver,
}

/// Fire-and-forget sound collaborator. Nothing it does feeds back into the
/// simulation.
pub trait AudioCue {
    fn play_event(&mut self, kind: CueKind);
}

/// No-op cues, handy for tests.
impl AudioCue for () {
    fn play_event(&mut self, _kind: CueKind) {}
}

/// Rings the terminal bell on game events. The closest a TTY gets to the
/// original's oscillator effects.
#[derive(Debug)]
pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl AudioCue for TerminalBell {
    fn play_event(&mut self, kind: CueKind) {
        if !self.enabled {
            return;
        }

        let rings = match kind {
            CueKind::RegularEat => 1,
            CueKind::BonusEat | CueKind::GameOver => 2,
        };

        let mut stdout = io::stdout();
        for _ in 0..rings {
            let _ = stdout.write_all(b"\x07");
        }
        let _ = stdout.flush();
    }
}
