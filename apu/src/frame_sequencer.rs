// https://wiki.nesdev.com/w/index.php/APU_Frame_Counter
// All step positions are in CPU cycles, which keeps the half-cycle steps exact.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerMode {
    FourStep,
    FiveStep,
}

/// Step schedule for one region
#[derive(Debug, PartialEq, Eq)]
pub struct FrameTiming {
    /// Quarter-frame steps shared by both modes; the second is also a half frame
    pub steps: [u32; 3],
    pub four_step_last: u32,
    pub four_step_len: u32,
    pub five_step_last: u32,
    pub five_step_len: u32,
}

pub const NTSC_FRAME_TIMING: FrameTiming = FrameTiming {
    steps: [7457, 14913, 22371],
    four_step_last: 29829,
    four_step_len: 29830,
    five_step_last: 37281,
    five_step_len: 37282,
};

pub const PAL_FRAME_TIMING: FrameTiming = FrameTiming {
    steps: [8313, 16627, 24939],
    four_step_last: 33253,
    four_step_len: 33254,
    five_step_last: 41565,
    five_step_len: 41566,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameEvents {
    pub quarter: bool,
    pub half: bool,
    pub interrupt: bool,
}

impl FrameEvents {
    fn quarter() -> Self {
        Self {
            quarter: true,
            ..Self::default()
        }
    }

    fn half() -> Self {
        Self {
            quarter: true,
            half: true,
            ..Self::default()
        }
    }
}

pub struct FrameSequencer {
    mode: SequencerMode,
    interrupt_inhibit: bool,
    cycle: u32,
    pending_reset: Option<u8>,
    timing: &'static FrameTiming,
}

impl FrameSequencer {
    pub fn new(timing: &'static FrameTiming) -> Self {
        Self {
            mode: SequencerMode::FourStep,
            interrupt_inhibit: false,
            cycle: 0,
            pending_reset: None,
            timing,
        }
    }

    pub fn reset(&mut self) {
        self.mode = SequencerMode::FourStep;
        self.interrupt_inhibit = false;
        self.cycle = 0;
        self.pending_reset = None;
    }

    pub fn mode(&self) -> SequencerMode {
        self.mode
    }

    /// A $4017 write. The sequence restarts 3 CPU cycles later when the
    /// write lands on an APU cycle, 4 otherwise.
    pub fn update_control(
        &mut self,
        mode: SequencerMode,
        interrupt_inhibit: bool,
        on_apu_cycle: bool,
    ) {
        if mode != self.mode {
            debug!("frame sequencer switching to {:?}", mode);
        }
        self.mode = mode;
        self.interrupt_inhibit = interrupt_inhibit;
        self.pending_reset = Some(if on_apu_cycle { 3 } else { 4 });
    }

    /// Advances one CPU cycle
    pub fn tick(&mut self) -> FrameEvents {
        if let Some(delay) = self.pending_reset {
            if delay <= 1 {
                self.pending_reset = None;
                self.cycle = 0;
                // "If the mode flag is set, then both "quarter frame" and
                // "half frame" signals are also generated."
                return match self.mode {
                    SequencerMode::FourStep => FrameEvents::default(),
                    SequencerMode::FiveStep => FrameEvents::half(),
                };
            }
            self.pending_reset = Some(delay - 1);
        }

        self.cycle += 1;
        let timing = self.timing;
        let cycle = self.cycle;

        let mut events = if cycle == timing.steps[0] || cycle == timing.steps[2] {
            FrameEvents::quarter()
        } else if cycle == timing.steps[1] {
            FrameEvents::half()
        } else {
            FrameEvents::default()
        };

        match self.mode {
            SequencerMode::FourStep => {
                if cycle == timing.four_step_last {
                    events = FrameEvents::half();
                }
                let irq_window = timing.four_step_last - 1..=timing.four_step_len;
                events.interrupt = !self.interrupt_inhibit && irq_window.contains(&cycle);
                if cycle == timing.four_step_len {
                    self.cycle = 0;
                }
            }
            SequencerMode::FiveStep => {
                if cycle == timing.five_step_last {
                    events = FrameEvents::half();
                }
                if cycle == timing.five_step_len {
                    self.cycle = 0;
                }
            }
        }

        events
    }
}
