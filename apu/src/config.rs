use crate::channels::{dmc_channel, noise_channel};
use crate::frame_sequencer::{FrameTiming, NTSC_FRAME_TIMING, PAL_FRAME_TIMING};
use crate::mixer::MixerKind;

/// Console timing variant. Selects the noise and DMC tables, the frame
/// sequencer schedule and the CPU clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Ntsc,
    Pal,
}

impl Default for Region {
    fn default() -> Self {
        Region::Ntsc
    }
}

impl Region {
    /// CPU cycles per second, i.e. how often the host calls `APU::clock`
    pub fn cpu_clock_rate(self) -> u32 {
        match self {
            Region::Ntsc => 1_789_773,
            Region::Pal => 1_662_607,
        }
    }

    pub(crate) fn noise_periods(self) -> &'static [u16; 16] {
        match self {
            Region::Ntsc => &noise_channel::NTSC_PERIOD_TABLE,
            Region::Pal => &noise_channel::PAL_PERIOD_TABLE,
        }
    }

    pub(crate) fn dmc_rates(self) -> &'static [u16; 16] {
        match self {
            Region::Ntsc => &dmc_channel::NTSC_RATE_TABLE,
            Region::Pal => &dmc_channel::PAL_RATE_TABLE,
        }
    }

    pub(crate) fn frame_timing(self) -> &'static FrameTiming {
        match self {
            Region::Ntsc => &NTSC_FRAME_TIMING,
            Region::Pal => &PAL_FRAME_TIMING,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApuConfig {
    pub region: Region,
    pub mixer: MixerKind,
}
