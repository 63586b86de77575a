// https://wiki.nesdev.com/w/index.php/APU_Mixer

/// Raw level of each channel, already gated by its length counter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelOutputs {
    pub pulse1: u8,
    pub pulse2: u8,
    pub triangle: u8,
    pub noise: u8,
    pub dmc: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MixerKind {
    /// Evaluates the nonlinear DAC formulas
    Formula,
    /// The precomputed tables with the linear tnd approximation
    LookupTable,
}

impl Default for MixerKind {
    fn default() -> Self {
        MixerKind::Formula
    }
}

impl MixerKind {
    pub fn mix(self, outputs: &ChannelOutputs) -> f32 {
        match self {
            MixerKind::Formula => pulse_out(outputs) + tnd_out(outputs),
            MixerKind::LookupTable => {
                let pulse = PULSE_TABLE[outputs.pulse1 as usize + outputs.pulse2 as usize];
                let tnd = TND_TABLE[3 * outputs.triangle as usize
                    + 2 * outputs.noise as usize
                    + outputs.dmc as usize];
                pulse + tnd
            }
        }
    }
}

fn pulse_out(outputs: &ChannelOutputs) -> f32 {
    let pulse = outputs.pulse1 as f32 + outputs.pulse2 as f32;
    if pulse == 0.0 {
        return 0.0;
    }
    95.88 / (8128.0 / pulse + 100.0)
}

fn tnd_out(outputs: &ChannelOutputs) -> f32 {
    let sum = outputs.triangle as f32 / 8227.0
        + outputs.noise as f32 / 12241.0
        + outputs.dmc as f32 / 22638.0;
    if sum == 0.0 {
        return 0.0;
    }
    159.79 / (1.0 / sum + 100.0)
}

// https://wiki.nesdev.com/w/index.php/APU_Mixer#Lookup_Table
lazy_static! {
    pub static ref PULSE_TABLE: [f32; 31] = {
        let mut table = [0.0; 31];
        for (i, entry) in table.iter_mut().enumerate().skip(1) {
            *entry = 95.52 / ((8128.0 / i as f32) + 100.0);
        }
        table
    };
    pub static ref TND_TABLE: [f32; 203] = {
        let mut table = [0.0; 203];
        for (i, entry) in table.iter_mut().enumerate().skip(1) {
            *entry = 163.67 / ((24329.0 / i as f32) + 100.0);
        }
        table
    };
}
