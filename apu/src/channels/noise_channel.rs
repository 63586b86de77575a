use crate::channels::{envelope::Envelope, length_counter::LengthCounter};

// https://wiki.nesdev.com/w/index.php/APU_Noise
pub struct NoiseChannel {
    pub enabled: bool,
    pub timer: u16,
    pub timer_period: u16,
    pub length_counter: LengthCounter,
    pub envelope: Envelope,

    pub shift: u16,
    pub shift_mode: bool,
    periods: &'static [u16; 16],
}

impl NoiseChannel {
    pub fn new(periods: &'static [u16; 16]) -> Self {
        Self {
            enabled: false,
            timer: 0,
            timer_period: half_rate_period(periods[0]),
            length_counter: LengthCounter::new(),
            envelope: Envelope::new(),

            shift: 1,
            shift_mode: false,
            periods,
        }
    }

    /// Clocked every other CPU cycle
    pub fn tick(&mut self) {
        if !self.enabled {
            return;
        }

        if self.timer > 0 {
            self.timer -= 1;
        } else {
            self.timer = self.timer_period;
            self.clock_shift_register();
        }
    }

    fn clock_shift_register(&mut self) {
        // 1. Feedback is calculated as the exclusive-OR of bit 0 and one other
        //    bit: bit 6 if Mode flag is set, otherwise bit 1.
        // 2. The shift register is shifted right by one bit.
        // 3. Bit 14, the leftmost bit, is set to the feedback calculated earlier.
        let feedback_xor_bit_index = if self.shift_mode { 6 } else { 1 };
        let feedback_xor_bit = (self.shift >> feedback_xor_bit_index) & 1;
        let feedback = (self.shift & 1) ^ feedback_xor_bit;
        self.shift = (self.shift >> 1) | (feedback << 14);
    }

    pub fn update_register(&mut self, register_offset: u16, data: u8) {
        match register_offset {
            0 => {
                self.length_counter.halt = (data >> 5) & 1 == 1; // These two share a bit
                self.envelope.update_control(data);
            }
            2 => {
                self.timer_period = half_rate_period(self.periods[data as usize & 0b1111]);
                self.shift_mode = (data >> 7) & 1 == 1;
            }
            3 => {
                if self.enabled {
                    self.length_counter.load(data >> 3);
                }
                self.envelope.start = true;
            }
            _ => {}
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.length_counter.clear();
        }
    }

    pub fn output(&self) -> u8 {
        if self.shift & 1 == 1 {
            0
        } else {
            self.envelope.get_volume()
        }
    }
}

/// Periods are listed in CPU cycles but the timer runs at half that rate,
/// and a reload-to-zero countdown spans `reload + 1` clocks.
fn half_rate_period(cpu_cycles: u16) -> u16 {
    cpu_cycles / 2 - 1
}

pub const NTSC_PERIOD_TABLE: [u16; 16] = [
    0x004, 0x008, 0x010, 0x020, 0x040, 0x060, 0x080, 0x0A0, 0x0CA, 0x0FE, 0x17C, 0x1FC, 0x2FA,
    0x3F8, 0x7F2, 0xFE4,
];

pub const PAL_PERIOD_TABLE: [u16; 16] = [
    4, 8, 14, 30, 60, 88, 118, 148, 188, 236, 354, 472, 708, 944, 1890, 3778,
];
