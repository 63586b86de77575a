use crate::channels::{length_counter::LengthCounter, linear_counter::LinearCounter};

// https://wiki.nesdev.com/w/index.php/APU_Triangle
pub struct TriangleChannel {
    pub enabled: bool,
    pub timer: u16,
    pub timer_period: u16,
    pub sequence_step: u8,
    pub length_counter: LengthCounter,
    pub linear_counter: LinearCounter,
}

impl TriangleChannel {
    pub fn new() -> Self {
        Self {
            enabled: false,
            timer: 0,
            timer_period: 0,
            sequence_step: 0,
            length_counter: LengthCounter::new(),
            linear_counter: LinearCounter::new(),
        }
    }

    /// Clocked every CPU cycle
    pub fn tick(&mut self, counters_nonzero: bool) {
        if !self.enabled || !counters_nonzero {
            return;
        }

        if self.timer > 0 {
            self.timer -= 1;
        } else {
            self.timer = self.timer_period;
            self.sequence_step = (self.sequence_step + 1) % 32;
        }
    }

    pub fn tick_linear(&mut self) {
        self.linear_counter.tick(self.enabled);
    }

    pub fn counters_nonzero(&self) -> bool {
        self.length_counter.is_active() && self.linear_counter.is_active()
    }

    pub fn update_register(&mut self, register_offset: u16, data: u8) {
        match register_offset {
            0 => {
                self.length_counter.halt = (data >> 7) & 1 == 1; // These two share a bit
                self.linear_counter.control = (data >> 7) & 1 == 1;
                self.linear_counter.reload_value = data & 0b0111_1111;
            }
            2 => {
                self.timer_period = (self.timer_period & 0xFF00) | data as u16;
            }
            3 => {
                self.timer_period = (self.timer_period & 0x00FF) | ((data as u16 & 0b111) << 8);
                if self.enabled {
                    self.length_counter.load(data >> 3);
                }
                self.linear_counter.reload = true;
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
        // Ultrasonic periods would only click, so they're silenced
        if self.timer_period < 2 {
            0
        } else {
            TRIANGLE_TABLE[self.sequence_step as usize]
        }
    }
}

const TRIANGLE_TABLE: [u8; 32] = [
    15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, // Both 0 and 15 are repeated
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
];
