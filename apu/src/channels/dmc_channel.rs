use crate::irq::IrqLines;

use std::rc::Rc;

/// Fetches one sample byte from the CPU address space
pub type SampleReader = Box<dyn FnMut(u16) -> u8>;

// https://wiki.nesdev.com/w/index.php/APU_DMC
pub struct DMCChannel {
    pub enabled: bool,
    pub irq_enabled: bool,
    pub loop_flag: bool,
    pub timer: u16,
    pub timer_period: u16,

    pub sample_address: u16,
    pub sample_length: u16,
    pub current_address: u16,
    pub bytes_remaining: u16,
    pub sample_buffer: Option<u8>,

    pub shift_register: u8,
    pub remaining_bits: u8,
    pub silence: bool,
    pub output_level: u8,

    pub stall_cpu: bool,

    rates: &'static [u16; 16],
    reader: SampleReader,
    irq_lines: Rc<IrqLines>,
}

impl DMCChannel {
    pub fn new(rates: &'static [u16; 16], reader: SampleReader, irq_lines: Rc<IrqLines>) -> Self {
        Self {
            enabled: false,
            irq_enabled: false,
            loop_flag: false,
            timer: 0,
            timer_period: half_rate_period(rates[0]),

            sample_address: 0xC000,
            sample_length: 1,
            current_address: 0xC000,
            bytes_remaining: 0,
            sample_buffer: None,

            shift_register: 0,
            remaining_bits: 8,
            silence: true,
            output_level: 0,

            stall_cpu: false,

            rates,
            reader,
            irq_lines,
        }
    }

    /// Restores power-up state, keeping the bus and interrupt connections
    pub fn reset(&mut self) {
        self.enabled = false;
        self.irq_enabled = false;
        self.loop_flag = false;
        self.timer = 0;
        self.timer_period = half_rate_period(self.rates[0]);
        self.sample_address = 0xC000;
        self.sample_length = 1;
        self.current_address = 0xC000;
        self.bytes_remaining = 0;
        self.sample_buffer = None;
        self.shift_register = 0;
        self.remaining_bits = 8;
        self.silence = true;
        self.output_level = 0;
        self.stall_cpu = false;
    }

    /// Clocked every other CPU cycle
    pub fn tick(&mut self) {
        if self.timer > 0 {
            self.timer -= 1;
            return;
        }
        self.timer = self.timer_period;

        if self.remaining_bits == 0 {
            self.start_output_cycle();
            return;
        }

        if !self.silence {
            if self.shift_register & 1 == 1 {
                if self.output_level <= 125 {
                    self.output_level += 2;
                }
            } else if self.output_level >= 2 {
                self.output_level -= 2;
            }
        }
        self.shift_register >>= 1;
        self.remaining_bits -= 1;
    }

    fn start_output_cycle(&mut self) {
        self.remaining_bits = 8;
        match self.sample_buffer.take() {
            Some(sample) => {
                self.silence = false;
                self.shift_register = sample;
            }
            None => self.silence = true,
        }

        if self.sample_buffer.is_none() && self.bytes_remaining > 0 {
            self.fetch_sample();
        }
    }

    fn fetch_sample(&mut self) {
        let sample = (self.reader)(self.current_address);
        trace!("DMC fetched {:#04X} from {:#06X}", sample, self.current_address);
        self.sample_buffer = Some(sample);
        self.stall_cpu = true;

        self.current_address = if self.current_address == 0xFFFF {
            0x8000
        } else {
            self.current_address + 1
        };
        self.bytes_remaining -= 1;

        if self.bytes_remaining == 0 {
            if self.loop_flag {
                self.restart();
            } else if self.irq_enabled {
                debug!("DMC sample finished, asserting IRQ");
                self.irq_lines.set_dmc(true);
            }
        }
    }

    fn restart(&mut self) {
        self.current_address = self.sample_address;
        self.bytes_remaining = self.sample_length;
    }

    pub fn update_register(&mut self, register_offset: u16, data: u8) {
        match register_offset {
            0 => {
                self.irq_enabled = (data >> 7) & 1 == 1;
                self.loop_flag = (data >> 6) & 1 == 1;
                self.timer_period = half_rate_period(self.rates[data as usize & 0b1111]);
                if !self.irq_enabled {
                    self.irq_lines.set_dmc(false);
                }
            }
            1 => {
                self.output_level = data & 0b0111_1111;
            }
            2 => {
                self.sample_address = 0xC000 | ((data as u16) << 6);
            }
            3 => {
                self.sample_length = ((data as u16) << 4) | 1;
            }
            _ => {}
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.bytes_remaining = 0;
            return;
        }

        if self.bytes_remaining == 0 {
            debug!(
                "DMC sample restart at {:#06X}, {} bytes",
                self.sample_address, self.sample_length
            );
            self.restart();
            if self.sample_buffer.is_none() {
                self.fetch_sample();
            }
        }
    }

    pub fn output(&self) -> u8 {
        self.output_level
    }
}

/// Rates are listed in CPU cycles but the timer runs at half that rate
fn half_rate_period(cpu_cycles: u16) -> u16 {
    cpu_cycles / 2 - 1
}

pub const NTSC_RATE_TABLE: [u16; 16] = [
    428, 380, 340, 320, 286, 254, 226, 214, 190, 160, 142, 128, 106, 84, 72, 54,
];

pub const PAL_RATE_TABLE: [u16; 16] = [
    398, 354, 316, 298, 276, 236, 210, 198, 176, 148, 132, 118, 98, 78, 66, 50,
];
