use crate::channels::{
    envelope::Envelope,
    length_counter::LengthCounter,
    sweep::{PulseId, Sweep},
};

// https://wiki.nesdev.com/w/index.php/APU_Pulse
pub struct PulseChannel {
    pub enabled: bool,
    pub timer: u16,
    pub timer_period: u16,
    pub sequence_step: u8,
    pub duty_cycle_select: u8,
    pub length_counter: LengthCounter,
    pub envelope: Envelope,
    pub sweep: Sweep,
}

impl PulseChannel {
    pub fn new(id: PulseId) -> Self {
        let mut channel = Self {
            enabled: false,
            timer: 0,
            timer_period: 0,
            sequence_step: 0,
            duty_cycle_select: 0,
            length_counter: LengthCounter::new(),
            envelope: Envelope::new(),
            sweep: Sweep::new(id),
        };
        channel.sweep.calculate_target_period(channel.timer_period);
        channel
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
            self.sequence_step = (self.sequence_step + 1) % 8;
        }
    }

    pub fn tick_sweep(&mut self) {
        self.sweep.tick(&mut self.timer_period);
        self.sweep.calculate_target_period(self.timer_period);
    }

    pub fn update_register(&mut self, register_offset: u16, data: u8) {
        match register_offset {
            0 => {
                self.duty_cycle_select = data >> 6;
                // Shared with the envelope loop flag
                self.length_counter.halt = (data >> 5) & 1 == 1;
                self.envelope.update_control(data);
            }
            1 => {
                self.sweep.update_control(data);
            }
            2 => {
                self.timer_period = (self.timer_period & 0xFF00) | data as u16;
            }
            3 => {
                self.timer_period = (self.timer_period & 0x00FF) | ((data as u16 & 0b111) << 8);
                if self.enabled {
                    self.length_counter.load(data >> 3);
                }
                self.sequence_step = 0;
                self.envelope.start = true;
            }
            _ => {}
        }
        self.sweep.calculate_target_period(self.timer_period);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.length_counter.clear();
        }
    }

    /// Waveform level times volume. Length counter gating is left to the mixer.
    pub fn output(&self) -> u8 {
        if self.timer_period < 8 || (!self.sweep.negate && self.sweep.target_period() > 0x7FF) {
            return 0;
        }

        DUTY_TABLE[self.duty_cycle_select as usize][self.sequence_step as usize]
            * self.envelope.get_volume()
    }
}

const DUTY_TABLE: [[u8; 8]; 4] = [
    [0, 1, 0, 0, 0, 0, 0, 0], // 12.5%
    [0, 1, 1, 0, 0, 0, 0, 0], // 25%
    [0, 1, 1, 1, 1, 0, 0, 0], // 50%
    [1, 0, 0, 1, 1, 1, 1, 1], // 25% negated
];

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_volume_channel(volume: u8, timer_period: u16) -> PulseChannel {
        let mut pulse = PulseChannel::new(PulseId::Pulse1);
        pulse.set_enabled(true);
        pulse.update_register(0, 0b1011_0000 | volume);
        pulse.update_register(2, timer_period as u8);
        pulse.update_register(3, (timer_period >> 8) as u8);
        pulse
    }

    #[test]
    fn low_period_is_always_silent() {
        for period in 0..8 {
            for volume in 0..16 {
                let mut pulse = constant_volume_channel(volume, period);
                for _ in 0..64 {
                    pulse.tick();
                    assert_eq!(pulse.output(), 0);
                }
            }
        }
    }

    #[test]
    fn sweep_overflow_mutes_without_negate() {
        // Shift 0 doubles the period past 11 bits
        let mut pulse = constant_volume_channel(15, 0x400);
        pulse.update_register(1, 0b0000_0000);
        for _ in 0..64 {
            pulse.tick();
            assert_eq!(pulse.output(), 0);
        }
    }

    #[test]
    fn steps_through_duty_cycle() {
        let mut pulse = constant_volume_channel(10, 8);
        let mut levels = Vec::new();
        for _ in 0..8 {
            pulse.tick();
            levels.push(pulse.output());
            for _ in 0..8 {
                pulse.tick();
            }
        }
        assert_eq!(levels, vec![10, 10, 10, 10, 0, 0, 0, 0]);
    }

    #[test]
    fn disabled_channel_holds_its_step() {
        let mut pulse = constant_volume_channel(10, 8);
        pulse.set_enabled(false);
        for _ in 0..100 {
            pulse.tick();
        }
        assert_eq!(pulse.sequence_step, 0);
        assert_eq!(pulse.length_counter.counter, 0);
    }

    #[test]
    fn timer_high_write_restarts_sequence_and_envelope() {
        let mut pulse = constant_volume_channel(10, 8);
        pulse.tick();
        assert_eq!(pulse.sequence_step, 1);

        pulse.envelope.start = false;
        pulse.update_register(3, 0);
        assert_eq!(pulse.sequence_step, 0);
        assert!(pulse.envelope.start);
    }
}
