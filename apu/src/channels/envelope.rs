// https://wiki.nesdev.com/w/index.php/APU_Envelope
pub struct Envelope {
    pub constant_volume: bool,
    pub loop_flag: bool,
    pub start: bool,
    pub period: u8, // Either the constant volume or envelope period
    divider: u8,
    decay_counter: u8,
}

impl Envelope {
    pub fn new() -> Self {
        Self {
            constant_volume: false,
            loop_flag: false,
            start: false,
            period: 0,
            divider: 0,
            decay_counter: 0,
        }
    }

    /// Decodes the `--LC VVVV` half of a channel's first register
    pub fn update_control(&mut self, data: u8) {
        self.loop_flag = (data >> 5) & 1 == 1;
        self.constant_volume = (data >> 4) & 1 == 1;
        self.period = data & 0b1111;
    }

    pub fn tick(&mut self) {
        if self.start {
            self.start = false;
            self.decay_counter = 15;
            self.divider = self.period;
            return;
        }

        if self.divider > 0 {
            self.divider -= 1;
        }

        if self.divider == 0 {
            self.divider = self.period;
            if self.decay_counter > 0 {
                self.decay_counter -= 1;
            } else if self.loop_flag {
                self.decay_counter = 15;
            }
        }
    }

    pub fn get_volume(&self) -> u8 {
        if self.constant_volume {
            self.period
        } else {
            self.decay_counter
        }
    }

    #[cfg(test)]
    pub fn decay(&self) -> u8 {
        self.decay_counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_flag_restarts_decay() {
        let mut envelope = Envelope::new();
        envelope.update_control(0b0000_0011);
        envelope.start = true;
        envelope.tick();

        assert!(!envelope.start);
        assert_eq!(envelope.decay(), 15);
    }

    #[test]
    fn decay_is_non_increasing_without_loop() {
        let mut envelope = Envelope::new();
        envelope.update_control(0b0000_0010);
        envelope.start = true;

        let mut last = 15;
        for _ in 0..100 {
            envelope.tick();
            assert!(envelope.decay() <= last);
            last = envelope.decay();
        }
        assert_eq!(envelope.decay(), 0);
    }

    #[test]
    fn divider_period_sets_decay_rate() {
        let mut envelope = Envelope::new();
        envelope.update_control(0b0000_0011);
        envelope.start = true;
        envelope.tick();

        for _ in 0..3 {
            envelope.tick();
        }
        assert_eq!(envelope.decay(), 14);
        for _ in 0..3 {
            envelope.tick();
        }
        assert_eq!(envelope.decay(), 13);
    }

    #[test]
    fn loop_wraps_decay_back_to_fifteen() {
        let mut envelope = Envelope::new();
        envelope.update_control(0b0010_0000);
        envelope.start = true;
        envelope.tick();

        let mut seen = Vec::new();
        for _ in 0..32 {
            envelope.tick();
            seen.push(envelope.decay());
        }

        let expected: Vec<u8> = (0..15).rev().chain(std::iter::once(15)).collect();
        assert_eq!(&seen[..16], &expected[..]);
        assert_eq!(&seen[16..], &expected[..]);
    }

    #[test]
    fn constant_volume_ignores_decay() {
        let mut envelope = Envelope::new();
        envelope.update_control(0b0001_1001);
        envelope.start = true;

        for _ in 0..40 {
            envelope.tick();
            assert_eq!(envelope.get_volume(), 9);
        }
    }
}
