/// Which of the two pulse channels a sweep unit belongs to.
/// The negate adder differs between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PulseId {
    Pulse1,
    Pulse2,
}

// https://wiki.nesdev.com/w/index.php/APU_Sweep
pub struct Sweep {
    channel: PulseId,
    pub enabled: bool,
    pub period: u8,
    pub negate: bool,
    pub shift: u8,
    pub reload: bool,
    divider: u8,
    target_period: u16,
    muted: bool,
}

impl Sweep {
    pub fn new(channel: PulseId) -> Self {
        Self {
            channel,
            enabled: false,
            period: 0,
            negate: false,
            shift: 0,
            reload: false,
            divider: 0,
            target_period: 0,
            muted: false,
        }
    }

    /// Decodes `EPPP NSSS`
    pub fn update_control(&mut self, data: u8) {
        self.enabled = (data >> 7) & 1 == 1;
        self.period = (data >> 4) & 0b111;
        self.negate = (data >> 3) & 1 == 1;
        self.shift = data & 0b111;
        self.reload = true;
    }

    /// Recomputes the target period and muting from the channel's current
    /// timer period. Must run whenever either of them changes.
    pub fn calculate_target_period(&mut self, timer_period: u16) {
        let mut change = (timer_period >> self.shift) as i32;
        if self.negate {
            // "Pulse 1 adds the ones' complement (−c − 1)
            // Pulse 2 adds the two's complement (−c)"
            change = match self.channel {
                PulseId::Pulse1 => -change - 1,
                PulseId::Pulse2 => -change,
            };
        }

        self.target_period = (timer_period as i32 + change).max(0) as u16;
        self.muted = timer_period < 8 || (!self.negate && self.target_period > 0x7FF);
    }

    /// Clocked on every half frame; may retune `timer_period`
    pub fn tick(&mut self, timer_period: &mut u16) {
        if self.divider == 0 && self.enabled && !self.muted {
            *timer_period = self.target_period;
        }

        if self.divider == 0 || self.reload {
            self.divider = self.period;
            self.reload = false;
        } else {
            self.divider -= 1;
        }
    }

    pub fn target_period(&self) -> u16 {
        self.target_period
    }

    #[cfg(test)]
    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(channel: PulseId, data: u8, timer_period: u16) -> Sweep {
        let mut sweep = Sweep::new(channel);
        sweep.update_control(data);
        sweep.calculate_target_period(timer_period);
        sweep
    }

    #[test]
    fn negate_is_one_lower_on_pulse1() {
        for &(shift, period) in &[(1u8, 0x100u16), (2, 0x008), (3, 0x2AB), (7, 0x7FF)] {
            let data = 0b1000_1000 | shift;
            let pulse1 = configured(PulseId::Pulse1, data, period);
            let pulse2 = configured(PulseId::Pulse2, data, period);
            assert_eq!(pulse1.target_period() + 1, pulse2.target_period());
        }
    }

    #[test]
    fn adds_shifted_period_when_not_negating() {
        let sweep = configured(PulseId::Pulse1, 0b1000_0010, 0x100);
        assert_eq!(sweep.target_period(), 0x140);
        assert!(!sweep.is_muted());
    }

    #[test]
    fn mutes_on_low_period_or_overflow() {
        assert!(configured(PulseId::Pulse2, 0b0000_0001, 7).is_muted());
        assert!(configured(PulseId::Pulse2, 0b0000_0000, 0x400).is_muted());
        assert!(!configured(PulseId::Pulse2, 0b0000_1000, 0x400).is_muted());
    }

    #[test]
    fn tick_writes_target_when_divider_expires() {
        let mut period = 0x100;
        let mut sweep = configured(PulseId::Pulse2, 0b1001_0001, period);

        // The divider starts expired, so the first tick already retunes
        sweep.tick(&mut period);
        assert_eq!(period, 0x180);
        sweep.calculate_target_period(period);

        sweep.tick(&mut period);
        assert_eq!(period, 0x180);
        sweep.tick(&mut period);
        assert_eq!(period, 0x240);
    }

    #[test]
    fn disabled_sweep_leaves_period_alone() {
        let mut period = 0x100;
        let mut sweep = configured(PulseId::Pulse1, 0b0000_0001, period);
        for _ in 0..8 {
            sweep.tick(&mut period);
        }
        assert_eq!(period, 0x100);
    }
}
