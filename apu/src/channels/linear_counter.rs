// https://wiki.nesdev.com/w/index.php/APU_Triangle
pub struct LinearCounter {
    pub control: bool,
    pub counter: u8,
    pub reload_value: u8,
    pub reload: bool,
}

impl LinearCounter {
    pub fn new() -> Self {
        Self {
            control: false,
            counter: 0,
            reload_value: 0,
            reload: false,
        }
    }

    /// Clocked on every quarter frame
    pub fn tick(&mut self, enabled: bool) {
        if !enabled {
            self.counter = 0;
            return;
        }

        if self.reload {
            self.counter = self.reload_value;
        } else if self.counter > 0 {
            self.counter -= 1;
        }

        if !self.control {
            self.reload = false;
        }
    }

    pub fn is_active(&self) -> bool {
        self.counter > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_then_count_down() {
        let mut linear = LinearCounter::new();
        linear.reload_value = 3;
        linear.reload = true;

        linear.tick(true);
        assert_eq!(linear.counter, 3);
        assert!(!linear.reload);

        for expected in [2, 1, 0, 0].iter() {
            linear.tick(true);
            assert_eq!(linear.counter, *expected);
        }
    }

    #[test]
    fn control_flag_keeps_reloading() {
        let mut linear = LinearCounter::new();
        linear.reload_value = 5;
        linear.reload = true;
        linear.control = true;

        for _ in 0..4 {
            linear.tick(true);
            assert_eq!(linear.counter, 5);
        }
        assert!(linear.reload);
    }

    #[test]
    fn disabled_forces_zero() {
        let mut linear = LinearCounter::new();
        linear.reload_value = 7;
        linear.reload = true;
        linear.tick(true);
        linear.tick(false);
        assert_eq!(linear.counter, 0);
    }
}
