// https://wiki.nesdev.com/w/index.php/APU_Length_Counter
pub struct LengthCounter {
    pub counter: u8,
    pub halt: bool,
}

impl LengthCounter {
    pub fn new() -> Self {
        Self {
            counter: 0,
            halt: false,
        }
    }

    /// Clocked on every half frame
    pub fn tick(&mut self, enabled: bool) {
        if !enabled {
            self.counter = 0;
        } else if !self.halt && self.counter > 0 {
            self.counter -= 1;
        }
    }

    /// `length_table_index` is the top five bits of the load register
    pub fn load(&mut self, length_table_index: u8) {
        self.counter = LENGTH_TABLE[length_table_index as usize & 0b1_1111];
    }

    pub fn clear(&mut self) {
        self.counter = 0;
    }

    pub fn is_active(&self) -> bool {
        self.counter > 0
    }
}

// https://wiki.nesdev.com/w/index.php/APU_Length_Counter#Table_structure
// Odd indices select linear length values, even indices select note values
const LENGTH_TABLE: [u8; 0x20] = [
    0x0A, 0xFE, 0x14, 0x02, 0x28, 0x04, 0x50, 0x06, 0xA0, 0x08, 0x3C, 0x0A, 0x0E, 0x0C, 0x1A, 0x0E,
    0x0C, 0x10, 0x18, 0x12, 0x30, 0x14, 0x60, 0x16, 0xC0, 0x18, 0x48, 0x1A, 0x10, 0x1C, 0x20, 0x1E,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_length_table() {
        let mut length = LengthCounter::new();
        length.load(0);
        assert_eq!(length.counter, 10);
        length.load(1);
        assert_eq!(length.counter, 254);
        length.load(0x1F);
        assert_eq!(length.counter, 30);
    }

    #[test]
    fn counts_down_and_stops_at_zero() {
        let mut length = LengthCounter::new();
        length.load(3);
        length.tick(true);
        length.tick(true);
        assert_eq!(length.counter, 0);
        length.tick(true);
        assert_eq!(length.counter, 0);
    }

    #[test]
    fn halt_freezes_counter() {
        let mut length = LengthCounter::new();
        length.load(0);
        length.halt = true;
        for _ in 0..20 {
            length.tick(true);
        }
        assert_eq!(length.counter, 10);
    }

    #[test]
    fn disabled_channel_stays_at_zero() {
        let mut length = LengthCounter::new();
        length.load(1);
        length.tick(false);
        assert_eq!(length.counter, 0);

        for _ in 0..10 {
            length.tick(false);
            assert_eq!(length.counter, 0);
        }

        length.load(0);
        length.tick(true);
        assert_eq!(length.counter, 9);
    }
}
