use crate::Memory;

pub struct RAM {
    pub memory: Vec<u8>,
    pub start: u16,
}

impl RAM {
    pub fn new(size: usize, start: u16) -> Self {
        RAM {
            memory: vec![0; size],
            start,
        }
    }

    /// A block preloaded with `data`, e.g. a PRG image holding DMC samples
    pub fn with_data(start: u16, data: Vec<u8>) -> Self {
        RAM {
            memory: data,
            start,
        }
    }

    fn index(&self, addr: u16) -> usize {
        addr.wrapping_sub(self.start) as usize
    }
}

impl Memory for RAM {
    fn read(&mut self, addr: u16) -> u8 {
        self.peek(addr)
    }

    fn peek(&self, addr: u16) -> u8 {
        self.memory.get(self.index(addr)).copied().unwrap_or(0)
    }

    fn write(&mut self, addr: u16, data: u8) {
        let index = self.index(addr);
        if let Some(cell) = self.memory.get_mut(index) {
            *cell = data;
        }
    }
}
