use crate::ram::RAM;
use crate::Memory;

use std::cell::RefCell;
use std::rc::Rc;

struct MapRange {
    start: u16, // Both inclusive
    end: u16,
    size: u32,
    memory: Rc<RefCell<dyn Memory>>,
}

impl MapRange {
    pub fn map(&self, addr: u16) -> Option<(u16, &Rc<RefCell<dyn Memory>>)> {
        if self.start <= addr && addr <= self.end {
            let offset = (addr - self.start) as u32 % self.size;
            Some((self.start + offset as u16, &self.memory))
        } else {
            None
        }
    }
}

/// Routes bus accesses to whichever device claims the address.
/// Unmapped reads return 0 and unmapped writes are dropped.
pub struct MMU {
    ranges: Vec<MapRange>,
}

impl MMU {
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    pub fn map_mirrored(
        &mut self,
        start: u16,
        end: u16,
        size: u32,
        memory: Rc<RefCell<dyn Memory>>,
    ) {
        assert!(size > 0, "mapped range must have a nonzero size");
        self.ranges.push(MapRange {
            start,
            end,
            size,
            memory,
        });
    }

    pub fn map(&mut self, start: u16, end: u16, memory: Rc<RefCell<dyn Memory>>) {
        assert!(start <= end, "mapped range {:#06X}..={:#06X} is reversed", start, end);
        self.map_mirrored(start, end, (end - start) as u32 + 1, memory);
    }

    pub fn map_ram_mirrored(&mut self, start: u16, end: u16, size: u32) {
        self.map_mirrored(
            start,
            end,
            size,
            Rc::new(RefCell::new(RAM::new(size as usize, start))),
        );
    }

    pub fn map_ram(&mut self, start: u16, end: u16) {
        assert!(start <= end, "mapped range {:#06X}..={:#06X} is reversed", start, end);
        self.map_ram_mirrored(start, end, (end - start) as u32 + 1);
    }

    fn access(&self, addr: u16) -> Option<(u16, &Rc<RefCell<dyn Memory>>)> {
        self.ranges.iter().find_map(|range| range.map(addr))
    }
}

impl Memory for MMU {
    fn read(&mut self, addr: u16) -> u8 {
        if let Some((addr, memory)) = self.access(addr) {
            memory.borrow_mut().read(addr)
        } else {
            0
        }
    }

    fn peek(&self, addr: u16) -> u8 {
        if let Some((addr, memory)) = self.access(addr) {
            memory.borrow().peek(addr)
        } else {
            0
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        if let Some((addr, memory)) = self.access(addr) {
            memory.borrow_mut().write(addr, data)
        }
    }
}
