pub mod mmu;
pub mod ram;

/// A byte-addressed device on a 16-bit bus.
///
/// `read` may have side effects (clearing a status latch, for instance),
/// `peek` never does.
pub trait Memory {
    fn read(&mut self, addr: u16) -> u8;
    fn peek(&self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
}
