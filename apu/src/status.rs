bitflags! {
    /// $4015: channel enables on write, channel and interrupt status on read
    pub struct StatusFlags: u8 {
        const PULSE1    = 1 << 0;
        const PULSE2    = 1 << 1;
        const TRIANGLE  = 1 << 2;
        const NOISE     = 1 << 3;
        const DMC       = 1 << 4;
        const FRAME_IRQ = 1 << 6;
        const DMC_IRQ   = 1 << 7;
    }
}

bitflags! {
    /// $4017
    pub struct FrameCounterFlags: u8 {
        const IRQ_INHIBIT = 1 << 6;
        const FIVE_STEP   = 1 << 7;
    }
}
