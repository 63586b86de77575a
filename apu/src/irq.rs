use std::cell::Cell;

/// The APU's two interrupt sources, shared by `Rc` between the APU, its DMC
/// channel and whoever polls them on the CPU side.
#[derive(Debug, Default)]
pub struct IrqLines {
    frame: Cell<bool>,
    dmc: Cell<bool>,
}

impl IrqLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> bool {
        self.frame.get()
    }

    pub fn dmc(&self) -> bool {
        self.dmc.get()
    }

    pub fn any(&self) -> bool {
        self.frame() || self.dmc()
    }

    pub fn set_frame(&self, asserted: bool) {
        self.frame.set(asserted);
    }

    pub fn set_dmc(&self, asserted: bool) {
        self.dmc.set(asserted);
    }

    pub fn clear(&self) {
        self.frame.set(false);
        self.dmc.set(false);
    }
}
