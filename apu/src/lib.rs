#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod channels;
mod config;
mod error;
pub mod filters;
mod frame_sequencer;
mod irq;
mod mixer;
mod status;

pub use channels::{PulseId, SampleReader};
pub use config::{ApuConfig, Region};
pub use error::{ApuError, Result};
pub use frame_sequencer::SequencerMode;
pub use irq::IrqLines;
pub use mixer::{ChannelOutputs, MixerKind};
pub use status::{FrameCounterFlags, StatusFlags};

use channels::*;
use frame_sequencer::{FrameEvents, FrameSequencer};
use memory::Memory;

use std::cell::RefCell;
use std::rc::Rc;

pub const STATUS_REGISTER: u16 = 0x4015;
pub const FRAME_COUNTER_REGISTER: u16 = 0x4017;

// http://www.slack.net/~ant/nes-emu/apu_ref.txt
pub struct APU {
    pulse1: PulseChannel,
    pulse2: PulseChannel,
    triangle: TriangleChannel,
    noise: NoiseChannel,
    dmc: DMCChannel,
    frame_sequencer: FrameSequencer,

    config: ApuConfig,
    irq_lines: Rc<IrqLines>,
    even_latch: bool,
    cycles: u64,
}

impl APU {
    /// An NTSC APU fetching DMC samples through `reader`
    pub fn new<F>(reader: F) -> Self
    where
        F: FnMut(u16) -> u8 + 'static,
    {
        Self::assemble(
            ApuConfig::default(),
            Box::new(reader),
            Rc::new(IrqLines::new()),
        )
    }

    pub fn builder() -> ApuBuilder {
        ApuBuilder::new()
    }

    fn assemble(config: ApuConfig, reader: SampleReader, irq_lines: Rc<IrqLines>) -> Self {
        let region = config.region;
        Self {
            pulse1: PulseChannel::new(PulseId::Pulse1),
            pulse2: PulseChannel::new(PulseId::Pulse2),
            triangle: TriangleChannel::new(),
            noise: NoiseChannel::new(region.noise_periods()),
            dmc: DMCChannel::new(region.dmc_rates(), reader, Rc::clone(&irq_lines)),
            frame_sequencer: FrameSequencer::new(region.frame_timing()),

            config,
            irq_lines,
            even_latch: true,
            cycles: 0,
        }
    }

    pub fn config(&self) -> ApuConfig {
        self.config
    }

    /// CPU cycles clocked since power-up or the last reset
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn irq_lines(&self) -> Rc<IrqLines> {
        Rc::clone(&self.irq_lines)
    }

    pub fn frame_irq(&self) -> bool {
        self.irq_lines.frame()
    }

    pub fn dmc_irq(&self) -> bool {
        self.irq_lines.dmc()
    }

    pub fn check_irq(&self) -> bool {
        self.irq_lines.any()
    }

    /// Whether a DMC fetch happened since the last call. The host decides
    /// how many CPU cycles that costs.
    pub fn check_stall_cpu(&mut self) -> bool {
        let stall = self.dmc.stall_cpu;
        self.dmc.stall_cpu = false;
        stall
    }

    pub fn reset(&mut self) {
        // https://wiki.nesdev.com/w/index.php/CPU_power_up_state
        debug!("APU reset");
        let region = self.config.region;
        self.pulse1 = PulseChannel::new(PulseId::Pulse1);
        self.pulse2 = PulseChannel::new(PulseId::Pulse2);
        self.triangle = TriangleChannel::new();
        self.noise = NoiseChannel::new(region.noise_periods());
        self.dmc.reset();
        self.frame_sequencer.reset();

        self.irq_lines.clear();
        self.even_latch = true;
        self.cycles = 0;
    }

    /// Advances the APU by one CPU cycle
    pub fn clock(&mut self) {
        let events = self.frame_sequencer.tick();
        self.apply_frame_events(events);

        // The triangle is clocked by the CPU clock directly
        // The pulse, noise, and DMC channels are clocked on even cycles
        self.triangle.tick(self.triangle.counters_nonzero());
        if self.even_latch {
            self.pulse1.tick();
            self.pulse2.tick();
            self.noise.tick();
            self.dmc.tick();
        }
        self.even_latch = !self.even_latch;
        self.cycles += 1;
    }

    fn apply_frame_events(&mut self, events: FrameEvents) {
        if events.quarter {
            self.pulse1.envelope.tick();
            self.pulse2.envelope.tick();
            self.noise.envelope.tick();
            self.triangle.tick_linear();
        }

        if events.half {
            self.pulse1.length_counter.tick(self.pulse1.enabled);
            self.pulse2.length_counter.tick(self.pulse2.enabled);
            self.triangle.length_counter.tick(self.triangle.enabled);
            self.noise.length_counter.tick(self.noise.enabled);

            self.pulse1.tick_sweep();
            self.pulse2.tick_sweep();
        }

        if events.interrupt && !self.irq_lines.frame() {
            debug!("frame IRQ asserted at cycle {}", self.cycles);
            self.irq_lines.set_frame(true);
        }
    }

    /// Channel levels as they enter the mixer
    pub fn channel_outputs(&self) -> ChannelOutputs {
        fn gated(active: bool, level: u8) -> u8 {
            if active {
                level
            } else {
                0
            }
        }

        ChannelOutputs {
            pulse1: gated(self.pulse1.length_counter.is_active(), self.pulse1.output()),
            pulse2: gated(self.pulse2.length_counter.is_active(), self.pulse2.output()),
            triangle: gated(self.triangle.length_counter.is_active(), self.triangle.output()),
            noise: gated(self.noise.length_counter.is_active(), self.noise.output()),
            dmc: self.dmc.output(),
        }
    }

    /// The mixed sample, roughly in 0.0..=1.0
    pub fn output(&self) -> f32 {
        self.config.mixer.mix(&self.channel_outputs())
    }

    pub fn status(&self) -> StatusFlags {
        let mut status = StatusFlags::empty();
        status.set(StatusFlags::PULSE1, self.pulse1.length_counter.is_active());
        status.set(StatusFlags::PULSE2, self.pulse2.length_counter.is_active());
        status.set(StatusFlags::TRIANGLE, self.triangle.length_counter.is_active());
        status.set(StatusFlags::NOISE, self.noise.length_counter.is_active());
        status.set(StatusFlags::DMC, self.dmc.bytes_remaining > 0);
        status.set(StatusFlags::FRAME_IRQ, self.irq_lines.frame());
        status.set(StatusFlags::DMC_IRQ, self.irq_lines.dmc());
        status
    }

    // https://wiki.nesdev.com/w/index.php/APU_registers
    pub fn cpu_read(&mut self, addr: u16) -> u8 {
        if addr != STATUS_REGISTER {
            return 0;
        }

        let data = self.status().bits();
        self.irq_lines.clear();
        data
    }

    pub fn cpu_write(&mut self, addr: u16, data: u8) {
        trace!("APU write {:#06X} <- {:#04X}", addr, data);
        match addr {
            0x4000..=0x4003 => self.pulse1.update_register(addr - 0x4000, data),
            0x4004..=0x4007 => self.pulse2.update_register(addr - 0x4004, data),
            0x4008..=0x400B => self.triangle.update_register(addr - 0x4008, data),
            0x400C..=0x400F => self.noise.update_register(addr - 0x400C, data),
            0x4010..=0x4013 => self.dmc.update_register(addr - 0x4010, data),
            STATUS_REGISTER => self.update_status(data),
            FRAME_COUNTER_REGISTER => self.update_frame_counter(data),
            _ => trace!("ignoring write to unmapped APU address {:#06X}", addr),
        }
    }

    fn update_status(&mut self, data: u8) {
        let enables = StatusFlags::from_bits_truncate(data);
        self.irq_lines.set_dmc(false);

        self.pulse1.set_enabled(enables.contains(StatusFlags::PULSE1));
        self.pulse2.set_enabled(enables.contains(StatusFlags::PULSE2));
        self.triangle.set_enabled(enables.contains(StatusFlags::TRIANGLE));
        self.noise.set_enabled(enables.contains(StatusFlags::NOISE));
        self.dmc.set_enabled(enables.contains(StatusFlags::DMC));
    }

    fn update_frame_counter(&mut self, data: u8) {
        let flags = FrameCounterFlags::from_bits_truncate(data);
        let mode = if flags.contains(FrameCounterFlags::FIVE_STEP) {
            SequencerMode::FiveStep
        } else {
            SequencerMode::FourStep
        };
        let inhibit = flags.contains(FrameCounterFlags::IRQ_INHIBIT);

        // even_latch has already flipped past the cycle that clocked the channels
        let on_apu_cycle = !self.even_latch;
        self.frame_sequencer.update_control(mode, inhibit, on_apu_cycle);
        if inhibit {
            self.irq_lines.set_frame(false);
        }
    }

    pub fn sequencer_mode(&self) -> SequencerMode {
        self.frame_sequencer.mode()
    }
}

impl Memory for APU {
    fn read(&mut self, addr: u16) -> u8 {
        self.cpu_read(addr)
    }

    fn peek(&self, addr: u16) -> u8 {
        if addr == STATUS_REGISTER {
            self.status().bits()
        } else {
            0
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.cpu_write(addr, data)
    }
}

/// Assembles an `APU`, checking that a DMC sample source was supplied
pub struct ApuBuilder {
    config: ApuConfig,
    reader: Option<SampleReader>,
    irq_lines: Option<Rc<IrqLines>>,
}

impl ApuBuilder {
    pub fn new() -> Self {
        Self {
            config: ApuConfig::default(),
            reader: None,
            irq_lines: None,
        }
    }

    pub fn config(mut self, config: ApuConfig) -> Self {
        self.config = config;
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.config.region = region;
        self
    }

    pub fn mixer(mut self, mixer: MixerKind) -> Self {
        self.config.mixer = mixer;
        self
    }

    pub fn sample_reader<F>(mut self, reader: F) -> Self
    where
        F: FnMut(u16) -> u8 + 'static,
    {
        self.reader = Some(Box::new(reader));
        self
    }

    /// Reads DMC samples from a host bus
    pub fn sample_memory(self, memory: Rc<RefCell<dyn Memory>>) -> Self {
        self.sample_reader(move |addr| memory.borrow_mut().read(addr))
    }

    /// Shares interrupt lines the host already polls
    pub fn irq_lines(mut self, irq_lines: Rc<IrqLines>) -> Self {
        self.irq_lines = Some(irq_lines);
        self
    }

    pub fn build(self) -> Result<APU> {
        let reader = self.reader.ok_or(ApuError::MissingSampleReader)?;
        let irq_lines = self
            .irq_lines
            .unwrap_or_else(|| Rc::new(IrqLines::new()));
        debug!("building APU with {:?}", self.config);
        Ok(APU::assemble(self.config, reader, irq_lines))
    }
}

impl Default for ApuBuilder {
    fn default() -> Self {
        Self::new()
    }
}
