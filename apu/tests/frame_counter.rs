use apu::{IrqLines, Region, SequencerMode, APU};

use std::rc::Rc;

fn clock_n(apu: &mut APU, cycles: u32) {
    for _ in 0..cycles {
        apu.clock();
    }
}

fn pulse1_active(apu: &APU) -> bool {
    apu.status().bits() & 0x01 == 0x01
}

/// Pulse 1 with a length counter that expires after two half frames
fn short_pulse() -> APU {
    let mut apu = APU::new(|_| 0);
    apu.cpu_write(0x4015, 0x01);
    apu.cpu_write(0x4000, 0b0000_0000);
    apu.cpu_write(0x4003, 0b0001_1000);
    apu
}

#[test]
fn four_step_half_frames() {
    let mut apu = short_pulse();
    clock_n(&mut apu, 14912);
    assert!(pulse1_active(&apu));
    clock_n(&mut apu, 1);
    assert!(pulse1_active(&apu));
    clock_n(&mut apu, 29828 - 14913);
    assert!(pulse1_active(&apu));
    clock_n(&mut apu, 1);
    assert!(!pulse1_active(&apu));
}

#[test]
fn four_step_raises_frame_irq() {
    let mut apu = APU::new(|_| 0);
    clock_n(&mut apu, 29827);
    assert!(!apu.check_irq());
    clock_n(&mut apu, 1);
    assert!(apu.check_irq());
    assert!(apu.frame_irq());
    assert!(!apu.dmc_irq());
}

#[test]
fn irq_is_asserted_again_after_an_early_acknowledge() {
    let mut apu = APU::new(|_| 0);
    clock_n(&mut apu, 29828);
    apu.cpu_read(0x4015);
    assert!(!apu.frame_irq());
    clock_n(&mut apu, 1);
    assert!(apu.frame_irq());
}

#[test]
fn five_step_clocks_on_write_and_never_interrupts() {
    let mut apu = short_pulse();
    apu.cpu_write(0x4017, 0x80);
    assert_eq!(apu.sequencer_mode(), SequencerMode::FiveStep);

    // Power-up write lands between APU cycles: four cycles of delay
    clock_n(&mut apu, 4);
    assert!(pulse1_active(&apu));
    clock_n(&mut apu, 14912);
    assert!(pulse1_active(&apu));
    clock_n(&mut apu, 1);
    assert!(!pulse1_active(&apu));

    clock_n(&mut apu, 100_000);
    assert!(!apu.check_irq());
}

#[test]
fn inhibit_blocks_and_clears_frame_irq() {
    let mut apu = APU::new(|_| 0);
    clock_n(&mut apu, 29828);
    assert!(apu.frame_irq());

    apu.cpu_write(0x4017, 0x40);
    assert!(!apu.frame_irq());
    clock_n(&mut apu, 100_000);
    assert!(!apu.frame_irq());
}

#[test]
fn pal_sequence_is_longer() {
    let mut apu = APU::builder()
        .region(Region::Pal)
        .sample_reader(|_| 0)
        .build()
        .unwrap();
    clock_n(&mut apu, 29828);
    assert!(!apu.frame_irq());
    clock_n(&mut apu, 33252 - 29828);
    assert!(apu.frame_irq());
}

#[test]
fn host_shares_the_interrupt_lines() {
    let lines = Rc::new(IrqLines::new());
    let mut apu = APU::builder()
        .sample_reader(|_| 0)
        .irq_lines(Rc::clone(&lines))
        .build()
        .unwrap();

    clock_n(&mut apu, 29828);
    assert!(lines.frame());
    assert!(lines.any());

    apu.cpu_read(0x4015);
    assert!(!lines.frame());
}
