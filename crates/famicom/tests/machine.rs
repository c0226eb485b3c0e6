//! Machine-level tests: boot sequence, interrupt arbitration, and OAM
//! DMA, driven through hand-assembled NROM programs.

use famicom::cartridge::{Mirroring, Nrom};
use famicom::{Famicom, Region};
use famicom_core::Bus;

/// Build a 32K NROM cartridge with `program` at $8000 and `handler`
/// (shared by NMI and IRQ) at $9000. The reset vector points at the
/// program, the remaining PRG is a NOP sled.
fn build_cartridge(program: &[u8], handler: &[u8]) -> Box<Nrom> {
    let mut prg = vec![0xEA; 32768];
    prg[..program.len()].copy_from_slice(program);
    prg[0x1000..0x1000 + handler.len()].copy_from_slice(handler);
    // Reset -> $8000
    prg[0x7FFC] = 0x00;
    prg[0x7FFD] = 0x80;
    // NMI -> $9000
    prg[0x7FFA] = 0x00;
    prg[0x7FFB] = 0x90;
    // IRQ/BRK -> $9000
    prg[0x7FFE] = 0x00;
    prg[0x7FFF] = 0x90;
    Box::new(Nrom::new(prg, vec![0; 8192], Mirroring::Horizontal))
}

fn make_machine(program: &[u8], handler: &[u8]) -> Famicom {
    Famicom::new(build_cartridge(program, handler), Region::Ntsc)
}

#[test]
fn boot_polls_vblank_and_reaches_the_idle_loop() {
    // $8000: SEI / CLD / LDX #$FF / TXS
    // $8005: LDA $2002 / BPL $8005     ; VBlank wait 1
    // $800A: LDA $2002 / BPL $800A     ; VBlank wait 2
    // $800F: JMP $800F                 ; idle
    let program: &[u8] = &[
        0x78, 0xD8, 0xA2, 0xFF, 0x9A, // init
        0xAD, 0x02, 0x20, 0x10, 0xFB, // vblank1
        0xAD, 0x02, 0x20, 0x10, 0xFB, // vblank2
        0x4C, 0x0F, 0x80, // idle
    ];
    let mut machine = make_machine(program, &[0x40]);
    assert_eq!(machine.cpu().pc(), 0x8000, "reset vector points at init");

    // Two VBlank waits need about two frames; run five to be safe.
    let idle_range = 0x800F_u16..=0x8011;
    for _ in 0..5 {
        machine.run_frame().expect("boot program should not fault");
        if idle_range.contains(&machine.cpu().pc()) {
            return;
        }
    }
    let pc = machine.cpu().pc();
    panic!("did not reach the idle loop within 5 frames, stuck at ${pc:04X}");
}

#[test]
fn a_fresh_machine_has_power_up_registers() {
    let program: &[u8] = &[0x4C, 0x00, 0x80];
    let mut machine = make_machine(program, &[0x40]);

    let regs = machine.cpu().regs;
    assert_eq!(regs.s, 0xFD, "SP sits at $FD after the reset sequence");
    assert_eq!((regs.a, regs.x, regs.y), (0, 0, 0));

    // Resetting again does not drift SP below $FD.
    machine.reset();
    assert_eq!(machine.cpu().regs.s, 0xFD);
}

#[test]
fn nmi_fires_once_per_frame_and_returns_cleanly() {
    // $8000: LDA #$80 / STA $2000      ; enable NMI on VBlank
    // $8005: JMP $8005                 ; idle
    let program: &[u8] = &[0xA9, 0x80, 0x8D, 0x00, 0x20, 0x4C, 0x05, 0x80];
    // $9000: INC $00 / RTI
    let handler: &[u8] = &[0xE6, 0x00, 0x40];
    let mut machine = make_machine(program, handler);

    for _ in 0..3 {
        machine.run_frame().expect("program should not fault");
    }

    assert_eq!(
        machine.bus().peek_ram(0x0000),
        3,
        "one handler invocation per VBlank"
    );
    let pc = machine.cpu().pc();
    assert!(
        (0x8005..=0x8007).contains(&pc),
        "RTI resumed the idle loop, PC=${pc:04X}"
    );
}

#[test]
fn nmi_is_not_delivered_while_disabled() {
    // Idle loop only; PPUCTRL bit 7 stays clear.
    let program: &[u8] = &[0x4C, 0x00, 0x80];
    let handler: &[u8] = &[0xE6, 0x00, 0x40];
    let mut machine = make_machine(program, handler);

    for _ in 0..3 {
        machine.run_frame().expect("program should not fault");
    }
    assert_eq!(machine.bus().peek_ram(0x0000), 0, "no NMI without the enable bit");
}

#[test]
fn oam_dma_copies_a_page_with_parity_dependent_cost() {
    // $8000: LDA #$02 / STA $4014      ; DMA from page $02
    // $8005: LDA #$02 / STA $4014      ; and again, now on an odd cycle
    let program: &[u8] = &[0xA9, 0x02, 0x8D, 0x14, 0x40, 0xA9, 0x02, 0x8D, 0x14, 0x40];
    let mut machine = make_machine(program, &[0x40]);

    // Source page $0200-$02FF holds its own offsets.
    for offset in 0..=0xFF_u8 {
        machine.bus_mut().write(0x0200 | u16::from(offset), offset);
    }

    assert_eq!(machine.step().unwrap(), 2); // LDA
    assert_eq!(machine.step().unwrap(), 4); // STA latches the trigger
    // 6 cycles so far: the burst starts on an even cycle.
    assert_eq!(machine.step().unwrap(), 513);
    for offset in [0x00_u8, 0x01, 0x7F, 0xFF] {
        assert_eq!(machine.bus().ppu.read_oam(offset), offset);
    }

    assert_eq!(machine.step().unwrap(), 2);
    assert_eq!(machine.step().unwrap(), 4);
    // 525 cycles now: odd start pays the extra alignment cycle.
    assert_eq!(machine.step().unwrap(), 514);
}

#[test]
fn oam_dma_can_source_from_cartridge_space() {
    // $8000: LDA #$AB / STA $4014     ; DMA from ROM page $AB
    let program: &[u8] = &[0xA9, 0xAB, 0x8D, 0x14, 0x40];
    let mut prg = vec![0xEA; 32768];
    prg[..program.len()].copy_from_slice(program);
    prg[0x7FFC] = 0x00;
    prg[0x7FFD] = 0x80;
    // $AB00-$ABFF is PRG offset $2B00.
    for offset in 0..=0xFF_usize {
        prg[0x2B00 + offset] = (offset as u8) ^ 0x5A;
    }
    let mapper = Box::new(Nrom::new(prg, vec![0; 8192], Mirroring::Horizontal));
    let mut machine = Famicom::new(mapper, Region::Ntsc);

    machine.step().unwrap();
    machine.step().unwrap();
    assert_eq!(machine.step().unwrap(), 513);
    for offset in [0x00_u8, 0x42, 0xFF] {
        assert_eq!(machine.bus().ppu.read_oam(offset), offset ^ 0x5A);
    }
}

#[test]
fn nmi_preempts_a_pending_dma_request() {
    let program: &[u8] = &[0x4C, 0x00, 0x80];
    let mut machine = make_machine(program, &[0x40]);

    machine.bus_mut().write(0x4014, 0x03);
    machine.raise_nmi();

    // The interrupt entry wins the arbitration.
    assert_eq!(machine.step().unwrap(), 7);
    assert_eq!(machine.cpu().pc(), 0x9000);
    assert_eq!(
        machine.bus().oam_dma_page,
        Some(0x03),
        "the DMA request survives the pre-emption"
    );

    // The burst runs next, before the handler's first instruction. The
    // 7-cycle interrupt entry leaves the cycle count odd, so the burst
    // pays the alignment cycle.
    assert_eq!(machine.step().unwrap(), 514);
    assert!(machine.bus().oam_dma_page.is_none());
}

#[test]
fn ram_mirrors_are_visible_to_programs() {
    // $8000: LDA #$77 / STA $0800 / JMP $8005
    let program: &[u8] = &[0xA9, 0x77, 0x8D, 0x00, 0x08, 0x4C, 0x05, 0x80];
    let mut machine = make_machine(program, &[0x40]);

    machine.step().unwrap();
    machine.step().unwrap();
    assert_eq!(
        machine.bus().peek_ram(0x0000),
        0x77,
        "$0800 aliases $0000 through the 2K mirror"
    );
}
