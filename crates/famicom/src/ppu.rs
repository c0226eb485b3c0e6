//! Video-timing collaborator.
//!
//! This models the PPU's CPU-facing surface and frame timing, not its
//! rendering pipeline: the register window at $2000-$2007, OAM, VRAM
//! with nametable and palette mirroring, and the VBlank/NMI signalling
//! the CPU's interrupt arbitration polls. One `tick()` is one PPU dot;
//! the machine clocks three dots per CPU cycle.
//!
//! ## Scanline layout (NTSC)
//! - 0-239: visible
//! - 240: post-render (idle)
//! - 241-260: VBlank (flag raised at scanline 241, dot 1)
//! - 261: pre-render (flag cleared at dot 1)

use crate::cartridge::{Mapper, Mirroring};
use crate::config::Region;

/// VBlank flag in the status register.
const STATUS_VBLANK: u8 = 0x80;

/// PPU register window and frame timing.
pub struct Ppu {
    // VRAM
    nametable_ram: [u8; 2048],
    palette_ram: [u8; 32],
    oam: [u8; 256],

    // Registers
    ctrl: u8,
    mask: u8,
    status: u8,
    oam_addr: u8,

    // Loopy scroll/address registers
    v: u16,
    t: u16,
    fine_x: u8,
    w: bool,

    // Data read buffer ($2007)
    read_buffer: u8,

    // Frame position
    scanline: u16,
    dot: u16,
    pre_render_line: u16,

    // NMI signalling
    nmi_occurred: bool,
    nmi_output: bool,
    nmi_edge: bool,
}

impl Ppu {
    #[must_use]
    pub fn new(region: Region) -> Self {
        Self {
            nametable_ram: [0; 2048],
            palette_ram: [0; 32],
            oam: [0; 256],

            ctrl: 0,
            mask: 0,
            status: 0,
            oam_addr: 0,

            v: 0,
            t: 0,
            fine_x: 0,
            w: false,

            read_buffer: 0,

            scanline: region.pre_render_line(),
            dot: 0,
            pre_render_line: region.pre_render_line(),

            nmi_occurred: false,
            nmi_output: false,
            nmi_edge: false,
        }
    }

    /// One PPU dot. Raises VBlank at scanline 241 dot 1, clears it on
    /// the pre-render line.
    pub fn tick(&mut self) {
        if self.scanline == 241 && self.dot == 1 {
            self.status |= STATUS_VBLANK;
            self.nmi_occurred = true;
            self.check_nmi();
        } else if self.scanline == self.pre_render_line && self.dot == 1 {
            self.status = 0;
            self.nmi_occurred = false;
            self.check_nmi();
        }

        self.dot += 1;
        if self.dot > 340 {
            self.dot = 0;
            self.scanline += 1;
            if self.scanline > self.pre_render_line {
                self.scanline = 0;
            }
        }
    }

    /// CPU read from a PPU register ($2000-$2007, mirrored every 8).
    pub fn cpu_read(&mut self, reg: u16, mapper: &mut dyn Mapper) -> u8 {
        match reg & 0x07 {
            // $2002 - PPUSTATUS
            2 => {
                let result = (self.status & 0xE0) | (self.read_buffer & 0x1F);
                self.status &= !STATUS_VBLANK;
                self.nmi_occurred = false;
                self.check_nmi();
                self.w = false;
                result
            }
            // $2004 - OAMDATA
            4 => self.oam[self.oam_addr as usize],
            // $2007 - PPUDATA
            7 => {
                let addr = self.v & 0x3FFF;
                let mut result = self.read_buffer;
                self.read_buffer = self.vram_read(addr, mapper);
                // Palette reads bypass the buffer; the buffer picks up
                // the nametable byte underneath instead.
                if addr >= 0x3F00 {
                    result = self.palette_ram[mirror_palette_addr(addr) as usize];
                    self.read_buffer = self.vram_read(addr & 0x2FFF, mapper);
                }
                self.advance_v();
                result
            }
            _ => 0, // Write-only registers
        }
    }

    /// CPU write to a PPU register ($2000-$2007, mirrored every 8).
    pub fn cpu_write(&mut self, reg: u16, val: u8, mapper: &mut dyn Mapper) {
        match reg & 0x07 {
            // $2000 - PPUCTRL
            0 => {
                self.ctrl = val;
                // Nametable select bits land in t bits 10-11.
                self.t = (self.t & !0x0C00) | (u16::from(val & 0x03) << 10);
                self.nmi_output = val & 0x80 != 0;
                self.check_nmi();
            }
            // $2001 - PPUMASK
            1 => self.mask = val,
            // $2003 - OAMADDR
            3 => self.oam_addr = val,
            // $2004 - OAMDATA
            4 => {
                self.oam[self.oam_addr as usize] = val;
                self.oam_addr = self.oam_addr.wrapping_add(1);
            }
            // $2005 - PPUSCROLL
            5 => {
                if self.w {
                    self.t = (self.t & !0x73E0)
                        | (u16::from(val & 0x07) << 12)
                        | (u16::from(val >> 3) << 5);
                } else {
                    self.t = (self.t & !0x001F) | (u16::from(val) >> 3);
                    self.fine_x = val & 0x07;
                }
                self.w = !self.w;
            }
            // $2006 - PPUADDR
            6 => {
                if self.w {
                    // Second write: low byte, then t copies to v.
                    self.t = (self.t & 0xFF00) | u16::from(val);
                    self.v = self.t;
                } else {
                    self.t = (self.t & 0x00FF) | (u16::from(val & 0x3F) << 8);
                }
                self.w = !self.w;
            }
            // $2007 - PPUDATA
            7 => {
                let addr = self.v & 0x3FFF;
                self.vram_write(addr, val, mapper);
                self.advance_v();
            }
            _ => {}
        }
    }

    fn advance_v(&mut self) {
        let step = if self.ctrl & 0x04 != 0 { 32 } else { 1 };
        self.v = self.v.wrapping_add(step) & 0x7FFF;
    }

    fn vram_read(&self, addr: u16, mapper: &mut dyn Mapper) -> u8 {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => mapper.chr_read(addr),
            0x2000..=0x3EFF => {
                let mirrored = mirror_nametable_addr(addr, mapper.mirroring());
                self.nametable_ram[mirrored as usize]
            }
            _ => self.palette_ram[mirror_palette_addr(addr) as usize],
        }
    }

    fn vram_write(&mut self, addr: u16, val: u8, mapper: &mut dyn Mapper) {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => mapper.chr_write(addr, val),
            0x2000..=0x3EFF => {
                let mirrored = mirror_nametable_addr(addr, mapper.mirroring());
                self.nametable_ram[mirrored as usize] = val;
            }
            _ => self.palette_ram[mirror_palette_addr(addr) as usize] = val,
        }
    }

    /// NMI is the conjunction of "in VBlank" and "NMI enabled"; the edge
    /// latch makes a rising conjunction deliverable exactly once, and
    /// re-arms only after the line drops.
    fn check_nmi(&mut self) {
        let nmi_active = self.nmi_occurred && self.nmi_output;
        if nmi_active && !self.nmi_edge {
            self.nmi_edge = true;
        } else if !nmi_active {
            self.nmi_edge = false;
        }
    }

    /// Take the pending NMI edge (polled by the machine step loop).
    pub fn take_nmi(&mut self) -> bool {
        if self.nmi_edge {
            self.nmi_edge = false;
            true
        } else {
            false
        }
    }

    /// Write OAM data (the DMA sink).
    pub fn write_oam(&mut self, offset: u8, value: u8) {
        self.oam[offset as usize] = value;
    }

    /// Read OAM data (for observation).
    #[must_use]
    pub fn read_oam(&self, offset: u8) -> u8 {
        self.oam[offset as usize]
    }

    /// OAM address register; DMA writes start here.
    #[must_use]
    pub fn oam_addr(&self) -> u8 {
        self.oam_addr
    }

    /// Current scanline.
    #[must_use]
    pub fn scanline(&self) -> u16 {
        self.scanline
    }

    /// Current dot.
    #[must_use]
    pub fn dot(&self) -> u16 {
        self.dot
    }

    /// Fine-x scroll latched by the first $2005 write.
    #[must_use]
    pub fn fine_x(&self) -> u8 {
        self.fine_x
    }

    /// Whether the mask register has background or sprites enabled.
    #[must_use]
    pub fn rendering_enabled(&self) -> bool {
        self.mask & 0x18 != 0
    }
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new(Region::Ntsc)
    }
}

fn mirror_nametable_addr(addr: u16, mirroring: Mirroring) -> u16 {
    let nt_addr = (addr - 0x2000) & 0x0FFF;
    match mirroring {
        Mirroring::Horizontal => {
            // Nametables 0,1 -> page 0; 2,3 -> page 1
            let page = (nt_addr / 0x0800) * 0x0400;
            page + (nt_addr & 0x03FF)
        }
        // Nametables 0,2 -> page 0; 1,3 -> page 1
        Mirroring::Vertical => nt_addr & 0x07FF,
    }
}

fn mirror_palette_addr(addr: u16) -> u16 {
    let mut a = (addr - 0x3F00) & 0x1F;
    // $3F10/$3F14/$3F18/$3F1C mirror $3F00/$3F04/$3F08/$3F0C
    if a == 0x10 || a == 0x14 || a == 0x18 || a == 0x1C {
        a -= 0x10;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::Nrom;

    fn dummy_mapper() -> Nrom {
        Nrom::new(vec![0; 16384], vec![], Mirroring::Horizontal)
    }

    /// Run the PPU to a given scanline and dot.
    fn run_to(ppu: &mut Ppu, scanline: u16, dot: u16) {
        while !(ppu.scanline() == scanline && ppu.dot() == dot) {
            ppu.tick();
        }
    }

    #[test]
    fn vblank_raises_at_241_dot_1_and_clears_on_pre_render() {
        let mut ppu = Ppu::new(Region::Ntsc);

        run_to(&mut ppu, 241, 2);
        assert_eq!(ppu.status & STATUS_VBLANK, STATUS_VBLANK);

        run_to(&mut ppu, 261, 2);
        assert_eq!(ppu.status & STATUS_VBLANK, 0);
    }

    #[test]
    fn status_read_clears_vblank_and_write_toggle() {
        let mut ppu = Ppu::new(Region::Ntsc);
        let mut mapper = dummy_mapper();
        ppu.status = STATUS_VBLANK;
        ppu.w = true;

        let status = ppu.cpu_read(2, &mut mapper);
        assert_eq!(status & STATUS_VBLANK, STATUS_VBLANK, "read returns the pre-clear value");
        assert_eq!(ppu.status & STATUS_VBLANK, 0);
        assert!(!ppu.w);
    }

    #[test]
    fn nmi_fires_once_per_vblank() {
        let mut ppu = Ppu::new(Region::Ntsc);
        let mut mapper = dummy_mapper();
        ppu.cpu_write(0, 0x80, &mut mapper); // enable NMI

        run_to(&mut ppu, 241, 2);
        assert!(ppu.take_nmi());
        assert!(!ppu.take_nmi(), "edge is consumed, not level");

        // Next frame produces a fresh edge.
        run_to(&mut ppu, 261, 2);
        run_to(&mut ppu, 241, 2);
        assert!(ppu.take_nmi());
    }

    #[test]
    fn enabling_nmi_mid_vblank_raises_the_edge() {
        let mut ppu = Ppu::new(Region::Ntsc);
        let mut mapper = dummy_mapper();

        run_to(&mut ppu, 241, 2);
        assert!(!ppu.take_nmi(), "NMI disabled, no edge");

        ppu.cpu_write(0, 0x80, &mut mapper);
        assert!(ppu.take_nmi(), "enable during VBlank asserts immediately");
    }

    #[test]
    fn nmi_disabled_by_ctrl_bit_7() {
        let mut ppu = Ppu::new(Region::Ntsc);
        run_to(&mut ppu, 241, 2);
        assert!(!ppu.take_nmi());
    }

    #[test]
    fn data_reads_are_buffered_one_behind() {
        let mut ppu = Ppu::new(Region::Ntsc);
        let mut mapper = dummy_mapper();

        // Point v at a nametable cell holding $42.
        ppu.cpu_write(6, 0x20, &mut mapper);
        ppu.cpu_write(6, 0x05, &mut mapper);
        ppu.cpu_write(7, 0x42, &mut mapper);

        ppu.cpu_write(6, 0x20, &mut mapper);
        ppu.cpu_write(6, 0x05, &mut mapper);
        let stale = ppu.cpu_read(7, &mut mapper);
        let fresh = ppu.cpu_read(7, &mut mapper);
        assert_ne!(stale, 0x42, "first read returns the stale buffer");
        assert_eq!(fresh, 0x42, "second read returns the buffered byte");
    }

    #[test]
    fn palette_reads_bypass_the_buffer() {
        let mut ppu = Ppu::new(Region::Ntsc);
        let mut mapper = dummy_mapper();

        ppu.cpu_write(6, 0x3F, &mut mapper);
        ppu.cpu_write(6, 0x01, &mut mapper);
        ppu.cpu_write(7, 0x2A, &mut mapper);

        ppu.cpu_write(6, 0x3F, &mut mapper);
        ppu.cpu_write(6, 0x01, &mut mapper);
        assert_eq!(ppu.cpu_read(7, &mut mapper), 0x2A, "no stale read for palette");
    }

    #[test]
    fn ctrl_bit_2_selects_increment_of_32() {
        let mut ppu = Ppu::new(Region::Ntsc);
        let mut mapper = dummy_mapper();
        ppu.cpu_write(0, 0x04, &mut mapper);
        ppu.cpu_write(6, 0x20, &mut mapper);
        ppu.cpu_write(6, 0x00, &mut mapper);
        ppu.cpu_write(7, 0x01, &mut mapper);
        assert_eq!(ppu.v, 0x2020);
    }

    #[test]
    fn oam_data_writes_advance_the_address() {
        let mut ppu = Ppu::new(Region::Ntsc);
        let mut mapper = dummy_mapper();
        ppu.cpu_write(3, 0x10, &mut mapper);
        ppu.cpu_write(4, 0xAA, &mut mapper);
        ppu.cpu_write(4, 0xBB, &mut mapper);
        assert_eq!(ppu.read_oam(0x10), 0xAA);
        assert_eq!(ppu.read_oam(0x11), 0xBB);
        assert_eq!(ppu.oam_addr(), 0x12);
    }

    #[test]
    fn nametable_mirroring_modes() {
        // Horizontal: $2000 and $2400 share a page.
        assert_eq!(
            mirror_nametable_addr(0x2000, Mirroring::Horizontal),
            mirror_nametable_addr(0x2400, Mirroring::Horizontal)
        );
        assert_ne!(
            mirror_nametable_addr(0x2000, Mirroring::Horizontal),
            mirror_nametable_addr(0x2800, Mirroring::Horizontal)
        );
        // Vertical: $2000 and $2800 share a page.
        assert_eq!(
            mirror_nametable_addr(0x2000, Mirroring::Vertical),
            mirror_nametable_addr(0x2800, Mirroring::Vertical)
        );
        assert_ne!(
            mirror_nametable_addr(0x2000, Mirroring::Vertical),
            mirror_nametable_addr(0x2400, Mirroring::Vertical)
        );
    }

    #[test]
    fn palette_backdrop_mirrors() {
        assert_eq!(mirror_palette_addr(0x3F10), mirror_palette_addr(0x3F00));
        assert_eq!(mirror_palette_addr(0x3F1C), mirror_palette_addr(0x3F0C));
        assert_ne!(mirror_palette_addr(0x3F01), mirror_palette_addr(0x3F11));
    }

    #[test]
    fn scroll_writes_fill_t_in_two_halves() {
        let mut ppu = Ppu::new(Region::Ntsc);
        let mut mapper = dummy_mapper();
        ppu.cpu_write(5, 0x7D, &mut mapper); // X = 125
        assert_eq!(ppu.fine_x(), 0x05);
        assert_eq!(ppu.t & 0x001F, 0x0F);
        ppu.cpu_write(5, 0x5E, &mut mapper); // Y = 94
        assert_eq!((ppu.t >> 12) & 0x07, 0x06);
        assert_eq!((ppu.t >> 5) & 0x1F, 0x0B);
        assert!(!ppu.w, "two writes close the toggle");
    }

    #[test]
    fn mask_writes_drive_rendering_enabled() {
        let mut ppu = Ppu::new(Region::Ntsc);
        let mut mapper = dummy_mapper();
        assert!(!ppu.rendering_enabled());

        ppu.cpu_write(1, 0x08, &mut mapper); // background on
        assert!(ppu.rendering_enabled());
        ppu.cpu_write(1, 0x10, &mut mapper); // sprites only
        assert!(ppu.rendering_enabled());

        ppu.cpu_write(1, 0x07, &mut mapper); // greyscale/clip bits alone
        assert!(!ppu.rendering_enabled());
    }
}
