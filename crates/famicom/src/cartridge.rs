//! Cartridge mappers.
//!
//! A mapper translates CPU and PPU addresses into the cartridge's own
//! ROM/RAM. The machine picks one at cartridge load and never swaps it
//! while running. Header parsing happens outside this crate; callers
//! hand over the raw PRG/CHR bytes plus the mapper id and mirroring
//! read from the header.

/// Nametable mirroring mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
}

/// Mapper trait: translates CPU and PPU addresses to cartridge ROM/RAM.
///
/// `cpu_read` returns `None` for addresses the cartridge does not back,
/// so the bus can apply open-bus behavior for data reads and the CPU
/// can fault on instruction fetches. `chr_read` takes `&mut self`
/// because some mapper chips update internal latches on pattern-table
/// reads.
pub trait Mapper {
    fn cpu_read(&self, addr: u16) -> Option<u8>;
    fn cpu_write(&mut self, addr: u16, value: u8);
    fn chr_read(&mut self, addr: u16) -> u8;
    fn chr_write(&mut self, addr: u16, value: u8);
    fn mirroring(&self) -> Mirroring;
}

/// NROM (mapper 0): no bank switching.
///
/// - PRG: 16K mirrored across $8000-$FFFF, or 32K mapped directly
/// - CHR: 8K at PPU $0000-$1FFF (RAM when the cartridge ships none)
pub struct Nrom {
    prg_rom: Vec<u8>,
    chr: Vec<u8>,
    chr_is_ram: bool,
    mirroring: Mirroring,
}

impl Nrom {
    #[must_use]
    pub fn new(prg_rom: Vec<u8>, chr_data: Vec<u8>, mirroring: Mirroring) -> Self {
        let chr_is_ram = chr_data.is_empty();
        let chr = if chr_is_ram {
            vec![0u8; 8192]
        } else {
            chr_data
        };
        Self {
            prg_rom,
            chr,
            chr_is_ram,
            mirroring,
        }
    }
}

impl Mapper for Nrom {
    fn cpu_read(&self, addr: u16) -> Option<u8> {
        match addr {
            0x8000..=0xFFFF if !self.prg_rom.is_empty() => {
                let offset = (addr - 0x8000) as usize;
                Some(self.prg_rom[offset % self.prg_rom.len()])
            }
            _ => None,
        }
    }

    fn cpu_write(&mut self, _addr: u16, _value: u8) {
        // NROM has no writable PRG area; ROM writes are dropped.
    }

    fn chr_read(&mut self, addr: u16) -> u8 {
        self.chr[(addr as usize) & 0x1FFF]
    }

    fn chr_write(&mut self, addr: u16, value: u8) {
        if self.chr_is_ram {
            self.chr[(addr as usize) & 0x1FFF] = value;
        }
    }

    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}

/// A cartridge slot with nothing in it (or an unsupported board). Every
/// CPU read reports unbacked, every write is dropped.
pub struct Unmapped;

impl Mapper for Unmapped {
    fn cpu_read(&self, _addr: u16) -> Option<u8> {
        None
    }

    fn cpu_write(&mut self, _addr: u16, _value: u8) {}

    fn chr_read(&mut self, _addr: u16) -> u8 {
        0
    }

    fn chr_write(&mut self, _addr: u16, _value: u8) {}

    fn mirroring(&self) -> Mirroring {
        Mirroring::Horizontal
    }
}

/// Build a mapper from header fields. Unsupported mapper ids fall back
/// to [`Unmapped`] so the machine still constructs; the CPU will fault
/// on the first fetch with a clear location instead of reading garbage.
#[must_use]
pub fn create(mapper_id: u8, prg_rom: Vec<u8>, chr: Vec<u8>, mirroring: Mirroring) -> Box<dyn Mapper> {
    match mapper_id {
        0 => Box::new(Nrom::new(prg_rom, chr, mirroring)),
        id => {
            log::warn!("mapper {id} not supported, treating cartridge as unmapped");
            Box::new(Unmapped)
        }
    }
}
