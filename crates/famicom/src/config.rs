//! Machine configuration.

/// Video region — determines frame timing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// NTSC: 60 Hz, 262 scanlines, 1,789,773 Hz CPU.
    #[default]
    Ntsc,
    /// PAL: 50 Hz, 312 scanlines, 1,662,607 Hz CPU.
    Pal,
}

impl Region {
    /// Total scanlines per frame (including pre-render and VBlank).
    #[must_use]
    pub const fn scanlines_per_frame(self) -> u16 {
        match self {
            Self::Ntsc => 262,
            Self::Pal => 312,
        }
    }

    /// Pre-render scanline number (last scanline of the frame).
    #[must_use]
    pub const fn pre_render_line(self) -> u16 {
        self.scanlines_per_frame() - 1
    }

    /// CPU frequency in Hz.
    #[must_use]
    pub const fn cpu_hz(self) -> u32 {
        match self {
            Self::Ntsc => 1_789_773,
            Self::Pal => 1_662_607,
        }
    }

    /// CPU cycles in one frame. The PPU runs 341 dots per scanline at
    /// three dots per CPU cycle; the division truncates the fractional
    /// cycle at the frame boundary.
    #[must_use]
    pub const fn cpu_cycles_per_frame(self) -> u64 {
        341 * self.scanlines_per_frame() as u64 / 3
    }
}
