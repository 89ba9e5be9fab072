//! Addrmap: rasterizer context registers
//!
//! | offset | write                  | read                     |
//! |--------|------------------------|--------------------------|
//! | 0x0    | TILE (tile origin)     | POSITION (current patch) |
//! | 0x2    | VERTEX1                | STATUS (mask, flags)     |
//! | 0x4    | VERTEX2                | reads as zero            |
//! | 0x6    | VERTEX3                | reads as zero            |
//!
//! OR [`STROBE`] into any offset: a write also sets the context's start
//! request, a read also sets its advance request.

/// Named types defined within this component's body
pub mod named_types {
    pub mod position_reg;
    pub mod status_reg;
    pub mod tile_reg;
    pub mod vertex_reg;
}

pub use crate::components::raster_regs::named_types::position_reg::PositionReg;
pub use crate::components::raster_regs::named_types::status_reg::StatusReg;
pub use crate::components::raster_regs::named_types::tile_reg::TileReg;
pub use crate::components::raster_regs::named_types::vertex_reg::VertexReg;

/// Tile origin (write).
pub const TILE: u8 = 0x0;
/// Current patch position (read).
pub const POSITION: u8 = 0x0;
/// First vertex (write).
pub const VERTEX1: u8 = 0x2;
/// Mask and status flags (read).
pub const STATUS: u8 = 0x2;
/// Second vertex (write).
pub const VERTEX2: u8 = 0x4;
/// Third vertex (write).
pub const VERTEX3: u8 = 0x6;
/// Start on write, advance on read.
pub const STROBE: u8 = 0x8;

/// Offset field width mask.
pub const OFFSET_MASK: u8 = 0xF;
/// Context select width mask.
pub const CONTEXT_MASK: u8 = 0x3;

const SELECT_OFFSET: usize = 1;
const SELECT_MASK: u8 = 0x3;
const CONTEXT_OFFSET: usize = 4;

/// Register picked by offset bits [2:1].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegSelect {
    /// TILE on write, POSITION on read.
    Tile = 0,
    /// VERTEX1 on write, STATUS on read.
    Vertex1 = 1,
    Vertex2 = 2,
    Vertex3 = 3,
}

impl RegSelect {
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & SELECT_MASK {
            0 => Self::Tile,
            1 => Self::Vertex1,
            2 => Self::Vertex2,
            _ => Self::Vertex3,
        }
    }

    /// The bit pattern of the variant
    #[must_use]
    pub const fn bits(&self) -> u8 {
        *self as u8
    }
}

/// A decoded port address: context select plus register offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegAddr {
    context: u8,
    offset: u8,
}

impl RegAddr {
    /// Both fields are truncated to their hardware widths.
    #[must_use]
    pub const fn new(context: u8, offset: u8) -> Self {
        Self {
            context: context & CONTEXT_MASK,
            offset: offset & OFFSET_MASK,
        }
    }

    /// Decode a 6-bit bus address: context in [5:4], offset in [3:0].
    #[must_use]
    pub const fn from_bus(addr: u8) -> Self {
        Self::new(addr >> CONTEXT_OFFSET, addr)
    }

    #[must_use]
    pub const fn to_bus(&self) -> u8 {
        (self.context << CONTEXT_OFFSET) | self.offset
    }

    #[must_use]
    pub const fn context(&self) -> u8 {
        self.context
    }

    #[must_use]
    pub const fn offset(&self) -> u8 {
        self.offset
    }

    #[must_use]
    pub const fn select(&self) -> RegSelect {
        RegSelect::from_bits(self.offset >> SELECT_OFFSET)
    }

    #[must_use]
    pub const fn strobe(&self) -> bool {
        self.offset & STROBE != 0
    }

    /// Same register with the strobe bit set.
    #[must_use]
    pub const fn with_strobe(&self) -> Self {
        Self::new(self.context, self.offset | STROBE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_offsets() {
        assert_eq!(RegAddr::new(0, TILE).select(), RegSelect::Tile);
        assert_eq!(RegAddr::new(0, VERTEX1).select(), RegSelect::Vertex1);
        assert_eq!(RegAddr::new(0, VERTEX2).select(), RegSelect::Vertex2);
        assert_eq!(RegAddr::new(0, VERTEX3).select(), RegSelect::Vertex3);
        // Bit 0 is ignored.
        assert_eq!(RegAddr::new(0, VERTEX2 | 1).select(), RegSelect::Vertex2);
    }

    #[test]
    fn strobe_bit() {
        let a = RegAddr::new(2, STATUS);
        assert!(!a.strobe());
        let s = a.with_strobe();
        assert!(s.strobe());
        assert_eq!(s.select(), RegSelect::Vertex1);
        assert_eq!(s.offset(), 0xA);
    }

    #[test]
    fn bus_address_round_trip() {
        let a = RegAddr::new(3, VERTEX3 | STROBE);
        assert_eq!(a.to_bus(), 0x3E);
        assert_eq!(RegAddr::from_bus(0x3E), a);
    }

    #[test]
    fn context_truncated() {
        assert_eq!(RegAddr::new(5, 0).context(), 1);
        assert_eq!(RegAddr::new(0, 0x1F).offset(), 0xF);
    }
}
