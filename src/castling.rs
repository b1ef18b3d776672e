use crate::piece::Color;
use crate::piece::Color::{Black, White};
use std::fmt::{Display, Formatter};

/// Castling availability, as written in the third FEN field.
///
/// The board does not store these bits: they are a view over the
/// `has_moved` flags of the kings and corner rooks.
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);

    pub fn from_str(s: &str) -> CastlingRights {
        let mut res = CastlingRights(0);
        if s.contains('K') {
            res.0 |= 0b1000
        }
        if s.contains('Q') {
            res.0 |= 0b0100
        }
        if s.contains('k') {
            res.0 |= 0b0010
        }
        if s.contains('q') {
            res.0 |= 0b0001
        }
        res
    }

    /// Returns the (kingside, queenside) castling rights of a given color
    pub fn get(&self, side: Color) -> (bool, bool) {
        match side {
            White => (self.0 & 0b1000 != 0, self.0 & 0b0100 != 0),
            Black => (self.0 & 0b10 != 0, self.0 & 0b01 != 0),
        }
    }
    pub fn grant_kingside(&mut self, side: Color) {
        self.0 |= match side {
            White => 0b1000,
            Black => 0b0010,
        }
    }
    pub fn grant_queenside(&mut self, side: Color) {
        self.0 |= match side {
            White => 0b0100,
            Black => 0b0001,
        }
    }
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl Display for CastlingRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        let (wking, wqueen) = self.get(White);
        let (bking, bqueen) = self.get(Black);
        write!(
            f,
            "{}{}{}{}",
            if wking { "K" } else { "" },
            if wqueen { "Q" } else { "" },
            if bking { "k" } else { "" },
            if bqueen { "q" } else { "" }
        )
    }
}
