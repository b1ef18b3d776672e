use crate::error::{ChessError, Result};

/// Squares are indexed from a1 (0) to h8 (63), rank-major
pub type Square = usize;

pub fn rank_of(sq: Square) -> usize {
    sq / 8
}
pub fn file_of(sq: Square) -> usize {
    sq % 8
}
pub fn vertical_symmetry(sq: Square) -> Square {
    8 * (7 - rank_of(sq)) + file_of(sq)
}

/// Builds a square from file and rank coordinates, rejecting anything off the board
/// ```
/// use caissa::square::from_coords;
/// assert_eq!(from_coords(4, 3), Ok(28));
/// assert!(from_coords(8, 0).is_err());
/// assert!(from_coords(0, -1).is_err());
/// ```
pub fn from_coords(file: i32, rank: i32) -> Result<Square> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Ok((rank * 8 + file) as Square)
    } else {
        Err(ChessError::InvalidSquare { file, rank })
    }
}

/// Moves a square by (file, rank) steps, returning None when stepping off the board
/// ```
/// use caissa::square::offset;
/// assert_eq!(offset(0, 1, 2), Some(17));
/// assert_eq!(offset(7, 1, 0), None);
/// ```
pub fn offset(sq: Square, file_step: i32, rank_step: i32) -> Option<Square> {
    from_coords(file_of(sq) as i32 + file_step, rank_of(sq) as i32 + rank_step).ok()
}

/// Parses a square from a given string slice,
/// only caring that the first two characters form a valid square representation
/// ```
/// use caissa::square::parse_square;
/// assert_eq!(parse_square("e4"), Some(28));
/// assert_eq!(parse_square("d2someotherstuff"), Some(11));
/// assert_eq!(parse_square("randoma1stuff"), None);
/// assert_eq!(parse_square("k9"), None);
/// ```
pub fn parse_square(s: &str) -> Option<Square> {
    let mut chars_iter = s.chars();
    let file = match chars_iter.next()? {
        c @ 'a'..='h' => c as usize - 'a' as usize,
        _ => return None,
    };
    let rank = match chars_iter.next()?.to_digit(10) {
        Some(i) if (1..=8).contains(&i) => i as usize - 1,
        _ => return None,
    };
    Some(rank * 8 + file)
}

/// Returns the string representation of a square
/// ```
/// use caissa::square::square_representation;
/// assert_eq!(square_representation(28), Some(String::from("e4")));
/// assert_eq!(square_representation(11), Some(String::from("d2")));
/// assert_eq!(square_representation(65), None);
/// ```
pub fn square_representation(sq: Square) -> Option<String> {
    let rank = ('1'..='8').nth(rank_of(sq))?;
    let file = ('a'..='h').nth(file_of(sq))?;
    let mut repr = file.to_string();
    repr.push(rank);
    Some(repr)
}
