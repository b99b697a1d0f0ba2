/// Single coordinate axis used for the board side length and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Row-major flat index of `coords` on a square board of side `side`.
pub const fn flat_index(coords: Coord2, side: Coord) -> CellCount {
    coords.0 as CellCount * side as CellCount + coords.1 as CellCount
}

/// Inverse of [`flat_index`].
pub const fn from_flat_index(index: CellCount, side: Coord) -> Coord2 {
    let side = side as CellCount;
    ((index / side) as Coord, (index % side) as Coord)
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The up to 8 cells touching `center` on a square board of side `side`, in row-major order.
pub fn neighbors(center: Coord2, side: Coord) -> impl Iterator<Item = Coord2> + use<> {
    let (row, col) = center;
    OFFSETS.into_iter().filter_map(move |(d_row, d_col)| {
        let row = row.checked_add_signed(d_row).filter(|&row| row < side)?;
        let col = col.checked_add_signed(d_col).filter(|&col| col < side)?;
        Some((row, col))
    })
}
