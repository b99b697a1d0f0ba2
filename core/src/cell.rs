use serde::{Deserialize, Serialize};

/// What lies under a cell once the minefield has been generated.
///
/// `Detonated` and `WrongFlag` only appear after a loss and exist for display.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    /// Safe cell with the number of adjacent mines.
    Empty(u8),
    Mine,
    /// The mine that ended the game.
    Detonated,
    /// A flag that was placed on a safe cell.
    WrongFlag,
}

impl CellContent {
    /// Whether the cell holds a mine, including the detonated one.
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine | Self::Detonated)
    }

    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Empty(count) => Some(count),
            _ => None,
        }
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Empty(0)
    }
}

/// Player marker on an unopened cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagState {
    None,
    Flagged,
    Questioned,
}

impl FlagState {
    /// Next marker in the `None -> Flagged -> Questioned -> None` cycle.
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::Flagged,
            Self::Flagged => Self::Questioned,
            Self::Questioned => Self::None,
        }
    }

    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

impl Default for FlagState {
    fn default() -> Self {
        Self::None
    }
}

/// Player-visible state of a single cell, as a front end would draw it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Questioned,
    Open(u8),
    Mine,
    Detonated,
    WrongFlag,
}

impl CellView {
    // whether the cell is visually closed
    pub const fn is_closed(self) -> bool {
        use CellView::*;
        match self {
            Hidden => true,
            Flagged => true,
            Questioned => true,
            Open(_) => false,
            Mine => false,
            Detonated => false,
            WrongFlag => false,
        }
    }
}

impl From<CellContent> for CellView {
    fn from(content: CellContent) -> Self {
        match content {
            CellContent::Empty(count) => CellView::Open(count),
            CellContent::Mine => CellView::Mine,
            CellContent::Detonated => CellView::Detonated,
            CellContent::WrongFlag => CellView::WrongFlag,
        }
    }
}

impl From<FlagState> for CellView {
    fn from(flag: FlagState) -> Self {
        match flag {
            FlagState::None => CellView::Hidden,
            FlagState::Flagged => CellView::Flagged,
            FlagState::Questioned => CellView::Questioned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_state_cycles_through_three_markers() {
        let mut flag = FlagState::default();
        let mut seen = [FlagState::None; 4];
        for slot in seen.iter_mut() {
            *slot = flag;
            flag = flag.next();
        }

        assert_eq!(
            seen,
            [
                FlagState::None,
                FlagState::Flagged,
                FlagState::Questioned,
                FlagState::None
            ]
        );
    }

    #[test]
    fn detonated_counts_as_mine() {
        assert!(CellContent::Detonated.is_mine());
        assert!(CellContent::Mine.is_mine());
        assert!(!CellContent::WrongFlag.is_mine());
        assert!(!CellContent::Empty(3).is_mine());
    }

    #[test]
    fn only_safe_cells_carry_a_count() {
        assert_eq!(CellContent::Empty(0).adjacent_mines(), Some(0));
        assert_eq!(CellContent::Empty(8).adjacent_mines(), Some(8));
        assert_eq!(CellContent::Mine.adjacent_mines(), None);
        assert_eq!(CellContent::WrongFlag.adjacent_mines(), None);
    }

    #[test]
    fn markers_stay_closed_and_contents_open() {
        assert!(CellView::from(FlagState::None).is_closed());
        assert!(CellView::from(FlagState::Flagged).is_closed());
        assert!(CellView::from(FlagState::Questioned).is_closed());
        assert!(!CellView::from(CellContent::Empty(2)).is_closed());
        assert!(!CellView::from(CellContent::Detonated).is_closed());
        assert_eq!(CellView::from(CellContent::WrongFlag), CellView::WrongFlag);
    }

    #[test]
    fn view_serializes_as_tagged_variant() {
        let json = serde_json::to_string(&CellView::Open(3)).unwrap();

        assert_eq!(json, r#"{"Open":3}"#);
        assert_eq!(
            serde_json::from_str::<CellView>(r#""WrongFlag""#).unwrap(),
            CellView::WrongFlag
        );
    }
}
