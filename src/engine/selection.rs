//! Two-click tile selection.

use crate::core::Position;

/// Turns a stream of tile clicks into swap requests.
///
/// The first click selects a tile. Clicking it again deselects it. Clicking
/// any other tile yields the pair and clears the selection, whether or not
/// the engine then accepts the swap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileSelection {
    selected: Option<Position>,
}

impl TileSelection {
    /// Create a selection with nothing picked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected tile.
    #[must_use]
    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Register a click. Returns a swap request once two tiles are picked.
    pub fn click(&mut self, pos: Position) -> Option<(Position, Position)> {
        match self.selected.take() {
            None => {
                self.selected = Some(pos);
                None
            }
            Some(first) if first == pos => None,
            Some(first) => Some((first, pos)),
        }
    }

    /// Drop any selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_selects_nothing() {
        assert_eq!(TileSelection::new().selected(), None);
    }

    #[test]
    fn test_two_clicks_make_a_request() {
        let mut sel = TileSelection::new();
        assert_eq!(sel.click(Position::new(1, 1)), None);
        assert_eq!(sel.selected(), Some(Position::new(1, 1)));

        assert_eq!(
            sel.click(Position::new(1, 2)),
            Some((Position::new(1, 1), Position::new(1, 2)))
        );
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn test_same_tile_deselects() {
        let mut sel = TileSelection::new();
        sel.click(Position::new(0, 0));
        assert_eq!(sel.click(Position::new(0, 0)), None);
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn test_far_tiles_still_form_a_request() {
        let mut sel = TileSelection::new();
        sel.click(Position::new(0, 0));
        assert_eq!(
            sel.click(Position::new(4, 4)),
            Some((Position::new(0, 0), Position::new(4, 4)))
        );
    }

    #[test]
    fn test_clear() {
        let mut sel = TileSelection::new();
        sel.click(Position::new(2, 3));
        sel.clear();
        assert_eq!(sel.selected(), None);
    }
}
