use crate::*;
use ndarray::Array2;
pub use random::*;

mod random;

/// Strategy producing the mine mask of a new grid.
///
/// The mask has shape `[height, width]` and is indexed with [`ToNdIndex`].
pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Array2<bool>;
}

/// Places mines on an explicit list of coordinates, duplicates collapse.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator<'a> {
    mines: &'a [Coord2],
}

impl<'a> FixedMinefieldGenerator<'a> {
    pub fn new(mines: &'a [Coord2]) -> Self {
        Self { mines }
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator<'_> {
    fn generate(self, config: GameConfig) -> Array2<bool> {
        let mut mask = Array2::default(config.size().to_nd_index());
        let (width, height) = config.size();
        for &(x, y) in self.mines {
            if x < width && y < height {
                mask[(x, y).to_nd_index()] = true;
            } else {
                log::warn!("Ignoring mine outside of the grid at {:?}", (x, y));
            }
        }
        mask
    }
}
