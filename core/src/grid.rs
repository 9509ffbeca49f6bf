use ndarray::Array2;
use std::ops::Index;

use crate::*;

/// Tile matrix with mines placed and adjacency counts computed.
///
/// The shape never changes after construction, only tile visibility does.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    tiles: Array2<Tile>,
    mine_count: CellCount,
}

impl Grid {
    pub fn new(config: GameConfig, generator: impl MinefieldGenerator) -> Result<Self> {
        let config = GameConfig::new(config.height, config.width, config.mines)?;
        Ok(Self::generate(config, generator))
    }

    /// Like [`Grid::new`] for a configuration that was already validated.
    pub(crate) fn generate(config: GameConfig, generator: impl MinefieldGenerator) -> Self {
        Self::from_mine_mask(config, generator.generate(config))
    }

    /// Builds a grid with mines at exactly the given coordinates.
    pub fn from_mine_coords(height: Coord, width: Coord, mines: &[Coord2]) -> Result<Self> {
        if mines.iter().any(|&(x, y)| x >= width || y >= height) {
            return Err(GameError::InvalidCoords);
        }
        let config = GameConfig::new(height, width, 0)?;
        Ok(Self::from_mine_mask(
            config,
            FixedMinefieldGenerator::new(mines).generate(config),
        ))
    }

    fn from_mine_mask(config: GameConfig, mine_mask: Array2<bool>) -> Self {
        let size = config.size();
        let tiles = Array2::from_shape_fn(mine_mask.dim(), |(y, x)| {
            let coords = (x as Coord, y as Coord);
            if mine_mask[coords.to_nd_index()] {
                Tile::new(TileValue::Mine)
            } else {
                let count = NeighborIter::new(coords, size)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count();
                Tile::new(TileValue::Count(count as u8))
            }
        });
        let mine_count = tiles.iter().filter(|tile| tile.is_mine()).count() as CellCount;

        Self { tiles, mine_count }
    }

    /// Bounds as `(width, height)`.
    pub fn size(&self) -> Coord2 {
        let (height, width) = self.tiles.dim();
        (width as Coord, height as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        self.tiles.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        let (width, height) = self.size();
        x < width && y < height
    }

    pub fn tile(&self, coords: Coord2) -> Option<Tile> {
        self.contains(coords).then(|| self[coords])
    }

    pub(crate) fn tile_mut(&mut self, coords: Coord2) -> &mut Tile {
        &mut self.tiles[coords.to_nd_index()]
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Tiles row by row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Tile> + '_> + '_ {
        self.tiles.rows().into_iter().map(|row| row.into_iter().copied())
    }

    pub(crate) fn count_neighbors(&self, coords: Coord2, predicate: impl Fn(Tile) -> bool) -> u8 {
        self.neighbors(coords)
            .filter(|&pos| predicate(self[pos]))
            .count() as u8
    }
}

impl Index<Coord2> for Grid {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}
