//! Corridor environment model.
//!
//! The corridor is a fixed, circular sequence of cells, each of which is either a wall or a
//! door. The robot moves forward one cell at a time and the last cell connects back to the
//! first, so every index is taken modulo the corridor length.
//!
//! Corridors can be built from a list of labels, parsed from a compact layout string such
//! as `"WWDWDWDDWW"`, or taken from one of the [`CorridorLayout`] presets.
//!
//! ```
//! use markov::corridor::{CellLabel, Corridor};
//!
//! let corridor: Corridor = "WWD".parse().unwrap();
//! assert_eq!(corridor.len(), 3);
//! assert_eq!(corridor.label_at(2), CellLabel::Door);
//! assert_eq!(corridor.label_at(5), CellLabel::Door); // wraps around
//! ```
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// What the robot can see in a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellLabel {
    Wall,
    Door,
}
impl CellLabel {
    /// Every label, in a fixed order.
    pub const ALL: [CellLabel; 2] = [CellLabel::Wall, CellLabel::Door];

    /// The other label. A sensor that misreads a cell reports this.
    pub fn opposite(self) -> CellLabel {
        match self {
            CellLabel::Wall => CellLabel::Door,
            CellLabel::Door => CellLabel::Wall,
        }
    }
    /// Single character form used in layout strings.
    pub fn symbol(self) -> char {
        match self {
            CellLabel::Wall => 'W',
            CellLabel::Door => 'D',
        }
    }
    pub fn from_symbol(symbol: char) -> Option<CellLabel> {
        match symbol.to_ascii_uppercase() {
            'W' => Some(CellLabel::Wall),
            'D' => Some(CellLabel::Door),
            _ => None,
        }
    }
}
impl Display for CellLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellLabel::Wall => write!(f, "wall"),
            CellLabel::Door => write!(f, "door"),
        }
    }
}

/// A circular corridor of wall and door cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Corridor {
    cells: Vec<CellLabel>,
}
impl Corridor {
    /// Build a corridor from its cells. Fails if `cells` is empty.
    pub fn new(cells: Vec<CellLabel>) -> ConfigResult<Corridor> {
        if cells.is_empty() {
            return Err(ConfigError::EmptyCorridor);
        }
        Ok(Corridor { cells })
    }
    /// Number of cells, N.
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    /// Always false; a corridor cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    /// Label of the cell at `index mod N`.
    pub fn label_at(&self, index: usize) -> CellLabel {
        self.cells[index % self.cells.len()]
    }
    /// Index of the cell the robot comes from when it moves into `index`.
    pub fn predecessor(&self, index: usize) -> usize {
        let n = self.cells.len();
        (index % n + n - 1) % n
    }
    /// Index of the cell the robot reaches by moving forward from `index`.
    pub fn successor(&self, index: usize) -> usize {
        (index + 1) % self.cells.len()
    }
    /// Number of cells carrying `label`.
    pub fn count(&self, label: CellLabel) -> usize {
        self.cells.iter().filter(|&&cell| cell == label).count()
    }
    pub fn iter(&self) -> impl Iterator<Item = CellLabel> + '_ {
        self.cells.iter().copied()
    }
    pub fn cells(&self) -> &[CellLabel] {
        &self.cells
    }
}
impl Display for Corridor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell.symbol())?;
        }
        Ok(())
    }
}
impl FromStr for Corridor {
    type Err = ConfigError;

    /// Parse a layout string of `W`/`D` characters. Whitespace and commas are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(s.len());
        for (position, symbol) in s.chars().enumerate() {
            if symbol.is_whitespace() || symbol == ',' {
                continue;
            }
            match CellLabel::from_symbol(symbol) {
                Some(label) => cells.push(label),
                None => return Err(ConfigError::InvalidCellLabel { symbol, position }),
            }
        }
        Corridor::new(cells)
    }
}

/// Named corridor layouts.
///
/// Serialized with a `kind` tag so a configuration file can read, for example,
/// `layout = { kind = "single_door", length = 12 }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CorridorLayout {
    /// The hallway of Figure 1.1 in _Probabilistic Robotics_: three doors along thirty cells.
    Textbook,
    /// Ten cells with four doors, two of them adjacent. Small enough to read a trace by eye.
    #[default]
    Debug,
    /// A single door at index 0 followed by `length - 1` walls.
    SingleDoor { length: usize },
    /// An explicit layout string such as `"WWDWD"`.
    Custom { cells: String },
}
impl CorridorLayout {
    pub fn build(&self) -> ConfigResult<Corridor> {
        use CellLabel::{Door, Wall};
        match self {
            CorridorLayout::Textbook => {
                let mut cells = vec![Wall; 8];
                cells.extend([Door, Wall, Door]);
                cells.extend(vec![Wall; 10]);
                cells.push(Door);
                cells.extend(vec![Wall; 8]);
                Corridor::new(cells)
            }
            CorridorLayout::Debug => {
                Corridor::new(vec![Wall, Wall, Door, Wall, Door, Wall, Door, Door, Wall, Wall])
            }
            CorridorLayout::SingleDoor { length } => {
                if *length == 0 {
                    return Err(ConfigError::EmptyCorridor);
                }
                let mut cells = vec![Wall; *length];
                cells[0] = Door;
                Corridor::new(cells)
            }
            CorridorLayout::Custom { cells } => cells.parse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_corridor_is_rejected() {
        assert_eq!(Corridor::new(vec![]), Err(ConfigError::EmptyCorridor));
        assert_eq!("".parse::<Corridor>(), Err(ConfigError::EmptyCorridor));
        assert_eq!(" , ".parse::<Corridor>(), Err(ConfigError::EmptyCorridor));
    }

    #[test]
    fn test_label_lookup_wraps_around() {
        let corridor: Corridor = "WDW".parse().unwrap();
        assert_eq!(corridor.label_at(1), CellLabel::Door);
        assert_eq!(corridor.label_at(4), CellLabel::Door);
        assert_eq!(corridor.label_at(3_000_001), CellLabel::Door);
        assert_eq!(corridor.predecessor(0), 2);
        assert_eq!(corridor.successor(2), 0);
    }

    #[test]
    fn test_single_cell_corridor_is_its_own_neighbour() {
        let corridor: Corridor = "d".parse().unwrap();
        assert_eq!(corridor.predecessor(0), 0);
        assert_eq!(corridor.successor(0), 0);
    }

    #[test]
    fn test_parse_ignores_separators_and_rejects_unknown_symbols() {
        let corridor: Corridor = "W, w D\nd".parse().unwrap();
        assert_eq!(corridor.to_string(), "WWDD");
        assert_eq!(
            "WWX".parse::<Corridor>(),
            Err(ConfigError::InvalidCellLabel {
                symbol: 'X',
                position: 2
            })
        );
    }

    #[test]
    fn test_presets_have_expected_shape() {
        let textbook = CorridorLayout::Textbook.build().unwrap();
        assert_eq!(textbook.len(), 30);
        assert_eq!(textbook.count(CellLabel::Door), 3);
        assert_eq!(textbook.label_at(8), CellLabel::Door);
        assert_eq!(textbook.label_at(10), CellLabel::Door);
        assert_eq!(textbook.label_at(21), CellLabel::Door);

        let debug = CorridorLayout::Debug.build().unwrap();
        assert_eq!(debug.to_string(), "WWDWDWDDWW");

        let single = CorridorLayout::SingleDoor { length: 5 }.build().unwrap();
        assert_eq!(single.to_string(), "DWWWW");
        assert!(CorridorLayout::SingleDoor { length: 0 }.build().is_err());
    }

    #[test]
    fn test_labels_render_as_trace_tokens() {
        assert_eq!(CellLabel::Wall.to_string(), "wall");
        assert_eq!(CellLabel::Door.to_string(), "door");
        assert_eq!(CellLabel::Wall.opposite(), CellLabel::Door);
    }
}
