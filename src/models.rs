use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GuiError;

/// 棋盘边长
pub const SIZE: usize = 3;
/// 格子总数
pub const CELLS: usize = SIZE * SIZE;

/// 三连线（行、列、对角线），按行优先下标
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 格子状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// 固定的状态 → 标签映射（渲染器使用）
    pub fn label(self) -> char {
        match self {
            Cell::Empty => '_',
            Cell::X => 'x',
            Cell::O => 'o',
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// 玩家
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    pub fn symbol(self) -> char {
        self.to_cell().label()
    }

    /// 计分位置：X 为 0 号，O 为 1 号
    pub fn slot(self) -> usize {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }
}

/// 格子坐标 (row, col)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Result<Self, GuiError> {
        if row >= SIZE || col >= SIZE {
            return Err(GuiError::InvalidCoordinate { row, col });
        }
        Ok(Self { row, col })
    }

    /// 行优先下标 0..9
    pub fn from_index(index: usize) -> Result<Self, GuiError> {
        if index >= CELLS {
            return Err(GuiError::InvalidCoordinate {
                row: index / SIZE,
                col: index % SIZE,
            });
        }
        Ok(Self {
            row: index / SIZE,
            col: index % SIZE,
        })
    }

    pub fn index(self) -> usize {
        self.row * SIZE + self.col
    }

    /// 按行优先顺序遍历全部九个格子
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELLS).map(|i| Coord {
            row: i / SIZE,
            col: i % SIZE,
        })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// 获胜连线上的格子
pub type WinningFields = HashSet<Coord>;

/// 3x3 棋盘快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从动态长度的行构建棋盘，非 3x3 直接报错
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Result<Self, GuiError> {
        if rows.len() != SIZE {
            return Err(GuiError::InvalidBoardShape {
                rows: rows.len(),
                cols: rows.first().map(|r| r.as_ref().len()).unwrap_or(0),
            });
        }
        let mut board = Board::new();
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != SIZE {
                return Err(GuiError::InvalidBoardShape {
                    rows: rows.len(),
                    cols: cells.len(),
                });
            }
            board.cells[row].copy_from_slice(cells);
        }
        Ok(board)
    }

    pub fn get(&self, coord: Coord) -> Cell {
        self.cells[coord.row][coord.col]
    }

    pub fn set(&mut self, coord: Coord, cell: Cell) {
        self.cells[coord.row][coord.col] = cell;
    }

    /// 在空格落子，格子已被占用时返回 false
    pub fn place(&mut self, coord: Coord, player: Player) -> bool {
        if !self.get(coord).is_empty() {
            return false;
        }
        self.set(coord, player.to_cell());
        true
    }

    pub fn is_full(&self) -> bool {
        Coord::all().all(|c| !self.get(c).is_empty())
    }

    /// 获胜方及所有已完成连线上的格子
    pub fn winner(&self) -> Option<(Player, WinningFields)> {
        let mut fields = WinningFields::new();
        let mut winner = None;
        for line in &WINNING_LINES {
            let first = self.cells[line[0] / SIZE][line[0] % SIZE];
            let player = match first {
                Cell::X => Player::X,
                Cell::O => Player::O,
                Cell::Empty => continue,
            };
            let complete = line
                .iter()
                .all(|&idx| self.cells[idx / SIZE][idx % SIZE] == first);
            if complete {
                winner.get_or_insert(player);
                for &idx in line {
                    fields.insert(Coord {
                        row: idx / SIZE,
                        col: idx % SIZE,
                    });
                }
            }
        }
        winner.map(|p| (p, fields))
    }
}

impl TryFrom<&[Cell]> for Board {
    type Error = GuiError;

    fn try_from(cells: &[Cell]) -> Result<Self, Self::Error> {
        if cells.len() != CELLS {
            return Err(GuiError::InvalidBoardShape {
                rows: cells.len() / SIZE,
                cols: SIZE,
            });
        }
        let mut board = Board::new();
        for (i, &cell) in cells.iter().enumerate() {
            board.cells[i / SIZE][i % SIZE] = cell;
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|c| c.label()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
