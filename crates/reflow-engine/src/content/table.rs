use serde::{Deserialize, Serialize};

use crate::content::document::{ElementData, FlowDocument, NodeId};
use crate::content::error::ContentError;
use crate::content::style::{Border, Rgb};

/// Handle to a table node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(pub(crate) NodeId);

impl From<TableId> for NodeId {
    fn from(id: TableId) -> NodeId {
        id.0
    }
}

/// Handle to a table row node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableRowId(pub(crate) NodeId);

impl From<TableRowId> for NodeId {
    fn from(id: TableRowId) -> NodeId {
        id.0
    }
}

/// Handle to a table cell node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableCellId(pub(crate) NodeId);

impl From<TableCellId> for NodeId {
    fn from(id: TableCellId) -> NodeId {
        id.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Middle,
    Right,
}

/// A table: an ordered sequence of rows forming a rectangular grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    default_column_width: f64,
    default_row_height: f64,
    border: Option<Border>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            default_column_width: 72.0,
            default_row_height: 12.0,
            border: None,
        }
    }
}

impl Table {
    pub fn set_default_column_width(&mut self, points: f64) {
        self.default_column_width = points;
    }

    pub fn default_column_width(&self) -> f64 {
        self.default_column_width
    }

    pub fn set_default_row_height(&mut self, points: f64) {
        self.default_row_height = points;
    }

    pub fn default_row_height(&self) -> f64 {
        self.default_row_height
    }

    pub fn set_border(&mut self, thickness: f64, r: u8, g: u8, b: u8) {
        self.border = Some(Border {
            thickness,
            color: Rgb::new(r, g, b),
        });
    }

    pub fn border(&self) -> Option<Border> {
        self.border
    }
}

/// A row of cells. Height falls back to the table default when unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    height: Option<f64>,
}

impl TableRow {
    pub fn set_row_height(&mut self, points: f64) {
        self.height = Some(points);
    }

    pub fn row_height(&self) -> Option<f64> {
        self.height
    }
}

/// A cell of a table.
///
/// A merged cell covers `col_span` × `row_span` slots of the grid; the
/// absorbed cells are detached from the tree and their former coordinates
/// resolve to the covering cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    col_span: u32,
    row_span: u32,
    border: Option<Border>,
    background_color: Option<Rgb>,
    vertical_alignment: VerticalAlignment,
    horizontal_alignment: HorizontalAlignment,
}

impl Default for TableCell {
    fn default() -> Self {
        Self {
            col_span: 1,
            row_span: 1,
            border: None,
            background_color: None,
            vertical_alignment: VerticalAlignment::default(),
            horizontal_alignment: HorizontalAlignment::default(),
        }
    }
}

impl TableCell {
    /// Number of original grid columns this cell covers.
    pub fn col_span(&self) -> u32 {
        self.col_span
    }

    /// Number of original grid rows this cell covers.
    pub fn row_span(&self) -> u32 {
        self.row_span
    }

    pub fn set_border(&mut self, thickness: f64, r: u8, g: u8, b: u8) {
        self.border = Some(Border {
            thickness,
            color: Rgb::new(r, g, b),
        });
    }

    pub fn border(&self) -> Option<Border> {
        self.border
    }

    pub fn set_background_color(&mut self, r: u8, g: u8, b: u8) {
        self.background_color = Some(Rgb::new(r, g, b));
    }

    pub fn background_color(&self) -> Option<Rgb> {
        self.background_color
    }

    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) {
        self.vertical_alignment = alignment;
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    pub fn set_horizontal_alignment(&mut self, alignment: HorizontalAlignment) {
        self.horizontal_alignment = alignment;
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }
}

impl FlowDocument {
    /// Append a row to a table.
    pub fn add_row(&mut self, table: TableId) -> Result<TableRowId, ContentError> {
        let id = self.alloc(table.into(), ElementData::TableRow(TableRow::default()))?;
        Ok(TableRowId(id))
    }

    /// Append a cell to a row.
    pub fn add_cell(&mut self, row: TableRowId) -> Result<TableCellId, ContentError> {
        let id = self.alloc(row.into(), ElementData::TableCell(TableCell::default()))?;
        Ok(TableCellId(id))
    }

    pub fn table(&self, id: TableId) -> &Table {
        match &self.slot(id.into()).data {
            ElementData::Table(table) => table,
            _ => unreachable!("table handle refers to a non-table node"),
        }
    }

    pub fn table_mut(&mut self, id: TableId) -> &mut Table {
        match &mut self.slot_mut(id.into()).data {
            ElementData::Table(table) => table,
            _ => unreachable!("table handle refers to a non-table node"),
        }
    }

    pub fn table_row(&self, id: TableRowId) -> &TableRow {
        match &self.slot(id.into()).data {
            ElementData::TableRow(row) => row,
            _ => unreachable!("row handle refers to a non-row node"),
        }
    }

    pub fn table_row_mut(&mut self, id: TableRowId) -> &mut TableRow {
        match &mut self.slot_mut(id.into()).data {
            ElementData::TableRow(row) => row,
            _ => unreachable!("row handle refers to a non-row node"),
        }
    }

    pub fn table_cell(&self, id: TableCellId) -> &TableCell {
        match &self.slot(id.into()).data {
            ElementData::TableCell(cell) => cell,
            _ => unreachable!("cell handle refers to a non-cell node"),
        }
    }

    pub fn table_cell_mut(&mut self, id: TableCellId) -> &mut TableCell {
        match &mut self.slot_mut(id.into()).data {
            ElementData::TableCell(cell) => cell,
            _ => unreachable!("cell handle refers to a non-cell node"),
        }
    }

    /// Occupancy grid of a table: `grid[row][col]` is the cell covering
    /// that slot, `None` for slots past the end of a short row. Merged
    /// cells appear once per covered slot.
    pub fn table_grid(
        &self,
        table: TableId,
    ) -> Result<Vec<Vec<Option<TableCellId>>>, ContentError> {
        let rows: Vec<NodeId> = self.children(table).to_vec();
        let mut grid: Vec<Vec<Option<TableCellId>>> = vec![Vec::new(); rows.len()];

        for (r, &row) in rows.iter().enumerate() {
            let mut c = 0;
            for &child in self.children(row) {
                let cell = self
                    .element(child)
                    .ok_or(ContentError::DetachedNode)?
                    .expect_table_cell()?;
                // Skip slots claimed by row spans from rows above.
                while grid[r].get(c).is_some_and(|slot| slot.is_some()) {
                    c += 1;
                }
                let data = self.table_cell(cell);
                let width = data.col_span() as usize;
                let height = data.row_span() as usize;
                for covered_row in grid.iter_mut().skip(r).take(height) {
                    for cc in c..c + width {
                        if covered_row.len() <= cc {
                            covered_row.resize(cc + 1, None);
                        }
                        covered_row[cc] = Some(cell);
                    }
                }
                c += width;
            }
        }
        Ok(grid)
    }

    /// Resolve (row, column) coordinates to the covering cell.
    ///
    /// Coordinates inside a merged region resolve to the merge survivor,
    /// so absorbed cells are not independently addressable. Coordinates
    /// outside the grid error with [`ContentError::CellOutOfRange`].
    pub fn cell_at(
        &self,
        table: TableId,
        row: usize,
        col: usize,
    ) -> Result<TableCellId, ContentError> {
        self.table_grid(table)?
            .get(row)
            .and_then(|cols| cols.get(col).copied().flatten())
            .ok_or(ContentError::CellOutOfRange { row, col })
    }

    /// Number of columns in the table's conceptual grid.
    pub fn column_count(&self, table: TableId) -> Result<usize, ContentError> {
        Ok(self
            .table_grid(table)?
            .iter()
            .map(|cols| cols.len())
            .max()
            .unwrap_or(0))
    }

    /// Absorb the `span` cells to the right of `cell` into it.
    ///
    /// The survivor's horizontal span grows to `span + 1` original
    /// columns; absorbed content is appended to the survivor in order and
    /// the absorbed nodes are detached. Targets past the edge of the grid
    /// error with [`ContentError::CellOutOfRange`]; merging across a cell
    /// that is already part of a merge errors with
    /// [`ContentError::MergeConflict`].
    pub fn merge_right(
        &mut self,
        cell: TableCellId,
        span: u32,
    ) -> Result<TableCellId, ContentError> {
        self.ensure_attached(cell.into())?;
        if span == 0 {
            return Ok(cell);
        }
        let (table, row, col) = self.locate_cell(cell)?;
        let grid = self.table_grid(table)?;
        if self.table_cell(cell).col_span != 1 || self.table_cell(cell).row_span != 1 {
            return Err(ContentError::MergeConflict { row, col });
        }

        let mut absorbed = Vec::new();
        for step in 1..=span as usize {
            let target_col = col + step;
            let target = grid[row]
                .get(target_col)
                .copied()
                .flatten()
                .ok_or(ContentError::CellOutOfRange {
                    row,
                    col: target_col,
                })?;
            let data = self.table_cell(target);
            if data.col_span != 1 || data.row_span != 1 {
                return Err(ContentError::MergeConflict {
                    row,
                    col: target_col,
                });
            }
            absorbed.push(target);
        }

        for target in absorbed {
            self.reparent_children(target.into(), cell.into());
            self.detach(target.into());
        }
        self.table_cell_mut(cell).col_span = span + 1;
        Ok(cell)
    }

    /// Absorb the `span` cells below `cell` into it; the vertical analogue
    /// of [`merge_right`](FlowDocument::merge_right).
    pub fn merge_down(&mut self, cell: TableCellId, span: u32) -> Result<TableCellId, ContentError> {
        self.ensure_attached(cell.into())?;
        if span == 0 {
            return Ok(cell);
        }
        let (table, row, col) = self.locate_cell(cell)?;
        let grid = self.table_grid(table)?;
        if self.table_cell(cell).col_span != 1 || self.table_cell(cell).row_span != 1 {
            return Err(ContentError::MergeConflict { row, col });
        }

        let mut absorbed = Vec::new();
        for step in 1..=span as usize {
            let target_row = row + step;
            let target = grid
                .get(target_row)
                .and_then(|cols| cols.get(col).copied().flatten())
                .ok_or(ContentError::CellOutOfRange {
                    row: target_row,
                    col,
                })?;
            let data = self.table_cell(target);
            if data.col_span != 1 || data.row_span != 1 {
                return Err(ContentError::MergeConflict {
                    row: target_row,
                    col,
                });
            }
            absorbed.push(target);
        }

        for target in absorbed {
            self.reparent_children(target.into(), cell.into());
            self.detach(target.into());
        }
        self.table_cell_mut(cell).row_span = span + 1;
        Ok(cell)
    }

    /// Anchor coordinates of a cell: the first grid slot it covers.
    fn locate_cell(&self, cell: TableCellId) -> Result<(TableId, usize, usize), ContentError> {
        let row = self.parent(cell).ok_or(ContentError::DetachedNode)?;
        let table = self
            .parent(row)
            .and_then(|node| self.element(node))
            .and_then(|el| el.as_table())
            .ok_or(ContentError::DetachedNode)?;
        let grid = self.table_grid(table)?;
        for (r, cols) in grid.iter().enumerate() {
            for (c, slot) in cols.iter().enumerate() {
                if *slot == Some(cell) {
                    return Ok((table, r, c));
                }
            }
        }
        Err(ContentError::DetachedNode)
    }
}
