//! Headless model of the data table.
//!
//! Column and action descriptors are declared by the page; [`TableBody::build`]
//! decides what the body shows so the widget only has to paint it.

use std::fmt;

use thiserror::Error;
use ustr::Ustr;

use crate::SortDirection;

pub const EMPTY_MESSAGE: &str = "Nenhum registro encontrado";
pub const ACTIONS_HEADER: &str = "Ações";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Raw value read from a row by a column accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Number(i64),
    Missing,
}

impl CellValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
            Self::Missing => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Option<&str>> for CellValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Missing, Self::from)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

pub type Accessor<T> = fn(&T) -> CellValue;
pub type Renderer<T> = fn(&CellValue, &T) -> String;

/// One column: where its value comes from and how it is shown.
pub struct Column<T> {
    pub key: &'static str,
    pub label: &'static str,
    pub align: Align,
    pub accessor: Accessor<T>,
    pub render: Option<Renderer<T>>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            label: self.label,
            align: self.align,
            accessor: self.accessor,
            render: self.render,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("align", &self.align)
            .field("render", &self.render.is_some())
            .finish()
    }
}

impl<T> Column<T> {
    pub fn new(key: &'static str, label: &'static str, accessor: Accessor<T>) -> Self {
        Self {
            key,
            label,
            align: Align::Left,
            accessor,
            render: None,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn render(mut self, render: Renderer<T>) -> Self {
        self.render = Some(render);
        self
    }

    /// Text of this column's cell for `row`.
    pub fn display(&self, row: &T) -> String {
        let value = (self.accessor)(row);
        match self.render {
            Some(render) => render(&value, row),
            None => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("duplicate column key `{0}`")]
    DuplicateColumnKey(&'static str),
}

/// A column set whose keys are unique.
pub struct Columns<T>(Vec<Column<T>>);

impl<T> Columns<T> {
    pub fn new(columns: Vec<Column<T>>) -> Result<Self, TableError> {
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.key == column.key) {
                return Err(TableError::DuplicateColumnKey(column.key));
            }
        }
        Ok(Self(columns))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column<T>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> Clone for Columns<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> fmt::Debug for Columns<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a Columns<T> {
    type Item = &'a Column<T>;
    type IntoIter = std::slice::Iter<'a, Column<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Color tag of an action; the widget maps it to a palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionColor {
    Blue,
    Red,
}

/// A row-level operation. The handler is a side-effect trigger; nothing it
/// does is read back by the table.
pub struct Action<'a, T> {
    pub icon: &'static str,
    pub label: &'static str,
    pub color: Option<ActionColor>,
    handler: Box<dyn Fn(&T) + 'a>,
}

impl<'a, T> Action<'a, T> {
    pub fn new(icon: &'static str, label: &'static str, handler: impl Fn(&T) + 'a) -> Self {
        Self {
            icon,
            label,
            color: None,
            handler: Box::new(handler),
        }
    }

    pub fn color(mut self, color: ActionColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn invoke(&self, row: &T) {
        (self.handler)(row);
    }
}

impl<T> fmt::Debug for Action<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("icon", &self.icon)
            .field("label", &self.label)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

/// How the action column is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActionLayout {
    /// One icon button per action.
    Inline,
    /// A single trigger opening a menu with every action.
    #[default]
    Menu,
}

/// Active sort column and its direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<Ustr>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: &str, direction: SortDirection) -> Self {
        Self {
            column: Some(Ustr::from(column)),
            direction,
        }
    }

    /// Direction to show next to `key`, if it is the active column.
    pub fn indicator_for(&self, key: &str) -> Option<SortDirection> {
        self.column
            .filter(|column| column.as_str() == key)
            .map(|_| self.direction)
    }
}

/// Overflow menu visibility of one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowMenu {
    #[default]
    Closed,
    OpenForRow(usize),
}

impl RowMenu {
    pub fn is_open_for(&self, index: usize) -> bool {
        *self == Self::OpenForRow(index)
    }

    /// Clicking a row's trigger opens its menu or closes it when already open.
    pub fn toggled(self, index: usize) -> Self {
        if self.is_open_for(index) {
            Self::Closed
        } else {
            Self::OpenForRow(index)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCells {
    pub index: usize,
    pub cells: Vec<Cell>,
}

/// What the table body shows for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// A single progress indicator spanning `span` columns.
    Loading { span: usize },
    /// A single [`EMPTY_MESSAGE`] spanning `span` columns.
    Empty { span: usize },
    Rows(Vec<RowCells>),
}

impl TableBody {
    pub fn build<T>(rows: &[T], columns: &Columns<T>, loading: bool, has_actions: bool) -> Self {
        let span = columns.len() + usize::from(has_actions);
        if loading {
            return Self::Loading { span };
        }
        if rows.is_empty() {
            return Self::Empty { span };
        }
        Self::Rows(
            rows.iter()
                .enumerate()
                .map(|(index, row)| RowCells {
                    index,
                    cells: columns
                        .iter()
                        .map(|column| Cell {
                            text: column.display(row),
                            align: column.align,
                        })
                        .collect(),
                })
                .collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        match self {
            Self::Rows(rows) => rows.len(),
            _ => 0,
        }
    }
}
