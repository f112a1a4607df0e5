//! Client-side table filtering for admin list pages.
//!
//! Small-scale on purpose: every row is already on the page, so a
//! keystroke just recomputes per-row visibility with a case-insensitive
//! substring match over the row's full text. No pagination, no
//! virtualization, no debounce.

/// One `<tbody>` row and its visibility.
#[derive(Debug, Clone)]
pub struct TableRow {
    /// The row's full text content, all columns concatenated.
    pub text: String,
    /// Whether the row is currently displayed.
    pub visible: bool,
}

/// A filterable table.
#[derive(Debug, Clone)]
pub struct DataTable {
    id: String,
    rows: Vec<TableRow>,
}

impl DataTable {
    /// Create an empty table.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            rows: Vec::new(),
        }
    }

    /// Add a row; all rows start visible.
    #[must_use]
    pub fn row(mut self, text: &str) -> Self {
        self.rows.push(TableRow {
            text: text.to_string(),
            visible: true,
        });
        self
    }

    /// Table identifier, matching the search input's `data-table`
    /// attribute.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Recompute visibility for a search query.
    ///
    /// Case-insensitive substring match over each row's full text,
    /// recomputed from the complete row set on every call; the empty
    /// query shows everything.
    pub fn search(&mut self, query: &str) {
        let filter = query.to_lowercase();
        for row in &mut self.rows {
            row.visible = row.text.to_lowercase().contains(&filter);
        }
    }

    /// All rows, in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Text of the rows currently displayed.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.visible)
            .map(|row| row.text.as_str())
            .collect()
    }
}

/// The tables on a page, addressed by id.
///
/// Search inputs name their table through a `data-table` attribute; a
/// keystroke routed to an id with no table is a no-op, matching a page
/// that renders the input but not the table.
#[derive(Debug, Default)]
pub struct TableSet {
    tables: Vec<DataTable>,
}

impl TableSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table, replacing any previous one with the same id.
    pub fn insert(&mut self, table: DataTable) {
        self.tables.retain(|t| t.id != table.id);
        self.tables.push(table);
    }

    /// Look up a table.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DataTable> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// Route one keystroke to the table bound to `id`.
    ///
    /// Returns whether a table was found; `false` means nothing
    /// happened.
    pub fn search(&mut self, id: &str, query: &str) -> bool {
        match self.tables.iter_mut().find(|t| t.id == id) {
            Some(table) => {
                table.search(query);
                true
            }
            None => false,
        }
    }
}
