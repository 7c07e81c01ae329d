use serde::{Deserialize, Serialize};

/// Largest page a client can ask for in one draw.
pub const MAX_PAGE_LENGTH: i64 = 1000;
const DEFAULT_PAGE_LENGTH: i64 = 10;

/// Query string sent by a DataTables client in server-side mode.
#[derive(Debug, Default, Deserialize)]
pub struct DatatableRequest {
    #[serde(default)]
    pub draw: Option<i64>,
    #[serde(default)]
    pub start: Option<i64>,
    #[serde(default)]
    pub length: Option<i64>,
    #[serde(rename = "search[value]", default)]
    pub search: Option<String>,
    #[serde(rename = "order[0][column]", default)]
    pub order_column: Option<usize>,
    #[serde(rename = "order[0][dir]", default)]
    pub order_dir: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Resolved query handed to a repository: which columns, how to filter,
/// order and page them.
#[derive(Debug, Clone, PartialEq)]
pub struct DatatableQuery<C> {
    pub columns: Vec<C>,
    pub search: Option<String>,
    pub order_by: C,
    pub direction: SortDirection,
    pub offset: i64,
    /// `None` returns every matching row.
    pub limit: Option<i64>,
}

impl DatatableRequest {
    pub fn draw(&self) -> i64 {
        self.draw.unwrap_or(0)
    }

    /// `order[0][column]` indexes into `columns`; out of range falls back
    /// to `default_order` ascending.
    pub fn into_query<C: Copy>(self, columns: &[C], default_order: C) -> DatatableQuery<C> {
        let (order_by, direction) = match self.order_column.and_then(|i| columns.get(i)) {
            Some(col) => {
                let dir = match self.order_dir.as_deref() {
                    Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Desc,
                    _ => SortDirection::Asc,
                };
                (*col, dir)
            }
            None => (default_order, SortDirection::Asc),
        };
        let limit = match self.length {
            Some(-1) => None,
            Some(n) if n > 0 => Some(n.min(MAX_PAGE_LENGTH)),
            _ => Some(DEFAULT_PAGE_LENGTH),
        };
        DatatableQuery {
            columns: columns.to_vec(),
            search: self
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            order_by,
            direction,
            offset: self.start.unwrap_or(0).max(0),
            limit,
        }
    }
}

/// One page of rows as returned by the repository.
#[derive(Debug, Clone)]
pub struct DatatablePage<T> {
    pub records_total: i64,
    pub records_filtered: i64,
    pub rows: Vec<T>,
}

/// JSON envelope expected by the DataTables client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatatableResponse {
    pub draw: i64,
    pub records_total: i64,
    pub records_filtered: i64,
    pub data: Vec<Vec<String>>,
}
