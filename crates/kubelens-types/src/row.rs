use serde::Serialize;
use serde::ser::SerializeMap;
use std::borrow::Cow;
use std::cmp::Ordering;

// ============================================================================
// Columns
// ============================================================================

/// Table column declared by a formatter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    /// Width hint for a column that should not stretch, in display units of the front end
    pub width: Option<u16>,
}

impl Column {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: true,
            width: None,
        }
    }

    /// A fixed-width, non-sortable column (status icons)
    pub const fn fixed(key: &'static str, label: &'static str, width: u16) -> Self {
        Self {
            key,
            label,
            sortable: false,
            width: Some(width),
        }
    }
}

// ============================================================================
// Sort keys
// ============================================================================

/// Comparable projection of a field, independent of its display text
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum SortKey {
    Int(i64),
    Float(f64),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            Self::Int(_) | Self::Float(_) => 0,
            Self::Text(_) => 1,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).total_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.total_cmp(&(*b as f64)),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl From<i64> for SortKey {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for SortKey {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for SortKey {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

// ============================================================================
// Field values
// ============================================================================

/// Status classification rendered as an icon
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusBadge {
    pub icon: &'static str,
    pub class: &'static str,
    pub tooltip: &'static str,
    pub sort: SortKey,
}

/// One cell of a presentation row
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Count(i64),
    /// Human-readable text ordered by a separate key ("2h" sorts by timestamp)
    Measured { display: String, sort: SortKey },
    Status(StatusBadge),
}

impl FieldValue {
    pub fn measured(display: impl Into<String>, sort: impl Into<SortKey>) -> Self {
        Self::Measured {
            display: display.into(),
            sort: sort.into(),
        }
    }

    /// Text shown to the user
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Count(n) => Cow::Owned(n.to_string()),
            Self::Measured { display, .. } => Cow::Borrowed(display),
            Self::Status(badge) => Cow::Borrowed(badge.tooltip),
        }
    }

    /// Value used for ordering; never the display text of a measured field
    pub fn sort_key(&self) -> SortKey {
        match self {
            Self::Text(s) => SortKey::Text(s.clone()),
            Self::Count(n) => SortKey::Int(*n),
            Self::Measured { sort, .. } => sort.clone(),
            Self::Status(badge) => badge.sort.clone(),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<StatusBadge> for FieldValue {
    fn from(badge: StatusBadge) -> Self {
        Self::Status(badge)
    }
}

// ============================================================================
// Rows
// ============================================================================

/// Display-ready projection of one resource, one value per declared column
#[derive(Clone, Debug, PartialEq)]
pub struct PresentationRow {
    columns: &'static [Column],
    values: Vec<FieldValue>,
}

impl PresentationRow {
    /// Values must be given in column order
    pub fn new(columns: &'static [Column], values: Vec<FieldValue>) -> Self {
        debug_assert_eq!(
            columns.len(),
            values.len(),
            "row values must match declared columns"
        );
        Self { columns, values }
    }

    pub fn columns(&self) -> &'static [Column] {
        self.columns
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Get the value of a column by key
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.columns
            .iter()
            .position(|c| c.key == key)
            .and_then(|i| self.values.get(i))
    }

    /// Iterate over (column, value) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&'static Column, &FieldValue)> {
        self.columns.iter().zip(self.values.iter())
    }
}

impl Serialize for PresentationRow {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column.key, value)?;
        }
        map.end()
    }
}
