use serde::Serialize;

/// Structured detail payload for one resource
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetailView {
    pub title: String,
    pub sections: Vec<DetailSection>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetailSection {
    pub heading: String,
    pub body: SectionBody,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum SectionBody {
    /// Label/value pairs
    Table(Vec<(String, String)>),
    List(Vec<String>),
    Json(serde_json::Value),
}

impl SectionBody {
    /// Find a value in a table section by its label
    pub fn lookup(&self, label: &str) -> Option<&str> {
        match self {
            Self::Table(rows) => rows
                .iter()
                .find(|(l, _)| l == label)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }
}

impl DetailView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn table<K, V>(mut self, heading: &str, rows: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.push(heading, SectionBody::Table(rows));
        self
    }

    pub fn list(mut self, heading: &str, items: Vec<String>) -> Self {
        self.push(heading, SectionBody::List(items));
        self
    }

    pub fn json(mut self, heading: &str, value: serde_json::Value) -> Self {
        self.push(heading, SectionBody::Json(value));
        self
    }

    fn push(&mut self, heading: &str, body: SectionBody) {
        self.sections.push(DetailSection {
            heading: heading.to_string(),
            body,
        });
    }

    /// Get a section body by heading
    pub fn section(&self, heading: &str) -> Option<&SectionBody> {
        self.sections
            .iter()
            .find(|s| s.heading == heading)
            .map(|s| &s.body)
    }
}
