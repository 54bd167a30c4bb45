//! Plain-text rendering for the terminal

use comfy_table::{ContentArrangement, Table, presets};

use kubelens_types::catalog::ResourceCategory;
use kubelens_view::{Column, NamespaceFilter, PresentationRow, SortSpec};

fn plain_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_label(column: &Column, sort: &SortSpec) -> String {
    let label = column.label.to_uppercase();
    if column.key == sort.column {
        format!("{} ({})", label, sort.direction.label())
    } else {
        label
    }
}

/// Rows under their column headers; the sorted column carries its direction
pub fn table(columns: &[Column], rows: &[PresentationRow], sort: &SortSpec) -> String {
    let mut table = plain_table();
    table
        .set_header(columns.iter().map(|c| header_label(c, sort)))
        .add_rows(rows.iter().map(|row| {
            row.values()
                .iter()
                .map(|value| value.display().into_owned())
                .collect::<Vec<_>>()
        }));
    table.to_string()
}

/// Catalog grouped by category
pub fn catalog(categories: &[ResourceCategory]) -> String {
    let mut table = plain_table();
    table.set_header(vec!["CATEGORY", "KIND", "API VERSION", "SCOPE"]);
    for category in categories {
        for kind in category.kinds {
            let scope = if kind.is_namespaced() {
                "namespaced"
            } else {
                "cluster"
            };
            table.add_row(vec![
                category.label.to_string(),
                kind.name.to_string(),
                kind.group.api_version(),
                scope.to_string(),
            ]);
        }
    }
    table.to_string()
}

/// The namespace filter options, `all` first
pub fn namespaces(filter: &NamespaceFilter) -> String {
    let options: Vec<String> = filter.options().iter().map(ToString::to_string).collect();
    format!("Namespaces: {}", options.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubelens_types::catalog;
    use kubelens_view::{FieldValue, NamespaceSelection, SortDirection, derive_namespaces};

    static COLUMNS: [Column; 3] = [
        Column::fixed("status", "Status", 40),
        Column::new("name", "Name"),
        Column::new("restarts", "Restarts"),
    ];

    fn row(status: &str, name: &str, restarts: i64) -> PresentationRow {
        PresentationRow::new(
            &COLUMNS,
            vec![status.into(), name.into(), FieldValue::Count(restarts)],
        )
    }

    fn words(line: &str) -> Vec<&str> {
        line.split_whitespace().collect()
    }

    #[test]
    fn test_table_rows_under_headers() {
        let rows = vec![
            row("Running", "api-0", 3),
            row("Pending", "worker-long-name", 0),
        ];
        let out = table(&COLUMNS, &rows, &SortSpec::ascending("name"));
        let lines: Vec<&str> = out.lines().filter(|l| !l.trim().is_empty()).collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(words(lines[0]), vec!["STATUS", "NAME", "(asc)", "RESTARTS"]);
        assert_eq!(words(lines[1]), vec!["Running", "api-0", "3"]);
        assert_eq!(words(lines[2]), vec!["Pending", "worker-long-name", "0"]);

        // Left-aligned columns start at the same offset on every line
        let restarts = lines[0].find("RESTARTS").unwrap();
        assert_eq!(lines[1].find('3'), Some(restarts));
        assert_eq!(lines[2].find('0'), Some(restarts));
    }

    #[test]
    fn test_status_text_is_not_clipped() {
        let rows = vec![row("Completed Successfully", "job-1", 0)];
        let out = table(&COLUMNS, &rows, &SortSpec::default());
        assert!(out.contains("Completed Successfully"));
    }

    #[test]
    fn test_descending_marker() {
        let out = table(
            &COLUMNS,
            &[],
            &SortSpec::new("restarts", SortDirection::Descending),
        );
        assert_eq!(words(&out), vec!["STATUS", "NAME", "RESTARTS", "(desc)"]);
    }

    #[test]
    fn test_catalog_lists_every_kind() {
        let out = catalog(catalog::categories());
        assert!(out.contains("Workloads"));
        assert!(out.contains("Pods"));
        assert!(out.contains("storage.k8s.io/v1"));
        assert_eq!(
            out.lines().filter(|l| !l.trim().is_empty()).count(),
            catalog::kinds().count() + 1
        );
    }

    #[test]
    fn test_namespaces_line() {
        let filter = derive_namespaces(&[]);
        assert_eq!(namespaces(&filter), "Namespaces: all");
        assert_eq!(filter.options(), vec![NamespaceSelection::All]);
    }
}
