use crate::stats::StatsReport;

const HEADERS: [&str; 4] = [
    "Language",
    "Vacancies found",
    "Vacancies processed",
    "Average salary",
];

/// Title shown above a board's table, e.g. "HeadHunter Москва"
pub fn report_title(board: &str, city: &str) -> String {
    format!("{} {}", board, city.trim())
}

/// Render a report as an ASCII table with the title set into the top border
pub fn render_table(report: &StatsReport, title: &str) -> String {
    let rows: Vec<[String; 4]> = report
        .iter()
        .map(|(language, stats)| {
            [
                language.to_lowercase(),
                stats.found.to_string(),
                stats.processed.to_string(),
                stats
                    .average
                    .map(|average| average.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = border(&widths);
    let mut lines = vec![title_border(&separator, title)];
    lines.push(table_row(&HEADERS.map(String::from), &widths));
    lines.push(separator.clone());
    for row in &rows {
        lines.push(table_row(row, &widths));
    }
    lines.push(separator);

    lines.join("\n")
}

fn border(widths: &[usize; 4]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
    format!("+{}+", segments.join("+"))
}

/// Overlay the title onto a border line, dropped if it does not fit
fn title_border(separator: &str, title: &str) -> String {
    let inner = separator.chars().count().saturating_sub(2);
    let title_len = title.chars().count();
    if title.is_empty() || title_len > inner {
        return separator.to_string();
    }

    let tail: String = separator.chars().skip(1 + title_len).collect();
    format!("+{}{}", title, tail)
}

fn table_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width - cell.chars().count();
            format!(" {}{} ", cell, " ".repeat(pad))
        })
        .collect();
    format!("|{}|", padded.join("|"))
}
