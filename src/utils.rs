use colored::Colorize;

/// Format a dollar amount with thousands separators, e.g. `$12,345.67`
pub fn format_currency(amount: Option<f64>) -> String {
    match amount {
        Some(value) => format!("${}", group_thousands(value)).yellow().to_string(),
        None => "-".to_string(),
    }
}

fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, cents)
}

/// Date part of an FEC timestamp (`2024-03-31T00:00:00` -> `2024-03-31`)
pub fn format_date(raw: Option<&str>) -> String {
    match raw {
        Some(value) => value.get(..10).unwrap_or(value).to_string(),
        None => "-".to_string(),
    }
}

/// Truncate long names for table display
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Print a formatted table border
pub fn print_table_border(width: usize) {
    println!("{}", "=".repeat(width));
}

/// Print a table row with columns
pub fn print_table_row(columns: &[&str], widths: &[usize]) {
    let mut row = String::new();
    for (i, col) in columns.iter().enumerate() {
        if i < widths.len() {
            row.push_str(&format!("{:<width$}  ", col, width = widths[i]));
        }
    }
    println!("{}", row.trim_end());
}
