//! Bordered text tables.
//!
//! ```text
//! +----------+-----------+
//! | CONTEXT  | IMAGE TAG |
//! +----------+-----------+
//! | alpine   | alpine    |
//! +----------+-----------+
//! ```

const COLUMN_PADDING: usize = 2;

/// Two-column board. Rows keep the order they are given in.
///
/// The header row is printed only when `titles` is given.
pub fn two_columns<K, V>(rows: &[(K, V)], titles: Option<(&str, &str)>) -> Vec<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let width = |s: &str| s.chars().count();

    let mut k_max = rows.iter().map(|(k, _)| width(k.as_ref())).max().unwrap_or(0);
    let mut v_max = rows.iter().map(|(_, v)| width(v.as_ref())).max().unwrap_or(0);
    if let Some((k_title, v_title)) = titles {
        k_max = k_max.max(width(k_title));
        v_max = v_max.max(width(v_title));
    }

    let border = format!(
        "+{}+{}+",
        "-".repeat(k_max + COLUMN_PADDING),
        "-".repeat(v_max + COLUMN_PADDING)
    );
    let row = |k: &str, v: &str| {
        format!(
            "| {}{} | {}{} |",
            k,
            " ".repeat(k_max - width(k)),
            v,
            " ".repeat(v_max - width(v))
        )
    };

    let mut lines = Vec::with_capacity(rows.len() + 4);
    if let Some((k_title, v_title)) = titles {
        lines.push(border.clone());
        lines.push(row(k_title, v_title));
    }
    lines.push(border.clone());
    lines.extend(rows.iter().map(|(k, v)| row(k.as_ref(), v.as_ref())));
    lines.push(border);
    lines
}

/// One-column board. The legend, when given, closes the board below the rows.
pub fn one_column<K: AsRef<str>>(rows: &[K], legend: Option<&str>) -> Vec<String> {
    let width = |s: &str| s.chars().count();

    let max = rows
        .iter()
        .map(|k| width(k.as_ref()))
        .chain(legend.map(width))
        .max()
        .unwrap_or(0);

    let border = format!("+{}+", "-".repeat(max + COLUMN_PADDING));
    let row = |k: &str| format!("| {}{} |", k, " ".repeat(max - width(k)));

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(border.clone());
    lines.extend(rows.iter().map(|k| row(k.as_ref())));
    lines.push(border.clone());
    if let Some(legend) = legend {
        lines.push(row(legend));
        lines.push(border);
    }
    lines
}
