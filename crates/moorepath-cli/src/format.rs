/// Output formatting for rows, graph statistics and engine messages.
///
/// Data goes to stdout; notices, log echoes, timing and errors go to
/// stderr so that stdout stays machine-readable in both modes.
///
/// - **Human mode** (default): an aligned row table on stdout. Status lines
///   on stderr are color-coded unless `--no-color` is set, the `NO_COLOR`
///   environment variable is present, or stderr is not a TTY.
/// - **JSON mode**: one pretty-printed JSON object on stdout carrying the
///   rows together with the notice and log channels.
use std::io::{IsTerminal as _, Write};
use std::time::Duration;

use moorepath_core::{GraphKind, GraphStats, OutputRow};

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted to stderr.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stderr().is_terminal()
}

const ANSI_RED: &str = "\x1b[31m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_CYAN: &str = "\x1b[36m";
const ANSI_RESET: &str = "\x1b[0m";

/// Stderr presentation settings derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
    /// Suppress all non-error stderr output.
    pub quiet: bool,
    /// Emit timing and input echoes to stderr.
    pub verbose: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    pub fn from_flags(no_color_flag: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
            verbose,
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.colors {
            format!("{color}{text}{ANSI_RESET}")
        } else {
            text.to_owned()
        }
    }
}

// ---------------------------------------------------------------------------
// Stderr status lines
// ---------------------------------------------------------------------------

/// Writes an engine notice such as `No paths found`. Suppressed when quiet.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_notice<W: Write>(
    writer: &mut W,
    notice: &str,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    writeln!(writer, "{} {notice}", config.paint(ANSI_YELLOW, "notice:"))
}

/// Echoes the engine log channel. Only written in verbose mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_log<W: Write>(
    writer: &mut W,
    log: &str,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if !config.verbose {
        return Ok(());
    }
    writeln!(writer, "{} {log}", config.paint(ANSI_CYAN, "input:"))
}

/// Writes an error message. Never suppressed.
///
/// A leading `error:` in `message` is colored rather than repeated.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_error<W: Write>(
    writer: &mut W,
    message: &str,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    let body = message.strip_prefix("error:").unwrap_or(message).trim_start();
    writeln!(writer, "{} {body}", config.paint(ANSI_RED, "error:"))
}

/// Writes a `rows / paths` summary line. Suppressed when quiet.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_summary_human<W: Write>(
    writer: &mut W,
    rows: &[OutputRow],
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    let paths = rows.iter().map(|r| r.path_id).max().unwrap_or(0);
    writeln!(
        writer,
        "{} {}, {} {}",
        rows.len(),
        pluralize(rows.len(), "row", "rows"),
        paths,
        pluralize(paths, "path", "paths"),
    )
}

/// Writes timing information. No-op unless verbose.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_timing_human<W: Write>(
    writer: &mut W,
    label: &str,
    duration: Duration,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if !config.verbose {
        return Ok(());
    }
    writeln!(writer, "{label} in {}ms", duration.as_millis())
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

const ROW_HEADERS: [&str; 9] = [
    "seq", "path_id", "path_seq", "start_vid", "end_vid", "node", "edge", "cost", "agg_cost",
];

fn row_cells(row: &OutputRow) -> [String; 9] {
    [
        row.seq.to_string(),
        row.path_id.to_string(),
        row.path_seq.to_string(),
        row.start_vid.to_string(),
        row.end_vid.to_string(),
        row.node.to_string(),
        row.edge.to_string(),
        format_cost(row.cost),
        format_cost(row.agg_cost),
    ]
}

/// Writes `rows` as a right-aligned table with a header line.
///
/// Nothing is written for an empty row set.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_rows_human<W: Write>(writer: &mut W, rows: &[OutputRow]) -> std::io::Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let cells: Vec<[String; 9]> = rows.iter().map(row_cells).collect();
    let mut widths = ROW_HEADERS.map(str::len);
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.len());
        }
    }

    write_table_line(writer, ROW_HEADERS.iter().copied(), &widths)?;
    for line in &cells {
        write_table_line(writer, line.iter().map(String::as_str), &widths)?;
    }
    Ok(())
}

fn write_table_line<'a, W: Write>(
    writer: &mut W,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> std::io::Result<()> {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:>width$}"))
        .collect();
    writeln!(writer, "{}", line.join("  "))
}

/// Writes `{"rows": [...], "count": N, "notice": ..., "log": ...}`.
///
/// Infinite sentinel costs serialize as `null`.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_rows_json<W: Write>(
    writer: &mut W,
    rows: &[OutputRow],
    notice: Option<&str>,
    log: Option<&str>,
) -> std::io::Result<()> {
    let rows_value = serde_json::to_value(rows).map_err(std::io::Error::other)?;

    let mut obj = serde_json::Map::new();
    obj.insert("rows".to_owned(), rows_value);
    obj.insert(
        "count".to_owned(),
        serde_json::Value::Number(rows.len().into()),
    );
    obj.insert("notice".to_owned(), optional_string(notice));
    obj.insert("log".to_owned(), optional_string(log));

    let json = serde_json::to_string_pretty(&serde_json::Value::Object(obj))
        .map_err(std::io::Error::other)?;
    writeln!(writer, "{json}")
}

// ---------------------------------------------------------------------------
// Graph statistics
// ---------------------------------------------------------------------------

/// Writes graph statistics as aligned key/value lines.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_stats_human<W: Write>(
    writer: &mut W,
    stats: &GraphStats,
    edge_count: usize,
) -> std::io::Result<()> {
    writeln!(writer, "kind:           {}", kind_name(stats.kind))?;
    writeln!(writer, "edges:          {edge_count}")?;
    writeln!(writer, "vertices:       {}", stats.vertex_count)?;
    writeln!(writer, "arcs:           {}", stats.arc_count)?;
    writeln!(writer, "negative_arcs:  {}", stats.negative_arcs)?;
    if stats.arc_count > 0 {
        writeln!(writer, "min_cost:       {}", format_cost(stats.min_cost))?;
        writeln!(writer, "max_cost:       {}", format_cost(stats.max_cost))?;
    }
    Ok(())
}

/// Writes graph statistics as a single JSON object.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_stats_json<W: Write>(
    writer: &mut W,
    stats: &GraphStats,
    edge_count: usize,
) -> std::io::Result<()> {
    let value = serde_json::json!({
        "kind": kind_name(stats.kind),
        "edges": edge_count,
        "vertices": stats.vertex_count,
        "arcs": stats.arc_count,
        "negative_arcs": stats.negative_arcs,
        "min_cost": stats.min_cost,
        "max_cost": stats.max_cost,
    });
    let json = serde_json::to_string_pretty(&value).map_err(std::io::Error::other)?;
    writeln!(writer, "{json}")
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn kind_name(kind: GraphKind) -> &'static str {
    match kind {
        GraphKind::Directed => "directed",
        GraphKind::Undirected => "undirected",
    }
}

/// Formats a cost; the unreachable sentinel prints as `inf`.
fn format_cost(cost: f64) -> String {
    if cost.is_infinite() && cost > 0.0 {
        "inf".to_owned()
    } else {
        cost.to_string()
    }
}

fn optional_string(s: Option<&str>) -> serde_json::Value {
    s.map_or(serde_json::Value::Null, |s| {
        serde_json::Value::String(s.to_owned())
    })
}

/// Returns the singular or plural form of `word` depending on `count`.
fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use moorepath_core::NO_EDGE;

    use super::*;

    fn no_color_config() -> FormatterConfig {
        FormatterConfig {
            colors: false,
            quiet: false,
            verbose: false,
        }
    }

    fn quiet_config() -> FormatterConfig {
        FormatterConfig {
            quiet: true,
            ..no_color_config()
        }
    }

    fn verbose_config() -> FormatterConfig {
        FormatterConfig {
            verbose: true,
            ..no_color_config()
        }
    }

    fn row(
        seq: usize,
        path_id: usize,
        node: i64,
        edge: i64,
        cost: f64,
        agg_cost: f64,
    ) -> OutputRow {
        OutputRow {
            seq,
            path_id,
            path_seq: seq,
            start_vid: 1,
            end_vid: 3,
            node,
            edge,
            cost,
            agg_cost,
        }
    }

    fn sample_rows() -> Vec<OutputRow> {
        vec![row(1, 1, 2, 1, 1.0, 1.0), row(2, 1, 3, 2, 2.0, 3.0)]
    }

    fn capture<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
    {
        let mut buf: Vec<u8> = Vec::new();
        f(&mut buf).expect("write to Vec never fails");
        String::from_utf8(buf).expect("valid UTF-8")
    }

    // ── status lines ─────────────────────────────────────────────────────────

    #[test]
    fn notice_is_prefixed_and_suppressed_when_quiet() {
        let out = capture(|w| write_notice(w, "No paths found", &no_color_config()));
        assert_eq!(out, "notice: No paths found\n");
        let out = capture(|w| write_notice(w, "No paths found", &quiet_config()));
        assert!(out.is_empty());
    }

    #[test]
    fn log_only_in_verbose_mode() {
        assert!(capture(|w| write_log(w, "edges.json", &no_color_config())).is_empty());
        let out = capture(|w| write_log(w, "edges.json", &verbose_config()));
        assert_eq!(out, "input: edges.json\n");
    }

    #[test]
    fn error_prefix_is_not_repeated() {
        let out = capture(|w| write_error(w, "error: file not found: x", &quiet_config()));
        assert_eq!(out, "error: file not found: x\n");
    }

    #[test]
    fn colored_error_contains_ansi() {
        let config = FormatterConfig {
            colors: true,
            ..no_color_config()
        };
        let out = capture(|w| write_error(w, "boom", &config));
        assert!(out.contains(ANSI_RED));
        assert!(out.contains(ANSI_RESET));
    }

    #[test]
    fn summary_counts_rows_and_paths() {
        let out = capture(|w| write_summary_human(w, &sample_rows(), &no_color_config()));
        assert_eq!(out, "2 rows, 1 path\n");
        let out = capture(|w| write_summary_human(w, &[], &no_color_config()));
        assert_eq!(out, "0 rows, 0 paths\n");
    }

    #[test]
    fn timing_only_in_verbose_mode() {
        let d = Duration::from_millis(12);
        assert!(capture(|w| write_timing_human(w, "solved", d, &no_color_config())).is_empty());
        let out = capture(|w| write_timing_human(w, "solved", d, &verbose_config()));
        assert_eq!(out, "solved in 12ms\n");
    }

    // ── rows ─────────────────────────────────────────────────────────────────

    #[test]
    fn human_table_has_header_and_one_line_per_row() {
        let out = capture(|w| write_rows_human(w, &sample_rows()));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("agg_cost"));
        assert!(lines[2].trim_end().ends_with('3'));
        assert_eq!(lines[0].len(), lines[1].len(), "columns are aligned");
    }

    #[test]
    fn human_table_prints_inf_for_sentinel() {
        let rows = vec![row(1, 1, 3, NO_EDGE, f64::INFINITY, f64::INFINITY)];
        let out = capture(|w| write_rows_human(w, &rows));
        assert!(out.contains("inf"));
        assert!(out.contains("-1"));
    }

    #[test]
    fn human_table_empty_rows_prints_nothing() {
        assert!(capture(|w| write_rows_human(w, &[])).is_empty());
    }

    #[test]
    fn json_rows_object_shape() {
        let out = capture(|w| write_rows_json(w, &sample_rows(), None, Some("edges.json")));
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
        assert_eq!(value["count"], 2);
        assert_eq!(value["rows"][1]["agg_cost"], 3.0);
        assert!(value["notice"].is_null());
        assert_eq!(value["log"], "edges.json");
    }

    #[test]
    fn json_sentinel_costs_are_null() {
        let rows = vec![row(1, 1, 3, NO_EDGE, f64::INFINITY, f64::INFINITY)];
        let out = capture(|w| write_rows_json(w, &rows, Some("No paths found"), None));
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
        assert!(value["rows"][0]["cost"].is_null());
        assert_eq!(value["notice"], "No paths found");
    }

    // ── stats ────────────────────────────────────────────────────────────────

    fn sample_stats() -> GraphStats {
        GraphStats {
            kind: GraphKind::Directed,
            vertex_count: 3,
            arc_count: 3,
            negative_arcs: 1,
            min_cost: -2.0,
            max_cost: 5.0,
        }
    }

    #[test]
    fn stats_human_lists_counts() {
        let out = capture(|w| write_stats_human(w, &sample_stats(), 3));
        assert!(out.contains("kind:           directed"));
        assert!(out.contains("negative_arcs:  1"));
        assert!(out.contains("min_cost:       -2"));
    }

    #[test]
    fn stats_json_has_all_fields() {
        let out = capture(|w| write_stats_json(w, &sample_stats(), 3));
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
        assert_eq!(value["kind"], "directed");
        assert_eq!(value["vertices"], 3);
        assert_eq!(value["max_cost"], 5.0);
    }

    #[test]
    fn pluralize_singular_and_plural() {
        assert_eq!(pluralize(1, "row", "rows"), "row");
        assert_eq!(pluralize(0, "row", "rows"), "rows");
    }
}
