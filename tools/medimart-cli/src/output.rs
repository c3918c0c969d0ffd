//! Output formatting for the CLI.

use console::style;
use medimart_auth::GateOutcome;
use medimart_commerce::checkout::OrderStatus;
use medimart_commerce::Money;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row. The last column is printed in full, so it may
    /// carry styled text.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let last = cols.len().saturating_sub(1);
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(i, (col, width))| {
                if i == last {
                    col.to_string()
                } else {
                    format!("{:width$}", truncate(col, *width), width = width)
                }
            })
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Print a dimmed table header row.
    pub fn table_header(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", style(formatted.join("  ").trim_end()).dim());
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Amount with a strike-through original when discounted.
pub fn price_tag(original: &Money, effective: &Money) -> String {
    if original == effective {
        return effective.display();
    }
    format!(
        "{} {}",
        style(original.display()).dim().strikethrough(),
        style(effective.display()).green()
    )
}

/// Status badge for order states.
pub fn status_badge(status: OrderStatus) -> String {
    match status {
        OrderStatus::Paid => style(status.display_name()).green().to_string(),
        OrderStatus::Pending => style(status.display_name()).yellow().to_string(),
    }
}

/// One-line description of a gate decision.
pub fn describe_outcome(outcome: &GateOutcome) -> String {
    match outcome {
        GateOutcome::Wait => style("waiting for role lookup").dim().to_string(),
        GateOutcome::Render => style("access granted").green().to_string(),
        GateOutcome::RedirectToLogin { from } => format!(
            "{} (return to {} after sign-in)",
            style("redirect to /login").yellow(),
            from
        ),
        GateOutcome::Blocked {
            required, actual, ..
        } => format!(
            "{}: route needs {}, signed in as {}",
            style("access denied").red(),
            required,
            actual
        ),
        GateOutcome::Error { message } => {
            format!("{}: {}", style("role lookup failed").red(), message)
        }
    }
}

/// Shorten text to `width` characters, marking the cut with an ellipsis.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}
