//! Startup and shutdown text printed to the terminal

use std::fmt::Write;

use crate::config::DemoPage;

const TITLE: &str = "🚀 TimeTracker Phoenix Demo";

/// Usage text shown before the server starts accepting
pub fn render(url: &str, pages: &[DemoPage]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{}", "=".repeat(40));
    let _ = writeln!(out);
    let _ = writeln!(out, "Starting demo server...");
    let _ = writeln!(out, "📱 Visit: {url}");
    let _ = writeln!(out);

    if !pages.is_empty() {
        let _ = writeln!(out, "Demo pages:");
        let width = pages.iter().map(|p| p.label.len()).max().unwrap_or(0) + 1;
        for page in pages {
            let label = format!("{}:", page.label);
            let icon = match &page.icon {
                Some(icon) => format!("{icon} "),
                None => String::new(),
            };
            let _ = writeln!(out, "  {icon}{label:<width$} {url}{}", page.path);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "To run the real Phoenix app:");
    let _ = writeln!(out, "  1. Install Elixir: https://elixir-lang.org/install.html");
    let _ = writeln!(out, "  2. Install PostgreSQL");
    let _ = writeln!(out, "  3. Run: ./setup.sh && ./start.sh");
    let _ = writeln!(out);
    let _ = writeln!(out, "Press Ctrl+C to stop the demo server");
    out
}

pub const fn farewell() -> &'static str {
    "👋 Demo server stopped"
}
