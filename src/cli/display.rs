// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display for the ctp-search CLI.
//!
//! Result lists and the LTC table are drawn in boxes, colored with OneDark on
//! dark terminals and One Light on light ones. `NO_COLOR` and non-TTY output
//! get plain text.
//!
//! # Theme detection order
//!
//! 1. `CTP_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. macOS appearance (via defaults read)
//! 4. Default to dark theme

use std::sync::OnceLock;

use ctp_search::ltc::{LtcSummary, Metric, LUMPED_OTHER_LABEL};
use ctp_search::utils::format_number;
use ctp_search::{CollectionType, NormalizedHit, PartitionResult};

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// Cached theme detection result
static THEME: OnceLock<Theme> = OnceLock::new();

/// Detect terminal theme from environment
fn detect_theme() -> Theme {
    // 1. Explicit override via CTP_THEME
    if let Ok(theme) = std::env::var("CTP_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // 2. COLORFGBG (format: "fg;bg" where bg > 6 typically means light)
    // Set by some terminals like xterm, rxvt
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                // Colors 0-6 are typically dark, 7+ are light
                // 15 = white, 0 = black
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    // 3. macOS: Check system appearance
    #[cfg(target_os = "macos")]
    {
        if let Ok(output) = std::process::Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
        {
            // "Dark" means dark mode; absence or error means light mode
            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.contains("Dark") && output.status.success() {
                return Theme::Light;
            }
        }
    }

    // 4. Default to dark (most developer terminals)
    Theme::Dark
}

/// Get the current theme (cached)
pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// ONEDARK / ONE LIGHT COLOR PALETTES (True Color)
// ═══════════════════════════════════════════════════════════════════════════
//
// OneDark: https://github.com/joshdick/onedark.vim
// One Light: https://github.com/sonph/onehalf

/// True color escape sequence helper
fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
}

pub use colors::*;

/// OneDark palette
mod onedark {
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);   // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);  // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);     // #61afef
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);     // #56b6c2
    pub const WHITE: (u8, u8, u8) = (171, 178, 191);   // #abb2bf
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);      // #5c6370
    pub const BRIGHT_GREEN: (u8, u8, u8) = (166, 226, 46);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (102, 217, 239);
}

/// One Light palette
mod onelight {
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);     // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);    // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);     // #4078f2
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);      // #0184bc
    pub const WHITE: (u8, u8, u8) = (56, 58, 66);      // #383a42 (foreground)
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);    // #a0a1a7
    pub const BRIGHT_GREEN: (u8, u8, u8) = (68, 140, 39);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (1, 112, 158);
}

// ═══════════════════════════════════════════════════════════════════════════
// THEME-AWARE COLOR ACCESSORS
// ═══════════════════════════════════════════════════════════════════════════

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(WHITE);
theme_color!(GRAY);
theme_color!(BRIGHT_GREEN);
theme_color!(BRIGHT_CYAN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    // Respect NO_COLOR standard
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let border = GRAY();
    let len = visible_len(content);
    let pad = BOX_WIDTH.saturating_sub(len);
    println!(
        "{}│{}{}{}{}│{}",
        border,
        RESET,
        content,
        " ".repeat(pad),
        border,
        RESET
    );
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let border = GRAY();
    let colored_label = themed(CYAN, &[BOLD], label);
    let label_part = format!("─ {} ", colored_label);
    let remaining = BOX_WIDTH - visible_len(&label_part);
    println!(
        "{}┌{}{}{}{}┐{}",
        border,
        RESET,
        label_part,
        border,
        "─".repeat(remaining),
        RESET
    );
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let border = GRAY();
    let colored_label = themed(CYAN, &[BOLD], label);
    let label_part = format!("─ {} ", colored_label);
    let remaining = BOX_WIDTH - visible_len(&label_part);
    println!(
        "{}├{}{}{}─{}┤{}",
        border,
        RESET,
        label_part,
        border,
        "─".repeat(remaining - 1),
        RESET
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    let border = GRAY();
    println!("{}└{}┘{}", border, "─".repeat(BOX_WIDTH), RESET);
}

/// Print double-line header: ╔══════════════════╗
pub fn double_header() {
    let border = BLUE();
    println!("{}╔{}╗{}", border, "═".repeat(BOX_WIDTH), RESET);
}

/// Print double-line footer: ╚══════════════════╝
pub fn double_footer() {
    let border = BLUE();
    println!("{}╚{}╝{}", border, "═".repeat(BOX_WIDTH), RESET);
}

/// Print centered title with bold
pub fn title(text: &str) {
    let border = BLUE();
    let colored = themed(BRIGHT_CYAN, &[BOLD], text);
    let len = visible_len(&colored);
    let total_pad = BOX_WIDTH.saturating_sub(len);
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    println!(
        "{}║{}{}{}{}{}║{}",
        border,
        RESET,
        " ".repeat(left_pad),
        colored,
        " ".repeat(right_pad),
        border,
        RESET
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Left-pad a styled string to a fixed visible width
pub fn pad_left(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - visible), s)
    }
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Color-coded collection badge
pub fn collection_badge(collection: CollectionType) -> String {
    let label = match collection {
        CollectionType::State => "STATE",
        CollectionType::BlogPost => "BLOG",
        CollectionType::Page => "PAGE",
    };
    if !use_colors() {
        return format!("[{}]", label);
    }
    let color = match collection {
        CollectionType::State => GREEN(),
        CollectionType::BlogPost => BLUE(),
        CollectionType::Page => YELLOW(),
    };
    format!("{}[{}]{}", color, label, RESET)
}

/// Excerpt HTML as terminal text. Tags are dropped and common entities
/// decoded; with `colors`, `<em>` highlights become bold green.
pub fn excerpt_text(html: &str, colors: bool) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find(['<', '&']) {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        if rest.starts_with('<') {
            let Some(end) = rest.find('>') else {
                out.push_str(rest);
                return collapse_whitespace(&out);
            };
            match &rest[..=end] {
                "<em>" if colors => out.push_str(&format!("{}{}", BOLD, BRIGHT_GREEN())),
                "</em>" if colors => out.push_str(RESET),
                "</p>" | "<br>" | "<br />" => out.push(' '),
                _ => {}
            }
            rest = &rest[end + 1..];
        } else {
            let entity = ["&amp;", "&lt;", "&gt;", "&quot;", "&#39;"]
                .into_iter()
                .find(|e| rest.starts_with(*e));
            let (decoded, len) = match entity {
                Some("&amp;") => ('&', 5),
                Some("&lt;") => ('<', 4),
                Some("&gt;") => ('>', 4),
                Some("&quot;") => ('"', 6),
                Some("&#39;") => ('\'', 5),
                _ => ('&', 1),
            };
            out.push(decoded);
            rest = &rest[len..];
        }
    }
    out.push_str(rest);
    collapse_whitespace(&out)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Greedy word wrap on visible width.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split(' ') {
        if !line.is_empty() && visible_len(&line) + 1 + visible_len(word) > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH RESULTS
// ═══════════════════════════════════════════════════════════════════════════

fn print_hit(hit: &NormalizedHit) {
    row(&format!(
        " {} {}",
        collection_badge(hit.collection),
        themed(WHITE, &[BOLD], hit.title())
    ));
    row(&format!("   {}", themed(CYAN, &[], &hit.route)));
    if !hit.excerpt_html.is_empty() {
        for line in wrap(&excerpt_text(&hit.excerpt_html, use_colors()), BOX_WIDTH - 4) {
            row(&format!("   {}", line));
        }
    }
}

/// Print both tiers of a search, best matches first.
pub fn print_results(
    query: &str,
    results: &PartitionResult<NormalizedHit>,
    failed: &[CollectionType],
) {
    println!();
    double_header();
    title(&format!("Results for \"{}\"", query));
    double_footer();

    if results.is_empty() {
        section_top("NO RESULTS");
        row(&themed(GRAY, &[], " Nothing matched. Try a state name or a broader term."));
        section_bot();
    } else {
        let tiers = [
            ("BEST MATCHES", &results.best_hits),
            ("OTHER RESULTS", &results.other_hits),
        ];
        let mut opened = false;
        for (label, hits) in tiers {
            if hits.is_empty() {
                continue;
            }
            let label = format!("{} ({})", label, hits.len());
            if opened {
                section_mid(&label);
            } else {
                section_top(&label);
                opened = true;
            }
            for hit in hits.iter() {
                print_hit(hit);
            }
        }
        section_bot();
    }

    if !failed.is_empty() {
        let names: Vec<&str> = failed.iter().map(|c| c.as_str()).collect();
        println!(
            "{}",
            themed(
                YELLOW,
                &[],
                &format!(" Some results may be missing: {} did not respond", names.join(", "))
            )
        );
    }
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════
// LONG-TERM CARE
// ═══════════════════════════════════════════════════════════════════════════

const LTC_LABEL_WIDTH: usize = 24;
const LTC_CELL_WIDTH: usize = 8;

fn metric_short_header(metric: Metric) -> &'static str {
    match metric {
        Metric::PosRes => "Res+",
        Metric::DeathRes => "Res†",
        Metric::PosStaff => "Staff+",
        Metric::DeathStaff => "Staff†",
        Metric::PosResStaff => "All+",
        Metric::DeathResStaff => "All†",
        Metric::OutbrkFac => "Fac",
    }
}

fn ltc_row(label: &str, values: &[Option<f64>; 7], bold: bool) {
    let modifiers: &[&str] = if bold { &[BOLD] } else { &[] };
    let mut line = pad_right(&themed(WHITE, modifiers, label), LTC_LABEL_WIDTH);
    for value in values {
        let text = format_number(*value);
        let cell = if value.is_some() {
            themed(WHITE, modifiers, &text)
        } else {
            themed(GRAY, &[], &text)
        };
        line.push_str(&pad_left(&cell, LTC_CELL_WIDTH));
    }
    row(&line);
}

/// Print the LTC summary table with a legend and the history link.
pub fn print_ltc(summary: &LtcSummary) {
    println!();
    double_header();
    title(&format!("Long-term care: {}", summary.state_slug));
    double_footer();

    section_top("CUMULATIVE");
    if summary.rows.is_empty() {
        row(&themed(GRAY, &[], " No long-term-care data reported."));
    } else {
        let mut header = pad_right(" Facility type", LTC_LABEL_WIDTH);
        for metric in Metric::ALL {
            header.push_str(&pad_left(metric_short_header(metric), LTC_CELL_WIDTH));
        }
        row(&themed(GRAY, &[BOLD], &header));

        for r in &summary.rows {
            ltc_row(&format!(" {}", truncate_label(r.label)), &r.values, false);
        }
        ltc_row(" Total", &summary.totals, true);
    }

    section_mid("LEGEND");
    for metric in Metric::ALL {
        row(&format!(
            " {} {}",
            pad_right(metric_short_header(metric), 7),
            themed(GRAY, &[], metric.header())
        ));
    }
    row(&format!(" {}", themed(GRAY, &[], LUMPED_OTHER_LABEL)));
    section_bot();
    println!(" History: {}", themed(CYAN, &[], &summary.history_route()));
    println!();
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() < LTC_LABEL_WIDTH {
        label.to_string()
    } else {
        let head: String = label.chars().take(LTC_LABEL_WIDTH - 5).collect();
        format!("{}...", head)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
