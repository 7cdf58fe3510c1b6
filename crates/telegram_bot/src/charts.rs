//! Chart rendering for `/top`.
//!
//! Charts are plain SVG documents built with `format!`; Telegram delivers them
//! as files.

use std::{f64::consts::PI, fmt::Write};

use engine::{AmountPolicy, CategoryTotals};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 420.0;
const MARGIN: f64 = 60.0;

const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Creates a simple ASCII-based horizontal bar.
#[must_use]
pub fn ascii_bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let ratio = (value as f64 / max as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

fn color(idx: usize) -> &'static str {
    PALETTE[idx % PALETTE.len()]
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn open_svg(title: &str) -> String {
    format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{WIDTH}' height='{HEIGHT}' \
         viewBox='0 0 {WIDTH} {HEIGHT}' font-family='DejaVu Sans, Arial, sans-serif'>\
         <rect width='100%' height='100%' fill='white'/>\
         <text x='{x}' y='30' text-anchor='middle' font-size='18' font-weight='bold'>{title}</text>",
        x = WIDTH / 2.0,
        title = escape(title)
    )
}

/// Vertical bar chart of the category totals, largest first.
pub fn bar_chart_svg(totals: &CategoryTotals, policy: AmountPolicy) -> String {
    let mut svg = open_svg("Total by Category ($)");

    let max = totals
        .iter()
        .map(|row| row.total.as_major_f64())
        .fold(0.0_f64, f64::max);
    let plot_height = HEIGHT - 2.0 * MARGIN;
    let slot = (WIDTH - 2.0 * MARGIN) / totals.len().max(1) as f64;
    let bar_width = slot * 0.7;
    let baseline = HEIGHT - MARGIN;

    let _ = write!(
        svg,
        "<line x1='{MARGIN}' y1='{baseline}' x2='{x2}' y2='{baseline}' stroke='black'/>",
        x2 = WIDTH - MARGIN
    );

    for (idx, row) in totals.iter().enumerate() {
        let value = row.total.as_major_f64().max(0.0);
        let height = if max > 0.0 { value / max * plot_height } else { 0.0 };
        let x = MARGIN + idx as f64 * slot + (slot - bar_width) / 2.0;
        let y = baseline - height;
        let center = x + bar_width / 2.0;

        let _ = write!(
            svg,
            "<rect x='{x:.1}' y='{y:.1}' width='{bar_width:.1}' height='{height:.1}' fill='{fill}'/>\
             <text x='{center:.1}' y='{label_y:.1}' text-anchor='middle' font-size='11' \
             font-weight='bold'>{amount}</text>\
             <text x='{center:.1}' y='{name_y:.1}' text-anchor='end' font-size='12' \
             transform='rotate(-20 {center:.1} {name_y:.1})'>{name}</text>",
            fill = color(idx),
            label_y = (y - 6.0).min(baseline - 6.0),
            amount = escape(&row.total.format(policy)),
            name_y = baseline + 18.0,
            name = escape(&row.label),
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Pie chart of the positive category totals with percentage labels.
///
/// Returns `None` when no category has a positive total.
pub fn pie_chart_svg(totals: &CategoryTotals) -> Option<String> {
    let slices: Vec<(&str, f64)> = totals
        .iter()
        .map(|row| (row.label.as_str(), row.total.as_major_f64()))
        .filter(|(_, value)| *value > 0.0)
        .collect();
    let sum: f64 = slices.iter().map(|(_, value)| value).sum();
    if slices.is_empty() || sum <= 0.0 {
        return None;
    }

    let mut svg = open_svg("Expense Distribution (%)");
    let (cx, cy) = (WIDTH / 2.0, HEIGHT / 2.0 + 15.0);
    let radius = HEIGHT / 2.0 - MARGIN;

    if slices.len() == 1 {
        let _ = write!(
            svg,
            "<circle cx='{cx}' cy='{cy}' r='{radius}' fill='{fill}'/>",
            fill = color(0)
        );
    }

    // Slices start at twelve o'clock and run clockwise.
    let mut angle = -PI / 2.0;
    for (idx, (label, value)) in slices.iter().enumerate() {
        let fraction = value / sum;
        let sweep = fraction * 2.0 * PI;
        let end = angle + sweep;

        if slices.len() > 1 {
            let (x1, y1) = (cx + radius * angle.cos(), cy + radius * angle.sin());
            let (x2, y2) = (cx + radius * end.cos(), cy + radius * end.sin());
            let large_arc = u8::from(sweep > PI);
            let _ = write!(
                svg,
                "<path d='M {cx:.1} {cy:.1} L {x1:.1} {y1:.1} A {radius:.1} {radius:.1} 0 \
                 {large_arc} 1 {x2:.1} {y2:.1} Z' fill='{fill}' stroke='white'/>",
                fill = color(idx)
            );
        }

        let middle = angle + sweep / 2.0;
        let (lx, ly) = (
            cx + radius * 0.6 * middle.cos(),
            cy + radius * 0.6 * middle.sin(),
        );
        let (nx, ny) = (
            cx + (radius + 18.0) * middle.cos(),
            cy + (radius + 18.0) * middle.sin(),
        );
        let anchor = if middle.cos() >= 0.0 { "start" } else { "end" };
        let _ = write!(
            svg,
            "<text x='{lx:.1}' y='{ly:.1}' text-anchor='middle' font-size='12' \
             font-weight='bold'>{percent:.1}%</text>\
             <text x='{nx:.1}' y='{ny:.1}' text-anchor='{anchor}' font-size='12' \
             font-weight='bold'>{name}</text>",
            percent = fraction * 100.0,
            name = escape(label),
        );

        angle = end;
    }

    svg.push_str("</svg>");
    Some(svg)
}
