//! Plain-text rendering of sessions, templates and categories.

use std::time::Duration;

use deepwork_core::models::{BlockKind, Category, ScheduledSession, SessionTemplate, TimeBlock};

const DEEP: char = '●';
const SHALLOW: char = '○';
const BREAK: char = '·';

fn kind_symbol(kind: BlockKind) -> char {
    match kind {
        BlockKind::DeepWork => DEEP,
        BlockKind::ShallowWork => SHALLOW,
        BlockKind::Break => BREAK,
    }
}

fn kind_label(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::DeepWork => "Deep work",
        BlockKind::ShallowWork => "Shallow work",
        BlockKind::Break => "Break",
    }
}

/// `1h 30m`, `45m`, `2h`.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs() / 60;
    match (total / 60, total % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

fn category_names(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a session's schedule with a start time for every block.
///
/// Example output:
/// ```text
/// Morning Session [not_started] 1h 40m
///   08:00 ● Deep work     1h    Writing
///   09:00 · Break         10m
///   09:10 ○ Shallow work  30m   Email
/// ```
pub fn render_session(session: &ScheduledSession) -> String {
    let mut output = format!(
        "{} [{}] {}\n",
        session.name,
        session.status.as_str(),
        format_duration(session.total_duration())
    );

    let mut start = session.scheduled_start;
    for block in &session.time_blocks {
        render_block(&mut output, &start.format("%H:%M").to_string(), block);
        start += chrono::Duration::from_std(block.duration())
            .unwrap_or_else(|_| chrono::Duration::zero());
    }
    output
}

fn render_block(output: &mut String, time: &str, block: &TimeBlock) {
    let line = format!(
        "  {} {} {:<13} {:<5} {}",
        time,
        kind_symbol(block.kind()),
        kind_label(block.kind()),
        format_duration(block.duration()),
        category_names(block.categories())
    );
    output.push_str(line.trim_end());
    output.push('\n');
}

/// One line per session: id, start, name and size.
pub fn render_session_summary(session: &ScheduledSession) -> String {
    format!(
        "{}  {}  {}  ({} blocks, {}, {})",
        session.id,
        session.scheduled_start.format("%Y-%m-%d %H:%M"),
        session.name,
        session.time_blocks.len(),
        format_duration(session.total_duration()),
        session.status.as_str()
    )
}

pub fn render_template(template: &SessionTemplate) -> String {
    let mut output = format!(
        "{}  {}  {}\n",
        template.id,
        template.name,
        format_duration(template.total_duration())
    );
    for block in &template.time_blocks {
        let line = format!(
            "  {} {:<13} {:<5} {}",
            kind_symbol(block.kind),
            kind_label(block.kind),
            format_duration(block.duration),
            category_names(&block.categories)
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

/// `id  #RRGGBB  name`. The alpha channel is always opaque, so it is omitted.
pub fn render_category(category: &Category) -> String {
    format!(
        "{}  #{:06X}  {}",
        category.id,
        category.color & 0x00FF_FFFF,
        category.name
    )
}
