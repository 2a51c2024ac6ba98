// Plain-text rendering of events, stats and the live dashboard

use std::fmt::Write;

use client_application::ViewState;
use client_domain::{
    clamp_chars, format_timestamp, ConnectionState, Event, Notification, Severity, Stats,
    UpdateMode,
};

const TITLE_COLUMN: usize = 40;
const SOURCE_COLUMN: usize = 16;
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub fn render_stats(stats: Option<&Stats>) -> String {
    match stats {
        Some(stats) => format!(
            "Total {}  |  Pending {}  |  Processing {}  |  Processed {}  |  Failed {}   [{}]",
            stats.total,
            stats.pending,
            stats.processing,
            stats.processed,
            stats.failed,
            stats.mode_label()
        ),
        None => "Total -  |  Pending -  |  Processed -  |  Failed -".to_string(),
    }
}

pub fn render_events(events: &[Event]) -> String {
    if events.is_empty() {
        return "No events yet. Create one to get started.".to_string();
    }
    let mut out = format!(
        "{:>6}  {:<title$}  {:<12}  {:<10}  {:<source$}  {}\n",
        "ID",
        "TITLE",
        "TYPE",
        "STATUS",
        "SOURCE",
        "CREATED",
        title = TITLE_COLUMN,
        source = SOURCE_COLUMN,
    );
    for event in events {
        let _ = writeln!(
            out,
            "{:>6}  {:<title$}  {:<12}  {:<10}  {:<source$}  {}",
            format!("#{}", event.id),
            clamp_chars(&event.title, TITLE_COLUMN),
            event.event_type.as_str(),
            event.status.as_str(),
            clamp_chars(&event.source, SOURCE_COLUMN),
            format_timestamp(event.created_at.as_ref()),
            title = TITLE_COLUMN,
            source = SOURCE_COLUMN,
        );
    }
    out.pop();
    out
}

pub fn render_event(event: &Event) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Event #{}", event.id);
    let _ = writeln!(out, "  title:       {}", event.title);
    let _ = writeln!(
        out,
        "  description: {}",
        event.description.as_deref().unwrap_or("-")
    );
    let _ = writeln!(out, "  source:      {}", event.source);
    let _ = writeln!(out, "  type:        {}", event.event_type);
    let _ = writeln!(out, "  status:      {}", event.status);
    let _ = writeln!(
        out,
        "  created:     {}",
        format_timestamp(event.created_at.as_ref())
    );
    let _ = writeln!(
        out,
        "  processed:   {}",
        format_timestamp(event.processed_at.as_ref())
    );
    if let Some(retries) = event.retry_count {
        let _ = writeln!(out, "  retries:     {}", retries);
    }
    out.pop();
    out
}

pub fn render_notification(notification: &Notification) -> String {
    let tag = match notification.severity {
        Severity::Success => "ok",
        Severity::Error => "error",
        Severity::Info => "info",
    };
    format!("[{}] {}", tag, notification.message)
}

pub fn render_connection(mode: UpdateMode, connection: Option<ConnectionState>) -> String {
    match (mode, connection) {
        (UpdateMode::Push, Some(state)) => format!("push: {}", state.label()),
        (UpdateMode::Push, None) => "push".to_string(),
        (UpdateMode::Poll, _) => "poll".to_string(),
    }
}

/// One full dashboard frame.
pub fn render_view(view: &ViewState, question: Option<&str>) -> String {
    let mut out = String::from(CLEAR_SCREEN);
    let _ = writeln!(
        out,
        "EventHub  ({}){}",
        render_connection(view.mode, view.connection),
        if view.loading { "  loading..." } else { "" }
    );
    let _ = writeln!(out, "{}", render_stats(view.stats.as_ref()));
    out.push('\n');
    let _ = writeln!(out, "{}", render_events(view.events.as_slice()));
    out.push('\n');
    let _ = writeln!(
        out,
        "form: title=\"{}\" description=\"{}\" source=\"{}\" type={}{}",
        view.form.title,
        view.form.description,
        view.form.source,
        view.form.event_type,
        if view.submitting { "  (submitting...)" } else { "" }
    );
    if let Some(notification) = &view.notification {
        let _ = writeln!(out, "{}", render_notification(notification));
    }
    match question {
        Some(question) => {
            let _ = write!(out, "{} [yes/no] ", question);
        }
        None => out.push_str("> "),
    }
    out
}
