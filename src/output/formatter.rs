use std::io::IsTerminal;
use chrono::Duration;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::assessment::{AdminStats, CompletedSummary};
use crate::config::Settings;
use crate::questions::Question;
use crate::scoring::{Decision, GateStatus, RankedItem, Rag, Results, RoadmapSource};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Fit text into what is left of the terminal after `fixed_width` columns.
/// Pipes get the full text.
fn fit(text: &str, fixed_width: usize) -> String {
    match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => truncate_text(text, width - fixed_width),
        Some(_) => truncate_text(text, 20),
        None => text.to_string(),
    }
}

fn paint_rag(rag: Rag, use_colors: bool) -> String {
    let label = match rag {
        Rag::Green => "GREEN",
        Rag::Amber => "AMBER",
        Rag::Red => "RED",
    };
    let padded = format!("{:<5}", label);
    if !use_colors {
        return padded;
    }
    match rag {
        Rag::Green => padded.green().to_string(),
        Rag::Amber => padded.yellow().to_string(),
        Rag::Red => padded.red().to_string(),
    }
}

fn paint_gate(status: GateStatus, use_colors: bool) -> String {
    let label = match status {
        GateStatus::Pass => "PASS",
        GateStatus::Conditional => "CONDITIONAL",
        GateStatus::Fail => "FAIL",
    };
    let padded = format!("{:<11}", label);
    if !use_colors {
        return padded;
    }
    match status {
        GateStatus::Pass => padded.green().to_string(),
        GateStatus::Conditional => padded.yellow().to_string(),
        GateStatus::Fail => padded.red().to_string(),
    }
}

fn paint_decision(decision: Decision, use_colors: bool) -> String {
    if !use_colors {
        return decision.label().to_string();
    }
    match decision {
        Decision::Go => decision.label().green().bold().to_string(),
        Decision::GoWithConditions => decision.label().yellow().bold().to_string(),
        Decision::NoGo => decision.label().red().bold().to_string(),
    }
}

fn heading(title: &str, use_colors: bool) -> String {
    if use_colors {
        title.bold().underline().to_string()
    } else {
        title.to_string()
    }
}

/// Format ranked items as numbered lines: "1. QID  P3/G2  score 0  effort L  text"
fn format_ranked(items: &[RankedItem], empty: &str, use_colors: bool) -> String {
    if items.is_empty() {
        return format!("  {}", empty);
    }

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let index_str = format!("{:>2}.", idx + 1);
            let meta = format!(
                "{:<8} {}/{}  score {}  effort {}",
                item.qid, item.pillar, item.gate, item.score, item.effort.code()
            );
            let narrative = if item.risk_text.is_empty() {
                &item.text
            } else {
                &item.risk_text
            };
            let text = fit(narrative, index_str.len() + meta.len() + 5);
            if use_colors {
                format!("  {} {}  {}", index_str.dimmed(), meta.bold(), text)
            } else {
                format!("  {} {}  {}", index_str, meta, text)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a full results document for the terminal
pub fn format_results(results: &Results, use_colors: bool) -> String {
    let mut out = Vec::new();

    let overall = format!("{}/100", results.overall_score);
    if use_colors {
        out.push(format!(
            "Overall readiness: {}   Decision: {}",
            overall.bold(),
            paint_decision(results.decision, true)
        ));
    } else {
        out.push(format!(
            "Overall readiness: {}   Decision: {}",
            overall,
            results.decision.label()
        ));
    }
    out.push(format!(
        "Answered {} questions (settings v{})",
        results.answered_count, results.settings_version
    ));

    out.push(String::new());
    out.push(heading("Pillars", use_colors));
    for (pillar, result) in &results.pillar_results {
        out.push(format!(
            "  {:<4} {:>3}  {}  weight {:>2}  ({} answered)",
            pillar.code(),
            result.score,
            paint_rag(result.rag, use_colors),
            result.weight,
            result.answered
        ));
    }
    if !results.unscored_pillars.is_empty() {
        let codes: Vec<&str> = results.unscored_pillars.iter().map(|p| p.code()).collect();
        out.push(format!("  Not scored (no answers): {}", codes.join(", ")));
    }

    out.push(String::new());
    out.push(heading("Gates", use_colors));
    for (gate, result) in &results.gate_results {
        let mut line = format!("  {:<3} {}", gate.code(), paint_gate(result.status, use_colors));
        if !result.blockers.is_empty() {
            line.push_str(&format!("  blockers: {}", result.blockers.join(", ")));
        }
        out.push(line);
    }

    out.push(String::new());
    out.push(heading("Top risks", use_colors));
    out.push(format_ranked(&results.top_risks, "No critical risks.", use_colors));

    out.push(String::new());
    out.push(heading("Quick wins", use_colors));
    out.push(format_ranked(&results.quick_wins, "No quick wins identified.", use_colors));

    if !results.roadmap.is_empty() {
        out.push(String::new());
        out.push(heading("Roadmap", use_colors));
        for phase in &results.roadmap {
            out.push(format!("  {} ({})", phase.title, phase.horizon));
            for item in &phase.items {
                let tag = match item.source {
                    RoadmapSource::Risk => "risk",
                    RoadmapSource::QuickWin => "quick win",
                    RoadmapSource::Both => "risk, quick win",
                };
                let prefix = format!("    - {:<8} ", item.qid);
                let action = fit(&item.action, prefix.len() + tag.len() + 3);
                if use_colors {
                    out.push(format!("{}{} {}", prefix, action, format!("[{}]", tag).dimmed()));
                } else {
                    out.push(format!("{}{} [{}]", prefix, action, tag));
                }
            }
        }
    }

    out.join("\n")
}

/// Format active questions one per line in display order
pub fn format_question_list<'a, I>(questions: I, use_colors: bool) -> String
where
    I: IntoIterator<Item = &'a Question>,
{
    let lines: Vec<String> = questions
        .into_iter()
        .map(|q| {
            let meta = format!("{:<8} {:<4}{:<3} {}", q.qid, q.pillar.code(), q.gate.code(), q.effort.code());
            let id = format!("[{}]", q.id);
            let text = fit(&q.text, meta.len() + id.len() + 4);
            if use_colors {
                format!("{}  {}  {}", meta.bold(), text, id.dimmed())
            } else {
                format!("{}  {}  {}", meta, text, id)
            }
        })
        .collect();

    if lines.is_empty() {
        return "No active questions.".to_string();
    }
    lines.join("\n")
}

/// Format admin statistics
pub fn format_stats(stats: &AdminStats) -> String {
    let mut out = vec![
        format!("Assessments: {}", stats.total_assessments),
        format!("Completed:   {}", stats.completed_assessments),
        format!("Completion:  {}%", stats.completion_rate),
        format!("Avg score:   {}", stats.avg_score),
        "Decisions:".to_string(),
    ];
    for decision in Decision::ALL {
        let count = stats.decisions.get(decision.label()).copied().unwrap_or(0);
        out.push(format!("  {:<20} {}", decision.label(), count));
    }
    out.join("\n")
}

/// Format completed assessments as tab-separated values for scripting
/// Columns: id, company, email, score, decision, completed age
pub fn format_summaries_tsv(summaries: &[CompletedSummary], now: chrono::DateTime<chrono::Utc>) -> String {
    summaries
        .iter()
        .map(|s| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                s.id,
                s.company_name,
                s.email,
                s.overall_score,
                s.decision.label(),
                format_age(now - s.completed_at)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format pricing for the configured currency, plus booking links when set
pub fn format_pricing(settings: &Settings) -> String {
    let currency = settings.currency;
    let price = |amount: Option<u64>| match amount {
        Some(a) => format!("{} {}", currency, a),
        None => "n/a".to_string(),
    };

    let mut out = vec![
        format!("Tier A (detailed report): {}", price(settings.pricing.tier_a_price(currency))),
        format!("Tier B (guided review):   {}", price(settings.pricing.tier_b_price(currency))),
    ];
    if let Some(link) = &settings.guided_review_link {
        out.push(format!("Guided review: {}", link));
    }
    if let Some(link) = &settings.tier_c_booking_link {
        out.push(format!("Tier C booking: {}", link));
    }
    out.join("\n")
}

/// Format a duration into a human-readable age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}
