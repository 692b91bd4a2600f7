//! Plain-text renderers for the terminal views. Pure functions returning
//! strings so the prompt loop stays thin.

use crate::domain::grouping::{GroupBy, GroupStats, PredictionGroup};
use crate::domain::share::{displayed_quote, is_long_quote, source_link};
use crate::domain::view_state::{GroupPanelState, QuoteState};
use crate::domain::{Expert, Prediction, PredictionStatus, Tier, Topic, TopicLeader};
use crate::usecases::ExpertPage;
use chrono::NaiveDate;
use crossterm::style::{StyledContent, Stylize};

fn tier_styled(text: String, tier: Tier) -> StyledContent<String> {
    match tier {
        Tier::High => text.green(),
        Tier::Medium => text.yellow(),
        Tier::Low => text.red(),
    }
}

fn status_badge(status: PredictionStatus) -> StyledContent<String> {
    let text = format!("[{}]", status.label());
    match status {
        PredictionStatus::Fulfilled => text.green(),
        PredictionStatus::Failed => text.red(),
        PredictionStatus::Pending => text.yellow(),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

fn stats_line(stats: &GroupStats) -> String {
    format!(
        "{} {}  {} {}  {} {}",
        "✔".green(),
        stats.fulfilled,
        "✖".red(),
        stats.failed,
        "⏳".yellow(),
        stats.pending
    )
}

/// One-line summary used in selection lists.
pub fn prediction_option(p: &Prediction) -> String {
    format!(
        "{} {} — {} ({})",
        p.topic.icon,
        p.expert.name,
        p.interpretation,
        p.status.label()
    )
}

/// Compact card for list views.
pub fn prediction_card(p: &Prediction) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "{}  ★ {:.1}  {}\n",
        p.expert.name.as_str().bold(),
        p.expert.rating,
        tier_styled(
            format!("{}% accuracy", p.expert.accuracy_percent()),
            p.expert.accuracy_tier()
        )
    ));
    s.push_str(&format!("  {} {}  {}\n", p.topic.icon, p.topic.name, status_badge(p.status)));
    s.push_str(&format!("  {}\n", p.interpretation));
    s.push_str(&format!(
        "  {} · {} · created {} · due {}\n",
        p.confidence.label(),
        p.verification_status.label(),
        format_date(p.created_at),
        format_date(p.target_date)
    ));
    s
}

/// Full detail view (the prediction modal).
pub fn prediction_detail(p: &Prediction, quote: QuoteState) -> String {
    let mut s = prediction_card(p);
    s.push('\n');
    s.push_str(&format!("  {}\n", "Original quote".dim()));
    s.push_str(&format!("  “{}”\n", displayed_quote(&p.original_quote, quote.expanded)));
    if is_long_quote(&p.original_quote) {
        let hint = if quote.expanded { "(collapse available)" } else { "(expand available)" };
        s.push_str(&format!("  {}\n", hint.dim()));
    }
    s.push('\n');
    s.push_str(&format!("  {} {}\n", "Result".dim(), status_badge(p.status)));
    match p.verification_result() {
        Some(result) => s.push_str(&format!("  {}\n", result)),
        None => s.push_str(&format!(
            "  Awaiting the verification date ({})\n",
            format_date(p.target_date)
        )),
    }
    if let Some(link) = p.evidence_link() {
        s.push_str(&format!("  {} {}\n", "Evidence:".dim(), link));
    }
    s.push_str(&format!("  {} {}\n", "Source:".dim(), source_link(p)));
    s
}

pub fn top_experts(experts: &[&Expert]) -> String {
    let mut s = format!("{}\n", "Top experts".bold());
    for (i, e) in experts.iter().enumerate() {
        s.push_str(&format!(
            "  #{} {}  ★ {:.1}  {}  {} predictions\n",
            i + 1,
            e.name,
            e.rating,
            tier_styled(format!("{}%", e.accuracy_percent()), e.accuracy_tier()),
            e.total_predictions
        ));
    }
    s
}

pub fn topic_leaders(leaders: &[TopicLeader<'_>]) -> String {
    let mut s = format!("{}\n", "Best expert by topic".bold());
    if leaders.is_empty() {
        s.push_str("  No data yet\n");
    }
    for l in leaders {
        let accuracy = l.stats.accuracy();
        s.push_str(&format!(
            "  {} {:<14} {}  {}  ({}/{} came true)\n",
            l.topic.icon,
            l.topic.name,
            l.stats.expert.name,
            tier_styled(
                format!("{}%", (accuracy * 100.0).round() as u32),
                Tier::from_ratio(accuracy)
            ),
            l.stats.fulfilled,
            l.stats.total
        ));
    }
    s
}

pub fn trending_topics(topics: &[&Topic]) -> String {
    let mut s = format!("{}\n", "Trending topics".bold());
    for t in topics {
        s.push_str(&format!(
            "  {} {:<14} {:>4} predictions  {} success\n",
            t.icon,
            t.name,
            t.predictions_count,
            tier_styled(format!("{}%", t.success_percent()), t.success_tier())
        ));
    }
    s
}

pub fn expert_header(page: &ExpertPage<'_>) -> String {
    let e = page.expert;
    let mut s = String::new();
    s.push_str(&format!("{}\n", e.name.as_str().bold()));
    s.push_str(&format!(
        "  ★ {:.1}  {}  {}\n",
        e.rating,
        tier_styled(format!("{}% accuracy", e.accuracy_percent()), e.accuracy_tier()),
        e.profile_link
    ));
    s.push_str(&format!(
        "  Total {}  ·  Came true {}  ·  Did not {}  ·  Pending {}\n",
        e.total_predictions,
        e.fulfilled_predictions,
        e.failed_predictions,
        e.pending_predictions()
    ));
    s.push_str(&format!(
        "  {} {} predictions  {}\n",
        "In this catalog:".dim(),
        page.stats.total,
        stats_line(&page.stats)
    ));
    s
}

pub fn group_header(group: &PredictionGroup<'_>, group_by: GroupBy, panel: &GroupPanelState) -> String {
    let chevron = if panel.is_open(&group.id) { "▾" } else { "▸" };
    let icon = group.icon.as_deref().map(|i| format!("{} ", i)).unwrap_or_default();
    let origin = match (group_by, &group.source_url) {
        (GroupBy::Source, Some(_)) => " · YouTube",
        _ => "",
    };
    format!(
        "{} {}{}{} — {} predictions  {}",
        chevron,
        icon,
        group.title,
        origin,
        group.stats.total,
        stats_line(&group.stats)
    )
}

/// Grouped predictions honouring the open/closed state of every group.
pub fn expert_groups(page: &ExpertPage<'_>, panel: &GroupPanelState) -> String {
    if page.groups.is_empty() {
        return "  This expert has no predictions yet\n".to_string();
    }
    let mut s = String::new();
    for g in &page.groups {
        s.push_str(&group_header(g, page.group_by, panel));
        s.push('\n');
        if panel.is_open(&g.id) {
            for p in &g.predictions {
                for line in prediction_card(p).lines() {
                    s.push_str("    ");
                    s.push_str(line);
                    s.push('\n');
                }
            }
        }
    }
    s
}
