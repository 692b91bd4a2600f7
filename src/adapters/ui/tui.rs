//! Implements InputPort. Inquire-based interactive catalog browser.
//!
//! Screens own their view state (filters, open groups, modal, quote) and
//! recompute views from the catalog on every change.

use crate::adapters::ui::render;
use crate::domain::filter::{ConfidenceSelector, IdSelector, Selector, StatusSelector};
use crate::domain::grouping::GroupBy;
use crate::domain::view_state::{FilterState, GroupPanelState, ModalState, QuoteState};
use crate::domain::{Confidence, DomainError, Prediction, PredictionStatus};
use crate::ports::InputPort;
use crate::usecases::{CatalogService, ExpertProfile, ExportService, ShareService};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::error::InquireError;
use inquire::list_option::ListOption;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Select, Text};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const MENU_BROWSE: &str = "Browse predictions";
const MENU_TOP: &str = "Top experts";
const MENU_LEADERS: &str = "Best expert by topic";
const MENU_TRENDING: &str = "Trending topics";
const MENU_EXPERT: &str = "Expert page";
const MENU_QUIT: &str = "Quit";

const BACK: &str = "← Back";

/// Emerald prompt styling for every inquire prompt. Call once at startup.
pub fn apply_theme() {
    let emerald = Color::Rgb {
        r: 0x10,
        g: 0xb9,
        b: 0x81,
    };
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("?").with_fg(emerald))
        .with_highlighted_option_prefix(Styled::new("›").with_fg(emerald))
        .with_answered_prompt_prefix(Styled::new("✔").with_fg(emerald));
    inquire::set_global_render_config(config);
}

/// Map inquire errors: Esc / Ctrl-C mean "back", anything else is a UI error.
fn prompt<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

/// Position of the picked option. Labels may repeat, so the index comes
/// from the prompt itself.
fn picked_index<T>(result: Result<ListOption<T>, InquireError>) -> Result<Option<usize>, DomainError> {
    Ok(prompt(result)?.map(|option| option.index))
}

/// Select by index over labelled options. `None` on cancel.
fn select_index(message: &str, options: Vec<String>) -> Result<Option<usize>, DomainError> {
    if options.is_empty() {
        return Ok(None);
    }
    picked_index(Select::new(message, options).with_page_size(12).raw_prompt())
}

/// How the expert page resolves its expert.
#[derive(Debug, Clone, Copy)]
enum ExpertLookup<'a> {
    /// Known catalog id (navigation from a prediction).
    Id(&'a str),
    /// Free-text handle typed by the user.
    Handle(&'a str),
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    catalog: Arc<CatalogService>,
    share: Arc<ShareService>,
    export: Arc<ExportService>,
}

impl TuiInputPort {
    pub fn new(
        catalog: Arc<CatalogService>,
        share: Arc<ShareService>,
        export: Arc<ExportService>,
    ) -> Self {
        Self {
            catalog,
            share,
            export,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Prediction list
    // ─────────────────────────────────────────────────────────────────────

    async fn browse(&self) -> Result<(), DomainError> {
        let mut filter = FilterState::default();
        loop {
            let visible = self.catalog.filtered(&filter);
            println!("\n{}", self.filter_summary(&filter, visible.len()));

            let mut options: Vec<String> = visible.iter().map(|p| render::prediction_option(p)).collect();
            let first_action = options.len();
            options.extend(
                [
                    "🔍 Search text",
                    "👤 Expert",
                    "🏷  Topic",
                    "📌 Status",
                    "🔥 Confidence",
                    "↺ Reset filters",
                    BACK,
                ]
                .map(String::from),
            );
            if visible.is_empty() {
                println!("No predictions found. Try changing the filters or the search query.");
            }

            let Some(idx) = select_index("Predictions", options)? else {
                return Ok(());
            };
            if idx < first_action {
                if let Some(expert_id) = self.prediction_modal(visible[idx]).await? {
                    self.expert_page(ExpertLookup::Id(&expert_id)).await?;
                }
                continue;
            }
            match idx - first_action {
                0 => {
                    if let Some(q) = prompt(
                        Text::new("Search (interpretation, quote, expert):")
                            .with_initial_value(&filter.query)
                            .prompt(),
                    )? {
                        filter.query = q;
                    }
                }
                1 => {
                    if let Some(sel) = self.pick_expert()? {
                        filter.expert = sel;
                    }
                }
                2 => {
                    if let Some(sel) = self.pick_topic()? {
                        filter.topic = sel;
                    }
                }
                3 => {
                    if let Some(sel) = pick_status()? {
                        filter.status = sel;
                    }
                }
                4 => {
                    if let Some(sel) = pick_confidence()? {
                        filter.confidence = sel;
                    }
                }
                5 => filter = FilterState::default(),
                _ => return Ok(()),
            }
            debug!(?filter, "filter changed");
        }
    }

    fn filter_summary(&self, filter: &FilterState, count: usize) -> String {
        if filter.is_empty() {
            return format!("{} predictions", count);
        }
        let catalog = self.catalog.catalog();
        let mut parts = Vec::new();
        if !filter.query.is_empty() {
            parts.push(format!("“{}”", filter.query));
        }
        if let Selector::Only(id) = &filter.expert {
            parts.push(catalog.expert(id).map(|e| e.name.clone()).unwrap_or_else(|| id.clone()));
        }
        if let Selector::Only(id) = &filter.topic {
            parts.push(catalog.topic(id).map(|t| t.name.clone()).unwrap_or_else(|| id.clone()));
        }
        if let Selector::Only(s) = filter.status {
            parts.push(s.label().to_string());
        }
        if let Selector::Only(c) = filter.confidence {
            parts.push(c.label().to_string());
        }
        format!("{} predictions · {}", count, parts.join(" · "))
    }

    fn pick_expert(&self) -> Result<Option<IdSelector>, DomainError> {
        let experts = self.catalog.catalog().experts();
        let mut options = vec!["All experts".to_string()];
        options.extend(experts.iter().map(|e| e.name.clone()));
        Ok(select_index("Expert", options)?.map(|i| match i {
            0 => Selector::All,
            i => Selector::Only(experts[i - 1].id.clone()),
        }))
    }

    fn pick_topic(&self) -> Result<Option<IdSelector>, DomainError> {
        let topics = self.catalog.catalog().topics();
        let mut options = vec!["All topics".to_string()];
        options.extend(topics.iter().map(|t| format!("{} {}", t.icon, t.name)));
        Ok(select_index("Topic", options)?.map(|i| match i {
            0 => Selector::All,
            i => Selector::Only(topics[i - 1].id.clone()),
        }))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Prediction modal (detail, quote toggle, share, export)
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the expert id when the user navigates to the expert page.
    async fn prediction_modal(&self, prediction: &Prediction) -> Result<Option<String>, DomainError> {
        let mut modal = ModalState::default();
        modal.open(&prediction.id);
        let mut quote = QuoteState::default();

        while modal.is_open() {
            println!("\n{}", render::prediction_detail(prediction, quote));

            let mut actions: Vec<&str> = Vec::new();
            if crate::domain::share::is_long_quote(&prediction.original_quote) {
                actions.push(if quote.expanded { "Collapse quote" } else { "Show full quote" });
            }
            actions.extend(["Share…", "Expert page", "Close"]);

            let Some(choice) = prompt(Select::new("Action", actions).prompt())? else {
                modal.close();
                break;
            };
            match choice {
                "Collapse quote" | "Show full quote" => quote.toggle(),
                "Share…" => {
                    modal.toggle_share();
                    self.share_modal(prediction).await?;
                    modal.toggle_share();
                }
                "Expert page" => return Ok(Some(prediction.expert.id.clone())),
                _ => modal.close(),
            }
        }
        Ok(None)
    }

    async fn share_modal(&self, prediction: &Prediction) -> Result<(), DomainError> {
        let content = self.share.content_for(prediction);
        loop {
            let mut actions = vec!["Share", "WhatsApp link", "Telegram link"];
            if !self.export.state().generating {
                actions.push("Download for Instagram / Stories");
            }
            actions.push(BACK);

            let Some(choice) = prompt(Select::new("Share prediction", actions).prompt())? else {
                return Ok(());
            };
            match choice {
                // Failures were already surfaced as notices; the modal stays open.
                "Share" => {
                    let _ = self.share.share(prediction).await;
                }
                "WhatsApp link" => println!("{}", content.whatsapp_link()),
                "Telegram link" => println!("{}", content.telegram_link()),
                "Download for Instagram / Stories" => {
                    let spinner = ProgressBar::new_spinner();
                    spinner.set_style(
                        ProgressStyle::with_template("{spinner} {msg}")
                            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                    );
                    spinner.set_message("Generating…");
                    spinner.enable_steady_tick(Duration::from_millis(100));
                    let result = self.export.export(prediction).await;
                    spinner.finish_and_clear();
                    if let Ok(path) = result {
                        println!("Saved to {}", path.display());
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Expert page
    // ─────────────────────────────────────────────────────────────────────

    async fn expert_page(&self, lookup: ExpertLookup<'_>) -> Result<(), DomainError> {
        let mut group_by = GroupBy::default();
        let mut panel: Option<GroupPanelState> = None;

        loop {
            let profile = match lookup {
                ExpertLookup::Id(id) => self.catalog.expert_page_by_id(id, group_by),
                ExpertLookup::Handle(handle) => self.catalog.expert_profile(handle, group_by),
            };
            let page = match profile {
                ExpertProfile::Found(page) => page,
                ExpertProfile::NotFound { .. } => {
                    println!("\nExpert not found");
                    return Ok(());
                }
            };
            // Open every group on first render and after a mode switch.
            if let Some(p) = panel.as_mut() {
                if p.group_by != group_by {
                    p.set_group_by(group_by, &page.groups);
                }
            }
            let state = panel.get_or_insert_with(|| GroupPanelState::new(group_by, &page.groups));

            println!("\n{}", render::expert_header(&page));
            println!("{}", render::expert_groups(&page, state));

            let other = match group_by {
                GroupBy::Source => GroupBy::Topic,
                GroupBy::Topic => GroupBy::Source,
            };
            let mut options = vec![format!("Group: {}", other)];
            options.extend(
                page.groups
                    .iter()
                    .map(|g| render::group_header(g, group_by, state)),
            );
            options.push("Open a prediction".to_string());
            options.push(BACK.to_string());

            let Some(idx) = select_index("Expert predictions", options)? else {
                return Ok(());
            };
            let groups = page.groups.len();
            if idx == 0 {
                group_by = other;
            } else if idx <= groups {
                state.toggle(&page.groups[idx - 1].id);
            } else if idx == groups + 1 {
                let labels: Vec<String> = page.predictions.iter().map(|p| render::prediction_option(p)).collect();
                // Navigating to the expert page from here lands back on this page.
                if let Some(i) = select_index("Prediction", labels)? {
                    self.prediction_modal(page.predictions[i]).await?;
                }
            } else {
                return Ok(());
            }
        }
    }
}

fn pick_status() -> Result<Option<StatusSelector>, DomainError> {
    let mut options = vec!["All statuses".to_string()];
    options.extend(PredictionStatus::ALL.iter().map(|s| s.label().to_string()));
    Ok(select_index("Status", options)?.map(|i| match i {
        0 => Selector::All,
        i => Selector::Only(PredictionStatus::ALL[i - 1]),
    }))
}

fn pick_confidence() -> Result<Option<ConfidenceSelector>, DomainError> {
    let mut options = vec!["Any confidence".to_string()];
    options.extend(Confidence::ALL.iter().map(|c| c.label().to_string()));
    Ok(select_index("Confidence", options)?.map(|i| match i {
        0 => Selector::All,
        i => Selector::Only(Confidence::ALL[i - 1]),
    }))
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let menu = vec![
                MENU_BROWSE,
                MENU_TOP,
                MENU_LEADERS,
                MENU_TRENDING,
                MENU_EXPERT,
                MENU_QUIT,
            ];
            let Some(choice) = prompt(Select::new("Main menu", menu).prompt())? else {
                return Ok(());
            };
            match choice {
                MENU_BROWSE => self.browse().await?,
                MENU_TOP => println!("\n{}", render::top_experts(&self.catalog.top_experts())),
                MENU_LEADERS => println!("\n{}", render::topic_leaders(&self.catalog.topic_leaders())),
                MENU_TRENDING => {
                    println!("\n{}", render::trending_topics(&self.catalog.trending_topics()))
                }
                MENU_EXPERT => {
                    if let Some(handle) = prompt(
                        Text::new("Expert handle (e.g. @orlov_econ):").prompt(),
                    )? {
                        self.expert_page(ExpertLookup::Handle(handle.trim())).await?;
                    }
                }
                _ => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_and_interrupt_mean_back() {
        assert_eq!(prompt::<u8>(Err(InquireError::OperationCanceled)).unwrap(), None);
        assert_eq!(prompt::<u8>(Err(InquireError::OperationInterrupted)).unwrap(), None);
        assert_eq!(prompt(Ok(3u8)).unwrap(), Some(3));
    }

    #[test]
    fn test_other_prompt_errors_are_ui_errors() {
        let err = prompt::<u8>(Err(InquireError::NotTTY)).unwrap_err();
        assert!(matches!(err, DomainError::Ui(_)));
    }

    #[test]
    fn test_repeated_labels_resolve_to_picked_position() {
        use crate::domain::testing::{expert, prediction, topic};

        let anna = expert("e1", "Anna");
        let eco = topic("t1", "Economy");
        let mut list = vec![
            prediction("p1", &anna, &eco, PredictionStatus::Pending),
            prediction("p2", &anna, &eco, PredictionStatus::Pending),
        ];
        for (p, video) in list.iter_mut().zip(["a", "b"]) {
            p.source = format!("https://youtube.com/watch?v={}", video);
            p.source_title = Some("Weekly stream".into());
        }
        let groups = crate::domain::group_predictions(&list, GroupBy::Source);
        let panel = GroupPanelState::new(GroupBy::Source, &groups);
        let labels: Vec<String> = groups
            .iter()
            .map(|g| render::group_header(g, GroupBy::Source, &panel))
            .collect();
        assert_eq!(labels[0], labels[1]);

        let picked = picked_index(Ok(ListOption::new(1, labels[1].clone()))).unwrap();
        assert_eq!(picked, Some(1));
        assert_eq!(
            picked_index::<String>(Err(InquireError::OperationCanceled)).unwrap(),
            None
        );
    }

    #[test]
    fn test_select_index_on_empty_options() {
        assert_eq!(select_index("Nothing", Vec::new()).unwrap(), None);
    }
}
