//! Share card rendered as an SVG document. Implements CardExportPort by
//! writing the SVG next to the requested destination.

use crate::domain::share::card_text;
use crate::domain::{DomainError, Prediction, PredictionStatus, Tier};
use crate::ports::CardExportPort;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Stories format (9:16).
const CARD_WIDTH: u32 = 1080;
const CARD_HEIGHT: u32 = 1920;
/// Characters per line of wrapped card text.
const WRAP_CHARS: usize = 34;

const BG: &str = "#0f172a";
const FG: &str = "#f8fafc";
const MUTED: &str = "#94a3b8";
const EMERALD: &str = "#10b981";
const AMBER: &str = "#f59e0b";
const ROSE: &str = "#f43f5e";

fn status_colour(status: PredictionStatus) -> &'static str {
    match status {
        PredictionStatus::Fulfilled => EMERALD,
        PredictionStatus::Failed => ROSE,
        PredictionStatus::Pending => AMBER,
    }
}

fn tier_colour(tier: Tier) -> &'static str {
    match tier {
        Tier::High => EMERALD,
        Tier::Medium => AMBER,
        Tier::Low => ROSE,
    }
}

/// Escape text for use inside SVG elements and attributes.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Greedy word wrap by character count.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Render the share card for `prediction`.
pub fn render_card_svg(prediction: &Prediction) -> String {
    let expert = &prediction.expert;
    let status = prediction.status;
    let accent = status_colour(status);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = CARD_WIDTH,
        h = CARD_HEIGHT
    ));
    svg.push_str(&format!(
        "  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
        BG
    ));
    svg.push_str(&format!(
        "  <rect x=\"0\" y=\"0\" width=\"{}\" height=\"24\" fill=\"{}\"/>\n",
        CARD_WIDTH, accent
    ));

    // Expert
    svg.push_str(&format!(
        "  <text x=\"80\" y=\"220\" font-size=\"64\" font-weight=\"bold\" fill=\"{}\">{}</text>\n",
        FG,
        escape_xml(&expert.name)
    ));
    svg.push_str(&format!(
        "  <text x=\"80\" y=\"300\" font-size=\"44\" fill=\"{}\">Accuracy: {}%</text>\n",
        tier_colour(expert.accuracy_tier()),
        expert.accuracy_percent()
    ));
    svg.push_str(&format!(
        "  <text x=\"80\" y=\"380\" font-size=\"40\" fill=\"{}\">{} {}</text>\n",
        MUTED,
        escape_xml(&prediction.topic.icon),
        escape_xml(&prediction.topic.name)
    ));

    // Claim
    let mut y = 560;
    for line in wrap(&card_text(prediction), WRAP_CHARS) {
        svg.push_str(&format!(
            "  <text x=\"80\" y=\"{}\" font-size=\"56\" fill=\"{}\">{}</text>\n",
            y,
            FG,
            escape_xml(&line)
        ));
        y += 76;
    }

    // Verdict
    svg.push_str(&format!(
        "  <rect x=\"80\" y=\"1480\" width=\"920\" height=\"160\" rx=\"32\" fill=\"{}\" fill-opacity=\"0.15\"/>\n",
        accent
    ));
    svg.push_str(&format!(
        "  <text x=\"540\" y=\"1585\" font-size=\"64\" font-weight=\"bold\" text-anchor=\"middle\" fill=\"{}\">{}</text>\n",
        accent,
        escape_xml(status.label())
    ));
    svg.push_str(&format!(
        "  <text x=\"540\" y=\"1780\" font-size=\"36\" text-anchor=\"middle\" fill=\"{}\">Due {} · prognoznik.com</text>\n",
        MUTED,
        prediction.target_date.format("%-d %b %Y")
    ));
    svg.push_str("</svg>\n");
    svg
}

/// Writes the SVG card. Used directly when no rasterizer is configured.
#[derive(Debug, Default)]
pub struct SvgCardExporter;

impl SvgCardExporter {
    pub fn new() -> Self {
        Self
    }

    /// Write the SVG for `prediction` to `path`.
    pub async fn write_svg(prediction: &Prediction, path: &Path) -> Result<(), DomainError> {
        fs::write(path, render_card_svg(prediction))
            .await
            .map_err(|e| DomainError::Export(format!("write {}: {}", path.display(), e)))
    }
}

#[async_trait]
impl CardExportPort for SvgCardExporter {
    async fn export_card(
        &self,
        prediction: &Prediction,
        dest: &Path,
    ) -> Result<PathBuf, DomainError> {
        let path = dest.with_extension("svg");
        Self::write_svg(prediction, &path).await?;
        info!(path = %path.display(), "wrote SVG card (no rasterizer configured)");
        Ok(path)
    }
}
