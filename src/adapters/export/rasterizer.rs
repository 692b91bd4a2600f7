//! Raster export through an external SVG → PNG converter (e.g. rsvg-convert,
//! inkscape, resvg). Implements CardExportPort.
//!
//! The command line may contain `{input}` and `{output}` placeholders;
//! without them the two paths are appended in that order.

use crate::adapters::export::svg_card::SvgCardExporter;
use crate::domain::{DomainError, Prediction};
use crate::ports::CardExportPort;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, info, warn};

const INPUT: &str = "{input}";
const OUTPUT: &str = "{output}";

pub struct CommandRasterizer {
    program: String,
    args: Vec<String>,
}

impl CommandRasterizer {
    /// Build from a whitespace-separated command line. `None` when empty.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(String::from);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    fn build_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.display().to_string();
        let output = output.display().to_string();
        let templated = self
            .args
            .iter()
            .any(|a| a.contains(INPUT) || a.contains(OUTPUT));
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|a| a.replace(INPUT, &input).replace(OUTPUT, &output))
            .collect();
        if !templated {
            args.push(input);
            args.push(output);
        }
        args
    }
}

#[async_trait]
impl CardExportPort for CommandRasterizer {
    async fn export_card(
        &self,
        prediction: &Prediction,
        dest: &Path,
    ) -> Result<PathBuf, DomainError> {
        let svg_path = dest.with_extension("svg");
        SvgCardExporter::write_svg(prediction, &svg_path).await?;

        let args = self.build_args(&svg_path, dest);
        debug!(program = %self.program, ?args, "rasterizing card");
        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|e| DomainError::Export(format!("spawn {}: {}", self.program, e)));

        // Intermediate SVG is removed whatever the outcome.
        if let Err(e) = fs::remove_file(&svg_path).await {
            warn!(path = %svg_path.display(), error = %e, "could not remove intermediate SVG");
        }

        let output = output?;
        if !output.status.success() {
            return Err(DomainError::Export(format!(
                "{} failed ({}): {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        if !fs::try_exists(dest).await.unwrap_or(false) {
            return Err(DomainError::Export(format!(
                "{} produced no file at {}",
                self.program,
                dest.display()
            )));
        }

        info!(path = %dest.display(), "rasterized card");
        Ok(dest.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args_appends_paths() {
        let r = CommandRasterizer::from_command_line("rsvg-convert -f png -o").unwrap();
        let args = r.build_args(Path::new("/tmp/a.svg"), Path::new("/tmp/a.png"));
        assert_eq!(args, vec!["-f", "png", "-o", "/tmp/a.svg", "/tmp/a.png"]);
    }

    #[test]
    fn test_build_args_placeholders() {
        let r = CommandRasterizer::from_command_line("resvg {input} {output} --width 1080").unwrap();
        let args = r.build_args(Path::new("in.svg"), Path::new("out.png"));
        assert_eq!(args, vec!["in.svg", "out.png", "--width", "1080"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_copy_command_acts_as_rasterizer() {
        use crate::domain::PredictionStatus;
        use crate::domain::testing::{expert, prediction, topic};

        let dir = tempfile::tempdir().unwrap();
        let p = prediction(
            "p9",
            &expert("e1", "Anna"),
            &topic("t1", "Economy"),
            PredictionStatus::Fulfilled,
        );
        let dest = dir.path().join("prediction-p9.png");
        let written = CommandRasterizer::from_command_line("cp")
            .unwrap()
            .export_card(&p, &dest)
            .await
            .unwrap();
        assert_eq!(written, dest);
        assert!(dest.exists());
        assert!(!dir.path().join("prediction-p9.svg").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_command_is_export_error() {
        use crate::domain::PredictionStatus;
        use crate::domain::testing::{expert, prediction, topic};

        let dir = tempfile::tempdir().unwrap();
        let p = prediction(
            "p9",
            &expert("e1", "Anna"),
            &topic("t1", "Economy"),
            PredictionStatus::Fulfilled,
        );
        let err = CommandRasterizer::from_command_line("false")
            .unwrap()
            .export_card(&p, &dir.path().join("x.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Export(_)));
    }
}
