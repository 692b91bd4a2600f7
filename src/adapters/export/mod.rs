//! Card export adapters. Implement CardExportPort.

pub mod rasterizer;
pub mod svg_card;

pub use rasterizer::CommandRasterizer;
pub use svg_card::{SvgCardExporter, render_card_svg};
