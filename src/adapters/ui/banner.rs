//! Welcome banner: "PROGNOZNIK" in figlet with a vertical gradient.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Emerald (#10b981).
const EMERALD: (u8, u8, u8) = (0x10, 0xb9, 0x81);
/// Amber (#f59e0b).
const AMBER: (u8, u8, u8) = (0xf5, 0x9e, 0x0b);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

fn banner_art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("PROGNOZNIK").map(|f| f.to_string()))
        .unwrap_or_else(|| "PROGNOZNIK\n".to_string())
}

/// Prints the banner, version and tagline.
pub fn print_welcome() {
    let mut out = stdout();
    let art = banner_art();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(EMERALD, AMBER, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: EMERALD.0,
        g: EMERALD.1,
        b: EMERALD.2,
    }));
    let _ = out.execute(Print(format!("v{}\r\n", version)));
    let _ = out.execute(Print(
        "We record expert predictions · check them · publish the actual results\r\n",
    ));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
