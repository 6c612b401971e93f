// Handles the layout of the summary text and pushing it to the panel.

use super::canvas::Canvas;
use super::model::Snapshot;
use super::panel::Panel;
use anyhow::Result;
use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_7X14, FONT_8X13_BOLD, FONT_9X18_BOLD},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

pub const TITLE: &str = "Not a Honeypot";
pub const HEADING: &str = "Listening for:";
pub const MAX_SERVICES: usize = 8;

const MARGIN_X: i32 = 10;
const LINE_SPACING: u32 = 5;
const GAP_AFTER_STATUS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Status,
    Heading,
    Service,
}

impl LineKind {
    fn font(self) -> &'static MonoFont<'static> {
        match self {
            LineKind::Title => &FONT_9X18_BOLD,
            LineKind::Status | LineKind::Service => &FONT_7X14,
            LineKind::Heading => &FONT_8X13_BOLD,
        }
    }

    fn style(self) -> MonoTextStyle<'static, BinaryColor> {
        MonoTextStyle::new(self.font(), BinaryColor::On)
    }

    /// Vertical space below the line before the next one starts.
    fn gap(self) -> u32 {
        match self {
            LineKind::Status => LINE_SPACING + GAP_AFTER_STATUS,
            _ => LINE_SPACING,
        }
    }
}

/// One line of text at its final position on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub kind: LineKind,
    pub text: String,
    pub origin: Point,
}

impl TextLine {
    fn drawable(&self) -> Text<'_, MonoTextStyle<'static, BinaryColor>> {
        Text::with_baseline(&self.text, self.origin, self.kind.style(), Baseline::Top)
    }
}

fn measured_height(kind: LineKind, text: &str) -> u32 {
    Text::with_baseline(text, Point::zero(), kind.style(), Baseline::Top)
        .bounding_box()
        .size
        .height
}

/// Lays out title, status, heading and at most `MAX_SERVICES` service lines
/// as a block centred vertically in `extent` pixels.
pub fn layout(status: &str, services: &[String], extent: u32) -> Vec<TextLine> {
    let mut lines = vec![
        (LineKind::Title, TITLE.to_string()),
        (LineKind::Status, status.to_string()),
        (LineKind::Heading, HEADING.to_string()),
    ];
    lines.extend(
        services
            .iter()
            .take(MAX_SERVICES)
            .map(|s| (LineKind::Service, s.clone())),
    );

    let total: u32 = lines
        .iter()
        .map(|(kind, text)| measured_height(*kind, text) + kind.gap())
        .sum();
    let mut y = extent.saturating_sub(total) / 2;

    lines
        .into_iter()
        .map(|(kind, text)| {
            let origin = Point::new(MARGIN_X, y as i32);
            y += measured_height(kind, &text) + kind.gap();
            TextLine { kind, text, origin }
        })
        .collect()
}

/// Draws the snapshot on a fresh landscape canvas.
///
/// The canvas is `panel.height()` wide and `panel.width()` tall.
pub fn compose(snapshot: &Snapshot, width: u32, height: u32) -> Result<Canvas> {
    let mut canvas = Canvas::new(height, width);
    let status = snapshot.status.to_string();
    for line in layout(&status, &snapshot.services, width) {
        line.drawable().draw(&mut canvas)?;
    }
    Ok(canvas)
}

/// Wakes the panel, clears it, shows the snapshot and puts it back to sleep.
pub fn render<P: Panel>(panel: &mut P, snapshot: &Snapshot) -> Result<()> {
    panel.init()?;
    panel.clear()?;
    let canvas = compose(snapshot, panel.width(), panel.height())?;
    panel.display(&canvas)?;
    panel.sleep()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::model::StatusValue;

    fn services(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("SVC{i} on Port {}", 1000 + i)).collect()
    }

    #[test]
    fn line_order_and_margin() {
        let lines = layout("Active", &services(2), 176);
        let kinds: Vec<_> = lines.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Title,
                LineKind::Status,
                LineKind::Heading,
                LineKind::Service,
                LineKind::Service
            ]
        );
        assert_eq!(lines[0].text, TITLE);
        assert_eq!(lines[1].text, "Active");
        assert_eq!(lines[2].text, HEADING);
        assert!(lines.iter().all(|l| l.origin.x == 10));
    }

    #[test]
    fn at_most_eight_services() {
        let lines = layout("Active", &services(12), 176);
        let drawn: Vec<_> = lines
            .iter()
            .filter(|l| l.kind == LineKind::Service)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(drawn.len(), MAX_SERVICES);
        assert_eq!(drawn[7], "SVC7 on Port 1007");
    }

    #[test]
    fn block_is_vertically_centred() {
        // 18 + 14 + 13 + 14 font heights, 4 * 5 spacing, 10 extra after status.
        let lines = layout("Active", &services(1), 176);
        let total = 18 + 14 + 13 + 14 + 4 * 5 + 10;
        assert_eq!(lines[0].origin.y, (176 - total) / 2);
        assert_eq!(lines[1].origin.y, lines[0].origin.y + 18 + 5);
        assert_eq!(lines[2].origin.y, lines[1].origin.y + 14 + 5 + 10);
        assert_eq!(lines[3].origin.y, lines[2].origin.y + 13 + 5);
    }

    #[test]
    fn tall_block_starts_at_top() {
        let lines = layout("Active", &services(8), 176);
        assert_eq!(lines[0].origin.y, 0);
    }

    #[test]
    fn compose_uses_landscape_canvas() {
        let snapshot = Snapshot::new(StatusValue::Active, vec!["FTP on Port 21".into()]);
        let canvas = compose(&snapshot, 176, 264).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (264, 176));

        let ink: Vec<_> = canvas.ink_pixels().collect();
        assert!(!ink.is_empty());
        assert!(ink.iter().all(|(x, _)| *x >= 10));
    }

    #[derive(Default)]
    struct RecordingPanel {
        calls: Vec<&'static str>,
        shown: Option<Canvas>,
    }

    impl Panel for RecordingPanel {
        fn width(&self) -> u32 {
            176
        }
        fn height(&self) -> u32 {
            264
        }
        fn init(&mut self) -> Result<()> {
            self.calls.push("init");
            Ok(())
        }
        fn clear(&mut self) -> Result<()> {
            self.calls.push("clear");
            Ok(())
        }
        fn display(&mut self, image: &Canvas) -> Result<()> {
            self.calls.push("display");
            self.shown = Some(image.clone());
            Ok(())
        }
        fn sleep(&mut self) -> Result<()> {
            self.calls.push("sleep");
            Ok(())
        }
    }

    #[test]
    fn render_drives_the_panel_in_order() {
        let mut panel = RecordingPanel::default();
        let snapshot = Snapshot::new(StatusValue::Inactive, vec!["SSH on Port N/A".into()]);
        render(&mut panel, &snapshot).unwrap();

        assert_eq!(panel.calls, vec!["init", "clear", "display", "sleep"]);
        assert_eq!(panel.shown, Some(compose(&snapshot, 176, 264).unwrap()));
    }
}
