//! View - compose the site's current state into a [`Frame`].
//!
//! Pure: reads state, fills a frame, touches nothing else. The render loop
//! hands the frame to the renderer.
//!
//! Page pixels map to rows through `row_height_px`. Each region visible in the
//! viewport draws its content from the row its top edge lands on, clipped to
//! its own height. The nav bar is drawn last, over whatever is beneath it.

use crossterm::style::Color;

use super::site::Site;
use crate::content::format_utc_offset;
use crate::renderer::{Attrs, Frame, Line, Style};
use crate::state::viewport::ScrollSource;
use crate::types::{NavBarFlags, RegionId};

const ACCENT: Color = Color::Cyan;
const MUTED: Color = Color::DarkGrey;

/// Draw the whole screen.
pub fn compose(site: &Site, width: u16, height: u16) -> Frame {
    let mut frame = Frame::new(width, height);
    let row_px = site.config().row_height_px.max(1.0);
    let scroll = site.page().scroll_y();

    for (region, top) in site.page().visible_regions() {
        let first_row = ((top - scroll) / row_px).floor() as i32;
        let region_rows = site
            .config()
            .layout
            .iter()
            .find(|l| l.region == region)
            .map(|l| (l.height / row_px).ceil() as usize)
            .unwrap_or(0);

        for (offset, line) in region_lines(site, &region).into_iter().take(region_rows).enumerate() {
            frame.set(first_row + offset as i32, line);
        }
    }

    draw_nav(site, &mut frame);
    frame
}

// =============================================================================
// Sections
// =============================================================================

fn heading(title: &str) -> Line {
    let mut line = Line::new();
    line.push("── ", Style::fg(MUTED))
        .push(title, Style::fg(ACCENT).with(Attrs::BOLD))
        .push(" ──", Style::fg(MUTED));
    line
}

fn bullet(text: &str) -> Line {
    let mut line = Line::plain("  • ");
    line.push(text, Style::PLAIN);
    line
}

fn region_lines(site: &Site, region: &RegionId) -> Vec<Line> {
    let config = site.config();
    let content = &config.content;

    if config.hero.as_ref() == Some(region) {
        let mut rotating = Line::styled("  > ", Style::fg(MUTED));
        rotating
            .push(site.hero().text(), Style::fg(ACCENT))
            .push(site.hero().caret(), Style::fg(ACCENT).with(Attrs::BOLD));
        return vec![
            Line::new(),
            Line::new(),
            Line::styled(format!("  {}", content.name), Style::PLAIN.with(Attrs::BOLD)),
            Line::styled(format!("  {}", content.tagline), Style::fg(MUTED)),
            Line::new(),
            rotating,
        ];
    }

    let title = config
        .layout
        .iter()
        .find(|l| &l.region == region)
        .and_then(|l| l.title.clone())
        .unwrap_or_else(|| region.to_string());

    let mut lines = vec![Line::new(), heading(&title), Line::new()];

    match region.as_str() {
        "portfolio" => {
            lines.push(Line::plain(format!("  {}", content.tagline)));
            lines.push(Line::styled(
                format!("  Local time: UTC{}", format_utc_offset(config.utc_offset_minutes)),
                Style::fg(MUTED),
            ));
        }
        "tech-vault" => {
            for row in &content.tech_rows {
                lines.push(Line::styled(format!("  {}", row.join(" · ")), Style::fg(MUTED)));
            }
            lines.push(Line::new());
            let skills = site.skills();
            if let Some(pin) = skills.selected() {
                lines.push(Line::styled(
                    format!("  {} [{}] {}", pin.label, pin.level.label(), pin.blurb),
                    Style::fg(ACCENT),
                ));
            }
            if skills.is_open() {
                for pin in skills.pins() {
                    lines.push(bullet(&format!("{} ({})", pin.label, pin.level.label())));
                }
            } else {
                lines.push(Line::styled(
                    format!("  {} skills", skills.pins().len()),
                    Style::fg(MUTED),
                ));
            }
        }
        "projects" => {
            for project in &content.projects {
                lines.push(Line::styled(format!("  {}", project.name), Style::PLAIN.with(Attrs::BOLD)));
                lines.push(Line::styled(format!("    {}", project.blurb), Style::fg(MUTED)));
            }
        }
        "experience" => {
            let drawer = site.drawer();
            for (i, entry) in drawer.entries().iter().enumerate() {
                lines.push(Line::plain(format!(
                    "  {}. {} @ {} ({})",
                    i + 1,
                    entry.role,
                    entry.company,
                    entry.dates
                )));
            }
            lines.push(Line::new());
            match drawer.current() {
                Some(entry) => {
                    for detail in &entry.details {
                        lines.push(bullet(detail));
                    }
                    lines.push(Line::styled("  (Esc to close)", Style::fg(MUTED)));
                }
                None => lines.push(Line::styled("  (e + number for details)", Style::fg(MUTED))),
            }
        }
        "contact" => {
            let mut email = Line::plain(format!("  {}", config.contact.email));
            if site.copy_feedback().is_copied() {
                email.push("  copied!", Style::fg(Color::Green).with(Attrs::BOLD));
            } else {
                email.push("  (c to copy)", Style::fg(MUTED));
            }
            lines.push(email);
            for link in &content.contacts {
                lines.push(bullet(&format!("{}: {}", link.label, link.href)));
            }
        }
        _ => {}
    }

    lines
}

// =============================================================================
// Nav bar
// =============================================================================

fn draw_nav(site: &Site, frame: &mut Frame) {
    let state = site.nav().state();
    let flags = state.bar_flags();
    let height = frame.height() as i32;

    let base = if flags.contains(NavBarFlags::SCROLLED) {
        Style::fg(Color::White)
    } else {
        Style::fg(MUTED)
    };

    let mut bar = Line::styled(
        format!(" {} ", site.config().content.name),
        base.with(Attrs::BOLD),
    );
    bar.push("│", Style::fg(MUTED));
    for (i, item) in site.nav().items().iter().enumerate() {
        let style = if item.anchor == state.active_anchor {
            Style::fg(ACCENT).with(Attrs::UNDERLINE | Attrs::BOLD)
        } else {
            base
        };
        bar.push(" ", base).push(format!("{} {}", i + 1, item.label), style);
    }
    bar.push("  [m]enu", Style::fg(MUTED));

    let docked_bottom = flags.contains(NavBarFlags::DOCK_BOTTOM);
    let bar_row = if docked_bottom { height - 1 } else { 0 };
    frame.set(bar_row, bar);

    if flags.contains(NavBarFlags::MENU_OPEN) {
        let items = site.nav().items();
        for (i, item) in items.iter().enumerate() {
            let style = if item.anchor == state.active_anchor {
                Style::fg(ACCENT).with(Attrs::REVERSE)
            } else {
                Style::PLAIN
            };
            let line = Line::styled(format!("   {} {}   ", i + 1, item.label), style);
            // menu opens away from the bar
            let row = if docked_bottom {
                bar_row - (items.len() - i) as i32
            } else {
                bar_row + 1 + i as i32
            };
            frame.set(row, line);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::state::keyboard::reset_keyboard_state;
    use std::time::Duration;

    // 40 rows of 16px
    fn setup() -> Site {
        reset_keyboard_state();
        let site = Site::new(SiteConfig::default(), 640.0).unwrap();
        site.activate();
        site
    }

    #[test]
    fn test_bar_docks_bottom_in_hero() {
        let site = setup();
        let frame = compose(&site, 120, 40);
        assert!(frame.text(39).contains("1 About"));
        assert!(!frame.text(0).contains("1 About"));
    }

    #[test]
    fn test_bar_docks_top_outside_hero() {
        let site = setup();
        site.select(2);
        let frame = compose(&site, 120, 40);
        assert!(frame.text(0).contains("3 Projects"));
        assert!(frame.find("Projects ──").is_some());
    }

    #[test]
    fn test_hero_shows_rotating_text() {
        let site = setup();
        site.advance(Duration::from_millis(120));
        let frame = compose(&site, 120, 40);
        let typed = site.hero().text();
        assert_eq!(typed.chars().count(), 2);
        assert!(frame.find(&format!("> {}", typed)).is_some());
    }

    #[test]
    fn test_menu_lists_items() {
        let site = setup();
        site.nav().toggle_menu();
        let frame = compose(&site, 120, 40);
        let items = site.nav().items();
        // opens upward from the bottom bar
        assert!(frame.text(39 - items.len() as u16).contains("1 About"));
        assert!(frame.text(38).contains("5 Contact"));
    }

    #[test]
    fn test_drawer_details_shown() {
        let site = setup();
        site.select(3);
        assert!(compose(&site, 200, 40).find("e + number").is_some());

        site.drawer_mut().open(0);
        let detail = site.drawer().entries()[0].details[0].clone();
        let frame = compose(&site, 200, 40);
        assert!(frame.find(&detail).is_some());
        assert!(frame.find("Esc to close").is_some());
    }

    #[test]
    fn test_copied_feedback_shown() {
        let site = setup();
        site.select(4);
        site.copy_email();
        let frame = compose(&site, 120, 40);
        assert!(frame.find("copied!").is_some());
    }
}
