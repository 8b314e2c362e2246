use ratatui::{
  layout::{Alignment, Rect},
  style::{Style, Stylize},
  text::{Line, Text},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
  Frame,
};

use super::util::centered_rect;

const POPUP_WIDTH: u16 = 60;

/// Modal popup for a failure message. Drawn last so it covers the panel.
pub fn draw(frame: &mut Frame, area: Rect, message: &str) {
  let text = Text::from(vec![
    Line::raw(message.to_string()),
    Line::raw(""),
    Line::from("[Enter] OK".bold()),
  ]);

  // borders plus the three lines above, with room for one wrapped line
  let popup = centered_rect(POPUP_WIDTH, 7, area);

  let paragraph = Paragraph::new(text)
    .block(
      Block::default()
        .title(" Alert ")
        .borders(Borders::ALL)
        .border_style(Style::new().red()),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

  frame.render_widget(Clear, popup);
  frame.render_widget(paragraph, popup);
}
