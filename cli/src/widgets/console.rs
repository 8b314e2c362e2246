use std::collections::VecDeque;

use ratatui::{
  layout::Rect,
  widgets::{Block, Borders, List, ListItem},
  Frame,
};

/// Most recent diagnostic lines, newest at the bottom
pub fn draw(frame: &mut Frame, area: Rect, lines: &VecDeque<String>) {
  let visible = area.height.saturating_sub(2) as usize;
  let skip = lines.len().saturating_sub(visible);

  let items: Vec<ListItem> = lines
    .iter()
    .skip(skip)
    .map(|line| ListItem::new(line.as_str()))
    .collect();

  let list = List::new(items).block(Block::default().title(" Console ").borders(Borders::ALL));
  frame.render_widget(list, area);
}
