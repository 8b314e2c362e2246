use ratatui::layout::Rect;

/// A `width` x `height` box in the middle of `area`, clamped to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
	let width = width.min(area.width);
	let height = height.min(area.height);

	Rect::new(
		area.x + (area.width - width) / 2,
		area.y + (area.height - height) / 2,
		width,
		height,
	)
}
