//! Reusable UI components
//!
//! - `keybindings` - context-aware key registry (dispatch, nav bar, help)
//! - `help_overlay` - floating help window

pub mod help_overlay;
pub mod keybindings;

use ratatui::layout::Rect;

/// A rectangle of `width_percent` x `height_percent` of `parent`, centered,
/// with both dimensions clamped to `min..=max` and to the parent size.
pub fn centered_rect(
    parent: Rect,
    width_percent: u16,
    height_percent: u16,
    min: (u16, u16),
    max: (u16, u16),
) -> Rect {
    let width = (parent.width as u32 * width_percent as u32 / 100) as u16;
    let height = (parent.height as u32 * height_percent as u32 / 100) as u16;
    let width = width.clamp(min.0, max.0.max(min.0)).min(parent.width);
    let height = height.clamp(min.1, max.1.max(min.1)).min(parent.height);

    Rect {
        x: parent.x + (parent.width - width) / 2,
        y: parent.y + (parent.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_centered() {
        let parent = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(parent, 50, 50, (10, 5), (80, 30));
        assert_eq!(rect, Rect::new(25, 10, 50, 20));
    }

    #[test]
    fn test_centered_rect_respects_bounds() {
        let parent = Rect::new(0, 0, 30, 10);
        let rect = centered_rect(parent, 10, 10, (40, 15), (80, 30));
        assert_eq!(rect.width, 30);
        assert_eq!(rect.height, 10);
        assert_eq!((rect.x, rect.y), (0, 0));
    }
}
