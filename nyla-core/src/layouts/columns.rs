use crate::models::Rect;

/// Layout which gives each window full height, but splits the width among them all.
/// Remainder pixels are left unused.
pub fn update(bounds: Rect, count: usize) -> Vec<Rect> {
    let width = bounds.width / count as u32;
    (0..count)
        .map(|i| {
            Rect::new(
                bounds.x + (i as u32 * width) as i32,
                bounds.y,
                width,
                bounds.height,
            )
        })
        .collect()
}
