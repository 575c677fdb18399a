use crate::models::Rect;

/// Layout which gives each window full width, but splits the height among them all.
pub fn update(bounds: Rect, count: usize) -> Vec<Rect> {
    let height = bounds.height / count as u32;
    (0..count)
        .map(|i| {
            Rect::new(
                bounds.x,
                bounds.y + (i as u32 * height) as i32,
                bounds.width,
                height,
            )
        })
        .collect()
}
