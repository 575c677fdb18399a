use crate::models::Rect;

/// Fills rows left to right with `floor(sqrt(count))` columns. Fewer than four windows are
/// simply placed side by side.
pub fn update(bounds: Rect, count: usize) -> Vec<Rect> {
    if count < 4 {
        return super::columns::update(bounds, count);
    }
    let cols = count.isqrt();
    let rows = count.div_ceil(cols);
    let width = bounds.width / cols as u32;
    let height = bounds.height / rows as u32;
    (0..count)
        .map(|i| {
            let (col, row) = ((i % cols) as u32, (i / cols) as u32);
            Rect::new(
                bounds.x + (col * width) as i32,
                bounds.y + (row * height) as i32,
                width,
                height,
            )
        })
        .collect()
}
