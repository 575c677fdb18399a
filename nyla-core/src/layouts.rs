//! Tiling algorithms. Each one splits a bounding rect into cells, one per window.
mod columns;
mod grid;
mod rows;

use crate::models::{LayoutType, Rect};

/// Splits `bounds` into `count` cells for `layout`, each shrunk by `padding` when it fits.
#[must_use]
pub fn compute_layout(bounds: Rect, count: usize, padding: u32, layout: LayoutType) -> Vec<Rect> {
    let cells = match count {
        0 => return vec![],
        1 => vec![bounds],
        _ => match layout {
            LayoutType::Columns => columns::update(bounds, count),
            LayoutType::Rows => rows::update(bounds, count),
            LayoutType::Grid => grid::update(bounds, count),
        },
    };
    debug_assert_eq!(cells.len(), count);
    cells
        .into_iter()
        .map(|cell| cell.try_apply_padding(padding))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect::new(0, 20, 1920, 1060);
    const LAYOUTS: [LayoutType; 3] = [LayoutType::Columns, LayoutType::Rows, LayoutType::Grid];

    #[test]
    fn no_windows_means_no_cells() {
        for layout in LAYOUTS {
            assert!(compute_layout(BOUNDS, 0, 2, layout).is_empty());
        }
    }

    #[test]
    fn a_single_window_gets_the_padded_bounds() {
        for layout in LAYOUTS {
            assert_eq!(
                compute_layout(BOUNDS, 1, 2, layout),
                vec![Rect::new(0, 20, 1916, 1056)]
            );
        }
    }

    #[test]
    fn padding_that_does_not_fit_keeps_the_bounds() {
        let tiny = Rect::new(3, 4, 4, 4);
        assert_eq!(compute_layout(tiny, 1, 2, LayoutType::Rows), vec![tiny]);
    }

    #[test]
    fn every_layout_returns_one_cell_per_window() {
        for layout in LAYOUTS {
            for count in 0..20 {
                assert_eq!(compute_layout(BOUNDS, count, 2, layout).len(), count);
            }
        }
    }

    #[test]
    fn columns_are_contiguous_and_do_not_overlap() {
        for count in 1..10 {
            let cells = compute_layout(BOUNDS, count, 0, LayoutType::Columns);
            for pair in cells.windows(2) {
                assert_eq!(pair[0].x + pair[0].width as i32, pair[1].x);
                assert_eq!(pair[0].y, pair[1].y);
                assert_eq!(pair[0].height, BOUNDS.height);
            }
        }
    }

    #[test]
    fn rows_are_contiguous_and_do_not_overlap() {
        for count in 1..10 {
            let cells = compute_layout(BOUNDS, count, 0, LayoutType::Rows);
            for pair in cells.windows(2) {
                assert_eq!(pair[0].y + pair[0].height as i32, pair[1].y);
                assert_eq!(pair[0].x, pair[1].x);
                assert_eq!(pair[0].width, BOUNDS.width);
            }
        }
    }

    #[test]
    fn two_columns_split_the_width_evenly() {
        let cells = compute_layout(BOUNDS, 2, 2, LayoutType::Columns);
        assert_eq!(
            cells,
            vec![Rect::new(0, 20, 956, 1056), Rect::new(960, 20, 956, 1056)]
        );
    }

    #[test]
    fn small_grids_are_columns() {
        for count in 0..4 {
            assert_eq!(
                compute_layout(BOUNDS, count, 2, LayoutType::Grid),
                compute_layout(BOUNDS, count, 2, LayoutType::Columns)
            );
        }
    }

    #[test]
    fn a_grid_of_five_uses_two_columns_and_three_rows() {
        let bounds = Rect::new(0, 0, 100, 90);
        let cells = compute_layout(bounds, 5, 0, LayoutType::Grid);
        assert_eq!(
            cells,
            vec![
                Rect::new(0, 0, 50, 30),
                Rect::new(50, 0, 50, 30),
                Rect::new(0, 30, 50, 30),
                Rect::new(50, 30, 50, 30),
                Rect::new(0, 60, 50, 30),
            ]
        );
    }
}
