/// Default bounding window for auto-scaled viewing
pub const DEFAULT_MAX_WINDOW: (usize, usize) = (1600, 900);

/// Largest cell size (px) that lets a `map_width` x `map_height` grid fit
/// inside the bounding window, never below 1
pub fn calculate_cell_size(
    map_width: usize,
    map_height: usize,
    max_window_width: usize,
    max_window_height: usize,
) -> usize {
    let by_width = max_window_width.checked_div(map_width);
    let by_height = max_window_height.checked_div(map_height);

    let cell_size = match (by_width, by_height) {
        (Some(w), Some(h)) => w.min(h),
        (Some(w), None) => w,
        (None, Some(h)) => h,
        (None, None) => 1,
    };
    cell_size.max(1)
}

/// Window size in pixels for a grid drawn at `cell_size`, `None` on overflow
pub fn window_size(map_width: usize, map_height: usize, cell_size: usize) -> Option<(usize, usize)> {
    Some((map_width.checked_mul(cell_size)?, map_height.checked_mul(cell_size)?))
}
