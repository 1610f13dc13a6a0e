#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::game::{POINTS_PER_LINE, line_clear_points};

    #[test]
    fn test_no_lines_no_points() {
        assert_eq!(line_clear_points(0), 0);
    }

    #[test]
    fn test_single_line_has_no_bonus() {
        assert_eq!(line_clear_points(1), POINTS_PER_LINE);
    }

    #[test]
    fn test_multi_line_bonus_doubles() {
        // 200 + 50 + 100
        assert_eq!(line_clear_points(2), 350);
        // 300 + 50 + 100 + 200
        assert_eq!(line_clear_points(3), 650);
        // 400 + 50 + 100 + 200 + 400
        assert_eq!(line_clear_points(4), 1150);
    }

    #[test]
    fn test_points_grow_strictly() {
        let points: Vec<u32> = (0..=4).map(line_clear_points).collect();
        assert!(points.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_huge_clear_saturates() {
        assert_eq!(line_clear_points(64), u32::MAX);
    }
}
