use std::collections::BTreeSet;

use super::*;

#[test]
fn counts_follow_orientation() {
    let s = DirectionalScanner::new(Direction::LeftToRight, 5, 3);
    assert_eq!((s.scanline_count(), s.position_count()), (3, 5));
    let s = DirectionalScanner::new(Direction::BottomToTop, 5, 3);
    assert_eq!((s.scanline_count(), s.position_count()), (5, 3));
}

#[test]
fn traversal_order_per_direction() {
    let collect = |d| {
        DirectionalScanner::new(d, 3, 2)
            .positions(1)
            .collect::<Vec<_>>()
    };
    assert_eq!(collect(Direction::LeftToRight), vec![(0, 1), (1, 1), (2, 1)]);
    assert_eq!(collect(Direction::RightToLeft), vec![(2, 1), (1, 1), (0, 1)]);
    assert_eq!(collect(Direction::TopToBottom), vec![(1, 0), (1, 1)]);
    assert_eq!(collect(Direction::BottomToTop), vec![(1, 1), (1, 0)]);
}

#[test]
fn reverse_visits_same_pixels_mirrored() {
    for (fwd, rev) in [
        (Direction::LeftToRight, Direction::RightToLeft),
        (Direction::TopToBottom, Direction::BottomToTop),
    ] {
        let f = DirectionalScanner::new(fwd, 4, 3);
        let r = DirectionalScanner::new(rev, 4, 3);
        for line in 0..f.scanline_count() {
            let mut a: Vec<_> = f.positions(line).collect();
            let b: Vec<_> = r.positions(line).collect();
            a.reverse();
            assert_eq!(a, b);
        }
    }
}

#[test]
fn every_pixel_visited_exactly_once() {
    for d in Direction::ALL {
        let s = DirectionalScanner::new(d, 4, 3);
        let mut seen = BTreeSet::new();
        for line in 0..s.scanline_count() {
            for xy in s.positions(line) {
                assert!(seen.insert(xy), "{d}: {xy:?} visited twice");
            }
        }
        assert_eq!(seen.len(), 12);
    }
}

#[test]
#[should_panic(expected = "out of range")]
fn out_of_range_index_panics() {
    DirectionalScanner::new(Direction::LeftToRight, 2, 2).coordinate_at(2, 0);
}
