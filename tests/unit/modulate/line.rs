use super::*;

fn params(
    threshold: u32,
    drawing_count: u32,
    interval_count: u32,
    line_width: u32,
) -> ParameterSet {
    ParameterSet {
        scale: 255.0,
        drawing_count,
        interval_count,
        line_width,
        threshold,
        ..ParameterSet::default()
    }
}

fn run(m: &mut LineModulator, lum: f64, n: usize) -> String {
    (0..n)
        .map(|_| if m.step(lum) { 'W' } else { '.' })
        .collect()
}

#[test]
fn luminance_is_unweighted_rgb_mean() {
    assert_eq!(luminance([0, 0, 0, 255]), 0.0);
    assert_eq!(luminance([30, 60, 90, 0]), 60.0);
    assert_eq!(luminance([255, 255, 255, 17]), 255.0);
}

#[test]
fn black_row_crosses_on_third_sample() {
    let mut m = LineModulator::new(&params(3, 1, 1, 1));
    assert_eq!(run(&mut m, 0.0, 4), "..W.");
}

#[test]
fn fresh_state_matches_reset_values() {
    let m = LineModulator::new(&params(3, 7, 1, 1));
    assert_eq!(
        *m.state(),
        ScanlineState {
            ink_accumulator: 0.0,
            draw_remaining: 0,
            drawing_remaining: 7,
            interval_remaining: 0,
        }
    );
}

#[test]
fn runs_last_exactly_line_width() {
    // Crossing every 5 samples, lines 3 wide.
    let mut m = LineModulator::new(&params(5, 100, 0, 3));
    assert_eq!(run(&mut m, 0.0, 15), "....WWW..WWW..W");
}

#[test]
fn bundles_alternate_with_interval_ticks() {
    let mut m = LineModulator::new(&params(1, 2, 2, 1));
    assert_eq!(run(&mut m, 0.0, 12), "WW..WW..WW..");
}

#[test]
fn zero_interval_never_refills_budget() {
    let mut m = LineModulator::new(&params(1, 2, 0, 1));
    assert_eq!(run(&mut m, 0.0, 8), "WW......");
    assert_eq!(m.state().drawing_remaining, 0);
    assert_eq!(m.state().interval_remaining, 0);
}

#[test]
fn crossing_during_a_run_restarts_it() {
    let mut m = LineModulator::new(&params(1, 3, 0, 2));
    assert_eq!(run(&mut m, 0.0, 6), "WWWW..");
}

#[test]
fn invert_accumulates_brightness() {
    let p = ParameterSet {
        invert: true,
        ..params(2, 10, 0, 1)
    };
    let mut dark = LineModulator::new(&p);
    assert_eq!(run(&mut dark, 0.0, 6), "......");

    let mut bright = LineModulator::new(&p);
    assert_eq!(run(&mut bright, 255.0, 6), ".W.W.W");
}

#[test]
fn threshold_zero_crosses_every_sample() {
    let mut m = LineModulator::new(&params(0, 3, 1, 1));
    // Bright pixels add no ink, but 0 >= 0 still counts as a crossing.
    assert_eq!(run(&mut m, 255.0, 8), "WWW.WWW.");
}

#[test]
fn reset_restores_scanline_start() {
    let mut m = LineModulator::new(&params(3, 1, 1, 1));
    let first = run(&mut m, 0.0, 7);
    m.reset();
    assert_eq!(run(&mut m, 0.0, 7), first);
}
