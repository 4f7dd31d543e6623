use crypto_graph_wasm::domain::chart::CandleRenderOption;
use crypto_graph_wasm::view_state::{CandleViewState, HISTORY_PRELOAD_THRESHOLD, should_fetch_history};
use quickcheck_macros::quickcheck;

// 72px price axis leaves a 100px plot area: ten 10px candles
fn view() -> CandleViewState {
    CandleViewState::new(CandleRenderOption::initial(172.0, 300.0))
}

#[test]
fn initial_window_fits_plot_area() {
    let view = view();
    assert_eq!(view.option.area_width(), 100.0);
    assert_eq!(view.option.render_candle_count, 10);
    assert_eq!(view.option.render_start_index, 0);
    assert_eq!(view.translate_x, 0.0);
}

#[test]
fn pan_carries_whole_candles_into_start_index() {
    let mut view = view();
    view.pan(25.0, 100);
    assert_eq!(view.option.render_start_index, 2);
    assert!((view.translate_x - 5.0).abs() < 1e-9);

    view.pan(-12.0, 100);
    assert_eq!(view.option.render_start_index, 1);
    assert!((view.translate_x - 3.0).abs() < 1e-9);
}

#[test]
fn pan_inside_one_candle_only_moves_offset() {
    let mut view = view();
    view.pan(4.0, 100);
    assert_eq!(view.option.render_start_index, 0);
    assert_eq!(view.translate_x, 4.0);
}

#[test]
fn pan_past_newest_clamps_to_zero() {
    let mut view = view();
    view.pan(-40.0, 100);
    assert_eq!(view.option.render_start_index, 0);
    assert_eq!(view.translate_x, 0.0);

    view.pan(13.0, 100);
    view.pan(-30.0, 100);
    assert_eq!(view.option.render_start_index, 0);
    assert_eq!(view.translate_x, 0.0);
}

#[test]
fn pan_past_oldest_stops_at_last_candle() {
    let mut view = view();
    view.pan(1000.0, 5);
    assert_eq!(view.option.render_start_index, 4);
    assert_eq!(view.translate_x, 0.0);
}

#[quickcheck]
fn pan_keeps_offset_inside_one_candle(deltas: Vec<i16>, len: u8) -> bool {
    let len = len as usize + 1;
    let mut view = view();
    deltas.into_iter().all(|delta| {
        view.pan(delta as f64 / 3.0, len);
        (0.0..view.option.candle_width).contains(&view.translate_x)
            && view.option.render_start_index < len
    })
}

#[test]
fn visible_range_includes_partial_left_candle() {
    let view = view();
    assert_eq!(view.visible_range(50), 0..11);
    assert_eq!(view.visible_range(6), 0..6);
    assert_eq!(view.visible_range(0), 0..0);
    assert_eq!(view.remaining_history(50), 39);
}

#[test]
fn fetch_is_needed_near_the_loaded_edge() {
    let view = view();
    assert!(!view.needs_fetch(50, false));
    assert!(view.needs_fetch(25, false));
    assert!(!view.needs_fetch(25, true));
    assert!(!view.needs_fetch(0, false));

    assert!(should_fetch_history(HISTORY_PRELOAD_THRESHOLD - 1));
    assert!(!should_fetch_history(HISTORY_PRELOAD_THRESHOLD));
}

#[test]
fn slots_run_right_to_left_from_the_newest() {
    let mut view = view();
    assert_eq!(view.slot_x(0), 90.0);
    assert_eq!(view.slot_x(1), 80.0);
    assert_eq!(view.candle_center_x(0), 95.0);
    assert!((view.body_width() - 8.0).abs() < 1e-9);

    view.pan(23.0, 100);
    // start 2, offset 3
    assert_eq!(view.slot_x(2), 93.0);
}

#[test]
fn prepended_candles_shift_only_a_scrolled_view() {
    let mut live = view();
    live.shift_for_prepended(2);
    assert_eq!(live.option.render_start_index, 0);

    let mut scrolled = view();
    scrolled.pan(35.0, 100);
    scrolled.shift_for_prepended(2);
    assert_eq!(scrolled.option.render_start_index, 5);
}

#[test]
fn zoom_anchors_right_edge_and_scales_offset() {
    let mut view = view();
    view.pan(3.0, 100);
    view.zoom(10.0);
    assert_eq!(view.option.candle_width, 20.0);
    assert_eq!(view.option.render_candle_count, 5);
    assert_eq!(view.option.render_start_index, 0);
    assert!((view.translate_x - 6.0).abs() < 1e-9);
}

#[test]
fn zoom_is_clamped_to_width_bounds() {
    let mut view = view();
    view.zoom(100.0);
    assert_eq!(view.option.candle_width, 40.0);
    view.zoom(-100.0);
    assert_eq!(view.option.candle_width, 4.0);
    assert_eq!(view.option.render_candle_count, 25);
}

#[test]
fn reset_returns_to_newest_candles() {
    let mut view = view();
    view.pan(57.0, 100);
    view.zoom(5.0);
    view.reset(12.0);
    assert_eq!(view.option.render_start_index, 0);
    assert_eq!(view.translate_x, 0.0);
    assert_eq!(view.option.candle_width, 12.0);
    assert_eq!(view.option.width, 172.0);
}

#[test]
fn resize_keeps_position() {
    let mut view = view();
    view.pan(30.0, 100);
    view.resize(272.0, 300.0);
    assert_eq!(view.option.render_start_index, 3);
    assert_eq!(view.option.render_candle_count, 20);
}
