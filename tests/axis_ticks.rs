use crypto_graph_wasm::domain::chart::{
    PriceScale, decimals_for_step, format_price, linear_ticks, price_decimals, tick_step,
    time_label_stride,
};
use crypto_graph_wasm::domain::market_data::Price;
use insta::assert_snapshot;

fn render(ticks: &[f64], decimals: usize) -> String {
    ticks.iter().map(|t| format_price(*t, decimals)).collect::<Vec<_>>().join(" | ")
}

#[test]
fn price_scale_pads_visible_range() {
    let scale = PriceScale::new(Price::from(100.0), Price::from(200.0), 100.0);
    assert_eq!((scale.min_price, scale.max_price), (90.0, 210.0));
    assert_eq!(scale.price_to_y(210.0), 0.0);
    assert_eq!(scale.price_to_y(90.0), 100.0);
    assert_eq!(scale.y_to_price(50.0), 150.0);
}

#[test]
fn flat_range_still_gets_room() {
    let scale = PriceScale::new(Price::from(500.0), Price::from(500.0), 80.0);
    assert_eq!((scale.min_price, scale.max_price), (495.0, 505.0));

    let tiny = PriceScale::new(Price::from(0.5), Price::from(0.5), 80.0);
    assert_eq!((tiny.min_price, tiny.max_price), (-0.5, 1.5));
}

#[test]
fn price_scale_ticks() {
    let scale = PriceScale::new(Price::from(100.0), Price::from(200.0), 100.0);
    let ticks = scale.ticks();
    let decimals = decimals_for_step(tick_step(scale.min_price, scale.max_price, 6));
    assert_snapshot!(render(&ticks, decimals), @"100 | 120 | 140 | 160 | 180 | 200");
}

#[test]
fn ticks_for_large_krw_prices() {
    let ticks = linear_ticks(93_000_000.0, 95_000_000.0, 6);
    assert_snapshot!(
        render(&ticks, 0),
        @"93,000,000 | 93,500,000 | 94,000,000 | 94,500,000 | 95,000,000"
    );
}

#[test]
fn ticks_for_sub_unit_prices() {
    let step = tick_step(0.0012, 0.0031, 5);
    let ticks = linear_ticks(0.0012, 0.0031, 5);
    assert_snapshot!(render(&ticks, decimals_for_step(step)), @"0.0015 | 0.0020 | 0.0025 | 0.0030");
}

#[test]
fn degenerate_tick_ranges() {
    assert_eq!(tick_step(5.0, 5.0, 5), 0.0);
    assert_eq!(linear_ticks(5.0, 5.0, 5), vec![5.0]);
    assert_eq!(linear_ticks(0.0, 100.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
}

#[test]
fn price_formatting() {
    assert_eq!(format_price(1_234_567.891, 2), "1,234,567.89");
    assert_eq!(format_price(-1_234.4, 0), "-1,234");
    assert_eq!(format_price(-0.001, 2), "0.00");
    assert_eq!(format_price(999.0, 0), "999");

    assert_eq!(decimals_for_step(20.0), 0);
    assert_eq!(decimals_for_step(0.5), 1);
    assert_eq!(decimals_for_step(0.05), 2);

    let decimals: Vec<usize> = [95_000_000.0, 42.5, 0.25, 0.0012].iter().map(|p| price_decimals(*p)).collect();
    assert_eq!(decimals, vec![0, 2, 4, 6]);
}

#[test]
fn time_labels_thin_out_for_narrow_candles() {
    assert_eq!(time_label_stride(64.0), 1);
    assert_eq!(time_label_stride(10.0), 7);
    assert_eq!(time_label_stride(4.0), 16);
    assert_eq!(time_label_stride(0.0), 1);
}
