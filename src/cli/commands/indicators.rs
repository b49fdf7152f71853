//! Indicators command implementation.

use anyhow::Result;
use cryptodash_config::{AppConfig, IndicatorSettings};
use cryptodash_core::traits::{Indicator, MultiOutputIndicator, OhlcvIndicator};
use cryptodash_core::types::OhlcvSeries;
use cryptodash_indicators::{
    Atr, BollingerBands, Ema, Ichimoku, Macd, Obv, Rsi, Sma, Stochastic, Vwap,
};
use serde::Serialize;

use super::{load_series, print_json};
use crate::cli::{IndicatorsArgs, OutputFormat};

#[derive(Debug, Serialize)]
struct MacdSnapshot {
    macd: f64,
    signal: f64,
    histogram: f64,
}

#[derive(Debug, Serialize)]
struct BollingerSnapshot {
    upper: f64,
    middle: f64,
    lower: f64,
    percent_b: Option<f64>,
}

#[derive(Debug, Serialize)]
struct StochasticSnapshot {
    k: f64,
    d: f64,
}

#[derive(Debug, Serialize)]
struct IchimokuSnapshot {
    tenkan_sen: Option<f64>,
    kijun_sen: Option<f64>,
    senkou_span_a: Option<f64>,
    senkou_span_b: Option<f64>,
}

/// Latest value of every indicator; `None` where the history is too short.
#[derive(Debug, Serialize)]
struct IndicatorSnapshot {
    bars: usize,
    last_close: Option<f64>,
    sma: Option<f64>,
    ema: Option<f64>,
    rsi: Option<f64>,
    macd: Option<MacdSnapshot>,
    bollinger: Option<BollingerSnapshot>,
    stochastic: Option<StochasticSnapshot>,
    atr: Option<f64>,
    obv: Option<f64>,
    vwap: Option<f64>,
    ichimoku: IchimokuSnapshot,
}

fn last(values: &[f64]) -> Option<f64> {
    values.last().copied()
}

fn snapshot(series: &OhlcvSeries, settings: &IndicatorSettings) -> Result<IndicatorSnapshot> {
    let closes = series.closes();
    let last_close = last(closes);

    let macd = Macd::with_periods(settings.macd_fast, settings.macd_slow, settings.macd_signal)
        .calculate(closes);
    let bands = BollingerBands::with_params(settings.bollinger_period, settings.bollinger_multiplier)
        .calculate(closes);
    let stochastic = Stochastic::with_periods(
        settings.stochastic_k,
        settings.stochastic_smooth_k,
        settings.stochastic_d,
    )
    .calculate(series)?;
    let cloud = Ichimoku::with_periods(
        settings.ichimoku_tenkan,
        settings.ichimoku_kijun,
        settings.ichimoku_senkou_b,
        settings.ichimoku_displacement,
    )
    .calculate(series)?;

    Ok(IndicatorSnapshot {
        bars: series.len(),
        last_close,
        sma: last(&Sma::new(settings.sma_period).calculate(closes)),
        ema: last(&Ema::new(settings.ema_period).calculate(closes)),
        rsi: last(&Rsi::new(settings.rsi_period).calculate(closes)),
        macd: (!macd.is_empty()).then(|| MacdSnapshot {
            macd: macd.macd[macd.len() - 1],
            signal: macd.signal[macd.len() - 1],
            histogram: macd.histogram[macd.len() - 1],
        }),
        bollinger: (!bands.is_empty()).then(|| {
            let i = bands.len() - 1;
            BollingerSnapshot {
                upper: bands.upper[i],
                middle: bands.middle[i],
                lower: bands.lower[i],
                percent_b: last_close.and_then(|close| bands.percent_b(i, close)),
            }
        }),
        stochastic: last(&stochastic.k)
            .zip(last(&stochastic.d))
            .map(|(k, d)| StochasticSnapshot { k, d }),
        atr: last(&Atr::new(settings.atr_period).calculate(series)?),
        obv: last(&Obv::new().calculate(series)?),
        vwap: last(&Vwap::new().calculate(series)?),
        ichimoku: IchimokuSnapshot {
            tenkan_sen: last(&cloud.tenkan_sen),
            kijun_sen: last(&cloud.kijun_sen),
            senkou_span_a: last(&cloud.senkou_span_a),
            senkou_span_b: last(&cloud.senkou_span_b),
        },
    })
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.4}"))
}

fn print_text(snapshot: &IndicatorSnapshot) {
    println!("Bars:        {}", snapshot.bars);
    println!("Last close:  {}", fmt_value(snapshot.last_close));
    println!();
    println!("SMA:         {}", fmt_value(snapshot.sma));
    println!("EMA:         {}", fmt_value(snapshot.ema));
    println!("RSI:         {}", fmt_value(snapshot.rsi));
    match &snapshot.macd {
        Some(m) => println!(
            "MACD:        {:.4} (signal {:.4}, histogram {:.4})",
            m.macd, m.signal, m.histogram
        ),
        None => println!("MACD:        n/a"),
    }
    match &snapshot.bollinger {
        Some(b) => println!(
            "Bollinger:   {:.4} / {:.4} / {:.4} (%B {})",
            b.upper,
            b.middle,
            b.lower,
            fmt_value(b.percent_b)
        ),
        None => println!("Bollinger:   n/a"),
    }
    match &snapshot.stochastic {
        Some(s) => println!("Stochastic:  %K {:.2} %D {:.2}", s.k, s.d),
        None => println!("Stochastic:  n/a"),
    }
    println!("ATR:         {}", fmt_value(snapshot.atr));
    println!("OBV:         {}", fmt_value(snapshot.obv));
    println!("VWAP:        {}", fmt_value(snapshot.vwap));
    println!(
        "Ichimoku:    tenkan {} kijun {} span A {} span B {}",
        fmt_value(snapshot.ichimoku.tenkan_sen),
        fmt_value(snapshot.ichimoku.kijun_sen),
        fmt_value(snapshot.ichimoku.senkou_span_a),
        fmt_value(snapshot.ichimoku.senkou_span_b),
    );
}

pub fn run(args: IndicatorsArgs, config: &AppConfig) -> Result<()> {
    let series = load_series(&args.data)?;
    let snapshot = snapshot(&series, &config.indicators)?;

    match args.output {
        OutputFormat::Json => print_json(&snapshot),
        OutputFormat::Text => {
            print_text(&snapshot);
            Ok(())
        }
    }
}
