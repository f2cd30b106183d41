use crate::model::{ModelBounds, PersistedModel};
use crate::processevent::{ProcessEventSink, RangeKind, RangeWarning};

/// Estimated price for mileage `x`.
///
/// Returns exactly `0.0` for an untrained model. Otherwise range warnings
/// for `x` and for the estimate go to `sink`; they never change the result.
pub fn predict(x: f64, model: &PersistedModel, sink: &mut dyn ProcessEventSink) -> f64 {
    if model.is_untrained() {
        return 0.0;
    }

    let price = model.line().calculate(x);
    for warning in range_warnings(x, price, &model.bounds) {
        sink.on_range_warning(&warning);
    }
    price
}

/// Out-of-range findings for one prediction; absent bounds are not checked.
pub fn range_warnings(x: f64, price: f64, bounds: &ModelBounds) -> Vec<RangeWarning> {
    let mut out = Vec::new();
    check(&mut out, RangeKind::Mileage, x, bounds.min_km, bounds.max_km);
    check(&mut out, RangeKind::Price, price, bounds.min_price, bounds.max_price);
    out
}

fn check(
    out: &mut Vec<RangeWarning>,
    kind: RangeKind,
    value: f64,
    min: Option<f64>,
    max: Option<f64>,
) {
    if let Some(min) = min.filter(|m| value < *m) {
        out.push(RangeWarning::Below { kind, value, min });
    }
    if let Some(max) = max.filter(|m| value > *m) {
        out.push(RangeWarning::Above { kind, value, max });
    }
}
