use std::fmt;

/// Which recorded range a value fell outside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    Mileage,
    Price,
}

impl fmt::Display for RangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeKind::Mileage => write!(f, "mileage"),
            RangeKind::Price => write!(f, "predicted price"),
        }
    }
}

/// A value outside the range seen during training. Informational only.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeWarning {
    Below { kind: RangeKind, value: f64, min: f64 },
    Above { kind: RangeKind, value: f64, max: f64 },
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeWarning::Below { kind, value, min } => {
                write!(f, "{kind} {value} is below the training minimum {min}")
            },
            RangeWarning::Above { kind, value, max } => {
                write!(f, "{kind} {value} is above the training maximum {max}")
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    Range(RangeWarning),
}

pub trait ProcessEventSink {
    fn on_range_warning(&mut self, ev: &RangeWarning);
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ProcessEventSink for LogSink {
    fn on_range_warning(&mut self, ev: &RangeWarning) {
        log::warn!("{ev}");
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProcessEventSink for NullSink {
    fn on_range_warning(&mut self, _ev: &RangeWarning) {}
}

impl ProcessEventSink for Vec<ProcessEvent> {
    fn on_range_warning(&mut self, ev: &RangeWarning) {
        self.push(ProcessEvent::Range(ev.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning() -> RangeWarning {
        RangeWarning::Below { kind: RangeKind::Mileage, value: 1.0, min: 2.0 }
    }

    #[test]
    fn collects_events() {
        let mut events: Vec<ProcessEvent> = Vec::new();
        events.on_range_warning(&warning());
        LogSink.on_range_warning(&warning());
        NullSink.on_range_warning(&warning());
        assert_eq!(events, vec![ProcessEvent::Range(warning())]);
    }

    #[test]
    fn messages_name_the_range() {
        assert_eq!(warning().to_string(), "mileage 1 is below the training minimum 2");
        let above = RangeWarning::Above { kind: RangeKind::Price, value: 9.5, max: 8.0 };
        assert_eq!(above.to_string(), "predicted price 9.5 is above the training maximum 8");
    }
}
