use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::ForecastId;

/// all events that can be emitted during a forecast run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    ForecastStarted {
        forecast_id: ForecastId,
        start_date: NaiveDate,
        opening_balance: Money,
    },
    LumpSumApplied {
        forecast_id: ForecastId,
        amount: Money,
        new_balance: Money,
        date: NaiveDate,
    },
    InterestAccrued {
        forecast_id: ForecastId,
        amount: Money,
        days: u32,
        date: NaiveDate,
    },
    PaymentCollected {
        forecast_id: ForecastId,
        amount: Money,
        salary: Money,
        new_balance: Money,
        date: NaiveDate,
    },
    SalaryGrown {
        forecast_id: ForecastId,
        previous_salary: Money,
        new_salary: Money,
        applied_growth_rate: Rate,
        next_growth_rate: Rate,
        date: NaiveDate,
    },
    LoanSettled {
        forecast_id: ForecastId,
        date: NaiveDate,
    },
    LoanWrittenOff {
        forecast_id: ForecastId,
        amount: Money,
        date: NaiveDate,
    },
}

impl Event {
    pub fn forecast_id(&self) -> ForecastId {
        match self {
            Event::ForecastStarted { forecast_id, .. }
            | Event::LumpSumApplied { forecast_id, .. }
            | Event::InterestAccrued { forecast_id, .. }
            | Event::PaymentCollected { forecast_id, .. }
            | Event::SalaryGrown { forecast_id, .. }
            | Event::LoanSettled { forecast_id, .. }
            | Event::LoanWrittenOff { forecast_id, .. } => *forecast_id,
        }
    }
}

/// ordered log of events for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_emit_and_take() {
        let id = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let mut store = EventStore::new();

        store.emit(Event::LoanSettled { forecast_id: id, date });
        assert_eq!(store.len(), 1);
        assert_eq!(store.events()[0].forecast_id(), id);

        let taken = store.take_events();
        assert_eq!(taken.len(), 1);
        assert!(store.is_empty());
    }
}
