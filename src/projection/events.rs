//! Year-indexed view of a plan's life events

use std::collections::BTreeMap;

use crate::plan::LifeEvent;

/// Life events split into single-year events (by year) and recurring events.
/// Built once per run and queried for every simulated year.
#[derive(Debug, Clone, Default)]
pub struct EventSchedule<'a> {
    by_year: BTreeMap<i32, Vec<&'a LifeEvent>>,
    recurring: Vec<&'a LifeEvent>,
}

impl<'a> EventSchedule<'a> {
    pub fn new(events: &'a [LifeEvent]) -> Self {
        let mut schedule = Self::default();
        for event in events {
            if event.recurring {
                schedule.recurring.push(event);
            } else {
                schedule.by_year.entry(event.year).or_default().push(event);
            }
        }
        schedule
    }

    /// Single-year events occurring in `year`
    pub fn events_in(&self, year: i32) -> &[&'a LifeEvent] {
        self.by_year.get(&year).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Recurring events active in `year` (both bounds inclusive)
    pub fn recurring_in(&self, year: i32) -> impl Iterator<Item = &'a LifeEvent> + '_ {
        self.recurring.iter().copied().filter(move |e| e.applies_in(year))
    }

    pub fn single_year_cost(&self, year: i32) -> f64 {
        self.events_in(year).iter().map(|e| e.cost).sum()
    }

    pub fn recurring_cost(&self, year: i32) -> f64 {
        self.recurring_in(year).map(|e| e.cost).sum()
    }

    pub fn recurring(&self) -> &[&'a LifeEvent] {
        &self.recurring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::LifeEventType;

    fn events() -> Vec<LifeEvent> {
        vec![
            LifeEvent::once(LifeEventType::Marriage, 2027, 300.0),
            LifeEvent::once(LifeEventType::CarPurchase, 2027, 200.0),
            LifeEvent::once(LifeEventType::Inheritance, 2030, -400.0),
            LifeEvent::recurring(LifeEventType::Caregiving, 2020, 25.0, Some(2025)),
            LifeEvent::recurring(LifeEventType::Other, 2028, 5.0, None),
        ]
    }

    #[test]
    fn test_partition() {
        let events = events();
        let schedule = EventSchedule::new(&events);

        assert_eq!(schedule.events_in(2027).len(), 2);
        assert_eq!(schedule.events_in(2028).len(), 0);
        assert_eq!(schedule.recurring().len(), 2);
    }

    #[test]
    fn test_single_year_costs_share_a_year() {
        let events = events();
        let schedule = EventSchedule::new(&events);

        assert_eq!(schedule.single_year_cost(2027), 500.0);
        assert_eq!(schedule.single_year_cost(2030), -400.0);
        assert_eq!(schedule.single_year_cost(2031), 0.0);
    }

    #[test]
    fn test_recurring_window_inclusive() {
        let events = vec![LifeEvent::recurring(LifeEventType::Caregiving, 2020, 25.0, Some(2025))];
        let schedule = EventSchedule::new(&events);

        for year in 2015..=2030 {
            let expected = if (2020..=2025).contains(&year) { 25.0 } else { 0.0 };
            assert_eq!(schedule.recurring_cost(year), expected, "year {}", year);
        }
    }

    #[test]
    fn test_open_ended_recurring() {
        let events = events();
        let schedule = EventSchedule::new(&events);

        assert_eq!(schedule.recurring_cost(2027), 0.0);
        assert_eq!(schedule.recurring_cost(2028), 5.0);
        assert_eq!(schedule.recurring_cost(2090), 5.0);
    }
}
