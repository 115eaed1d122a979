//! Wheel trail recording.
//!
//! Four bounded channels, one per wheel. A sample is taken every
//! `sample_interval` applied steps, counted from the first step after a clear.

use std::collections::VecDeque;

use parksim_core::enums::WheelPosition;
use parksim_core::state::TrailView;
use parksim_core::types::{TrailPoint, WorldPoint};

/// Bounded per-wheel point history.
#[derive(Debug, Clone)]
pub struct WheelTrails {
    channels: [VecDeque<WorldPoint>; 4],
    capacity: usize,
    sample_interval: u32,
    steps_since_clear: u64,
}

impl WheelTrails {
    /// `sample_interval` and `capacity` are raised to at least 1.
    pub fn new(sample_interval: u32, capacity: usize) -> Self {
        Self {
            channels: Default::default(),
            capacity: capacity.max(1),
            sample_interval: sample_interval.max(1),
            steps_since_clear: 0,
        }
    }

    /// Register one applied step. Appends the contacts and returns them if
    /// this step falls on the sampling interval, otherwise returns nothing.
    pub fn record_step(&mut self, contacts: [TrailPoint; 4]) -> Option<[TrailPoint; 4]> {
        let sample = self.steps_since_clear % self.sample_interval as u64 == 0;
        self.steps_since_clear += 1;
        if !sample {
            return None;
        }

        for contact in &contacts {
            let channel = &mut self.channels[contact.wheel.index()];
            if channel.len() == self.capacity {
                channel.pop_front();
            }
            channel.push_back(contact.point);
        }
        Some(contacts)
    }

    /// Empty every channel and restart the sampling count.
    pub fn clear(&mut self) {
        for channel in &mut self.channels {
            channel.clear();
        }
        self.steps_since_clear = 0;
    }

    /// Points of one wheel, oldest first.
    pub fn channel(&self, wheel: WheelPosition) -> impl Iterator<Item = &WorldPoint> + '_ {
        self.channels[wheel.index()].iter()
    }

    pub fn len(&self, wheel: WheelPosition) -> usize {
        self.channels[wheel.index()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.iter().all(VecDeque::is_empty)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copy out all channels for a snapshot.
    pub fn view(&self) -> TrailView {
        let collect =
            |wheel: WheelPosition| -> Vec<WorldPoint> { self.channel(wheel).copied().collect() };
        TrailView {
            front_left: collect(WheelPosition::FrontLeft),
            front_right: collect(WheelPosition::FrontRight),
            rear_left: collect(WheelPosition::RearLeft),
            rear_right: collect(WheelPosition::RearRight),
        }
    }
}
