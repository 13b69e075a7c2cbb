//! Sampling control loop
//!
//! Drives one sensor and one display from a single thread of control:
//! restart periodic measurement, then poll readiness, fetch the pending
//! measurement, render it, and push it to the panel, once per cycle. The
//! loop itself never blocks on a delay; callers decide how to pace cycles
//! and whether a failed cycle is retried or fatal.

use crate::reading::SensorReading;
use crate::screen::render_reading;
use crate::traits::{AirSensor, DisplayError, SensorError, TextDisplay};

/// Bounds on a single sampling cycle.
#[derive(Debug, Clone, Copy)]
pub struct CyclePolicy {
    /// Maximum readiness polls before the cycle gives up.
    ///
    /// The sensor produces a measurement every few seconds and each poll
    /// costs a couple of milliseconds of bus traffic, so the default
    /// leaves several measurement periods of headroom.
    pub max_ready_polls: u32,
}

impl Default for CyclePolicy {
    fn default() -> Self {
        Self {
            max_ready_polls: 10_000,
        }
    }
}

/// Errors from a sampling cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleError {
    /// Talking to the sensor failed
    Sensor(SensorError),
    /// Pushing the frame to the display failed
    Display(DisplayError),
    /// The sensor never reported a measurement within the poll budget
    NeverReady,
}

impl From<SensorError> for CycleError {
    fn from(e: SensorError) -> Self {
        CycleError::Sensor(e)
    }
}

impl From<DisplayError> for CycleError {
    fn from(e: DisplayError) -> Self {
        CycleError::Display(e)
    }
}

/// The air quality monitor: one sensor, one display, one loop.
pub struct Monitor<S, D> {
    sensor: S,
    display: D,
    policy: CyclePolicy,
}

impl<S: AirSensor, D: TextDisplay> Monitor<S, D> {
    /// Create a monitor with the default cycle policy
    pub fn new(sensor: S, display: D) -> Self {
        Self::with_policy(sensor, display, CyclePolicy::default())
    }

    /// Create a monitor with an explicit cycle policy
    pub fn with_policy(sensor: S, display: D, policy: CyclePolicy) -> Self {
        Self {
            sensor,
            display,
            policy,
        }
    }

    /// Bring the system to a known state.
    ///
    /// The sensor ignores a start command while it is already measuring,
    /// so it is stopped first; that way the measurement interval restarts
    /// from this moment regardless of what ran before reset.
    pub fn start(&mut self) -> Result<(), CycleError> {
        self.sensor.stop_measuring()?;
        self.sensor.start_measuring()?;
        self.display.clear()?;
        Ok(())
    }

    /// Run one poll-read-render cycle.
    ///
    /// Polls readiness up to the policy bound, fetches the measurement,
    /// and pushes the rendered frame to the display. The decoded reading
    /// is returned by value to the caller.
    pub fn run_cycle(&mut self) -> Result<SensorReading, CycleError> {
        let mut polls = 0;
        while !self.sensor.measurement_ready()? {
            polls += 1;
            if polls >= self.policy.max_ready_polls {
                return Err(CycleError::NeverReady);
            }
        }

        let reading = self.sensor.take_measurement()?;
        self.display.update(&render_reading(&reading))?;
        Ok(reading)
    }

    /// Stop periodic measurement
    pub fn stop(&mut self) -> Result<(), CycleError> {
        self.sensor.stop_measuring()?;
        Ok(())
    }

    /// Tear down, handing the devices back
    pub fn release(self) -> (S, D) {
        (self.sensor, self.display)
    }
}
