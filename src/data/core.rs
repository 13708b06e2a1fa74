use std::cell::OnceCell;

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Upstream data failures. These never abort a render pass; content
/// providers substitute their placeholder instead.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("source offline: {0}")]
    Offline(String),
    #[error("no data: {0}")]
    Missing(String),
    #[error("backend error: {0}")]
    Backend(String),
}

/// Coarse sky condition, also the icon name on the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Rain,
    Showers,
    Snow,
    Thunderstorm,
    Wind,
    /// Neutral placeholder when the weather source is unavailable.
    Unknown,
}

impl Condition {
    pub fn label(self) -> &'static str {
        match self {
            Condition::Clear => "Clear",
            Condition::PartlyCloudy => "Partly cloudy",
            Condition::Cloudy => "Cloudy",
            Condition::Fog => "Fog",
            Condition::Rain => "Rain",
            Condition::Showers => "Showers",
            Condition::Snow => "Snow",
            Condition::Thunderstorm => "Thunderstorm",
            Condition::Wind => "Windy",
            Condition::Unknown => "—",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Condition::Clear => "clear",
            Condition::PartlyCloudy => "partly_cloudy",
            Condition::Cloudy => "cloudy",
            Condition::Fog => "fog",
            Condition::Rain => "rain",
            Condition::Showers => "showers",
            Condition::Snow => "snow",
            Condition::Thunderstorm => "thunderstorm",
            Condition::Wind => "wind",
            Condition::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub temperature_c: f32,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayOutlook {
    pub date: NaiveDate,
    pub low_c: f32,
    pub high_c: f32,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub start: DateTime<Local>,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    pub title: String,
    pub due: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryLevel {
    pub percent: u8,
    pub charging: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    pub sunrise: NaiveTime,
    pub sunset: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatSample {
    pub label: String,
    pub value: String,
}

pub trait ClockSource {
    fn now(&self) -> DateTime<Local>;
}

pub trait WeatherSource {
    fn current(&self) -> FetchResult<WeatherReport>;
    fn outlook(&self) -> FetchResult<Vec<DayOutlook>>;
}

pub trait CalendarSource {
    fn upcoming(&self) -> FetchResult<Vec<CalendarEntry>>;
}

pub trait TaskSource {
    fn outstanding(&self) -> FetchResult<Vec<TaskEntry>>;
}

pub trait BatterySource {
    fn level(&self) -> FetchResult<BatteryLevel>;
}

pub trait AlmanacSource {
    fn sun_times(&self, date: NaiveDate) -> FetchResult<SunTimes>;
}

pub trait StatSource {
    fn samples(&self) -> FetchResult<Vec<StatSample>>;
}

/// Bundle of upstream sources a compiler renders from.
///
/// Defaults are deliberately inert: the system clock, empty lists for
/// calendar/task/stat feeds, and offline errors for everything that needs a
/// network or device backend, which exercises the placeholder paths.
pub struct DataHub {
    pub clock: Box<dyn ClockSource>,
    pub weather: Box<dyn WeatherSource>,
    pub calendar: Box<dyn CalendarSource>,
    pub tasks: Box<dyn TaskSource>,
    pub battery: Box<dyn BatterySource>,
    pub almanac: Box<dyn AlmanacSource>,
    pub stats: Box<dyn StatSource>,
}

impl DataHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(mut self, clock: impl ClockSource + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_weather(mut self, weather: impl WeatherSource + 'static) -> Self {
        self.weather = Box::new(weather);
        self
    }

    pub fn with_calendar(mut self, calendar: impl CalendarSource + 'static) -> Self {
        self.calendar = Box::new(calendar);
        self
    }

    pub fn with_tasks(mut self, tasks: impl TaskSource + 'static) -> Self {
        self.tasks = Box::new(tasks);
        self
    }

    pub fn with_battery(mut self, battery: impl BatterySource + 'static) -> Self {
        self.battery = Box::new(battery);
        self
    }

    pub fn with_almanac(mut self, almanac: impl AlmanacSource + 'static) -> Self {
        self.almanac = Box::new(almanac);
        self
    }

    pub fn with_stats(mut self, stats: impl StatSource + 'static) -> Self {
        self.stats = Box::new(stats);
        self
    }
}

impl Default for DataHub {
    fn default() -> Self {
        Self {
            clock: Box::new(SystemClock),
            weather: Box::new(Offline),
            calendar: Box::new(StaticCalendar(Vec::new())),
            tasks: Box::new(StaticTasks(Vec::new())),
            battery: Box::new(Offline),
            almanac: Box::new(Offline),
            stats: Box::new(StaticStats(Vec::new())),
        }
    }
}

/// Memoized per-pass view over a [`DataHub`].
///
/// Every getter hits its upstream source at most once per pass, no matter
/// how many content functions ask; failures memoize as `None` so a flaky
/// source is not retried mid-render.
#[derive(Default)]
pub struct DataCache {
    now: OnceCell<DateTime<Local>>,
    weather: OnceCell<Option<WeatherReport>>,
    outlook: OnceCell<Option<Vec<DayOutlook>>>,
    events: OnceCell<Option<Vec<CalendarEntry>>>,
    tasks: OnceCell<Option<Vec<TaskEntry>>>,
    battery: OnceCell<Option<BatteryLevel>>,
    sun: OnceCell<Option<SunTimes>>,
    stats: OnceCell<Option<Vec<StatSample>>>,
}

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wall-clock instant shared by every content function in the pass.
    pub fn now(&self, hub: &DataHub) -> DateTime<Local> {
        *self.now.get_or_init(|| hub.clock.now())
    }

    pub fn weather(&self, hub: &DataHub) -> Option<WeatherReport> {
        self.weather
            .get_or_init(|| hub.weather.current().ok())
            .clone()
    }

    pub fn outlook(&self, hub: &DataHub) -> Option<Vec<DayOutlook>> {
        self.outlook
            .get_or_init(|| hub.weather.outlook().ok())
            .clone()
    }

    pub fn events(&self, hub: &DataHub) -> Option<Vec<CalendarEntry>> {
        self.events
            .get_or_init(|| hub.calendar.upcoming().ok())
            .clone()
    }

    pub fn tasks(&self, hub: &DataHub) -> Option<Vec<TaskEntry>> {
        self.tasks
            .get_or_init(|| hub.tasks.outstanding().ok())
            .clone()
    }

    pub fn battery(&self, hub: &DataHub) -> Option<BatteryLevel> {
        *self.battery.get_or_init(|| hub.battery.level().ok())
    }

    pub fn sun(&self, hub: &DataHub) -> Option<SunTimes> {
        let today = self.now(hub).date_naive();
        *self.sun.get_or_init(|| hub.almanac.sun_times(today).ok())
    }

    pub fn stats(&self, hub: &DataHub) -> Option<Vec<StatSample>> {
        self.stats.get_or_init(|| hub.stats.samples().ok()).clone()
    }
}

/// System wall clock, the default [`ClockSource`].
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Source that always reports itself offline. Default for weather, battery
/// and almanac feeds until the host wires real backends in.
pub struct Offline;

impl WeatherSource for Offline {
    fn current(&self) -> FetchResult<WeatherReport> {
        Err(FetchError::Offline("weather".to_string()))
    }

    fn outlook(&self) -> FetchResult<Vec<DayOutlook>> {
        Err(FetchError::Offline("weather".to_string()))
    }
}

impl BatterySource for Offline {
    fn level(&self) -> FetchResult<BatteryLevel> {
        Err(FetchError::Offline("battery".to_string()))
    }
}

impl AlmanacSource for Offline {
    fn sun_times(&self, _date: NaiveDate) -> FetchResult<SunTimes> {
        Err(FetchError::Offline("almanac".to_string()))
    }
}

impl CalendarSource for Offline {
    fn upcoming(&self) -> FetchResult<Vec<CalendarEntry>> {
        Err(FetchError::Offline("calendar".to_string()))
    }
}

impl TaskSource for Offline {
    fn outstanding(&self) -> FetchResult<Vec<TaskEntry>> {
        Err(FetchError::Offline("tasks".to_string()))
    }
}

impl StatSource for Offline {
    fn samples(&self) -> FetchResult<Vec<StatSample>> {
        Err(FetchError::Offline("stats".to_string()))
    }
}

/// Fixed wall clock for deterministic passes.
pub struct FixedClock(pub DateTime<Local>);

impl ClockSource for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Canned weather: one current report plus a day-by-day outlook.
pub struct StaticWeather {
    pub report: WeatherReport,
    pub outlook: Vec<DayOutlook>,
}

impl WeatherSource for StaticWeather {
    fn current(&self) -> FetchResult<WeatherReport> {
        Ok(self.report.clone())
    }

    fn outlook(&self) -> FetchResult<Vec<DayOutlook>> {
        Ok(self.outlook.clone())
    }
}

pub struct StaticCalendar(pub Vec<CalendarEntry>);

impl CalendarSource for StaticCalendar {
    fn upcoming(&self) -> FetchResult<Vec<CalendarEntry>> {
        Ok(self.0.clone())
    }
}

pub struct StaticTasks(pub Vec<TaskEntry>);

impl TaskSource for StaticTasks {
    fn outstanding(&self) -> FetchResult<Vec<TaskEntry>> {
        Ok(self.0.clone())
    }
}

pub struct StaticBattery(pub BatteryLevel);

impl BatterySource for StaticBattery {
    fn level(&self) -> FetchResult<BatteryLevel> {
        Ok(self.0)
    }
}

pub struct StaticAlmanac(pub SunTimes);

impl AlmanacSource for StaticAlmanac {
    fn sun_times(&self, _date: NaiveDate) -> FetchResult<SunTimes> {
        Ok(self.0)
    }
}

pub struct StaticStats(pub Vec<StatSample>);

impl StatSource for StaticStats {
    fn samples(&self) -> FetchResult<Vec<StatSample>> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingWeather {
        calls: Rc<Cell<u32>>,
    }

    impl WeatherSource for CountingWeather {
        fn current(&self) -> FetchResult<WeatherReport> {
            self.calls.set(self.calls.get() + 1);
            Ok(WeatherReport {
                temperature_c: 12.0,
                condition: Condition::Rain,
            })
        }

        fn outlook(&self) -> FetchResult<Vec<DayOutlook>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn cache_fetches_at_most_once_per_pass() {
        let calls = Rc::new(Cell::new(0));
        let hub = DataHub::new().with_weather(CountingWeather {
            calls: calls.clone(),
        });
        let cache = DataCache::new();

        assert!(cache.weather(&hub).is_some());
        assert!(cache.weather(&hub).is_some());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn cache_memoizes_failures() {
        let hub = DataHub::new();
        let cache = DataCache::new();
        assert!(cache.weather(&hub).is_none());
        assert!(cache.battery(&hub).is_none());
        assert!(cache.sun(&hub).is_none());
    }

    #[test]
    fn defaults_keep_list_feeds_empty() {
        let hub = DataHub::new();
        let cache = DataCache::new();
        assert_eq!(cache.events(&hub), Some(Vec::new()));
        assert_eq!(cache.tasks(&hub), Some(Vec::new()));
        assert_eq!(cache.stats(&hub), Some(Vec::new()));
    }
}
