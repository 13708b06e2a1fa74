//! Upstream data sources, their per-pass memoizing cache, and fixtures.

mod core;

pub use core::{
    AlmanacSource, BatteryLevel, BatterySource, CalendarEntry, CalendarSource, ClockSource,
    Condition, DataCache, DataHub, DayOutlook, FetchError, FetchResult, FixedClock, Offline,
    StatSample, StatSource, StaticAlmanac, StaticBattery, StaticCalendar, StaticStats,
    StaticTasks, StaticWeather, SunTimes, SystemClock, TaskEntry, TaskSource, WeatherReport,
    WeatherSource,
};
