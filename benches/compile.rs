use chrono::{Local, NaiveDate, NaiveTime, TimeZone};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glance::data::{
    BatteryLevel, CalendarEntry, Condition, DayOutlook, FixedClock, StatSample, StaticAlmanac,
    StaticBattery, StaticCalendar, StaticStats, StaticTasks, StaticWeather, SunTimes, TaskEntry,
    WeatherReport,
};
use glance::{Compiler, DataHub};

const CALL_STYLE: &str = "\
row(140)
column(180)
date
week
left
column
greeting
events(5)
row
column
weather
forecast(3)
right
column
battery
sun
";

const ASCII_TABLE: &str = "\
row
---------------------------
|...120...|...............|
|..date...|....weather....|
|..week...|....forecast...|
---------------------------
|.events..|...............|
|.........|....battery....|
---------------------------
";

fn scripted_hub() -> DataHub {
    let now = Local.with_ymd_and_hms(2024, 5, 4, 9, 30, 0).expect("clock");
    let day = |d: u32| NaiveDate::from_ymd_opt(2024, 5, d).expect("date");
    DataHub::new()
        .with_clock(FixedClock(now))
        .with_weather(StaticWeather {
            report: WeatherReport {
                temperature_c: 12.3,
                condition: Condition::PartlyCloudy,
            },
            outlook: (5..9)
                .map(|d| DayOutlook {
                    date: day(d),
                    low_c: 6.0,
                    high_c: 14.0,
                    condition: Condition::Showers,
                })
                .collect(),
        })
        .with_calendar(StaticCalendar(
            (0..8)
                .map(|i| CalendarEntry {
                    start: Local.with_ymd_and_hms(2024, 5, 4, 10 + i, 0, 0).expect("start"),
                    title: format!("Meeting {i}"),
                })
                .collect(),
        ))
        .with_tasks(StaticTasks(vec![TaskEntry {
            title: "Water plants".to_string(),
            due: Some(day(6)),
        }]))
        .with_battery(StaticBattery(BatteryLevel {
            percent: 87,
            charging: true,
        }))
        .with_almanac(StaticAlmanac(SunTimes {
            sunrise: NaiveTime::from_hms_opt(6, 12, 0).expect("sunrise"),
            sunset: NaiveTime::from_hms_opt(20, 31, 0).expect("sunset"),
        }))
        .with_stats(StaticStats(vec![StatSample {
            label: "Steps".to_string(),
            value: "5 200".to_string(),
        }]))
}

fn compile_call_style(c: &mut Criterion) {
    let compiler = Compiler::new().with_data(scripted_hub());
    c.bench_function("compile_call_style", |b| {
        b.iter(|| {
            compiler
                .compile(black_box(CALL_STYLE))
                .expect("compile pass")
        });
    });
}

fn compile_ascii_table(c: &mut Criterion) {
    let compiler = Compiler::new().with_data(scripted_hub());
    c.bench_function("compile_ascii_table", |b| {
        b.iter(|| {
            compiler
                .compile(black_box(ASCII_TABLE))
                .expect("compile pass")
        });
    });
}

criterion_group!(benches, compile_call_style, compile_ascii_table);
criterion_main!(benches);
