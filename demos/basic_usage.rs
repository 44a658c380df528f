/// Basic usage example: feed temperature samples, get heater-on intervals
use chrono::{Duration, NaiveDateTime, TimeZone, Utc};
use radiator_sensing::{activity_flags, detect, HeatingSchedule, Interval, Sample};

fn main() {
    println!("=== Radiator Sensing: Basic Example ===\n");

    // Simulated morning: cold apartment, heat comes on, then holds
    let start = Utc.with_ymd_and_hms(2019, 1, 6, 10, 0, 0).unwrap();
    let samples: Vec<Sample> = (0..120)
        .map(|minute| {
            let temperature = match minute {
                0..=29 => 61.0,
                30..=59 => 61.0 + 0.25 * (minute - 29) as f64,
                _ => 68.5,
            };
            Sample::new(start + Duration::minutes(minute), temperature)
        })
        .collect();

    println!("Processing {} samples...\n", samples.len());

    let intervals = match detect(&samples, Duration::minutes(20)) {
        Ok(intervals) => intervals,
        Err(err) => {
            eprintln!("detection failed: {}", err);
            return;
        }
    };

    for (num, interval) in intervals.iter().enumerate() {
        print_interval(interval, num + 1);
    }

    // Compare against the legal minimum, treating UTC-5 as local time
    let schedule = HeatingSchedule::default();
    let flags = activity_flags(&samples, &intervals);
    let shortfalls = samples
        .iter()
        .filter(|s| schedule.is_shortfall(to_local(s), s.temperature))
        .count();

    println!("\n=== Summary ===");
    println!("Heater-on intervals: {}", intervals.len());
    println!("Samples while heating: {}", flags.iter().filter(|&&f| f).count());
    println!("Samples below legal minimum: {}", shortfalls);
}

fn to_local(sample: &Sample) -> NaiveDateTime {
    (sample.timestamp - Duration::hours(5)).naive_utc()
}

fn print_interval(interval: &Interval, num: usize) {
    println!("--- Interval {} ---", num);
    println!("  Start:    {}", interval.start);
    println!("  End:      {}", interval.end);
    println!("  Duration: {} min", interval.duration().num_minutes());
}
