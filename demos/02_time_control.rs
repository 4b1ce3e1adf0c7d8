/// time control - open accounts close "today", which tests can pin
use accrual_schedule::chrono::{Duration, TimeZone, Utc};
use accrual_schedule::{SafeTimeProvider, ScheduleEngine, ScheduleRequest, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    // no close date: the account is still open
    let request = ScheduleRequest::new("50000", "7.5", "2024-01-01").deposit("2024-02-14", "10000");
    let engine = ScheduleEngine::default();

    for _ in 0..4 {
        controller.advance(Duration::days(25));
        let schedule = engine.compute_with_time(&request, &time);
        println!(
            "{}: {} rows, balance {}",
            time.now().format("%Y-%m-%d"),
            schedule.len(),
            schedule.final_balance.to_fixed(2)
        );
    }

    Ok(())
}
