/// quick start - minimal example to get started
use accrual_schedule::{ScheduleEngine, ScheduleRequest, ScheduleView};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 100,000 at 12% for one month and a day
    let request = ScheduleRequest::new("100000", "12", "2024-01-01").close_date("2024-02-01");

    let engine = ScheduleEngine::default();
    let schedule = engine.compute(&request);

    print!("{}", ScheduleView::from_schedule(&schedule, engine.config()).to_table());

    Ok(())
}
