/// policies - rounding and deposit-row display choices
use accrual_schedule::{
    DepositRowTotal, RoundingPolicy, ScheduleConfig, ScheduleEngine, ScheduleRequest, ScheduleView,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let request = ScheduleRequest::new("100000", "12", "2024-01-01")
        .close_date("2024-03-15")
        .deposit("2024-01-15", "20000")
        .deposit("2024-02-20", "5000");

    let configs = [
        ("default", ScheduleConfig::default()),
        (
            "carry rounded",
            ScheduleConfig::default().with_rounding(RoundingPolicy::CarryRounded),
        ),
        (
            "after deposit",
            ScheduleConfig::default().with_deposit_row_total(DepositRowTotal::AfterDeposit),
        ),
    ];

    for (name, config) in configs {
        let engine = ScheduleEngine::try_new(config)?;
        let schedule = engine.compute_strict(&request)?;
        println!("=== {} ===", name);
        println!("{}", ScheduleView::from_schedule(&schedule, engine.config()).to_json_pretty()?);
    }

    Ok(())
}
