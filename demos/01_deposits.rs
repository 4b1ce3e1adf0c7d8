/// deposits - mid-period deposits split a period into sub-intervals
use accrual_schedule::chrono::NaiveDate;
use accrual_schedule::{AccountParameters, Deposit, Money, Rate, RowKind, ScheduleEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== deposits ===\n");

    let open = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
    let close = NaiveDate::from_ymd_opt(2024, 4, 15).ok_or("bad date")?;
    let params = AccountParameters::new(Money::from_major(250_000), Rate::from_percentage(9), open)
        .closed_on(close);

    let deposits = [
        Deposit::new(NaiveDate::from_ymd_opt(2024, 1, 20).ok_or("bad date")?, Money::from_major(50_000)),
        Deposit::new(NaiveDate::from_ymd_opt(2024, 2, 10).ok_or("bad date")?, Money::from_major(25_000)),
        Deposit::new(NaiveDate::from_ymd_opt(2024, 2, 25).ok_or("bad date")?, Money::from_major(25_000)),
    ];

    let schedule = ScheduleEngine::default().schedule(&params, &deposits, close);

    for row in &schedule.rows {
        let note = match row.kind {
            RowKind::Deposit => format!("deposit {}", row.deposit.to_fixed(2)),
            RowKind::PeriodEnd => "period end".to_string(),
            RowKind::Closing => "closing".to_string(),
        };
        println!(
            "{}  {:>3} days  interest {:>10}  total {:>12}  ({})",
            row.date,
            row.days,
            row.interest.to_fixed(2),
            row.running_total.to_fixed(2),
            note
        );
    }

    println!("\ntotal interest: {}", schedule.total_interest().to_fixed(2));
    println!("final balance:  {}", schedule.final_balance.to_fixed(2));

    Ok(())
}
