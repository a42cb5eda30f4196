use chrono::Utc;

use geolens_analytics::visibility_score;

use crate::context::{op_data, AppContext};
use crate::ScopeArgs;

/// Print the GEO visibility score card for a customer+query.
///
/// # Errors
///
/// Returns an error if the scope cannot be resolved or the fetch fails.
pub(crate) async fn run(
    ctx: &mut AppContext,
    scope: &ScopeArgs,
    days: Option<i64>,
) -> anyhow::Result<()> {
    let customer = ctx.resolve_customer(scope).await?;
    let query = AppContext::require_query(scope)?;
    let days = days.unwrap_or(ctx.config.score_window_days);

    ctx.store.load_records(&customer, &query).await;
    let records = op_data(&ctx.store.records)?;

    let summary = visibility_score(records, Utc::now(), days);

    println!("GEO visibility: {customer} / {query}");
    println!();
    println!("{:<15}{} / 100", "SCORE", summary.score);
    println!("{:<15}{:.1}%", "MENTIONED", summary.mentioned_pct);
    println!("{:<15}{:.1}%", "TOP RANKED", summary.top_ranked_pct);
    println!(
        "{:<15}{} records over trailing {} days",
        "SAMPLE", summary.sample_size, days
    );

    if summary.sample_size == 0 {
        println!();
        println!("no records inside the window; try a larger --days");
    }
    Ok(())
}
