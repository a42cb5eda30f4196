use geolens_analytics::daily_performance;

use crate::context::{op_data, AppContext};
use crate::view::date_scoped;
use crate::ScopeArgs;

/// Print the customer's own daily mentioned/top-ranked series. With a
/// `--query`, the series covers that query only; otherwise every query.
///
/// # Errors
///
/// Returns an error if the scope cannot be resolved or the fetch fails.
pub(crate) async fn run(ctx: &mut AppContext, scope: &ScopeArgs) -> anyhow::Result<()> {
    let customer = ctx.resolve_customer(scope).await?;

    let records = if let Some(query) = &scope.query {
        ctx.store.load_records(&customer, query).await;
        op_data(&ctx.store.records)?
    } else {
        ctx.store.load_all_records(&customer).await;
        op_data(&ctx.store.all_records)?
    };
    let records = date_scoped(records, (scope.from, scope.to));

    let points = daily_performance(&records);
    if points.is_empty() {
        println!("no records to chart for customer '{customer}'");
        return Ok(());
    }

    println!("{:<14}{:<12}{:<12}TOTAL", "DATE", "MENTIONED", "TOP RANKED");
    for point in &points {
        println!(
            "{:<14}{:<12}{:<12}{}",
            point.date.to_string(),
            format!("{:.1}%", point.mentioned_pct),
            format!("{:.1}%", point.top_ranked_pct),
            point.total
        );
    }
    Ok(())
}
