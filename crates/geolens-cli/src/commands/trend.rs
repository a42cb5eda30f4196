use geolens_analytics::{entity_trend, trend_direction, EntityKind};

use crate::context::{op_data, AppContext};
use crate::view::date_scoped;
use crate::ScopeArgs;

/// Print the daily mention series for one entity.
///
/// # Errors
///
/// Returns an error if the scope cannot be resolved, `--query-only` is set
/// without a `--query`, or the fetch fails.
pub(crate) async fn run(
    ctx: &mut AppContext,
    scope: &ScopeArgs,
    entity: &str,
    kind: EntityKind,
    query_only: bool,
) -> anyhow::Result<()> {
    let customer = ctx.resolve_customer(scope).await?;
    let query = if query_only {
        Some(AppContext::require_query(scope)?)
    } else {
        None
    };

    ctx.store.load_all_records(&customer).await;
    let records = date_scoped(op_data(&ctx.store.all_records)?, (scope.from, scope.to));

    let points = entity_trend(&records, entity, kind, query.as_deref());
    if points.is_empty() {
        println!("no records to chart for '{entity}'");
        return Ok(());
    }

    println!("{:<14}{:<10}{:<10}RATE", "DATE", "MENTIONS", "TOTAL");
    for point in &points {
        println!(
            "{:<14}{:<10}{:<10}{:.1}%",
            point.date.to_string(),
            point.mentions,
            point.total,
            point.percentage
        );
    }
    println!();
    println!("trend: {}", trend_direction(&points));
    Ok(())
}
