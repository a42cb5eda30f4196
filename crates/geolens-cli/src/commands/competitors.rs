use crate::context::{op_data, AppContext};
use crate::ScopeArgs;

/// Rank competitors by mention count across all of the customer's queries.
///
/// # Errors
///
/// Returns an error if the scope cannot be resolved or the fetch fails.
pub(crate) async fn run(ctx: &mut AppContext, scope: &ScopeArgs, top: usize) -> anyhow::Result<()> {
    let customer = ctx.resolve_customer(scope).await?;
    ctx.store.load_all_records(&customer).await;
    ctx.view.advance_to(ctx.store.all_records.version);
    let records = op_data(&ctx.store.all_records)?;

    let ranked = ctx
        .view
        .top_competitors(records, top, (scope.from, scope.to));

    if ranked.is_empty() {
        println!("no competitor mentions found for customer '{customer}'");
        return Ok(());
    }

    println!("{:<35}{:<10}{:<10}TREND", "COMPETITOR", "COUNT", "SHARE");
    for entity in &ranked {
        println!(
            "{:<35}{:<10}{:<10}{}",
            entity.name,
            entity.count,
            format!("{:.1}%", entity.share_pct),
            entity.direction
        );
    }
    Ok(())
}
