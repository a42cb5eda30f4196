use crate::context::{op_data, AppContext};
use crate::ScopeArgs;

/// Rank cited-source URLs by citation count across the customer's queries.
///
/// # Errors
///
/// Returns an error if the scope cannot be resolved or the fetch fails.
pub(crate) async fn run(ctx: &mut AppContext, scope: &ScopeArgs, top: usize) -> anyhow::Result<()> {
    let customer = ctx.resolve_customer(scope).await?;
    ctx.store.load_all_records(&customer).await;
    ctx.view.advance_to(ctx.store.all_records.version);
    let records = op_data(&ctx.store.all_records)?;

    let ranked = ctx.view.top_sources(records, top, (scope.from, scope.to));

    if ranked.is_empty() {
        println!("no cited sources found for customer '{customer}'");
        return Ok(());
    }

    println!("{:<60}{:<10}{:<10}QUERIES", "SOURCE", "COUNT", "SHARE");
    for source in &ranked {
        println!(
            "{:<60}{:<10}{:<10}{}",
            source.url,
            source.count,
            format!("{:.1}%", source.share_pct),
            source.queries.join(", ")
        );
    }
    Ok(())
}
