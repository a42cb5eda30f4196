use crate::context::{op_data, AppContext};
use crate::ScopeArgs;

/// Rank cited sources grouped by extracted host.
///
/// # Errors
///
/// Returns an error if the scope cannot be resolved or the fetch fails.
pub(crate) async fn run(ctx: &mut AppContext, scope: &ScopeArgs, top: usize) -> anyhow::Result<()> {
    let customer = ctx.resolve_customer(scope).await?;
    ctx.store.load_all_records(&customer).await;
    ctx.view.advance_to(ctx.store.all_records.version);
    let records = op_data(&ctx.store.all_records)?;

    let ranked = ctx.view.top_domains(records, top, (scope.from, scope.to));

    if ranked.is_empty() {
        println!("no cited sources found for customer '{customer}'");
        return Ok(());
    }

    println!("{:<40}{:<10}{:<10}URLS", "DOMAIN", "COUNT", "SHARE");
    for group in &ranked {
        println!(
            "{:<40}{:<10}{:<10}{}",
            group.domain,
            group.count,
            format!("{:.1}%", group.share_pct),
            group.sources.len()
        );
    }
    Ok(())
}
