use crate::context::{op_data, AppContext};
use crate::view::date_scoped;
use crate::ScopeArgs;

/// Dump the fetched rows, as a table or JSON.
///
/// # Errors
///
/// Returns an error if the scope cannot be resolved, the fetch fails, or
/// JSON serialization fails.
pub(crate) async fn run(ctx: &mut AppContext, scope: &ScopeArgs, json: bool) -> anyhow::Result<()> {
    let customer = ctx.resolve_customer(scope).await?;

    let records = if let Some(query) = &scope.query {
        ctx.store.load_records(&customer, query).await;
        op_data(&ctx.store.records)?
    } else {
        ctx.store.load_all_records(&customer).await;
        op_data(&ctx.store.all_records)?
    };
    let records = date_scoped(records, (scope.from, scope.to));

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("no records found for customer '{customer}'");
        return Ok(());
    }

    println!(
        "{:<22}{:<30}{:<11}{:<12}{:<12}SOURCES",
        "CREATED", "QUERY", "MENTIONED", "TOP RANKED", "CANDIDATES"
    );
    for record in &records {
        println!(
            "{:<22}{:<30}{:<11}{:<12}{:<12}{}",
            record.created_at.format("%Y-%m-%d %H:%M").to_string(),
            record.query,
            record.customer_mentioned,
            record.customer_top_ranked,
            record.candidates.len(),
            record.cited_sources.len()
        );
    }
    Ok(())
}
