use crate::context::{op_data, AppContext};
use crate::ScopeArgs;

/// List the distinct queries tracked for the resolved customer.
///
/// # Errors
///
/// Returns an error if the customer scope cannot be resolved or the fetch
/// fails.
pub(crate) async fn run(ctx: &mut AppContext, scope: &ScopeArgs) -> anyhow::Result<()> {
    let customer = ctx.resolve_customer(scope).await?;
    ctx.store.load_queries(&customer).await;
    let queries = op_data(&ctx.store.queries)?;

    if queries.is_empty() {
        println!("no queries found for customer '{customer}'");
        return Ok(());
    }

    println!("QUERY");
    for query in queries {
        println!("{query}");
    }
    Ok(())
}
