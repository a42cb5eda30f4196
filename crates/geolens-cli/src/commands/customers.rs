use crate::context::{op_data, AppContext};

/// List the distinct customers present in the scrape data.
///
/// # Errors
///
/// Returns an error for non-admin sessions or when the fetch fails.
pub(crate) async fn run(ctx: &mut AppContext) -> anyhow::Result<()> {
    ctx.store.load_customers().await;
    let customers = op_data(&ctx.store.customers)?;

    if customers.is_empty() {
        println!("no customers found");
        return Ok(());
    }

    println!("CUSTOMER");
    for customer in customers {
        println!("{customer}");
    }
    Ok(())
}
