use chrono::Utc;

use geolens_analytics::visibility_score;

use crate::context::{op_data, AppContext};
use crate::ScopeArgs;

/// Generate a markdown visibility report for the resolved customer.
///
/// The score card section is included when a `--query` is selected; the
/// ranking sections always cover every query. The summary and detail cuts
/// of each ranking come from the same cached record-set version.
///
/// # Errors
///
/// Returns an error if the scope cannot be resolved or a fetch fails.
pub(crate) async fn run(ctx: &mut AppContext, scope: &ScopeArgs) -> anyhow::Result<()> {
    let customer = ctx.resolve_customer(scope).await?;

    ctx.store.load_all_records(&customer).await;
    ctx.view.advance_to(ctx.store.all_records.version);

    let score = if let Some(query) = &scope.query {
        ctx.store.load_records(&customer, query).await;
        let records = op_data(&ctx.store.records)?;
        let days = ctx.config.score_window_days;
        Some((query.clone(), days, visibility_score(records, Utc::now(), days)))
    } else {
        None
    };

    let now = Utc::now().format("%Y-%m-%d %H:%M UTC");

    println!("# GEO Visibility Report");
    println!();
    println!("**Generated**: {now}");
    println!("**Customer**: {customer}");
    println!("**Records**: {}", ctx.store.all_records.data.len());
    println!();
    println!("---");

    if let Some((query, days, summary)) = score {
        println!();
        println!("## Score — {query}");
        println!();
        println!("| Score | Mentioned | Top Ranked | Sample ({days}d) |");
        println!("|-------|-----------|------------|------------------|");
        println!(
            "| {} / 100 | {:.1}% | {:.1}% | {} |",
            summary.score, summary.mentioned_pct, summary.top_ranked_pct, summary.sample_size
        );
    }

    let date_scope = (scope.from, scope.to);
    let records = op_data(&ctx.store.all_records)?;

    let leaders = ctx.view.top_competitors(records, 3, date_scope);
    let competitors = ctx.view.top_competitors(records, 10, date_scope);
    if !competitors.is_empty() {
        println!();
        println!("## Competitors");
        println!();
        let names: Vec<&str> = leaders.iter().map(|e| e.name.as_str()).collect();
        println!("Leaders: {}", names.join(", "));
        println!();
        println!("| Competitor | Count | Share | Trend |");
        println!("|------------|-------|-------|-------|");
        for entity in &competitors {
            println!(
                "| {} | {} | {:.1}% | {} |",
                entity.name, entity.count, entity.share_pct, entity.direction
            );
        }
    }

    let sources = ctx.view.top_sources(records, 10, date_scope);
    if !sources.is_empty() {
        println!();
        println!("## Cited Sources");
        println!();
        println!("| Source | Count | Share | Queries |");
        println!("|--------|-------|-------|---------|");
        for source in &sources {
            println!(
                "| {} | {} | {:.1}% | {} |",
                source.url,
                source.count,
                source.share_pct,
                source.queries.join(", ")
            );
        }
    }

    let domains = ctx.view.top_domains(records, 10, date_scope);
    if !domains.is_empty() {
        println!();
        println!("## Domains");
        println!();
        println!("| Domain | Count | Share | URLs |");
        println!("|--------|-------|-------|------|");
        for group in &domains {
            println!(
                "| {} | {} | {:.1}% | {} |",
                group.domain,
                group.count,
                group.share_pct,
                group.sources.len()
            );
        }
    }

    Ok(())
}
