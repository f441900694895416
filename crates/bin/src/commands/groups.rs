//! `scanidx groups`

use super::GroupsArgs;
use scanidx::AnalysisConfig;
use serde_json::json;

pub(crate) fn run(
    args: &GroupsArgs,
    config: &AnalysisConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.json {
        let output = json!({
            "commodity_groups": config.commodity_groups,
            "headline_groups": config.headline_groups,
            "excluded_subcategories": config.excluded_subcategories,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("\nCommodity groups:");
    println!("{}", "=".repeat(60));
    for group in &config.commodity_groups {
        println!("{}", group.name);
        for member in &group.members {
            println!("  - {member}");
        }
    }

    println!("\nHeadline groups:");
    println!("{}", "-".repeat(60));
    for group in &config.headline_groups {
        println!("{}: {}", group.name, group.members.join("; "));
    }

    if !config.excluded_subcategories.is_empty() {
        println!(
            "\nExcluded subcategories: {}",
            config.excluded_subcategories.join(", ")
        );
    }
    Ok(())
}
