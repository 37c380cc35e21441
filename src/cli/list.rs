//! `spaceui list`: show what the registry offers.

use clap::Args;
use serde_json::json;

use crate::registry::manifest::Manifest;
use crate::registry::source::RegistryClient;

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Emit machine-readable JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, client: &RegistryClient) -> anyhow::Result<()> {
    let manifest = client.manifest().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&to_json(manifest))?);
        return Ok(());
    }

    if manifest.components.is_empty() {
        println!("The registry at {} has no components.", client.location());
        return Ok(());
    }

    // Group by category, alphabetical inside each group.
    let mut categories: Vec<&String> = manifest.categories.keys().collect();
    categories.sort_unstable();

    for category_key in &categories {
        let category = &manifest.categories[*category_key];
        let mut members: Vec<(&str, &str)> = manifest
            .components
            .iter()
            .filter(|(_, c)| c.category == **category_key)
            .map(|(key, c)| (key.as_str(), c.name.as_str()))
            .collect();
        if members.is_empty() {
            continue;
        }
        members.sort_unstable();

        println!("\n{}", category.name);
        for (key, name) in members {
            println!("  {key:<40} {name}");
        }
    }

    // Components whose category key has no entry still get listed.
    let mut orphans: Vec<(&str, &str)> = manifest
        .components
        .iter()
        .filter(|(_, c)| !manifest.categories.contains_key(&c.category))
        .map(|(key, c)| (key.as_str(), c.name.as_str()))
        .collect();
    if !orphans.is_empty() {
        orphans.sort_unstable();
        println!("\nOther");
        for (key, name) in orphans {
            println!("  {key:<40} {name}");
        }
    }

    println!("\n{} component(s) available.", manifest.components.len());
    Ok(())
}

fn to_json(manifest: &Manifest) -> serde_json::Value {
    let mut components: Vec<serde_json::Value> = manifest
        .components
        .iter()
        .map(|(key, c)| {
            json!({
                "key": key,
                "name": c.name,
                "category": c.category,
                "files": c.files,
                "npmDependencies": c.npm_dependencies,
            })
        })
        .collect();
    components.sort_by(|a, b| a["key"].as_str().cmp(&b["key"].as_str()));

    json!({
        "name": manifest.name,
        "description": manifest.description,
        "components": components,
    })
}
