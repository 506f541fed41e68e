//! `schema` - print the schemas of registered resources

use anyhow::Result;
use colored::Colorize;
use lifecycle::AttributeMode;

use crate::ui;
use notnull::provider::new_provider;

pub fn run(json: bool) -> Result<()> {
    let schemas = new_provider().schemas();

    if json {
        println!("{}", serde_json::to_string_pretty(&schemas)?);
        return Ok(());
    }

    for (type_name, schema) in &schemas {
        ui::header(type_name);
        ui::dim(&schema.description);
        println!();

        for (name, attr) in &schema.attributes {
            let mode = match attr.mode {
                AttributeMode::Required => "required".red(),
                AttributeMode::Optional => "optional".cyan(),
                AttributeMode::Computed => "computed".yellow(),
            };
            println!(
                "  {:<15} {:<10} {}",
                name.bold(),
                mode,
                attr.description.dimmed()
            );
        }
    }
    Ok(())
}
