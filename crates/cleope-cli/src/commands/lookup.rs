//! Lookup command implementation

use crate::cli::LookupArgs;
use crate::config_loader::read_list;
use crate::output::OutputWriter;
use crate::output_types::{LookupOutput, LookupRow};
use anyhow::{Context, Result};
use cleope_catalogue::{is_restored, mount_paths, Endpoint, OndaClient, ProductLookup};
use cleope_core::config::LayeredConfig;

pub fn execute(args: LookupArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let settings = config.settings();

    let mut names = args.names;
    if let Some(list) = &args.list {
        names.extend(read_list(list)?);
    }

    let client = OndaClient::new()?;
    let lookup = ProductLookup::new(&client, Endpoint::new(settings.catalogue_url.clone()));
    let products = lookup
        .find_all(&names)
        .context("Failed to look products up in the catalogue")?;

    let paths = mount_paths(&settings.mount_root, &products);
    let rows: Vec<LookupRow> = products
        .iter()
        .zip(&paths)
        .map(|(product, path)| {
            LookupRow::new(
                product,
                path.display().to_string(),
                is_restored(&settings.mount_root, product),
            )
        })
        .collect();
    let offline = rows.iter().filter(|r| r.offline).count();

    if output.is_json() {
        output.result(LookupOutput { products: rows, offline })?;
    } else {
        output.table(rows);
        if offline > 0 {
            output.warning(format!(
                "{} products are archived; order them before reading from the mount",
                offline
            ));
        }
    }

    Ok(())
}
