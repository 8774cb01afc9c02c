//! Bands command implementation

use crate::cli::{BandsArgs, BandsCommand};
use crate::config_loader::read_list;
use crate::output::OutputWriter;
use crate::output_types::{BandsOutput, MsiRow, OlciRow, SlstrRow};
use anyhow::Result;
use chrono::{Datelike, Local};
use cleope_core::config::LayeredConfig;
use cleope_core::models::{BandIndex, DmpRegion, OlciKey, Polarization, SlstrBand};
use cleope_resolver::{
    msi_band_pairs, olci_files, sar_images, slstr_files, DmpResolver, GlobLocator,
};
use std::path::{Path, PathBuf};

pub fn execute(args: BandsArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let locator = GlobLocator;

    match args.command {
        BandsCommand::Olci { key, list } => {
            let key: OlciKey = key.parse()?;
            let products = product_list(&list)?;
            let files = olci_files(&locator, &products, key)?;

            if output.is_json() {
                output.result(BandsOutput {
                    index: key.to_string(),
                    products: products.len(),
                    files,
                })?;
            } else {
                let rows: Vec<OlciRow> = files.iter().map(OlciRow::from).collect();
                summarize(output, rows.len(), products.len());
                output.table(rows);
            }
        }

        BandsCommand::Msi { index, list } => {
            let index: BandIndex = index.parse()?;
            let products = product_list(&list)?;
            let pairs = msi_band_pairs(&locator, &products, index);

            if output.is_json() {
                output.result(BandsOutput {
                    index: index.to_string(),
                    products: products.len(),
                    files: pairs,
                })?;
            } else {
                let rows: Vec<MsiRow> = pairs.iter().map(MsiRow::from).collect();
                summarize(output, rows.len(), products.len());
                output.table(rows);
            }
        }

        BandsCommand::Slstr { band, list } => {
            let band: SlstrBand = band.parse()?;
            let products = product_list(&list)?;
            let files = slstr_files(&locator, &products, band)?;

            if output.is_json() {
                output.result(BandsOutput {
                    index: band.to_string(),
                    products: products.len(),
                    files,
                })?;
            } else {
                let rows: Vec<SlstrRow> = files.iter().map(SlstrRow::from).collect();
                summarize(output, rows.len(), products.len());
                output.table(rows);
            }
        }

        BandsCommand::Sar { polarization, list } => {
            let polarization: Polarization = polarization.parse()?;
            let products = product_list(&list)?;
            let images = sar_images(&locator, &products, polarization)?;
            report_images(output, polarization.to_string(), products.len(), images)?;
        }

        BandsCommand::Dmp { year, region, list } => {
            let settings = config.settings();
            let resolver = DmpResolver::new(&locator, &settings);

            match list {
                Some(list) => {
                    let products = product_list(&list)?;
                    let images = resolver.listed_products(&products)?;
                    report_images(output, "DMP".to_string(), products.len(), images)?;
                }
                None => {
                    let region: DmpRegion = region.parse()?;
                    let year = year.unwrap_or_else(|| Local::now().year());
                    let images = resolver.year_products(year, region)?;
                    let count = images.len();
                    report_images(output, format!("DMP {} {}", region, year), count, images)?;
                }
            }
        }
    }

    Ok(())
}

fn product_list(list: &Path) -> Result<Vec<PathBuf>> {
    Ok(read_list(list)?.into_iter().map(PathBuf::from).collect())
}

/// Plain image paths, one per line in human mode
fn report_images(
    output: &OutputWriter,
    index: String,
    products: usize,
    images: Vec<PathBuf>,
) -> Result<()> {
    if output.is_json() {
        return output.result(BandsOutput { index, products, files: images });
    }

    for image in &images {
        println!("{}", image.display());
    }
    if images.is_empty() {
        output.warning(format!("No {} images found", index));
    } else {
        output.success(format!("{} {} images resolved", images.len(), index));
    }
    Ok(())
}

fn summarize(output: &OutputWriter, resolved: usize, listed: usize) {
    if resolved < listed {
        output.warning(format!(
            "{} of {} products skipped; run with RUST_LOG=debug for details",
            listed - resolved,
            listed
        ));
    }
    output.success(format!("{} products resolved", resolved));
}
