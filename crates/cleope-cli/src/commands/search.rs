//! Search command implementation

use crate::cli::SearchArgs;
use crate::output::OutputWriter;
use crate::output_types::{PlannedStep, ProductRow, SearchOutput, SearchPlan};
use crate::progress::{create_page_progress, create_spinner, finish_success};
use anyhow::{Context, Result};
use cleope_catalogue::{build_filter_expression, plan_pages, OndaClient, Paginator};
use cleope_core::config::{LayeredConfig, Settings};
use cleope_core::models::{ResultTable, SearchFilter};
use cleope_core::selections::{MissionSelection, SelectionStore, AOI_FILE};
use cleope_geo::spatial::{bounding_box, result_intersects};
use std::fs::{self, File};
use std::path::Path;

/// Result table written next to the selections
pub const QUERY_FILE: &str = "query.csv";

pub fn execute(args: SearchArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let settings = config.settings();
    let store = SelectionStore::new(&settings.selections_dir);
    let filter = recorded_filter(&store)?;
    let csv_path = args
        .output
        .unwrap_or_else(|| settings.selections_dir.join(QUERY_FILE));

    if args.dry_run {
        return display_plan(output, &search_plan(&filter, &settings, &csv_path)?);
    }

    cleope_geo::ensure_valid(filter.footprint())?;

    let client = OndaClient::new()?;
    let paginator = Paginator::new(&client, &settings);

    let spinner = if output.is_json() {
        indicatif::ProgressBar::hidden()
    } else {
        create_spinner("Counting products...")
    };
    let total = paginator.count(&filter);
    spinner.finish_and_clear();
    let total = total.context("Failed to count matching products")?;

    let pages = plan_pages(total, settings.page_size);
    let bar = create_page_progress(pages.len(), output.is_json());
    let table = paginator
        .search_with_progress(total, &filter, |_| bar.inc(1))
        .context("Failed to fetch search results")?;
    finish_success(&bar, &format!("Fetched {} products", table.len()));

    write_table(&table, &csv_path)?;
    warn_outside_aoi(&filter, &table, output);

    if output.is_json() {
        output.result(SearchOutput {
            total,
            rows: table.len(),
            offline: table.offline_count(),
            csv_path: csv_path.display().to_string(),
            products: table.iter().map(ProductRow::from).collect(),
        })?;
    } else {
        output.table(table.iter().map(ProductRow::from).collect());
        output.kv("Products", table.len());
        output.kv("Offline", table.offline_count());
        if table.offline_count() > 0 {
            output.warning("Offline products must be ordered before they appear on the mount");
        }
        output.success(format!("Results saved to {}", csv_path.display()));
    }

    Ok(())
}

/// Search filter from the recorded selections; mission and sensing are optional
fn recorded_filter(store: &SelectionStore) -> Result<SearchFilter> {
    let footprint = store.require(store.read_aoi()?, "area of interest", AOI_FILE)?;
    let mission = store
        .read_mission()?
        .unwrap_or(MissionSelection { mission: None, product_type: None });

    let filter = SearchFilter::builder(footprint)
        .mission(mission.mission)
        .product_type(mission.product_type)
        .sensing(store.read_sensing()?)
        .build()?;
    Ok(filter)
}

/// Requests a search would issue, without sending any
fn search_plan(filter: &SearchFilter, settings: &Settings, csv_path: &Path) -> Result<SearchPlan> {
    let client = DryRunClient;
    let paginator = Paginator::new(&client, settings);
    let expression = build_filter_expression(filter)?;

    let steps = vec![
        PlannedStep::Count { url: paginator.count_url(filter)? },
        PlannedStep::Page {
            top: settings.page_size,
            skip: 0,
            url: paginator.endpoint().search_url(&expression, settings.page_size, 0),
        },
        PlannedStep::Write { path: csv_path.display().to_string() },
    ];

    let bounding_box = bounding_box(filter.footprint())?
        .map(|rect| [rect.min().x, rect.min().y, rect.max().x, rect.max().y]);

    Ok(SearchPlan { dry_run: true, bounding_box, steps })
}

fn display_plan(output: &OutputWriter, plan: &SearchPlan) -> Result<()> {
    if output.is_json() {
        return output.result(plan);
    }

    output.section("Planned requests (dry run)");
    if let Some([west, south, east, north]) = plan.bounding_box {
        output.kv(
            "Area of interest",
            format!("lon {:.4}..{:.4}, lat {:.4}..{:.4}", west, east, south, north),
        );
    }
    for (i, step) in plan.steps.iter().enumerate() {
        let line = match step {
            PlannedStep::Count { url } => format!("count  {}", url),
            PlannedStep::Page { top, skip, url } => {
                format!("page   top={} skip={}  {}", top, skip, url)
            }
            PlannedStep::Write { path } => format!("write  {}", path),
        };
        output.info(format!("{}. {}", i + 1, line));
    }
    output.info("No request was sent. Run without --dry-run to search the catalogue.");
    Ok(())
}

/// Stands in for the catalogue when only URLs are needed
struct DryRunClient;

impl cleope_catalogue::CatalogueClient for DryRunClient {
    fn get_json(&self, url: &str) -> cleope_core::error::Result<serde_json::Value> {
        Err(cleope_core::error::CleopeError::Catalogue {
            reason: format!("dry run, not requesting {}", url),
        })
    }

    fn get_text(&self, url: &str) -> cleope_core::error::Result<String> {
        Err(cleope_core::error::CleopeError::Catalogue {
            reason: format!("dry run, not requesting {}", url),
        })
    }
}

fn write_table(table: &ResultTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    table.write_csv(file)?;
    Ok(())
}

/// Catalogue matches are coarse; flag results whose coverage misses the area
fn warn_outside_aoi(filter: &SearchFilter, table: &ResultTable, output: &OutputWriter) {
    let outside = table
        .products()
        .filter(|p| matches!(result_intersects(filter.footprint(), p), Ok(false)))
        .count();
    if outside > 0 {
        output.warning(format!(
            "{} results do not overlap the area of interest",
            outside
        ));
    }
}
