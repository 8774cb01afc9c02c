use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLEOPE - Copernicus product search and mount-path resolution
#[derive(Parser, Debug)]
#[command(name = "cleope")]
#[command(about = "Search the ONDA catalogue and resolve product paths on the Copernicus mount", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./cleope.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root of the mounted product archive
    #[arg(long, global = true, value_name = "DIR")]
    pub mount_root: Option<PathBuf>,

    /// Base URL of the catalogue API
    #[arg(long, global = true, value_name = "URL")]
    pub catalogue_url: Option<String>,

    /// Directory holding the recorded selections
    #[arg(long, global = true, value_name = "DIR")]
    pub selections_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a selection used by later commands
    Select(SelectArgs),

    /// Search the catalogue with the recorded selections
    Search(SearchArgs),

    /// Look products up by name and show their mount paths
    Lookup(LookupArgs),

    /// Resolve daily atmosphere or marine analysis files
    Series(SeriesArgs),

    /// Resolve the latest monthly land product
    Monthly(MonthlyArgs),

    /// Find band and geolocation files inside products
    Bands(BandsArgs),

    /// Show the effective configuration and where each value comes from
    Config,
}

#[derive(Parser, Debug)]
pub struct SelectArgs {
    #[command(subcommand)]
    pub command: SelectCommand,
}

#[derive(Subcommand, Debug)]
pub enum SelectCommand {
    /// Area of interest from a GeoJSON file (Polygon or LineString)
    Aoi {
        /// GeoJSON geometry, feature or feature collection
        path: PathBuf,
    },

    /// Mission and optional product type ("All" for no filter)
    Mission {
        /// Mission name or alias (e.g. Sentinel-2, S2, All)
        mission: String,

        /// Product type of the mission (e.g. S2MSI2A); omit for all types
        product_type: Option<String>,
    },

    /// Catalogue sensing window
    Sensing {
        /// First day (YYYY-MM-DD)
        #[arg(required_unless_present = "clear")]
        start: Option<String>,

        /// Last day (YYYY-MM-DD)
        #[arg(required_unless_present = "clear")]
        end: Option<String>,

        /// Remove the sensing window
        #[arg(long, conflicts_with_all = ["start", "end"])]
        clear: bool,
    },

    /// Variable of the series and monthly commands (label or code)
    Variable {
        /// e.g. carbon_monoxide, tcco, NDVI
        name: String,
    },

    /// Analysis times of atmosphere products; no flag selects both
    Gmt {
        /// Midnight analysis
        #[arg(long)]
        gmt00: bool,

        /// Noon analysis
        #[arg(long)]
        gmt12: bool,
    },

    /// Date of the monthly command, or date range of the series commands
    Date {
        /// Date, or first day of a range (YYYY-MM-DD or YYYY/MM/DD)
        start: String,

        /// Last day of a range
        end: Option<String>,
    },
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Print the request URLs without contacting the catalogue
    #[arg(long)]
    pub dry_run: bool,

    /// Result table path (defaults to query.csv in the selections directory)
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct LookupArgs {
    /// Product names, with or without archive extension
    #[arg(required_unless_present = "list")]
    pub names: Vec<String>,

    /// File listing one product name per line
    #[arg(long, value_name = "FILE")]
    pub list: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct SeriesArgs {
    /// Product family
    #[arg(value_enum)]
    pub product: SeriesKind,

    /// Sampling frequency: D, W or M, optionally prefixed by a count ("2 W")
    #[arg(long, default_value = "D")]
    pub freq: String,
}

/// Daily series families
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SeriesKind {
    /// Atmosphere surface-field analyses of the selected variable
    Atmosphere,
    /// Global sea-surface temperature analysis
    Marine,
}

#[derive(Parser, Debug)]
pub struct MonthlyArgs {
    /// Date to resolve (defaults to the recorded date)
    #[arg(long)]
    pub date: Option<String>,

    /// Land variable (defaults to the recorded variable)
    #[arg(long)]
    pub variable: Option<String>,
}

#[derive(Parser, Debug)]
pub struct BandsArgs {
    #[command(subcommand)]
    pub command: BandsCommand,
}

#[derive(Subcommand, Debug)]
pub enum BandsCommand {
    /// OLCI level-2 measurement and geolocation files
    Olci {
        /// Measurement: TSM_NN, CHL_OC4ME, CHL_NN, IWV, OTCI or OGVI
        key: String,

        /// File listing one product directory per line
        #[arg(long, value_name = "FILE")]
        list: PathBuf,
    },

    /// MSI band pair of a normalized difference index
    Msi {
        /// Index: nbr or ndsi
        index: String,

        /// File listing one product directory per line
        #[arg(long, value_name = "FILE")]
        list: PathBuf,
    },

    /// SLSTR geodetic and brightness temperature files
    Slstr {
        /// Nadir channel: S7, S8 or S9
        #[arg(long, default_value = "S9")]
        band: String,

        /// File listing one product directory per line
        #[arg(long, value_name = "FILE")]
        list: PathBuf,
    },

    /// Sentinel-1 measurement images of one polarisation
    Sar {
        /// Polarisation: vv, vh, hh or hv
        #[arg(long, default_value = "vh")]
        polarization: String,

        /// File listing one product directory per line
        #[arg(long, value_name = "FILE")]
        list: PathBuf,
    },

    /// Dry matter productivity images on the mount or in listed products
    Dmp {
        /// Year to search on the mount (defaults to the current year)
        #[arg(long, conflicts_with = "list")]
        year: Option<i32>,

        /// Region tile: EURO, ASIA or AFRI
        #[arg(long, default_value = "EURO")]
        region: String,

        /// File listing one product directory per line
        #[arg(long, value_name = "FILE")]
        list: Option<PathBuf>,
    },
}
