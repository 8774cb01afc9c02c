//! Integration tests for the cleope binary
//!
//! Every test points the selections directory and the mount at temporary
//! directories, so nothing touches the real catalogue or mount.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn cleope_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove 'deps' directory
    path.push("cleope");
    path
}

struct Workspace {
    selections: TempDir,
    mount: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            selections: TempDir::new().unwrap(),
            mount: TempDir::new().unwrap(),
        }
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(cleope_bin())
            .args(args)
            .arg("--selections-dir")
            .arg(self.selections.path())
            .arg("--mount-root")
            .arg(self.mount.path())
            .env_remove("CLEOPE_CATALOGUE_URL")
            .env_remove("CLEOPE_PAGE_SIZE")
            .output()
            .expect("Failed to execute command")
    }

    fn selection(&self, file: &str) -> PathBuf {
        self.selections.path().join(file)
    }
}

fn json_stdout(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

fn write_aoi(dir: &Path) -> PathBuf {
    let path = dir.join("aoi.geojson");
    fs::write(
        &path,
        r#"{"type":"Polygon","coordinates":[[[10.0,40.0],[12.0,40.0],[12.0,42.0],[10.0,42.0],[10.0,40.0]]]}"#,
    )
    .unwrap();
    path
}

#[test]
fn test_select_mission_records_pair() {
    let ws = Workspace::new();
    let output = ws.run(&["select", "mission", "Sentinel-2", "S2MSI2A"]);
    assert!(output.status.success(), "Command should succeed");

    let recorded = fs::read_to_string(ws.selection("m.log")).unwrap();
    assert_eq!(recorded, r#"["Sentinel-2","S2MSI2A"]"#);
}

#[test]
fn test_select_mission_rejects_foreign_product_type() {
    let ws = Workspace::new();
    let output = ws.run(&["select", "mission", "Sentinel-1", "S2MSI2A"]);

    assert!(!output.status.success(), "Command should fail");
    assert!(!ws.selection("m.log").exists());
}

#[test]
fn test_select_aoi_with_json_output() {
    let ws = Workspace::new();
    let aoi = write_aoi(ws.selections.path());
    let output = ws.run(&["select", "aoi", aoi.to_str().unwrap(), "--json"]);
    assert!(output.status.success());

    let parsed = json_stdout(&output);
    assert_eq!(parsed["status"], "success");
    assert_eq!(parsed["data"]["selection"], "area of interest");
    assert!(ws.selection("polygon.json").exists());
}

#[test]
fn test_search_dry_run_plans_requests() {
    let ws = Workspace::new();
    let aoi = write_aoi(ws.selections.path());
    assert!(ws.run(&["select", "aoi", aoi.to_str().unwrap()]).status.success());

    let output = ws.run(&["search", "--dry-run", "--json"]);
    assert!(output.status.success());

    let data = &json_stdout(&output)["data"];
    assert_eq!(data["dry_run"], true);
    let steps = data["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0]["kind"], "count");
    assert_eq!(steps[1]["kind"], "page");
    assert_eq!(steps[1]["top"], 100);
    assert_eq!(steps[2]["kind"], "write");
    assert!(!ws.selection("query.csv").exists(), "Dry run should not write results");
}

#[test]
fn test_search_without_aoi_fails() {
    let ws = Workspace::new();
    let output = ws.run(&["search", "--dry-run"]);
    assert!(!output.status.success());
}

#[test]
fn test_config_reports_cli_source() {
    let ws = Workspace::new();
    let output = ws.run(&["config", "--json"]);
    assert!(output.status.success());

    let values = json_stdout(&output)["data"]["values"].as_array().unwrap().clone();
    let mount = values.iter().find(|v| v["key"] == "mount_root").unwrap();
    assert_eq!(mount["source"], "Cli");
    assert_eq!(mount["value"], ws.mount.path().display().to_string());

    let page_size = values.iter().find(|v| v["key"] == "page_size").unwrap();
    assert_eq!(page_size["value"], "100");
}

#[test]
fn test_marine_series_on_mount() {
    let ws = Workspace::new();
    let marine = ws
        .mount
        .path()
        .join("Copernicus-marine")
        .join("SST_GLO_SST_L4_NRT_OBSERVATIONS_010_005")
        .join("METOFFICE-GLO-SST-L4-NRT-OBS-GMPE-V3");
    for day in ["01", "02"] {
        let dir = marine.join("2020").join("01").join(day);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("202001{}120000-UKMO-L4_GHRSST.nc", day)), b"").unwrap();
    }

    assert!(ws.run(&["select", "date", "2020-01-01", "2020-01-03"]).status.success());
    let output = ws.run(&["series", "marine", "--json"]);
    assert!(output.status.success());

    let data = &json_stdout(&output)["data"];
    assert_eq!(data["pseudopaths"].as_array().unwrap().len(), 3);
    let files = data["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert!(files[0].as_str().unwrap().ends_with("20200101120000-UKMO-L4_GHRSST.nc"));
}

#[test]
fn test_monthly_without_variable_fails() {
    let ws = Workspace::new();
    let output = ws.run(&["monthly", "--date", "2020-03-15"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("variable"));
}

#[test]
fn test_monthly_resolves_latest_file() {
    let ws = Workspace::new();
    let month = ws.mount.path().join("Copernicus-land").join("NDVI").join("2020").join("03");
    let nested = month.join("c_gls_NDVI_202003110000_GLOBE_PROBAV_V2.2.1");
    fs::create_dir_all(&nested).unwrap();
    let file = nested.join("c_gls_NDVI_202003110000_GLOBE_PROBAV_V2.2.1.nc");
    fs::write(&file, b"").unwrap();

    let output = ws.run(&["monthly", "--variable", "NDVI", "--date", "2020-03-15", "--json"]);
    assert!(output.status.success());

    let data = &json_stdout(&output)["data"];
    assert_eq!(data["variable"], "NDVI");
    assert_eq!(data["file"], file.display().to_string());
}

#[test]
fn test_dmp_images_for_region_and_year() {
    let ws = Workspace::new();
    let archive = ws
        .mount
        .path()
        .join("Copernicus-land")
        .join("DMP")
        .join("2019")
        .join("03")
        .join("01")
        .join("g2_BIOPAR_DMP_201903010000_EURO_PROBAV_V2.0.1.zip")
        .join("unpacked");
    fs::create_dir_all(&archive).unwrap();
    let image = archive.join("c_gls_DMP_201903010000_EURO_PROBAV_V2.0.1.tiff");
    fs::write(&image, b"").unwrap();

    let output = ws.run(&["bands", "dmp", "--year", "2019", "--json"]);
    assert!(output.status.success());
    let data = &json_stdout(&output)["data"];
    assert_eq!(data["files"][0], image.display().to_string());

    let output = ws.run(&["bands", "dmp", "--year", "2019", "--region", "ASIA", "--json"]);
    assert!(output.status.success());
    assert!(json_stdout(&output)["data"]["files"].as_array().unwrap().is_empty());
}

#[test]
fn test_slstr_files_from_list() {
    let ws = Workspace::new();
    let product = ws.mount.path().join("S3A_SL_1_RBT____20200101T095000.SEN3");
    fs::create_dir_all(&product).unwrap();
    fs::write(product.join("geodetic_in.nc"), b"").unwrap();
    fs::write(product.join("S9_BT_in.nc"), b"").unwrap();

    let list = ws.selections.path().join("products.txt");
    fs::write(&list, format!("{}\n\n", product.display())).unwrap();

    let output = ws.run(&["bands", "slstr", "--list", list.to_str().unwrap(), "--json"]);
    assert!(output.status.success());
    let data = &json_stdout(&output)["data"];
    assert_eq!(data["index"], "S9_BT_in");
    assert_eq!(data["products"], 1);
    assert_eq!(data["files"][0]["band"], product.join("S9_BT_in.nc").display().to_string());
}
