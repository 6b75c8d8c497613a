//! Loads all hazard layers from a running backend and prints what was found at a point.
//!
//! ```sh
//! cargo run --example load_layers -- http://localhost:8000 9.31 123.30
//! ```

use std::time::Duration;

use hazard_map::hazard_map_types::GeoPoint2d;
use hazard_map::inspect::{self, HazardDetail};
use hazard_map::layer::Popup;
use hazard_map::platform::PlatformServiceImpl;
use hazard_map::upload::UploadState;
use hazard_map::{
    DatasetInfo, HazardDataLoader, HazardKind, HazardMapApp, HazardMapConfig, MapEventHandler,
    ViewBinding,
};

struct ConsoleView;

impl ViewBinding for ConsoleView {
    fn show_location_panel(&mut self) {}

    fn set_coordinates(&mut self, text: &str) {
        println!("{text}");
    }

    fn set_hazard_details(&mut self, details: &[HazardDetail], note: Option<&str>) {
        for detail in details {
            println!("  {}", detail.text());
        }
        if let Some(note) = note {
            println!("  {note}");
        }
    }

    fn show_popup(&mut self, popup: &Popup) {
        println!("{popup}");
    }

    fn hide_popup(&mut self) {}

    fn set_layer_toggle(&mut self, _kind: HazardKind, _checked: bool) {}

    fn set_upload_state(&mut self, _state: &UploadState) {}

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn schedule_reload(&mut self, _delay: Duration) {}

    fn set_datasets(&mut self, datasets: &[DatasetInfo]) {
        for dataset in datasets {
            println!(
                "Dataset {}: {} ({}, uploaded {})",
                dataset.id, dataset.name, dataset.file_name, dataset.upload_date
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let base_url = args
        .next()
        .unwrap_or_else(|| "http://localhost:8000".to_string());
    let config = HazardMapConfig::default().with_base_url(base_url);
    let point = match (args.next(), args.next()) {
        (Some(lat), Some(lon)) => GeoPoint2d::latlon(lat.parse()?, lon.parse()?),
        _ => config.center,
    };

    let loader = HazardDataLoader::new(PlatformServiceImpl::new()?, &config);
    let mut app = HazardMapApp::new(config, ConsoleView, None);

    let summary = loader
        .load_all(|kind, result| app.apply_dataset(kind, result))
        .await;
    println!(
        "Loaded: {:?}, failed: {:?}",
        summary.loaded, summary.failed
    );

    app.apply_datasets(loader.load_datasets().await);
    app.on_map_click(point);

    let details = inspect::lookup(app.map().layers(), &point);
    if details.iter().all(|d| d.is_unavailable()) {
        println!("No hazard data is available");
    }

    Ok(())
}
