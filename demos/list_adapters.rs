use bluetooth_adapters::api::BluetoothAdapters;
use bluetooth_adapters::freebsd::FreeBsdAdapters;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let mut registry = FreeBsdAdapters::new();
    registry.refresh().await;

    println!("default adapter: {}", registry.default_adapter());
    let adapters = registry.adapters();
    if adapters.is_empty() {
        eprintln!("Bluetooth adapter(s) were NOT found, sorry...");
        return Ok(());
    }

    let mut names: Vec<_> = adapters.keys().collect();
    names.sort();
    for name in names {
        let details = &adapters[name];
        println!(
            "{}: {} ({})",
            name,
            details.address,
            details.manufacturer.as_deref().unwrap_or("unknown manufacturer")
        );
    }
    Ok(())
}
