use clap::Parser;
use mediscan::{cli, config, display, error, export, logging, scanner, session, storage};
use cli::{Cli, Commands};
use config::Config;
use error::{MediscanError, Result};
use mediscan_common::{Catalog, ScanCounterStore, ScanSession, Workflow};
use session::{Lookup, Outcome};
use std::io::IsTerminal;
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    let owned_catalog;
    let catalog: &Catalog = match &config.catalog_path {
        Some(path) => {
            owned_catalog = Catalog::from_file(path).map_err(MediscanError::from)?;
            &owned_catalog
        }
        None => Catalog::builtin(),
    };

    match cli.command {
        Commands::List => {
            for drug in catalog.all() {
                println!("{}", display::format_summary(drug));
            }
        }

        Commands::Show { id } => {
            let drug = catalog
                .find_by_id(&id)
                .ok_or_else(|| mediscan_common::Error::DrugNotFound(id.clone()))?;
            println!("{}", display::format_details(drug, false));
        }

        Commands::Scan { payload, image, serial } => {
            let payload = match (payload, image) {
                (Some(payload), _) => payload,
                (None, Some(path)) => decode_with_session(path)?,
                (None, None) => unreachable!("clap requires payload or --image"),
            };
            run_lookup(catalog, &config, Lookup::Scan(payload), serial.as_deref())?;
        }

        Commands::Search { term, serial } => {
            run_lookup(catalog, &config, Lookup::Search(term), serial.as_deref())?;
        }

        Commands::Decode { path } => {
            let images = if path.is_dir() {
                scanner::scan_folder(&path)?
                    .into_iter()
                    .map(|info| info.path)
                    .collect()
            } else {
                vec![path.clone()]
            };

            if images.is_empty() {
                return Err(MediscanError::NoImagesFound(path.display().to_string()));
            }

            println!("🔍 Decoding {} image(s)...\n", images.len());
            for image in &images {
                let name = image.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
                match scanner::decode_qr(image) {
                    Ok(payload) => {
                        let id = mediscan_common::extract_drug_id(&payload);
                        match catalog.find_by_id(id) {
                            Some(drug) => println!("✔ {}: {}", name, display::format_summary(drug)),
                            None => println!("✗ {}: {} (not in catalog)", name, payload),
                        }
                    }
                    Err(e) => println!("✗ {}: {}", name, e),
                }
            }
        }

        Commands::Generate { id, base_url, output, format } => {
            let base_url = base_url.unwrap_or_else(|| config.base_url());
            let output = output.unwrap_or_else(|| PathBuf::from("."));

            let exported = export::export_qr(catalog, &id, &base_url, format, &output, config.qr_size)?;
            println!("✔ QR URL: {}", exported.url);
            println!("✔ {} written: {}", format.to_string().to_uppercase(), exported.path.display());
        }

        Commands::Counts { serial } => {
            let store = ScanCounterStore::new(storage::FileStorage::new(config.storage_path()?));
            match serial {
                Some(raw) => {
                    let key = mediscan_common::serial::normalize(&raw);
                    println!("{}: {}", key, store.get_count(&key));
                }
                None => {
                    let counts = store.snapshot();
                    if counts.is_empty() {
                        println!("No scans recorded yet");
                    }
                    for (serial, count) in counts {
                        println!("{}: {}", serial, count);
                    }
                }
            }
        }

        Commands::Config { set_base_url, show } => {
            let mut config = config;

            if let Some(url) = set_base_url {
                config.set_base_url(&url)?;
                println!("✔ Base URL set: {}", config.base_url);
            }

            if show {
                println!("Config:");
                println!("  Base URL : {}", config.base_url());
                println!("  Storage  : {}", config.storage_path()?.display());
                println!(
                    "  Catalog  : {}",
                    config
                        .catalog_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "built-in".into())
                );
                println!("  QR size  : {}px", config.qr_size);
            }
        }
    }

    Ok(())
}

/// 画像ファイルを読取元としてセッションを開き、最初の読取結果を返す
fn decode_with_session(path: PathBuf) -> Result<String> {
    let session = ScanSession::open(scanner::ImageFileSource::new(path.clone()))?;
    let payload = session.poll();
    session.close();
    payload.ok_or_else(|| MediscanError::QrDecode(path.display().to_string()))
}

fn run_lookup(catalog: &Catalog, config: &Config, lookup: Lookup, serial: Option<&str>) -> Result<()> {
    let store = ScanCounterStore::new(storage::FileStorage::new(config.storage_path()?));
    let mut workflow = Workflow::new(catalog, store);

    if serial.is_none() && std::io::stdin().is_terminal() {
        return session::run_interactive(&mut workflow, lookup);
    }

    match session::run_scripted(&mut workflow, &lookup, serial)? {
        Outcome::Found { drug_id } => {
            if let Some(drug) = catalog.find_by_id(&drug_id) {
                println!("{}", display::format_details(drug, false));
            }
        }
        Outcome::Authenticated { drug_id, serial, scan_count } => {
            println!("✔ {} is authentic (serial {})", drug_id, serial);
            println!("  Scan count: {}", scan_count);
        }
    }

    Ok(())
}
