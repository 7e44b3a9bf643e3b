//! Parcel tracker demo entry point.
//!
//! # Responsibility
//! - Drive one parcel through its lifecycle against a database file.
//! - Print each step so the store wiring can be checked by eye.

use clap::Parser;
use log::error;
use parcel_core::db::open_db;
use parcel_core::{
    core_version, init_logging, ClientId, Parcel, ParcelService, ServiceError, SqliteParcelStore,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "parcel_cli", version, about = "Parcel tracker lifecycle demo")]
struct Args {
    /// SQLite database file; created when missing.
    #[arg(long, default_value = "tracker.db")]
    db: PathBuf,
    /// Client owning the demo parcel.
    #[arg(long, default_value_t = 1000)]
    client: ClientId,
    #[arg(long, default_value = "Moscow, Red Square")]
    address: String,
    /// Address the demo tries to switch to after the parcel has shipped.
    #[arg(long, default_value = "Saint Petersburg, Palace Square")]
    new_address: String,
    /// One of trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long)]
    log_level: Option<String>,
    /// Directory for rolling log files. Logging is off when unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = init_logging(args.log_dir.as_deref(), args.log_level.as_deref()) {
        eprintln!("logging disabled: {err}");
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    println!("parcel_core version={}", core_version());

    let conn = open_db(&args.db)?;
    let service = ParcelService::new(SqliteParcelStore::try_new(&conn)?);

    let parcel = service.register(args.client, args.address.as_str())?;
    print_parcel("registered", &parcel);

    let status = service.next_status(parcel.number)?;
    println!("parcel {} status -> {status}", parcel.number);

    match service.change_address(parcel.number, &args.new_address) {
        Ok(()) => println!("parcel {} address -> {}", parcel.number, args.new_address),
        Err(err @ ServiceError::NotRegistered { .. }) => println!("address unchanged: {err}"),
        Err(err) => return Err(err.into()),
    }

    for parcel in service.client_parcels(args.client)? {
        print_parcel("client parcel", &parcel);
    }

    Ok(())
}

fn print_parcel(label: &str, parcel: &Parcel) {
    println!(
        "{label}: number={} client={} status={} address={} created_at={}",
        parcel.number, parcel.client, parcel.status, parcel.address, parcel.created_at
    );
}
