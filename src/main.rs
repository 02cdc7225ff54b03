use clap::Parser;
use filepush::Endpoint;
use filepush::cli::{Cli, Commands, ReceiveArgs, SendArgs};
use filepush::stream::{receive, worker};
use log::{error, info, warn};

fn run_send(args: SendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let endpoint = Endpoint::parse_with(&args.host, args.port, args.host_policy())?;
    let config = args.send_config();

    info!(
        "Sending file {:?} to {} (chunk_size: {})",
        args.file,
        endpoint,
        config.effective_chunk_size()
    );

    let handle = worker::spawn_send(endpoint, args.file, config)?;
    let cancel = handle.cancel_token();
    ctrlc::set_handler(move || {
        warn!("Interrupted, cancelling transfer");
        cancel.cancel();
    })?;

    let report = handle.join()?;
    println!(
        "Sent {} bytes to {} in {:?}\nsha256: {}",
        report.bytes_sent,
        report.endpoint,
        report.elapsed,
        report.sha256_hex()
    );
    Ok(())
}

fn run_receive(args: ReceiveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.receive_config();
    info!(
        "Receiving at {}:{} (output: {:?})",
        args.bind, args.port, args.file
    );

    let report = receive::receive_file((args.bind.as_str(), args.port), &args.file, &config)?;
    println!(
        "Received {} bytes from {}\nsha256: {}",
        report.bytes_received,
        report.peer,
        report.sha256_hex()
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Send(args) => run_send(args),
        Commands::Receive(args) => run_receive(args),
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
