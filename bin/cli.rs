use std::io::Write;
use std::time::Duration;

use clap::Parser;
use log::{error, info, warn, LevelFilter};
use simple_logger::SimpleLogger;

use memprobe::proc::rlimit;
use memprobe::size::parse_size;
use memprobe::{BlockSource, Config, LimitedSource, Probe, ProbeError, Summary, SystemSource};

/// Claim memory chunk by chunk until the allocator refuses, then print "Out of memory"
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// bytes requested per allocation, e.g. 4096, 64KiB, 1MiB
    #[arg(long, default_value = "1MiB", value_parser = parse_size)]
    chunk_size: usize,

    /// pause after each claimed chunk, in milliseconds
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// stop claiming once this many bytes are held, e.g. 8MiB
    #[arg(long, value_parser = parse_size)]
    limit: Option<usize>,

    /// cap the process address space (RLIMIT_AS) before starting, e.g. 64MiB
    #[arg(long, value_parser = parse_size)]
    address_space: Option<usize>,

    /// enable debug logs
    #[arg(short, long)]
    debug: bool,
}

fn probe<S: BlockSource, W: Write>(
    source: S,
    config: Config,
    out: &mut W,
) -> Result<Summary, ProbeError> {
    let mut probe = Probe::new(source, config)?;
    Ok(probe.run(out))
}

fn main() {
    let args = Args::parse();

    let level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("cannot set up logging: {}", e);
    }

    if let Some(bytes) = args.address_space {
        if let Err(e) = rlimit::limit_address_space(bytes as u64) {
            error!("Error limiting address space: {}", e);
            std::process::exit(1);
        }
    }

    let config = Config {
        chunk_size: args.chunk_size,
        interval: Duration::from_millis(args.interval_ms),
    };
    info!(
        "chunk size: {} bytes, interval: {:?}, limit: {:?}",
        config.chunk_size, config.interval, args.limit
    );
    match rlimit::address_space() {
        Ok(Some(bytes)) => info!("address space limit: {} bytes", bytes),
        Ok(None) => info!("address space limit: unlimited"),
        Err(e) => warn!("cannot read address space limit: {}", e),
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match args.limit {
        Some(limit) => probe(LimitedSource::new(SystemSource, limit), config, &mut out),
        None => probe(SystemSource, config, &mut out),
    };

    match result {
        Ok(_) => {}
        Err(e) => {
            error!("Error starting probe: {}", e);
            std::process::exit(1);
        }
    }
}
