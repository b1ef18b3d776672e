use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so they never mix with the shell output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    println!("caissa v{}, by {}", env!("CARGO_PKG_VERSION"), env!("CARGO_PKG_AUTHORS"));

    let mut args = std::env::args().skip(1);
    // Launches a perft test
    if args.next().as_deref() == Some("perft") {
        let expected_format = "Expected : perft <depth> [<FEN>]";
        let depth = match args.next().and_then(|d| d.parse::<u32>().ok()) {
            Some(d) => d,
            None => {
                eprintln!("{}", expected_format);
                std::process::exit(2)
            }
        };
        let fen: Vec<String> = args.collect();
        let fen = if fen.is_empty() { None } else { Some(fen.join(" ")) };

        if let Err(e) = caissa::run_perft(depth, fen) {
            eprintln!("{}", e);
            std::process::exit(1)
        }
    } else {
        caissa::shell::Shell::default().run()
    }
}
