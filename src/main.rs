use mazeweave::{
    MazeError,
    app::{App, Outcome},
    config::Config,
    generators::{Generator, algorithm_function, algorithm_names},
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: mazeweave <rows> <columns> [algorithm]\n       mazeweave --list";

/// Parse `<rows> <columns> [algorithm]`, defaulting to the recursive backtracker.
fn parse_args(args: &[String]) -> Result<(usize, usize, Generator), Box<dyn std::error::Error>> {
    let [rows, columns, rest @ ..] = args else {
        return Err(USAGE.into());
    };
    let dimension = |s: &str| s.parse::<usize>().ok().filter(|&n| n > 0);
    let (Some(r), Some(c)) = (dimension(rows.as_str()), dimension(columns.as_str())) else {
        return Err(MazeError::InvalidDimension {
            rows: rows.parse().unwrap_or(0),
            columns: columns.parse().unwrap_or(0),
        }
        .into());
    };
    let generator = match rest {
        [] => Generator::RecursiveBacktracker,
        [name] => algorithm_function(name).map_err(|e| {
            format!(
                "{}; expected one of: {}",
                e,
                algorithm_names().collect::<Vec<_>>().join(", ")
            )
        })?,
        _ => return Err(USAGE.into()),
    };
    Ok((r, c, generator))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.first().map(String::as_str) == Some("--list") {
        for name in algorithm_names() {
            println!("{}", name);
        }
        return Ok(());
    }
    let (rows, columns, generator) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let config = Config::from_env();

    // The animation owns the terminal, so logs go to a file
    let file_appender = tracing_appender::rolling::never(".", &config.log_file);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let mut app = App::new(config);
    let result = app.run(&mut stdout, rows, columns, generator);
    App::restore_terminal(&mut stdout)?;

    match result {
        Ok(Outcome::Solved(path)) => {
            tracing::info!("[main] solved with a path of {} cells", path.len());
            println!("{}: path of {} cells", generator, path.len());
        }
        Ok(Outcome::Cancelled) => {
            tracing::info!("[main] run cancelled by user");
            println!("Cancelled.");
        }
        Err(e) => {
            tracing::error!("[main] {}", e);
            eprintln!("{}", e);
            // Flush buffered log lines before exiting
            drop(guard);
            std::process::exit(1);
        }
    }
    Ok(())
}
