use clap::Parser;
use miette::Result;
use qcf::cli::commands::{calendar, completions, config, init, inspno, range, report, week, yymm};
use qcf::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head` or `grep -q` panics on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    qcf::cli::logging::init(global.verbose, global.quiet);
    tracing::debug!(?global, "parsed command line");

    match cli.command {
        Commands::Init(args) => init::run(args),
        Commands::Week(args) => week::run(args, &global),
        Commands::Range(args) => range::run(args, &global),
        Commands::Yymm(args) => yymm::run(args, &global),
        Commands::Calendar(args) => calendar::run(args, &global),
        Commands::Inspno(cmd) => inspno::run(cmd, &global),
        Commands::Report(cmd) => report::run(cmd, &global),
        Commands::Config(cmd) => config::run(cmd, &global),
        Commands::Completions(args) => completions::run(args),
    }
}
