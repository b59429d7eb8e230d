use anyhow::Context;
use clap::Parser;
use exsearch::{cli, config, prompt, report, workbook};
use exsearch::Searcher;
use cli::Cli;
use config::Config;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use workbook::{PasswordSource, PresetPasswords};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().context("failed to load config")?;

    println!("🔎 exsearch - Excel workbook search\n");

    let mut query = prompt::collect_query(&cli)?;

    let extensions = if cli.extensions.is_empty() {
        config.extensions.clone()
    } else {
        config::normalize_extensions(&cli.extensions)
    };

    // パスワード指定があれば入力を求めない
    let mut console = prompt::ConsolePasswordPrompt;
    let mut preset = PresetPasswords::new(cli.passwords.clone());
    let passwords: &mut dyn PasswordSource = if cli.passwords.is_empty() {
        &mut console
    } else {
        &mut preset
    };

    let summary = Searcher::new(passwords)
        .with_extensions(extensions)
        .with_password_attempts(config.password_attempts)
        .run(&mut query)
        .with_context(|| format!("search failed in {}", query.path.display()))?;

    print!("{}", report::summary(&query, &summary));

    if config.pause_on_exit && !cli.no_pause {
        prompt::wait_for_enter()?;
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
