// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use pictoscribe::app_config::{Config, LogLevel};
use pictoscribe::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// Options shared by every command that loads the configuration
#[derive(Args, Debug)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", env = "PICTOSCRIBE_CONFIG")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Input language name or code (e.g., 'English', 'en', 'spa')
    #[arg(long)]
    language: Option<String>,

    /// Lexicon file mapping words to symbols
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Directory containing the symbol images
    #[arg(long)]
    symbols: Option<PathBuf>,

    /// Text size in pixels
    #[arg(long)]
    font_size: Option<u32>,
}

#[derive(Args, Debug)]
struct TranslateArgs {
    /// Input text file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing pages
    #[arg(short, long)]
    force_overwrite: bool,

    /// Use symbols from the first occurrence of a word
    #[arg(long)]
    fast: bool,

    /// Subtitle every symbol
    #[arg(long)]
    sub_all: bool,

    /// Ask which symbol to use for ambiguous words
    #[arg(long)]
    choose_definitions: bool,

    /// Do not number pages
    #[arg(long)]
    no_page_numbers: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct AlphabetArgs {
    /// Words to include, in order
    #[arg(value_name = "WORD", required = true)]
    words: Vec<String>,

    /// Output PNG file
    #[arg(short, long, default_value = "alphabet.png")]
    output: PathBuf,

    /// Cells per row
    #[arg(long, default_value_t = 4)]
    columns: usize,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a text file or every text file of a directory into pages
    Translate(TranslateArgs),

    /// Draw a legend of symbols and the words they stand for
    Alphabet(AlphabetArgs),

    /// Generate shell completions for pictoscribe
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Pictoscribe - text to symbol-supported pages
///
/// Replaces the words of a text with pictographic symbols and lays the
/// result out on fixed-size pages.
#[derive(Parser, Debug)]
#[command(name = "pictoscribe")]
#[command(version)]
#[command(about = "Symbol-supported text layout tool")]
#[command(long_about = "Pictoscribe replaces words with pictographic symbols and paginates the result.

EXAMPLES:
    pictoscribe translate story.txt                  # Translate using default config
    pictoscribe translate -f story.txt               # Overwrite existing pages
    pictoscribe translate --fast --sub-all books/    # Process an entire directory
    pictoscribe alphabet cat dog house -o legend.png # Draw a legend
    pictoscribe completions bash > pictoscribe.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn colour_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::colour_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Start at info; the level is adjusted once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "pictoscribe", &mut std::io::stdout());
            Ok(())
        }
        Commands::Translate(args) => run_translate(args).await,
        Commands::Alphabet(args) => run_alphabet(args),
    }
}

/// Load the config and apply the flags every command shares
fn load_config(common: &CommonArgs) -> Result<Config> {
    // Apply a command line level immediately so config loading is logged at it
    if let Some(level) = &common.log_level {
        let level: LogLevel = level.clone().into();
        log::set_max_level((&level).into());
    }

    let mut config = Config::load_or_create(&common.config_path)?;

    if let Some(language) = &common.language {
        config.language = language.clone();
    }
    if let Some(lexicon) = &common.lexicon {
        config.lexicon_path = lexicon.clone();
    }
    if let Some(symbols) = &common.symbols {
        config.symbol_dir = symbols.clone();
    }
    if let Some(font_size) = common.font_size {
        config.layout.font_size = font_size;
    }
    if let Some(level) = &common.log_level {
        config.log_level = level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level((&config.log_level).into());
    Ok(config)
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    let mut config = load_config(&options.common)?;

    // Flags only ever switch behaviour on
    config.translation.fast_translate |= options.fast;
    config.translation.sub_all |= options.sub_all;
    config.translation.choose_definitions |= options.choose_definitions;
    if options.no_page_numbers {
        config.output.page_numbers = false;
    }

    let controller = Controller::with_config(config)?;

    if options.input_path.is_file() {
        controller
            .run(options.input_path.clone(), options.force_overwrite)
            .await?;
    } else if options.input_path.is_dir() {
        let summary = controller
            .run_folder(options.input_path.clone(), options.force_overwrite)
            .await?;
        if summary.failed > 0 {
            return Err(anyhow!("{} file(s) failed to translate", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}

fn run_alphabet(options: AlphabetArgs) -> Result<()> {
    let config = load_config(&options.common)?;
    let controller = Controller::with_config(config)?;
    let path = controller.write_alphabet(&options.words, options.columns, &options.output)?;
    info!("Alphabet written to {}", path.display());
    Ok(())
}
