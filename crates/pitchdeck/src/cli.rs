use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pitchdeck")]
#[command(author, version, about)]
#[command(long_about = "A slide-deck presentation widget with a revenue chart.\n\n\
    Without a deck file the built-in business model deck is shown.\n\n\
    Examples:\n  \
    pitchdeck                    Present the built-in deck\n  \
    pitchdeck deck.yaml          Present a custom deck\n  \
    pitchdeck --slide 6          Open on the financial projections\n  \
    pitchdeck chart --json       Print the chart configuration")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// YAML deck description to present
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false, conflicts_with = "fullscreen")]
    pub windowed: bool,

    /// Launch fullscreen even when the config defaults to windowed
    #[arg(long, global = false)]
    pub fullscreen: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Color theme
    #[arg(long, value_enum, global = false)]
    pub theme: Option<ThemeName>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the revenue dataset shown on the chart slide
    Chart {
        /// Print the full chart configuration as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.start_slide, defaults.windowed)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeName {
    Light,
    Dark,
}

impl ThemeName {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    /// Window mode requested on the command line, if any.
    fn windowed(&self) -> Option<bool> {
        if self.windowed {
            Some(true)
        } else if self.fullscreen {
            Some(false)
        } else {
            None
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Chart { json }) => crate::commands::chart::run(json),
            Some(Commands::Version) => {
                println!("pitchdeck {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => {
                if let Some(file) = &self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                }
                let windowed = self.windowed();
                crate::app::run(crate::app::LaunchOptions {
                    deck_file: self.file,
                    windowed,
                    start_slide: self.slide,
                    theme: self.theme.map(|t| t.as_str().to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_launch_flags() {
        let cli = Cli::try_parse_from([
            "pitchdeck",
            "deck.yaml",
            "--windowed",
            "--slide",
            "6",
            "--theme",
            "dark",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("deck.yaml")));
        assert_eq!(cli.windowed(), Some(true));
        assert_eq!(cli.slide, Some(6));
        assert_eq!(cli.theme.map(ThemeName::as_str), Some("dark"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_window_mode_flags() {
        let cli = Cli::try_parse_from(["pitchdeck", "--fullscreen"]).unwrap();
        assert_eq!(cli.windowed(), Some(false));

        let cli = Cli::try_parse_from(["pitchdeck"]).unwrap();
        assert_eq!(cli.windowed(), None);

        assert!(Cli::try_parse_from(["pitchdeck", "--windowed", "--fullscreen"]).is_err());
    }

    #[test]
    fn test_parse_chart_subcommand() {
        let cli = Cli::try_parse_from(["pitchdeck", "chart", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Chart { json: true })));
    }
}
