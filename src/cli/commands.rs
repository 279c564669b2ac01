use clap::{Parser, ValueEnum};

/// Compile a hardware sketch to WebAssembly
#[derive(Parser, Debug)]
#[command(
    name = "sketchwasm",
    about = "Compile a hardware sketch to WebAssembly",
    version,
    long_about = "sketchwasm copies the sketch directory found under the mapped root into the \
                  build container's working tree, rewrites it for the WebAssembly platform shim, \
                  runs the PlatformIO build (retrying once on failure) and copies the produced \
                  module, its loader and index.html into a results directory inside the sketch.\n\n\
                  Paths and the build command come from SKETCHWASM_* environment variables.\n\n\
                  Examples:\n  \
                  sketchwasm\n  \
                  sketchwasm --keep-files\n  \
                  sketchwasm --format json"
)]
pub struct CliArgs {
    #[arg(long, help = "Keep the staged source files after compilation")]
    pub keep_files: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Format of the summary printed on success"
    )]
    pub format: OutputFormatArg,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["sketchwasm"]);
        assert!(!args.keep_files);
        assert_eq!(args.format, OutputFormatArg::Human);
        assert!(args.log_level.is_none());
        assert!(!args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_keep_files_flag() {
        let args = CliArgs::parse_from(["sketchwasm", "--keep-files"]);
        assert!(args.keep_files);
    }

    #[test]
    fn test_format_json() {
        let args = CliArgs::parse_from(["sketchwasm", "--format", "json"]);
        assert_eq!(args.format, OutputFormatArg::Json);
    }

    #[test]
    fn test_log_level_flag() {
        let args = CliArgs::parse_from(["sketchwasm", "--log-level", "debug"]);
        assert_eq!(args.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["sketchwasm", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(CliArgs::try_parse_from(["sketchwasm", "--delete-everything"]).is_err());
    }
}
