use crate::csv::{CsvConfig, Table};
use crate::delimiter::Delimiter;
use crate::errors::{CsvReverseError, CsvReverseResult};
use crate::io::{OutputFile, open_input};
#[cfg(feature = "cli")]
use crate::logging;

#[cfg(feature = "cli")]
use clap::error::ErrorKind;
#[cfg(feature = "cli")]
use clap::Parser;
use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(version, about, styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    /// CSV file to reverse. The first line is the header.
    input_file: PathBuf,

    /// Where to write the reversed CSV. Created or overwritten.
    output_file: PathBuf,

    /// Delimiter character (comma by default), used for both input and output
    #[clap(short, long, value_name = "char")]
    delimiter: Option<String>,

    /// Use tab separation. Shortcut for -d '\t'.
    #[clap(short = 't', long)]
    tab_separated: bool,

    /// Log debugging information to stderr
    #[clap(long)]
    debug: bool,
}

#[cfg(feature = "cli")]
impl From<Args> for ReverseOptions {
    fn from(args: Args) -> Self {
        Self {
            input: args.input_file,
            output: args.output_file,
            delimiter: args.delimiter,
            tab_separated: args.tab_separated,
            debug: args.debug,
        }
    }
}

// Struct for library usage without clap directives
#[derive(Debug, Default)]
pub struct ReverseOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub delimiter: Option<String>,
    pub tab_separated: bool,
    /// Read by `run_csvreverse` when it installs the log subscriber
    pub debug: bool,
}

/// What a successful run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Number of data rows, header excluded
    pub rows: usize,
}

impl fmt::Display for ReverseSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Successfully reversed {} and saved to {}",
            self.input.display(),
            self.output.display()
        )?;
        write!(f, "Processed {} rows (excluding header).", self.rows)
    }
}

/// Reverse the data rows of a comma separated file, keeping the header first.
///
/// The output is only written once the whole input has been parsed, so a failure leaves any
/// existing file at `output` untouched.
///
/// Example:
///
/// ```no_run
/// let summary = csvreverse::reverse("data.csv", "reversed_data.csv").unwrap();
/// println!("{} rows", summary.rows);
/// ```
pub fn reverse(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> CsvReverseResult<ReverseSummary> {
    reverse_file(input.as_ref(), output.as_ref(), &CsvConfig::default())
}

/// Same as [`reverse`], with the knobs in `ReverseOptions`.
pub fn reverse_with_options(options: &ReverseOptions) -> CsvReverseResult<ReverseSummary> {
    let delimiter = Delimiter::from_arg(&options.delimiter, options.tab_separated)?;
    debug!(?delimiter, "parsed options");
    let config = CsvConfig::new(delimiter.as_byte());
    reverse_file(&options.input, &options.output, &config)
}

fn reverse_file(
    input: &Path,
    output: &Path,
    config: &CsvConfig,
) -> CsvReverseResult<ReverseSummary> {
    let file = open_input(input)?;
    let mut table = Table::read(file, config)?;
    table.reverse_rows();

    let mut output_file = OutputFile::create(output)?;
    debug!(path = %output_file.path().display(), "writing output");
    {
        let mut writer = output_file.writer();
        table.write(&mut writer, config)?;
        writer.flush()?;
    }
    output_file.persist()?;

    info!(
        input = %input.display(),
        output = %output.display(),
        rows = table.num_rows(),
        "reversed"
    );
    Ok(ReverseSummary {
        input: input.to_owned(),
        output: output.to_owned(),
        rows: table.num_rows(),
    })
}

/// Run csvreverse with a list of arguments. The accepted arguments are the same as the command
/// line arguments for the csvreverse binary, i.e. `<input_file> <output_file>` plus options.
///
/// Any invocation that does not parse is reported as `CsvReverseError::Usage`. `--help` and
/// `--version` print and exit the process.
///
/// Example:
///
/// ```no_run
/// use csvreverse::run_csvreverse;
///
/// match run_csvreverse(&["data.csv", "reversed_data.csv"]) {
///     Ok(summary) => println!("{}", summary),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
#[cfg(feature = "cli")]
pub fn run_csvreverse<I, T>(args: I) -> CsvReverseResult<ReverseSummary>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut args_items = vec![OsString::from("csvreverse")];
    for item in args {
        args_items.push(item.into());
    }
    let args = match Args::try_parse_from(args_items) {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => return Err(CsvReverseError::Usage),
        },
    };
    let options: ReverseOptions = args.into();
    logging::init(options.debug);
    reverse_with_options(&options)
}

#[cfg(not(feature = "cli"))]
pub fn run_csvreverse<I, T>(_args: I) -> CsvReverseResult<ReverseSummary>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    eprintln!("Error: CLI is not enabled. Compile with the 'cli' feature to use this binary.");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::fs;

    const PEOPLE: &str = "id,name\n1,alice\n2,bob\n3,carol\n";

    #[test]
    fn test_reverse_example() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, PEOPLE).unwrap();

        let summary = reverse(&input, &output).unwrap();
        assert_eq!(summary.rows, 3);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "id,name\n3,carol\n2,bob\n1,alice\n"
        );
    }

    #[test]
    fn test_summary_display() {
        let summary = ReverseSummary {
            input: PathBuf::from("data.csv"),
            output: PathBuf::from("reversed_data.csv"),
            rows: 3,
        };
        assert_eq!(
            summary.to_string(),
            "Successfully reversed data.csv and saved to reversed_data.csv\n\
             Processed 3 rows (excluding header)."
        );
    }

    #[test]
    fn test_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, PEOPLE).unwrap();

        reverse(&path, &path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "id,name\n3,carol\n2,bob\n1,alice\n"
        );
    }

    #[test]
    fn test_malformed_input_leaves_output_alone() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, "id,name\n1,alice\n2,bob,extra\n").unwrap();
        fs::write(&output, "keep me\n").unwrap();

        let err = reverse(&input, &output).unwrap_err();
        assert!(err.is_malformed_input());
        assert_eq!(fs::read_to_string(&output).unwrap(), "keep me\n");
    }

    #[test]
    fn test_options_with_tab_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.tsv");
        let output = dir.path().join("out.tsv");
        fs::write(&input, "a\tb\n1\tx,y\n2\tz\n").unwrap();

        let options = ReverseOptions {
            input: input.clone(),
            output: output.clone(),
            tab_separated: true,
            ..Default::default()
        };
        let summary = reverse_with_options(&options).unwrap();
        assert_eq!(summary.rows, 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "a\tb\n2\tz\n1\tx,y\n");
    }

    #[test]
    fn test_bad_delimiter_option() {
        let options = ReverseOptions {
            input: PathBuf::from("in.csv"),
            output: PathBuf::from("out.csv"),
            delimiter: Some("ab".to_string()),
            ..Default::default()
        };
        let err = reverse_with_options(&options).unwrap_err();
        assert!(matches!(err, CsvReverseError::DelimiterMultipleCharacters(_)));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_wrong_argument_count() {
        let none: [&str; 0] = [];
        assert!(matches!(run_csvreverse(none), Err(CsvReverseError::Usage)));
        assert!(matches!(run_csvreverse(["a.csv"]), Err(CsvReverseError::Usage)));
        assert!(matches!(
            run_csvreverse(["a.csv", "b.csv", "c.csv"]),
            Err(CsvReverseError::Usage)
        ));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_run_with_args() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, "x;y\n1;2\n3;4\n").unwrap();

        let summary = run_csvreverse([
            input.as_os_str(),
            output.as_os_str(),
            OsStr::new("--delimiter"),
            OsStr::new(";"),
        ])
        .unwrap();
        assert_eq!(summary.rows, 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "x;y\n3;4\n1;2\n");
    }
}
