//! Command-line front end.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use gpucss::{Configuration, OutputFormat};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::options::Options;

const DEFAULT_MAX_BYTES: usize = 8 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(name = "gpu-accelerator")]
#[command(version, about = "Add GPU compositing hints to animated CSS rules", long_about = None)]
#[command(after_help = "EXAMPLES:
    gpu-accelerator style.css                 Print the rewritten stylesheet
    gpu-accelerator -o dist a.css b.css       Write dist/a.css and dist/b.css
    cat style.css | gpu-accelerator --format pretty")]
pub struct Args {
    /// Stylesheets to rewrite; `-` or none reads stdin
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// JSON options file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write results into this directory instead of stdout
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Do not add `transform: translateZ(0)`
    #[arg(long)]
    pub no_transform: bool,

    /// Do not add `will-change: transform`
    #[arg(long)]
    pub no_will_change: bool,

    /// Do not add `backface-visibility: hidden`
    #[arg(long)]
    pub no_backface: bool,

    /// Do not add `perspective: 1000px`
    #[arg(long)]
    pub no_perspective: bool,

    /// Comma-separated selector substrings to skip
    #[arg(long, value_name = "LIST")]
    pub exclude: Option<String>,

    /// Comma-separated property substrings that trigger acceleration
    #[arg(long, value_name = "LIST")]
    pub target: Option<String>,

    /// Output layout
    #[arg(long, value_enum, default_value_t = Format::Default)]
    pub format: Format,

    /// Fail on unparseable input instead of passing it through
    #[arg(long)]
    pub strict: bool,

    /// Inputs larger than this are passed through untouched
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_BYTES)]
    pub max_bytes: usize,

    /// Append log lines to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// More output per occurrence (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Default,
    Compact,
    Pretty,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Default => OutputFormat::Default,
            Format::Compact => OutputFormat::Compact,
            Format::Pretty => OutputFormat::Pretty,
        }
    }
}

/// Everything a single transformation needs, resolved from the arguments.
#[derive(Clone, Debug)]
pub struct Settings {
    pub config: Configuration,
    pub format: OutputFormat,
    pub strict: bool,
    pub max_bytes: usize,
}

impl Args {
    /// Loads the options file (if any) and applies the command-line overrides.
    pub fn settings(&self) -> Result<Settings> {
        let options = match &self.config {
            Some(path) => Options::load(path)?,
            None => Options::default(),
        };

        let mut config = options
            .to_configuration()
            .with_transform(options.enable_transform && !self.no_transform)
            .with_will_change(options.enable_will_change && !self.no_will_change)
            .with_backface(options.enable_backface && !self.no_backface)
            .with_perspective(options.enable_perspective && !self.no_perspective);
        if let Some(exclude) = &self.exclude {
            config = config.with_exclude_selectors(exclude.split(','));
        }
        if let Some(target) = &self.target {
            config = config.with_target_properties(target.split(','));
        }

        Ok(Settings {
            config,
            format: self.format.into(),
            strict: self.strict,
            max_bytes: self.max_bytes,
        })
    }

    fn inputs(&self) -> Vec<Input> {
        if self.files.is_empty() {
            return vec![Input::Stdin];
        }
        self.files
            .iter()
            .map(|path| {
                if path.as_os_str() == "-" {
                    Input::Stdin
                } else {
                    Input::File(path.clone())
                }
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn label(&self) -> &Path {
        match self {
            Input::Stdin => Path::new("<stdin>"),
            Input::File(path) => path,
        }
    }
}

/// Transforms one stylesheet according to `settings`.
pub fn process_source(label: &Path, source: &str, settings: &Settings) -> Result<String> {
    if source.len() > settings.max_bytes {
        log::warn!(
            "{}: {} bytes exceeds the {} byte limit, leaving it unchanged",
            label.display(),
            source.len(),
            settings.max_bytes
        );
        return Ok(source.to_string());
    }

    match gpucss::run(source, &settings.config, settings.format) {
        Ok(transformed) => {
            log::info!(
                "{}: {} of {} rules accelerated, {} declarations added",
                label.display(),
                transformed.matched,
                transformed.rules,
                transformed.injected
            );
            Ok(transformed.css)
        }
        Err(source_err) if settings.strict => Err(Error::Css {
            path: label.to_path_buf(),
            source: source_err,
        }),
        Err(err) => {
            log::warn!("{}: leaving stylesheet unchanged: {err}", label.display());
            Ok(source.to_string())
        }
    }
}

/// Reads every input, transforms them in parallel, then writes the results
/// in input order.
pub fn run(args: &Args) -> Result<()> {
    let settings = args.settings()?;
    let inputs = args.inputs();
    let targets = match &args.out_dir {
        Some(dir) => Some(output_paths(dir, &inputs)?),
        None => None,
    };

    let stdin = if inputs.contains(&Input::Stdin) {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Some(text)
    } else {
        None
    };

    let outputs = inputs
        .par_iter()
        .map(|input| {
            let source = match input {
                Input::Stdin => stdin.clone().unwrap_or_default(),
                Input::File(path) => fs::read_to_string(path).map_err(|source| Error::Read {
                    path: path.clone(),
                    source,
                })?,
            };
            process_source(input.label(), &source, &settings)
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir)?;
    }

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    match targets {
        Some(targets) => {
            for (target, css) in targets.iter().zip(outputs) {
                fs::write(target, css)?;
                log::info!("wrote {}", target.display());
            }
        }
        None => {
            for css in outputs {
                stdout.write_all(css.as_bytes())?;
            }
        }
    }
    stdout.flush()?;
    Ok(())
}

/// Where each input lands inside `dir`, keeping file names. Stdin is
/// written as `stdin.css`. Two inputs mapping to one file are rejected.
fn output_paths(dir: &Path, inputs: &[Input]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    inputs
        .iter()
        .map(|input| {
            let name = match input {
                Input::Stdin => OsStr::new("stdin.css"),
                Input::File(path) => path.file_name().unwrap_or(path.as_os_str()),
            };
            let target = dir.join(name);
            if !seen.insert(target.clone()) {
                return Err(Error::DuplicateOutput { path: target });
            }
            Ok(target)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(args: &[&str]) -> Settings {
        let args = Args::try_parse_from(std::iter::once("gpu-accelerator").chain(args.iter().copied()))
            .unwrap();
        args.settings().unwrap()
    }

    #[test]
    fn defaults_without_flags() {
        let settings = settings(&[]);
        assert_eq!(settings.config, Configuration::default());
        assert_eq!(settings.format, OutputFormat::Default);
        assert!(!settings.strict);
        assert_eq!(settings.max_bytes, DEFAULT_MAX_BYTES);
    }

    #[test]
    fn flags_override_the_defaults() {
        let settings = settings(&[
            "--no-backface",
            "--no-perspective",
            "--exclude",
            ".no-gpu, #legacy",
            "--target",
            "transition",
            "--format",
            "compact",
        ]);
        let config = &settings.config;
        assert!(config.enable_transform());
        assert!(config.enable_will_change());
        assert!(!config.enable_backface());
        assert!(!config.enable_perspective());
        assert_eq!(config.exclude_selectors(), [".no-gpu", "#legacy"]);
        assert_eq!(config.target_properties(), ["transition"]);
        assert_eq!(settings.format, OutputFormat::Compact);
    }

    #[test]
    fn dash_and_empty_file_list_mean_stdin() {
        let args = Args::try_parse_from(["gpu-accelerator"]).unwrap();
        assert_eq!(args.inputs(), [Input::Stdin]);

        let args = Args::try_parse_from(["gpu-accelerator", "a.css", "-"]).unwrap();
        assert_eq!(
            args.inputs(),
            [Input::File(PathBuf::from("a.css")), Input::Stdin]
        );
    }

    #[test]
    fn verbose_is_counted() {
        let args = Args::try_parse_from(["gpu-accelerator", "-vvv"]).unwrap();
        assert_eq!(args.verbose, 3);
    }

    #[test]
    fn process_source_transforms() {
        let settings = settings(&["--no-backface", "--no-perspective"]);
        let out = process_source(Path::new("a.css"), ".box { animation: fade 1s; }", &settings)
            .unwrap();
        assert_eq!(
            out,
            ".box { animation: fade 1s; transform: translateZ(0); will-change: transform; }\n"
        );
    }

    #[test]
    fn process_source_passes_broken_input_through() {
        let input = ".broken { transform: ;";
        let out = process_source(Path::new("a.css"), input, &settings(&[])).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn strict_mode_reports_the_file() {
        let err = process_source(Path::new("a.css"), ".broken {", &settings(&["--strict"]))
            .unwrap_err();
        assert!(matches!(err, Error::Css { ref path, .. } if path == Path::new("a.css")));
        assert!(err.to_string().starts_with("a.css: "));
    }

    #[test]
    fn oversized_input_is_untouched() {
        let input = ".box { animation: fade 1s; }";
        let out = process_source(Path::new("a.css"), input, &settings(&["--max-bytes", "4"]))
            .unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn output_paths_keep_file_names() {
        let inputs = [Input::File(PathBuf::from("css/a.css")), Input::Stdin];
        assert_eq!(
            output_paths(Path::new("dist"), &inputs).unwrap(),
            [PathBuf::from("dist/a.css"), PathBuf::from("dist/stdin.css")]
        );
    }

    #[test]
    fn output_paths_reject_shared_file_names() {
        let inputs = [
            Input::File(PathBuf::from("a/x.css")),
            Input::File(PathBuf::from("b/x.css")),
        ];
        let err = output_paths(Path::new("dist"), &inputs).unwrap_err();
        assert!(matches!(err, Error::DuplicateOutput { ref path } if path == Path::new("dist/x.css")));
    }

    #[test]
    fn output_paths_reject_repeated_stdin() {
        let args = Args::try_parse_from(["gpu-accelerator", "-", "-"]).unwrap();
        let err = output_paths(Path::new("dist"), &args.inputs()).unwrap_err();
        assert!(matches!(err, Error::DuplicateOutput { .. }));
    }
}
