use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use trellis_hmm::report::{is_quit, parse_observations, render_query};
use trellis_hmm::{presets, HmmError, Model, Result};

const BANNER: &str = "\n======================End of Program======================\n";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("hmm_eval: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&options) {
        eprintln!("hmm_eval: {err}");
        std::process::exit(1);
    }
}

fn run(options: &Options) -> Result<()> {
    let model = presets::hot_cold()?;
    let mut transcript = match &options.log_path {
        Some(path) => {
            info!(path = %path.display(), "writing transcript");
            Some(BufWriter::new(File::create(path)?))
        }
        None => None,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut errors = io::stderr();
    writeln!(out, "\nHidden Markov Model evaluator (HOT/COLD weather model)")?;

    match &options.observations {
        Some(line) => {
            evaluate(&model, line, &mut out, &mut errors, &mut transcript)?;
            write_banner(&mut out, &mut transcript)?;
        }
        None => {
            command_loop(
                &model,
                io::stdin().lock(),
                &mut out,
                &mut errors,
                &mut transcript,
            )?;
        }
    }
    Ok(())
}

/// Read one observation line per iteration until `q` or end of input, then
/// write the closing banner. Returns the number of reports produced.
///
/// Lines are decoded lossily: bytes that are not UTF-8 become replacement
/// characters, which the engines reject as unknown symbols. Only I/O
/// failures end the loop early.
fn command_loop<R: BufRead>(
    model: &Model,
    mut input: R,
    out: &mut impl Write,
    errors: &mut impl Write,
    transcript: &mut Option<impl Write>,
) -> Result<usize> {
    let mut reports = 0;
    let mut buf = Vec::new();
    loop {
        writeln!(
            out,
            "\nEnter a sequence of observations from {:?} (q to quit):",
            model.vocabulary()
        )?;
        out.flush()?;
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            debug!("end of input");
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if is_quit(&line) {
            break;
        }
        if evaluate(model, &line, out, errors, transcript)? {
            reports += 1;
        }
    }
    write_banner(out, transcript)?;
    Ok(reports)
}

/// Evaluate one line. Query errors are reported and swallowed so the loop
/// keeps going; only I/O errors propagate. Returns whether a report was
/// written.
fn evaluate(
    model: &Model,
    line: &str,
    out: &mut impl Write,
    errors: &mut impl Write,
    transcript: &mut Option<impl Write>,
) -> Result<bool> {
    let observations = parse_observations(line);
    match render_query(model, &observations) {
        Ok(text) => {
            out.write_all(text.as_bytes())?;
            if let Some(w) = transcript.as_mut() {
                w.write_all(text.as_bytes())?;
            }
            Ok(true)
        }
        Err(err) => {
            writeln!(errors, "error: {err}")?;
            Ok(false)
        }
    }
}

fn write_banner(out: &mut impl Write, transcript: &mut Option<impl Write>) -> Result<()> {
    out.write_all(BANNER.as_bytes())?;
    out.flush()?;
    if let Some(w) = transcript.as_mut() {
        w.write_all(BANNER.as_bytes())?;
        w.flush()?;
    }
    Ok(())
}

struct Options {
    log_path: Option<PathBuf>,
    observations: Option<String>,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut log_path = Some(PathBuf::from("output.txt"));
        let mut observations = None;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if arg == "--no-log" {
                log_path = None;
            } else if let Some(value) = arg.strip_prefix("--log=") {
                log_path = Some(PathBuf::from(value));
            } else if arg == "--log" {
                let value: String = args
                    .next()
                    .ok_or_else(|| HmmError::InvalidInput {
                        reason: "missing value after --log".to_string(),
                    })?
                    .into();
                log_path = Some(PathBuf::from(value));
            } else if arg.starts_with('-') && arg.len() > 1 {
                return Err(HmmError::InvalidInput {
                    reason: format!("unknown option {arg}"),
                });
            } else if observations.is_none() {
                observations = Some(arg);
            } else {
                return Err(HmmError::InvalidInput {
                    reason: "expected at most one observation sequence".to_string(),
                });
            }
        }

        Ok(Self {
            log_path,
            observations,
        })
    }

    fn print_help() {
        println!(
            "Usage: hmm_eval [--log <path> | --no-log] [OBSERVATIONS]\n\n\
             Evaluates digit observation sequences (e.g. 3132) against the HOT/COLD\n\
             weather HMM, printing forward, Viterbi and backpointer tables.\n\n\
             Options:\n  \
             --log <path>   transcript file (default: output.txt)\n  \
             --no-log       do not write a transcript\n  \
             -h, --help     show this message\n\n\
             Without OBSERVATIONS, sequences are read from stdin until `q` or EOF.\n\
             Set RUST_LOG=debug for engine diagnostics."
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_loop(input: &[u8]) -> (usize, String, String, String) {
        let model = presets::hot_cold().unwrap();
        let mut out = Vec::new();
        let mut errors = Vec::new();
        let mut transcript = Some(Vec::new());
        let reports = command_loop(&model, input, &mut out, &mut errors, &mut transcript).unwrap();
        (
            reports,
            String::from_utf8(out).unwrap(),
            String::from_utf8(errors).unwrap(),
            String::from_utf8(transcript.unwrap()).unwrap(),
        )
    }

    #[test]
    fn loop_continues_after_errors_and_stops_on_quit() {
        let (reports, out, errors, transcript) = run_loop(b"3\n\n9\nQ\n1\n");
        // `3` is the only report: the empty line and `9` fail, `Q` stops
        // the loop before `1` is read.
        assert_eq!(reports, 1);
        assert_eq!(out.matches("Forward probabilities").count(), 1);
        assert!(out.contains("observations 3:"));
        assert!(!out.contains("observations 1:"));
        assert_eq!(errors.lines().count(), 2);
        assert!(errors.contains("observation sequence is empty"));
        assert!(errors.contains("unknown observation symbol 9"));
        assert!(out.ends_with(BANNER));
        assert!(transcript.ends_with(BANNER));
        assert_eq!(transcript.matches("Forward probabilities").count(), 1);
    }

    #[test]
    fn invalid_utf8_is_reported_not_fatal() {
        let (reports, out, errors, transcript) = run_loop(b"31\n\xff\xfe\n1\nq\n");
        assert_eq!(reports, 2);
        assert_eq!(out.matches("Forward probabilities").count(), 2);
        assert!(errors.contains("unknown observation symbol"));
        assert_eq!(errors.lines().count(), 1);
        assert_eq!(out.matches("End of Program").count(), 1);
        assert!(transcript.ends_with(BANNER));
    }

    #[test]
    fn end_of_input_without_quit_still_writes_banner() {
        let (reports, out, errors, _) = run_loop(b"2\n3");
        assert_eq!(reports, 2);
        assert!(errors.is_empty());
        assert!(out.ends_with(BANNER));
    }

    #[test]
    fn defaults_to_interactive_with_transcript() {
        let opts = Options::parse(Vec::<String>::new().into_iter()).unwrap();
        assert_eq!(opts.log_path, Some(PathBuf::from("output.txt")));
        assert!(opts.observations.is_none());
    }

    #[test]
    fn parses_flags_and_positional() {
        let opts = Options::parse(["--log=run.txt", "3132"].into_iter()).unwrap();
        assert_eq!(opts.log_path, Some(PathBuf::from("run.txt")));
        assert_eq!(opts.observations.as_deref(), Some("3132"));

        let opts = Options::parse(["--no-log", "1"].into_iter()).unwrap();
        assert!(opts.log_path.is_none());

        let opts = Options::parse(["--log", "x.txt"].into_iter()).unwrap();
        assert_eq!(opts.log_path, Some(PathBuf::from("x.txt")));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(Options::parse(["--log"].into_iter()).is_err());
        assert!(Options::parse(["--verbose"].into_iter()).is_err());
        assert!(Options::parse(["1", "2"].into_iter()).is_err());
    }
}
