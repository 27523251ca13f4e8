//! Command-line configuration.

use std::path::PathBuf;

use crate::Error;

const DEFAULT_INPUT: &str = "in.txt";
const DEFAULT_OUTPUT: &str = "out.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Run the batch in `input` and write the report to `output`.
    Run { input: PathBuf, output: PathBuf },
    /// Write one random instance to `output`.
    Generate {
        n: usize,
        workers: usize,
        output: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
}

impl Config {
    /// Builds a config from arguments, program name excluded.
    ///
    /// With no arguments the batch runs on `in.txt` and writes `out.txt`.
    pub fn from_args<I>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let mode = args.first().map(String::as_str).unwrap_or("run");

        let mode = match mode {
            "run" => Mode::Run {
                input: path_arg(&args, 1, DEFAULT_INPUT),
                output: path_arg(&args, 2, DEFAULT_OUTPUT),
            },
            "generate" => Mode::Generate {
                n: positive_arg(&args, 1, "n")?,
                workers: positive_arg(&args, 2, "workers")?,
                output: path_arg(&args, 3, DEFAULT_INPUT),
            },
            other => return Err(Error::Usage(format!("unknown mode {other:?}"))),
        };

        Ok(Self { mode })
    }

    pub fn usage(program: &str) -> String {
        format!(
            "Usage: {program} <mode> [args...]\n\
             Modes:\n  \
             run [input] [output]\n      \
             Run every instance (defaults {DEFAULT_INPUT}, {DEFAULT_OUTPUT})\n  \
             generate <n> <workers> [output]\n      \
             Write a random n×n instance (default {DEFAULT_INPUT})"
        )
    }
}

fn path_arg(args: &[String], idx: usize, default: &str) -> PathBuf {
    PathBuf::from(args.get(idx).map(String::as_str).unwrap_or(default))
}

fn positive_arg(args: &[String], idx: usize, name: &str) -> Result<usize, Error> {
    let raw = args
        .get(idx)
        .ok_or_else(|| Error::Usage(format!("missing <{name}>")))?;
    match raw.parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(Error::Usage(format!("<{name}> must be a positive integer, got {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_args(Vec::new()).unwrap();
        assert_eq!(
            config.mode,
            Mode::Run {
                input: PathBuf::from("in.txt"),
                output: PathBuf::from("out.txt"),
            }
        );
    }

    #[test]
    fn test_generate() {
        let config = Config::from_args(args(&["generate", "64", "4", "big.txt"])).unwrap();
        assert_eq!(
            config.mode,
            Mode::Generate {
                n: 64,
                workers: 4,
                output: PathBuf::from("big.txt"),
            }
        );
    }

    #[test]
    fn test_rejects_bad_args() {
        assert!(matches!(
            Config::from_args(args(&["generate", "0", "4"])),
            Err(Error::Usage(_))
        ));
        assert!(matches!(
            Config::from_args(args(&["generate", "8"])),
            Err(Error::Usage(_))
        ));
        assert!(matches!(
            Config::from_args(args(&["serve"])),
            Err(Error::Usage(_))
        ));
    }
}
