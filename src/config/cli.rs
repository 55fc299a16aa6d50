// Command-line parsing
// Pure function from argv to an immutable `CliArgs`; nothing is read from the environment here

use std::collections::BTreeMap;

use crate::error::CliError;

/// Short flag aliases
const SHORTHANDS: &[(&str, &str)] = &[("p", "port")];

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliArgs {
    /// `module/path.export` reference of the handler to serve
    pub handler: String,
    /// `--port=<n>` / `-p=<n>`
    pub port: Option<u16>,
    /// Every other `--key=value` flag, kept as a raw string
    pub options: BTreeMap<String, String>,
}

impl CliArgs {
    /// Parse arguments (without the program name).
    ///
    /// The first argument that is not a flag is the handler reference.
    /// Flags without `=` and unknown shorthands are ignored.
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut handler = None;
        let mut port = None;
        let mut options = BTreeMap::new();

        for arg in args {
            let arg = arg.as_ref();
            let Some((key, value)) = parse_flag(arg) else {
                if handler.is_none() && !arg.starts_with('-') {
                    handler = Some(arg.to_string());
                }
                continue;
            };

            if key == "port" {
                let parsed = value
                    .parse::<u16>()
                    .map_err(|_| CliError::InvalidPort(value.to_string()))?;
                port = Some(parsed);
            } else {
                options.insert(key.to_string(), value.to_string());
            }
        }

        Ok(Self {
            handler: handler.ok_or(CliError::MissingHandler)?,
            port,
            options,
        })
    }

    /// `--host=<addr>`
    pub fn host(&self) -> Option<&str> {
        self.options.get("host").map(String::as_str)
    }

    /// `--config=<path>`
    pub fn config_path(&self) -> Option<&str> {
        self.options.get("config").map(String::as_str)
    }
}

/// Split `--key=value` or `-k=value` into a canonical key and its value
fn parse_flag(arg: &str) -> Option<(&str, &str)> {
    if let Some(rest) = arg.strip_prefix("--") {
        let (key, value) = rest.split_once('=')?;
        return (!key.is_empty()).then_some((key, value));
    }

    let rest = arg.strip_prefix('-')?;
    let (short, value) = rest.split_once('=')?;
    SHORTHANDS
        .iter()
        .find(|(alias, _)| *alias == short)
        .map(|(_, key)| (*key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_only() {
        let args = CliArgs::parse(["src/index.handler"]).unwrap();
        assert_eq!(args.handler, "src/index.handler");
        assert_eq!(args.port, None);
        assert!(args.options.is_empty());
    }

    #[test]
    fn test_long_port_flag() {
        let args = CliArgs::parse(["src/index.handler", "--port=4000"]).unwrap();
        assert_eq!(args.port, Some(4000));
    }

    #[test]
    fn test_short_port_flag_before_handler() {
        let args = CliArgs::parse(["-p=8080", "index.handler"]).unwrap();
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.handler, "index.handler");
    }

    #[test]
    fn test_missing_handler() {
        assert_eq!(
            CliArgs::parse(Vec::<String>::new()),
            Err(CliError::MissingHandler)
        );
        assert_eq!(
            CliArgs::parse(["--port=3000"]),
            Err(CliError::MissingHandler)
        );
    }

    #[test]
    fn test_invalid_port() {
        assert_eq!(
            CliArgs::parse(["index.handler", "--port=abc"]),
            Err(CliError::InvalidPort("abc".to_string()))
        );
        assert_eq!(
            CliArgs::parse(["index.handler", "-p=70000"]),
            Err(CliError::InvalidPort("70000".to_string()))
        );
    }

    #[test]
    fn test_unknown_flags_are_ignored() {
        let args =
            CliArgs::parse(["index.handler", "--verbose", "-x=1", "-q", "other.handler"]).unwrap();
        assert_eq!(args.handler, "index.handler");
        assert_eq!(args.port, None);
        assert!(args.options.is_empty());
    }

    #[test]
    fn test_other_long_flags_are_raw_strings() {
        let args = CliArgs::parse([
            "index.handler",
            "--host=127.0.0.1",
            "--config=dev.toml",
            "--mode=a=b",
        ])
        .unwrap();
        assert_eq!(args.host(), Some("127.0.0.1"));
        assert_eq!(args.config_path(), Some("dev.toml"));
        assert_eq!(args.options["mode"], "a=b");
    }

    #[test]
    fn test_last_port_wins() {
        let args = CliArgs::parse(["index.handler", "-p=1", "--port=2"]).unwrap();
        assert_eq!(args.port, Some(2));
    }
}
