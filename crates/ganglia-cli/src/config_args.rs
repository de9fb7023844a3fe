//! Splitting configuration flags from command tokens.
//!
//! Configuration flags are consumed by the `ortho-config` loader; command
//! tokens belong to clap. Flags must appear before the first command token:
//! anything after it is treated as part of the command. The split keeps both
//! parsers blind to each other's vocabulary.

use std::ffi::{OsStr, OsString};

/// Configuration flags recognised by the loader, with whether a value
/// follows in the next argument when not supplied inline as `--flag=value`.
///
/// MAINTENANCE: keep in sync with the fields of `ganglia_config::Config`.
const CONFIG_CLI_FLAGS: &[(&str, bool)] = &[
    ("--config-path", true),
    ("--coordination-hosts", true),
    ("--topology-path", true),
    ("--agent-uri", true),
    ("--registrar-config", true),
    ("--router-config", true),
    ("--edge-config", true),
    ("--public-only", false),
    ("--log-filter", true),
    ("--log-format", true),
];

#[derive(Debug, Clone, Copy)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

fn process_config_flag(argument: &OsStr) -> FlagAction {
    let argument_text = argument.to_string_lossy();
    if !argument_text.starts_with("--") {
        return FlagAction::Skip;
    }

    let mut flag_parts = argument_text.splitn(2, '=');
    let Some(flag) = flag_parts.next() else {
        return FlagAction::Skip;
    };
    let has_inline_value = flag_parts.next().is_some();

    match CONFIG_CLI_FLAGS
        .iter()
        .find(|(name, _)| *name == flag)
    {
        Some((_, takes_value)) => FlagAction::Include {
            needs_value: *takes_value && !has_inline_value,
        },
        None => FlagAction::Skip,
    }
}

/// Result of partitioning the raw argument list.
pub(crate) struct ConfigArgumentSplit {
    /// `argv[0]` plus every configuration flag (and its values).
    pub(crate) config_arguments: Vec<OsString>,
    /// Index of the first command token in the original argument list.
    pub(crate) command_start: usize,
}

impl ConfigArgumentSplit {
    /// Builds the argument list handed to clap: `argv[0]` plus everything
    /// from the first command token onwards.
    pub(crate) fn command_arguments(&self, args: &[OsString]) -> Vec<OsString> {
        let mut command_arguments: Vec<OsString> = Vec::new();
        if let Some(first) = args.first() {
            command_arguments.push(first.clone());
        }
        command_arguments.extend(args.iter().skip(self.command_start).cloned());
        command_arguments
    }
}

/// Partitions `args` into configuration flags and command tokens.
pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    if args.is_empty() {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    }

    let mut filtered: Vec<OsString> = Vec::new();
    if let Some(first) = args.first() {
        filtered.push(first.clone());
    }

    let mut command_start = 1usize;
    let mut index = 1usize;
    let mut pending_values = 0usize;

    while index < args.len() {
        let Some(argument) = args.get(index) else {
            break;
        };
        if pending_values > 0 {
            filtered.push(argument.clone());
            pending_values -= 1;
            index += 1;
            command_start = index;
            continue;
        }

        match process_config_flag(argument.as_os_str()) {
            FlagAction::Include { needs_value } => {
                filtered.push(argument.clone());
                index += 1;
                command_start = index;
                if needs_value {
                    pending_values = 1;
                }
            }
            FlagAction::Skip => {
                break;
            }
        }
    }

    ConfigArgumentSplit {
        config_arguments: filtered,
        command_start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn inline_value_flags_do_not_need_a_follow_up_value() {
        let action = process_config_flag(OsStr::new("--log-filter=debug"));
        match action {
            FlagAction::Include { needs_value } => assert!(!needs_value),
            FlagAction::Skip => panic!("expected include for known inline flag"),
        }
    }

    #[test]
    fn separate_value_flags_consume_the_following_argument() {
        let action = process_config_flag(OsStr::new("--topology-path"));
        match action {
            FlagAction::Include { needs_value } => assert!(needs_value),
            FlagAction::Skip => panic!("expected include for known separated flag"),
        }
    }

    #[test]
    fn boolean_flags_never_consume_the_following_argument() {
        let args = os_args(&["ganglia", "--public-only", "reconcile"]);
        let split = split_config_arguments(&args);
        assert_eq!(split.config_arguments, os_args(&["ganglia", "--public-only"]));
        assert_eq!(
            split.command_arguments(&args),
            os_args(&["ganglia", "reconcile"])
        );
    }

    #[test]
    fn command_tokens_stop_the_scan() {
        let args = os_args(&[
            "ganglia",
            "--topology-path",
            "/prod",
            "publish",
            "--topology-path",
        ]);
        let split = split_config_arguments(&args);
        assert_eq!(
            split.config_arguments,
            os_args(&["ganglia", "--topology-path", "/prod"])
        );
        assert_eq!(
            split.command_arguments(&args),
            os_args(&["ganglia", "publish", "--topology-path"])
        );
    }

    #[test]
    fn unknown_flags_belong_to_the_command() {
        let args = os_args(&["ganglia", "--unknown", "reconcile"]);
        let split = split_config_arguments(&args);
        assert_eq!(split.config_arguments, os_args(&["ganglia"]));
        assert_eq!(split.command_start, 1);
    }
}
