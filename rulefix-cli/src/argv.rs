//! Routes raw arguments between clap and the fix-option parser.
//!
//! Fix options (`--rules=A`) and paths may appear anywhere, and so may the
//! CLI's own flags. Tokens naming a clap argument go to clap together with
//! their value; everything else is appended after `--` so clap keeps it
//! verbatim for `parse_args`.

use clap::Command;

/// Rearranges `raw` (program name first) into an argv clap can parse.
///
/// `cmd` must be built so the generated `--help`/`--version` flags are known.
pub fn route_args<I>(cmd: &Command, raw: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut raw = raw.into_iter();
    let mut clap_args: Vec<String> = raw.next().into_iter().collect();
    let mut fix_args: Vec<String> = Vec::new();

    while let Some(token) = raw.next() {
        if token == "--" {
            fix_args.extend(raw.by_ref());
            break;
        }
        match clap_flag(cmd, &token) {
            Some(FlagShape { takes_value, inline_value }) => {
                clap_args.push(token);
                if takes_value && !inline_value {
                    clap_args.extend(raw.next());
                }
            }
            None => fix_args.push(token),
        }
    }

    clap_args.push("--".to_string());
    clap_args.extend(fix_args);
    clap_args
}

struct FlagShape {
    takes_value: bool,
    inline_value: bool,
}

fn clap_flag(cmd: &Command, token: &str) -> Option<FlagShape> {
    if let Some(long) = token.strip_prefix("--") {
        let (name, inline_value) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };
        let arg = cmd.get_arguments().find(|a| a.get_long() == Some(name))?;
        return Some(FlagShape {
            takes_value: arg.get_action().takes_values(),
            inline_value,
        });
    }

    let mut chars = token.strip_prefix('-')?.chars();
    let (Some(short), None) = (chars.next(), chars.next()) else {
        return None;
    };
    let arg = cmd.get_arguments().find(|a| a.get_short() == Some(short))?;
    Some(FlagShape {
        takes_value: arg.get_action().takes_values(),
        inline_value: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, ArgAction};
    use pretty_assertions::assert_eq;

    fn command() -> Command {
        let mut cmd = Command::new("rulefix")
            .version("0.0.0")
            .arg(Arg::new("dry_run").long("dry-run").action(ArgAction::SetTrue))
            .arg(Arg::new("report").long("report").action(ArgAction::Set))
            .arg(Arg::new("args").num_args(0..));
        cmd.build();
        cmd
    }

    fn route(tokens: &[&str]) -> Vec<String> {
        let raw = std::iter::once("rulefix")
            .chain(tokens.iter().copied())
            .map(str::to_string);
        route_args(&command(), raw)
    }

    #[test]
    fn flags_after_paths_reach_clap() {
        assert_eq!(
            route(&["A.java", "--dry-run", "dirA", "--rules=X"]),
            vec!["rulefix", "--dry-run", "--", "A.java", "dirA", "--rules=X"]
        );
    }

    #[test]
    fn separate_and_inline_values_stay_with_their_flag() {
        assert_eq!(
            route(&["A.java", "--report", "out.json", "--report=again.json"]),
            vec![
                "rulefix",
                "--report",
                "out.json",
                "--report=again.json",
                "--",
                "A.java"
            ]
        );
    }

    #[test]
    fn generated_help_and_version_are_known() {
        assert_eq!(route(&["A.java", "-h"]), vec!["rulefix", "-h", "--", "A.java"]);
        assert_eq!(
            route(&["--version"]),
            vec!["rulefix", "--version", "--"]
        );
    }

    #[test]
    fn unknown_tokens_keep_their_order() {
        assert_eq!(
            route(&["--excludeRules=R1", "-x", "f.java", "--ignoreTestFiles"]),
            vec![
                "rulefix",
                "--",
                "--excludeRules=R1",
                "-x",
                "f.java",
                "--ignoreTestFiles"
            ]
        );
    }

    #[test]
    fn double_dash_ends_flag_routing() {
        assert_eq!(
            route(&["--", "--dry-run", "A.java"]),
            vec!["rulefix", "--", "--dry-run", "A.java"]
        );
    }
}
