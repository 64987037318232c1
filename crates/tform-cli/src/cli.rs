use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tform",
    about = "Apply declarative delete and unify transforms to document data",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log evaluation and transform steps to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load one instance, apply its transforms, and print the resulting data
    Apply(ApplyArgs),
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Files or directories making up the instance
    pub args: Vec<String>,

    /// Label under which JSON data files are placed; repeat to nest
    #[arg(short = 'l', long = "path", value_name = "LABEL")]
    pub path: Vec<String>,

    /// Maximum evaluation nesting
    #[arg(long, default_value_t = 512)]
    pub max_depth: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_apply() {
        let cli = Cli::try_parse_from(["tform", "apply"]).unwrap();
        let Command::Apply(args) = cli.command;
        assert!(args.args.is_empty());
        assert!(args.path.is_empty());
        assert_eq!(args.max_depth, 512);
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_apply_with_labels() {
        let cli = Cli::try_parse_from([
            "tform", "apply", "-l", "data", "--path", "inner", "doc.tfm", "in.json",
        ])
        .unwrap();
        let Command::Apply(args) = cli.command;
        assert_eq!(args.path, vec!["data", "inner"]);
        assert_eq!(args.args, vec!["doc.tfm", "in.json"]);
    }

    #[test]
    fn parse_global_verbose() {
        let cli = Cli::try_parse_from(["tform", "apply", "-v", "--max-depth", "64"]).unwrap();
        assert!(cli.verbose);
        let Command::Apply(args) = cli.command;
        assert_eq!(args.max_depth, 64);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["tform"]).is_err());
        assert!(Cli::try_parse_from(["tform", "rename"]).is_err());
    }
}
