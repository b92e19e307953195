//! Command-line interface definition.
use std::path::PathBuf;

use clap::Parser;

use crate::config::Preset;
use crate::distro::Distro;
use crate::tasks::DEFAULT_SHELL;

/// Top-level CLI entry point for the provisioning tool.
#[derive(Parser, Debug)]
#[command(
    name = "provision",
    about = "Provision a fresh Linux machine: packages, source builds, services, dotfiles and shell",
    version
)]
pub struct Cli {
    /// Distribution being provisioned
    #[arg(value_enum)]
    pub distro: Distro,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log every command instead of running it
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Dotfiles directory (defaults to $PROVISION_ROOT, then ~/dotfiles)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Preset to provision; asked interactively when omitted
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Update package databases before installing
    #[arg(long)]
    pub update: bool,

    /// Login shell to configure
    #[arg(long, default_value = DEFAULT_SHELL)]
    pub shell: PathBuf,

    /// Do not offer to reboot when done
    #[arg(long)]
    pub no_reboot_prompt: bool,

    /// Skip specific tasks
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Run only specific tasks
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_distro_only() {
        let cli = Cli::parse_from(["provision", "archlinux"]);
        assert_eq!(cli.distro, Distro::Archlinux);
        assert!(!cli.dry_run);
        assert!(!cli.update);
        assert_eq!(cli.preset, None);
        assert_eq!(cli.shell, PathBuf::from("/bin/zsh"));
        assert!(cli.skip.is_empty());
    }

    #[test]
    fn parse_every_distro() {
        for (arg, distro) in [
            ("archlinux", Distro::Archlinux),
            ("debian", Distro::Debian),
            ("ubuntu", Distro::Ubuntu),
            ("fedora", Distro::Fedora),
            ("fedora-asahi-remix", Distro::FedoraAsahiRemix),
        ] {
            assert_eq!(Cli::parse_from(["provision", arg]).distro, distro);
        }
    }

    #[test]
    fn missing_distro_is_usage_error() {
        let err = Cli::try_parse_from(["provision"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn unknown_distro_is_usage_error() {
        let err = Cli::try_parse_from(["provision", "gentoo"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn parse_dry_run_short() {
        let cli = Cli::parse_from(["provision", "-d", "debian"]);
        assert!(cli.dry_run);
    }

    #[test]
    fn parse_preset_and_options() {
        let cli = Cli::parse_from([
            "provision",
            "ubuntu",
            "--preset",
            "server",
            "--update",
            "--shell",
            "/usr/bin/fish",
            "--no-reboot-prompt",
            "--root",
            "/srv/dotfiles",
        ]);
        assert_eq!(cli.preset, Some(Preset::Server));
        assert!(cli.update);
        assert!(cli.no_reboot_prompt);
        assert_eq!(cli.shell, PathBuf::from("/usr/bin/fish"));
        assert_eq!(cli.root, Some(PathBuf::from("/srv/dotfiles")));
    }

    #[test]
    fn parse_skip_tasks() {
        let cli = Cli::parse_from(["provision", "fedora", "--skip", "shell,services"]);
        assert_eq!(cli.skip, vec!["shell", "services"]);
    }

    #[test]
    fn parse_only_tasks() {
        let cli = Cli::parse_from(["provision", "fedora", "--only", "symlinks"]);
        assert_eq!(cli.only, vec!["symlinks"]);
    }
}
