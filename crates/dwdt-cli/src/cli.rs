use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dwdt",
    version,
    about = "Tools for moving packed game data between a cartridge image, checksummed containers, and editable JSON records.",
    long_about = "Tools for moving packed game data between a cartridge image, checksummed containers, and editable JSON records.\n\nNotes:\n  - Offsets and sizes come from the type registry (built-in tables, or --registry <file>).\n  - Insertion always backs up the original image and never changes its length."
)]
pub(crate) struct Cli {
    /// Emit machine-readable JSON instead of human output.
    #[arg(long)]
    pub(crate) json: bool,

    /// Registry configuration file (JSON); defaults to the built-in tables.
    #[arg(long, global = true)]
    pub(crate) registry: Option<String>,

    #[command(subcommand)]
    pub(crate) cmd: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Read one type's payload out of an image into a container file.
    Extract {
        /// Cartridge image to read.
        image: String,
        /// Type to extract: a registry name (`monsters`) or id (`0x01`).
        #[arg(long = "type", value_name = "TYPE")]
        type_spec: String,
        /// Container path to write.
        #[arg(long)]
        out: String,
    },
    /// Decode a container's payload into an editable JSON record file.
    Unpack {
        /// Container path to read.
        container: String,
        /// Records path to write.
        #[arg(long)]
        out: String,
        /// Optional type to check the container against (name or id).
        #[arg(long = "type", value_name = "TYPE")]
        type_spec: Option<String>,
    },
    /// Validate and re-encode a JSON record file into a fresh container.
    Pack {
        /// Records path to read.
        records: String,
        /// Container path to write.
        #[arg(long)]
        out: String,
    },
    /// Write a container's payload back into an image at its registered offset.
    Insert {
        /// Container path to read.
        container: String,
        /// Cartridge image to update.
        #[arg(long)]
        image: String,
        /// Destination image path (defaults to updating `--image` in place,
        /// after a backup).
        #[arg(long)]
        out: Option<String>,
    },
    /// Check a JSON record file against its type's field rules, reporting
    /// every violation.
    Validate {
        /// Records path to check.
        records: String,
    },
    /// Print a container file's header.
    Inspect {
        /// Container path to inspect.
        container: String,
    },
    /// List the registry's type entries.
    Tables,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_parses() {
        let cli = Cli::try_parse_from([
            "dwdt", "extract", "game.nes", "--type", "monsters", "--out", "monsters.dwdt",
        ])
        .expect("parse should succeed");
        assert!(!cli.json);
        match cli.cmd {
            Command::Extract {
                image,
                type_spec,
                out,
            } => {
                assert_eq!(image, "game.nes");
                assert_eq!(type_spec, "monsters");
                assert_eq!(out, "monsters.dwdt");
            }
            _ => panic!("expected extract command"),
        }
    }

    #[test]
    fn unpack_type_is_optional() {
        let cli = Cli::try_parse_from(["dwdt", "unpack", "monsters.dwdt", "--out", "m.json"])
            .expect("parse should succeed");
        match cli.cmd {
            Command::Unpack { type_spec, .. } => assert_eq!(type_spec, None),
            _ => panic!("expected unpack command"),
        }
    }

    #[test]
    fn insert_defaults_to_in_place() {
        let cli = Cli::try_parse_from(["dwdt", "insert", "m.dwdt", "--image", "game.nes"])
            .expect("parse should succeed");
        match cli.cmd {
            Command::Insert {
                container,
                image,
                out,
            } => {
                assert_eq!(container, "m.dwdt");
                assert_eq!(image, "game.nes");
                assert_eq!(out, None);
            }
            _ => panic!("expected insert command"),
        }
    }

    #[test]
    fn registry_flag_is_global() {
        let cli = Cli::try_parse_from([
            "dwdt",
            "tables",
            "--registry",
            "tables.json",
        ])
        .expect("parse should succeed");
        assert_eq!(cli.registry.as_deref(), Some("tables.json"));
        assert!(matches!(cli.cmd, Command::Tables));
    }

    #[test]
    fn json_flag_parses() {
        let cli = Cli::try_parse_from(["dwdt", "--json", "inspect", "m.dwdt"])
            .expect("parse should succeed");
        assert!(cli.json);
        match cli.cmd {
            Command::Inspect { container } => assert_eq!(container, "m.dwdt"),
            _ => panic!("expected inspect command"),
        }
    }
}
