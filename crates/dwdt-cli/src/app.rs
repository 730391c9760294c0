use crate::cli::{Cli, Command};

pub(crate) fn run(cli: Cli) -> anyhow::Result<()> {
    let registry = crate::util::load_registry(cli.registry.as_deref())?;
    match cli.cmd {
        Command::Extract {
            image,
            type_spec,
            out,
        } => crate::commands::extract::cmd_extract(&registry, &image, &type_spec, &out, cli.json),
        Command::Unpack {
            container,
            out,
            type_spec,
        } => crate::commands::unpack::cmd_unpack(
            &registry,
            &container,
            &out,
            type_spec.as_deref(),
            cli.json,
        ),
        Command::Pack { records, out } => {
            crate::commands::pack::cmd_pack(&registry, &records, &out, cli.json)
        }
        Command::Insert {
            container,
            image,
            out,
        } => crate::commands::insert::cmd_insert(
            &registry,
            &container,
            &image,
            out.as_deref(),
            cli.json,
        ),
        Command::Validate { records } => {
            crate::commands::validate::cmd_validate(&registry, &records, cli.json)
        }
        Command::Inspect { container } => {
            crate::commands::inspect::cmd_inspect(&container, cli.json)
        }
        Command::Tables => crate::commands::tables::cmd_tables(&registry, cli.json),
    }
}
