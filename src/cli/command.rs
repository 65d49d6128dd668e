use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "Move contact messages misfiled in the quote collection",
        long_about = "Scan the quote collection for documents that carry a message but lack whatsapp, product or quantity, copy each into the contact message collection and remove the original.\n\nThe copy and the removal are separate writes: if the removal fails the document is left in both collections and the command exits with an error naming it."
    )]
    Reclassify {
        #[arg(
            long,
            default_value_t = false,
            help = "Only report misfiled documents, do not move them"
        )]
        dry_run: bool,
    },
}
